//! Open-mode configuration for queue handles.

use std::sync::Arc;

use crate::handle::Handle;
use crate::queue::ByteQueue;

/// Builder for the mode a handle is opened with.
///
/// Models the flag word a caller passes when opening the device: today
/// that is only the non-blocking bit.
#[derive(Debug, Clone)]
pub struct OpenOptions {
    nonblocking: bool,
}

impl OpenOptions {
    /// Starts from the default mode: blocking.
    pub fn new() -> Self {
        Self { nonblocking: false }
    }

    /// Selects whether operations fail with `WouldBlock` instead of
    /// parking.
    pub fn with_nonblocking(mut self, nonblocking: bool) -> Self {
        self.nonblocking = nonblocking;
        self
    }

    /// Opens a handle bound to `queue`. Always succeeds.
    pub fn open<const N: usize>(&self, queue: &Arc<ByteQueue<N>>) -> Handle<N> {
        Handle::bind(queue.clone(), self.nonblocking)
    }
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self::new()
    }
}
