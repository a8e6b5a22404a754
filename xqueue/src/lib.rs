//! # XQueue - A Blocking Bounded Byte Queue
//!
//! XQueue is a fixed-capacity byte queue shared between producer and
//! consumer threads, exposed through a sequential read/write interface
//! with blocking semantics:
//!
//! - **FIFO delivery**: bytes come out in the order they were written
//! - **Blocking operations**: readers park while the queue is empty,
//!   writers park while it is full
//! - **Non-blocking operations**: fail immediately with `WouldBlock`
//!   instead of parking
//! - **Interruption**: a parked caller can be cancelled from another
//!   thread and returns a distinct `Interrupted` error
//! - **Device-style handles**: per-caller access points carrying the
//!   open mode and a stream position, delivering fixed-size records
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     Caller Threads                       │
//! ├─────────────────────────────────────────────────────────┤
//! │                     Handle Layer                         │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────┐   │
//! │  │ OpenOptions │ │ read_into   │ │   write_from    │   │
//! │  └─────────────┘ └─────────────┘ └─────────────────┘   │
//! ├─────────────────────────────────────────────────────────┤
//! │                     Queue Layer                          │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────┐   │
//! │  │    Mutex    │ │  not_empty  │ │    not_full     │   │
//! │  └─────────────┘ └─────────────┘ └─────────────────┘   │
//! ├─────────────────────────────────────────────────────────┤
//! │                     Storage Layer                        │
//! │  ┌─────────────────────────────────────────────────┐   │
//! │  │         RingBuffer (wrapping head/tail)          │   │
//! │  └─────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use xqueue::{ByteQueue, OpenOptions};
//!
//! let queue: Arc<ByteQueue> = Arc::new(ByteQueue::new());
//!
//! // Producer side
//! queue.write(b"hi")?;
//!
//! // Consumer side, through a device-style handle
//! let mut handle = OpenOptions::new().open(&queue);
//! let mut out = Vec::new();
//! let n = handle.read_into(&mut out)?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handle;
pub mod io;
pub mod queue;
pub mod ring;

// Re-export commonly used types
pub use config::OpenOptions;
pub use error::{Error, ErrorKind, Result};
pub use handle::Handle;
pub use queue::ByteQueue;
pub use ring::RingBuffer;

/// Default queue capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 16;

/// Number of bytes a handle delivers per read call.
///
/// The device surface is record oriented: each read transfers one record
/// of this size (less only when fewer bytes are queued), regardless of how
/// much the caller asked for.
pub const READ_CHUNK: usize = 2;
