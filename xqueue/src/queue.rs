//! The blocking bounded byte queue.
//!
//! A `Mutex` guards the ring storage; two `Condvar`s carry wake-ups
//! between the two sides: `not_empty` to parked readers, `not_full` to
//! parked writers. Waits always re-check their condition in a loop, and
//! the lock is released atomically with parking, so a wake-up signalled
//! between the release and the park cannot be lost.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::DEFAULT_CAPACITY;
use crate::READ_CHUNK;
use crate::error::{Error, ErrorKind, Result};
use crate::io::Write;
use crate::ring::RingBuffer;

/// State guarded by the queue lock.
#[derive(Debug)]
struct Shared<const N: usize> {
    /// The byte storage. Inspected and mutated only under the lock.
    ring: RingBuffer<N>,

    /// Interruption counter. A parked caller that wakes to a changed
    /// value abandons its operation.
    interrupts: u64,
}

/// A fixed-capacity byte queue shared between producer and consumer
/// threads.
///
/// Readers block while the queue is empty and writers block while it is
/// full; the `try_` variants fail with [`ErrorKind::WouldBlock`] instead.
/// A parked caller can be cancelled with [`ByteQueue::interrupt`].
///
/// The queue is explicitly constructed and explicitly owned; share it by
/// wrapping it in an `Arc`. There is no process-wide instance.
#[derive(Debug)]
pub struct ByteQueue<const N: usize = DEFAULT_CAPACITY> {
    shared: Mutex<Shared<N>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<const N: usize> ByteQueue<N> {
    /// Creates an empty queue with zeroed storage.
    pub const fn new() -> Self {
        Self {
            shared: Mutex::new(Shared {
                ring: RingBuffer::new(),
                interrupts: 0,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Reads up to `dst.len()` bytes, blocking while the queue is empty.
    ///
    /// Returns the number of bytes copied out, at least 1 for a non-empty
    /// `dst`. Fails with [`ErrorKind::Interrupted`] if the wait is
    /// cancelled; no bytes have moved in that case.
    pub fn read(&self, dst: &mut [u8]) -> Result<usize> {
        self.read_inner(dst, true)
    }

    /// Reads up to `dst.len()` bytes without blocking.
    ///
    /// Fails with [`ErrorKind::WouldBlock`] if the queue is empty,
    /// leaving all state unchanged.
    pub fn try_read(&self, dst: &mut [u8]) -> Result<usize> {
        self.read_inner(dst, false)
    }

    /// Writes up to `src.len()` bytes, blocking while the queue is full.
    ///
    /// Once space exists the transfer is truncated to the remaining
    /// capacity; the returned count may be less than `src.len()`. Fails
    /// with [`ErrorKind::Interrupted`] if the wait is cancelled.
    pub fn write(&self, src: &[u8]) -> Result<usize> {
        self.write_inner(src, true)
    }

    /// Writes up to `src.len()` bytes without blocking.
    ///
    /// Fails with [`ErrorKind::WouldBlock`] if the queue is full,
    /// leaving all state unchanged.
    pub fn try_write(&self, src: &[u8]) -> Result<usize> {
        self.write_inner(src, false)
    }

    /// Cancels every caller currently parked in a blocking wait.
    ///
    /// Each of them wakes, abandons its operation without transferring
    /// any bytes, and returns [`ErrorKind::Interrupted`]. Callers that
    /// are not parked, and operations started afterwards, are unaffected.
    pub fn interrupt(&self) {
        let mut shared = self.lock_shared();
        shared.interrupts += 1;
        log::debug!("interrupt delivered, epoch {}", shared.interrupts);
        drop(shared);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Returns the number of bytes currently queued.
    pub fn len(&self) -> usize {
        self.lock_shared().ring.len()
    }

    /// Returns true if no bytes are queued.
    pub fn is_empty(&self) -> bool {
        self.lock_shared().ring.is_empty()
    }

    /// Returns true if the queue is at capacity.
    pub fn is_full(&self) -> bool {
        self.lock_shared().ring.is_full()
    }

    /// Returns the capacity in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns how many bytes can be written before the queue is full.
    pub fn remaining(&self) -> usize {
        self.lock_shared().ring.remaining()
    }

    fn read_inner(&self, dst: &mut [u8], blocking: bool) -> Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }

        let mut shared = self.lock_shared();
        let interrupts_seen = shared.interrupts;

        while shared.ring.is_empty() {
            if !blocking {
                return Err(Error::new(ErrorKind::WouldBlock));
            }
            shared = self.wait(&self.not_empty, shared);
            // Cancellation takes priority over re-checking the condition
            if shared.interrupts != interrupts_seen {
                return Err(Error::new(ErrorKind::Interrupted));
            }
        }

        let count = shared.ring.read(dst);
        log::trace!("read {} bytes, {} left queued", count, shared.ring.len());
        drop(shared);
        self.not_full.notify_all();

        Ok(count)
    }

    fn write_inner(&self, src: &[u8], blocking: bool) -> Result<usize> {
        if src.is_empty() {
            return Ok(0);
        }

        let mut shared = self.lock_shared();
        let interrupts_seen = shared.interrupts;

        while shared.ring.is_full() {
            if !blocking {
                return Err(Error::new(ErrorKind::WouldBlock));
            }
            shared = self.wait(&self.not_full, shared);
            if shared.interrupts != interrupts_seen {
                return Err(Error::new(ErrorKind::Interrupted));
            }
        }

        let count = shared.ring.write(src);
        log::trace!("wrote {} bytes, {} queued", count, shared.ring.len());
        drop(shared);
        self.not_empty.notify_all();

        Ok(count)
    }

    /// Delivers one record of up to [`READ_CHUNK`] bytes into `sink`.
    ///
    /// The record is peeked first and only consumed from the ring after
    /// the sink accepted all of it; a failing sink yields `CopyFault`
    /// with the queue untouched.
    pub(crate) fn read_record<S: Write>(&self, sink: &mut S, blocking: bool) -> Result<usize> {
        let mut shared = self.lock_shared();
        let interrupts_seen = shared.interrupts;

        while shared.ring.is_empty() {
            if !blocking {
                return Err(Error::new(ErrorKind::WouldBlock));
            }
            shared = self.wait(&self.not_empty, shared);
            if shared.interrupts != interrupts_seen {
                return Err(Error::new(ErrorKind::Interrupted));
            }
        }

        let mut record = [0u8; READ_CHUNK];
        let count = shared.ring.peek(&mut record);
        sink.write_all(&record[..count])
            .map_err(|_| Error::new(ErrorKind::CopyFault))?;
        shared.ring.skip(count);
        log::trace!("delivered {}-byte record, {} left queued", count, shared.ring.len());
        drop(shared);
        self.not_full.notify_all();

        Ok(count)
    }

    fn lock_shared(&self) -> MutexGuard<'_, Shared<N>> {
        // A panicking peer completed its state transition before the
        // poison was set; the ring is still consistent.
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(
        &self,
        condition: &Condvar,
        guard: MutexGuard<'a, Shared<N>>,
    ) -> MutexGuard<'a, Shared<N>> {
        condition.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }
}

impl<const N: usize> Default for ByteQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
