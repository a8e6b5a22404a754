//! Device-style access points to a queue.
//!
//! A handle carries the caller's open mode (blocking or not) and a
//! stream position, the way an open file description carries its flags
//! and offset. The read surface is record oriented: each handle delivers
//! one fixed-size record and then reports end of stream; opening a new
//! handle reads the next record.

use std::sync::Arc;

use crate::error::{Error, ErrorKind, Result};
use crate::io::{Read, Write};
use crate::queue::ByteQueue;

/// A per-caller access point to a [`ByteQueue`].
///
/// Created through [`crate::OpenOptions`]; creation always succeeds.
#[derive(Debug)]
pub struct Handle<const N: usize> {
    queue: Arc<ByteQueue<N>>,
    nonblocking: bool,
    pos: u64,
}

impl<const N: usize> Handle<N> {
    pub(crate) fn bind(queue: Arc<ByteQueue<N>>, nonblocking: bool) -> Self {
        log::debug!("handle opened, nonblocking={}", nonblocking);
        Self {
            queue,
            nonblocking,
            pos: 0,
        }
    }

    /// Returns true if operations fail with `WouldBlock` instead of
    /// parking.
    pub fn is_nonblocking(&self) -> bool {
        self.nonblocking
    }

    /// Returns the cumulative bytes this handle has delivered.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Delivers one record of up to [`crate::READ_CHUNK`] bytes into
    /// `sink`.
    ///
    /// A handle whose position has already advanced reports end of
    /// stream (`Ok(0)`); open a fresh handle to read the next record.
    /// The record size is fixed by the queue, not by the sink: a sink
    /// without room for the full record fails with
    /// [`ErrorKind::CopyFault`] and the record stays queued, since the
    /// bytes are only consumed once the sink accepted them.
    pub fn read_into<S: Write>(&mut self, sink: &mut S) -> Result<usize> {
        if self.pos > 0 {
            log::trace!("handle stream exhausted at {}", self.pos);
            return Ok(0);
        }

        let count = self.queue.read_record(sink, !self.nonblocking)?;
        self.pos += count as u64;
        Ok(count)
    }

    /// Stages `len` bytes from `source` and writes them to the queue.
    ///
    /// The source is drained before the queue is touched, so a failing
    /// source yields [`ErrorKind::CopyFault`] with no state change.
    /// Returns the number of bytes the queue accepted, which may be less
    /// than `len` once space ran out.
    pub fn write_from<R: Read>(&mut self, source: &mut R, len: usize) -> Result<usize> {
        let mut staged = vec![0u8; len];
        source
            .read_exact(&mut staged)
            .map_err(|_| Error::new(ErrorKind::CopyFault))?;

        if self.nonblocking {
            self.queue.try_write(&staged)
        } else {
            self.queue.write(&staged)
        }
    }
}

impl<const N: usize> std::io::Read for Handle<N> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut sink: &mut [u8] = buf;
        self.read_into(&mut sink).map_err(Into::into)
    }
}

impl<const N: usize> std::io::Write for Handle<N> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let result = if self.nonblocking {
            self.queue.try_write(buf)
        } else {
            self.queue.write(buf)
        };
        result.map_err(Into::into)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        // Writes land in the queue immediately; nothing is buffered here
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpenOptions;

    #[test]
    fn test_record_delivery_and_reopen() {
        let queue = Arc::new(ByteQueue::<16>::new());
        assert_eq!(queue.write(&[1, 2, 3, 4]).unwrap(), 4);
        assert_eq!(queue.len(), 4);

        let mut first = OpenOptions::new().open(&queue);
        let mut out = Vec::new();
        assert_eq!(first.read_into(&mut out).unwrap(), 2);
        assert_eq!(out, vec![1, 2]);
        assert_eq!(queue.len(), 2);

        // The same handle is exhausted after its first record
        assert_eq!(first.read_into(&mut out).unwrap(), 0);
        assert_eq!(out, vec![1, 2]);

        let mut second = OpenOptions::new().open(&queue);
        let mut next = Vec::new();
        assert_eq!(second.read_into(&mut next).unwrap(), 2);
        assert_eq!(next, vec![3, 4]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_short_record_for_odd_remainder() {
        let queue = Arc::new(ByteQueue::<16>::new());
        queue.write(&[10, 20, 30]).unwrap();

        let mut out = Vec::new();
        assert_eq!(OpenOptions::new().open(&queue).read_into(&mut out).unwrap(), 2);
        assert_eq!(OpenOptions::new().open(&queue).read_into(&mut out).unwrap(), 1);
        assert_eq!(out, vec![10, 20, 30]);
    }

    #[test]
    fn test_nonblocking_read_empty() {
        let queue = Arc::new(ByteQueue::<16>::new());
        let mut handle = OpenOptions::new().with_nonblocking(true).open(&queue);

        let mut out = Vec::new();
        let err = handle.read_into(&mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WouldBlock);
        assert_eq!(handle.position(), 0);
    }

    #[test]
    fn test_nonblocking_write_full() {
        let queue = Arc::new(ByteQueue::<16>::new());
        queue.write(&[0u8; 16]).unwrap();

        let mut handle = OpenOptions::new().with_nonblocking(true).open(&queue);
        let err = handle.write_from(&mut &[1u8, 2][..], 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WouldBlock);
        assert_eq!(queue.len(), 16);
    }

    #[test]
    fn test_sink_fault_leaves_record_queued() {
        let queue = Arc::new(ByteQueue::<16>::new());
        queue.write(&[1, 2, 3, 4]).unwrap();

        let mut handle = OpenOptions::new().open(&queue);
        let mut tiny = [0u8; 1];
        let mut sink: &mut [u8] = &mut tiny;
        let err = handle.read_into(&mut sink).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CopyFault);
        assert_eq!(queue.len(), 4);

        // The handle did not advance, so a retry still sees the record
        let mut out = Vec::new();
        assert_eq!(handle.read_into(&mut out).unwrap(), 2);
        assert_eq!(out, vec![1, 2]);
    }

    struct FaultySource;

    impl std::io::Read for FaultySource {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "bad caller memory"))
        }
    }

    #[test]
    fn test_source_fault_leaves_queue_untouched() {
        let queue = Arc::new(ByteQueue::<16>::new());
        let mut handle = OpenOptions::new().open(&queue);

        let err = handle.write_from(&mut FaultySource, 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CopyFault);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_write_from_slice_source() {
        let queue = Arc::new(ByteQueue::<16>::new());
        let mut handle = OpenOptions::new().open(&queue);

        let payload = [5u8, 6, 7, 8];
        assert_eq!(handle.write_from(&mut &payload[..], 4).unwrap(), 4);
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_std_io_surface() {
        let queue = Arc::new(ByteQueue::<16>::new());
        let mut writer = OpenOptions::new().open(&queue);
        assert_eq!(std::io::Write::write(&mut writer, &[1, 2, 3, 4]).unwrap(), 4);

        let mut reader = OpenOptions::new().open(&queue);
        let mut buf = [0u8; 8];
        assert_eq!(std::io::Read::read(&mut reader, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[1, 2]);
        // End of stream once the position advanced
        assert_eq!(std::io::Read::read(&mut reader, &mut buf).unwrap(), 0);
    }
}
