//! Byte sink/source traits at the caller boundary.
//!
//! The queue never talks to caller memory directly; handles transfer
//! bytes through these traits. Blanket implementations cover every
//! `std::io` reader and writer, so slices, `Vec<u8>`, files and sockets
//! all plug in as sinks and sources.

use crate::error::{Error, ErrorKind, Result};

/// A source of bytes supplied by the caller of a write operation.
pub trait Read {
    /// Pulls bytes into `buf`, returning how many were read.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Pulls exactly `buf.len()` bytes or fails with `UnexpectedEof`.
    fn read_exact(&mut self, mut buf: &mut [u8]) -> Result<()> {
        while !buf.is_empty() {
            match self.read(buf) {
                Ok(0) => break,
                Ok(n) => {
                    let tmp = buf;
                    buf = &mut tmp[n..];
                }
                Err(e) => return Err(e),
            }
        }
        if !buf.is_empty() {
            Err(Error::new(ErrorKind::UnexpectedEof))
        } else {
            Ok(())
        }
    }
}

/// A sink for bytes supplied by the caller of a read operation.
pub trait Write {
    /// Pushes bytes from `buf`, returning how many were accepted.
    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Flushes any buffered bytes through to the destination.
    fn flush(&mut self) -> Result<()>;

    /// Pushes all of `buf` or fails with `WriteZero`.
    fn write_all(&mut self, mut buf: &[u8]) -> Result<()> {
        while !buf.is_empty() {
            match self.write(buf) {
                Ok(0) => {
                    return Err(Error::new(ErrorKind::WriteZero));
                }
                Ok(n) => buf = &buf[n..],
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

fn map_io_kind(kind: std::io::ErrorKind) -> ErrorKind {
    match kind {
        std::io::ErrorKind::WouldBlock => ErrorKind::WouldBlock,
        std::io::ErrorKind::Interrupted => ErrorKind::Interrupted,
        std::io::ErrorKind::UnexpectedEof => ErrorKind::UnexpectedEof,
        std::io::ErrorKind::WriteZero => ErrorKind::WriteZero,
        _ => ErrorKind::Other,
    }
}

// Blanket implementations for std types that implement std::io::{Read, Write}
impl<T: std::io::Read> Read for T {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        std::io::Read::read(self, buf).map_err(|e| Error::new(map_io_kind(e.kind())))
    }
}

impl<T: std::io::Write> Write for T {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        std::io::Write::write(self, buf).map_err(|e| Error::new(map_io_kind(e.kind())))
    }

    fn flush(&mut self) -> Result<()> {
        std::io::Write::flush(self).map_err(|e| Error::new(map_io_kind(e.kind())))
    }
}
