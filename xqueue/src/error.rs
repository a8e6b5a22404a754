//! Error taxonomy for queue operations.

use std::fmt;

/// Category of a queue operation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A non-blocking call found the queue empty (read) or full (write).
    WouldBlock,
    /// A blocking wait was cancelled from another thread.
    Interrupted,
    /// The caller-supplied sink or source failed; queue state is untouched.
    CopyFault,
    /// A source ran out of bytes before the requested count was staged.
    UnexpectedEof,
    /// A sink stopped accepting bytes mid-transfer.
    WriteZero,
    /// Anything else crossing the std interop boundary.
    Other,
}

/// Error returned by queue and handle operations.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Error { kind }
    }

    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::WouldBlock => write!(f, "Operation would block"),
            ErrorKind::Interrupted => write!(f, "Wait interrupted"),
            ErrorKind::CopyFault => write!(f, "Caller sink/source fault"),
            ErrorKind::UnexpectedEof => write!(f, "Unexpected end of source"),
            ErrorKind::WriteZero => write!(f, "Sink accepted zero bytes"),
            ErrorKind::Other => write!(f, "Other error"),
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> std::io::Error {
        let kind = match err.kind {
            ErrorKind::WouldBlock => std::io::ErrorKind::WouldBlock,
            ErrorKind::Interrupted => std::io::ErrorKind::Interrupted,
            ErrorKind::UnexpectedEof => std::io::ErrorKind::UnexpectedEof,
            ErrorKind::WriteZero => std::io::ErrorKind::WriteZero,
            _ => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}

/// Convenience alias for queue operation results.
pub type Result<T> = std::result::Result<T, Error>;
