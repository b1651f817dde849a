use std::error;
use std::fmt;
use std::result;

/// Status of a failed container operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The arguments violate the container's contract, e.g. a zero-sized element type.
    InvalidArgument,
    /// Storage for a new node could not be allocated.
    AllocFailed,
    /// An element comparing equal to the inserted one already exists.
    DuplicateKey,
    /// No element compares equal to the requested key.
    KeyNotFound,
    /// An internal invariant was violated.
    Unknown,
}

impl Error {
    fn as_str(&self) -> &'static str {
        match self {
            Error::InvalidArgument => "invalid argument",
            Error::AllocFailed => "allocation failed",
            Error::DuplicateKey => "duplicate key",
            Error::KeyNotFound => "key not found",
            Error::Unknown => "unknown error",
        }
    }
}

impl error::Error for Error {
    fn description(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub type Result<T> = result::Result<T, Error>;
