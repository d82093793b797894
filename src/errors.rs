//! `Error` management module
//!
//! Provides every failure the engine can surface and a `Result` alias
//! used across the crate.

use std::fmt;
use std::io;

/// An enum over all sheetquery specific errors
#[derive(Debug)]
pub enum Error {
    /// An error originating from reading the workbook file
    Io(io::Error),
    /// An error surfaced by the external workbook decoder
    #[cfg(feature = "calamine")]
    Decode(calamine::Error),
    /// File-based construction was requested but no decoding backend is
    /// compiled in
    MissingDependency(&'static str),
    /// A coordinate access beyond the sheet's or the row's bounds
    ///
    /// The position is signed so that a target produced by a negative
    /// offset is representable.
    IndexOutOfRange {
        /// Name of the queried sheet
        sheet: String,
        /// The out-of-bounds (row, column) target
        pos: (i64, i64),
    },
    /// A malformed spreadsheet-style reference
    InvalidReference(String),
    /// An operation was called without enough information to run it
    Configuration(&'static str),
}

/// Result type
pub type Result<T> = ::std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Io(ref err) => write!(f, "{}", err),
            #[cfg(feature = "calamine")]
            Error::Decode(ref err) => write!(f, "{}", err),
            Error::MissingDependency(msg) => write!(f, "missing dependency: {}", msg),
            Error::IndexOutOfRange { ref sheet, pos } => write!(
                f,
                "there is no cell at position {:?} in sheet '{}'",
                pos, sheet
            ),
            Error::InvalidReference(ref r) => write!(f, "invalid reference: '{}'", r),
            Error::Configuration(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            #[cfg(feature = "calamine")]
            Error::Decode(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(feature = "calamine")]
impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Error {
        Error::Decode(err)
    }
}
