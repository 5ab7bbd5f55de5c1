use std::{
    error::Error as StdError,
    fmt::{self, Display},
    result,
};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Malformed input to a store operation, nothing was read or written
    InvalidArgument(String),
    /// The underlying sqlite database failed the operation
    StoreUnavailable(rusqlite::Error),
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Error {
        Error::InvalidArgument(reason.into())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(inner) => write!(f, "invalid argument: {inner}"),
            Error::StoreUnavailable(inner) => write!(f, "store unavailable: {inner}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::StoreUnavailable(inner) => Some(inner),
            Error::InvalidArgument(_) => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Error {
        Error::StoreUnavailable(e)
    }
}
