use std::{
    error::Error as StdError,
    fmt::{self, Display},
    result,
};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Store(db::Error),
    Url(url::ParseError),
    Reqwest(reqwest::Error),
    IoError(std::io::Error),
    /// Malformed input at the edge of the bot, a bad update or bad config
    InvalidArgument(String),
    /// The bot api answered with `ok: false`
    Telegram(String),
    ConstStr(&'static str),
}

impl Error {
    /// True when the store could not complete an operation, as opposed to
    /// being handed bad input.
    pub const fn is_store_unavailable(&self) -> bool {
        matches!(self, Error::Store(db::Error::StoreUnavailable(_)))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Store(inner) => fmt::Display::fmt(&inner, f),
            Error::Url(inner) => fmt::Display::fmt(&inner, f),
            Error::Reqwest(inner) => fmt::Display::fmt(&inner, f),
            Error::IoError(inner) => fmt::Display::fmt(&inner, f),
            Error::InvalidArgument(inner) => write!(f, "invalid argument: {inner}"),
            Error::Telegram(inner) => write!(f, "telegram rejected request: {inner}"),
            Error::ConstStr(inner) => f.write_str(inner),
        }
    }
}

impl StdError for Error {}

impl From<db::Error> for Error {
    fn from(e: db::Error) -> Error {
        Error::Store(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        Error::Url(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Reqwest(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::IoError(e)
    }
}
