use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("failed to connect to {host}:{port}: {source}")]
    Connection {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("failed to send request: {0}")]
    Send(#[source] io::Error),

    #[error("failed to receive response: {0}")]
    Receive(#[source] io::Error),

    #[error("response is not valid utf-8: {0}")]
    Decode(#[from] FromUtf8Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<url::ParseError> for Error {
    fn from(value: url::ParseError) -> Self {
        Error::InvalidUrl(value.to_string())
    }
}

impl From<httparse::Error> for Error {
    fn from(value: httparse::Error) -> Self {
        Error::MalformedResponse(value.to_string())
    }
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
