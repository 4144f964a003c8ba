//! Error types for FcProxy.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Message returned to callers in place of encode failures.
pub const GENERIC_FAILURE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed inbound payload or invalid base64 body
    #[error("Decode error: {0}")]
    Decode(String),

    /// Method/target/headers could not form a valid request
    #[error("Build error: {0}")]
    Build(String),

    /// Network, timeout, DNS or TLS failure contacting the origin
    #[error("Transport error: {0}")]
    Transport(String),

    /// Failure consuming the origin response body
    #[error("Read error: {0}")]
    Read(String),

    /// Failure serializing the outbound payload
    #[error("Encode error: {0}")]
    Encode(String),
}

impl Error {
    /// HTTP status reported to the caller for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Decode(_) | Error::Build(_) => 400,
            Error::Transport(_) | Error::Read(_) | Error::Encode(_) => 500,
        }
    }

    /// Text surfaced to the caller. Encode failures are masked.
    pub fn caller_message(&self) -> String {
        match self {
            Error::Encode(_) => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Decode(format!("invalid base64 body: {}", err))
    }
}
