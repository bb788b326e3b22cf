use std::{fmt, io};

use reqwest::StatusCode;

/// Why a metadata lookup, link resolution or file download did not produce a
/// result.
///
/// Every core operation reports failure through this type; callers decide how
/// to present it. Nothing is retried.
#[derive(Debug)]
pub enum FetchError {
    /// Connection, timeout or body read failure.
    Transport(Box<dyn std::error::Error + Send + Sync>),
    /// The server answered with a non-success status.
    Status(StatusCode),
    /// None of the decoding strategies produced JSON.
    Decode,
    /// The JSON was readable but the expected key is missing or has the wrong type.
    Shape(&'static str),
    /// Creating or writing a local file failed.
    Io(io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "request failed: {}", e),
            FetchError::Status(status) => write!(f, "server returned {}", status),
            FetchError::Decode => write!(f, "response body could not be decoded as JSON"),
            FetchError::Shape(key) => write!(f, "unexpected response format: missing `{}`", key),
            FetchError::Io(e) => write!(f, "file error: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(e) => Some(e.as_ref()),
            FetchError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Status(status),
            None => FetchError::Transport(Box::new(err)),
        }
    }
}

impl From<io::Error> for FetchError {
    fn from(err: io::Error) -> Self {
        FetchError::Io(err)
    }
}
