use std::error::Error as StdError;
use std::fmt;

use crate::json::JsonKind;

/// Everything that can go wrong between issuing the request and holding a
/// decoded JSON object.
#[derive(Debug)]
pub enum FetchError {
    /// The request could not be completed (DNS, connect, TLS, timeout).
    Transport(reqwest::Error),
    /// The response arrived but its body could not be read to the end.
    Read(reqwest::Error),
    /// The body is not valid JSON.
    Decode(serde_json::Error),
    /// The body is valid JSON but the top-level value is not an object.
    NotAnObject(JsonKind),
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Read(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_) | FetchError::NotAnObject(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(err) => write!(f, "Request failed: {err}"),
            FetchError::Read(err) => write!(f, "Failed to read response: {err}"),
            FetchError::Decode(err) => write!(f, "Invalid JSON: {err}"),
            FetchError::NotAnObject(kind) => write!(f, "Expected a JSON object, found {kind}"),
        }
    }
}

impl StdError for FetchError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            FetchError::Transport(err) | FetchError::Read(err) => Some(err),
            FetchError::Decode(err) => Some(err),
            FetchError::NotAnObject(_) => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err)
    }
}
