//! Fetch errors
//!
//! Per-source failures (`Timeout`, `Status`, `Redirect`, `Transport`) are
//! recoverable: the resolver moves on to the next source. `Exhausted` is
//! what callers see once every source has failed.

use std::time::Duration;
use thiserror::Error;

/// Errors produced while fetching an artifact
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source did not answer within its timeout
    #[error("request to {url} timed out after {}ms", timeout.as_millis())]
    Timeout { url: String, timeout: Duration },

    /// The source answered with a non-2xx status
    #[error("request to {url} failed with HTTP {status}")]
    Status { url: String, status: u16 },

    /// Redirect chain was too long or unusable
    #[error("redirect error for {url}: {message}")]
    Redirect { url: String, message: String },

    /// Connection or protocol failure
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Every configured source failed
    #[error("all {attempted} source(s) failed for '{resource}': {last_error}")]
    Exhausted {
        resource: String,
        attempted: usize,
        last_error: Box<FetchError>,
    },

    /// `--source` named a source that is not configured
    #[error("unknown source '{name}' (available: {available})")]
    UnknownSource { name: String, available: String },

    /// No sources are configured
    #[error("no sources configured")]
    NoSources,

    /// A source definition could not be turned into a usable endpoint
    #[error("invalid source '{name}': {reason}")]
    InvalidSource { name: String, reason: String },

    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// Classify a reqwest error for the given URL
    pub(crate) fn from_reqwest(url: &str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else if err.is_redirect() {
            FetchError::Redirect {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Whether this is a timeout, directly or as the last error of an exhausted fetch
    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Timeout { .. } => true,
            FetchError::Exhausted { last_error, .. } => last_error.is_timeout(),
            _ => false,
        }
    }

    /// HTTP status of the failure, if it was a status failure
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Exhausted { last_error, .. } => last_error.status(),
            _ => None,
        }
    }
}
