//! Page retrieval error types

use thiserror::Error;

/// Failure to retrieve the markup of one page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP client could not be built: {reason}")]
    ClientSetup { reason: String },

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP error {status}: {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Empty response from {url}")]
    EmptyBody { url: String },

    #[error("Browser failed on {url}: {reason}")]
    Browser { url: String, reason: String },
}

impl FetchError {
    pub fn from_reqwest(url: &str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                reason: error.to_string(),
            }
        }
    }

    pub fn browser(url: &str, reason: impl ToString) -> Self {
        Self::Browser {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
