//! Service error types.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the leaderboard service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP transport error, including timeouts and connection failures.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The publish endpoint answered with a status of 300 or above.
    #[error("publish failed ({status}): {body}")]
    Publish {
        /// HTTP status code returned by the service.
        status: u16,
        /// Parsed JSON body, or `{"raw": <text>}` when it was not JSON.
        body: Value,
    },

    /// The leaderboard endpoint answered with a status of 300 or above.
    #[error("failed to fetch leaderboard ({status}): {body}")]
    Fetch {
        /// HTTP status code returned by the service.
        status: u16,
        /// Parsed JSON body, or `{"raw": <text>}` when it was not JSON.
        body: Value,
    },

    /// A publish was attempted without an admin token.
    #[error("missing admin token for publish")]
    MissingToken,
}

impl ServiceError {
    /// HTTP status carried by a rejected request, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Publish { status, .. } | Self::Fetch { status, .. } => Some(*status),
            Self::Http(_) | Self::MissingToken => None,
        }
    }
}
