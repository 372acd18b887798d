//! # gale-client
//!
//! HTTP client for the leaderboard service:
//! - `POST /api/admin/publish` with bearer authorization publishes the cases
//!   for a challenge date
//! - `GET /api/leaderboard?date=..&limit=..` reads the ranked leaderboard
//!
//! Calls never retry. A rejected or failed call surfaces as
//! [`ServiceError`] and retry policy is left to the caller.

pub mod leaderboard;
pub mod publish;

mod error;
mod http;
#[cfg(test)]
mod test_support;

pub use error::ServiceError;
pub use publish::PublishRequest;

use std::time::Duration;

/// Default publish timeout.
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(120);

/// Default leaderboard fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client bound to one service base URL.
#[derive(Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    api_base: String,
    admin_token: Option<String>,
    publish_timeout: Duration,
    fetch_timeout: Duration,
}

impl ServiceClient {
    /// Create a client for `api_base` with default timeouts and no token.
    ///
    /// Redirects are never followed: a 3xx reaches the caller as a failure
    /// status.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(api_base: &str) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("gale/0.1")
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("reqwest client should build"),
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            admin_token: None,
            publish_timeout: DEFAULT_PUBLISH_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Set the bearer token used for publish calls.
    #[must_use]
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    #[must_use]
    pub const fn with_timeouts(mut self, publish: Duration, fetch: Duration) -> Self {
        self.publish_timeout = publish;
        self.fetch_timeout = fetch;
        self
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("api_base", &self.api_base)
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<redacted>"))
            .field("publish_timeout", &self.publish_timeout)
            .field("fetch_timeout", &self.fetch_timeout)
            .finish_non_exhaustive()
    }
}
