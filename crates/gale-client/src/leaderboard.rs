//! Leaderboard read endpoint.

use gale_core::LeaderboardSnapshot;
use serde_json::Value;

use crate::http::{is_failure, read_response};
use crate::{ServiceClient, ServiceError};

impl ServiceClient {
    /// Fetch up to `limit` ranked entries for `date`.
    ///
    /// Non-JSON bodies degrade to `{"raw": <text>}` instead of failing.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Http`] on transport failure or timeout.
    /// - [`ServiceError::Fetch`] with status and body for any status of 300
    ///   or above.
    pub async fn fetch_leaderboard(
        &self,
        date: &str,
        limit: u32,
    ) -> Result<LeaderboardSnapshot, ServiceError> {
        let url = self.leaderboard_url(date, limit);
        tracing::debug!(%url, "fetching leaderboard");

        let resp = self
            .http
            .get(&url)
            .timeout(self.fetch_timeout)
            .send()
            .await?;
        let (status, body) = read_response(resp).await?;
        interpret_fetch(status, body)
    }

    fn leaderboard_url(&self, date: &str, limit: u32) -> String {
        format!(
            "{}?date={}&limit={limit}",
            self.endpoint("/api/leaderboard"),
            urlencoding::encode(date)
        )
    }
}

fn interpret_fetch(status: u16, body: Value) -> Result<LeaderboardSnapshot, ServiceError> {
    if is_failure(status) {
        return Err(ServiceError::Fetch { status, body });
    }
    Ok(LeaderboardSnapshot::new(body))
}
