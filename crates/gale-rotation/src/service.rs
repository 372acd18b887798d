use std::future::Future;

use gale_client::{PublishRequest, ServiceClient, ServiceError};
use gale_core::LeaderboardSnapshot;
use serde_json::Value;

/// The two remote operations the rotation pipeline needs.
pub trait ChallengeService {
    /// Publish cases for a date, returning the service acknowledgment.
    fn publish(
        &self,
        request: &PublishRequest<'_>,
    ) -> impl Future<Output = Result<Value, ServiceError>>;

    /// Read up to `limit` ranked leaderboard entries for `date`.
    fn fetch_leaderboard(
        &self,
        date: &str,
        limit: u32,
    ) -> impl Future<Output = Result<LeaderboardSnapshot, ServiceError>>;
}

impl ChallengeService for ServiceClient {
    fn publish(
        &self,
        request: &PublishRequest<'_>,
    ) -> impl Future<Output = Result<Value, ServiceError>> {
        Self::publish(self, request)
    }

    fn fetch_leaderboard(
        &self,
        date: &str,
        limit: u32,
    ) -> impl Future<Output = Result<LeaderboardSnapshot, ServiceError>> {
        Self::fetch_leaderboard(self, date, limit)
    }
}
