use std::path::Path;

use chrono::{DateTime, Utc};
use gale_archive::{SnapshotFiles, write_snapshot};

use crate::error::RotationError;
use crate::service::ChallengeService;

/// Fetches the leaderboard for a date and persists it as JSON and CSV.
#[derive(Debug)]
pub struct Snapshotter<'a, S> {
    service: &'a S,
    limit: u32,
}

impl<'a, S: ChallengeService> Snapshotter<'a, S> {
    pub const fn new(service: &'a S, limit: u32) -> Self {
        Self { service, limit }
    }

    /// Fetch the leaderboard for `date` and write it under `out_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::Service`] if the fetch fails and
    /// [`RotationError::Archive`] if either file cannot be written.
    pub async fn capture(
        &self,
        date: &str,
        out_dir: &Path,
        taken_at: DateTime<Utc>,
    ) -> Result<SnapshotFiles, RotationError> {
        let snapshot = self.service.fetch_leaderboard(date, self.limit).await?;
        let files = write_snapshot(out_dir, &snapshot, taken_at)?;
        tracing::debug!(
            date,
            reported = snapshot.date_key(),
            entries = snapshot.entries().len(),
            "captured leaderboard"
        );
        Ok(files)
    }
}
