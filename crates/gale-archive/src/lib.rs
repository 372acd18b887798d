//! # gale-archive
//!
//! Persists pipeline artifacts into a dated directory tree:
//!
//! ```text
//! <data_root>/daily_challenges/<date>/daily_cases.csv
//! <data_root>/daily_challenges/<date>/publish_response.json
//! <snapshot_dir>/<reported date>/leaderboard_<stamp>.{json,csv}
//! ```
//!
//! Writes are overwrites: archiving the same date twice replaces the earlier
//! artifacts. Nothing is ever deleted.

mod error;
pub mod snapshot;

pub use error::ArchiveError;
pub use snapshot::{SnapshotFiles, write_snapshot};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Archived copy of the source table.
pub const TABLE_FILE: &str = "daily_cases.csv";

/// Archived publish acknowledgment.
pub const RESPONSE_FILE: &str = "publish_response.json";

/// Dated archive of published challenges.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    root: PathBuf,
}

impl ArchiveStore {
    /// Create a store rooted at `root` (typically `<repo_root>/data`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the artifacts of the challenge published for `date`.
    #[must_use]
    pub fn challenge_dir(&self, date: &str) -> PathBuf {
        self.root.join("daily_challenges").join(date)
    }

    /// Copy the source `table` and write the publish acknowledgment for `date`.
    ///
    /// Returns the challenge directory.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError`] if the directory cannot be created or either
    /// artifact cannot be written.
    pub fn archive_challenge<T: Serialize>(
        &self,
        date: &str,
        table: &Path,
        ack: &T,
    ) -> Result<PathBuf, ArchiveError> {
        let dir = self.challenge_dir(date);
        ensure_dir(&dir)?;

        let archived_table = dir.join(TABLE_FILE);
        fs::copy(table, &archived_table).map_err(|e| ArchiveError::io(table, e))?;
        write_json(&dir.join(RESPONSE_FILE), ack)?;

        tracing::info!(date, dir = %dir.display(), "archived challenge");
        Ok(dir)
    }
}

/// Create `dir` and all of its parents.
///
/// # Errors
///
/// Returns [`ArchiveError::Io`] if creation fails.
pub fn ensure_dir(dir: &Path) -> Result<(), ArchiveError> {
    fs::create_dir_all(dir).map_err(|e| ArchiveError::io(dir, e))
}

/// Write `value` as pretty-printed JSON, replacing any existing file.
///
/// # Errors
///
/// Returns [`ArchiveError`] on serialization or write failure.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ArchiveError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let rendered = serde_json::to_string_pretty(value)?;
    fs::write(path, rendered).map_err(|e| ArchiveError::io(path, e))
}
