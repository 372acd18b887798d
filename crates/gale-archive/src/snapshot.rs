//! Leaderboard snapshot persistence.
//!
//! A snapshot is written twice: the full response as pretty JSON, and a
//! ranked table with a fixed column order. Files land under the date the
//! service reported, not the date that was requested.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use gale_core::{LeaderboardEntry, LeaderboardSnapshot};
use serde::Serialize;
use serde_json::Number;

use crate::{ArchiveError, ensure_dir, write_json};

/// Column order of the snapshot table.
pub const SNAPSHOT_COLUMNS: [&str; 7] = [
    "rank",
    "name",
    "group",
    "score",
    "total_error",
    "correct_cases",
    "created_at",
];

/// Paths written for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotFiles {
    pub json: PathBuf,
    pub csv: PathBuf,
}

/// Persist `snapshot` under `<out_dir>/<reported date>/leaderboard_<stamp>.*`.
///
/// A reported date that is not a plain directory name is filed under
/// `unknown-date`, so the files always stay inside `out_dir`.
///
/// `taken_at` provides the filename stamp so repeated snapshots on the same
/// day do not collide.
///
/// # Errors
///
/// Returns [`ArchiveError`] if the directory or either file cannot be written.
pub fn write_snapshot(
    out_dir: &Path,
    snapshot: &LeaderboardSnapshot,
    taken_at: DateTime<Utc>,
) -> Result<SnapshotFiles, ArchiveError> {
    let target = out_dir.join(snapshot.date_key());
    ensure_dir(&target)?;

    let stamp = gale_core::stamp(taken_at);
    let files = SnapshotFiles {
        json: target.join(format!("leaderboard_{stamp}.json")),
        csv: target.join(format!("leaderboard_{stamp}.csv")),
    };

    write_json(&files.json, snapshot.body())?;
    write_table(&files.csv, &snapshot.entries())?;
    Ok(files)
}

fn write_table(path: &Path, entries: &[LeaderboardEntry]) -> Result<(), ArchiveError> {
    let csv_err = |source| ArchiveError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(SNAPSHOT_COLUMNS).map_err(csv_err)?;
    for entry in entries {
        writer.write_record(row(entry)).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| ArchiveError::io(path, e))
}

fn row(entry: &LeaderboardEntry) -> [String; 7] {
    let number = |value: Option<&Number>| value.map(Number::to_string).unwrap_or_default();
    [
        entry.rank.to_string(),
        entry.name.clone(),
        entry.group_name.clone(),
        number(entry.score.as_ref()),
        number(entry.total_error.as_ref()),
        number(entry.correct_cases.as_ref()),
        entry.created_at.clone(),
    ]
}
