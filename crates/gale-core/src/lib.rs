//! # gale-core
//!
//! Core types shared across all Gale crates:
//! - [`Case`], one validated simulation result eligible for publication
//! - [`LeaderboardEntry`] and [`LeaderboardSnapshot`], read-only projections
//!   of remote leaderboard state
//! - Cycle stage and date-mode enums used by the rotation scheduler
//! - Date formatting helpers

pub mod case;
pub mod enums;
pub mod leaderboard;

pub use case::Case;
pub use enums::{CycleStage, DateMode};
pub use leaderboard::{LeaderboardEntry, LeaderboardSnapshot};

use chrono::{DateTime, NaiveDate, Utc};

/// Challenge date format used on the wire and in directory names.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format used for cycle directories and snapshot filenames.
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Format a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// UTC calendar date of `at`, formatted as `YYYY-MM-DD`.
#[must_use]
pub fn utc_date(at: DateTime<Utc>) -> String {
    format_date(at.date_naive())
}

/// Second-resolution stamp of `at`, e.g. `20260301_120000`.
#[must_use]
pub fn stamp(at: DateTime<Utc>) -> String {
    at.format(STAMP_FORMAT).to_string()
}
