//! Read-only projections of remote leaderboard state.

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Directory key used when a leaderboard response carries no `date`.
pub const UNKNOWN_DATE: &str = "unknown-date";

/// One ranked leaderboard row.
///
/// `rank` is derived from the entry's 1-based position in the response; the
/// service already orders entries by score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub group_name: String,
    /// Numeric fields keep the number as the service sent it.
    pub score: Option<Number>,
    pub total_error: Option<Number>,
    pub correct_cases: Option<Number>,
    pub created_at: String,
}

impl LeaderboardEntry {
    /// Project one raw response entry. Missing or mistyped fields become
    /// empty values rather than errors.
    #[must_use]
    pub fn from_value(rank: usize, value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let number = |key: &str| match value.get(key) {
            Some(Value::Number(n)) => Some(n.clone()),
            _ => None,
        };

        Self {
            rank,
            name: text("name"),
            group_name: text("group_name"),
            score: number("score"),
            total_error: number("total_error"),
            correct_cases: number("correct_cases"),
            created_at: text("created_at"),
        }
    }
}

/// A leaderboard response as returned by the service.
///
/// The body is kept verbatim so it can be persisted without reinterpretation;
/// [`entries`](Self::entries) gives the ranked projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct LeaderboardSnapshot {
    body: Value,
}

impl LeaderboardSnapshot {
    #[must_use]
    pub const fn new(body: Value) -> Self {
        Self { body }
    }

    /// The full response body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Date reported by the service, which may differ from the requested one.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.body.get("date").and_then(Value::as_str)
    }

    /// Directory key for this snapshot: the reported date, or [`UNKNOWN_DATE`]
    /// when it is absent or not a single plain path component.
    #[must_use]
    pub fn date_key(&self) -> &str {
        self.date()
            .filter(|date| is_single_component(date))
            .unwrap_or(UNKNOWN_DATE)
    }

    /// Entries in response order, ranked from 1.
    #[must_use]
    pub fn entries(&self) -> Vec<LeaderboardEntry> {
        self.body
            .get("entries")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .enumerate()
                    .map(|(idx, row)| LeaderboardEntry::from_value(idx + 1, row))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn is_single_component(key: &str) -> bool {
    let mut components = Path::new(key).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
