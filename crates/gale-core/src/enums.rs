//! Scheduler stage and date-mode enums.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CycleStage
// ---------------------------------------------------------------------------

/// Stage of one rotation cycle.
///
/// ```text
/// idle → snapshot_pre → run_simulation → load_cases → publish → snapshot_post → sleeping → idle
/// ```
///
/// `run_simulation` is skipped when existing results are reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStage {
    Idle,
    SnapshotPre,
    RunSimulation,
    LoadCases,
    Publish,
    SnapshotPost,
    Sleeping,
}

impl CycleStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SnapshotPre => "snapshot_pre",
            Self::RunSimulation => "run_simulation",
            Self::LoadCases => "load_cases",
            Self::Publish => "publish",
            Self::SnapshotPost => "snapshot_post",
            Self::Sleeping => "sleeping",
        }
    }

    /// Stages reachable from this one.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::SnapshotPre],
            Self::SnapshotPre => &[Self::RunSimulation, Self::LoadCases, Self::SnapshotPost],
            Self::RunSimulation => &[Self::LoadCases, Self::SnapshotPost],
            Self::LoadCases => &[Self::Publish, Self::SnapshotPost],
            Self::Publish => &[Self::SnapshotPost],
            Self::SnapshotPost => &[Self::Sleeping, Self::Idle],
            Self::Sleeping => &[Self::Idle],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DateMode
// ---------------------------------------------------------------------------

/// How each cycle picks its challenge date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateMode {
    /// Current UTC calendar date at cycle start.
    #[default]
    Utc,
    /// A fixed, explicitly configured date.
    Fixed,
}

impl DateMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utc => "utc",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for DateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
