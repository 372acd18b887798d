//! Rotation loop configuration.

use std::path::{Path, PathBuf};

use gale_core::DateMode;
use serde::{Deserialize, Serialize};

fn default_interval() -> String {
    String::from("24h")
}

const fn default_reset_submissions() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RotationConfig {
    /// Cycle cadence, e.g. `300`, `45s`, `5m`, `2h`.
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Cycles to run before exiting. `0` runs forever.
    #[serde(default)]
    pub iterations: u64,

    #[serde(default)]
    pub date_mode: DateMode,

    /// Challenge date (`YYYY-MM-DD`) used when `date_mode` is `fixed`.
    #[serde(default)]
    pub fixed_date: String,

    /// Snapshot root. Empty means `<repo_root>/data/loop_snapshots`.
    #[serde(default)]
    pub snapshot_dir: String,

    /// Ask the service to clear existing submissions for the date on publish.
    #[serde(default = "default_reset_submissions")]
    pub reset_submissions: bool,

    /// Republish the existing result table instead of running simulations.
    #[serde(default)]
    pub skip_sim: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            iterations: 0,
            date_mode: DateMode::default(),
            fixed_date: String::new(),
            snapshot_dir: String::new(),
            reset_submissions: default_reset_submissions(),
            skip_sim: false,
        }
    }
}

impl RotationConfig {
    pub fn snapshot_root(&self, data_root: &Path) -> PathBuf {
        if self.snapshot_dir.is_empty() {
            data_root.join("loop_snapshots")
        } else {
            PathBuf::from(&self.snapshot_dir)
        }
    }
}
