//! External simulation batch configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_repo_root() -> String {
    String::from(".")
}

fn default_python() -> String {
    String::from("python3")
}

fn default_driver() -> String {
    String::from("driver.py")
}

const fn default_num_cases() -> u32 {
    10
}

const fn default_batch_size() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Checkout containing the driver script and the `data/` directory.
    #[serde(default = "default_repo_root")]
    pub repo_root: String,

    /// Interpreter used to launch the driver.
    #[serde(default = "default_python")]
    pub python: String,

    /// Driver entry point, relative to `repo_root`.
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Random cases per batch.
    #[serde(default = "default_num_cases")]
    pub num_cases: u32,

    /// Parallel simulations inside the batch. Passed through to the driver.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Optional fixed seed for reproducible batches.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Result table path. Empty means `<repo_root>/data/daily_cases.csv`.
    #[serde(default)]
    pub table: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            repo_root: default_repo_root(),
            python: default_python(),
            driver: default_driver(),
            num_cases: default_num_cases(),
            batch_size: default_batch_size(),
            seed: None,
            table: String::new(),
        }
    }
}

impl SimulationConfig {
    pub fn repo_root(&self) -> PathBuf {
        PathBuf::from(&self.repo_root)
    }

    /// `<repo_root>/data`, the root of every persisted artifact by default.
    pub fn data_root(&self) -> PathBuf {
        self.repo_root().join("data")
    }

    pub fn driver_path(&self) -> PathBuf {
        self.repo_root().join(&self.driver)
    }

    pub fn table_path(&self) -> PathBuf {
        if self.table.is_empty() {
            self.data_root().join("daily_cases.csv")
        } else {
            PathBuf::from(&self.table)
        }
    }
}
