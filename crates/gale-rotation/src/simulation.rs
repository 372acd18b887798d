//! External simulation batch.
//!
//! The CFD engine is an opaque batch job that writes a result table. The
//! scheduler only sees it through [`SimulationRunner`].

use std::future::Future;
use std::path::{Path, PathBuf};

use gale_config::SimulationConfig;
use thiserror::Error;

/// Parameters passed through to one simulation batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationParams {
    pub num_cases: u32,
    /// Parallel simulations inside the batch. Not scheduled here.
    pub batch_size: u32,
    pub seed: Option<u64>,
    /// Where the batch writes its result table.
    pub output: PathBuf,
}

impl SimulationParams {
    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            num_cases: config.num_cases,
            batch_size: config.batch_size,
            seed: config.seed,
            output: config.table_path(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("simulation batch exited with {}", code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")))]
    Failed { code: Option<i32> },

    #[error("simulation batch produced no result table at {}", .0.display())]
    MissingOutput(PathBuf),
}

/// Runs one simulation batch and returns the path of its result table.
pub trait SimulationRunner {
    fn run(&self, params: &SimulationParams)
    -> impl Future<Output = Result<PathBuf, SimulationError>>;
}

/// Launches the driver script with the configured interpreter.
///
/// Equivalent to
/// `<python> <repo_root>/<driver> --num-cases N --batch-size B --output-csv <table> [--seed S]`
/// run from `repo_root`.
#[derive(Debug, Clone)]
pub struct DriverRunner {
    python: String,
    driver: PathBuf,
    repo_root: PathBuf,
}

impl DriverRunner {
    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            python: config.python.clone(),
            driver: config.driver_path(),
            repo_root: config.repo_root(),
        }
    }

    #[must_use]
    pub fn driver(&self) -> &Path {
        &self.driver
    }

    fn command(&self, params: &SimulationParams) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.python);
        cmd.arg(&self.driver)
            .arg("--num-cases")
            .arg(params.num_cases.to_string())
            .arg("--batch-size")
            .arg(params.batch_size.to_string())
            .arg("--output-csv")
            .arg(&params.output)
            .current_dir(&self.repo_root);
        if let Some(seed) = params.seed {
            cmd.arg("--seed").arg(seed.to_string());
        }
        cmd
    }
}

impl SimulationRunner for DriverRunner {
    async fn run(&self, params: &SimulationParams) -> Result<PathBuf, SimulationError> {
        tracing::info!(
            driver = %self.driver.display(),
            num_cases = params.num_cases,
            batch_size = params.batch_size,
            "running simulation batch"
        );

        let status = self
            .command(params)
            .status()
            .await
            .map_err(|source| SimulationError::Spawn {
                program: self.python.clone(),
                source,
            })?;
        if !status.success() {
            return Err(SimulationError::Failed {
                code: status.code(),
            });
        }
        if !params.output.is_file() {
            return Err(SimulationError::MissingOutput(params.output.clone()));
        }
        Ok(params.output.clone())
    }
}
