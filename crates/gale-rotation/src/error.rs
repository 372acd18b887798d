//! Rotation error types.

use std::path::PathBuf;

use gale_archive::ArchiveError;
use gale_cases::CaseError;
use gale_client::ServiceError;
use gale_config::ConfigError;
use thiserror::Error;

use crate::simulation::SimulationError;

/// Every failure the rotation pipeline can produce.
///
/// Inside the scheduler these are caught per step; only [`Self::Config`]
/// and a failure to create the snapshot root abort the loop.
#[derive(Debug, Error)]
pub enum RotationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Cases(#[from] CaseError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Simulation was skipped but there is no table to republish.
    #[error("simulation skipped but result table does not exist: {}", .0.display())]
    MissingTable(PathBuf),
}
