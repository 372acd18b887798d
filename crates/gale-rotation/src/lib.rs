//! # gale-rotation
//!
//! The rotation pipeline. Each cycle:
//!
//! 1. snapshots the current leaderboard (`pre_publish`),
//! 2. runs the external simulation batch, or reuses the existing table,
//! 3. loads and publishes the cases, archiving the table and acknowledgment,
//! 4. snapshots the leaderboard again (`post_publish`),
//! 5. sleeps for the drift-corrected remainder of the interval.
//!
//! Snapshot and publish failures are recorded as [`StepOutcome::Failed`] and
//! never end the loop. Only [`RotationPlan::from_config`] errors are fatal,
//! and they surface before the first cycle.
//!
//! Remote calls, simulation and time are reached through the
//! [`ChallengeService`], [`SimulationRunner`] and [`Clock`] traits so the
//! loop can be driven deterministically in tests.

mod challenge;
mod clock;
mod error;
mod plan;
mod scheduler;
mod service;
mod simulation;
mod snapshot;

pub use challenge::{ChallengeOutcome, ChallengePipeline, StageTracker};
pub use clock::{Clock, SystemClock};
pub use error::RotationError;
pub use plan::{DateSelector, RotationPlan, Termination, next_sleep};
pub use scheduler::{Cycle, RotationScheduler, RotationSummary, StepOutcome};
pub use service::ChallengeService;
pub use simulation::{DriverRunner, SimulationError, SimulationParams, SimulationRunner};
pub use snapshot::Snapshotter;

/// Label of the snapshot taken before publishing.
pub const PRE_PUBLISH: &str = "pre_publish";

/// Label of the snapshot taken after publishing.
pub const POST_PUBLISH: &str = "post_publish";
