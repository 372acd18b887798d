//! Simulate, load, publish, archive.

use std::path::PathBuf;

use gale_archive::ArchiveStore;
use gale_cases::load_cases;
use gale_client::PublishRequest;
use gale_core::CycleStage;
use serde::Serialize;
use serde_json::Value;

use crate::error::RotationError;
use crate::service::ChallengeService;
use crate::simulation::{SimulationParams, SimulationRunner};

/// Logs cycle stage transitions and flags unexpected ones.
#[derive(Debug)]
pub struct StageTracker {
    cycle: Option<u64>,
    current: CycleStage,
}

impl StageTracker {
    /// Tracker for scheduler cycle `cycle`.
    #[must_use]
    pub const fn for_cycle(cycle: u64) -> Self {
        Self {
            cycle: Some(cycle),
            current: CycleStage::Idle,
        }
    }

    /// Tracker for a one-shot run outside the scheduler. Starts past the
    /// pre-publish snapshot.
    #[must_use]
    pub const fn one_shot() -> Self {
        Self {
            cycle: None,
            current: CycleStage::SnapshotPre,
        }
    }

    #[must_use]
    pub const fn current(&self) -> CycleStage {
        self.current
    }

    pub fn enter(&mut self, next: CycleStage) {
        if !self.current.can_transition_to(next) {
            tracing::warn!(from = %self.current, to = %next, "unexpected cycle stage transition");
        }
        tracing::info!(cycle = self.cycle, stage = %next, "entering stage");
        self.current = next;
    }
}

/// Result of a successful publish.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeOutcome {
    pub date: String,
    pub cases_published: usize,
    /// Service acknowledgment, stored as returned.
    pub acknowledgment: Value,
    pub archive_dir: PathBuf,
}

/// One challenge publication: optional simulation, load, publish, archive.
#[derive(Debug)]
pub struct ChallengePipeline<'a, S, R> {
    service: &'a S,
    runner: &'a R,
    archive: &'a ArchiveStore,
    simulation: &'a SimulationParams,
    skip_sim: bool,
    reset_submissions: bool,
}

impl<'a, S, R> ChallengePipeline<'a, S, R>
where
    S: ChallengeService,
    R: SimulationRunner,
{
    pub const fn new(
        service: &'a S,
        runner: &'a R,
        archive: &'a ArchiveStore,
        simulation: &'a SimulationParams,
    ) -> Self {
        Self {
            service,
            runner,
            archive,
            simulation,
            skip_sim: false,
            reset_submissions: false,
        }
    }

    /// Reuse the existing result table instead of running the batch.
    #[must_use]
    pub const fn skip_simulation(mut self, skip: bool) -> Self {
        self.skip_sim = skip;
        self
    }

    /// Ask the service to clear prior submissions for the date.
    #[must_use]
    pub const fn reset_submissions(mut self, reset: bool) -> Self {
        self.reset_submissions = reset;
        self
    }

    /// Publish the challenge for `date`.
    ///
    /// # Errors
    ///
    /// Any simulation, validation, service, or archive failure. Nothing is
    /// retried.
    pub async fn run(
        &self,
        date: &str,
        stages: &mut StageTracker,
    ) -> Result<ChallengeOutcome, RotationError> {
        let table = if self.skip_sim {
            let table = self.simulation.output.clone();
            if !table.is_file() {
                return Err(RotationError::MissingTable(table));
            }
            table
        } else {
            stages.enter(CycleStage::RunSimulation);
            self.runner.run(self.simulation).await?
        };

        stages.enter(CycleStage::LoadCases);
        let cases = load_cases(&table)?;

        stages.enter(CycleStage::Publish);
        let acknowledgment = self
            .service
            .publish(&PublishRequest {
                date,
                cases: &cases,
                reset_submissions: self.reset_submissions,
            })
            .await?;

        let archive_dir = self
            .archive
            .archive_challenge(date, &table, &acknowledgment)?;

        Ok(ChallengeOutcome {
            date: date.to_string(),
            cases_published: cases.len(),
            acknowledgment,
            archive_dir,
        })
    }
}
