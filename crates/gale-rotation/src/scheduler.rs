//! The rotation loop.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use gale_archive::{ArchiveStore, SnapshotFiles, ensure_dir, write_json};
use gale_core::CycleStage;
use serde::Serialize;
use tracing::Instrument;

use crate::challenge::{ChallengeOutcome, ChallengePipeline, StageTracker};
use crate::clock::Clock;
use crate::error::RotationError;
use crate::plan::{RotationPlan, next_sleep};
use crate::service::ChallengeService;
use crate::simulation::SimulationRunner;
use crate::snapshot::Snapshotter;
use crate::{POST_PUBLISH, PRE_PUBLISH};

/// Summary file written into each cycle directory.
pub const CYCLE_FILE: &str = "cycle.json";

/// Outcome of one best-effort step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome<T> {
    Succeeded(T),
    Failed { error: String },
}

impl<T> StepOutcome<T> {
    fn from_result(result: Result<T, RotationError>) -> Self {
        match result {
            Ok(value) => Self::Succeeded(value),
            Err(error) => Self::Failed {
                error: error.to_string(),
            },
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    #[must_use]
    pub const fn succeeded(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }
}

/// One completed iteration of the loop.
#[derive(Debug, Clone, Serialize)]
pub struct Cycle {
    pub id: u64,
    pub date: String,
    pub started_at: DateTime<Utc>,
    pub dir: PathBuf,
    pub pre_publish: StepOutcome<SnapshotFiles>,
    pub publish: StepOutcome<ChallengeOutcome>,
    pub post_publish: StepOutcome<SnapshotFiles>,
}

/// Totals reported when a bounded loop finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RotationSummary {
    pub cycles: u64,
    pub publish_failures: u64,
    pub snapshot_failures: u64,
}

/// Runs cycles one after another on a drift-corrected cadence.
pub struct RotationScheduler<'a, S, R, C> {
    plan: &'a RotationPlan,
    service: &'a S,
    runner: &'a R,
    clock: &'a C,
    archive: &'a ArchiveStore,
}

impl<'a, S, R, C> RotationScheduler<'a, S, R, C>
where
    S: ChallengeService,
    R: SimulationRunner,
    C: Clock,
{
    pub const fn new(
        plan: &'a RotationPlan,
        service: &'a S,
        runner: &'a R,
        clock: &'a C,
        archive: &'a ArchiveStore,
    ) -> Self {
        Self {
            plan,
            service,
            runner,
            clock,
            archive,
        }
    }

    /// Run until the plan's termination condition is met (or forever).
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::Archive`] only if the snapshot root cannot be
    /// created before the first cycle. Per-cycle failures are logged and
    /// recorded, never returned.
    pub async fn run(&self) -> Result<RotationSummary, RotationError> {
        ensure_dir(&self.plan.snapshot_root)?;
        tracing::info!(
            interval_secs = self.plan.interval.as_secs(),
            termination = ?self.plan.termination,
            snapshot_root = %self.plan.snapshot_root.display(),
            "starting rotation loop"
        );

        let mut summary = RotationSummary::default();
        loop {
            let id = summary.cycles + 1;
            let cycle = self.run_cycle(id).await;

            summary.cycles += 1;
            if !cycle.publish.is_success() {
                summary.publish_failures += 1;
            }
            summary.snapshot_failures += u64::from(!cycle.pre_publish.is_success())
                + u64::from(!cycle.post_publish.is_success());

            if self.plan.termination.is_done(summary.cycles) {
                tracing::info!(cycles = summary.cycles, "completed all cycles, exiting");
                return Ok(summary);
            }

            let elapsed = (self.clock.now() - cycle.started_at)
                .to_std()
                .unwrap_or_default();
            let sleep = next_sleep(self.plan.interval, elapsed);
            tracing::info!(
                cycle = id,
                stage = %CycleStage::Sleeping,
                elapsed_secs = elapsed.as_secs(),
                sleep_secs = sleep.as_secs(),
                "sleeping before next cycle"
            );
            self.clock.sleep(sleep).await;
        }
    }

    /// Run one cycle. Never fails: every step's outcome is recorded.
    pub async fn run_cycle(&self, id: u64) -> Cycle {
        let started_at = self.clock.now();
        let date = self.plan.date.date_for(started_at);
        let span = tracing::info_span!("cycle", id, date = %date);
        self.cycle_steps(id, date, started_at).instrument(span).await
    }

    async fn cycle_steps(&self, id: u64, date: String, started_at: DateTime<Utc>) -> Cycle {
        let dir = self
            .plan
            .snapshot_root
            .join(&date)
            .join(gale_core::stamp(started_at));
        tracing::info!(dir = %dir.display(), "cycle started");

        let mut stages = StageTracker::for_cycle(id);

        stages.enter(CycleStage::SnapshotPre);
        let pre_publish = self.try_snapshot(&date, &dir, PRE_PUBLISH).await;

        let pipeline = ChallengePipeline::new(
            self.service,
            self.runner,
            self.archive,
            &self.plan.simulation,
        )
        .skip_simulation(self.plan.skip_sim)
        .reset_submissions(self.plan.reset_submissions);
        let publish = StepOutcome::from_result(pipeline.run(&date, &mut stages).await);
        match &publish {
            StepOutcome::Succeeded(outcome) => tracing::info!(
                cases = outcome.cases_published,
                archive = %outcome.archive_dir.display(),
                "publish succeeded"
            ),
            StepOutcome::Failed { error } => tracing::error!(%error, "publish failed"),
        }

        stages.enter(CycleStage::SnapshotPost);
        let post_publish = self.try_snapshot(&date, &dir, POST_PUBLISH).await;

        let cycle = Cycle {
            id,
            date,
            started_at,
            dir,
            pre_publish,
            publish,
            post_publish,
        };
        if let Err(error) = write_json(&cycle.dir.join(CYCLE_FILE), &cycle) {
            tracing::warn!(%error, "failed to write cycle summary");
        }
        cycle
    }

    async fn try_snapshot(
        &self,
        date: &str,
        cycle_dir: &Path,
        label: &str,
    ) -> StepOutcome<SnapshotFiles> {
        let snapshotter = Snapshotter::new(self.service, self.plan.leaderboard_limit);
        let result = snapshotter
            .capture(date, &cycle_dir.join(label), self.clock.now())
            .await;
        match &result {
            Ok(files) => tracing::info!(
                label,
                json = %files.json.display(),
                csv = %files.csv.display(),
                "snapshot saved"
            ),
            Err(error) => tracing::warn!(label, %error, "snapshot failed"),
        }
        StepOutcome::from_result(result)
    }
}
