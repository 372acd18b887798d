//! Multi-cycle scheduler scenarios driven by a virtual clock.

use std::future::{Future, ready};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use gale_archive::ArchiveStore;
use gale_client::{PublishRequest, ServiceError};
use gale_core::LeaderboardSnapshot;
use gale_rotation::{
    ChallengeService, Clock, DateSelector, RotationPlan, RotationScheduler, SimulationError,
    SimulationParams, SimulationRunner, StepOutcome, Termination,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

const TABLE: &str = "status,airfoil,mach,reynolds,aoa,coordinates_json,cl,cd
FAIL,naca0012,0.1,1e6,0.0,\"[[0,0],[1,0]]\",,
OK,naca2412,0.2,1e6,2.0,\"[[0,0],[1,0]]\",0.45,0.012
OK,naca4412,0.3,2e6,4.0,\"[[0,0],[1,0]]\",0.8,0.02
";

const NO_OK_TABLE: &str = "status,airfoil,mach,reynolds,aoa,coordinates_json,cl,cd
FAIL,naca0012,0.1,1e6,0.0,\"[[0,0],[1,0]]\",,
";

// ── Fakes ──────────────────────────────────────────────────────────

#[derive(Debug)]
struct ClockState {
    now: DateTime<Utc>,
    sleeps: Vec<Duration>,
}

#[derive(Debug, Clone)]
struct FakeClock {
    state: Arc<Mutex<ClockState>>,
}

impl FakeClock {
    fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ClockState {
                now,
                sleeps: Vec::new(),
            })),
        }
    }

    fn advance(&self, by: Duration) {
        let mut state = self.state.lock().unwrap();
        state.now += chrono::Duration::from_std(by).unwrap();
    }

    fn sleeps(&self) -> Vec<Duration> {
        self.state.lock().unwrap().sleeps.clone()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        self.state.lock().unwrap().now
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        self.state.lock().unwrap().sleeps.push(duration);
        self.advance(duration);
        ready(())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Published {
    date: String,
    case_ids: Vec<u32>,
    reset_submissions: bool,
}

struct FakeService {
    clock: FakeClock,
    publish_work: Duration,
    publish_status: Option<u16>,
    fetch_fails: bool,
    published: Mutex<Vec<Published>>,
    fetches: AtomicU32,
}

impl FakeService {
    fn new(clock: &FakeClock) -> Self {
        Self {
            clock: clock.clone(),
            publish_work: Duration::from_secs(20),
            publish_status: None,
            fetch_fails: false,
            published: Mutex::new(Vec::new()),
            fetches: AtomicU32::new(0),
        }
    }

    fn published(&self) -> Vec<Published> {
        self.published.lock().unwrap().clone()
    }
}

impl ChallengeService for FakeService {
    fn publish(
        &self,
        request: &PublishRequest<'_>,
    ) -> impl Future<Output = Result<Value, ServiceError>> {
        self.clock.advance(self.publish_work);
        self.published.lock().unwrap().push(Published {
            date: request.date.to_string(),
            case_ids: request.cases.iter().map(|c| c.case_id).collect(),
            reset_submissions: request.reset_submissions,
        });
        ready(match self.publish_status {
            Some(status) => Err(ServiceError::Publish {
                status,
                body: json!({"error": "Unauthorized."}),
            }),
            None => Ok(json!({
                "message": "Published benchmark cases.",
                "date": request.date,
                "cases_published": request.cases.len(),
            })),
        })
    }

    fn fetch_leaderboard(
        &self,
        date: &str,
        _limit: u32,
    ) -> impl Future<Output = Result<LeaderboardSnapshot, ServiceError>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        ready(if self.fetch_fails {
            Err(ServiceError::Fetch {
                status: 503,
                body: json!({"raw": "unavailable"}),
            })
        } else {
            Ok(LeaderboardSnapshot::new(json!({
                "date": date,
                "entries": [
                    {"name": "ada", "group_name": "wing", "score": 9.5, "total_error": 0.2, "correct_cases": 2, "created_at": "t1"}
                ]
            })))
        })
    }
}

struct FakeRunner {
    table: Option<&'static str>,
    runs: AtomicU32,
}

impl FakeRunner {
    const fn writing(table: &'static str) -> Self {
        Self {
            table: Some(table),
            runs: AtomicU32::new(0),
        }
    }

    const fn failing() -> Self {
        Self {
            table: None,
            runs: AtomicU32::new(0),
        }
    }

    fn runs(&self) -> u32 {
        self.runs.load(Ordering::SeqCst)
    }
}

impl SimulationRunner for FakeRunner {
    async fn run(&self, params: &SimulationParams) -> Result<PathBuf, SimulationError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        match self.table {
            Some(table) => {
                std::fs::write(&params.output, table).unwrap();
                Ok(params.output.clone())
            }
            None => Err(SimulationError::Failed { code: Some(1) }),
        }
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
}

fn plan(root: &Path, iterations: u64) -> RotationPlan {
    RotationPlan {
        interval: Duration::from_secs(300),
        termination: Termination::from_iterations(iterations),
        date: DateSelector::Utc,
        snapshot_root: root.join("loop_snapshots"),
        leaderboard_limit: 1000,
        reset_submissions: true,
        skip_sim: false,
        simulation: SimulationParams {
            num_cases: 3,
            batch_size: 3,
            seed: None,
            output: root.join("daily_cases.csv"),
        },
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// ── Scenarios ──────────────────────────────────────────────────────

#[tokio::test]
async fn cycles_start_on_a_fixed_cadence() {
    let temp = TempDir::new().unwrap();
    let clock = FakeClock::starting_at(start());
    let service = FakeService::new(&clock);
    let runner = FakeRunner::writing(TABLE);
    let archive = ArchiveStore::new(temp.path().join("data"));
    let plan = plan(temp.path(), 2);

    let summary = RotationScheduler::new(&plan, &service, &runner, &clock, &archive)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.cycles, 2);
    assert_eq!(summary.publish_failures, 0);
    assert_eq!(summary.snapshot_failures, 0);
    // 20 s of publish work, so one 280 s sleep; no sleep after the last cycle.
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(280)]);

    let day = plan.snapshot_root.join("2026-03-01");
    assert!(day.join("20260301_000000").is_dir());
    assert!(day.join("20260301_000500").is_dir());

    let published = service.published();
    assert_eq!(published.len(), 2);
    assert_eq!(
        published[0],
        Published {
            date: "2026-03-01".to_string(),
            case_ids: vec![1, 2],
            reset_submissions: true,
        }
    );
    assert_eq!(runner.runs(), 2);
    assert_eq!(service.fetches.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn cycle_artifacts_are_archived() {
    let temp = TempDir::new().unwrap();
    let clock = FakeClock::starting_at(start());
    let service = FakeService::new(&clock);
    let runner = FakeRunner::writing(TABLE);
    let archive = ArchiveStore::new(temp.path().join("data"));
    let plan = plan(temp.path(), 1);

    let scheduler = RotationScheduler::new(&plan, &service, &runner, &clock, &archive);
    let cycle = scheduler.run_cycle(1).await;

    assert_eq!(cycle.date, "2026-03-01");
    assert_eq!(cycle.dir, plan.snapshot_root.join("2026-03-01/20260301_000000"));

    let pre = cycle.pre_publish.succeeded().unwrap();
    assert_eq!(
        pre.json,
        cycle
            .dir
            .join("pre_publish/2026-03-01/leaderboard_20260301_000000.json")
    );
    let post = cycle.post_publish.succeeded().unwrap();
    assert_eq!(
        post.csv,
        cycle
            .dir
            .join("post_publish/2026-03-01/leaderboard_20260301_000020.csv")
    );
    assert!(post.csv.is_file());

    let outcome = cycle.publish.succeeded().unwrap();
    assert_eq!(outcome.cases_published, 2);
    assert_eq!(outcome.archive_dir, archive.challenge_dir("2026-03-01"));
    assert_eq!(
        read_json(&outcome.archive_dir.join("publish_response.json"))["cases_published"],
        2
    );
    assert_eq!(
        std::fs::read_to_string(outcome.archive_dir.join("daily_cases.csv")).unwrap(),
        TABLE
    );

    let summary = read_json(&cycle.dir.join("cycle.json"));
    assert_eq!(summary["id"], 1);
    assert_eq!(summary["publish"]["status"], "succeeded");
    assert_eq!(summary["post_publish"]["status"], "succeeded");
}

#[tokio::test]
async fn overrunning_cycle_sleeps_one_second() {
    let temp = TempDir::new().unwrap();
    let clock = FakeClock::starting_at(start());
    let mut service = FakeService::new(&clock);
    service.publish_work = Duration::from_secs(400);
    let runner = FakeRunner::writing(TABLE);
    let archive = ArchiveStore::new(temp.path().join("data"));
    let plan = plan(temp.path(), 3);

    RotationScheduler::new(&plan, &service, &runner, &clock, &archive)
        .run()
        .await
        .unwrap();

    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_secs(1), Duration::from_secs(1)]
    );
    assert_eq!(service.published().len(), 3);
}

#[tokio::test]
async fn rejected_publish_does_not_stop_the_loop() {
    let temp = TempDir::new().unwrap();
    let clock = FakeClock::starting_at(start());
    let mut service = FakeService::new(&clock);
    service.publish_status = Some(401);
    let runner = FakeRunner::writing(TABLE);
    let archive = ArchiveStore::new(temp.path().join("data"));
    let plan = plan(temp.path(), 3);

    let summary = RotationScheduler::new(&plan, &service, &runner, &clock, &archive)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.cycles, 3);
    assert_eq!(summary.publish_failures, 3);
    assert_eq!(summary.snapshot_failures, 0);
    assert_eq!(clock.sleeps().len(), 2);
    assert!(!archive.challenge_dir("2026-03-01").exists());
}

#[tokio::test]
async fn rejected_publish_is_recorded_with_status() {
    let temp = TempDir::new().unwrap();
    let clock = FakeClock::starting_at(start());
    let mut service = FakeService::new(&clock);
    service.publish_status = Some(401);
    let runner = FakeRunner::writing(TABLE);
    let archive = ArchiveStore::new(temp.path().join("data"));
    let plan = plan(temp.path(), 1);

    let cycle = RotationScheduler::new(&plan, &service, &runner, &clock, &archive)
        .run_cycle(1)
        .await;

    match &cycle.publish {
        StepOutcome::Failed { error } => assert!(error.contains("401"), "{error}"),
        StepOutcome::Succeeded(_) => panic!("publish should fail"),
    }
    assert!(cycle.post_publish.is_success());
}

#[tokio::test]
async fn snapshot_failures_are_isolated() {
    let temp = TempDir::new().unwrap();
    let clock = FakeClock::starting_at(start());
    let mut service = FakeService::new(&clock);
    service.fetch_fails = true;
    let runner = FakeRunner::writing(TABLE);
    let archive = ArchiveStore::new(temp.path().join("data"));
    let plan = plan(temp.path(), 2);

    let summary = RotationScheduler::new(&plan, &service, &runner, &clock, &archive)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.cycles, 2);
    assert_eq!(summary.snapshot_failures, 4);
    assert_eq!(summary.publish_failures, 0);
    assert_eq!(service.published().len(), 2);
}

#[tokio::test]
async fn simulation_failure_skips_publish_but_not_snapshots() {
    let temp = TempDir::new().unwrap();
    let clock = FakeClock::starting_at(start());
    let service = FakeService::new(&clock);
    let runner = FakeRunner::failing();
    let archive = ArchiveStore::new(temp.path().join("data"));
    let plan = plan(temp.path(), 1);

    let cycle = RotationScheduler::new(&plan, &service, &runner, &clock, &archive)
        .run_cycle(1)
        .await;

    assert!(!cycle.publish.is_success());
    assert!(cycle.pre_publish.is_success());
    assert!(cycle.post_publish.is_success());
    assert!(service.published().is_empty());
}

#[tokio::test]
async fn table_without_ok_rows_is_not_published() {
    let temp = TempDir::new().unwrap();
    let clock = FakeClock::starting_at(start());
    let service = FakeService::new(&clock);
    let runner = FakeRunner::writing(NO_OK_TABLE);
    let archive = ArchiveStore::new(temp.path().join("data"));
    let plan = plan(temp.path(), 1);

    let cycle = RotationScheduler::new(&plan, &service, &runner, &clock, &archive)
        .run_cycle(1)
        .await;

    match &cycle.publish {
        StepOutcome::Failed { error } => {
            assert!(error.contains("no successful cases"), "{error}");
        }
        StepOutcome::Succeeded(_) => panic!("empty table should not publish"),
    }
    assert!(service.published().is_empty());
}

#[tokio::test]
async fn skip_sim_republishes_existing_table() {
    let temp = TempDir::new().unwrap();
    let clock = FakeClock::starting_at(start());
    let service = FakeService::new(&clock);
    let runner = FakeRunner::writing(TABLE);
    let archive = ArchiveStore::new(temp.path().join("data"));
    let mut plan = plan(temp.path(), 1);
    plan.skip_sim = true;
    plan.reset_submissions = false;

    let missing = RotationScheduler::new(&plan, &service, &runner, &clock, &archive)
        .run_cycle(1)
        .await;
    match &missing.publish {
        StepOutcome::Failed { error } => assert!(error.contains("does not exist"), "{error}"),
        StepOutcome::Succeeded(_) => panic!("missing table should fail"),
    }
    assert!(missing.post_publish.is_success());

    std::fs::write(&plan.simulation.output, TABLE).unwrap();
    let cycle = RotationScheduler::new(&plan, &service, &runner, &clock, &archive)
        .run_cycle(2)
        .await;
    assert!(cycle.publish.is_success());
    assert_eq!(runner.runs(), 0);
    assert!(!service.published()[0].reset_submissions);
}

#[tokio::test]
async fn fixed_date_mode_publishes_that_date() {
    let temp = TempDir::new().unwrap();
    let clock = FakeClock::starting_at(start());
    let service = FakeService::new(&clock);
    let runner = FakeRunner::writing(TABLE);
    let archive = ArchiveStore::new(temp.path().join("data"));
    let mut plan = plan(temp.path(), 2);
    plan.date = DateSelector::Fixed("2025-12-24".to_string());

    RotationScheduler::new(&plan, &service, &runner, &clock, &archive)
        .run()
        .await
        .unwrap();

    let dates: Vec<_> = service.published().into_iter().map(|p| p.date).collect();
    assert_eq!(dates, vec!["2025-12-24", "2025-12-24"]);
    assert!(plan.snapshot_root.join("2025-12-24").is_dir());
}

#[tokio::test]
async fn utc_date_rolls_over_between_cycles() {
    let temp = TempDir::new().unwrap();
    let clock = FakeClock::starting_at(Utc.with_ymd_and_hms(2026, 3, 1, 23, 58, 0).unwrap());
    let service = FakeService::new(&clock);
    let runner = FakeRunner::writing(TABLE);
    let archive = ArchiveStore::new(temp.path().join("data"));
    let plan = plan(temp.path(), 2);

    RotationScheduler::new(&plan, &service, &runner, &clock, &archive)
        .run()
        .await
        .unwrap();

    let dates: Vec<_> = service.published().into_iter().map(|p| p.date).collect();
    assert_eq!(dates, vec!["2026-03-01", "2026-03-02"]);
}
