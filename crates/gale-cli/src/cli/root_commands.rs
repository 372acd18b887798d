use clap::{Args, Subcommand, ValueEnum};
use gale_config::GaleConfig;
use gale_core::DateMode;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run a simulation batch, publish its cases and archive the result.
    Create(CreateArgs),
    /// Publish an existing result table.
    Publish(PublishArgs),
    /// Save one leaderboard snapshot as JSON and CSV.
    Fetch(FetchArgs),
    /// Rotate the daily challenge on a fixed interval.
    Rotate(RotateArgs),
}

/// Simulation batch settings shared by `create` and `rotate`.
#[derive(Clone, Debug, Default, Args)]
pub struct SimulationArgs {
    /// Random cases per batch
    #[arg(long)]
    pub num_cases: Option<u32>,

    /// Parallel simulations inside the batch
    #[arg(long)]
    pub batch_size: Option<u32>,

    /// Fixed random seed passed to the driver
    #[arg(long)]
    pub seed: Option<u64>,

    /// Result table path (default: <repo-root>/data/daily_cases.csv)
    #[arg(long)]
    pub table: Option<String>,
}

impl SimulationArgs {
    fn apply(&self, config: &mut GaleConfig) {
        if let Some(num_cases) = self.num_cases {
            config.simulation.num_cases = num_cases;
        }
        if let Some(batch_size) = self.batch_size {
            config.simulation.batch_size = batch_size;
        }
        if self.seed.is_some() {
            config.simulation.seed = self.seed;
        }
        if let Some(table) = &self.table {
            config.simulation.table.clone_from(table);
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    /// Challenge date, YYYY-MM-DD (default: today in UTC)
    #[arg(long)]
    pub date: Option<String>,

    #[command(flatten)]
    pub simulation: SimulationArgs,

    /// Publish the existing result table without running the driver
    #[arg(long)]
    pub skip_sim: bool,

    /// Clear existing submissions for the date
    #[arg(long)]
    pub reset_submissions: bool,
}

impl CreateArgs {
    pub fn apply(&self, config: &mut GaleConfig) {
        self.simulation.apply(config);
    }
}

#[derive(Clone, Debug, Args)]
pub struct PublishArgs {
    /// Result table to publish
    #[arg(long, visible_alias = "csv")]
    pub table: String,

    /// Challenge date, YYYY-MM-DD (default: today in UTC)
    #[arg(long)]
    pub date: Option<String>,

    /// Clear existing submissions for the date
    #[arg(long)]
    pub reset_submissions: bool,
}

#[derive(Clone, Debug, Args)]
pub struct FetchArgs {
    /// Leaderboard date, YYYY-MM-DD (default: today in UTC)
    #[arg(long)]
    pub date: Option<String>,

    /// Max leaderboard rows to fetch
    #[arg(long, default_value_t = 500)]
    pub limit: u32,

    /// Output directory (default: <repo-root>/data/leaderboard_snapshots)
    #[arg(long)]
    pub out_dir: Option<String>,
}

/// `--date-mode` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum DateModeArg {
    Utc,
    Fixed,
}

impl From<DateModeArg> for DateMode {
    fn from(value: DateModeArg) -> Self {
        match value {
            DateModeArg::Utc => Self::Utc,
            DateModeArg::Fixed => Self::Fixed,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct RotateArgs {
    /// Cycle interval, e.g. 300, 45s, 5m, 24h
    #[arg(long)]
    pub interval: Option<String>,

    /// Number of cycles to run (0 runs forever)
    #[arg(long)]
    pub iterations: Option<u64>,

    /// How each cycle picks its challenge date
    #[arg(long, value_enum)]
    pub date_mode: Option<DateModeArg>,

    /// Challenge date used with --date-mode fixed
    #[arg(long)]
    pub fixed_date: Option<String>,

    /// Snapshot directory (default: <repo-root>/data/loop_snapshots)
    #[arg(long)]
    pub snapshot_dir: Option<String>,

    #[command(flatten)]
    pub simulation: SimulationArgs,

    /// Republish the existing result table every cycle
    #[arg(long)]
    pub skip_sim: bool,

    /// Keep existing submissions when publishing
    #[arg(long)]
    pub no_reset_submissions: bool,
}

impl RotateArgs {
    pub fn apply(&self, config: &mut GaleConfig) {
        self.simulation.apply(config);

        let rotation = &mut config.rotation;
        if let Some(interval) = &self.interval {
            rotation.interval.clone_from(interval);
        }
        if let Some(iterations) = self.iterations {
            rotation.iterations = iterations;
        }
        if let Some(mode) = self.date_mode {
            rotation.date_mode = mode.into();
        }
        if let Some(date) = &self.fixed_date {
            rotation.fixed_date.clone_from(date);
        }
        if let Some(dir) = &self.snapshot_dir {
            rotation.snapshot_dir.clone_from(dir);
        }
        if self.skip_sim {
            rotation.skip_sim = true;
        }
        if self.no_reset_submissions {
            rotation.reset_submissions = false;
        }
    }
}
