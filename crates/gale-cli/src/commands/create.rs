use anyhow::Context;
use chrono::Utc;
use gale_archive::ArchiveStore;
use gale_config::GaleConfig;
use gale_rotation::{ChallengePipeline, DriverRunner, SimulationParams, StageTracker};

use crate::cli::{CreateArgs, GlobalFlags};
use crate::commands::{admin_client, resolve_date};
use crate::output::output;

/// Handle `gale create`.
pub async fn handle(
    args: &CreateArgs,
    config: &GaleConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = admin_client(config)?;
    let date = resolve_date(args.date.as_deref(), Utc::now())?;

    let runner = DriverRunner::from_config(&config.simulation);
    if !args.skip_sim && !runner.driver().is_file() {
        anyhow::bail!(
            "simulation driver not found at {}",
            runner.driver().display()
        );
    }

    let archive = ArchiveStore::new(config.simulation.data_root());
    let params = SimulationParams::from_config(&config.simulation);
    let mut stages = StageTracker::one_shot();

    let outcome = ChallengePipeline::new(&client, &runner, &archive, &params)
        .skip_simulation(args.skip_sim)
        .reset_submissions(args.reset_submissions)
        .run(&date, &mut stages)
        .await
        .with_context(|| format!("failed to create challenge for {date}"))?;

    output(&outcome, flags.format)
}
