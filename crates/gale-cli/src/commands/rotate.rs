use gale_archive::ArchiveStore;
use gale_config::GaleConfig;
use gale_rotation::{DriverRunner, RotationPlan, RotationScheduler, SystemClock};

use crate::cli::GlobalFlags;
use crate::commands::admin_client;
use crate::output::output;

/// Handle `gale rotate`.
///
/// Runs until the configured number of cycles completes, or until Ctrl-C
/// when the loop is unbounded.
pub async fn handle(config: &GaleConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let plan = RotationPlan::from_config(config)?;
    let client = admin_client(config)?;
    let runner = DriverRunner::from_config(&config.simulation);
    let archive = ArchiveStore::new(config.simulation.data_root());
    let clock = SystemClock;

    let scheduler = RotationScheduler::new(&plan, &client, &runner, &clock, &archive);

    tokio::select! {
        result = scheduler.run() => output(&result?, flags.format),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("interrupted, stopping rotation loop");
            Ok(())
        }
    }
}
