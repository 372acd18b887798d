use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use gale_config::GaleConfig;
use gale_rotation::Snapshotter;

use crate::cli::{FetchArgs, GlobalFlags};
use crate::commands::{resolve_date, service_client};
use crate::output::output;

/// One-shot snapshots land here unless `--out-dir` is given.
const DEFAULT_SNAPSHOT_DIR: &str = "leaderboard_snapshots";

/// Handle `gale fetch`.
pub async fn handle(
    args: &FetchArgs,
    config: &GaleConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = service_client(config)?;
    let now = Utc::now();
    let date = resolve_date(args.date.as_deref(), now)?;
    let out_dir = args.out_dir.as_ref().map_or_else(
        || config.simulation.data_root().join(DEFAULT_SNAPSHOT_DIR),
        PathBuf::from,
    );

    let files = Snapshotter::new(&client, args.limit)
        .capture(&date, &out_dir, now)
        .await
        .with_context(|| format!("failed to snapshot leaderboard for {date}"))?;

    output(&files, flags.format)
}
