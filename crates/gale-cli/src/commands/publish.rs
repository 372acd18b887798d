use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use gale_cases::load_cases;
use gale_client::PublishRequest;
use gale_config::GaleConfig;

use crate::cli::{GlobalFlags, PublishArgs};
use crate::commands::{admin_client, resolve_date};
use crate::output::output;

/// Handle `gale publish`.
pub async fn handle(
    args: &PublishArgs,
    config: &GaleConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = admin_client(config)?;
    let date = resolve_date(args.date.as_deref(), Utc::now())?;

    let cases = load_cases(Path::new(&args.table))?;
    tracing::info!(date = %date, cases = cases.len(), "publishing cases");

    let acknowledgment = client
        .publish(&PublishRequest {
            date: &date,
            cases: &cases,
            reset_submissions: args.reset_submissions,
        })
        .await
        .with_context(|| format!("failed to publish cases for {date}"))?;

    output(&acknowledgment, flags.format)
}
