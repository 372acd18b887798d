use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use gale_client::ServiceClient;
use gale_config::GaleConfig;
use gale_core::DATE_FORMAT;

use crate::cli::{Commands, GlobalFlags};

pub mod create;
pub mod fetch;
pub mod publish;
pub mod rotate;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    mut config: GaleConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Create(args) => {
            args.apply(&mut config);
            create::handle(&args, &config, flags).await
        }
        Commands::Publish(args) => publish::handle(&args, &config, flags).await,
        Commands::Fetch(args) => fetch::handle(&args, &config, flags).await,
        Commands::Rotate(args) => {
            args.apply(&mut config);
            rotate::handle(&config, flags).await
        }
    }
}

/// Client for read-only calls, with the configured timeouts.
fn service_client(config: &GaleConfig) -> anyhow::Result<ServiceClient> {
    let api_base = config.require_api_base()?;
    Ok(ServiceClient::new(api_base).with_timeouts(
        Duration::from_secs(config.service.publish_timeout_secs),
        Duration::from_secs(config.service.fetch_timeout_secs),
    ))
}

/// Client that can also publish.
fn admin_client(config: &GaleConfig) -> anyhow::Result<ServiceClient> {
    let token = config.require_admin_token()?;
    Ok(service_client(config)?.with_admin_token(token))
}

/// The explicit `--date`, normalized, or the UTC date of `now`.
fn resolve_date(raw: Option<&str>, now: DateTime<Utc>) -> anyhow::Result<String> {
    match raw.map(str::trim) {
        None => Ok(gale_core::utc_date(now)),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(gale_core::format_date)
            .with_context(|| format!("invalid --date '{raw}', expected YYYY-MM-DD")),
    }
}
