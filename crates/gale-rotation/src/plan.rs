//! Validated rotation settings.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use gale_config::{ConfigError, GaleConfig, parse_interval};
use gale_core::{DATE_FORMAT, DateMode};

use crate::simulation::SimulationParams;

/// When the loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Forever,
    After(u64),
}

impl Termination {
    /// `0` means run forever.
    #[must_use]
    pub const fn from_iterations(iterations: u64) -> Self {
        if iterations == 0 {
            Self::Forever
        } else {
            Self::After(iterations)
        }
    }

    /// Whether the loop is finished after `completed` cycles.
    #[must_use]
    pub const fn is_done(self, completed: u64) -> bool {
        match self {
            Self::Forever => false,
            Self::After(limit) => completed >= limit,
        }
    }
}

/// How each cycle picks its challenge date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSelector {
    Utc,
    Fixed(String),
}

impl DateSelector {
    /// Challenge date for a cycle starting at `now`.
    #[must_use]
    pub fn date_for(&self, now: DateTime<Utc>) -> String {
        match self {
            Self::Utc => gale_core::utc_date(now),
            Self::Fixed(date) => date.clone(),
        }
    }
}

/// Everything the scheduler needs, validated once at startup.
#[derive(Debug, Clone)]
pub struct RotationPlan {
    pub interval: Duration,
    pub termination: Termination,
    pub date: DateSelector,
    pub snapshot_root: PathBuf,
    pub leaderboard_limit: u32,
    pub reset_submissions: bool,
    pub skip_sim: bool,
    pub simulation: SimulationParams,
}

impl RotationPlan {
    /// Validate `config` into a plan.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the admin token or base URL is missing,
    /// the interval is invalid, `fixed` date mode has no valid date, or the
    /// driver entry point is missing while simulation is enabled.
    pub fn from_config(config: &GaleConfig) -> Result<Self, ConfigError> {
        config.require_api_base()?;
        config.require_admin_token()?;

        let interval = parse_interval(&config.rotation.interval)?;
        let date = match config.rotation.date_mode {
            DateMode::Utc => DateSelector::Utc,
            DateMode::Fixed => DateSelector::Fixed(fixed_date(&config.rotation.fixed_date)?),
        };

        if !config.rotation.skip_sim {
            let driver = config.simulation.driver_path();
            if !driver.is_file() {
                return Err(ConfigError::Missing {
                    field: "simulation.driver".to_string(),
                    hint: format!("driver not found at {}", driver.display()),
                });
            }
        }

        Ok(Self {
            interval,
            termination: Termination::from_iterations(config.rotation.iterations),
            date,
            snapshot_root: config
                .rotation
                .snapshot_root(&config.simulation.data_root()),
            leaderboard_limit: config.service.leaderboard_limit,
            reset_submissions: config.rotation.reset_submissions,
            skip_sim: config.rotation.skip_sim,
            simulation: SimulationParams::from_config(&config.simulation),
        })
    }
}

fn fixed_date(raw: &str) -> Result<String, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Missing {
            field: "rotation.fixed_date".to_string(),
            hint: "required when date mode is 'fixed'".to_string(),
        });
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(gale_core::format_date)
        .map_err(|e| ConfigError::InvalidValue {
            field: "rotation.fixed_date".to_string(),
            reason: format!("'{raw}' is not a YYYY-MM-DD date: {e}"),
        })
}

/// Sleep before the next cycle: `max(1s, interval - elapsed)`, in whole
/// seconds. An overrunning cycle is followed almost immediately by the next.
#[must_use]
pub const fn next_sleep(interval: Duration, elapsed: Duration) -> Duration {
    let remaining = interval.as_secs().saturating_sub(elapsed.as_secs());
    Duration::from_secs(if remaining == 0 { 1 } else { remaining })
}
