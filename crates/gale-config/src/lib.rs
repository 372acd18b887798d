//! # gale-config
//!
//! Layered configuration loading for Gale using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GALE_*` prefix, `__` as separator)
//! 2. Legacy variables `LEADERBOARD_ADMIN_TOKEN` and `LEADERBOARD_LOCAL_REPO_ROOT`
//! 3. Project-level `gale.toml`
//! 4. User-level `~/.config/gale/config.toml`
//! 5. Built-in defaults
//!
//! Command-line flags are applied by the binary on top of the extracted value.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GALE_SERVICE__ADMIN_TOKEN` -> `service.admin_token`,
//! `GALE_ROTATION__INTERVAL` -> `rotation.interval`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use gale_config::GaleConfig;
//!
//! let config = GaleConfig::load_with_dotenv().expect("config");
//! let token = config.require_admin_token().expect("token");
//! ```

mod error;
mod interval;
mod rotation;
mod service;
mod simulation;

pub use error::ConfigError;
pub use interval::parse_interval;
pub use rotation::RotationConfig;
pub use service::ServiceConfig;
pub use simulation::SimulationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "gale.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GaleConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub rotation: RotationConfig,
}

impl GaleConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Legacy variable names still used by deployment scripts
        figment = figment
            .merge(
                Env::raw()
                    .only(&["LEADERBOARD_ADMIN_TOKEN"])
                    .map(|_| "service.admin_token".into()),
            )
            .merge(
                Env::raw()
                    .only(&["LEADERBOARD_LOCAL_REPO_ROOT"])
                    .map(|_| "simulation.repo_root".into()),
            );

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("GALE_").split("__"))
    }

    /// The admin token, or a configuration error naming how to supply it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no token is configured.
    pub fn require_admin_token(&self) -> Result<&str, ConfigError> {
        if self.service.has_admin_token() {
            Ok(self.service.admin_token.trim())
        } else {
            Err(ConfigError::Missing {
                field: "service.admin_token".to_string(),
                hint: "provide --admin-token or set LEADERBOARD_ADMIN_TOKEN".to_string(),
            })
        }
    }

    /// The service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no base URL is configured.
    pub fn require_api_base(&self) -> Result<&str, ConfigError> {
        if self.service.is_configured() {
            Ok(self.service.api_base.trim())
        } else {
            Err(ConfigError::Missing {
                field: "service.api_base".to_string(),
                hint: "provide --api-base or set GALE_SERVICE__API_BASE".to_string(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gale").join("config.toml"))
    }
}
