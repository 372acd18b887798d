//! Remote leaderboard service configuration.

use serde::{Deserialize, Serialize};

/// Default publish timeout. Publish payloads carry full geometry and can be large.
const fn default_publish_timeout_secs() -> u64 {
    120
}

const fn default_fetch_timeout_secs() -> u64 {
    60
}

/// Leaderboard rows captured per scheduler snapshot.
const fn default_leaderboard_limit() -> u32 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service base URL (e.g., `https://leaderboard.example.workers.dev`).
    #[serde(default)]
    pub api_base: String,

    /// Bearer token authorizing publish calls.
    #[serde(default)]
    pub admin_token: String,

    #[serde(default = "default_publish_timeout_secs")]
    pub publish_timeout_secs: u64,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            admin_token: String::new(),
            publish_timeout_secs: default_publish_timeout_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            leaderboard_limit: default_leaderboard_limit(),
        }
    }
}

impl ServiceConfig {
    /// Check if a base URL is set.
    pub fn is_configured(&self) -> bool {
        !self.api_base.trim().is_empty()
    }

    /// Check if publish calls can be authorized.
    pub fn has_admin_token(&self) -> bool {
        !self.admin_token.trim().is_empty()
    }
}
