//! Bootstrap configuration.
//!
//! Defaults layered under an optional config file and `AISHOU_*`
//! environment variables.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use aishou_core::session::ReauthPolicy;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Backend base URL for the registration endpoint.
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub reauth_max_attempts: u32,
    pub reauth_throttle_ms: i64,
    /// UX pacing for the reauth flow.
    pub reauth_check_delay_ms: u64,
    pub reauth_progress_step_ms: u64,
    pub reauth_success_display_ms: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl BootstrapConfig {
    pub fn defaults() -> Self {
        Self {
            api_base_url: "https://api.aishou.app".into(),
            request_timeout_ms: 10_000,
            reauth_max_attempts: 3,
            reauth_throttle_ms: 60_000,
            reauth_check_delay_ms: 500,
            reauth_progress_step_ms: 150,
            reauth_success_display_ms: 1_200,
        }
    }

    /// Load config: defaults, then an optional file, then `AISHOU_*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let loaded = builder
            .add_source(config::Environment::with_prefix("AISHOU"))
            .build()?;
        Ok(loaded.try_deserialize()?)
    }

    pub fn reauth_policy(&self) -> ReauthPolicy {
        ReauthPolicy {
            max_attempts: self.reauth_max_attempts,
            throttle_window_ms: self.reauth_throttle_ms,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
