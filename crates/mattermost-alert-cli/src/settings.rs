//! # Adapter Settings
//!
//! Process-level settings read from the environment. These are separate from
//! the per-alert delivery configuration, which arrives inside the payload.
//!
//! | Variable                           | Default                    |
//! |------------------------------------|----------------------------|
//! | `MATTERMOST_ALERT_DEBUG`           | `false`                    |
//! | `MATTERMOST_ALERT_TIMEOUT_SECONDS` | unset (client default)     |
//! | `MATTERMOST_ALERT_USER_AGENT`      | `mattermost-alert/<version>` |

use mattermost_alert_core::SenderConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prefix shared by all settings variables
pub const ENV_PREFIX: &str = "MATTERMOST_ALERT";

/// Settings loading errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid adapter settings: {0}")]
    Invalid(#[from] config::ConfigError),
}

/// Process-level settings for the alert action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterSettings {
    /// Emit debug diagnostics
    pub debug: bool,

    /// HTTP request timeout in seconds
    pub timeout_seconds: Option<u64>,

    /// User agent for the webhook request
    pub user_agent: String,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            debug: false,
            timeout_seconds: None,
            user_agent: SenderConfig::default().user_agent,
        }
    }
}

impl AdapterSettings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from an explicit set of variables
    ///
    /// Keys use the same names as the environment (`MATTERMOST_ALERT_DEBUG`).
    pub fn from_vars(vars: config::Map<String, String>) -> Result<Self, SettingsError> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn load(environment: config::Environment) -> Result<Self, SettingsError> {
        let settings = config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Request timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Transport settings for the webhook sender
    pub fn sender_config(&self) -> SenderConfig {
        let config = SenderConfig::default().with_user_agent(self.user_agent.clone());
        match self.timeout() {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
