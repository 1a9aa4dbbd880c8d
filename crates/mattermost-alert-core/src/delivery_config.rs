//! # Delivery Configuration
//!
//! Resolves the alert action's configuration block into a [`DeliveryConfig`]
//! and validates it before anything is sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Channel used when the configuration does not name one
pub const DEFAULT_CHANNEL: &str = "splunk-alerts";

/// Severity used when the configuration does not name one
pub const DEFAULT_SEVERITY: &str = "info";

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("webhook_url must be set")]
    MissingWebhook,

    #[error("severity must be one of \"none\", \"info\", \"warning\", \"error\" (got '{value}')")]
    InvalidSeverity { value: String },
}

// ============================================================================
// Severity
// ============================================================================

/// Alert severity, controlling the icon in front of the message title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Icon prefixed to the message title
    pub fn icon(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Info => "✅",
            Self::Warning => "⚠️",
            Self::Error => "‼️",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Matching is exact: the platform passes the literal chosen in the alert
// action form, so "Warning" or " info" are rejected.
impl FromStr for Severity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidSeverity {
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Delivery Configuration
// ============================================================================

/// Delivery settings for a single alert
///
/// Built from the payload's free-form `configuration` mapping with
/// [`DeliveryConfig::from_configuration`]. Unknown keys are ignored and absent
/// keys take the documented defaults. The result must pass
/// [`DeliveryConfig::validate`] before it is used for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Incoming webhook URL; empty when not configured
    pub webhook_url: String,

    /// Target channel
    pub channel: String,

    /// Severity literal as configured
    pub severity: String,

    /// Comma-separated field selector (exact names or trailing-`*` prefixes)
    pub fields: Option<String>,
}

impl DeliveryConfig {
    /// Resolve the configuration block of an alert payload
    pub fn from_configuration(configuration: &Map<String, Value>) -> Self {
        Self {
            webhook_url: lookup(configuration, "webhook_url").unwrap_or_default(),
            channel: lookup(configuration, "channel")
                .unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
            severity: lookup(configuration, "severity")
                .unwrap_or_else(|| DEFAULT_SEVERITY.to_string()),
            fields: lookup(configuration, "fields"),
        }
    }

    /// Check that the configuration can be used for delivery
    ///
    /// # Errors
    /// - `ConfigError::MissingWebhook` - `webhook_url` is empty
    /// - `ConfigError::InvalidSeverity` - `severity` is not a known literal
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.webhook_url.is_empty() {
            return Err(ConfigError::MissingWebhook);
        }

        self.severity()?;
        Ok(())
    }

    /// Parsed severity
    pub fn severity(&self) -> Result<Severity, ConfigError> {
        self.severity.parse()
    }

    /// Icon for the configured severity, empty if the severity is unknown
    pub fn severity_icon(&self) -> &'static str {
        self.severity().map(|s| s.icon()).unwrap_or_default()
    }
}

/// Read a configuration value as a string.
///
/// The platform sends every setting as a string; other scalars are accepted
/// using their JSON text and an explicit `null` counts as absent.
fn lookup(configuration: &Map<String, Value>, key: &str) -> Option<String> {
    match configuration.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "delivery_config_tests.rs"]
mod tests;
