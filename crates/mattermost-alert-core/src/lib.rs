//! # Mattermost Alert Core
//!
//! Core logic for the Mattermost alert action: turning a single alert payload
//! delivered by the search platform into a chat message and posting it to an
//! incoming webhook.
//!
//! ## Architecture
//!
//! The pipeline is strictly linear and every stage is terminal on failure:
//!
//! 1. [`DeliveryConfig`] is resolved from the payload's `configuration` block
//!    and validated.
//! 2. [`extract_fields`] selects the result fields named by the configured
//!    selector.
//! 3. [`compose`] builds the [`OutboundMessage`].
//! 4. A [`WebhookSender`] delivers the message.
//!
//! Only the last stage performs I/O, and it sits behind a trait so the
//! transport can be swapped in tests.
//!
//! ## Usage
//!
//! ```rust
//! use mattermost_alert_core::{compose, AlertPayload, DeliveryConfig};
//!
//! let payload = AlertPayload::from_json(
//!     r#"{"search_name":"CPU High","configuration":{"webhook_url":"http://hook"}}"#,
//! )
//! .unwrap();
//! let config = DeliveryConfig::from_configuration(&payload.configuration);
//! config.validate().unwrap();
//!
//! let message = compose(&payload, &config);
//! assert!(message.text.starts_with("✅ Alert: **CPU High**"));
//! ```

/// Standard result type for alert processing operations
pub type AlertResult<T> = Result<T, AlertError>;

// ============================================================================
// Error Types
// ============================================================================

/// Top-level error type for alert processing
///
/// Each pipeline stage reports its own error type; this enum keeps the stage
/// identity so callers can tell the failures apart while still collapsing them
/// into a single exit path.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

impl AlertError {
    /// Check if the failure happened before any network call was attempted
    pub fn is_pre_dispatch(&self) -> bool {
        match self {
            Self::Parse(_) => true,
            Self::Config(_) => true,
            Self::Delivery(_) => false,
        }
    }
}

// ============================================================================
// Module declarations
// ============================================================================

/// Incoming alert payload model
pub mod payload;

/// Delivery configuration and severity handling
pub mod delivery_config;

/// Result field selection and markdown rendering
pub mod fields;

/// Chat message composition
pub mod message;

/// Webhook delivery
pub mod dispatch;

/// End-to-end alert processing
pub mod pipeline;

// Re-export key types for convenience
pub use delivery_config::{ConfigError, DeliveryConfig, Severity, DEFAULT_CHANNEL, DEFAULT_SEVERITY};
pub use dispatch::{DeliveryError, HttpWebhookSender, SenderConfig, WebhookSender};
pub use fields::{extract_fields, ExtractedFields};
pub use message::{compose, OutboundMessage, UNNAMED_ALERT};
pub use payload::{AlertPayload, ParseError};
pub use pipeline::process_alert;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
