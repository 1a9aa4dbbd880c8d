//! # Webhook Dispatch
//!
//! Posts an [`OutboundMessage`] to an incoming webhook. Delivery is attempted
//! exactly once; any failure is reported to the caller and nothing is retried
//! here.

use crate::OutboundMessage;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Webhook delivery errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The webhook answered with a non-success status
    #[error("webhook responded with HTTP status {0}")]
    HttpStatus(u16),

    /// The request never produced a response (connection, DNS, timeout, TLS)
    #[error("webhook request failed: {0}")]
    Transport(String),
}

impl DeliveryError {
    /// Check if the failure is of a kind an external retry could fix
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpStatus(status) => *status >= 500 || *status == 429,
            Self::Transport(_) => true,
        }
    }
}

/// Transport used to deliver a message to a webhook
#[async_trait]
pub trait WebhookSender: Send + Sync {
    /// Deliver a single message
    ///
    /// # Errors
    /// - `DeliveryError::HttpStatus` - the endpoint returned a non-2xx status
    /// - `DeliveryError::Transport` - no response was received
    async fn send(&self, webhook_url: &str, message: &OutboundMessage) -> Result<(), DeliveryError>;
}

// ============================================================================
// HTTP Sender
// ============================================================================

/// Settings for the HTTP transport
#[derive(Debug, Clone)]
pub struct SenderConfig {
    /// User agent sent with the request
    pub user_agent: String,

    /// Request timeout; `None` keeps the client default
    pub timeout: Option<Duration>,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("mattermost-alert/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}

impl SenderConfig {
    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// [`WebhookSender`] posting JSON over HTTP(S) with `reqwest`
#[derive(Debug, Clone)]
pub struct HttpWebhookSender {
    client: reqwest::Client,
}

impl HttpWebhookSender {
    /// Build a sender from transport settings
    pub fn new(config: &SenderConfig) -> Result<Self, DeliveryError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| DeliveryError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl WebhookSender for HttpWebhookSender {
    async fn send(&self, webhook_url: &str, message: &OutboundMessage) -> Result<(), DeliveryError> {
        debug!(webhook_url, channel = %message.channel, "posting message");

        let response = self
            .client
            .post(webhook_url)
            .json(message)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::HttpStatus(status.as_u16()));
        }

        debug!(status = status.as_u16(), "webhook accepted message");
        Ok(())
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
