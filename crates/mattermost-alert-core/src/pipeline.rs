//! # Alert Pipeline
//!
//! Runs the stages in order: validate, extract and compose, dispatch. A
//! failing stage ends the run; configuration problems are always detected
//! before the sender is touched.

use crate::{compose, AlertPayload, AlertResult, DeliveryConfig, OutboundMessage, WebhookSender};
use tracing::debug;

/// Process one alert and deliver it through `sender`
///
/// Returns the message that was delivered.
///
/// # Errors
/// - `AlertError::Config` - the configuration block is invalid; nothing was sent
/// - `AlertError::Delivery` - the webhook rejected the message or was unreachable
pub async fn process_alert<S>(payload: &AlertPayload, sender: &S) -> AlertResult<OutboundMessage>
where
    S: WebhookSender + ?Sized,
{
    let config = DeliveryConfig::from_configuration(&payload.configuration);
    debug!(config = ?config, "config");
    config.validate()?;

    let message = compose(payload, &config);
    debug!(text = %message.text, "composed message");

    sender.send(&config.webhook_url, &message).await?;
    Ok(message)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
