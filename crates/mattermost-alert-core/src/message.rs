//! # Message Composition
//!
//! Builds the chat message posted to the webhook. The layout is fixed:
//!
//! ```text
//! {icon} Alert: **{name}**
//!
//! ---
//! [View in Splunk]({link})
//!
//!
//! {table}
//! ---
//! ```

use crate::{extract_fields, AlertPayload, DeliveryConfig};
use serde::{Deserialize, Serialize};

/// Alert name used when the payload carries no `search_name`
pub const UNNAMED_ALERT: &str = "Unnamed Alert";

/// Rendering of a missing results link
const MISSING_LINK: &str = "None";

/// Message body accepted by the incoming webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Target channel
    pub channel: String,

    /// Markdown message text
    pub text: String,
}

/// Compose the outbound message for an alert
///
/// `config` is expected to be validated; an unknown severity renders without
/// an icon.
pub fn compose(payload: &AlertPayload, config: &DeliveryConfig) -> OutboundMessage {
    let name = payload.alert_name();
    let name = name.as_deref().unwrap_or(UNNAMED_ALERT);
    let link = payload.results_link_text();
    let link = link.as_deref().unwrap_or(MISSING_LINK);
    let table = extract_fields(config.fields.as_deref(), &payload.result).to_markdown_table();

    OutboundMessage {
        channel: config.channel.clone(),
        text: format!(
            "{icon} Alert: **{name}**\n\n---\n[View in Splunk]({link})\n\n\n{table}\n---",
            icon = config.severity_icon(),
        ),
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
