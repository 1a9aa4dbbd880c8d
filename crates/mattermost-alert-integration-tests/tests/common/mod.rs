//! Common test utilities for the alert action integration tests
//!
//! This module provides:
//! - A builder for platform-shaped alert payloads
//! - A mock webhook that accepts or rejects every message

use serde_json::{json, Map, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock webhook listens on
pub const HOOK_PATH: &str = "/hooks/abc123";

// ============================================================================
// Payload Builder
// ============================================================================

/// Builds alert payloads the way the search platform sends them
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    document: Map<String, Value>,
    configuration: Map<String, Value>,
    result: Map<String, Value>,
}

#[allow(dead_code)]
impl PayloadBuilder {
    pub fn new() -> Self {
        let mut document = Map::new();
        document.insert(
            "sid".to_string(),
            json!("scheduler__admin__search__RMD5_at_1700000000_1"),
        );
        document.insert("app".to_string(), json!("search"));
        document.insert("owner".to_string(), json!("admin"));
        document.insert("server_uri".to_string(), json!("https://127.0.0.1:8089"));

        Self {
            document,
            configuration: Map::new(),
            result: Map::new(),
        }
    }

    pub fn search_name(mut self, name: &str) -> Self {
        self.document.insert("search_name".to_string(), json!(name));
        self
    }

    pub fn results_link(mut self, link: &str) -> Self {
        self.document.insert("results_link".to_string(), json!(link));
        self
    }

    pub fn config(mut self, key: &str, value: &str) -> Self {
        self.configuration.insert(key.to_string(), json!(value));
        self
    }

    pub fn result_field(mut self, key: &str, value: Value) -> Self {
        self.result.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> String {
        let mut document = self.document;
        document.insert("configuration".to_string(), Value::Object(self.configuration));
        document.insert("result".to_string(), Value::Object(self.result));
        Value::Object(document).to_string()
    }
}

// ============================================================================
// Mock Webhook
// ============================================================================

/// Start a webhook answering every POST on [`HOOK_PATH`] with `status`
pub async fn start_webhook(status: u16) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;

    server
}

/// Full URL of the mock webhook
pub fn hook_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), HOOK_PATH)
}

/// Bodies of every message the webhook received
pub async fn received_messages(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| serde_json::from_slice(&request.body).unwrap())
        .collect()
}
