//! Webhook relay.
//!
//! Posts one chat message to the configured webhook and hands back the
//! decoded body. There are no retries and no timeout beyond the transport
//! default; callers decide what a failure means for the user.

use chrono::{SecondsFormat, Utc};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ChatConfig;

/// Failures at the relay boundary.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("HTTP error! status: {status}")]
    Transport { status: StatusCode },

    #[error("Webhook request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Webhook response could not be read: {0}")]
    Decode(#[source] reqwest::Error),
}

/// A successful webhook body, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawReply {
    Json(Value),
    /// The body was not valid JSON.
    Text(String),
}

#[derive(Serialize)]
struct WebhookRequest<'a> {
    message: &'a str,
    timestamp: String,
    source: &'a str,
}

/// HTTP client bound to one webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    endpoint_url: String,
    source: String,
}

impl WebhookClient {
    pub fn new(config: &ChatConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ChatConfig) -> Self {
        Self {
            client,
            endpoint_url: config.endpoint_url.clone(),
            source: config.source.clone(),
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Send `message` and wait for the reply.
    pub async fn send(&self, message: &str) -> Result<RawReply, RelayError> {
        if message.trim().is_empty() {
            return Err(RelayError::EmptyMessage);
        }

        let body = WebhookRequest {
            message,
            timestamp: timestamp_now(),
            source: &self.source,
        };
        debug!("POST {} ({} chars)", self.endpoint_url, message.len());

        // `.json()` sets `Content-Type: application/json`.
        let resp = self
            .client
            .post(&self.endpoint_url)
            .json(&body)
            .send()
            .await
            .map_err(RelayError::Network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RelayError::Transport { status });
        }

        let text = resp.text().await.map_err(RelayError::Decode)?;
        debug!("webhook replied {status} ({} bytes)", text.len());
        Ok(decode_body(text))
    }
}

/// Interpret a response body as JSON, keeping it as text when it is not.
pub fn decode_body(text: String) -> RawReply {
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => RawReply::Json(value),
        Err(_) => RawReply::Text(text),
    }
}

/// Current time as ISO-8601 with millisecond precision, e.g.
/// `2024-05-01T12:30:00.123Z`.
fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
