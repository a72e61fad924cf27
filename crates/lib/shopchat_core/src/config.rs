//! Chat client configuration.

use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_WEBHOOK_URL: &str = "https://kumarkanaiya.app.n8n.cloud/webhook/ictchat";
pub const DEFAULT_SOURCE: &str = "web-chat";
pub const DEFAULT_THINKING_DELAY_MS: u64 = 1500;
pub const DEFAULT_GREETING: &str = "Hello! I'm your AI shopping assistant. I can help you find \
    products, answer questions, and provide recommendations. What are you looking for today?";

/// Errors raised while building a [`ChatConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid webhook URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Webhook URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("Invalid thinking delay {value:?}: {source}")]
    InvalidDelay {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Resolved settings for a chat session.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Webhook that receives every chat message.
    pub endpoint_url: String,
    /// Value of the `source` field in outbound requests.
    pub source: String,
    /// Pause before a resolved reply is shown.
    pub thinking_delay: Duration,
    /// Bot message seeded into a fresh log.
    pub greeting: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_WEBHOOK_URL.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            thinking_delay: Duration::from_millis(DEFAULT_THINKING_DELAY_MS),
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

impl ChatConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                     | Default                |
    /// |------------------------------|------------------------|
    /// | `SHOPCHAT_WEBHOOK_URL`       | [`DEFAULT_WEBHOOK_URL`] |
    /// | `SHOPCHAT_THINKING_DELAY_MS` | `1500`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ChatConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("SHOPCHAT_WEBHOOK_URL") {
            config = config.with_endpoint(&url)?;
        }
        if let Some(value) = lookup("SHOPCHAT_THINKING_DELAY_MS") {
            config.thinking_delay = parse_delay_ms(&value)?;
        }

        Ok(config)
    }

    /// Replace the endpoint after checking it is an http(s) URL.
    pub fn with_endpoint(mut self, url: &str) -> Result<Self, ConfigError> {
        validate_endpoint(url)?;
        self.endpoint_url = url.to_string();
        Ok(self)
    }

    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }
}

/// Parse a millisecond count such as `"1500"`.
pub fn parse_delay_ms(value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|source| ConfigError::InvalidDelay {
            value: value.to_string(),
            source,
        })
}

fn validate_endpoint(url: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(url).map_err(|source| ConfigError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
