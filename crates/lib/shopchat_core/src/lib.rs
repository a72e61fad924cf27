//! # shopchat_core
//!
//! Core chat logic for Shopchat: relay a message to the assistant webhook,
//! normalize whatever comes back, and keep the session's message log.

pub mod config;
pub mod conversation;
pub mod models;
pub mod normalizer;
pub mod relay;
pub mod render;
pub mod session;

pub use config::{ChatConfig, ConfigError};
pub use conversation::MessageLog;
pub use models::{ChatMessage, Product, Role, TextFormat};
pub use normalizer::{Reply, classify, normalize};
pub use relay::{RawReply, RelayError, WebhookClient};
pub use session::{ChatSession, Resolution, SessionError, SubmissionId};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
