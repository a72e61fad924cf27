//! Chat log entries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Product;

/// Who authored a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// How the entry's text is meant to be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    #[default]
    Plain,
    /// Rich text handed over verbatim.
    Html,
}

/// A single entry in the message log. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    id: Uuid,
    role: Role,
    text: String,
    format: TextFormat,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    products: Option<Vec<Product>>,
}

impl ChatMessage {
    fn new(role: Role, text: String, format: TextFormat, products: Option<Vec<Product>>) -> Self {
        Self {
            // UUIDv7 so ids sort by creation time.
            id: Uuid::now_v7(),
            role,
            text,
            format,
            created_at: Utc::now(),
            products,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into(), TextFormat::Plain, None)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Role::Bot, text.into(), TextFormat::Plain, None)
    }

    pub fn bot_html(html: impl Into<String>) -> Self {
        Self::new(Role::Bot, html.into(), TextFormat::Html, None)
    }

    pub fn bot_with_products(text: impl Into<String>, products: Vec<Product>) -> Self {
        Self::new(Role::Bot, text.into(), TextFormat::Plain, Some(products))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn format(&self) -> TextFormat {
        self.format
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Products attached to this entry, if the reply carried a list.
    pub fn products(&self) -> Option<&[Product]> {
        self.products.as_deref()
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
