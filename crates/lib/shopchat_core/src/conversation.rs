//! Append-only message log for one chat session.

use crate::models::ChatMessage;
use crate::normalizer::Reply;

/// Ordered record of everything shown in the chat. Entries are never edited
/// or removed, and the log is never persisted.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that starts with a single bot greeting.
    pub fn with_greeting(greeting: &str) -> Self {
        let mut log = Self::new();
        if !greeting.is_empty() {
            log.messages.push(ChatMessage::bot(greeting));
        }
        log
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::user(text))
    }

    /// Append the bot entry for a resolved reply.
    pub fn push_bot(&mut self, reply: &Reply) -> &ChatMessage {
        let message = match reply {
            Reply::Products { message, products } => {
                ChatMessage::bot_with_products(message.clone(), products.clone())
            }
            Reply::Html { html } => ChatMessage::bot_html(html.clone()),
            Reply::Message { .. } | Reply::Fallback { .. } | Reply::Error { .. } => {
                ChatMessage::bot(reply.display_text())
            }
        };
        self.push(message)
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
