//! Chat session: ties the relay, the normalizer and the message log together.
//!
//! Every submission spawns its own relay task into a [`JoinSet`]. Tasks never
//! touch the log; the session appends the bot entry when
//! [`ChatSession::next_reply`] joins the finished task. Replies may arrive in
//! a different order than the messages were sent.
//!
//! All tasks hang off one [`CancellationToken`], so shutting down or
//! dropping the session abandons any call still in flight.

use std::fmt;
use std::time::Duration;

use log::{debug, error};
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::ChatConfig;
use crate::conversation::MessageLog;
use crate::models::ChatMessage;
use crate::normalizer::{Reply, normalize};
use crate::relay::WebhookClient;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Chat session is closed")]
    Closed,
}

/// Sequence number of one submission within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A reply that has been appended to the log.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub submission: SubmissionId,
    pub reply: Reply,
    pub message: ChatMessage,
}

impl Resolution {
    /// Text for a transient "Connection Issue" notice, if the call failed.
    pub fn notice(&self) -> Option<&str> {
        self.reply.error()
    }
}

struct Completion {
    submission: SubmissionId,
    reply: Reply,
}

pub struct ChatSession {
    relay: WebhookClient,
    thinking_delay: Duration,
    log: MessageLog,
    /// `None` output means the task saw cancellation.
    tasks: JoinSet<Option<Completion>>,
    cancel: CancellationToken,
    next_id: u64,
}

impl ChatSession {
    /// New session whose log starts with the configured greeting.
    pub fn new(config: &ChatConfig) -> Self {
        Self::with_relay(WebhookClient::new(config), config)
    }

    pub fn with_relay(relay: WebhookClient, config: &ChatConfig) -> Self {
        Self {
            relay,
            thinking_delay: config.thinking_delay,
            log: MessageLog::with_greeting(&config.greeting),
            tasks: JoinSet::new(),
            cancel: CancellationToken::new(),
            next_id: 1,
        }
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Number of submissions whose reply has not been appended yet.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Append the user entry and start the relay call in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, text: &str) -> Result<SubmissionId, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        if self.is_closed() {
            return Err(SessionError::Closed);
        }

        self.log.push_user(text);

        let submission = SubmissionId(self.next_id);
        self.next_id += 1;

        let relay = self.relay.clone();
        let delay = self.thinking_delay;
        let cancel = self.cancel.child_token();
        let text = text.to_string();

        self.tasks.spawn(async move {
            let reply = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("submission {submission} cancelled before reply");
                    return None;
                }
                outcome = relay.send(&text) => normalize(outcome),
            };

            if !delay.is_zero() {
                tokio::select! {
                    _ = cancel.cancelled() => return None,
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            Some(Completion { submission, reply })
        });

        debug!("submission {submission} sent");
        Ok(submission)
    }

    /// Wait for the next reply to resolve and append it to the log.
    ///
    /// Returns `None` once nothing is in flight. A task that panics is
    /// logged and skipped.
    pub async fn next_reply(&mut self) -> Option<Resolution> {
        loop {
            match self.tasks.join_next().await? {
                Ok(Some(Completion { submission, reply })) => {
                    let message = self.log.push_bot(&reply).clone();
                    return Some(Resolution {
                        submission,
                        reply,
                        message,
                    });
                }
                Ok(None) => {}
                Err(e) => error!("relay task failed: {e}"),
            }
        }
    }

    /// Submit `text` and wait until its own reply is appended.
    ///
    /// Replies to earlier submissions that resolve first are appended on the
    /// way.
    pub async fn ask(&mut self, text: &str) -> Result<Resolution, SessionError> {
        let submission = self.submit(text)?;
        while let Some(resolution) = self.next_reply().await {
            if resolution.submission == submission {
                return Ok(resolution);
            }
        }
        Err(SessionError::Closed)
    }

    /// Cancel every call still in flight. Further submissions are rejected.
    pub fn shutdown(&mut self) {
        if !self.tasks.is_empty() {
            debug!("abandoning {} in-flight submission(s)", self.tasks.len());
        }
        self.cancel.cancel();
        self.tasks.abort_all();
        self.tasks.detach_all();
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        // The JoinSet aborts its tasks on drop as well.
        self.cancel.cancel();
    }
}
