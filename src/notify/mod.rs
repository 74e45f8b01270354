//! Notification module
//!
//! Formats the new ads of a target into a digest and delivers it, either to a
//! Telegram chat or, when none is configured, to the log.

mod digest;
mod telegram;

pub use digest::{build_digest, excerpt, Digest, DESCRIPTION_EXCERPT_CHARS};
pub use telegram::{TelegramNotifier, MAX_MESSAGE_CHARS};

use crate::config::Config;
use thiserror::Error;

/// Errors that can occur while delivering a digest
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to build notification client: {0}")]
    Client(String),

    #[error("Failed to deliver notification: {0}")]
    Delivery(String),

    #[error("Notification rejected with HTTP {status}: {detail}")]
    Rejected { status: u16, detail: String },
}

/// Where digests go
#[derive(Debug, Clone)]
pub enum Notifier {
    Telegram(TelegramNotifier),
    /// Writes digests to the log at info level
    Log,
}

impl Notifier {
    /// Picks the channel configured in `config`
    pub fn from_config(config: &Config) -> Result<Self, NotifyError> {
        match &config.telegram {
            Some(telegram) => Ok(Self::Telegram(TelegramNotifier::new(telegram)?)),
            None => Ok(Self::Log),
        }
    }

    /// Delivers one digest
    pub async fn send(&self, digest: &Digest) -> Result<(), NotifyError> {
        match self {
            Self::Telegram(telegram) => telegram.send(digest).await,
            Self::Log => {
                tracing::info!("{}\n{}", digest.subject, digest.body);
                Ok(())
            }
        }
    }
}
