//! Telegram delivery through the Bot API `sendMessage` method

use crate::config::TelegramConfig;
use crate::notify::digest::{excerpt, Digest};
use crate::notify::NotifyError;
use reqwest::Client;
use std::time::Duration;

/// Longest message Telegram accepts, in characters
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Sends digests to one Telegram chat
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| NotifyError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                config.api_base.trim_end_matches('/'),
                config.bot_token
            ),
            chat_id: config.chat_id.clone(),
        })
    }

    /// Posts the digest as a single plain-text message
    pub async fn send(&self, digest: &Digest) -> Result<(), NotifyError> {
        let text = excerpt(&digest.as_message(), MAX_MESSAGE_CHARS);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("chat_id", self.chat_id.as_str()),
                ("text", text.as_str()),
                ("disable_web_page_preview", "true"),
            ])
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        tracing::debug!("Telegram accepted digest '{}'", digest.subject);
        Ok(())
    }
}
