//! Telegram Bot API notifier.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

use crate::config::TelegramConfig;
use crate::notify::{Notifier, NotifyError};

/// Sends alerts with the Bot API `sendMessage` method.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }

    /// Full `sendMessage` URL for `text`. Contains the bot token; never log it.
    fn message_url(&self, text: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}/bot{}/sendMessage", self.api_base, self.bot_token))?;
        url.query_pairs_mut()
            .append_pair("chat_id", &self.chat_id)
            .append_pair("text", text);
        Ok(url)
    }

    /// Deliver `text`, reporting why delivery failed.
    pub async fn deliver(&self, text: &str) -> Result<(), NotifyError> {
        let url = self.message_url(text)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> bool {
        match self.deliver(message).await {
            Ok(()) => {
                tracing::debug!(chat_id = %self.chat_id, "Telegram alert delivered");
                true
            }
            Err(NotifyError::Transport(e)) => {
                // reqwest includes the request URL in its Display output, which carries the token.
                tracing::error!(chat_id = %self.chat_id, error = %e.without_url(), "Failed to send Telegram alert");
                false
            }
            Err(e) => {
                tracing::error!(chat_id = %self.chat_id, error = %e, "Failed to send Telegram alert");
                false
            }
        }
    }
}
