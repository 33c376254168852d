pub mod command_handler;
pub mod listener;
pub mod sender;
pub mod updates;

use crate::config::AppConfig;
use crate::model::{Credential, MessagingError, PollOutcome};
use crate::notifier::traits::Messenger;
use reqwest::Client;
use std::time::Duration;

/// Headroom on top of the long-poll timeout before the HTTP call is abandoned.
const POLL_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

pub struct TelegramClient {
    pub token: Credential,
    pub api_base: String,
    pub offset_param: String,
    pub poll_timeout_secs: u64,
    pub parse_mode: String,
    /// Used for getUpdates; its timeout covers the long poll.
    pub poll_client: Client,
    /// Used for sendMessage.
    pub client: Client,
}

impl TelegramClient {
    pub fn new(token: Credential, config: &AppConfig) -> Result<Self, MessagingError> {
        let poll_client = Client::builder()
            .timeout(Duration::from_secs(config.poll_timeout_secs) + POLL_TIMEOUT_MARGIN)
            .build()
            .map_err(|e| MessagingError::Transport(e.without_url()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| MessagingError::Transport(e.without_url()))?;

        Ok(Self {
            token,
            api_base: config.bot_api_base.clone(),
            offset_param: config.poll_offset_param.clone(),
            poll_timeout_secs: config.poll_timeout_secs,
            parse_mode: config.parse_mode.clone(),
            poll_client,
            client,
        })
    }

    /// `<api_base><token>/<method>`. Contains the token, never log it.
    pub(crate) fn method_url(&self, method: &str) -> String {
        format!("{}{}/{}", self.api_base, self.token.expose(), method)
    }
}

#[async_trait::async_trait]
impl Messenger for TelegramClient {
    async fn poll_updates(&self, cursor: i64) -> Result<PollOutcome, MessagingError> {
        updates::poll_updates(self, cursor).await
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessagingError> {
        sender::send_message(self, chat_id, text).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use wiremock::MockServer;

    pub const TOKEN: &str = "123:TEST";

    pub fn client_for(server: &MockServer) -> TelegramClient {
        let config = AppConfig {
            bot_api_base: format!("{}/bot", server.uri()),
            poll_timeout_secs: 0,
            request_timeout_secs: 5,
            ..AppConfig::default()
        };
        TelegramClient::new(Credential::new(TOKEN), &config).unwrap()
    }
}
