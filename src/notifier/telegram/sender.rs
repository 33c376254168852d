// notifier/telegram/sender.rs

use crate::model::MessagingError;
use crate::notifier::telegram::TelegramClient;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
struct SendResponse {
    ok: bool,
    error_code: Option<i64>,
    description: Option<String>,
}

/// Sends a text message via GET sendMessage with markup rendering.
pub async fn send_message(
    client: &TelegramClient,
    chat_id: i64,
    text: &str,
) -> Result<(), MessagingError> {
    let url = client.method_url("sendMessage");
    let chat_id_param = chat_id.to_string();
    let params = [
        ("text", text),
        ("chat_id", chat_id_param.as_str()),
        ("parse_mode", client.parse_mode.as_str()),
    ];

    let response = client
        .client
        .get(&url)
        .query(&params)
        .send()
        .await
        .map_err(|e| MessagingError::Transport(e.without_url()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| MessagingError::Transport(e.without_url()))?;

    let reply: SendResponse = serde_json::from_str(&body)
        .map_err(|e| MessagingError::Parse(format!("[{}] {}, body: {}", status, e, body)))?;
    if !reply.ok {
        return Err(MessagingError::Rejected {
            code: reply.error_code,
            description: reply.description.unwrap_or_default(),
        });
    }

    info!("✅ Reply sent to chat {} [{}]", chat_id, status);
    Ok(())
}
