// notifier/telegram/updates.rs

use crate::model::{InboundUpdate, MessagingError, PollOutcome};
use crate::notifier::telegram::TelegramClient;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<Value>,
    error_code: Option<i64>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessage {
    chat: Option<TelegramChat>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
}

/// Calls getUpdates with the cursor as offset. API-level failures come back
/// as `PollOutcome::Rejected`; only transport and parse failures are `Err`.
pub async fn poll_updates(
    client: &TelegramClient,
    cursor: i64,
) -> Result<PollOutcome, MessagingError> {
    let url = client.method_url("getUpdates");
    let mut query = vec![(client.offset_param.as_str(), cursor.to_string())];
    if client.poll_timeout_secs > 0 {
        query.push(("timeout", client.poll_timeout_secs.to_string()));
    }

    let response = client
        .poll_client
        .get(&url)
        .query(&query)
        .send()
        .await
        .map_err(|e| MessagingError::Transport(e.without_url()))?;
    let body = response
        .text()
        .await
        .map_err(|e| MessagingError::Transport(e.without_url()))?;
    debug!("getUpdates reply: {}", body);

    parse_updates(&body)
}

/// Decodes a getUpdates body. Each update keeps its raw JSON.
pub fn parse_updates(body: &str) -> Result<PollOutcome, MessagingError> {
    let reply: TelegramApiResponse = serde_json::from_str(body)
        .map_err(|e| MessagingError::Parse(format!("{}, body: {}", e, body)))?;

    if !reply.ok {
        return Ok(PollOutcome::Rejected {
            code: reply.error_code,
            description: reply.description.unwrap_or_default(),
        });
    }

    reply
        .result
        .into_iter()
        .map(parse_update)
        .collect::<Result<Vec<_>, _>>()
        .map(PollOutcome::Updates)
}

/// An update whose id is readable but whose body does not decode is kept with
/// no chat and no text, so it can still be acknowledged.
fn parse_update(raw: Value) -> Result<InboundUpdate, MessagingError> {
    let update: TelegramUpdate = match serde_json::from_value(raw.clone()) {
        Ok(update) => update,
        Err(e) => {
            let update_id = raw
                .get("update_id")
                .and_then(Value::as_i64)
                .ok_or_else(|| MessagingError::Parse(format!("{}, update: {}", e, raw)))?;
            debug!("Update {} does not decode: {}", update_id, e);
            return Ok(InboundUpdate {
                update_id,
                chat_id: None,
                text: None,
                raw,
            });
        }
    };

    let (chat_id, text) = match update.message {
        Some(message) => (message.chat.map(|c| c.id), message.text),
        None => (None, None),
    };

    Ok(InboundUpdate {
        update_id: update.update_id,
        chat_id,
        text,
        raw,
    })
}
