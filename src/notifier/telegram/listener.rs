// notifier/telegram/listener.rs

use crate::model::{MessagingError, PollOutcome};
use crate::notifier::telegram::command_handler::{normalize_command, CommandHandler, Dispatch};
use crate::notifier::traits::Messenger;
use crate::status::traits::StatusSource;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

/// Result of one poll -> dispatch -> advance cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// Empty batch; poll again right away.
    Idle,
    /// Newest update consumed, cursor advanced.
    Advanced(Dispatch),
    /// The API answered `ok: false`; poll again right away, cursor unchanged.
    Rejected,
    /// The API could not be reached or answered garbage; wait before polling.
    Backoff,
}

/// Polls for commands and answers them, one update per cycle.
///
/// Only the newest update of each batch is dispatched; older ones in the same
/// batch are acknowledged without being handled.
pub struct UpdateLoop<M, S> {
    messenger: M,
    status: S,
    handler: CommandHandler,
    retry_delay: Duration,
    cursor: i64,
}

impl<M: Messenger, S: StatusSource> UpdateLoop<M, S> {
    pub fn new(messenger: M, status: S, handler: CommandHandler, retry_delay: Duration) -> Self {
        Self {
            messenger,
            status,
            handler,
            retry_delay,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Runs until the process is killed.
    pub async fn run(&mut self) {
        info!("▶️ Listening for commands...");
        loop {
            if self.step().await == Cycle::Backoff {
                info!("Retrying in {}s", self.retry_delay.as_secs());
                sleep(self.retry_delay).await;
            }
        }
    }

    pub async fn step(&mut self) -> Cycle {
        let updates = match self.messenger.poll_updates(self.cursor).await {
            Ok(PollOutcome::Updates(updates)) => updates,
            Ok(PollOutcome::Rejected { code, description }) => {
                let code = code.map_or_else(|| "?".to_string(), |c| c.to_string());
                error!("getUpdates Error {}: {}", code, description);
                return Cycle::Rejected;
            }
            Err(MessagingError::Transport(e)) => {
                error!("connection to telegram api failed: {}", e);
                return Cycle::Backoff;
            }
            Err(e) => {
                error!("getUpdates failed: {}", e);
                return Cycle::Backoff;
            }
        };

        let Some(latest) = updates.last() else {
            return Cycle::Idle;
        };
        if updates.len() > 1 {
            debug!("Skipping {} older updates in batch", updates.len() - 1);
        }

        let dispatch = match (latest.text.as_deref(), latest.chat_id) {
            (Some(text), Some(chat_id)) => {
                let command = normalize_command(text);
                self.handler
                    .handle_command(&command, chat_id, &self.status, &self.messenger)
                    .await
            }
            _ => {
                let payload = serde_json::to_string_pretty(&latest.raw)
                    .unwrap_or_else(|_| latest.raw.to_string());
                warn!("json reply parse error, reply:\n{}", payload);
                Dispatch::Ignored
            }
        };

        self.cursor = self.cursor.max(latest.update_id + 1);
        Cycle::Advanced(dispatch)
    }
}
