use crate::model::{MessagingError, PollOutcome};

/// The two bot API calls the update loop depends on.
#[async_trait::async_trait]
pub trait Messenger: Send + Sync {
    /// Long-polls for updates with `update_id >= cursor`.
    async fn poll_updates(&self, cursor: i64) -> Result<PollOutcome, MessagingError>;

    /// Sends `text` to `chat_id` with markup rendering enabled.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessagingError>;
}
