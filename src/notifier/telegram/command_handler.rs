// notifier/telegram/command_handler.rs

use crate::formatter::ReportFormatter;
use crate::notifier::traits::Messenger;
use crate::status::traits::StatusSource;
use tracing::{info, warn};

/// What a dispatched command ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Not the recognized command; nothing was sent.
    Ignored,
    /// Status fetched and report sent.
    Reported,
    /// Status fetch failed; the no-data reply was attempted instead.
    NoData,
    /// The reply could not be delivered.
    SendFailed,
}

/// Strips leading slashes and a trailing `@botname` mention, then lowercases.
pub fn normalize_command(text: &str) -> String {
    let command = text.trim().trim_start_matches('/');
    let command = match command.rsplit_once('@') {
        Some((head, mention)) if !mention.is_empty() && !mention.contains(char::is_whitespace) => {
            head
        }
        _ => command,
    };
    command.trim_end().to_lowercase()
}

pub struct CommandHandler {
    command: String,
    formatter: ReportFormatter,
}

impl CommandHandler {
    pub fn new(command: impl Into<String>, formatter: ReportFormatter) -> Self {
        Self {
            command: normalize_command(&command.into()),
            formatter,
        }
    }

    /// Runs the status -> report -> reply pipeline if `command` (already
    /// normalized) is the recognized one.
    pub async fn handle_command(
        &self,
        command: &str,
        chat_id: i64,
        status: &dyn StatusSource,
        messenger: &dyn Messenger,
    ) -> Dispatch {
        if command != self.command {
            return Dispatch::Ignored;
        }
        info!("Handling /{} for chat {}", command, chat_id);

        let (reply, outcome) = match status.fetch_status().await {
            Ok(snapshot) => (self.formatter.format_report(&snapshot), Dispatch::Reported),
            Err(e) => {
                warn!("Status fetch failed: {}", e);
                (self.formatter.format_no_data(), Dispatch::NoData)
            }
        };

        match messenger.send_message(chat_id, &reply).await {
            Ok(()) => outcome,
            Err(e) => {
                warn!("sendMessage to chat {} failed: {}", chat_id, e);
                Dispatch::SendFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_slash_and_mention() {
        assert_eq!(normalize_command("/fridge@SomeBotName"), "fridge");
        assert_eq!(normalize_command("/Fridge"), "fridge");
        assert_eq!(normalize_command("/FRIDGE@CastorFridgeBot "), "fridge");
    }

    #[test]
    fn plain_text_passes_through_lowercased() {
        assert_eq!(normalize_command("hello"), "hello");
        assert_eq!(normalize_command("Hello World"), "hello world");
        assert_eq!(normalize_command(""), "");
    }

    #[test]
    fn mention_inside_sentence_is_kept() {
        assert_eq!(normalize_command("ask @bob about it"), "ask @bob about it");
    }
}
