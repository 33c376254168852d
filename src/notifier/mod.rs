pub mod telegram;
pub mod traits;

pub use telegram::TelegramClient;
