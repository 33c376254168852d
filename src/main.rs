mod config;
mod formatter;
mod logging;
mod model;
mod notifier;
mod status;

use config::load_config;
use config::load_credential;
use formatter::ReportFormatter;
use notifier::telegram::command_handler::CommandHandler;
use notifier::telegram::listener::UpdateLoop;
use notifier::TelegramClient;
use status::StatusClient;
use std::time::Duration;
use tracing::{error, info};

const CONFIG_PATH: &str = "config.json";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load configuration from file
    let config = match load_config(CONFIG_PATH) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Config load error: {}", e);
            return;
        }
    };

    // Console + log file; the guard flushes the file writer on exit
    let _log_guard = match logging::init(&config.log_path) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Cannot open log file {}: {}", config.log_path, e);
            return;
        }
    };

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    let token = match load_credential(&config.credential_path) {
        Ok(token) => token,
        Err(e) => {
            error!("Credential load error: {}", e);
            return;
        }
    };

    let status = match StatusClient::new(
        config.status_api_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build status client: {}", e);
            return;
        }
    };

    let messenger = match TelegramClient::new(token, &config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build Telegram client: {}", e);
            return;
        }
    };

    let handler = CommandHandler::new(
        config.command.clone(),
        ReportFormatter::new(config.labels.clone(), config.timestamp_zone),
    );

    info!(
        "🚀 fridgebot started, answering /{} (status: {})",
        config.command, config.status_api_url
    );
    UpdateLoop::new(
        messenger,
        status,
        handler,
        Duration::from_secs(config.retry_delay_secs),
    )
    .run()
    .await;
}
