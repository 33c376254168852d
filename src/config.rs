use crate::model::{ConfigError, Credential};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

/// Which clock the "updated" line of a report is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampZone {
    #[default]
    Local,
    Utc,
}

/// Display strings used in replies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub available: String,
    pub depleted: String,
    pub updated_prefix: String,
    pub no_data: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            available: "jäljellä".to_string(),
            depleted: "loppu".to_string(),
            updated_prefix: "Päivitetty ".to_string(),
            no_data: "Ei dataa".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bot_api_base: String,
    pub status_api_url: String,
    pub credential_path: String,
    pub log_path: String,
    pub poll_offset_param: String,
    pub poll_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub retry_delay_secs: u64,
    pub parse_mode: String,
    pub command: String,
    pub timestamp_zone: TimestampZone,
    pub labels: Labels,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bot_api_base: "https://api.telegram.org/bot".to_string(),
            status_api_url: "https://fridge0.api.avaruuskerho.fi/".to_string(),
            credential_path: ".token".to_string(),
            log_path: "log.txt".to_string(),
            poll_offset_param: "offset".to_string(),
            poll_timeout_secs: 30,
            request_timeout_secs: 10,
            retry_delay_secs: 60,
            parse_mode: "Markdown".to_string(),
            command: "fridge".to_string(),
            timestamp_zone: TimestampZone::Local,
            labels: Labels::default(),
        }
    }
}

/// Loads `config.json`. A missing file falls back to the built-in defaults.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No {} found, using built-in defaults", path);
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_string(),
                source,
            });
        }
    };
    serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_string(),
        source,
    })
}

/// Reads the bot token once. Trailing whitespace and newlines are dropped.
pub fn load_credential(path: impl AsRef<Path>) -> Result<Credential, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let token = content.trim_end();
    if token.is_empty() {
        return Err(ConfigError::EmptyCredential(path.display().to_string()));
    }
    Ok(Credential::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cfg = load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.retry_delay_secs, 60);
        assert_eq!(cfg.command, "fridge");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"timestamp_zone": "utc", "labels": {{"available": "left"}}}}"#
        )
        .unwrap();

        let cfg = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.timestamp_zone, TimestampZone::Utc);
        assert_eq!(cfg.labels.available, "left");
        assert_eq!(cfg.labels.depleted, "loppu");
        assert_eq!(cfg.bot_api_base, "https://api.telegram.org/bot");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_config(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn credential_strips_trailing_whitespace() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "123:ABC \n").unwrap();
        let token = load_credential(file.path()).unwrap();
        assert_eq!(token.expose(), "123:ABC");
        assert_eq!(format!("{:?}", token), "Credential(***)");
    }

    #[test]
    fn empty_credential_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "  \n").unwrap();
        let err = load_credential(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCredential(_)));
    }
}
