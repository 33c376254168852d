// Core structs: StatusSnapshot, InboundUpdate, PollOutcome and error types
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// One fetched instance of product availability. Never cached.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusSnapshot {
    /// Unix time of the last switch update, with sub-second precision.
    pub updated: f64,
    /// Product name -> availability. Ordered by name.
    pub products: BTreeMap<String, bool>,
}

/// Bot token read from local storage. Redacted in `Debug`.
#[derive(Clone, PartialEq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// A single message event taken from a getUpdates batch.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundUpdate {
    pub update_id: i64,
    pub chat_id: Option<i64>,
    pub text: Option<String>,
    /// Untouched payload, kept for anomaly logging.
    pub raw: serde_json::Value,
}

/// Result of a getUpdates call that reached the API and returned JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Updates(Vec<InboundUpdate>),
    Rejected {
        code: Option<i64>,
        description: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("status request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("status endpoint answered with HTTP {0}")]
    Status(u16),
    #[error("malformed status reply: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    #[error("telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed telegram reply: {0}")]
    Parse(String),
    #[error("telegram rejected the request (code {code:?}): {description}")]
    Rejected {
        code: Option<i64>,
        description: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("credential file {0} is empty")]
    EmptyCredential(String),
}
