use crate::model::{StatusError, StatusSnapshot};
use crate::status::traits::StatusSource;

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Unauthenticated client for the fridge status endpoint.
pub struct StatusClient {
    client: Client,
    url: String,
}

impl StatusClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, StatusError> {
        let client = Client::builder()
            .user_agent(concat!("fridgebot/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait::async_trait]
impl StatusSource for StatusClient {
    async fn fetch_status(&self) -> Result<StatusSnapshot, StatusError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!("Status reply: {}", body);
        let snapshot: StatusSnapshot = serde_json::from_str(&body)
            .map_err(|e| StatusError::Parse(format!("{}: {}", e, body)))?;

        if !snapshot.updated.is_finite() {
            return Err(StatusError::Parse(format!("bad timestamp in {}", body)));
        }

        Ok(snapshot)
    }
}
