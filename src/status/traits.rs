use crate::model::{StatusError, StatusSnapshot};

#[async_trait::async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> Result<StatusSnapshot, StatusError>;
}
