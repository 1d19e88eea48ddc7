use crate::{errors::RepositoryError, model::WebhookLogModel};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynWebhookLogRepository = Arc<dyn WebhookLogRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait WebhookLogRepositoryTrait {
    async fn create(
        &self,
        log_type: &str,
        json_request: &serde_json::Value,
    ) -> Result<i64, RepositoryError>;

    async fn set_success(
        &self,
        id: i64,
        json_payload: &serde_json::Value,
    ) -> Result<(), RepositoryError>;

    async fn set_failed(&self, id: i64, reason: &str) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<WebhookLogModel, RepositoryError>;
}
