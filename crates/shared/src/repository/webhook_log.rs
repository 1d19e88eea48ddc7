use crate::{
    abstract_trait::webhook_log::repository::WebhookLogRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::{WebhookLogModel, WebhookLogStatus},
    repository::db_error,
    utils::local_now,
};
use async_trait::async_trait;
use serde_json::json;

pub struct WebhookLogRepository {
    db: ConnectionPool,
}

impl WebhookLogRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn finish(
        &self,
        id: i64,
        status: WebhookLogStatus,
        payload: &serde_json::Value,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE webhook_logs SET status = $2, json_payload = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(payload)
        .bind(local_now())
        .execute(&self.db)
        .await
        .map_err(db_error("finish webhook log"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl WebhookLogRepositoryTrait for WebhookLogRepository {
    async fn create(
        &self,
        log_type: &str,
        json_request: &serde_json::Value,
    ) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO webhook_logs (log_type, json_request, status, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(log_type)
        .bind(json_request)
        .bind(WebhookLogStatus::Pending.as_str())
        .bind(local_now())
        .fetch_one(&self.db)
        .await
        .map_err(db_error("create webhook log"))
    }

    async fn set_success(
        &self,
        id: i64,
        json_payload: &serde_json::Value,
    ) -> Result<(), RepositoryError> {
        self.finish(id, WebhookLogStatus::Success, json_payload).await
    }

    async fn set_failed(&self, id: i64, reason: &str) -> Result<(), RepositoryError> {
        self.finish(id, WebhookLogStatus::Failed, &json!({ "error": reason }))
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<WebhookLogModel, RepositoryError> {
        sqlx::query_as::<_, WebhookLogModel>("SELECT * FROM webhook_logs WHERE id = $1")
            .bind(id)
            .fetch_one(&self.db)
            .await
            .map_err(db_error("find webhook log"))
    }
}
