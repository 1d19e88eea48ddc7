use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WebhookLogModel {
    pub id: i64,
    pub log_type: String,
    pub json_request: serde_json::Value,
    pub json_payload: Option<serde_json::Value>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}
