use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatementActionModel {
    pub id: i64,
    pub statement_id: i64,
    pub user_id: Option<i64>,
    pub action_type: String,
    pub json_before: serde_json::Value,
    pub confirmed_at: NaiveDateTime,
    pub confirmed_by_user_id: i64,
    pub confirmed_by_username: String,
}
