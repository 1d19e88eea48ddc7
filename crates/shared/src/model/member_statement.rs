use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MemberStatementModel {
    pub id: i64,
    pub user_id: i64,
    pub statement_type: String,
    pub transfer_at: NaiveDateTime,
    pub info: String,
    pub before_balance: f64,
    pub amount: f64,
    pub after_balance: f64,
    pub created_at: NaiveDateTime,
}
