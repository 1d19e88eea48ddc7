use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One journal row per attempted transition of a bank transaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TransactionActionModel {
    pub id: i64,
    pub action_key: String,
    pub transaction_id: i64,
    pub user_id: i64,
    pub transfer_type: String,
    pub from_account_id: Option<i64>,
    pub to_account_id: Option<i64>,
    pub json_before: serde_json::Value,
    pub transfer_at: Option<NaiveDateTime>,
    pub credit_amount: f64,
    pub bonus_amount: f64,
    pub bank_charge_amount: f64,
    pub slip_url: Option<String>,
    pub confirmed_at: NaiveDateTime,
    pub confirmed_by_user_id: i64,
    pub confirmed_by_username: String,
    /// Set once the gateway accepted the payout of a transfer step.
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}
