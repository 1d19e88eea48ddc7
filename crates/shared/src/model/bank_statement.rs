use crate::model::enums::{StatementStatus, StatementType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BankStatementModel {
    pub id: i64,
    pub account_id: i64,
    pub external_id: i64,
    pub detail: String,
    pub statement_type: String,
    pub amount: f64,
    pub transfer_at: NaiveDateTime,
    pub from_bank_id: Option<i64>,
    pub from_account_number: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl BankStatementModel {
    pub fn status(&self) -> Option<StatementStatus> {
        self.status.parse().ok()
    }

    pub fn statement_type(&self) -> Option<StatementType> {
        self.statement_type.parse().ok()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct StatementSummaryModel {
    pub total_pending: i64,
    pub total_confirmed: i64,
    pub total_ignored: i64,
    pub sum_transfer_in: f64,
    pub sum_transfer_out: f64,
}
