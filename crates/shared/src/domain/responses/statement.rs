use crate::model::{BankStatementModel, StatementSummaryModel};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BankStatementResponse {
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
}

impl From<BankStatementModel> for BankStatementResponse {
    fn from(value: BankStatementModel) -> Self {
        Self {
            id: value.id,
            account_id: value.account_id,
            external_id: value.external_id,
            detail: value.detail,
            statement_type: value.statement_type,
            amount: value.amount,
            transfer_at: value.transfer_at,
            from_bank_id: value.from_bank_id,
            from_account_number: value.from_account_number,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementSummaryResponse {
    pub total_pending: i64,
    pub total_confirmed: i64,
    pub total_ignored: i64,
    pub sum_transfer_in: f64,
    pub sum_transfer_out: f64,
}

impl From<StatementSummaryModel> for StatementSummaryResponse {
    fn from(value: StatementSummaryModel) -> Self {
        Self {
            total_pending: value.total_pending,
            total_confirmed: value.total_confirmed,
            total_ignored: value.total_ignored,
            sum_transfer_in: value.sum_transfer_in,
            sum_transfer_out: value.sum_transfer_out,
        }
    }
}

/// Statement pulled from the gateway; `status` is `new` when not yet stored.
#[derive(Debug, Clone, Serialize)]
pub struct AccountStatementResponse {
    pub external_id: i64,
    pub statement_type: Option<String>,
    pub txn_code: String,
    pub amount: f64,
    pub info: String,
    pub transfer_at: Option<NaiveDateTime>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookResultResponse {
    pub webhook_log_id: i64,
    pub processed: usize,
    pub duplicates: usize,
    pub failed: usize,
}
