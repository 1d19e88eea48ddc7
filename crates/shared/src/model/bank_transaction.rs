use crate::model::enums::{TransactionStatus, TransferType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BankTransactionModel {
    pub id: i64,
    pub user_id: i64,
    pub member_code: String,
    pub transfer_type: String,
    pub credit_amount: f64,
    pub bonus_amount: f64,
    pub bank_charge_amount: f64,
    pub paid_amount: f64,
    pub over_amount: f64,
    pub before_amount: f64,
    pub after_amount: f64,
    pub from_account_id: Option<i64>,
    pub from_bank_id: Option<i64>,
    pub from_account_name: Option<String>,
    pub from_account_number: Option<String>,
    pub to_account_id: Option<i64>,
    pub to_bank_id: Option<i64>,
    pub to_account_name: Option<String>,
    pub to_account_number: Option<String>,
    pub statement_id: Option<i64>,
    pub slip_url: Option<String>,
    pub cancel_remark: Option<String>,
    pub status: String,
    pub is_auto_credit: bool,
    pub transfer_at: Option<NaiveDateTime>,
    pub created_by_user_id: i64,
    pub created_by_username: String,
    pub confirmed_at: Option<NaiveDateTime>,
    pub confirmed_by_user_id: Option<i64>,
    pub confirmed_by_username: Option<String>,
    pub canceled_at: Option<NaiveDateTime>,
    pub canceled_by_user_id: Option<i64>,
    pub canceled_by_username: Option<String>,
    pub removed_at: Option<NaiveDateTime>,
    pub removed_by_user_id: Option<i64>,
    pub removed_by_username: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl BankTransactionModel {
    pub fn status(&self) -> Option<TransactionStatus> {
        self.status.parse().ok()
    }

    pub fn transfer_type(&self) -> Option<TransferType> {
        self.transfer_type.parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TransactionStatusCountModel {
    pub status: String,
    pub total: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct MemberTransactionSummaryModel {
    pub user_id: i64,
    pub deposit_count: i64,
    pub deposit_amount: f64,
    pub withdraw_count: i64,
    pub withdraw_amount: f64,
    pub bonus_count: i64,
    pub bonus_amount: f64,
    pub getcreditback_count: i64,
    pub getcreditback_amount: f64,
}
