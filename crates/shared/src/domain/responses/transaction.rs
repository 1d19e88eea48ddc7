use crate::model::{BankTransactionModel, TransactionActionModel, TransactionStatus};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BankTransactionResponse {
    pub id: i64,
    pub user_id: i64,
    pub member_code: String,
    pub transfer_type: String,
    pub credit_amount: f64,
    pub bonus_amount: f64,
    pub bank_charge_amount: f64,
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
    pub created_by_username: String,
    pub confirmed_at: Option<NaiveDateTime>,
    pub confirmed_by_username: Option<String>,
    pub canceled_at: Option<NaiveDateTime>,
    pub canceled_by_username: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<BankTransactionModel> for BankTransactionResponse {
    fn from(value: BankTransactionModel) -> Self {
        let status = value
            .status
            .parse::<TransactionStatus>()
            .map(|s| s.ui_label().to_string())
            .unwrap_or(value.status);

        Self {
            id: value.id,
            user_id: value.user_id,
            member_code: value.member_code,
            transfer_type: value.transfer_type,
            credit_amount: value.credit_amount,
            bonus_amount: value.bonus_amount,
            bank_charge_amount: value.bank_charge_amount,
            before_amount: value.before_amount,
            after_amount: value.after_amount,
            from_account_id: value.from_account_id,
            from_bank_id: value.from_bank_id,
            from_account_name: value.from_account_name,
            from_account_number: value.from_account_number,
            to_account_id: value.to_account_id,
            to_bank_id: value.to_bank_id,
            to_account_name: value.to_account_name,
            to_account_number: value.to_account_number,
            statement_id: value.statement_id,
            slip_url: value.slip_url,
            cancel_remark: value.cancel_remark,
            status,
            is_auto_credit: value.is_auto_credit,
            transfer_at: value.transfer_at,
            created_by_username: value.created_by_username,
            confirmed_at: value.confirmed_at,
            confirmed_by_username: value.confirmed_by_username,
            canceled_at: value.canceled_at,
            canceled_by_username: value.canceled_by_username,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionActionResponse {
    pub id: i64,
    pub action_key: String,
    pub credit_amount: f64,
    pub bonus_amount: f64,
    pub confirmed_at: NaiveDateTime,
    pub confirmed_by_username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<NaiveDateTime>,
    pub rolled_back: bool,
}

impl From<TransactionActionModel> for TransactionActionResponse {
    fn from(value: TransactionActionModel) -> Self {
        Self {
            id: value.id,
            action_key: value.action_key,
            credit_amount: value.credit_amount,
            bonus_amount: value.bonus_amount,
            confirmed_at: value.confirmed_at,
            confirmed_by_username: value.confirmed_by_username,
            paid_at: value.paid_at,
            rolled_back: value.deleted_at.is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionDetailResponse {
    pub transaction: BankTransactionResponse,
    pub actions: Vec<TransactionActionResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCountResponse {
    pub pending: i64,
    pub pending_credit: i64,
    pub pending_transfer: i64,
    pub finished: i64,
    pub failed: i64,
}
