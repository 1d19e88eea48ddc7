use crate::domain::requests::{
    actor::Actor,
    bank_account::AccountBinding,
    pagination::{default_limit, default_page},
};
use crate::errors::RepositoryError;
use crate::model::{BankTransactionModel, MemberStatementType, TransactionStatus, TransferType};
use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBankTransactionRequest {
    #[validate(length(min = 1, message = "member code is required"))]
    pub member_code: String,

    pub transfer_type: TransferType,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "credit amount must not be negative"))]
    pub credit_amount: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "bonus amount must not be negative"))]
    pub bonus_amount: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "bank charge must not be negative"))]
    pub bank_charge_amount: f64,

    pub from_account_id: Option<i64>,
    pub to_account_id: Option<i64>,
    pub transfer_at: Option<NaiveDateTime>,
    pub slip_url: Option<String>,

    #[serde(default)]
    pub is_auto_credit: bool,

    #[serde(skip)]
    pub statement_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ConfirmDepositRequest {
    pub transfer_at: Option<NaiveDateTime>,
    pub slip_url: Option<String>,

    #[validate(range(min = 0.0, message = "bonus amount must not be negative"))]
    pub bonus_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ConfirmWithdrawRequest {
    pub from_account_id: Option<i64>,
    pub transfer_at: Option<NaiveDateTime>,

    #[validate(range(min = 0.0, message = "bank charge must not be negative"))]
    pub bank_charge_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CancelTransactionRequest {
    #[validate(length(max = 500, message = "cancel remark is too long"))]
    pub cancel_remark: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FindAllTransactions {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be positive"))]
    pub page: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 0, message = "limit must not be negative"))]
    pub limit: i64,

    pub sort_col: Option<String>,
    pub sort_asc: Option<bool>,
    pub search: Option<String>,
    pub from_date: Option<NaiveDateTime>,
    pub to_date: Option<NaiveDateTime>,
    pub transfer_type: Option<TransferType>,
    pub status: Option<TransactionStatus>,
    pub user_id: Option<i64>,
    pub account_id: Option<i64>,
}

impl FindAllTransactions {
    pub const SORT_COLUMNS: &'static [&'static str] = &[
        "id",
        "created_at",
        "transfer_at",
        "credit_amount",
        "member_code",
        "status",
    ];
}

/// Row inserted when a transaction is created.
#[derive(Debug, Clone)]
pub struct NewBankTransaction {
    pub user_id: i64,
    pub member_code: String,
    pub transfer_type: TransferType,
    pub credit_amount: f64,
    pub bonus_amount: f64,
    pub bank_charge_amount: f64,
    pub from_account: Option<AccountBinding>,
    pub to_account: Option<AccountBinding>,
    pub statement_id: Option<i64>,
    pub slip_url: Option<String>,
    pub status: TransactionStatus,
    pub is_auto_credit: bool,
    pub transfer_at: Option<NaiveDateTime>,
    pub created_by: Actor,
}

#[derive(Debug, Clone)]
pub struct NewTransactionAction {
    pub action_key: String,
    pub transaction_id: i64,
    pub user_id: i64,
    pub transfer_type: TransferType,
    pub from_account_id: Option<i64>,
    pub to_account_id: Option<i64>,
    pub json_before: serde_json::Value,
    pub transfer_at: Option<NaiveDateTime>,
    pub credit_amount: f64,
    pub bonus_amount: f64,
    pub bank_charge_amount: f64,
    pub slip_url: Option<String>,
    pub confirmed_by: Actor,
}

/// One signed change of a member's credit; `amount` is the magnitude.
#[derive(Debug, Clone)]
pub struct CreditMove {
    pub user_id: i64,
    pub amount: f64,
    pub statement_type: MemberStatementType,
    pub info: String,
    pub transfer_at: NaiveDateTime,
}

/// Applied in one storage transaction: credit moves, then the guarded status update.
#[derive(Debug, Clone)]
pub struct TransactionStep {
    pub transaction_id: i64,
    pub expected_status: TransactionStatus,
    pub next_status: TransactionStatus,
    pub credit_moves: Vec<CreditMove>,
    pub confirmed_by: Option<Actor>,
    pub canceled_by: Option<Actor>,
    pub cancel_remark: Option<String>,
    pub transfer_at: Option<NaiveDateTime>,
    pub slip_url: Option<String>,
    pub bonus_amount: Option<f64>,
    pub bank_charge_amount: Option<f64>,
    pub from_account: Option<AccountBinding>,
}

impl TransactionStep {
    pub fn new(
        transaction_id: i64,
        expected_status: TransactionStatus,
        next_status: TransactionStatus,
    ) -> Self {
        Self {
            transaction_id,
            expected_status,
            next_status,
            credit_moves: Vec::new(),
            confirmed_by: None,
            canceled_by: None,
            cancel_remark: None,
            transfer_at: None,
            slip_url: None,
            bonus_amount: None,
            bank_charge_amount: None,
            from_account: None,
        }
    }
}

impl TransactionStep {
    pub fn check(&self, current: &BankTransactionModel) -> Result<(), RepositoryError> {
        if current.status != self.expected_status.as_str() {
            return Err(RepositoryError::Conflict(format!(
                "transaction {} is {}, expected {}",
                current.id, current.status, self.expected_status
            )));
        }
        Ok(())
    }

    /// Row as it must look after the step; `balances` is (before, after) of the ledger moves.
    pub fn apply_to(
        &self,
        current: &BankTransactionModel,
        balances: Option<(f64, f64)>,
        now: NaiveDateTime,
    ) -> BankTransactionModel {
        let mut next = current.clone();
        next.status = self.next_status.as_str().to_string();
        next.updated_at = Some(now);

        if let Some((before, after)) = balances {
            next.before_amount = before;
            next.after_amount = after;
        }

        if let Some(actor) = &self.confirmed_by {
            next.confirmed_at = Some(now);
            next.confirmed_by_user_id = Some(actor.id);
            next.confirmed_by_username = Some(actor.username.clone());
        }

        if let Some(actor) = &self.canceled_by {
            next.canceled_at = Some(now);
            next.canceled_by_user_id = Some(actor.id);
            next.canceled_by_username = Some(actor.username.clone());
            if self.cancel_remark.is_some() {
                next.cancel_remark = self.cancel_remark.clone();
            }
        }

        if let Some(transfer_at) = self.transfer_at {
            next.transfer_at = Some(transfer_at);
        }
        if let Some(slip_url) = &self.slip_url {
            next.slip_url = Some(slip_url.clone());
        }
        if let Some(bonus) = self.bonus_amount {
            next.bonus_amount = bonus;
        }
        if let Some(charge) = self.bank_charge_amount {
            next.bank_charge_amount = charge;
        }
        if let Some(account) = &self.from_account {
            next.from_account_id = account.account_id;
            next.from_bank_id = account.bank_id;
            next.from_account_name = account.account_name.clone();
            next.from_account_number = account.account_number.clone();
        }

        next
    }
}
