use crate::domain::requests::pagination::{default_limit, default_page};
use crate::model::{AutoFlag, AutoWithdrawFlag, BankAccountModel, ConnectionStatus};
use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBankAccountRequest {
    #[validate(range(min = 1, message = "bank is required"))]
    pub bank_id: i64,

    #[validate(length(min = 4, max = 32, message = "account number must be 4-32 characters"))]
    pub account_number: String,

    #[validate(length(min = 1, message = "account name is required"))]
    pub account_name: String,

    #[validate(range(min = 1, max = 3, message = "account type must be 1, 2 or 3"))]
    pub account_type_id: i32,

    pub device_uid: Option<String>,
    pub pin_code: Option<String>,

    #[serde(default = "manual_flag")]
    pub auto_credit_flag: AutoFlag,
    #[serde(default = "manual_withdraw_flag")]
    pub auto_withdraw_flag: AutoWithdrawFlag,
    #[serde(default = "manual_flag")]
    pub auto_withdraw_credit_flag: AutoFlag,
    #[serde(default = "manual_flag")]
    pub auto_withdraw_confirm_flag: AutoFlag,

    #[serde(default)]
    pub is_main_withdraw: bool,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "auto withdraw max must not be negative"))]
    pub auto_withdraw_max_amount: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "auto transfer max must not be negative"))]
    pub auto_transfer_max_amount: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBankAccountRequest {
    #[serde(skip)]
    pub id: i64,

    pub bank_id: Option<i64>,

    #[validate(length(min = 4, max = 32, message = "account number must be 4-32 characters"))]
    pub account_number: Option<String>,

    #[validate(length(min = 1, message = "account name is required"))]
    pub account_name: Option<String>,

    #[validate(range(min = 1, max = 3, message = "account type must be 1, 2 or 3"))]
    pub account_type_id: Option<i32>,

    pub device_uid: Option<String>,
    pub pin_code: Option<String>,
    pub auto_credit_flag: Option<AutoFlag>,
    pub auto_withdraw_flag: Option<AutoWithdrawFlag>,
    pub auto_withdraw_credit_flag: Option<AutoFlag>,
    pub auto_withdraw_confirm_flag: Option<AutoFlag>,
    pub is_main_withdraw: Option<bool>,

    #[validate(range(min = 0.0, message = "auto withdraw max must not be negative"))]
    pub auto_withdraw_max_amount: Option<f64>,

    #[validate(range(min = 0.0, message = "auto transfer max must not be negative"))]
    pub auto_transfer_max_amount: Option<f64>,
}

impl UpdateBankAccountRequest {
    /// Merges the patch over the stored row; the result is what gets persisted.
    pub fn apply_to(&self, current: &BankAccountModel) -> NewBankAccount {
        NewBankAccount {
            bank_id: self.bank_id.unwrap_or(current.bank_id),
            account_number: self
                .account_number
                .clone()
                .unwrap_or_else(|| current.account_number.clone()),
            account_name: self
                .account_name
                .clone()
                .unwrap_or_else(|| current.account_name.clone()),
            account_type_id: self.account_type_id.unwrap_or(current.account_type_id),
            device_uid: self.device_uid.clone().or_else(|| current.device_uid.clone()),
            pin_code: self.pin_code.clone().or_else(|| current.pin_code.clone()),
            external_id: current.external_id,
            auto_credit_flag: self
                .auto_credit_flag
                .map(|f| f.as_str().to_string())
                .unwrap_or_else(|| current.auto_credit_flag.clone()),
            auto_withdraw_flag: self
                .auto_withdraw_flag
                .map(|f| f.as_str().to_string())
                .unwrap_or_else(|| current.auto_withdraw_flag.clone()),
            auto_withdraw_credit_flag: self
                .auto_withdraw_credit_flag
                .map(|f| f.as_str().to_string())
                .unwrap_or_else(|| current.auto_withdraw_credit_flag.clone()),
            auto_withdraw_confirm_flag: self
                .auto_withdraw_confirm_flag
                .map(|f| f.as_str().to_string())
                .unwrap_or_else(|| current.auto_withdraw_confirm_flag.clone()),
            is_main_withdraw: self.is_main_withdraw.unwrap_or(current.is_main_withdraw),
            auto_withdraw_max_amount: self
                .auto_withdraw_max_amount
                .unwrap_or(current.auto_withdraw_max_amount),
            auto_transfer_max_amount: self
                .auto_transfer_max_amount
                .unwrap_or(current.auto_transfer_max_amount),
        }
    }
}

/// Persisted shape of an operator account, shared by create and update.
#[derive(Debug, Clone)]
pub struct NewBankAccount {
    pub bank_id: i64,
    pub account_number: String,
    pub account_name: String,
    pub account_type_id: i32,
    pub device_uid: Option<String>,
    pub pin_code: Option<String>,
    pub external_id: Option<i64>,
    pub auto_credit_flag: String,
    pub auto_withdraw_flag: String,
    pub auto_withdraw_credit_flag: String,
    pub auto_withdraw_confirm_flag: String,
    pub is_main_withdraw: bool,
    pub auto_withdraw_max_amount: f64,
    pub auto_transfer_max_amount: f64,
}

impl From<&CreateBankAccountRequest> for NewBankAccount {
    fn from(req: &CreateBankAccountRequest) -> Self {
        Self {
            bank_id: req.bank_id,
            account_number: req.account_number.trim().to_string(),
            account_name: req.account_name.trim().to_string(),
            account_type_id: req.account_type_id,
            device_uid: req.device_uid.clone(),
            pin_code: req.pin_code.clone(),
            external_id: None,
            auto_credit_flag: req.auto_credit_flag.as_str().to_string(),
            auto_withdraw_flag: req.auto_withdraw_flag.as_str().to_string(),
            auto_withdraw_credit_flag: req.auto_withdraw_credit_flag.as_str().to_string(),
            auto_withdraw_confirm_flag: req.auto_withdraw_confirm_flag.as_str().to_string(),
            is_main_withdraw: req.is_main_withdraw,
            auto_withdraw_max_amount: req.auto_withdraw_max_amount,
            auto_transfer_max_amount: req.auto_transfer_max_amount,
        }
    }
}

impl NewBankAccount {
    pub fn is_automated(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.device_uid) && filled(&self.pin_code)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FindAllBankAccounts {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be positive"))]
    pub page: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 0, message = "limit must not be negative"))]
    pub limit: i64,

    pub sort_col: Option<String>,
    pub sort_asc: Option<bool>,
    pub search: Option<String>,
    pub account_type_id: Option<i32>,
    pub connection_status: Option<ConnectionStatus>,
}

impl FindAllBankAccounts {
    pub const SORT_COLUMNS: &'static [&'static str] =
        &["id", "account_number", "account_name", "account_balance", "created_at"];
}

#[derive(Debug, Clone)]
pub struct UpdateBotStatus {
    pub id: i64,
    pub connection_status: ConnectionStatus,
    pub account_balance: Option<f64>,
    pub last_conn_update_at: NaiveDateTime,
}

/// Denormalised account identity copied onto a transaction side.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountBinding {
    pub account_id: Option<i64>,
    pub bank_id: Option<i64>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
}

impl From<&BankAccountModel> for AccountBinding {
    fn from(account: &BankAccountModel) -> Self {
        Self {
            account_id: Some(account.id),
            bank_id: Some(account.bank_id),
            account_name: Some(account.account_name.clone()),
            account_number: Some(account.account_number.clone()),
        }
    }
}

fn manual_flag() -> AutoFlag {
    AutoFlag::Manual
}

fn manual_withdraw_flag() -> AutoWithdrawFlag {
    AutoWithdrawFlag::Manual
}
