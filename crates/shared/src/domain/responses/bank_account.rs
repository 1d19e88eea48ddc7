use crate::model::{BankAccountModel, BankModel};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BankResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub icon_url: Option<String>,
    pub type_flag: String,
}

impl From<BankModel> for BankResponse {
    fn from(value: BankModel) -> Self {
        Self {
            id: value.id,
            name: value.name,
            code: value.code,
            icon_url: value.icon_url,
            type_flag: value.type_flag,
        }
    }
}

/// The pin and device identifiers never leave the service.
#[derive(Debug, Clone, Serialize)]
pub struct BankAccountResponse {
    pub id: i64,
    pub bank_id: i64,
    pub bank_code: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    pub account_type_id: i32,
    pub is_automated: bool,
    pub external_id: Option<i64>,
    pub connection_status: String,
    pub last_conn_update_at: Option<NaiveDateTime>,
    pub account_balance: f64,
    pub auto_credit_flag: String,
    pub auto_withdraw_flag: String,
    pub auto_withdraw_credit_flag: String,
    pub auto_withdraw_confirm_flag: String,
    pub is_main_withdraw: bool,
    pub auto_withdraw_max_amount: f64,
    pub auto_transfer_max_amount: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<BankAccountModel> for BankAccountResponse {
    fn from(value: BankAccountModel) -> Self {
        let is_automated = value.is_automated();
        Self {
            id: value.id,
            bank_id: value.bank_id,
            bank_code: value.bank_code,
            bank_name: value.bank_name,
            account_number: value.account_number,
            account_name: value.account_name,
            account_type_id: value.account_type_id,
            is_automated,
            external_id: value.external_id,
            connection_status: value.connection_status,
            last_conn_update_at: value.last_conn_update_at,
            account_balance: value.account_balance,
            auto_credit_flag: value.auto_credit_flag,
            auto_withdraw_flag: value.auto_withdraw_flag,
            auto_withdraw_credit_flag: value.auto_withdraw_credit_flag,
            auto_withdraw_confirm_flag: value.auto_withdraw_confirm_flag,
            is_main_withdraw: value.is_main_withdraw,
            auto_withdraw_max_amount: value.auto_withdraw_max_amount,
            auto_transfer_max_amount: value.auto_transfer_max_amount,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
