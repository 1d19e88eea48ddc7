use crate::model::enums::{AccountType, AutoFlag, AutoWithdrawFlag};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BankAccountModel {
    pub id: i64,
    pub bank_id: i64,
    pub bank_code: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    pub account_type_id: i32,
    pub device_uid: Option<String>,
    pub pin_code: Option<String>,
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
    pub deleted_at: Option<NaiveDateTime>,
}

impl BankAccountModel {
    pub fn account_type(&self) -> Option<AccountType> {
        AccountType::from_id(self.account_type_id)
    }

    pub fn is_automated(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.device_uid) && filled(&self.pin_code)
    }

    pub fn auto_credit(&self) -> bool {
        self.auto_credit_flag == AutoFlag::Auto.as_str()
    }

    pub fn auto_withdraw(&self) -> AutoWithdrawFlag {
        self.auto_withdraw_flag
            .parse()
            .unwrap_or(AutoWithdrawFlag::Manual)
    }

    pub fn auto_withdraw_credit(&self) -> bool {
        self.auto_withdraw_credit_flag == AutoFlag::Auto.as_str()
    }

    pub fn auto_withdraw_confirm(&self) -> bool {
        self.auto_withdraw_confirm_flag == AutoFlag::Auto.as_str()
    }
}
