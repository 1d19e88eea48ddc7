use crate::model::{MemberStatementModel, MemberTransactionSummaryModel, UserModel};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: i64,
    pub member_code: Option<String>,
    pub username: Option<String>,
    pub fullname: Option<String>,
    pub phone: String,
    pub bank_code: Option<String>,
    pub bank_account: Option<String>,
    pub credit: f64,
    pub status: String,
}

impl From<UserModel> for MemberResponse {
    fn from(value: UserModel) -> Self {
        Self {
            id: value.id,
            member_code: value.member_code,
            username: value.username,
            fullname: value.fullname,
            phone: value.phone,
            bank_code: value.bank_code,
            bank_account: value.bank_account,
            credit: value.credit,
            status: value.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberStatementResponse {
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

impl From<MemberStatementModel> for MemberStatementResponse {
    fn from(value: MemberStatementModel) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            statement_type: value.statement_type,
            transfer_at: value.transfer_at,
            info: value.info,
            before_balance: value.before_balance,
            amount: value.amount,
            after_balance: value.after_balance,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberSummaryResponse {
    pub user_id: i64,
    pub credit: f64,
    pub deposit_count: i64,
    pub deposit_amount: f64,
    pub withdraw_count: i64,
    pub withdraw_amount: f64,
    pub bonus_count: i64,
    pub bonus_amount: f64,
    pub getcreditback_count: i64,
    pub getcreditback_amount: f64,
}

impl MemberSummaryResponse {
    pub fn new(credit: f64, summary: MemberTransactionSummaryModel) -> Self {
        Self {
            user_id: summary.user_id,
            credit,
            deposit_count: summary.deposit_count,
            deposit_amount: summary.deposit_amount,
            withdraw_count: summary.withdraw_count,
            withdraw_amount: summary.withdraw_amount,
            bonus_count: summary.bonus_count,
            bonus_amount: summary.bonus_amount,
            getcreditback_count: summary.getcreditback_count,
            getcreditback_amount: summary.getcreditback_amount,
        }
    }
}
