use crate::domain::requests::{
    actor::Actor,
    pagination::{default_limit, default_page},
};
use crate::model::{StatementActionType, StatementStatus, StatementType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body the bank gateway posts to the action webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookActionRequest {
    #[serde(default)]
    pub action: Option<String>,

    #[serde(default, alias = "statements")]
    pub new_statement_list: Vec<ExternalStatement>,
}

/// A statement row as the bank gateway reports it; `amount` is unsigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalStatement {
    pub id: i64,

    #[serde(alias = "bankAccountId")]
    pub external_account_id: i64,

    pub amount: f64,
    pub txn_code: String,

    #[serde(default)]
    pub txn_description: String,

    #[serde(default)]
    pub info: String,

    pub date_time: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FindAllStatements {
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
    pub account_id: Option<i64>,
    pub statement_type: Option<StatementType>,
    pub status: Option<StatementStatus>,
}

impl FindAllStatements {
    pub const SORT_COLUMNS: &'static [&'static str] =
        &["id", "transfer_at", "amount", "created_at", "status"];
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GetAccountStatements {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be positive"))]
    pub page: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 200, message = "limit must be between 1 and 200"))]
    pub limit: i64,

    pub of_date_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MatchStatementOwnerRequest {
    #[validate(range(min = 1, message = "user is required"))]
    pub user_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewBankStatement {
    pub account_id: i64,
    pub external_id: i64,
    pub detail: String,
    pub statement_type: StatementType,
    pub amount: f64,
    pub transfer_at: NaiveDateTime,
    pub from_bank_id: Option<i64>,
    pub from_account_number: Option<String>,
}

/// Moves a pending statement to a terminal status and journals the action.
#[derive(Debug, Clone)]
pub struct StatementTransition {
    pub statement_id: i64,
    pub next_status: StatementStatus,
    pub action_type: StatementActionType,
    pub user_id: Option<i64>,
    pub actor: Actor,
}
