use crate::domain::requests::pagination::{default_limit, default_page};
use crate::model::MemberStatementType;
use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreditChange {
    #[validate(range(min = 1, message = "user is required"))]
    pub user_id: i64,

    #[validate(range(exclusive_min = 0.0, message = "amount must be greater than zero"))]
    pub amount: f64,

    pub statement_type: MemberStatementType,

    #[validate(length(min = 1, message = "info is required"))]
    pub info: String,

    pub transfer_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FindMemberStatements {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be positive"))]
    pub page: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 0, message = "limit must not be negative"))]
    pub limit: i64,

    pub sort_asc: Option<bool>,
    pub statement_type: Option<MemberStatementType>,
    pub from_date: Option<NaiveDateTime>,
    pub to_date: Option<NaiveDateTime>,
}
