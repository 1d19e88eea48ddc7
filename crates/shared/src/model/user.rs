use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub member_code: Option<String>,
    pub username: Option<String>,
    pub phone: String,
    pub fullname: Option<String>,
    pub bank_code: Option<String>,
    pub bank_account: Option<String>,
    pub true_wallet: Option<String>,
    pub status: String,
    pub credit: f64,
    pub verified_at: Option<NaiveDateTime>,
    pub is_reset_password: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}
