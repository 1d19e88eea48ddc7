use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BankModel {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub icon_url: Option<String>,
    pub type_flag: String,
}
