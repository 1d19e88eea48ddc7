use crate::domain::requests::ExternalStatement;
use serde::Deserialize;

/// Outer shape of every bank gateway reply.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayEnvelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> GatewayEnvelope<T> {
    pub fn reason(&self) -> Option<String> {
        self.error.clone().or_else(|| self.message.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayBotAccount {
    pub id: i64,
    pub account_no: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub bank_code: String,
    #[serde(default)]
    pub enable: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayAccountCreated {
    pub id: i64,
    #[serde(default)]
    pub encrypted_pin: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayBalance {
    pub account_no: String,
    pub balance: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayBotStatus {
    pub account_no: String,
    pub status: String,
}

impl GatewayBotStatus {
    pub fn is_online(&self) -> bool {
        matches!(
            self.status.to_ascii_lowercase().as_str(),
            "online" | "active" | "connected"
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayStatementPage {
    #[serde(default)]
    pub list: Vec<ExternalStatement>,
    #[serde(default)]
    pub total: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayVerifyResult {
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub account_no: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayTransferResult {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
