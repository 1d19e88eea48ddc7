use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayAccountRequest {
    pub account_no: String,
    pub account_name: String,
    pub bank_code: String,
    pub device_id: String,
    pub pin: String,
    pub webhook_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEnableRequest {
    pub enable: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayStatementQuery {
    pub account_no: String,
    pub page: i64,
    pub size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub of_date_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayVerifyTransferRequest {
    pub account_from: String,
    pub account_to: String,
    pub bank_code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayTransferRequest {
    pub account_from: String,
    pub account_to: String,
    pub amount: f64,
    pub bank_code: String,
    pub pin: String,
}
