use crate::{
    abstract_trait::{
        bank_gateway::BankGatewayClientTrait, webhook_log::repository::DynWebhookLogRepository,
    },
    config::AccountingConfig,
    domain::{
        requests::{
            GatewayAccountRequest, GatewayEnableRequest, GatewayStatementQuery,
            GatewayTransferRequest, GatewayVerifyTransferRequest,
        },
        responses::{
            GatewayAccountCreated, GatewayBalance, GatewayBotAccount, GatewayBotStatus,
            GatewayEnvelope, GatewayStatementPage, GatewayTransferResult, GatewayVerifyResult,
        },
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{error, info, warn};

const API_KEY_HEADER: &str = "apiKey";

/// HTTP client for the bank-automation provider.
///
/// Every call is journaled in the webhook log as `bank_gateway.<method>`;
/// a failure to write the journal never fails the call itself.
pub struct BankGatewayClient {
    http: Client,
    base_url: Url,
    api_key: String,
    webhook_log: DynWebhookLogRepository,
}

impl BankGatewayClient {
    pub fn new(
        config: &AccountingConfig,
        webhook_log: DynWebhookLogRepository,
    ) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| ServiceError::ExternalApi(format!("bank gateway client: {e}")))?;

        let base_url = Url::parse(&config.api_endpoint).map_err(|e| {
            ServiceError::ExternalApi(format!("bank gateway endpoint {}: {e}", config.api_endpoint))
        })?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            webhook_log,
        })
    }

    async fn open_log(&self, op: &str, request: &Value) -> Option<i64> {
        match self
            .webhook_log
            .create(&format!("bank_gateway.{op}"), request)
            .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("could not journal bank gateway call {op}: {e}");
                None
            }
        }
    }

    async fn close_log(&self, log_id: Option<i64>, outcome: Result<&Value, &ServiceError>) {
        let Some(id) = log_id else {
            return;
        };

        let written = match outcome {
            Ok(payload) => self.webhook_log.set_success(id, payload).await,
            Err(e) => self.webhook_log.set_failed(id, &e.to_string()).await,
        };

        if let Err(e) = written {
            warn!("could not finish webhook log {id}: {e}");
        }
    }

    /// Endpoint URL with each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::ExternalApi("bank gateway endpoint cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value, ServiceError> {
        let mut request = self
            .http
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::ExternalApi(format!("bank gateway unreachable: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::ExternalApi(format!("bank gateway read failed: {e}")))?;

        let raw = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text))
        };

        if !status.is_success() {
            let reason = serde_json::from_value::<GatewayEnvelope<Value>>(raw)
                .ok()
                .and_then(|envelope| envelope.reason())
                .unwrap_or_else(|| format!("bank gateway returned {status}"));
            return Err(ServiceError::ExternalApi(reason));
        }

        Ok(raw)
    }

    /// Performs one journaled call and unwraps the `data` member of the reply.
    async fn call<T: DeserializeOwned>(
        &self,
        op: &str,
        method: Method,
        segments: &[&str],
        body: Option<Value>,
    ) -> Result<Option<T>, ServiceError> {
        let url = self.url(segments)?;
        let log_id = self
            .open_log(op, &json!({ "method": method.as_str(), "path": url.path(), "body": body }))
            .await;

        let result = self.send(method, url, body.as_ref()).await.and_then(|raw| {
            let envelope = serde_json::from_value::<GatewayEnvelope<T>>(raw.clone())
                .map_err(|e| ServiceError::ExternalApi(format!("unexpected {op} reply: {e}")))?;

            if envelope.data.is_none() {
                if let Some(reason) = envelope.error.clone() {
                    return Err(ServiceError::ExternalApi(reason));
                }
            }

            Ok((raw, envelope.data))
        });

        match result {
            Ok((raw, data)) => {
                self.close_log(log_id, Ok(&raw)).await;
                Ok(data)
            }
            Err(e) => {
                error!("❌ bank gateway {op} failed: {e}");
                self.close_log(log_id, Err(&e)).await;
                Err(e)
            }
        }
    }

    async fn call_data<T: DeserializeOwned>(
        &self,
        op: &str,
        method: Method,
        segments: &[&str],
        body: Option<Value>,
    ) -> Result<T, ServiceError> {
        self.call(op, method, segments, body)
            .await?
            .ok_or_else(|| ServiceError::ExternalApi(format!("{op} returned no data")))
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<Value, ServiceError> {
    serde_json::to_value(body).map_err(|e| ServiceError::ExternalApi(format!("encode request: {e}")))
}

#[async_trait]
impl BankGatewayClientTrait for BankGatewayClient {
    async fn list_bot_accounts(&self) -> Result<Vec<GatewayBotAccount>, ServiceError> {
        Ok(self
            .call("list_bot_accounts", Method::GET, &["bank-accounts"], None)
            .await?
            .unwrap_or_default())
    }

    async fn get_balance(&self, account_number: &str) -> Result<GatewayBalance, ServiceError> {
        self.call_data(
            "get_balance",
            Method::GET,
            &["bank-accounts", account_number, "balance"],
            None,
        )
        .await
    }

    async fn get_status(&self, account_number: &str) -> Result<GatewayBotStatus, ServiceError> {
        self.call_data(
            "get_status",
            Method::GET,
            &["bank-accounts", account_number, "status"],
            None,
        )
        .await
    }

    async fn list_statements(
        &self,
        query: &GatewayStatementQuery,
    ) -> Result<GatewayStatementPage, ServiceError> {
        let page = self
            .call(
                "list_statements",
                Method::POST,
                &["statements", "list"],
                Some(to_body(query)?),
            )
            .await?;

        Ok(page.unwrap_or(GatewayStatementPage {
            list: Vec::new(),
            total: 0,
        }))
    }

    async fn create_bot_account(
        &self,
        req: &GatewayAccountRequest,
    ) -> Result<GatewayAccountCreated, ServiceError> {
        let created: GatewayAccountCreated = self
            .call_data(
                "create_bot_account",
                Method::POST,
                &["bank-accounts"],
                Some(to_body(req)?),
            )
            .await?;

        info!("✅ Registered {} at bank gateway as {}", req.account_no, created.id);

        Ok(created)
    }

    async fn update_bot_account(
        &self,
        external_id: i64,
        req: &GatewayAccountRequest,
    ) -> Result<GatewayAccountCreated, ServiceError> {
        self.call_data(
            "update_bot_account",
            Method::PUT,
            &["bank-accounts", external_id.to_string().as_str()],
            Some(to_body(req)?),
        )
        .await
    }

    async fn delete_bot_account(&self, account_number: &str) -> Result<(), ServiceError> {
        self.call::<Value>(
            "delete_bot_account",
            Method::DELETE,
            &["bank-accounts", account_number],
            None,
        )
        .await?;

        Ok(())
    }

    async fn enable_bot_account(
        &self,
        account_number: &str,
        enable: bool,
    ) -> Result<(), ServiceError> {
        self.call::<Value>(
            "enable_bot_account",
            Method::PUT,
            &["bank-accounts", account_number, "enable"],
            Some(to_body(&GatewayEnableRequest { enable })?),
        )
        .await?;

        Ok(())
    }

    async fn verify_transfer(
        &self,
        req: &GatewayVerifyTransferRequest,
    ) -> Result<GatewayVerifyResult, ServiceError> {
        self.call_data(
            "verify_transfer",
            Method::POST,
            &["transfers", "verify"],
            Some(to_body(req)?),
        )
        .await
    }

    async fn transfer(
        &self,
        req: &GatewayTransferRequest,
    ) -> Result<GatewayTransferResult, ServiceError> {
        let result = self
            .call::<GatewayTransferResult>(
                "transfer",
                Method::POST,
                &["transfers"],
                Some(to_body(req)?),
            )
            .await?
            .unwrap_or(GatewayTransferResult {
                reference: None,
                status: None,
            });

        info!(
            "✅ Transferred {} from {} to {} ({:?})",
            req.amount, req.account_from, req.account_to, result.reference
        );

        Ok(result)
    }
}
