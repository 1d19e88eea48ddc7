use crate::{
    abstract_trait::agent::AgentClientTrait,
    config::AgentConfig,
    domain::{
        requests::{AgentAuthRequest, AgentCreditRequest},
        responses::AgentResponse,
    },
    errors::ServiceError,
    utils::create_sign,
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info};

pub struct AgentClient {
    http: Client,
    base_url: String,
    agent_name: String,
    secret_key: String,
}

impl AgentClient {
    pub fn new(config: &AgentConfig) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| ServiceError::ExternalApi(format!("agent client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            agent_name: config.agent_name.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    fn auth_request(&self, username: &str, password: &str) -> AgentAuthRequest {
        let timestamp = Utc::now().timestamp();
        let payload = format!("{}{username}{password}", self.agent_name);

        AgentAuthRequest {
            agent_name: self.agent_name.clone(),
            username: username.to_string(),
            password: password.to_string(),
            timestamp,
            sign: create_sign(&self.secret_key, &payload, timestamp),
        }
    }

    fn credit_request(&self, username: &str, amount: f64) -> AgentCreditRequest {
        let timestamp = Utc::now().timestamp();
        let payload = format!("{}{username}{amount}", self.agent_name);

        AgentCreditRequest {
            agent_name: self.agent_name.clone(),
            username: username.to_string(),
            amount,
            timestamp,
            sign: create_sign(&self.secret_key, &payload, timestamp),
        }
    }

    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<AgentResponse, ServiceError> {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::ExternalApi(format!("agent unreachable: {e}")))?;

        let status = response.status();
        let parsed = response.json::<AgentResponse>().await;

        match parsed {
            Ok(body) if status.is_success() => Ok(body),
            Ok(body) => Err(ServiceError::ExternalApi(
                body.message
                    .unwrap_or_else(|| format!("agent returned {status}")),
            )),
            Err(e) => Err(ServiceError::ExternalApi(format!(
                "unexpected agent reply ({status}): {e}"
            ))),
        }
    }

    /// Fails with the provider message when the agent reports no success.
    fn require_success(op: &str, resp: AgentResponse) -> Result<AgentResponse, ServiceError> {
        if resp.success {
            Ok(resp)
        } else {
            let reason = resp
                .message
                .unwrap_or_else(|| format!("agent {op} was rejected"));
            error!("❌ agent {op} rejected: {reason}");
            Err(ServiceError::ExternalApi(reason))
        }
    }
}

#[async_trait]
impl AgentClientTrait for AgentClient {
    async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AgentResponse, ServiceError> {
        let req = self.auth_request(username, password);
        let resp = self.post("/credit-auth/xregister", &req).await?;
        Self::require_success("register", resp)
    }

    async fn login(&self, username: &str, password: &str) -> Result<AgentResponse, ServiceError> {
        let req = self.auth_request(username, password);
        let resp = self.post("/credit-auth/login", &req).await?;
        info!("agent login for {username}: {resp:?}");
        Ok(resp)
    }

    async fn change_password(
        &self,
        username: &str,
        new_password: &str,
    ) -> Result<AgentResponse, ServiceError> {
        let req = self.auth_request(username, new_password);
        let resp = self.post("/credit-auth/changepassword", &req).await?;
        info!("agent change password for {username}: {resp:?}");
        Ok(resp)
    }

    async fn deposit(&self, username: &str, amount: f64) -> Result<AgentResponse, ServiceError> {
        let req = self.credit_request(username, amount);
        let resp = self.post("/credit-transfer/deposit", &req).await?;
        Self::require_success("deposit", resp)
    }

    async fn withdraw(&self, username: &str, amount: f64) -> Result<AgentResponse, ServiceError> {
        let req = self.credit_request(username, amount);
        let resp = self.post("/credit-transfer/withdraw", &req).await?;
        Self::require_success("withdraw", resp)
    }
}
