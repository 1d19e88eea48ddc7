use crate::{domain::responses::AgentResponse, errors::ServiceError};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAgentClient = Arc<dyn AgentClientTrait + Send + Sync>;

#[async_trait]
pub trait AgentClientTrait {
    async fn register(&self, username: &str, password: &str)
    -> Result<AgentResponse, ServiceError>;

    async fn login(&self, username: &str, password: &str) -> Result<AgentResponse, ServiceError>;

    async fn change_password(
        &self,
        username: &str,
        new_password: &str,
    ) -> Result<AgentResponse, ServiceError>;

    async fn deposit(&self, username: &str, amount: f64) -> Result<AgentResponse, ServiceError>;

    async fn withdraw(&self, username: &str, amount: f64) -> Result<AgentResponse, ServiceError>;
}
