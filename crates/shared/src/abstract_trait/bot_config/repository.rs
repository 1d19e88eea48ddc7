use crate::{errors::RepositoryError, model::BotAccountConfigKey};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBotAccountConfigRepository = Arc<dyn BotAccountConfigRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait BotAccountConfigRepositoryTrait {
    /// Every value stored under `key`; list-valued keys have one row per value.
    async fn find_values(&self, key: BotAccountConfigKey) -> Result<Vec<String>, RepositoryError>;
}
