use crate::{
    abstract_trait::bot_config::repository::BotAccountConfigRepositoryTrait,
    config::ConnectionPool, errors::RepositoryError, model::BotAccountConfigKey,
    repository::db_error,
};
use async_trait::async_trait;

pub struct BotAccountConfigRepository {
    db: ConnectionPool,
}

impl BotAccountConfigRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BotAccountConfigRepositoryTrait for BotAccountConfigRepository {
    async fn find_values(&self, key: BotAccountConfigKey) -> Result<Vec<String>, RepositoryError> {
        sqlx::query_scalar::<_, String>(
            "SELECT config_val FROM bot_account_configs WHERE config_key = $1 ORDER BY id",
        )
        .bind(key.as_str())
        .fetch_all(&self.db)
        .await
        .map_err(db_error("find bot account config"))
    }
}
