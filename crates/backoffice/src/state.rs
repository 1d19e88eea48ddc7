use crate::di::DependenciesInject;
use anyhow::{Context, Result};
use shared::config::{Config, ConnectionManager, JwtConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: Arc<JwtConfig>,
    /// Shared secret the bank gateway sends with webhook calls.
    pub webhook_api_key: Arc<String>,
    pub di_container: DependenciesInject,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &"JwtConfig")
            .field("di_container", &self.di_container)
            .finish()
    }
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = ConnectionManager::new_pool(&config.database_url, config.run_migrations)
            .await
            .context("Failed to initialize database pool")?;

        let di_container = DependenciesInject::new(pool, config)
            .await
            .context("Failed to initialize dependency injection container")?;

        Ok(Self::from_parts(
            JwtConfig::new(&config.jwt_secret, &config.jwt_secret_user),
            config.accounting.api_key.clone(),
            di_container,
        ))
    }

    pub fn from_parts(
        jwt_config: JwtConfig,
        webhook_api_key: String,
        di_container: DependenciesInject,
    ) -> Self {
        Self {
            jwt_config: Arc::new(jwt_config),
            webhook_api_key: Arc::new(webhook_api_key),
            di_container,
        }
    }
}
