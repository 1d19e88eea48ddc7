use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_secret_user: String,
    pub run_migrations: bool,
    pub port: u16,
    pub is_dev: bool,
    pub bot_status_interval_secs: u64,
    pub accounting: AccountingConfig,
    pub agent: AgentConfig,
}

#[derive(Debug, Clone)]
pub struct AccountingConfig {
    pub api_endpoint: String,
    pub api_key: String,
    pub local_webhook_endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub api_endpoint: String,
    pub agent_name: String,
    pub start_number: i64,
    pub secret_key: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url = database_url()?;
        let jwt_secret = std::env::var("JWT_SECRET").context("Missing env: JWT_SECRET")?;
        let jwt_secret_user =
            std::env::var("JWT_SECRET_USER").context("Missing env: JWT_SECRET_USER")?;
        let run_migrations_str =
            std::env::var("RUN_MIGRATIONS").context("Missing env: RUN_MIGRATIONS")?;
        let port_str = std::env::var("PORT").context("Missing env: PORT")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{other}'",
                ));
            }
        };

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let is_dev = std::env::var("APP_ENV")
            .map(|v| v != "production")
            .unwrap_or(true);

        let timeout_secs = env_or("HTTP_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .context("HTTP_TIMEOUT_SECS must be a valid u64 integer")?;

        let bot_status_interval_secs = env_or("BOT_STATUS_INTERVAL_SECS", "60")
            .parse::<u64>()
            .context("BOT_STATUS_INTERVAL_SECS must be a valid u64 integer")?;

        let accounting = AccountingConfig {
            api_endpoint: std::env::var("ACCOUNTING_API_ENDPOINT")
                .context("Missing env: ACCOUNTING_API_ENDPOINT")?,
            api_key: std::env::var("ACCOUNTING_API_KEY")
                .context("Missing env: ACCOUNTING_API_KEY")?,
            local_webhook_endpoint: env_or("ACCOUNTING_LOCAL_WEBHOOK_ENDPOINT", ""),
            timeout_secs,
        };

        let agent = AgentConfig {
            api_endpoint: std::env::var("AGENT_API").context("Missing env: AGENT_API")?,
            agent_name: std::env::var("AGENT_NAME").context("Missing env: AGENT_NAME")?,
            start_number: env_or("AGENT_START_NUMBER", "0")
                .parse::<i64>()
                .context("AGENT_START_NUMBER must be a valid integer")?,
            secret_key: env_or("AGENT_SECRET_KEY", ""),
            timeout_secs,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_secret_user,
            run_migrations,
            port,
            is_dev,
            bot_status_interval_secs,
            accounting,
            agent,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn database_url() -> Result<String> {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Ok(url);
    }

    let host = std::env::var("DB_HOST").context("Missing env: DATABASE_URL or DB_HOST")?;
    let port = env_or("DB_PORT", "5432");
    let user = std::env::var("DB_USER").context("Missing env: DB_USER")?;
    let pass = std::env::var("DB_PASSWORD").context("Missing env: DB_PASSWORD")?;
    let name = std::env::var("DB_NAME").context("Missing env: DB_NAME")?;

    Ok(format!("postgres://{user}:{pass}@{host}:{port}/{name}"))
}
