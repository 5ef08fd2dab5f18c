//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::constants;
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub redis: RedisSettings,
    pub session: SessionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub prefix: String,
    pub expiration_secs: u64,
}

impl SessionSettings {
    pub fn expiration(&self) -> Duration {
        Duration::from_secs(self.expiration_secs)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.name", "session-store")?
            .set_default("redis.url", constants::DEFAULT_REDIS_URL)?
            .set_default(
                "redis.max_connections",
                constants::DEFAULT_REDIS_MAX_CONNECTIONS as u64,
            )?
            .set_default("session.prefix", constants::DEFAULT_SESSION_PREFIX)?
            .set_default(
                "session.expiration_secs",
                constants::DEFAULT_SESSION_EXPIRY_SECS,
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
