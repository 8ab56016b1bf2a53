//! Server configuration
//!
//! Defaults overlaid by `TASTY_*` environment variables
//! (`TASTY_BIND_ADDRESS`, `TASTY_DATABASE_PATH`, `TASTY_JWT_SECRET`,
//! `TASTY_SESSION_TTL_SECS`).

use anyhow::{Context, Result};
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment};
use serde::Deserialize;
use tracing::{info, warn};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_DATABASE_PATH: &str = "./tasty.db";
pub const DEV_JWT_SECRET: &str = "change-me-in-production";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_path: String,
    pub jwt_secret: String,
    pub session_ttl_secs: i64,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        info!("Loading configuration from environment...");
        let builder =
            Config::builder().add_source(Environment::with_prefix("TASTY").try_parsing(true));
        let config = Self::from_builder(builder)?;

        if config.jwt_secret == DEV_JWT_SECRET {
            warn!("TASTY_JWT_SECRET not set, using default (insecure for production)");
        }

        Ok(config)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("jwt_secret", DEV_JWT_SECRET)?
            .set_default("session_ttl_secs", DEFAULT_SESSION_TTL_SECS)?
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}
