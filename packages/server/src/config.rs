use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub allowed_origins: Vec<String>,
    pub admin_identifiers: Vec<String>,
    pub trusted_contributors: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET")
                .context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "shelfscout".to_string()),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
            admin_identifiers: env::var("ADMIN_IDENTIFIERS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
            trusted_contributors: env::var("TRUSTED_CONTRIBUTORS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
        })
    }
}

/// Split a comma-separated environment value into trimmed, non-empty entries
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
