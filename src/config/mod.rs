//! Configuration management for Souk Core

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Deployment environment (toggles cookie attributes)
    pub environment: Environment,
    /// Document store configuration
    pub store: StoreConfig,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection string
    pub url: String,
    /// Database name
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret, shared by issuance and verification
    pub secret: String,
    /// Session lifetime from issuance
    pub session_ttl_secs: i64,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed browser origins (credentials mode requires an explicit list)
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            environment: match env::var("APP_ENV").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            store: StoreConfig {
                url: env::var("MONGODB_URL").context("MONGODB_URL is required")?,
                database: env::var("MONGODB_DATABASE").unwrap_or_else(|_| "souk".to_string()),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").context("JWT_SECRET is required")?,
                session_ttl_secs: env::var("SESSION_TTL_SECS")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse()
                    .context("Invalid SESSION_TTL_SECS")?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:5173".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
        })
    }

    /// HTTP bind address string
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
