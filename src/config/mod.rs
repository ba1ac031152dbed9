//! Configuration module for the PlacementOps backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the spreadsheet-automation endpoint
    pub sheet_api_url: String,
    /// Shared operator password (dashboard gate is disabled when unset)
    pub login_password: Option<String>,
    /// Server-side secret mixed into minted session tokens
    pub token_secret: String,
    /// Public origin used when building application links
    pub public_origin: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let sheet_api_url = env::var("PLACEMENT_SHEET_API_URL").unwrap_or_default();

        let login_password = env::var("PLACEMENT_LOGIN_PASSWORD").ok();

        let token_secret =
            env::var("PLACEMENT_TOKEN_SECRET").unwrap_or_else(|_| "default_secret".to_string());

        let public_origin = env::var("PLACEMENT_PUBLIC_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let bind_addr = env::var("PLACEMENT_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid PLACEMENT_BIND_ADDR format");

        let log_level = env::var("PLACEMENT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            sheet_api_url,
            login_password,
            token_secret,
            public_origin,
            bind_addr,
            log_level,
        }
    }
}
