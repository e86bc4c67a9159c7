//! Configuration module for the menuboard backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.
//! Checkout-only settings are optional at startup and checked when a checkout is requested.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default payment API base URL.
pub const DEFAULT_PAYMENT_API_BASE: &str = "https://api.stripe.com";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid MENU_BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite menu store
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Base URL of the payment session API
    pub payment_api_base: String,
    /// Secret key for the payment API
    pub payment_secret_key: Option<String>,
    /// Redirect after a successful payment
    pub checkout_success_url: Option<String>,
    /// Redirect after a cancelled payment
    pub checkout_cancel_url: Option<String>,
    /// ISO currency code for line items
    pub currency: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("MENU_DB_PATH")
            .unwrap_or_else(|_| "./data/menu.sqlite".to_string())
            .into();

        let bind_value =
            env::var("MENU_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = bind_value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let log_level = env::var("MENU_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let payment_api_base = env::var("MENU_PAYMENT_API_BASE")
            .unwrap_or_else(|_| DEFAULT_PAYMENT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let currency = env::var("MENU_CURRENCY")
            .ok()
            .and_then(non_empty)
            .map(|c| c.to_lowercase())
            .unwrap_or_else(|| "usd".to_string());

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            payment_api_base,
            payment_secret_key: optional_var("MENU_PAYMENT_SECRET_KEY"),
            checkout_success_url: optional_var("MENU_CHECKOUT_SUCCESS_URL"),
            checkout_cancel_url: optional_var("MENU_CHECKOUT_CANCEL_URL"),
            currency,
        })
    }

    /// Names of checkout settings that are not configured.
    pub fn missing_checkout_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.payment_secret_key.is_none() {
            missing.push("MENU_PAYMENT_SECRET_KEY");
        }
        if self.checkout_success_url.is_none() {
            missing.push("MENU_CHECKOUT_SUCCESS_URL");
        }
        if self.checkout_cancel_url.is_none() {
            missing.push("MENU_CHECKOUT_CANCEL_URL");
        }
        missing
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(non_empty)
}

// Blank values count as unset.
fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
