//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_STORAGE_PATH` - File backing the key-value store (default: shopfront-storage.json)
//! - `SHOPFRONT_STORAGE_KEY` - Key the cart is stored under (default: ecommerceCart)
//! - `SHOPFRONT_CURRENCY` - ISO 4217 currency code for display (default: INR)
//! - `SHOPFRONT_CURRENCY_SYMBOL` - Override the currency's display symbol
//! - `SHOPFRONT_CATALOG_PATH` - JSON catalog replacing the built-in products
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)

use std::path::PathBuf;

use shopfront_core::{CurrencyCode, PriceFormat};
use thiserror::Error;

use crate::storage::keys;

const DEFAULT_STORAGE_PATH: &str = "shopfront-storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// File backing the key-value store
    pub storage_path: PathBuf,
    /// Key the cart is stored under
    pub storage_key: String,
    /// Display currency
    pub currency: CurrencyCode,
    /// Symbol override for the display currency
    pub currency_symbol: Option<String>,
    /// Catalog file replacing the built-in products
    pub catalog_path: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "staging")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            storage_key: keys::CART.to_string(),
            currency: CurrencyCode::default(),
            currency_symbol: None,
            catalog_path: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let currency = match non_empty(lookup("SHOPFRONT_CURRENCY")) {
            Some(code) => code.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_CURRENCY".to_string(), e.to_string())
            })?,
            None => defaults.currency,
        };

        let sentry_sample_rate = match non_empty(lookup("SENTRY_SAMPLE_RATE")) {
            Some(rate) => parse_sample_rate("SENTRY_SAMPLE_RATE", &rate)?,
            None => defaults.sentry_sample_rate,
        };

        Ok(Self {
            storage_path: non_empty(lookup("SHOPFRONT_STORAGE_PATH"))
                .map_or(defaults.storage_path, PathBuf::from),
            storage_key: non_empty(lookup("SHOPFRONT_STORAGE_KEY")).unwrap_or(defaults.storage_key),
            currency,
            currency_symbol: non_empty(lookup("SHOPFRONT_CURRENCY_SYMBOL")),
            catalog_path: non_empty(lookup("SHOPFRONT_CATALOG_PATH")).map(PathBuf::from),
            sentry_dsn: non_empty(lookup("SENTRY_DSN")),
            sentry_environment: non_empty(lookup("SENTRY_ENVIRONMENT")),
            sentry_sample_rate,
        })
    }

    /// Price formatter for the configured currency.
    #[must_use]
    pub fn price_format(&self) -> PriceFormat {
        self.currency_symbol
            .as_ref()
            .map_or_else(|| PriceFormat::from(self.currency), PriceFormat::new)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Treat blank values as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a 0.0-1.0 sample rate.
fn parse_sample_rate(key: &str, value: &str) -> Result<f32, ConfigError> {
    let rate = value
        .trim()
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}
