//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CARTWHEEL_CART_PATH` - Path of the cart slot file (default: cart.json)
//! - `CARTWHEEL_TAX_RATE` - Flat tax rate applied to totals (default: 0.02)

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path of the cart slot file.
    pub cart_path: PathBuf,
    /// Flat tax rate applied to cart totals.
    pub tax_rate: Decimal,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let cart_path = PathBuf::from(get_env_or_default("CARTWHEEL_CART_PATH", "cart.json"));
        let tax_rate = parse_tax_rate(&get_env_or_default("CARTWHEEL_TAX_RATE", "0.02"))?;

        Ok(Self {
            cart_path,
            tax_rate,
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a tax rate value (a plain decimal fraction, e.g. "0.02").
fn parse_tax_rate(raw: &str) -> Result<Decimal, ConfigError> {
    raw.parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar("CARTWHEEL_TAX_RATE".to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tax_rate_valid() {
        assert_eq!(parse_tax_rate("0.02").unwrap(), "0.02".parse().unwrap());
        assert_eq!(parse_tax_rate("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_tax_rate_invalid() {
        let err = parse_tax_rate("two percent").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }
}
