//! Storefront configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `cargo run` works out of the box.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use artisell_core::{SHIPPING_FEE_CENTS, TAX_RATE_BPS};

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file path
    pub database_path: String,

    /// Display name of the store
    pub store_name: String,

    /// Flat shipping fee in centavos
    pub shipping_fee_cents: i64,

    /// Checkout tax rate in basis points
    pub tax_rate_bps: u32,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                      | Default            |
    /// |-------------------------------|--------------------|
    /// | `ARTISELL_DATABASE_PATH`      | `./artisell.db`    |
    /// | `ARTISELL_STORE_NAME`         | `Artisell`         |
    /// | `ARTISELL_SHIPPING_FEE_CENTS` | `25000` (₱250.00)  |
    /// | `ARTISELL_TAX_RATE_BPS`       | `1200` (12%)       |
    pub fn load() -> Result<Self, ConfigError> {
        let config = StoreConfig {
            database_path: env::var("ARTISELL_DATABASE_PATH")
                .unwrap_or_else(|_| "./artisell.db".to_string()),

            store_name: env::var("ARTISELL_STORE_NAME")
                .unwrap_or_else(|_| "Artisell".to_string()),

            shipping_fee_cents: env::var("ARTISELL_SHIPPING_FEE_CENTS")
                .unwrap_or_else(|_| SHIPPING_FEE_CENTS.to_string())
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("ARTISELL_SHIPPING_FEE_CENTS".to_string())
                })?,

            tax_rate_bps: env::var("ARTISELL_TAX_RATE_BPS")
                .unwrap_or_else(|_| TAX_RATE_BPS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("ARTISELL_TAX_RATE_BPS".to_string()))?,
        };

        Ok(config)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            database_path: "./artisell.db".to_string(),
            store_name: "Artisell".to_string(),
            shipping_fee_cents: SHIPPING_FEE_CENTS,
            tax_rate_bps: TAX_RATE_BPS,
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set but could not be parsed.
    #[error("invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.store_name, "Artisell");
        assert_eq!(config.shipping_fee_cents, 25_000);
        assert_eq!(config.tax_rate_bps, 1200);
    }
}
