//! Deployment parameters for the payments ledger.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::Amount;

/// One-time fee withheld from a payer's first donation: 0.001 of a
/// 10^24-unit token, the cost of one ledger entry on the original chain.
pub const DEFAULT_STORAGE_FEE: Amount = Amount::new(1_000_000_000_000_000_000_000);

/// Page size used by `get_payments` when the caller gives no limit.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Withheld from the transfer on a payer's first donation.
    pub storage_fee: Amount,
    pub default_page_limit: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            storage_fee: DEFAULT_STORAGE_FEE,
            default_page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl LedgerConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a TOML file, then let environment variables override it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(fee) = std::env::var("PAYMENTS_STORAGE_FEE") {
            match fee.parse::<Amount>() {
                Ok(v) => self.storage_fee = v,
                Err(e) => tracing::warn!(
                    value = %fee,
                    error = %e,
                    "Ignoring invalid PAYMENTS_STORAGE_FEE"
                ),
            }
        }
        if let Ok(limit) = std::env::var("PAYMENTS_PAGE_LIMIT") {
            match limit.trim().parse::<u32>() {
                Ok(v) if v > 0 => self.default_page_limit = v,
                _ => tracing::warn!(value = %limit, "Ignoring invalid PAYMENTS_PAGE_LIMIT"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.storage_fee, Amount::new(10u128.pow(21)));
        assert_eq!(config.default_page_limit, 50);
    }

    #[test]
    fn test_config_from_toml_partial() {
        let config = LedgerConfig::from_toml_str("storage_fee = \"250\"").unwrap();
        assert_eq!(config.storage_fee, Amount::new(250));
        assert_eq!(config.default_page_limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_config_from_toml_rejects_bad_fee() {
        assert!(LedgerConfig::from_toml_str("storage_fee = \"lots\"").is_err());
    }

    #[test]
    fn test_config_from_env() {
        std::env::set_var("PAYMENTS_STORAGE_FEE", "1000");
        std::env::set_var("PAYMENTS_PAGE_LIMIT", "0");

        let config = LedgerConfig::from_env();
        assert_eq!(config.storage_fee, Amount::new(1000));
        assert_eq!(config.default_page_limit, DEFAULT_PAGE_LIMIT);

        std::env::remove_var("PAYMENTS_STORAGE_FEE");
        std::env::remove_var("PAYMENTS_PAGE_LIMIT");
    }
}
