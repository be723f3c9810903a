//! # Storefront Configuration
//!
//! Store identity and pricing rules, loaded once at session start.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PROBIOTIC_*`)
//! 2. Config file (`storefront.toml`)
//! 3. Defaults (this file)
//!
//! ```toml
//! # storefront.toml
//! [store]
//! name = "Probiotics Store"
//! currency_symbol = "₹"
//! currency_decimals = 2
//!
//! [pricing]
//! free_shipping_threshold_cents = 4900
//! flat_shipping_cents = 499
//! tax_rate_bps = 800
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after load; the session shares it behind an `Arc`.

use std::path::{Path, PathBuf};

use probiotic_core::validation::validate_tax_rate_bps;
use probiotic_core::{Money, PricingRules, TaxRate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

const CONFIG_FILE_NAME: &str = "storefront.toml";
const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub pricing: PricingSettings,
}

/// How the store presents itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Store name (page header, logs)
    pub name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: "Probiotics Store".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
        }
    }
}

/// Pricing knobs in integer minor units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    pub free_shipping_threshold_cents: i64,
    pub flat_shipping_cents: i64,
    /// e.g., 800 = 8%
    pub tax_rate_bps: u32,
}

impl Default for PricingSettings {
    fn default() -> Self {
        let rules = PricingRules::default();
        PricingSettings {
            free_shipping_threshold_cents: rules.free_shipping_threshold.cents(),
            flat_shipping_cents: rules.flat_shipping.cents(),
            tax_rate_bps: rules.tax_rate.bps(),
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`storefront.toml`), when it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::invalid("store.name", "must not be empty"));
        }

        if self.store.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::invalid(
                "store.currency_decimals",
                format!("must be at most {}", MAX_CURRENCY_DECIMALS),
            ));
        }

        if self.pricing.free_shipping_threshold_cents < 0 {
            return Err(ConfigError::invalid(
                "pricing.free_shipping_threshold_cents",
                "must not be negative",
            ));
        }

        if self.pricing.flat_shipping_cents < 0 {
            return Err(ConfigError::invalid(
                "pricing.flat_shipping_cents",
                "must not be negative",
            ));
        }

        validate_tax_rate_bps(self.pricing.tax_rate_bps)
            .map_err(|e| ConfigError::invalid("pricing.tax_rate_bps", e.to_string()))?;

        Ok(())
    }

    /// Applies `PROBIOTIC_*` overrides read through `lookup`.
    ///
    /// Unparseable numbers are logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("PROBIOTIC_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(symbol) = lookup("PROBIOTIC_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("PROBIOTIC_FREE_SHIPPING_CENTS") {
            match raw.trim().parse::<i64>() {
                Ok(cents) => self.pricing.free_shipping_threshold_cents = cents,
                Err(_) => warn!(value = %raw, "Ignoring PROBIOTIC_FREE_SHIPPING_CENTS"),
            }
        }

        if let Some(raw) = lookup("PROBIOTIC_FLAT_SHIPPING_CENTS") {
            match raw.trim().parse::<i64>() {
                Ok(cents) => self.pricing.flat_shipping_cents = cents,
                Err(_) => warn!(value = %raw, "Ignoring PROBIOTIC_FLAT_SHIPPING_CENTS"),
            }
        }

        // Percent, e.g. "8" or "8.25"
        if let Some(raw) = lookup("PROBIOTIC_TAX_RATE") {
            match raw.trim().parse::<f64>() {
                Ok(pct) if pct.is_finite() && pct >= 0.0 => {
                    debug!(tax_rate = pct, "Overriding tax rate from environment");
                    self.pricing.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(value = %raw, "Ignoring PROBIOTIC_TAX_RATE"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "probiotic", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Pricing rules for order summaries.
    pub fn pricing_rules(&self) -> PricingRules {
        PricingRules {
            free_shipping_threshold: Money::from_cents(self.pricing.free_shipping_threshold_cents),
            flat_shipping: Money::from_cents(self.pricing.flat_shipping_cents),
            tax_rate: TaxRate::from_bps(self.pricing.tax_rate_bps),
        }
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_session::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(1234), "₹12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        // fields are public, so an unvalidated config can still get here
        let decimals = u32::from(self.store.currency_decimals.min(MAX_CURRENCY_DECIMALS));
        let divisor = 10_i64.pow(decimals);
        let whole = (cents / divisor).unsigned_abs();
        let frac = (cents % divisor).unsigned_abs();
        let sign = if cents < 0 { "-" } else { "" };

        if decimals > 0 {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.store.currency_symbol,
                whole,
                frac,
                width = decimals as usize
            )
        } else {
            format!("{}{}{}", sign, self.store.currency_symbol, whole)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.store.currency_symbol, "₹");
        assert_eq!(config.pricing_rules(), PricingRules::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(1234), "₹12.34");
        assert_eq!(config.format_currency(1), "₹0.01");
        assert_eq!(config.format_currency(0), "₹0.00");
        assert_eq!(config.format_currency(-1234), "-₹12.34");

        let mut whole = StorefrontConfig::default();
        whole.store.currency_decimals = 0;
        whole.store.currency_symbol = "¥".to_string();
        assert_eq!(whole.format_currency(1500), "¥1500");
    }

    #[test]
    fn test_format_currency_clamps_unvalidated_decimals() {
        let mut config = StorefrontConfig::default();
        config.store.currency_decimals = 30;
        assert!(config.validate().is_err());
        assert_eq!(config.format_currency(1234), "₹0.1234");
        assert_eq!(config.format_currency(i64::MIN), "-₹922337203685477.5808");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [pricing]
            tax_rate_bps = 1800
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.tax_rate_bps, 1800);
        assert_eq!(config.pricing.flat_shipping_cents, 499);
        assert_eq!(config.store.name, "Probiotics Store");
    }

    #[test]
    fn test_load_from_file_then_env_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[store]\nname = \"Gut Lab\"\ncurrency_symbol = \"$\"\n\n[pricing]\nflat_shipping_cents = 300"
        )
        .unwrap();

        let mut config = StorefrontConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.name, "Gut Lab");
        assert_eq!(config.pricing.flat_shipping_cents, 300);

        config.apply_overrides(env(&[
            ("PROBIOTIC_STORE_NAME", "Gut Lab Outlet"),
            ("PROBIOTIC_TAX_RATE", "8.25"),
            ("PROBIOTIC_FREE_SHIPPING_CENTS", "9900"),
        ]));
        assert_eq!(config.store.name, "Gut Lab Outlet");
        assert_eq!(config.pricing.tax_rate_bps, 825);
        assert_eq!(config.pricing.free_shipping_threshold_cents, 9900);
        assert_eq!(config.store.currency_symbol, "$");
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(env(&[
            ("PROBIOTIC_TAX_RATE", "eight"),
            ("PROBIOTIC_FLAT_SHIPPING_CENTS", "4.99"),
        ]));
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pricing\ntax_rate_bps = ").unwrap();

        let err = StorefrontConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig::load_or_default(Some(dir.path().join("absent.toml")));
        assert_eq!(config.store.currency_decimals, 2);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = StorefrontConfig::default();
        config.pricing.tax_rate_bps = 10_001;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "pricing.tax_rate_bps"
        ));

        let mut config = StorefrontConfig::default();
        config.pricing.flat_shipping_cents = -1;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.store.currency_decimals = 9;
        assert!(config.validate().is_err());
    }
}
