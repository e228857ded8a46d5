//! # CLI Configuration
//!
//! Engine tunables and market overrides for the `atelier` binary.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults          EngineConfig::default(), no market overrides      │
//! │  2. atelier.toml      --config <path>, else the platform config dir     │
//! │                       (~/.config/atelier/atelier.toml on Linux)         │
//! │  3. Environment       ATELIER_SPOT_PRICE        market.spot_price       │
//! │                       ATELIER_LOSS_PERCENT      market.loss_percentage  │
//! │                       ATELIER_MAX_RANGE_SPAN    sku.max_range_span      │
//! │                       ATELIER_PLATING_PER_GRAM  rates.plating_per_gram  │
//! │                       ATELIER_CASTING_PER_GRAM  rates.casting_per_gram  │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use atelier_core::validation::validate_percentage;
use atelier_core::{
    CostRates, EngineConfig, GlobalSettings, Money, SkuRules, ValidationError, VerdictThresholds,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::CliResult;

/// Market values that override the catalog snapshot's settings.
///
/// Useful for "what if gold moves" repricing without editing the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOverrides {
    #[serde(default)]
    pub spot_price_per_gram: Option<Money>,
    #[serde(default)]
    pub loss_percentage: Option<Decimal>,
}

impl MarketOverrides {
    /// Returns `settings` with any overridden value replaced.
    pub fn apply(&self, settings: &GlobalSettings) -> GlobalSettings {
        GlobalSettings {
            spot_price_per_gram: self
                .spot_price_per_gram
                .unwrap_or(settings.spot_price_per_gram),
            loss_percentage: self.loss_percentage.unwrap_or(settings.loss_percentage),
            ..settings.clone()
        }
    }
}

/// Complete CLI configuration.
///
/// ## Example Config File (atelier.toml)
/// ```toml
/// [market]
/// spot_price_per_gram = "0.85"
///
/// [rates]
/// plating_per_gram = "0.40"
///
/// [verdict]
/// excellent_max = "0"
/// fair_max = "15"
/// expensive_max = "40"
///
/// [sku]
/// max_range_span = 500
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub market: MarketOverrides,

    #[serde(default)]
    pub rates: CostRates,

    #[serde(default)]
    pub verdict: VerdictThresholds,

    #[serde(default)]
    pub sku: SkuRules,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Engine tunables.
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            rates: self.rates.clone(),
            verdict: self.verdict.clone(),
            sku: self.sku.clone(),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.engine().validate()?;

        if let Some(spot) = self.market.spot_price_per_gram {
            if spot.is_negative() {
                return Err(ValidationError::MustBePositive {
                    field: "market.spot_price_per_gram".to_string(),
                });
            }
        }
        if let Some(loss) = self.market.loss_percentage {
            validate_percentage("market.loss_percentage", loss)?;
        }
        Ok(())
    }

    /// Applies `ATELIER_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(spot) = lookup("ATELIER_SPOT_PRICE") {
            match spot.trim().parse::<Decimal>() {
                Ok(v) => {
                    debug!(spot = %v, "Overriding spot price from environment");
                    self.market.spot_price_per_gram = Some(Money::new(v));
                }
                Err(_) => warn!(value = %spot, "Ignoring invalid ATELIER_SPOT_PRICE"),
            }
        }

        if let Some(loss) = lookup("ATELIER_LOSS_PERCENT") {
            match loss.trim().parse::<Decimal>() {
                Ok(v) => self.market.loss_percentage = Some(v),
                Err(_) => warn!(value = %loss, "Ignoring invalid ATELIER_LOSS_PERCENT"),
            }
        }

        if let Some(span) = lookup("ATELIER_MAX_RANGE_SPAN") {
            match span.trim().parse::<u32>() {
                Ok(v) => self.sku.max_range_span = v,
                Err(_) => warn!(value = %span, "Ignoring invalid ATELIER_MAX_RANGE_SPAN"),
            }
        }

        if let Some(rate) = lookup("ATELIER_PLATING_PER_GRAM") {
            match rate.trim().parse::<Decimal>() {
                Ok(v) => self.rates.plating_per_gram = Money::new(v),
                Err(_) => warn!(value = %rate, "Ignoring invalid ATELIER_PLATING_PER_GRAM"),
            }
        }

        if let Some(rate) = lookup("ATELIER_CASTING_PER_GRAM") {
            match rate.trim().parse::<Decimal>() {
                Ok(v) => self.rates.casting_per_gram = Money::new(v),
                Err(_) => warn!(value = %rate, "Ignoring invalid ATELIER_CASTING_PER_GRAM"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "atelier", "atelier")
            .map(|dirs| dirs.config_dir().join("atelier.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine(), EngineConfig::default());
        assert_eq!(config.market, MarketOverrides::default());
    }

    #[test]
    fn test_toml_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [market]
            spot_price_per_gram = "0.85"

            [rates]
            plating_per_gram = "0.40"

            [sku]
            max_range_span = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.market.spot_price_per_gram, Some(Money::from_cents(85)));
        assert_eq!(config.market.loss_percentage, None);
        assert_eq!(config.rates.plating_per_gram, Money::from_cents(40));
        assert_eq!(config.rates.casting_per_gram, Money::from_cents(20));
        assert_eq!(config.sku.max_range_span, 500);
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("ATELIER_SPOT_PRICE", "0.90"),
            ("ATELIER_LOSS_PERCENT", "12.5"),
            ("ATELIER_MAX_RANGE_SPAN", "50"),
            ("ATELIER_PLATING_PER_GRAM", "0.45"),
            ("ATELIER_CASTING_PER_GRAM", "0.25"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|k| vars.get(k).cloned());

        assert_eq!(config.market.spot_price_per_gram, Some(Money::from_cents(90)));
        assert_eq!(config.market.loss_percentage, Some(dec!(12.5)));
        assert_eq!(config.sku.max_range_span, 50);
        assert_eq!(config.rates.plating_per_gram, Money::from_cents(45));
        assert_eq!(config.rates.casting_per_gram, Money::from_cents(25));
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let vars = env(&[("ATELIER_SPOT_PRICE", "cheap"), ("ATELIER_MAX_RANGE_SPAN", "-1")]);
        let mut config = AppConfig::default();
        config.apply_overrides(|k| vars.get(k).cloned());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.market.loss_percentage = Some(dec!(140));
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.market.spot_price_per_gram = Some(Money::from_cents(-1));
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sku.max_range_span = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_market_overrides_apply() {
        let base = GlobalSettings::new(Money::from_cents(82), dec!(10));
        let overrides = MarketOverrides {
            spot_price_per_gram: Some(Money::from_cents(90)),
            loss_percentage: None,
        };
        let applied = overrides.apply(&base);
        assert_eq!(applied.spot_price_per_gram, Money::from_cents(90));
        assert_eq!(applied.loss_percentage, dec!(10));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("atelier-missing-config-for-test.toml");
        let config = AppConfig::load(Some(path)).unwrap();
        assert_eq!(config.engine(), EngineConfig::default());
    }
}
