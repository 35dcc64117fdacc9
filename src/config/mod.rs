//! Application configuration loading and validation.
//!
//! Every section is optional; an empty file yields the defaults.
//!
//! ```no_run
//! use sedori::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

mod logging;
mod pricing;
mod recommendation;
mod screening;

use std::path::{Path, PathBuf};
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

pub use logging::LoggingConfig;
pub use pricing::{ExchangeConfig, PricingConfig};
pub use recommendation::RecommendationConfig;
pub use screening::{ScreeningConfig, ScreeningFee, ScreeningFees};

use crate::domain::OverseasPlatform;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub screening: ScreeningConfig,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
}

impl Config {
    /// Parse and validate configuration from TOML content.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Reference data path, resolved against the config file's directory
    /// when relative.
    pub fn reference_data_path(&self, config_path: &Path) -> PathBuf {
        let path = &self.pricing.reference_data;
        if path.is_absolute() {
            return path.clone();
        }
        config_path
            .parent()
            .map_or_else(|| path.clone(), |dir| dir.join(path))
    }

    pub fn exchange_rate_ttl(&self) -> Duration {
        Duration::from_secs(self.exchange.cache_ttl_secs)
    }

    pub fn report_ttl(&self) -> Duration {
        Duration::from_secs(self.recommendation.cache_ttl_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.pricing.default_min_margin < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "default_min_margin",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if self.pricing.destination_country.as_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "destination_country",
            }
            .into());
        }
        if self.exchange.cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "exchange.cache_ttl_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.exchange.fallback_usd_jpy <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "fallback_usd_jpy",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let screening = &self.screening;
        if !is_fraction(screening.customs_rate) {
            return Err(ConfigError::InvalidValue {
                field: "customs_rate",
                reason: "must be between 0 and 1".to_string(),
            }
            .into());
        }
        if screening.shipping_estimate_jpy < Decimal::ZERO
            || screening.de_minimis_usd < Decimal::ZERO
        {
            return Err(ConfigError::InvalidValue {
                field: "screening",
                reason: "shipping estimate and de minimis must be 0 or greater".to_string(),
            }
            .into());
        }
        for platform in OverseasPlatform::ALL {
            let fee = screening.fees.for_platform(platform);
            if !is_fraction(fee.rate) || fee.fixed_usd < Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: "screening.fees",
                    reason: format!(
                        "{platform}: rate must be between 0 and 1, fixed fee 0 or greater"
                    ),
                }
                .into());
            }
        }

        let rec = &self.recommendation;
        if rec.cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "recommendation.cache_ttl_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if rec.sample_size == 0
            || rec.listings_per_platform == 0
            || rec.max_products_per_keyword == 0
            || rec.max_products_total == 0
            || rec.max_keywords == 0
        {
            return Err(ConfigError::InvalidValue {
                field: "recommendation",
                reason: "limits must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

fn is_fraction(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}
