//! Precise pricing and exchange-rate settings.

use std::path::PathBuf;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::domain::{CountryCode, Rate};

/// Settings for profit calculation and price solving.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Margin floor used when a command does not pass one.
    #[serde(default = "default_min_margin")]
    pub default_min_margin: Rate,
    /// TOML file with products, fees, rates, shipping and duty tables.
    #[serde(default = "default_reference_data")]
    pub reference_data: PathBuf,
    #[serde(default = "default_destination_country")]
    pub destination_country: CountryCode,
}

fn default_min_margin() -> Rate {
    dec!(0.05)
}

fn default_reference_data() -> PathBuf {
    PathBuf::from("reference.toml")
}

fn default_destination_country() -> CountryCode {
    CountryCode::new("US")
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_min_margin: default_min_margin(),
            reference_data: default_reference_data(),
            destination_country: default_destination_country(),
        }
    }
}

/// Exchange-rate memoization.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// How long a looked-up rate is reused.
    #[serde(default = "default_rate_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Yen per dollar used by screening when no rate can be resolved.
    #[serde(default = "default_fallback_usd_jpy")]
    pub fallback_usd_jpy: Decimal,
}

const fn default_rate_ttl_secs() -> u64 {
    300
}

fn default_fallback_usd_jpy() -> Decimal {
    dec!(149)
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_rate_ttl_secs(),
            fallback_usd_jpy: default_fallback_usd_jpy(),
        }
    }
}
