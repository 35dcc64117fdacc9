//! Coarse route-screening constants.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::domain::pricing::ScreeningRates;
use crate::domain::{Jpy, OverseasPlatform, Price, Rate};

/// Approximate fee of one overseas platform used during screening.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScreeningFee {
    pub rate: Rate,
    #[serde(default)]
    pub fixed_usd: Price,
}

impl ScreeningFee {
    const fn new(rate: Rate, fixed_usd: Price) -> Self {
        Self { rate, fixed_usd }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningFees {
    #[serde(default = "default_ebay_fee")]
    pub ebay: ScreeningFee,
    #[serde(default = "default_amazon_fee")]
    pub amazon: ScreeningFee,
    #[serde(default = "default_stockx_fee")]
    pub stockx: ScreeningFee,
    #[serde(default = "default_mercari_us_fee")]
    pub mercari_us: ScreeningFee,
}

fn default_ebay_fee() -> ScreeningFee {
    ScreeningFee::new(dec!(0.129), dec!(0.30))
}

fn default_amazon_fee() -> ScreeningFee {
    ScreeningFee::new(dec!(0.15), Decimal::ZERO)
}

fn default_stockx_fee() -> ScreeningFee {
    ScreeningFee::new(dec!(0.12), Decimal::ZERO)
}

fn default_mercari_us_fee() -> ScreeningFee {
    ScreeningFee::new(dec!(0.10), Decimal::ZERO)
}

impl ScreeningFees {
    pub fn for_platform(&self, platform: OverseasPlatform) -> ScreeningFee {
        match platform {
            OverseasPlatform::Ebay => self.ebay,
            OverseasPlatform::Amazon => self.amazon,
            OverseasPlatform::StockX => self.stockx,
            OverseasPlatform::MercariUs => self.mercari_us,
        }
    }
}

impl Default for ScreeningFees {
    fn default() -> Self {
        Self {
            ebay: default_ebay_fee(),
            amazon: default_amazon_fee(),
            stockx: default_stockx_fee(),
            mercari_us: default_mercari_us_fee(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningConfig {
    #[serde(default = "default_min_profit_jpy")]
    pub min_profit_jpy: Jpy,
    #[serde(default = "default_shipping_estimate_jpy")]
    pub shipping_estimate_jpy: Jpy,
    #[serde(default = "default_de_minimis_usd")]
    pub de_minimis_usd: Price,
    #[serde(default = "default_customs_rate")]
    pub customs_rate: Rate,
    #[serde(default)]
    pub fees: ScreeningFees,
}

fn default_min_profit_jpy() -> Jpy {
    dec!(1100)
}

fn default_shipping_estimate_jpy() -> Jpy {
    dec!(3500)
}

fn default_de_minimis_usd() -> Price {
    dec!(800)
}

fn default_customs_rate() -> Rate {
    dec!(0.05)
}

impl ScreeningConfig {
    pub fn rates(&self) -> ScreeningRates {
        ScreeningRates {
            min_profit_jpy: self.min_profit_jpy,
            shipping_estimate_jpy: self.shipping_estimate_jpy,
            de_minimis_usd: self.de_minimis_usd,
            customs_rate: self.customs_rate,
        }
    }
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            min_profit_jpy: default_min_profit_jpy(),
            shipping_estimate_jpy: default_shipping_estimate_jpy(),
            de_minimis_usd: default_de_minimis_usd(),
            customs_rate: default_customs_rate(),
            fees: ScreeningFees::default(),
        }
    }
}
