//! Reference-data lookups.
//!
//! Lookups are synchronous and answer "not found" with `None`; the pricing
//! service decides which absences are errors.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{
    CompetitorPrice, CountryCode, Currency, HsCode, Jpy, OverseasPlatform, PlatformFeeSchedule,
    Product, Rate, Sku,
};

pub trait ProductCatalog: Send + Sync {
    fn product(&self, sku: &Sku) -> Option<Product>;
}

pub trait FeeScheduleSource: Send + Sync {
    fn fee_schedule(&self, platform: OverseasPlatform) -> Option<PlatformFeeSchedule>;
}

pub trait ExchangeRateSource: Send + Sync {
    /// Units of `to` per unit of `from`.
    fn exchange_rate(&self, from: &Currency, to: &Currency) -> Option<Rate>;
}

impl<T: ExchangeRateSource + ?Sized> ExchangeRateSource for Arc<T> {
    fn exchange_rate(&self, from: &Currency, to: &Currency) -> Option<Rate> {
        (**self).exchange_rate(from, to)
    }
}

pub trait ShippingRateSource: Send + Sync {
    fn shipping_cost(&self, weight_kg: Decimal, country: &CountryCode) -> Option<Jpy>;
}

pub trait CustomsDutySource: Send + Sync {
    /// Duty rate for a declared value. Never fails: no matching rule is 0%.
    fn customs_duty_rate(&self, hs_code: &HsCode, country: &CountryCode, value_usd: Decimal)
        -> Rate;
}

pub trait CompetitorPriceSource: Send + Sync {
    fn competitor_prices(&self, sku: &Sku, platform: OverseasPlatform) -> Vec<CompetitorPrice>;
}

/// Every lookup the pricing service needs.
pub trait ReferenceData:
    ProductCatalog
    + FeeScheduleSource
    + ExchangeRateSource
    + ShippingRateSource
    + CustomsDutySource
    + CompetitorPriceSource
{
}

impl<T> ReferenceData for T where
    T: ProductCatalog
        + FeeScheduleSource
        + ExchangeRateSource
        + ShippingRateSource
        + CustomsDutySource
        + CompetitorPriceSource
{
}
