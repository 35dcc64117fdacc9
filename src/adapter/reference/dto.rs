//! On-disk shape of the reference-data document.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{
    CountryCode, Currency, CustomsDutyRule, Price, Product, Rate, ShippingBand, Sku,
};

#[derive(Debug, Default, Deserialize)]
pub struct ReferenceDocument {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub fee_schedules: Vec<FeeScheduleRecord>,
    #[serde(default)]
    pub exchange_rates: Vec<ExchangeRateRecord>,
    #[serde(default)]
    pub shipping_zones: Vec<ShippingZoneRecord>,
    #[serde(default)]
    pub customs_duties: Vec<CustomsDutyRule>,
    #[serde(default)]
    pub competitor_prices: Vec<CompetitorPriceRecord>,
}

#[derive(Debug, Deserialize)]
pub struct FeeScheduleRecord {
    pub platform: String,
    pub currency: Currency,
    pub base_fee_percentage: Rate,
    #[serde(default)]
    pub fixed_fee_local: Price,
}

#[derive(Debug, Deserialize)]
pub struct ExchangeRateRecord {
    pub from: Currency,
    pub to: Currency,
    pub rate: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ShippingZoneRecord {
    pub name: String,
    #[serde(default)]
    pub countries: Vec<CountryCode>,
    pub bands: Vec<ShippingBand>,
}

#[derive(Debug, Deserialize)]
pub struct CompetitorPriceRecord {
    pub sku: Sku,
    pub platform: String,
    pub price: Price,
    pub currency: Currency,
    #[serde(default)]
    pub listing_url: Option<String>,
}
