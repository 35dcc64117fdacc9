//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`ProductCatalog`], [`FeeScheduleSource`], [`ExchangeRateSource`],
//!   [`ShippingRateSource`], [`CustomsDutySource`], [`CompetitorPriceSource`]:
//!   synchronous reference-data lookups consumed by the pricing service
//! - [`ReferenceData`]: all lookups at once
//! - [`MarketScanner`]: async keyword scans of domestic and overseas
//!   marketplaces for batch route screening

mod lookup;
mod market;

pub use lookup::{
    CompetitorPriceSource, CustomsDutySource, ExchangeRateSource, FeeScheduleSource,
    ProductCatalog, ReferenceData, ShippingRateSource,
};
pub use market::MarketScanner;
