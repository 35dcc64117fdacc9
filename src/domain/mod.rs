//! Marketplace-agnostic pricing domain. No I/O.

mod customs;
mod error;
mod exchange;
mod ids;
mod listing;
mod money;
mod platform;
mod product;
mod profit;
mod shipping;

pub mod pricing;

// Identifiers and money
pub use ids::{CountryCode, Currency, HsCode, Sku};
pub use money::{ceil_to_minor_unit, floor_to_minor_unit, Jpy, Price, Rate, MINOR_UNIT};

// Reference data
pub use customs::{CustomsDutyRule, CustomsDutyTable};
pub use exchange::ExchangeRate;
pub use platform::{DomesticPlatform, OverseasPlatform, PlatformFeeSchedule, ProductCategory};
pub use product::{Product, ShippableProduct};
pub use shipping::{ShippingBand, ShippingTable, ShippingZone, DEFAULT_ZONE};

// Market observations
pub use listing::{median_usd_price, DomesticListing, ObservedPrice};

// Results
pub use error::ProfitError;
pub use profit::{CalculatedProfitDetails, CompetitorPrice};
