//! Profit calculation errors.
//!
//! Every failure is local to the evaluation of a single SKU or keyword.
//! Batch callers catch these per item and continue; nothing here is retried
//! inside the pricing core.

use rust_decimal::Decimal;
use thiserror::Error;

use super::ids::{CountryCode, Currency, Sku};

/// Errors raised while computing profit, solving prices or selecting routes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfitError {
    /// No product is registered under the SKU.
    #[error("product with SKU {sku} not found")]
    ProductNotFound { sku: Sku },

    /// Product lacks data required for shipping or duty.
    #[error("product {sku} is missing {field} required for profit calculation")]
    MissingProductData { sku: Sku, field: &'static str },

    /// Neither a caller override nor a registered purchase price exists.
    #[error("no domestic purchase price available for {sku}")]
    MissingPurchasePrice { sku: Sku },

    #[error("invalid domestic purchase price {price} for {sku}")]
    InvalidPurchasePrice { sku: Sku, price: Decimal },

    #[error("invalid overseas selling price {price}")]
    InvalidSellingPrice { price: Decimal },

    /// Margin floors must be zero or positive.
    #[error("invalid minimum margin {margin}")]
    InvalidMargin { margin: Decimal },

    #[error("exchange rate from {from} to {to} unavailable")]
    ExchangeRateUnavailable { from: Currency, to: Currency },

    /// Unknown platform name or platform without a fee schedule.
    #[error("platform {platform} is not configured")]
    PlatformNotConfigured { platform: String },

    #[error("no shipping rate found for {weight_kg}kg to {country}")]
    NoShippingRateFound {
        weight_kg: Decimal,
        country: CountryCode,
    },

    /// An amount left the representable decimal range.
    #[error("arithmetic overflow computing {operation}")]
    ArithmeticOverflow { operation: &'static str },
}

impl ProfitError {
    pub fn rate_unavailable(from: &Currency, to: &Currency) -> Self {
        Self::ExchangeRateUnavailable {
            from: from.clone(),
            to: to.clone(),
        }
    }

    /// Unwrap a checked decimal operation, naming what overflowed.
    pub fn checked(value: Option<Decimal>, operation: &'static str) -> Result<Decimal, Self> {
        value.ok_or(Self::ArithmeticOverflow { operation })
    }
}
