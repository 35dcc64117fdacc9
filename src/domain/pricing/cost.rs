//! Landed-cost and profit model for one selling price.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::error::ProfitError;
use crate::domain::ids::{Currency, Sku};
use crate::domain::money::{Jpy, Price, Rate};
use crate::domain::profit::CalculatedProfitDetails;

/// Price-independent inputs resolved from the lookup collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateBundle {
    /// Currency the overseas platform lists in.
    pub currency: Currency,
    /// Yen per unit of `currency`; exactly one for JPY.
    pub rate_to_jpy: Rate,
    /// Yen per US dollar, for customs value brackets.
    pub usd_to_jpy: Rate,
    pub shipping_jpy: Jpy,
    /// Percentage fee of the overseas platform for this product.
    pub fee_rate: Rate,
    /// Flat per-transaction fee in `currency`.
    pub fixed_fee_local: Price,
}

impl RateBundle {
    pub fn to_jpy(&self, local: Price) -> Result<Jpy, ProfitError> {
        ProfitError::checked(local.checked_mul(self.rate_to_jpy), "yen conversion")
    }

    pub fn from_jpy(&self, jpy: Jpy) -> Result<Price, ProfitError> {
        ProfitError::checked(jpy.checked_div(self.rate_to_jpy), "local conversion")
    }

    pub fn jpy_to_usd(&self, jpy: Jpy) -> Result<Decimal, ProfitError> {
        ProfitError::checked(jpy.checked_div(self.usd_to_jpy), "customs value")
    }

    pub fn fixed_fee_jpy(&self) -> Result<Jpy, ProfitError> {
        self.to_jpy(self.fixed_fee_local)
    }
}

/// Compute every cost component and the net profit for `selling_price_local`.
///
/// `duty_rate` maps a declared value in USD to the applicable duty rate.
/// The domestic platform fee is always zero: the marketplace fee is paid
/// by the seller and is already part of the observed purchase price.
pub fn compute_profit(
    sku: &Sku,
    rates: &RateBundle,
    selling_price_local: Price,
    purchase_price_jpy: Jpy,
    duty_rate: impl Fn(Decimal) -> Rate,
) -> Result<CalculatedProfitDetails, ProfitError> {
    if selling_price_local <= Decimal::ZERO {
        return Err(ProfitError::InvalidSellingPrice {
            price: selling_price_local,
        });
    }
    if purchase_price_jpy <= Decimal::ZERO {
        return Err(ProfitError::InvalidPurchasePrice {
            sku: sku.clone(),
            price: purchase_price_jpy,
        });
    }

    let selling_price_jpy = rates.to_jpy(selling_price_local)?;
    let domestic_fee_jpy = Decimal::ZERO;
    let fixed_fee_jpy = rates.fixed_fee_jpy()?;
    let overseas_fee_jpy = ProfitError::checked(
        selling_price_jpy
            .checked_mul(rates.fee_rate)
            .and_then(|fee| fee.checked_add(fixed_fee_jpy)),
        "overseas fee",
    )?;
    let duty = duty_rate(rates.jpy_to_usd(selling_price_jpy)?);
    let customs_jpy = ProfitError::checked(selling_price_jpy.checked_mul(duty), "customs duty")?;

    let total_cost = ProfitError::checked(
        [
            rates.shipping_jpy,
            customs_jpy,
            domestic_fee_jpy,
            overseas_fee_jpy,
        ]
        .into_iter()
        .try_fold(purchase_price_jpy, Decimal::checked_add),
        "total cost",
    )?;
    let profit = ProfitError::checked(selling_price_jpy.checked_sub(total_cost), "profit")?;
    let margin = if selling_price_jpy > Decimal::ZERO {
        ProfitError::checked(profit.checked_div(selling_price_jpy), "profit margin")?
    } else {
        Decimal::ZERO
    };

    Ok(CalculatedProfitDetails {
        estimated_profit_jpy: profit,
        profit_margin: margin,
        domestic_purchase_price_jpy: purchase_price_jpy,
        overseas_selling_price_local: selling_price_local,
        overseas_currency: rates.currency.clone(),
        overseas_selling_price_jpy: selling_price_jpy,
        exchange_rate: rates.rate_to_jpy,
        international_shipping_cost_jpy: rates.shipping_jpy,
        customs_duty_jpy: customs_jpy,
        domestic_platform_fee_jpy: domestic_fee_jpy,
        overseas_platform_fee_jpy: overseas_fee_jpy,
    })
}
