//! Profit breakdown and observed competitor prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::Currency;
use super::money::{Jpy, Price, Rate};

/// Full cost and profit breakdown for one selling price.
///
/// All yen amounts are unrounded; presentation layers round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedProfitDetails {
    pub estimated_profit_jpy: Jpy,
    /// Profit divided by overseas revenue in yen; zero when revenue is zero.
    pub profit_margin: Rate,
    pub domestic_purchase_price_jpy: Jpy,
    pub overseas_selling_price_local: Price,
    pub overseas_currency: Currency,
    pub overseas_selling_price_jpy: Jpy,
    /// Yen per unit of the overseas currency.
    pub exchange_rate: Rate,
    pub international_shipping_cost_jpy: Jpy,
    pub customs_duty_jpy: Jpy,
    /// Always zero: the buyer does not pay the domestic marketplace fee.
    pub domestic_platform_fee_jpy: Jpy,
    pub overseas_platform_fee_jpy: Jpy,
}

impl CalculatedProfitDetails {
    /// Landed cost: everything subtracted from revenue.
    pub fn total_cost_jpy(&self) -> Jpy {
        self.domestic_purchase_price_jpy
            + self.international_shipping_cost_jpy
            + self.customs_duty_jpy
            + self.domestic_platform_fee_jpy
            + self.overseas_platform_fee_jpy
    }

    /// Profit divided by landed cost; zero when cost is zero.
    pub fn cost_markup(&self) -> Rate {
        let cost = self.total_cost_jpy();
        if cost > Decimal::ZERO {
            self.estimated_profit_jpy / cost
        } else {
            Decimal::ZERO
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.estimated_profit_jpy > Decimal::ZERO
    }
}

/// A competitor's listing price on an overseas platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorPrice {
    pub price: Price,
    pub currency: Currency,
    #[serde(default)]
    pub listing_url: Option<String>,
}

impl CompetitorPrice {
    pub fn new(price: Price, currency: Currency) -> Self {
        Self {
            price,
            currency,
            listing_url: None,
        }
    }
}
