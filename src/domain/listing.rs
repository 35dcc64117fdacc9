//! Observed market data: domestic sourcing listings and overseas sold prices.

use serde::{Deserialize, Serialize};

use super::ids::Currency;
use super::money::{Jpy, Price};
use super::platform::DomesticPlatform;

/// A listing that can be bought on a domestic marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticListing {
    pub platform: DomesticPlatform,
    pub title: String,
    pub price_jpy: Jpy,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl DomesticListing {
    /// Usable as a sourcing candidate: priced and titled.
    pub fn is_candidate(&self) -> bool {
        self.price_jpy > Jpy::ZERO && !self.title.trim().is_empty()
    }
}

/// A price observed on an overseas marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedPrice {
    pub price: Price,
    pub currency: Currency,
}

impl ObservedPrice {
    pub fn usd(price: Price) -> Self {
        Self {
            price,
            currency: Currency::usd(),
        }
    }
}

/// Median of the first `sample_size` positive USD prices, in observation
/// order. Even counts take the upper middle element. Zero when nothing
/// qualifies.
pub fn median_usd_price(prices: &[ObservedPrice], sample_size: usize) -> Price {
    let usd = Currency::usd();
    let mut sample: Vec<Price> = prices
        .iter()
        .filter(|p| p.currency == usd && p.price > Price::ZERO)
        .map(|p| p.price)
        .take(sample_size)
        .collect();

    if sample.is_empty() {
        return Price::ZERO;
    }
    sample.sort();
    sample[sample.len() / 2]
}
