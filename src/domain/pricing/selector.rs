//! Competitive listing price selection.
//!
//! The margin floor is hard; undercutting a competitor is only a preference.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ids::Currency;
use crate::domain::money::{floor_to_minor_unit, Price, MINOR_UNIT};
use crate::domain::profit::CompetitorPrice;

/// How the final listing price was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingStrategy {
    /// One minor unit below the cheapest competitor.
    UndercutLowestCompetitor,
    /// Undercutting would breach the margin floor; list at the floor.
    MaintainMinProfit,
    /// No comparable competitor prices; list at the floor.
    #[serde(rename = "NoCompetitorsFound_MaintainMinProfit")]
    NoCompetitorsFound,
}

impl PricingStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UndercutLowestCompetitor => "UndercutLowestCompetitor",
            Self::MaintainMinProfit => "MaintainMinProfit",
            Self::NoCompetitorsFound => "NoCompetitorsFound_MaintainMinProfit",
        }
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chosen price and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceDecision {
    pub price: Price,
    pub strategy: PricingStrategy,
    pub lowest_competitor: Option<Price>,
}

/// Cheapest positive competitor price quoted in `currency`.
pub fn lowest_competitor_price(prices: &[CompetitorPrice], currency: &Currency) -> Option<Price> {
    prices
        .iter()
        .filter(|cp| &cp.currency == currency && cp.price > Price::ZERO)
        .map(|cp| cp.price)
        .min()
}

pub fn select_optimal_price(
    min_selling_price_local: Price,
    currency: &Currency,
    competitors: &[CompetitorPrice],
) -> PriceDecision {
    let lowest_competitor = lowest_competitor_price(competitors, currency);

    let undercut = lowest_competitor.map(|lowest| floor_to_minor_unit(lowest - MINOR_UNIT));
    let (price, strategy) = match undercut {
        Some(undercut) if undercut >= min_selling_price_local => {
            (undercut, PricingStrategy::UndercutLowestCompetitor)
        }
        Some(_) => (min_selling_price_local, PricingStrategy::MaintainMinProfit),
        None => (min_selling_price_local, PricingStrategy::NoCompetitorsFound),
    };

    PriceDecision {
        price,
        strategy,
        lowest_competitor,
    }
}
