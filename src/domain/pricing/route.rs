//! Coarse multi-platform route screening.
//!
//! Flat shipping and a de-minimis customs approximation stand in for the
//! full cost model, so many listing/platform pairs can be screened in one
//! pass. Estimates are screening-grade and are kept in their own type.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::money::{Jpy, Price, Rate};
use crate::domain::platform::OverseasPlatform;

/// Constants of the screening approximation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreeningRates {
    /// Smallest profit a route must reach to be reported.
    pub min_profit_jpy: Jpy,
    pub shipping_estimate_jpy: Jpy,
    /// Customs applies only to prices strictly above this value.
    pub de_minimis_usd: Price,
    pub customs_rate: Rate,
}

impl Default for ScreeningRates {
    fn default() -> Self {
        Self {
            min_profit_jpy: dec!(1100),
            shipping_estimate_jpy: dec!(3500),
            de_minimis_usd: dec!(800),
            customs_rate: dec!(0.05),
        }
    }
}

/// One overseas destination with its observed market price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteCandidate {
    pub platform: OverseasPlatform,
    pub price_usd: Price,
    pub fee_rate: Rate,
    pub fixed_fee_usd: Price,
}

/// Screening-grade profit estimate for selling on one platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteEstimate {
    pub platform: OverseasPlatform,
    pub price_usd: Price,
    pub revenue_jpy: Jpy,
    pub platform_fee_jpy: Jpy,
    pub customs_jpy: Jpy,
    pub shipping_jpy: Jpy,
    pub domestic_price_jpy: Jpy,
    pub profit_jpy: Jpy,
}

impl RouteEstimate {
    /// Profit over revenue; zero without revenue.
    pub fn margin(&self) -> Rate {
        if self.revenue_jpy > Decimal::ZERO {
            self.profit_jpy / self.revenue_jpy
        } else {
            Decimal::ZERO
        }
    }
}

/// Estimate one route. `None` when the candidate has no usable price.
pub fn estimate_route(
    domestic_price_jpy: Jpy,
    candidate: &RouteCandidate,
    usd_to_jpy: Rate,
    rates: &ScreeningRates,
) -> Option<RouteEstimate> {
    if candidate.price_usd <= Decimal::ZERO {
        return None;
    }

    let revenue_jpy = candidate.price_usd * usd_to_jpy;
    let platform_fee_jpy = revenue_jpy * candidate.fee_rate + candidate.fixed_fee_usd * usd_to_jpy;
    let customs_jpy = if candidate.price_usd > rates.de_minimis_usd {
        revenue_jpy * rates.customs_rate
    } else {
        Decimal::ZERO
    };
    let profit_jpy = revenue_jpy
        - platform_fee_jpy
        - domestic_price_jpy
        - rates.shipping_estimate_jpy
        - customs_jpy;

    Some(RouteEstimate {
        platform: candidate.platform,
        price_usd: candidate.price_usd,
        revenue_jpy,
        platform_fee_jpy,
        customs_jpy,
        shipping_jpy: rates.shipping_estimate_jpy,
        domestic_price_jpy,
        profit_jpy,
    })
}

/// Pick the most profitable destination for one domestic listing.
///
/// Equal profits resolve to the platform declared first in
/// [`OverseasPlatform`], whatever the candidate order. Returns `None` when
/// no priced candidate reaches `min_profit_jpy`.
pub fn select_best_route(
    domestic_price_jpy: Jpy,
    candidates: &[RouteCandidate],
    usd_to_jpy: Rate,
    rates: &ScreeningRates,
) -> Option<RouteEstimate> {
    candidates
        .iter()
        .filter_map(|c| estimate_route(domestic_price_jpy, c, usd_to_jpy, rates))
        .fold(None, |best: Option<RouteEstimate>, next| match best {
            Some(current)
                if current.profit_jpy > next.profit_jpy
                    || (current.profit_jpy == next.profit_jpy
                        && current.platform <= next.platform) =>
            {
                Some(current)
            }
            _ => Some(next),
        })
        .filter(|best| best.profit_jpy >= rates.min_profit_jpy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(platform: OverseasPlatform, price: Price, fee: Rate) -> RouteCandidate {
        RouteCandidate {
            platform,
            price_usd: price,
            fee_rate: fee,
            fixed_fee_usd: Decimal::ZERO,
        }
    }

    #[test]
    fn estimates_all_components() {
        let c = RouteCandidate {
            fixed_fee_usd: dec!(0.30),
            ..candidate(OverseasPlatform::Ebay, dec!(100), dec!(0.129))
        };
        let est = estimate_route(dec!(5000), &c, dec!(150), &ScreeningRates::default()).unwrap();

        assert_eq!(est.revenue_jpy, dec!(15000));
        assert_eq!(est.platform_fee_jpy, dec!(1980));
        assert_eq!(est.customs_jpy, Decimal::ZERO);
        // 15000 - 1980 - 5000 - 3500
        assert_eq!(est.profit_jpy, dec!(4520));
    }

    #[test]
    fn customs_only_above_de_minimis() {
        let rates = ScreeningRates::default();
        let at = estimate_route(
            dec!(1000),
            &candidate(OverseasPlatform::Amazon, dec!(800), dec!(0.15)),
            dec!(150),
            &rates,
        )
        .unwrap();
        assert_eq!(at.customs_jpy, Decimal::ZERO);

        let above = estimate_route(
            dec!(1000),
            &candidate(OverseasPlatform::Amazon, dec!(800.01), dec!(0.15)),
            dec!(150),
            &rates,
        )
        .unwrap();
        assert_eq!(above.customs_jpy, dec!(800.01) * dec!(150) * dec!(0.05));
    }

    #[test]
    fn picks_highest_profit() {
        let candidates = [
            candidate(OverseasPlatform::Ebay, dec!(100), dec!(0.129)),
            candidate(OverseasPlatform::StockX, dec!(120), dec!(0.12)),
            candidate(OverseasPlatform::MercariUs, dec!(0), dec!(0.10)),
        ];
        let best = select_best_route(dec!(5000), &candidates, dec!(150), &ScreeningRates::default())
            .unwrap();
        assert_eq!(best.platform, OverseasPlatform::StockX);
    }

    #[test]
    fn tie_resolves_by_platform_priority_not_input_order() {
        let forward = [
            candidate(OverseasPlatform::Amazon, dec!(100), dec!(0.10)),
            candidate(OverseasPlatform::MercariUs, dec!(100), dec!(0.10)),
        ];
        let mut reversed = forward;
        reversed.reverse();

        let rates = ScreeningRates::default();
        let a = select_best_route(dec!(1000), &forward, dec!(150), &rates).unwrap();
        let b = select_best_route(dec!(1000), &reversed, dec!(150), &rates).unwrap();
        assert_eq!(a.platform, OverseasPlatform::Amazon);
        assert_eq!(b.platform, OverseasPlatform::Amazon);
    }

    #[test]
    fn below_threshold_is_not_reported() {
        let rates = ScreeningRates::default();
        // 15000 - 1500 - 3500 - x = 1100 exactly at x = 8900
        let c = [candidate(OverseasPlatform::MercariUs, dec!(100), dec!(0.10))];
        assert!(select_best_route(dec!(8900), &c, dec!(150), &rates).is_some());
        assert!(select_best_route(dec!(8900.01), &c, dec!(150), &rates).is_none());
    }

    #[test]
    fn never_returns_unpriced_or_unprofitable_route() {
        let rates = ScreeningRates::default();
        let candidates = [
            candidate(OverseasPlatform::Ebay, dec!(0), dec!(0)),
            candidate(OverseasPlatform::Amazon, dec!(-10), dec!(0)),
        ];
        assert!(select_best_route(dec!(1), &candidates, dec!(150), &rates).is_none());
        assert!(select_best_route(dec!(1), &[], dec!(150), &rates).is_none());

        for domestic in [dec!(100), dec!(5000), dec!(20000)] {
            let candidates = [
                candidate(OverseasPlatform::Ebay, dec!(90), dec!(0.129)),
                candidate(OverseasPlatform::StockX, dec!(0), dec!(0.12)),
            ];
            if let Some(best) = select_best_route(domestic, &candidates, dec!(150), &rates) {
                assert!(best.price_usd > Decimal::ZERO);
                assert!(best.profit_jpy >= rates.min_profit_jpy);
            }
        }
    }

    #[test]
    fn margin_is_profit_over_revenue() {
        let est = estimate_route(
            dec!(5000),
            &candidate(OverseasPlatform::StockX, dec!(100), dec!(0.12)),
            dec!(150),
            &ScreeningRates::default(),
        )
        .unwrap();
        assert_eq!(est.margin(), est.profit_jpy / dec!(15000));
    }
}
