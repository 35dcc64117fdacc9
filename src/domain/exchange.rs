//! Exchange rates between currency pairs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::Currency;
use super::money::Rate;

/// Rate for converting one unit of `from` into `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub from: Currency,
    pub to: Currency,
    pub rate: Rate,
}

impl ExchangeRate {
    /// Create an exchange rate; the rate must be positive.
    pub fn try_new(from: Currency, to: Currency, rate: Rate) -> Result<Self, String> {
        if rate <= Decimal::ZERO {
            return Err(format!("exchange rate {from}->{to} must be positive, got {rate}"));
        }
        Ok(Self { from, to, rate })
    }

    /// The rate for the opposite direction.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            rate: Decimal::ONE / self.rate,
        }
    }

    pub fn matches(&self, from: &Currency, to: &Currency) -> bool {
        &self.from == from && &self.to == to
    }

    /// Whether `other` is the inverse pair within `tolerance` (relative).
    pub fn is_consistent_with(&self, other: &ExchangeRate, tolerance: Decimal) -> bool {
        if !self.matches(&other.to, &other.from) {
            return true;
        }
        let product = self.rate * other.rate;
        (product - Decimal::ONE).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_non_positive_rate() {
        assert!(ExchangeRate::try_new(Currency::usd(), Currency::jpy(), dec!(0)).is_err());
    }

    #[test]
    fn inverse_round_trips() {
        let rate = ExchangeRate::try_new(Currency::usd(), Currency::jpy(), dec!(150)).unwrap();
        let inv = rate.inverse();
        assert!(inv.matches(&Currency::jpy(), &Currency::usd()));
        assert!(rate.is_consistent_with(&inv, dec!(0.000001)));
    }

    #[test]
    fn detects_inconsistent_pair() {
        let a = ExchangeRate::try_new(Currency::usd(), Currency::jpy(), dec!(150)).unwrap();
        let b = ExchangeRate::try_new(Currency::jpy(), Currency::usd(), dec!(0.0080)).unwrap();
        assert!(!a.is_consistent_with(&b, dec!(0.01)));
    }
}
