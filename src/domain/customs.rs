//! Customs duty rules keyed by HS code prefix and destination country.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{CountryCode, HsCode};
use super::money::Rate;

/// Duty rate for products whose HS code starts with `hs_code_prefix`,
/// optionally restricted to a declared-value bracket in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomsDutyRule {
    pub hs_code_prefix: HsCode,
    pub country_code: CountryCode,
    pub duty_percentage: Rate,
    #[serde(default)]
    pub min_value_usd: Option<Decimal>,
    #[serde(default)]
    pub max_value_usd: Option<Decimal>,
}

impl CustomsDutyRule {
    pub fn validate(&self) -> Result<(), String> {
        if self.duty_percentage < Decimal::ZERO || self.duty_percentage > Decimal::ONE {
            return Err(format!(
                "duty for {}/{} must be within [0, 1], got {}",
                self.hs_code_prefix, self.country_code, self.duty_percentage
            ));
        }
        if let (Some(min), Some(max)) = (self.min_value_usd, self.max_value_usd) {
            if min > max {
                return Err(format!(
                    "duty bracket for {}/{} has min {min} above max {max}",
                    self.hs_code_prefix, self.country_code
                ));
            }
        }
        Ok(())
    }

    /// Both bounds are inclusive; a missing bound is unbounded.
    pub fn applies_to_value(&self, value_usd: Decimal) -> bool {
        self.min_value_usd.map_or(true, |min| value_usd >= min)
            && self.max_value_usd.map_or(true, |max| value_usd <= max)
    }
}

/// Bracketed duty table.
#[derive(Debug, Clone, Default)]
pub struct CustomsDutyTable {
    rules: Vec<CustomsDutyRule>,
}

impl CustomsDutyTable {
    pub fn new(rules: Vec<CustomsDutyRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CustomsDutyRule] {
        &self.rules
    }

    /// Find the applicable rule.
    ///
    /// Candidates are the country's rules whose prefix matches `hs_code`,
    /// tried from the longest prefix down; the first whose value bracket
    /// contains `value_usd` wins.
    pub fn find(
        &self,
        hs_code: &HsCode,
        country: &CountryCode,
        value_usd: Decimal,
    ) -> Option<&CustomsDutyRule> {
        let mut candidates: Vec<&CustomsDutyRule> = self
            .rules
            .iter()
            .filter(|rule| {
                &rule.country_code == country && hs_code.starts_with(&rule.hs_code_prefix)
            })
            .collect();
        candidates.sort_by(|a, b| {
            b.hs_code_prefix
                .as_str()
                .len()
                .cmp(&a.hs_code_prefix.as_str().len())
        });
        candidates
            .into_iter()
            .find(|rule| rule.applies_to_value(value_usd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rule(
        prefix: &str,
        duty: Decimal,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> CustomsDutyRule {
        CustomsDutyRule {
            hs_code_prefix: HsCode::new(prefix),
            country_code: CountryCode::new("US"),
            duty_percentage: duty,
            min_value_usd: min,
            max_value_usd: max,
        }
    }

    #[test]
    fn longest_prefix_wins() {
        let table = CustomsDutyTable::new(vec![
            rule("95", dec!(0.02), None, None),
            rule("9504", dec!(0.05), None, None),
        ]);
        let found = table
            .find(&HsCode::new("950450"), &CountryCode::new("US"), dec!(100))
            .unwrap();
        assert_eq!(found.duty_percentage, dec!(0.05));
    }

    #[test]
    fn falls_back_to_shorter_prefix_outside_bracket() {
        let table = CustomsDutyTable::new(vec![
            rule("95", dec!(0.02), None, None),
            rule("9504", dec!(0.05), Some(dec!(800)), None),
        ]);
        let found = table
            .find(&HsCode::new("9504"), &CountryCode::new("US"), dec!(100))
            .unwrap();
        assert_eq!(found.duty_percentage, dec!(0.02));
    }

    #[test]
    fn bracket_bounds_are_inclusive() {
        let r = rule("9504", dec!(0.05), Some(dec!(800)), Some(dec!(2500)));
        assert!(r.applies_to_value(dec!(800)));
        assert!(r.applies_to_value(dec!(2500)));
        assert!(!r.applies_to_value(dec!(799.99)));
    }

    #[test]
    fn other_country_rules_ignored() {
        let table = CustomsDutyTable::new(vec![rule("9504", dec!(0.05), None, None)]);
        assert!(table
            .find(&HsCode::new("9504"), &CountryCode::new("GB"), dec!(100))
            .is_none());
    }

    #[test]
    fn validate_rejects_inverted_bracket() {
        assert!(rule("9504", dec!(0.05), Some(dec!(10)), Some(dec!(5)))
            .validate()
            .is_err());
    }
}
