//! Analytic inversion of the cost model.
//!
//! Overseas fees and customs duty are percentages of the still-unknown
//! selling price, so the minimum price is solved in closed form:
//!
//! ```text
//! S = (F + S·r) · m        F = fixed yen costs
//! S · (1 − r·m) = F · m    r = fee rate + estimated duty rate
//! S = F·m / (1 − r·m)      m = 1 + min margin
//! ```
//!
//! When `1 − r·m ≤ 0` no finite positive price exists and the solver falls
//! back to `2·F`, reported as [`SolveOutcome::Degenerate`]. A denominator so
//! close to zero that the quotient leaves the decimal range falls back the
//! same way.

use rust_decimal::Decimal;
use serde::Serialize;

use super::cost::{compute_profit, RateBundle};
use crate::domain::error::ProfitError;
use crate::domain::ids::Sku;
use crate::domain::money::{ceil_to_minor_unit, Jpy, Price, Rate};
use crate::domain::profit::CalculatedProfitDetails;

/// Multiplier applied to fixed costs when the inversion has no solution.
const DEGENERATE_COST_MULTIPLIER: Decimal = Decimal::TWO;

/// Linear pricing problem in yen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingProblem {
    /// Costs independent of the selling price.
    pub fixed_costs_jpy: Jpy,
    /// Combined rate of costs proportional to the selling price.
    pub variable_rate: Rate,
    /// Required profit over landed cost.
    pub min_margin: Rate,
}

/// Result of inverting the cost model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolveOutcome {
    /// Exact closed-form solution.
    Solved { price_jpy: Jpy },
    /// Rates and margin leave no positive solution; heuristic `2·F`.
    Degenerate { fallback_price_jpy: Jpy },
}

impl SolveOutcome {
    pub fn price_jpy(&self) -> Jpy {
        match *self {
            Self::Solved { price_jpy } => price_jpy,
            Self::Degenerate { fallback_price_jpy } => fallback_price_jpy,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate { .. })
    }

    /// Marker callers can surface next to the price.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Solved { .. } => "Solved",
            Self::Degenerate { .. } => "FallbackDoubleCost",
        }
    }
}

impl PricingProblem {
    pub fn solve(&self) -> Result<SolveOutcome, ProfitError> {
        let exact = Decimal::ONE.checked_add(self.min_margin).and_then(|multiplier| {
            let variable_share = self.variable_rate.checked_mul(multiplier)?;
            let denominator = Decimal::ONE.checked_sub(variable_share)?;
            if denominator <= Decimal::ZERO {
                return None;
            }
            self.fixed_costs_jpy.checked_mul(multiplier)?.checked_div(denominator)
        });

        match exact {
            Some(price_jpy) => Ok(SolveOutcome::Solved { price_jpy }),
            None => Ok(SolveOutcome::Degenerate {
                fallback_price_jpy: ProfitError::checked(
                    self.fixed_costs_jpy.checked_mul(DEGENERATE_COST_MULTIPLIER),
                    "fallback price",
                )?,
            }),
        }
    }
}

/// Minimum listing price together with its consistent profit breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinPriceSolution {
    /// Solved price rounded up to the minor unit.
    pub min_selling_price_local: Price,
    pub outcome: SolveOutcome,
    pub problem: PricingProblem,
    /// Breakdown recomputed at exactly `min_selling_price_local`.
    pub profit_details: CalculatedProfitDetails,
}

impl MinPriceSolution {
    /// The unrounded solved price in local currency.
    pub fn exact_price_local(&self, rates: &RateBundle) -> Result<Price, ProfitError> {
        rates.from_jpy(self.outcome.price_jpy())
    }
}

/// Build the pricing problem for a product.
///
/// The duty rate is estimated from the purchase price converted to USD,
/// since the duty bracket of the unknown selling price cannot be known
/// before solving.
pub fn pricing_problem(
    rates: &RateBundle,
    purchase_price_jpy: Jpy,
    min_margin: Rate,
    duty_rate: impl Fn(Decimal) -> Rate,
) -> Result<PricingProblem, ProfitError> {
    let domestic_fee_jpy = Decimal::ZERO;
    let fixed_costs_jpy = ProfitError::checked(
        [rates.shipping_jpy, domestic_fee_jpy, rates.fixed_fee_jpy()?]
            .into_iter()
            .try_fold(purchase_price_jpy, Decimal::checked_add),
        "fixed costs",
    )?;
    let estimated_duty = duty_rate(rates.jpy_to_usd(purchase_price_jpy)?);

    Ok(PricingProblem {
        fixed_costs_jpy,
        variable_rate: rates.fee_rate + estimated_duty,
        min_margin,
    })
}

/// Solve the minimum selling price under `min_margin` and recompute the
/// profit breakdown at that exact price.
pub fn solve_min_selling_price(
    sku: &Sku,
    rates: &RateBundle,
    purchase_price_jpy: Jpy,
    min_margin: Rate,
    duty_rate: impl Fn(Decimal) -> Rate,
) -> Result<MinPriceSolution, ProfitError> {
    if purchase_price_jpy <= Decimal::ZERO {
        return Err(ProfitError::InvalidPurchasePrice {
            sku: sku.clone(),
            price: purchase_price_jpy,
        });
    }

    let problem = pricing_problem(rates, purchase_price_jpy, min_margin, &duty_rate)?;
    let outcome = problem.solve()?;
    let min_selling_price_local = ceil_to_minor_unit(rates.from_jpy(outcome.price_jpy())?);
    let profit_details = compute_profit(
        sku,
        rates,
        min_selling_price_local,
        purchase_price_jpy,
        &duty_rate,
    )?;

    Ok(MinPriceSolution {
        min_selling_price_local,
        outcome,
        problem,
        profit_details,
    })
}
