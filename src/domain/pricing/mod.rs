//! Pricing math over already-resolved rates.

mod cost;
mod route;
mod selector;
mod solver;

pub use cost::{compute_profit, RateBundle};
pub use route::{estimate_route, select_best_route, RouteCandidate, RouteEstimate, ScreeningRates};
pub use selector::{lowest_competitor_price, select_optimal_price, PriceDecision, PricingStrategy};
pub use solver::{
    pricing_problem, solve_min_selling_price, MinPriceSolution, PricingProblem, SolveOutcome,
};
