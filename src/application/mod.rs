//! Application services (use cases).
//!
//! These services resolve inputs through the ports and run the pure
//! pricing functions of the domain.

pub mod cache;
pub mod pricing;
pub mod recommendation;

pub use cache::{CachedExchangeRates, Clock, SystemClock, TtlCache};
pub use pricing::{OptimalPrice, PricingRequest, PricingService};
pub use recommendation::{
    RateSource, Recommendation, RecommendationReport, RecommendationService, ScanFailure,
};
