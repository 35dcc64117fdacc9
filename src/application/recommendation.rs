//! Batch screening of keywords for profitable sourcing routes.
//!
//! For every keyword all eight marketplaces are scanned concurrently. Each
//! domestic listing is then routed to its most profitable overseas platform
//! with the coarse screening model. Scan failures only remove the failing
//! platform from that keyword.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::{join, join_all};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::cache::{Clock, SystemClock, TtlCache};
use crate::config::{Config, RecommendationConfig, ScreeningConfig};
use crate::domain::pricing::{select_best_route, RouteCandidate, RouteEstimate, ScreeningRates};
use crate::domain::{
    median_usd_price, Currency, DomesticListing, DomesticPlatform, Jpy, OverseasPlatform, Price,
    Rate,
};
use crate::port::{ExchangeRateSource, MarketScanner};

/// Where the report's USD/JPY rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Resolved through the exchange-rate source.
    Lookup,
    /// Configured fallback; the source could not resolve USD/JPY.
    Fallback,
}

/// A screened sourcing route. Screening-grade numbers only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub keyword: String,
    pub title: String,
    pub domestic_platform: DomesticPlatform,
    pub domestic_price_jpy: Jpy,
    pub domestic_url: Option<String>,
    pub image_url: Option<String>,
    pub overseas_platform: OverseasPlatform,
    /// Median observed price.
    pub overseas_price_usd: Price,
    pub overseas_search_url: String,
    /// Whole yen, rounded down.
    pub estimated_profit_jpy: Jpy,
    /// Profit over revenue, two decimal places.
    pub profit_margin: Rate,
    pub exchange_rate: Rate,
    /// "Mercari → eBay".
    pub combination: String,
}

impl Recommendation {
    fn new(
        keyword: &str,
        listing: &DomesticListing,
        route: &RouteEstimate,
        usd_to_jpy: Rate,
    ) -> Self {
        Self {
            keyword: keyword.to_string(),
            title: listing.title.clone(),
            domestic_platform: listing.platform,
            domestic_price_jpy: listing.price_jpy,
            domestic_url: listing.url.clone(),
            image_url: listing.image_url.clone(),
            overseas_platform: route.platform,
            overseas_price_usd: route.price_usd,
            overseas_search_url: route.platform.search_url(keyword),
            estimated_profit_jpy: route.profit_jpy.floor(),
            profit_margin: route
                .margin()
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            exchange_rate: usd_to_jpy,
            combination: format!("{} → {}", listing.platform, route.platform),
        }
    }
}

/// A platform scan that failed for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanFailure {
    pub keyword: String,
    pub platform: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReport {
    /// Keywords with at least one reportable route, or the requested
    /// keywords when none qualified.
    pub keywords: Vec<String>,
    /// False when `keywords` is the unscreened fallback list.
    pub from_price_check: bool,
    pub products: Vec<Recommendation>,
    pub exchange_rate: Rate,
    pub exchange_rate_source: RateSource,
    pub failures: Vec<ScanFailure>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Default)]
struct KeywordOutcome {
    products: Vec<Recommendation>,
    failures: Vec<ScanFailure>,
}

pub struct RecommendationService<M, X> {
    scanner: M,
    rates: X,
    screening: ScreeningConfig,
    limits: RecommendationConfig,
    fallback_usd_jpy: Decimal,
    clock: Arc<dyn Clock>,
    reports: TtlCache<Vec<String>, Arc<RecommendationReport>>,
}

impl<M, X> RecommendationService<M, X>
where
    M: MarketScanner,
    X: ExchangeRateSource,
{
    pub fn new(scanner: M, rates: X, config: &Config) -> Self {
        Self::with_clock(scanner, rates, config, Arc::new(SystemClock))
    }

    pub fn with_clock(scanner: M, rates: X, config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            scanner,
            rates,
            screening: config.screening.clone(),
            limits: config.recommendation.clone(),
            fallback_usd_jpy: config.exchange.fallback_usd_jpy,
            reports: TtlCache::with_clock(config.report_ttl(), Arc::clone(&clock)),
            clock,
        }
    }

    pub fn scanner(&self) -> &M {
        &self.scanner
    }

    pub fn report_ttl(&self) -> Duration {
        Duration::from_secs(self.limits.cache_ttl_secs)
    }

    /// Screen `keywords`, serving a memoized report while it is fresh.
    pub async fn recommend(&self, keywords: &[String]) -> Arc<RecommendationReport> {
        let key = keywords.to_vec();
        if let Some(report) = self.reports.get(&key) {
            debug!(keywords = keywords.len(), "Serving cached recommendation report");
            return report;
        }

        let report = Arc::new(self.screen(keywords).await);
        self.reports.insert(key, Arc::clone(&report));
        report
    }

    fn usd_to_jpy(&self) -> (Rate, RateSource) {
        match self.rates.exchange_rate(&Currency::usd(), &Currency::jpy()) {
            Some(rate) => (rate, RateSource::Lookup),
            None => {
                warn!(
                    rate = %self.fallback_usd_jpy,
                    "USD/JPY unavailable, using fallback rate"
                );
                (self.fallback_usd_jpy, RateSource::Fallback)
            }
        }
    }

    async fn screen(&self, keywords: &[String]) -> RecommendationReport {
        let (usd_to_jpy, source) = self.usd_to_jpy();
        let rates = self.screening.rates();

        let outcomes = join_all(
            keywords
                .iter()
                .map(|keyword| self.screen_keyword(keyword, usd_to_jpy, &rates)),
        )
        .await;

        let mut profitable = Vec::new();
        let mut products = Vec::new();
        let mut failures = Vec::new();
        for (keyword, mut outcome) in keywords.iter().zip(outcomes) {
            failures.append(&mut outcome.failures);
            if outcome.products.is_empty() {
                continue;
            }
            profitable.push(keyword.clone());
            outcome
                .products
                .sort_by(|a, b| b.estimated_profit_jpy.cmp(&a.estimated_profit_jpy));
            outcome.products.truncate(self.limits.max_products_per_keyword);
            products.append(&mut outcome.products);
        }

        products.sort_by(|a, b| b.estimated_profit_jpy.cmp(&a.estimated_profit_jpy));
        products.truncate(self.limits.max_products_total);

        let from_price_check = !profitable.is_empty();
        let mut keywords = if from_price_check {
            profitable
        } else {
            keywords.to_vec()
        };
        keywords.truncate(self.limits.max_keywords);

        info!(
            keywords = keywords.len(),
            products = products.len(),
            failures = failures.len(),
            rate = %usd_to_jpy,
            "Recommendation screening complete"
        );

        RecommendationReport {
            keywords,
            from_price_check,
            products,
            exchange_rate: usd_to_jpy,
            exchange_rate_source: source,
            failures,
            generated_at: self.clock.now(),
        }
    }

    async fn screen_keyword(
        &self,
        keyword: &str,
        usd_to_jpy: Rate,
        rates: &ScreeningRates,
    ) -> KeywordOutcome {
        let domestic = join_all(DomesticPlatform::ALL.iter().map(|&platform| async move {
            (platform, self.scanner.domestic_listings(platform, keyword).await)
        }));
        let overseas = join_all(OverseasPlatform::ALL.iter().map(|&platform| async move {
            (platform, self.scanner.overseas_prices(platform, keyword).await)
        }));
        let (domestic, overseas) = join(domestic, overseas).await;

        let mut outcome = KeywordOutcome::default();
        let mut fail = |platform: String, error: String| {
            warn!(keyword, platform = %platform, error = %error, "Platform scan failed");
            outcome.failures.push(ScanFailure {
                keyword: keyword.to_string(),
                platform,
                error,
            });
        };

        let mut candidates = Vec::with_capacity(OverseasPlatform::ALL.len());
        for (platform, result) in overseas {
            match result {
                Ok(prices) => {
                    let fee = self.screening.fees.for_platform(platform);
                    candidates.push(RouteCandidate {
                        platform,
                        price_usd: median_usd_price(&prices, self.limits.sample_size),
                        fee_rate: fee.rate,
                        fixed_fee_usd: fee.fixed_usd,
                    });
                }
                Err(e) => fail(platform.to_string(), e.to_string()),
            }
        }

        let mut listings = Vec::new();
        for (platform, result) in domestic {
            match result {
                Ok(found) => listings.extend(
                    found
                        .into_iter()
                        .filter(DomesticListing::is_candidate)
                        .take(self.limits.listings_per_platform),
                ),
                Err(e) => fail(platform.to_string(), e.to_string()),
            }
        }

        if candidates.iter().all(|c| c.price_usd <= Decimal::ZERO) {
            debug!(keyword, "No overseas prices observed, skipping keyword");
            return outcome;
        }

        outcome.products = listings
            .iter()
            .filter_map(|listing| {
                select_best_route(listing.price_jpy, &candidates, usd_to_jpy, rates)
                    .map(|route| Recommendation::new(keyword, listing, &route, usd_to_jpy))
            })
            .collect();
        debug!(
            keyword,
            listings = listings.len(),
            routes = outcome.products.len(),
            "Keyword screened"
        );
        outcome
    }
}
