//! Batch screening tests with a scripted market.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sedori::adapter::reference::ReferenceTables;
use sedori::application::{RateSource, RecommendationService};
use sedori::config::Config;
use sedori::domain::{Currency, DomesticPlatform, OverseasPlatform, Rate};
use sedori::port::ExchangeRateSource;
use sedori::testkit::clock::ManualClock;
use sedori::testkit::config::config;
use sedori::testkit::fixtures::{self, listing, usd_prices};
use sedori::testkit::market::ScriptedScanner;

struct NoRates;

impl ExchangeRateSource for NoRates {
    fn exchange_rate(&self, _from: &Currency, _to: &Currency) -> Option<Rate> {
        None
    }
}

fn rates() -> Arc<ReferenceTables> {
    Arc::new(fixtures::reference_tables())
}

fn keywords(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

/// eBay median $110, StockX $115. Only the Mercari listing is profitable.
fn gameboy_market() -> ScriptedScanner {
    ScriptedScanner::new()
        .with_listing(
            "gameboy",
            listing(DomesticPlatform::Mercari, "Game Boy Color", dec!(8000)),
        )
        .with_listing(
            "gameboy",
            listing(DomesticPlatform::YahooAuctions, "Game Boy Pocket", dec!(12000)),
        )
        .with_listing(
            "gameboy",
            listing(DomesticPlatform::Rakuma, "Game Boy (price hidden)", dec!(0)),
        )
        .with_prices(
            "gameboy",
            OverseasPlatform::Ebay,
            usd_prices(&[dec!(100), dec!(120), dec!(110)]),
        )
        .with_prices("gameboy", OverseasPlatform::StockX, usd_prices(&[dec!(115)]))
}

#[tokio::test]
async fn test_best_route_per_listing() {
    let service = RecommendationService::new(gameboy_market(), rates(), &config());
    let report = service.recommend(&keywords(&["gameboy"])).await;

    assert!(report.from_price_check);
    assert_eq!(report.keywords, keywords(&["gameboy"]));
    assert_eq!(report.exchange_rate, dec!(150));
    assert_eq!(report.exchange_rate_source, RateSource::Lookup);
    assert!(report.failures.is_empty());

    // StockX: 17250 - 2070 - 8000 - 3500 = 3680 beats eBay's 2826.5.
    assert_eq!(report.products.len(), 1);
    let product = &report.products[0];
    assert_eq!(product.overseas_platform, OverseasPlatform::StockX);
    assert_eq!(product.overseas_price_usd, dec!(115));
    assert_eq!(product.estimated_profit_jpy, dec!(3680));
    assert_eq!(product.profit_margin, dec!(0.21));
    assert_eq!(product.combination, "Mercari → StockX");
    assert_eq!(
        product.overseas_search_url,
        "https://stockx.com/search?s=gameboy"
    );
}

#[tokio::test]
async fn test_failed_platforms_are_reported_and_skipped() {
    let scanner = gameboy_market().failing("StockX").failing("Rakuma");
    let service = RecommendationService::new(scanner, rates(), &config());
    let report = service.recommend(&keywords(&["gameboy"])).await;

    let mut failed: Vec<_> = report.failures.iter().map(|f| f.platform.as_str()).collect();
    failed.sort_unstable();
    assert_eq!(failed, ["Rakuma", "StockX"]);
    assert!(report.failures.iter().all(|f| f.keyword == "gameboy"));

    // eBay still routes the Mercari listing: floor(2826.5).
    assert_eq!(report.products.len(), 1);
    assert_eq!(report.products[0].overseas_platform, OverseasPlatform::Ebay);
    assert_eq!(report.products[0].estimated_profit_jpy, dec!(2826));
}

#[tokio::test]
async fn test_fallback_rate_when_lookup_fails() {
    let service = RecommendationService::new(gameboy_market(), NoRates, &config());
    let report = service.recommend(&keywords(&["gameboy"])).await;

    assert_eq!(report.exchange_rate_source, RateSource::Fallback);
    assert_eq!(report.exchange_rate, dec!(149));
    // 115 * 149 = 17135; 17135 - 2056.2 - 8000 - 3500 = 3578.8
    assert_eq!(report.products[0].estimated_profit_jpy, dec!(3578));
    assert_eq!(report.products[0].exchange_rate, dec!(149));
}

#[tokio::test]
async fn test_unprofitable_run_falls_back_to_requested_keywords() {
    let scanner = ScriptedScanner::new()
        .with_listing(
            "camera",
            listing(DomesticPlatform::Mercari, "Film camera", dec!(40000)),
        )
        .with_prices("camera", OverseasPlatform::Ebay, usd_prices(&[dec!(120)]));
    let service = RecommendationService::new(scanner, rates(), &config());
    let requested = keywords(&["camera", "lens"]);
    let report = service.recommend(&requested).await;

    assert!(report.products.is_empty());
    assert!(!report.from_price_check);
    assert_eq!(report.keywords, requested);
}

#[tokio::test]
async fn test_keyword_without_overseas_prices_is_skipped() {
    let scanner = ScriptedScanner::new()
        .with_listing(
            "walkman",
            listing(DomesticPlatform::Mercari, "Walkman WM-2", dec!(100)),
        )
        .with_prices(
            "walkman",
            OverseasPlatform::Amazon,
            vec![fixtures::jpy_price(dec!(50000))],
        );
    let service = RecommendationService::new(scanner, rates(), &config());
    let report = service.recommend(&keywords(&["walkman"])).await;
    assert!(report.products.is_empty());
}

#[tokio::test]
async fn test_caps_per_keyword_and_overall() {
    let mut cfg = config();
    cfg.recommendation.max_products_per_keyword = 2;
    cfg.recommendation.max_products_total = 3;

    let mut scanner = ScriptedScanner::new()
        .with_prices("a", OverseasPlatform::Ebay, usd_prices(&[dec!(100)]))
        .with_prices("b", OverseasPlatform::Ebay, usd_prices(&[dec!(90)]));
    for (keyword, prices) in [("a", [1000, 2000, 3000]), ("b", [500, 1500, 2500])] {
        for price in prices {
            scanner = scanner.with_listing(
                keyword,
                listing(
                    DomesticPlatform::Mercari,
                    &format!("{keyword} {price}"),
                    Decimal::from(price),
                ),
            );
        }
    }

    let service = RecommendationService::new(scanner, rates(), &cfg);
    let report = service.recommend(&keywords(&["a", "b"])).await;

    // a: 9520 - price; b: 8213.5 - price. Top two per keyword, then top three.
    let profits: Vec<_> = report.products.iter().map(|p| p.estimated_profit_jpy).collect();
    assert_eq!(profits, [dec!(8520), dec!(7713), dec!(7520)]);
    assert_eq!(report.keywords, keywords(&["a", "b"]));
}

#[tokio::test]
async fn test_listings_per_platform_cap() {
    let mut cfg = config();
    cfg.recommendation.listings_per_platform = 1;

    let scanner = ScriptedScanner::new()
        .with_listing("a", listing(DomesticPlatform::Mercari, "first", dec!(3000)))
        .with_listing("a", listing(DomesticPlatform::Mercari, "second", dec!(1000)))
        .with_prices("a", OverseasPlatform::Ebay, usd_prices(&[dec!(100)]));
    let service = RecommendationService::new(scanner, rates(), &cfg);
    let report = service.recommend(&keywords(&["a"])).await;

    assert_eq!(report.products.len(), 1);
    assert_eq!(report.products[0].title, "first");
}

#[tokio::test]
async fn test_max_keywords_cap() {
    let mut cfg = config();
    cfg.recommendation.max_keywords = 1;

    let scanner = ScriptedScanner::new()
        .with_listing("a", listing(DomesticPlatform::Mercari, "a", dec!(1000)))
        .with_listing("b", listing(DomesticPlatform::Mercari, "b", dec!(1000)))
        .with_prices("a", OverseasPlatform::Ebay, usd_prices(&[dec!(100)]))
        .with_prices("b", OverseasPlatform::Ebay, usd_prices(&[dec!(100)]));
    let service = RecommendationService::new(scanner, rates(), &cfg);
    let report = service.recommend(&keywords(&["a", "b"])).await;

    assert_eq!(report.keywords, keywords(&["a"]));
    assert_eq!(report.products.len(), 2);
}

#[tokio::test]
async fn test_report_is_memoized_until_ttl() {
    let clock = Arc::new(ManualClock::default());
    let cfg: Config = config();
    let service = RecommendationService::with_clock(gameboy_market(), rates(), &cfg, clock.clone());
    let request = keywords(&["gameboy"]);

    let first = service.recommend(&request).await;
    let scans = service.scanner().calls();
    assert_eq!(scans, 8);

    clock.advance(Duration::from_secs(599));
    let second = service.recommend(&request).await;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(service.scanner().calls(), scans);

    clock.advance(Duration::from_secs(1));
    let third = service.recommend(&request).await;
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(service.scanner().calls(), scans * 2);
}

#[tokio::test]
async fn test_different_keyword_lists_are_cached_separately() {
    let service = RecommendationService::new(gameboy_market(), rates(), &config());
    service.recommend(&keywords(&["gameboy"])).await;
    service.recommend(&keywords(&["gameboy", "walkman"])).await;
    assert_eq!(service.scanner().calls(), 8 + 16);
}
