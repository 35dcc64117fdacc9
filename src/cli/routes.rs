//! Handler for the `routes` command.

use std::sync::Arc;

use anyhow::Context as _;
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::RoutesArgs;
use super::{output, Context};
use crate::adapter::snapshot::SnapshotScanner;
use crate::application::{CachedExchangeRates, RateSource, RecommendationService};

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Keyword")]
    keyword: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Route")]
    combination: String,
    #[tabled(rename = "Buy (JPY)")]
    buy: String,
    #[tabled(rename = "Sell (USD)")]
    sell: String,
    #[tabled(rename = "Profit (JPY)")]
    profit: String,
    #[tabled(rename = "Margin")]
    margin: String,
}

pub async fn execute(ctx: &Context, args: &RoutesArgs) -> anyhow::Result<()> {
    let scanner = SnapshotScanner::load(&args.snapshot)
        .with_context(|| format!("failed to load market snapshot {}", args.snapshot.display()))?;
    let keywords = if args.keywords.is_empty() {
        scanner.keywords().to_vec()
    } else {
        args.keywords.clone()
    };
    if keywords.is_empty() {
        anyhow::bail!("no keywords to screen");
    }

    let tables = ctx.reference_tables()?;
    let rates = CachedExchangeRates::new(Arc::clone(&tables), ctx.config.exchange_rate_ttl());
    let service = RecommendationService::new(scanner, rates, &ctx.config);
    let report = service.recommend(&keywords).await;

    if output::is_json() {
        output::json_output(json!({
            "command": "routes",
            "report": &*report,
        }));
        return Ok(());
    }

    output::header();
    output::field("Exchange rate", format!("{} JPY/USD", report.exchange_rate));
    if report.exchange_rate_source == RateSource::Fallback {
        output::warning("USD/JPY not in reference data, using configured fallback rate");
    }

    for failure in &report.failures {
        output::warning(&format!(
            "{} scan failed for '{}': {}",
            failure.platform, failure.keyword, failure.error
        ));
    }

    if report.products.is_empty() {
        output::note("No route clears the minimum profit");
        output::field("Keywords", report.keywords.join(", "));
        return Ok(());
    }

    output::section("Profitable routes");
    let rows: Vec<RouteRow> = report
        .products
        .iter()
        .map(|p| RouteRow {
            keyword: p.keyword.clone(),
            title: p.title.clone(),
            combination: p.combination.clone(),
            buy: p.domestic_price_jpy.to_string(),
            sell: p.overseas_price_usd.to_string(),
            profit: output::signed(p.estimated_profit_jpy),
            margin: format!("{}", p.profit_margin),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::field("Keywords", report.keywords.join(", "));
    Ok(())
}
