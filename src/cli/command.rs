//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::domain::{Currency, DomesticPlatform, OverseasPlatform, Price};

/// Cross-border resale pricing: profit, minimum price and route screening.
#[derive(Parser, Debug)]
#[command(name = "sedori")]
#[command(version, about)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the profit breakdown at a given selling price
    Profit(ProfitArgs),

    /// Solve the lowest price that meets a margin floor
    MinPrice(MinPriceArgs),

    /// Pick a competitive selling price above the margin floor
    Optimize(OptimizeArgs),

    /// Screen keywords for profitable sourcing routes
    Routes(RoutesArgs),

    /// List supported platforms and their fee schedules
    Platforms,
}

/// Product and route shared by the pricing commands.
#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Product SKU from the reference data
    #[arg(long)]
    pub sku: String,

    /// Domestic sourcing platform (e.g. mercari, yahoo-auctions)
    #[arg(long)]
    pub domestic: DomesticPlatform,

    /// Overseas selling platform (e.g. ebay, stockx)
    #[arg(long)]
    pub overseas: OverseasPlatform,

    /// Destination country; defaults to `pricing.destination_country`
    #[arg(long)]
    pub country: Option<String>,

    /// Override the registered purchase price (JPY)
    #[arg(long)]
    pub purchase_price: Option<Decimal>,
}

#[derive(Args, Debug)]
pub struct ProfitArgs {
    #[command(flatten)]
    pub route: RouteArgs,

    /// Selling price in the platform currency
    #[arg(long)]
    pub price: Price,
}

#[derive(Args, Debug)]
pub struct MinPriceArgs {
    #[command(flatten)]
    pub route: RouteArgs,

    /// Minimum margin; defaults to `pricing.default_min_margin`
    #[arg(long)]
    pub margin: Option<Decimal>,
}

#[derive(Args, Debug)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub route: RouteArgs,

    /// Minimum margin; defaults to `pricing.default_min_margin`
    #[arg(long)]
    pub margin: Option<Decimal>,

    /// Additional competitor price as PRICE or PRICE:CURRENCY
    #[arg(long = "competitor", value_parser = parse_competitor)]
    pub competitors: Vec<CompetitorArg>,
}

#[derive(Args, Debug)]
pub struct RoutesArgs {
    /// Market snapshot to screen
    #[arg(long, default_value = "market.toml")]
    pub snapshot: PathBuf,

    /// Keyword to screen; defaults to every keyword in the snapshot
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,
}

/// A competitor price given on the command line. Without a currency it is
/// read in the platform's fee currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorArg {
    pub price: Price,
    pub currency: Option<Currency>,
}

fn parse_competitor(value: &str) -> Result<CompetitorArg, String> {
    let (price, currency) = match value.split_once(':') {
        Some((price, currency)) => (price, Some(currency.trim())),
        None => (value, None),
    };
    let price: Price = price
        .trim()
        .parse()
        .map_err(|e| format!("invalid price '{price}': {e}"))?;
    if price <= Decimal::ZERO {
        return Err(format!("competitor price must be positive, got {price}"));
    }
    let currency = match currency {
        Some("") => return Err("empty currency code".to_string()),
        Some(code) => Some(Currency::new(code)),
        None => None,
    };
    Ok(CompetitorArg { price, currency })
}
