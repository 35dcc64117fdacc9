//! Handlers for `profit`, `min-price` and `optimize`.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::{MinPriceArgs, OptimizeArgs, ProfitArgs, RouteArgs};
use super::{output, Context, ReferencePricing};
use crate::application::PricingRequest;
use crate::domain::{CalculatedProfitDetails, CompetitorPrice, CountryCode, Currency};
use crate::port::FeeScheduleSource;

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Item")]
    item: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn request(ctx: &Context, route: &RouteArgs) -> PricingRequest {
    let destination = route.country.as_deref().map_or_else(
        || ctx.config.pricing.destination_country.clone(),
        CountryCode::new,
    );
    let request = PricingRequest::new(
        route.sku.as_str(),
        route.domestic,
        route.overseas,
        destination,
    );
    match route.purchase_price {
        Some(price) => request.with_purchase_price(price),
        None => request,
    }
}

fn yen(amount: Decimal) -> String {
    format!("¥{}", amount.round_dp(0))
}

fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).round_dp(2))
}

fn breakdown(details: &CalculatedProfitDetails) -> String {
    let rows = vec![
        BreakdownRow {
            item: "Selling price",
            amount: format!(
                "{} {}",
                details.overseas_selling_price_local, details.overseas_currency
            ),
        },
        BreakdownRow {
            item: "Revenue",
            amount: yen(details.overseas_selling_price_jpy),
        },
        BreakdownRow {
            item: "Purchase price",
            amount: yen(details.domestic_purchase_price_jpy),
        },
        BreakdownRow {
            item: "Shipping",
            amount: yen(details.international_shipping_cost_jpy),
        },
        BreakdownRow {
            item: "Customs duty",
            amount: yen(details.customs_duty_jpy),
        },
        BreakdownRow {
            item: "Domestic fee",
            amount: yen(details.domestic_platform_fee_jpy),
        },
        BreakdownRow {
            item: "Overseas fee",
            amount: yen(details.overseas_platform_fee_jpy),
        },
    ];
    Table::new(rows).to_string()
}

fn print_summary(details: &CalculatedProfitDetails) {
    output::lines(&breakdown(details));
    output::section("Result");
    output::field("Exchange rate", details.exchange_rate);
    output::field(
        "Estimated profit",
        output::signed(details.estimated_profit_jpy.round_dp(0)),
    );
    output::field("Profit margin", percent(details.profit_margin));
    output::field("Cost markup", percent(details.cost_markup()));
}

pub fn profit(ctx: &Context, args: &ProfitArgs) -> anyhow::Result<()> {
    let service = ctx.pricing_service()?;
    let request = request(ctx, &args.route);
    let details = service.compute_profit(&request, args.price)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "profit",
            "sku": request.sku,
            "domestic": request.domestic,
            "overseas": request.overseas,
            "destination": request.destination,
            "details": details,
        }));
        return Ok(());
    }

    output::header();
    output::section(&format!(
        "{} via {} → {}",
        request.sku, request.domestic, request.overseas
    ));
    print_summary(&details);
    if !details.is_profitable() {
        output::warning("Selling at this price loses money");
    }
    Ok(())
}

pub fn min_price(ctx: &Context, args: &MinPriceArgs) -> anyhow::Result<()> {
    let service = ctx.pricing_service()?;
    let request = request(ctx, &args.route);
    let margin = args.margin.unwrap_or(ctx.config.pricing.default_min_margin);
    let solution = service.solve_min_selling_price(&request, margin)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "min-price",
            "sku": request.sku,
            "min_margin": margin,
            "min_selling_price": solution.min_selling_price_local,
            "currency": solution.profit_details.overseas_currency,
            "outcome": solution.outcome.label(),
            "problem": solution.problem,
            "details": solution.profit_details,
        }));
        return Ok(());
    }

    output::header();
    output::section(&format!("Minimum price for {}", request.sku));
    output::field(
        "Minimum price",
        output::highlight(format!(
            "{} {}",
            solution.min_selling_price_local, solution.profit_details.overseas_currency
        )),
    );
    output::field("Required margin", percent(margin));
    output::field("Fixed costs", yen(solution.problem.fixed_costs_jpy));
    output::field("Variable rate", percent(solution.problem.variable_rate));
    output::section("Breakdown");
    print_summary(&solution.profit_details);
    if solution.outcome.is_degenerate() {
        output::warning("Fees leave no finite solution; price is twice the fixed costs");
    }
    Ok(())
}

/// Competitor prices given without a currency take the platform's.
fn extra_competitors(service: &ReferencePricing, args: &OptimizeArgs) -> Vec<CompetitorPrice> {
    let platform_currency = service
        .data()
        .fee_schedule(args.route.overseas)
        .map_or_else(Currency::usd, |schedule| schedule.currency);
    args.competitors
        .iter()
        .map(|arg| {
            CompetitorPrice::new(
                arg.price,
                arg.currency.clone().unwrap_or_else(|| platform_currency.clone()),
            )
        })
        .collect()
}

pub fn optimize(ctx: &Context, args: &OptimizeArgs) -> anyhow::Result<()> {
    let service = ctx.pricing_service()?;
    let request = request(ctx, &args.route);
    let margin = args.margin.unwrap_or(ctx.config.pricing.default_min_margin);
    let extra = extra_competitors(&service, args);
    let optimal = service.determine_optimal_selling_price(&request, margin, &extra)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "optimize",
            "sku": request.sku,
            "min_margin": margin,
            "result": optimal,
        }));
        return Ok(());
    }

    output::header();
    output::section(&format!("Listing price for {}", request.sku));
    output::field(
        "Optimal price",
        output::highlight(format!("{} {}", optimal.optimal_price, optimal.currency)),
    );
    output::field("Strategy", optimal.strategy);
    output::field(
        "Margin floor",
        format!("{} {}", optimal.min_selling_price_local, optimal.currency),
    );
    output::field(
        "Lowest competitor",
        optimal.lowest_competitor.map_or_else(
            || output::muted("none"),
            |price| format!("{price} {}", optimal.currency),
        ),
    );
    output::section("Breakdown");
    print_summary(&optimal.profit_details);
    Ok(())
}
