//! Handler for the `platforms` command.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use super::{output, Context};
use crate::domain::{DomesticPlatform, OverseasPlatform};
use crate::port::FeeScheduleSource;

#[derive(Tabled)]
struct FeeRow {
    #[tabled(rename = "Platform")]
    platform: &'static str,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Fee")]
    fee: String,
    #[tabled(rename = "Fixed")]
    fixed: String,
    #[tabled(rename = "Screening fee")]
    screening: String,
}

fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

pub fn execute(ctx: &Context) -> anyhow::Result<()> {
    let tables = ctx.reference_tables()?;
    let fees = &ctx.config.screening.fees;

    if output::is_json() {
        let overseas: Vec<_> = OverseasPlatform::ALL
            .iter()
            .map(|&platform| {
                json!({
                    "platform": platform,
                    "fee_schedule": tables.fee_schedule(platform),
                    "screening_fee": {
                        "rate": fees.for_platform(platform).rate,
                        "fixed_usd": fees.for_platform(platform).fixed_usd,
                    },
                })
            })
            .collect();
        output::json_output(json!({
            "command": "platforms",
            "domestic": DomesticPlatform::ALL,
            "overseas": overseas,
        }));
        return Ok(());
    }

    output::header();
    output::section("Domestic platforms");
    for platform in DomesticPlatform::ALL {
        output::field(platform.name(), output::muted("buyer pays no marketplace fee"));
    }

    output::section("Overseas platforms");
    let rows: Vec<FeeRow> = OverseasPlatform::ALL
        .iter()
        .map(|&platform| {
            let screening = fees.for_platform(platform);
            let screening = format!("{} + ${}", percent(screening.rate), screening.fixed_usd);
            match tables.fee_schedule(platform) {
                Some(schedule) => FeeRow {
                    platform: platform.name(),
                    currency: schedule.currency.to_string(),
                    fee: percent(schedule.base_fee_percentage),
                    fixed: schedule.fixed_fee_local.to_string(),
                    screening,
                },
                None => FeeRow {
                    platform: platform.name(),
                    currency: "-".into(),
                    fee: "not configured".into(),
                    fixed: "-".into(),
                    screening,
                },
            }
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}
