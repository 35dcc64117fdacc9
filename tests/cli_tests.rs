//! End-to-end tests of the `sedori` binary.

use std::str::FromStr;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

mod support;

use support::Workspace;

fn sedori(ws: &Workspace) -> Command {
    let mut cmd = cargo_bin_cmd!("sedori");
    cmd.arg("--config").arg(ws.config_path()).env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.arg("--json").assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is a JSON document")
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        Value::Number(n) => Decimal::from_str(&n.to_string()).expect("decimal number"),
        other => panic!("not a decimal: {other}"),
    }
}

const GAME_ROUTE: [&str; 6] = [
    "--sku",
    "GAME-9504",
    "--domestic",
    "mercari",
    "--overseas",
    "ebay",
];

#[test]
fn test_help_lists_commands() {
    cargo_bin_cmd!("sedori")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("min-price"))
        .stdout(predicate::str::contains("optimize"))
        .stdout(predicate::str::contains("routes"));
}

#[test]
fn test_profit_json() {
    let ws = Workspace::new();
    let doc = json_stdout(
        sedori(&ws)
            .arg("profit")
            .args(GAME_ROUTE)
            .args(["--price", "200"]),
    );
    assert_eq!(doc["command"], "profit");
    let details = &doc["details"];
    assert_eq!(decimal(&details["estimated_profit_jpy"]), dec!(7585));
    assert_eq!(decimal(&details["overseas_platform_fee_jpy"]), dec!(3915));
    assert_eq!(decimal(&details["domestic_platform_fee_jpy"]), Decimal::ZERO);
}

#[test]
fn test_min_price_json() {
    let ws = Workspace::new();
    let doc = json_stdout(
        sedori(&ws)
            .arg("min-price")
            .args(GAME_ROUTE)
            .args(["--margin", "0.10"]),
    );
    assert_eq!(decimal(&doc["min_selling_price"]), dec!(158.49));
    assert_eq!(doc["outcome"], "Solved");
    assert_eq!(doc["currency"], "USD");
}

#[test]
fn test_min_price_uses_configured_margin() {
    // The workspace config sets default_min_margin = 0.10.
    let ws = Workspace::new();
    let doc = json_stdout(sedori(&ws).arg("min-price").args(GAME_ROUTE));
    assert_eq!(decimal(&doc["min_margin"]), dec!(0.10));
    assert_eq!(decimal(&doc["min_selling_price"]), dec!(158.49));
}

#[test]
fn test_optimize_undercuts_reference_competitor() {
    let ws = Workspace::new();
    let doc = json_stdout(sedori(&ws).arg("optimize").args(GAME_ROUTE));
    let result = &doc["result"];
    assert_eq!(decimal(&result["optimal_price"]), dec!(199.99));
    assert_eq!(result["strategy"], "UndercutLowestCompetitor");
}

#[test]
fn test_optimize_with_cheaper_competitor_keeps_floor() {
    let ws = Workspace::new();
    let doc = json_stdout(
        sedori(&ws)
            .arg("optimize")
            .args(GAME_ROUTE)
            .args(["--competitor", "150", "--competitor", "90:EUR"]),
    );
    let result = &doc["result"];
    assert_eq!(result["strategy"], "MaintainMinProfit");
    assert_eq!(decimal(&result["optimal_price"]), dec!(158.49));
    assert_eq!(decimal(&result["lowest_competitor"]), dec!(150));
}

#[test]
fn test_optimize_sub_cent_competitor_lists_whole_cents() {
    let ws = Workspace::new();
    let doc = json_stdout(
        sedori(&ws)
            .arg("optimize")
            .args(GAME_ROUTE)
            .args(["--competitor", "170.005"]),
    );
    let result = &doc["result"];
    assert_eq!(result["strategy"], "UndercutLowestCompetitor");
    assert_eq!(decimal(&result["optimal_price"]), dec!(169.99));
}

#[test]
fn test_profit_with_oversized_price_fails_cleanly() {
    let ws = Workspace::new();
    sedori(&ws)
        .arg("profit")
        .args(GAME_ROUTE)
        .args(["--price", "79228162514264337593543950335"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("arithmetic overflow"));
}

#[test]
fn test_optimize_table_output() {
    let ws = Workspace::new();
    sedori(&ws)
        .arg("optimize")
        .args(GAME_ROUTE)
        .assert()
        .success()
        .stdout(predicate::str::contains("199.99 USD"))
        .stdout(predicate::str::contains("UndercutLowestCompetitor"))
        .stdout(predicate::str::contains("Overseas fee"));
}

#[test]
fn test_unknown_sku_fails() {
    let ws = Workspace::new();
    sedori(&ws)
        .args(["profit", "--sku", "NOPE", "--domestic", "mercari", "--overseas", "ebay"])
        .args(["--price", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("product with SKU NOPE not found"));
}

#[test]
fn test_unconfigured_platform_fails() {
    let ws = Workspace::new();
    sedori(&ws)
        .args(["min-price", "--sku", "GAME-9504", "--domestic", "rakuma"])
        .args(["--overseas", "mercari-us"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mercari US is not configured"));
}

#[test]
fn test_missing_config_fails() {
    cargo_bin_cmd!("sedori")
        .args(["--config", "/nonexistent/sedori.toml", "platforms"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn test_platforms_lists_fee_schedules() {
    let ws = Workspace::new();
    sedori(&ws)
        .arg("platforms")
        .assert()
        .success()
        .stdout(predicate::str::contains("Yahoo Auctions"))
        .stdout(predicate::str::contains("12.9%"))
        .stdout(predicate::str::contains("not configured"));
}

#[test]
fn test_routes_json_report() {
    let ws = Workspace::new();
    let doc = json_stdout(
        sedori(&ws)
            .arg("routes")
            .arg("--snapshot")
            .arg(ws.snapshot_path()),
    );
    let report = &doc["report"];
    assert_eq!(report["from_price_check"], true);
    assert_eq!(report["exchange_rate_source"], "lookup");

    let products = report["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["combination"], "Mercari → StockX");
    assert_eq!(decimal(&products[0]["estimated_profit_jpy"]), dec!(3680));

    let failures = report["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["platform"], "Rakuma");
}

#[test]
fn test_routes_missing_snapshot_fails() {
    let ws = Workspace::new();
    sedori(&ws)
        .args(["routes", "--snapshot", "/nonexistent/market.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load market snapshot"));
}
