//! E2E tests for the CLI commands

use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--"].iter().chain(args.iter()))
        .output()
        .expect("Failed to execute command")
}

/// Value the example basket in cash with posted rates
#[test]
fn value_basket_in_cash() {
    let output = run(&[
        "value",
        "-r",
        "tests/data/rates.json",
        "-b",
        "tests/data/basket.csv",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    // 2 x 1 Divine = 1600 base = NT$ 10.00 exactly
    assert!(stdout.contains("1600"));
    assert!(stdout.contains("NT$ 10.00"));
    assert!(stdout.contains("傳奇戒指"));
}

/// Value a JSON basket in the base currency
#[test]
fn value_json_basket_in_base() {
    let output = run(&[
        "value",
        "-r",
        "tests/data/rates.json",
        "-b",
        "tests/data/basket.json",
        "-t",
        "崇高石",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    // 10 Chaos x 3 = 150 base
    assert!(stdout.contains("150"));
}

/// Valuation JSON output carries the result fields
#[test]
fn value_json_output() {
    let output = run(&[
        "value",
        "-r",
        "tests/data/rates.json",
        "-b",
        "tests/data/basket.csv",
        "--json",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"raw_amount\""));
    assert!(stdout.contains("10.00"));
    assert!(stdout.contains("\"ceil_amount\""));
    assert!(stdout.contains("\"total_in_base\""));
}

/// Valuation CSV output has the item columns
#[test]
fn value_csv_output() {
    let output = run(&[
        "value",
        "-r",
        "tests/data/rates.json",
        "-b",
        "tests/data/basket.csv",
        "--csv",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("unit_price"));
    assert!(stdout.contains("神聖石"));
}

/// Zero quantities are rejected with a nonzero exit
#[test]
fn value_rejects_zero_quantity() {
    let output = run(&[
        "value",
        "-r",
        "tests/data/rates.json",
        "-b",
        "tests/data/basket_zero_qty.csv",
    ]);

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid quantity"));
}

/// Budget allocation with a cash budget
#[test]
fn budget_allocation() {
    let output = run(&[
        "budget",
        "-r",
        "tests/data/rates.json",
        "-w",
        "tests/data/wishlist.csv",
        "--amount",
        "100",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    // 100 cash = 16000 base; 10 Divine = 8000 base; 8000 base left
    assert!(stdout.contains("16000"));
    assert!(stdout.contains("8000"));
    assert!(!stdout.contains("over budget"));
}

/// An undersized budget reports a deficit
#[test]
fn budget_deficit() {
    let output = run(&[
        "budget",
        "-r",
        "tests/data/rates.json",
        "-w",
        "tests/data/wishlist.csv",
        "--amount",
        "1",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("over budget"));
}

/// Budget JSON output carries the allocation fields
#[test]
fn budget_json_output() {
    let output = run(&[
        "budget",
        "-r",
        "tests/data/rates.json",
        "-w",
        "tests/data/wishlist.csv",
        "--amount",
        "100",
        "--json",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"remaining_in_base\""));
    assert!(stdout.contains("\"is_deficit\": false"));
}

/// Consolidate mixed holdings into Divine Orbs
#[test]
fn consolidate_holdings() {
    let output = run(&[
        "consolidate",
        "-r",
        "tests/data/rates.json",
        "-H",
        "tests/data/holdings.csv",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    // 2000 + 1500 * 5 = 9500 base = 11.875 Divine
    assert!(stdout.contains("9500"));
    assert!(stdout.contains("11.875"));
    assert!(stdout.contains("0.875"));
}

/// Rates table shows posted rates and the snapshot timestamp
#[test]
fn rates_table() {
    let output = run(&["rates", "-r", "tests/data/rates.json"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("神聖石"));
    assert!(stdout.contains("800"));
    assert!(stdout.contains("posted"));
    assert!(stdout.contains("snapshot fetched"));
}

/// Without a feed the built-in defaults are used and flagged
#[test]
fn rates_default_fallback() {
    let output = run(&["rates"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("default"));
    assert!(stdout.contains("built-in defaults"));
}

/// A partial feed is tagged as a fallback in JSON output
#[test]
fn rates_partial_feed_tagged() {
    let output = run(&["rates", "-r", "tests/data/rates_partial.json", "--json"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"outcome\": \"fallback\""));
    assert!(stdout.contains("no posted price"));
}

/// Schema command prints the basket JSON Schema
#[test]
fn schema_basket_json() {
    let output = run(&["schema", "basket"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("items"));
    assert!(stdout.contains("quantity"));
}

/// Schema command prints the holdings CSV header
#[test]
fn schema_holdings_csv_header() {
    let output = run(&["schema", "holdings", "csv-header"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("title,amount,unit"));
}
