//! E2E tests for the calculator commands

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test a winning each-way bet settles both parts
#[test]
fn each_way_won() {
    let output = run(&["each-way", "-s", "10", "-o", "5/1"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("Win"));
    assert!(stdout.contains("Place"));
    assert!(stdout.contains("5/4"));
    assert!(stdout.contains("£20.00"));
    assert!(stdout.contains("RESULT (WON): Return £82.50, Profit £62.50"));
}

/// Test a placed bet with American odds and 1/5 terms
#[test]
fn each_way_placed_american() {
    let output = run(&[
        "each-way",
        "-s",
        "5",
        "-o",
        "+300",
        "-t",
        "1/5",
        "-p",
        "4",
        "--outcome",
        "placed",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    // place odds 1 + 3/5 = 1.6, so £5 returns £8 against a £10 outlay
    assert!(stdout.contains("RESULT (PLACED): Return £8.00, Profit -£2.00"));
}

/// Test each-way JSON output carries the full settlement
#[test]
fn each_way_json() {
    let output = run(&["each-way", "-s", "10", "-o", "6.0", "--outcome", "lost", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["outcome"], "lost");
    assert_eq!(json["win_odds_fractional"], "5/1");
    assert_eq!(json["place_odds_fractional"], "5/4");
    assert!(json["win_part"].is_object());
    assert!(json["place_part"].is_object());
}

/// Test unparseable odds fail with a helpful message
#[test]
fn each_way_rejects_bad_odds() {
    let output = run(&["each-way", "-s", "10", "-o", "banana"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Unrecognised odds 'banana'"));
}

/// Test figures beyond the decimal range saturate instead of aborting
#[test]
fn each_way_huge_inputs() {
    let output = run(&["each-way", "-s", "50000000000000000000000000000", "-o", "5/1", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("valid JSON");
    assert_eq!(json["total_return_if_won"], "79228162514264337593543950335");

    let output = run(&["each-way", "-s", "10", "-o", "10000000000000000000000000000"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
}

/// Test England SDLT breakdown for a standard purchase
#[test]
fn stamp_duty_england() {
    let output = run(&["stamp-duty", "-p", "300000"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("England & Northern Ireland (SDLT)"));
    assert!(stdout.contains("Standard purchase"));
    assert!(stdout.contains("TOTAL TAX:      £2,500.00"));
    assert!(stdout.contains("EFFECTIVE RATE: 0.83%"));
}

/// Test Scotland adds the dwelling supplement as its own row
#[test]
fn stamp_duty_scotland_additional() {
    let output = run(&["stamp-duty", "-p", "300000", "-r", "scotland", "-b", "additional"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("Scotland (LBTT)"));
    assert!(stdout.contains("Additional Dwelling Supplement (6%)"));
    assert!(stdout.contains("£22,600.00"));
}

/// Test stamp duty CSV output lists the bands
#[test]
fn stamp_duty_csv() {
    let output = run(&["stamp-duty", "-p", "500000", "-r", "wales", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.starts_with("band,from,to,rate,taxable,tax_due"));
    assert_eq!(stdout.lines().count(), 4);
}

/// Test stamp duty CSV output keeps its header when no band applies
#[test]
fn stamp_duty_csv_zero_price() {
    let output = run(&["stamp-duty", "-p", "0", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(stdout.trim(), "band,from,to,rate,taxable,tax_due");
}

/// Test stamp duty JSON output
#[test]
fn stamp_duty_json() {
    let output = run(&["stamp-duty", "-p", "500000", "-b", "first-time", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["region"], "england");
    assert_eq!(json["buyer_type"], "first-time");
    assert_eq!(json["breakdown"].as_array().map(Vec::len), Some(2));
}

/// Test stake comparison and each-way against win only
#[test]
fn compare_stakes() {
    let output = run(&["compare", "-s", "5,10,20", "-o", "5/1"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("STAKE COMPARISON"));
    assert!(stdout.contains("£5 E/W"));
    assert!(stdout.contains("£10 E/W"));
    assert!(stdout.contains("£20 E/W"));
    assert!(stdout.contains("EACH WAY vs WIN ONLY"));
    assert!(stdout.contains("£82.50"));
}

/// Test the terms reference tables
#[test]
fn terms_tables() {
    let output = run(&["terms"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("EACH WAY TERMS"));
    assert!(stdout.contains("HORSE RACING PLACE TERMS"));
    assert!(stdout.contains("1/8"));
}

/// Test place term suggestions for a big handicap and a small field
#[test]
fn terms_suggestion() {
    let output = run(&["terms", "-r", "16", "--handicap"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("16 runner handicap: 4 places at 1/4 odds"));

    let output = run(&["terms", "-r", "4"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("4 runner race: win only"));
}

/// Test settling a file of bets
#[test]
fn batch_bets() {
    let output = run(&["batch", "bets", "tests/data/bets.csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("national"));
    assert!(stdout.contains("82.50"));
    assert!(stdout.contains("romford"));
}

/// Test batch bets as CSV
#[test]
fn batch_bets_csv() {
    let output = run(&["batch", "bets", "tests/data/bets.csv", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.starts_with("id,stake,odds,terms,outcome,"));
    // header plus one row per bet
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.contains("national,10.00,5/1,1/4,Won,20.00,82.50,22.50,82.50,62.50"));
}

/// Test pricing a file of purchases as JSON
#[test]
fn batch_properties_json() {
    let output = run(&["batch", "properties", "tests/data/properties.csv", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let results = json.as_array().expect("array of results");
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["id"], "london-flat");
    assert_eq!(results[2]["region"], "scotland");
    assert_eq!(results[3]["buyer_type"], "first-time");
}

/// Test the batch CSV header matches the schema command
#[test]
fn schema_csv_header() {
    let output = run(&["schema", "csv-header"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        stdout.trim(),
        "id,stake,odds,terms,places,outcome,race_type,runners"
    );

    let output = run(&["schema", "csv-header", "-k", "stamp-duty"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "id,price,region,buyer,property_type");
}

/// Test the JSON schema of each-way output
#[test]
fn schema_json() {
    let output = run(&["schema"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("EachWayResult"));
    assert!(stdout.contains("total_return_if_won"));
}
