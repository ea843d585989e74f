//! E2E tests for the quoting commands

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Quebec, private seller: only the premium is taxed
#[test]
fn buyer_quebec_individual() {
    let output = run(&["buyer", "-a", "1000", "-r", "QC"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("BUYER COST (QC, free tier, individual seller)"));
    assert!(stdout.contains("$50.00"));
    assert!(stdout.contains("$1057.74"));
    assert!(stdout.contains("Tax savings:   $154.74"));
}

/// Business seller JSON output
#[test]
fn buyer_quebec_business_json() {
    let output = run(&["buyer", "-a", "1000", "-r", "qc", "--business", "--json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["subtotal"], "1050.00");
    assert_eq!(json["tax"], "162.47");
    assert_eq!(json["total"], "1212.47");
    assert_eq!(json["tax_breakdown"]["gst"], "52.50");
    assert_eq!(json["seller_type"], "business");
    assert_eq!(json["region"], "QC");
}

#[test]
fn buyer_without_tax() {
    let output = run(&["buyer", "-a", "500", "-t", "premium", "-r", "ON", "--no-tax", "--json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["total"], "517.50");
    assert_eq!(json["tax"], "0.00");
}

#[test]
fn seller_vip() {
    let output = run(&["seller", "-a", "1000", "-t", "vip"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("SELLER NET (vip tier)"));
    assert!(stdout.contains("$20.00 (2%)"));
    assert!(stdout.contains("$980.00"));
}

#[test]
fn transaction_reports_platform_revenue() {
    let output = run(&[
        "transaction",
        "-a",
        "1000",
        "--seller-tier",
        "vip",
        "--json",
    ]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["platform_revenue"], "70.00");
    assert_eq!(json["buyer"]["buyer_premium"], "50.00");
    assert_eq!(json["seller"]["seller_commission"], "20.00");
    assert_eq!(json["fingerprint"].as_str().unwrap().len(), 64);
}

/// Same inputs quote to the same fingerprint
#[test]
fn transaction_fingerprint_is_stable() {
    let args = ["transaction", "-a", "742.10", "-r", "BC", "--business", "--json"];
    let first = stdout(&run(&args));
    let second = stdout(&run(&args));
    assert_eq!(first, second);
}

#[test]
fn negative_amount_rejected() {
    let output = run(&["buyer", "-a", "-5"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("amount must be positive"));
}

#[test]
fn oversized_amount_rejected() {
    let output = run(&["transaction", "-a", "79228162514264337593543950335"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("exceeds the maximum"));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn unknown_region_defaults_unless_strict() {
    let lenient = run(&["buyer", "-a", "100", "-r", "TX", "--json"]);
    assert!(lenient.status.success(), "Command failed: {:?}", lenient);
    let json: serde_json::Value = serde_json::from_str(&stdout(&lenient)).unwrap();
    assert_eq!(json["region"], "QC");

    let strict = run(&["--strict", "buyer", "-a", "100", "-r", "TX"]);
    let stderr = String::from_utf8_lossy(&strict.stderr);
    assert!(!strict.status.success());
    assert!(stderr.contains("unknown tax region: TX"));
}

#[test]
fn batch_table_with_totals() {
    let output = run(&["batch", "-f", "tests/data/sales.csv"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("lot-101"));
    assert!(stdout.contains("1057.74"));
    assert!(stdout.contains("1212.47"));
    assert!(stdout.contains("amount must be positive"));
    assert!(stdout.contains("Quoted: 4 | Failed: 1"));
}

#[test]
fn batch_csv_output() {
    let output = run(&["batch", "-f", "tests/data/sales.csv", "--csv"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.starts_with("row,id,region,hammer_price"));
    assert!(stdout.contains("lot-103,ON,500.00,17.50,67.28,584.78"));
}

#[test]
fn batch_strict_marks_unknown_codes() {
    let output = run(&["--strict", "batch", "-f", "tests/data/unknown_codes.csv", "--json"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["totals"]["failed"], 1);
    assert_eq!(json["rows"][0]["error"], "unknown subscription tier: gold");
}

#[test]
fn custom_schedule() {
    let output = run(&[
        "--schedule",
        "tests/data/schedule.json",
        "transaction",
        "-a",
        "100",
        "-r",
        "US",
        "--json",
    ]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["buyer"]["buyer_premium"], "10.00");
    assert_eq!(json["seller"]["seller_commission"], "5.00");
    assert_eq!(json["platform_revenue"], "15.00");
}

#[test]
fn invalid_schedule_rejected() {
    let output = run(&["--schedule", "tests/data/bad_schedule.json", "rates"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("higher than the free tier"));
}

#[test]
fn rates_table() {
    let output = run(&["rates"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("3.5%"));
    assert!(stdout.contains("QST 9.975%"));
    assert!(stdout.contains("HST 13%"));
}

#[test]
fn schema_csv_header() {
    let output = run(&["schema", "csv-header"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        stdout.trim(),
        "id,hammer_price,buyer_tier,seller_tier,region,seller_is_business"
    );
}

#[test]
fn schema_json() {
    let output = run(&["schema"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"FeeSchedule\""));
    assert!(stdout.contains("\"tiers\""));
    assert!(stdout.contains("\"regions\""));
}
