use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

/// Write catalog CSVs plus a session config into `dir`, returning the
/// config path.
fn write_fixture(dir: &Path) -> String {
    fs::write(
        dir.join("retailers.csv"),
        "Retailer Name,Salesperson,Team,Email\n\
         Corner Mart,Asha,North,asha@example.com\n",
    )
    .unwrap();
    fs::write(dir.join("categories.csv"), "Category Name\nSnacks\n").unwrap();
    fs::write(
        dir.join("products.csv"),
        "Product name,Category,Price\n\
         Chips,Snacks,20.00\n\
         Cola,Snacks,15.00\n",
    )
    .unwrap();

    let config_path = dir.join("session.yaml");
    let d = dir.display();
    let config = [
        "catalog:".to_string(),
        format!("  retailers_csv: {d}/retailers.csv"),
        format!("  categories_csv: {d}/categories.csv"),
        format!("  products_csv: {d}/products.csv"),
        "sink:".to_string(),
        format!("  path: {d}/submissions.jsonl"),
    ]
    .join("\n");
    fs::write(&config_path, config).unwrap();
    config_path.display().to_string()
}

#[test]
fn scenario_quote_prints_line_amounts_and_total() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());

    Command::cargo_bin("opd")
        .unwrap()
        .args([
            "quote",
            "--config",
            &config,
            "--retailer",
            "Corner Mart",
            "--category",
            "Snacks",
            "--qty",
            "Chips=3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chips\tx3\t60.00"))
        .stdout(predicate::str::contains("Cola\tx0\t0.00"))
        .stdout(predicate::str::contains("Total: 60.00"));
}

#[test]
fn scenario_submit_appends_one_line_per_offered_product() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());

    Command::cargo_bin("opd")
        .unwrap()
        .args([
            "submit",
            "--config",
            &config,
            "--retailer",
            "Corner Mart",
            "--category",
            "Snacks",
            "--qty",
            "Chips=3",
            "--lat",
            "12.9716",
            "--lon",
            "77.5946",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "submitted 2 records for Snacks at Corner Mart",
        ));

    let sink = fs::read_to_string(dir.path().join("submissions.jsonl")).unwrap();
    let lines: Vec<&str> = sink.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"product\":\"Chips\""));
    assert!(lines[0].contains("\"amount\":\"60.00\""));
    assert!(lines[0].contains("\"latitude\":\"12.9716\""));
    assert!(lines[1].contains("\"product\":\"Cola\""));
    assert!(lines[1].contains("\"amount\":\"0.00\""));
}

#[test]
fn scenario_submit_with_unknown_retailer_appends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());

    Command::cargo_bin("opd")
        .unwrap()
        .args([
            "submit",
            "--config",
            &config,
            "--retailer",
            "Ghost Shop",
            "--category",
            "Snacks",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in the catalog"));

    // Zero records reached the sink: the file was never created.
    assert!(!dir.path().join("submissions.jsonl").exists());
}

#[test]
fn scenario_missing_catalog_file_is_fatal_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());
    fs::remove_file(dir.path().join("products.csv")).unwrap();

    Command::cargo_bin("opd")
        .unwrap()
        .args(["catalog", "check", "--config", &config])
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog unavailable"));
}

#[test]
fn scenario_catalog_check_reports_counts() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());

    Command::cargo_bin("opd")
        .unwrap()
        .args(["catalog", "check", "--config", &config])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"categories":1,"products":2,"retailers":1}"#,
        ));
}

#[test]
fn scenario_malformed_cli_quantity_coerces_to_zero() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());

    Command::cargo_bin("opd")
        .unwrap()
        .args([
            "quote",
            "--config",
            &config,
            "--retailer",
            "Corner Mart",
            "--category",
            "Snacks",
            "--qty",
            "Chips=-4",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chips\tx0\t0.00"))
        .stdout(predicate::str::contains("Total: 0.00"));
}
