//! CLI smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

const INVOICE_TEXT: &str = "\
INVOICE

ABC Corporation

Invoice Number: INV-2024-001234
Date: 2024-01-15

Description        Quantity   Price     Amount
Widget             3          $10.00    $25.00

Subtotal:   $30.00
Tax:        $3.00
TOTAL DUE:  $33.00

Currency: USD
";

fn write_fixture(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, INVOICE_TEXT).unwrap();
    path
}

#[test]
fn process_outputs_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(&dir, "invoice.txt");

    Command::cargo_bin("paylint")
        .unwrap()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"vendor_name\": \"ABC Corporation\""))
        .stdout(predicate::str::contains("\"status\": \"PENDING\""));
}

#[test]
fn process_text_format_summarizes() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(&dir, "invoice.txt");

    Command::cargo_bin("paylint")
        .unwrap()
        .args(["process", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice: INV-2024-001234"))
        .stdout(predicate::str::contains("Status: PENDING"));
}

#[test]
fn process_missing_file_fails() {
    Command::cargo_bin("paylint")
        .unwrap()
        .args(["process", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_flags_duplicates_by_default_and_exports_full_columns() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir, "a.txt");
    write_fixture(&dir, "b.txt");
    let out_dir = dir.path().join("out");

    Command::cargo_bin("paylint")
        .unwrap()
        .arg("batch")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .args(["--summary", "--output-dir"])
        .arg(&out_dir)
        .assert()
        .success();

    let summary = std::fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 3);

    // Full column set, rates included alongside amounts.
    assert_eq!(
        lines[0],
        "filename,status,invoice_number,invoice_date,vendor_name,\
         subtotal,discount_percentage,discount_amount,\
         cgst_rate,cgst_amount,sgst_rate,sgst_amount,tax,total_amount,\
         currency,valid,errors,warnings,processing_time_ms,error"
    );

    // Both files carry the same invoice number; the second one must be
    // held for review without any opt-in flag.
    assert!(lines[1].contains("PENDING"));
    assert!(lines[2].contains("REVIEW_REQUIRED"));
}

#[test]
fn batch_duplicate_check_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir, "a.txt");
    write_fixture(&dir, "b.txt");
    let out_dir = dir.path().join("out");

    Command::cargo_bin("paylint")
        .unwrap()
        .arg("batch")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .args(["--summary", "--no-check-duplicates", "--output-dir"])
        .arg(&out_dir)
        .assert()
        .success();

    let summary = std::fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(!summary.contains("REVIEW_REQUIRED"));
}

#[test]
fn config_show_prints_defaults() {
    Command::cargo_bin("paylint")
        .unwrap()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("infer_currency_from_symbol"));
}
