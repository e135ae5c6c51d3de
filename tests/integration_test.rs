use std::path::Path;
use std::process::Command;

use anyhow::Result;
use serde_json::Value;
use tempfile::tempdir;

const BINARY_PATH: &str = env!("CARGO_BIN_EXE_transaction-analytics");

fn run(folder: &Path, operation: Option<&str>) -> Result<(bool, String)> {
    let mut command = Command::new(BINARY_PATH);
    command.arg(folder);

    if let Some(operation) = operation {
        command.arg(operation);
    }

    let output = command.output()?;

    Ok((output.status.success(), String::from_utf8(output.stdout)?))
}

#[test]
fn test_cli_reports_sample_folder_and_skips_malformed_day() -> Result<()> {
    let sample_path = Path::new("samples").join("transactions");

    let (success, stdout) = run(&sample_path, None)?;

    assert!(success);

    let report: Value = serde_json::from_str(&stdout)?;

    assert_eq!(report["peak_daily_volume"], "250.50");
    assert_eq!(report["peak_daily_value"], "170.50");
    assert_eq!(report["top_product"], "SKU-1");
    assert_eq!(report["top_staff_by_month"]["2024-03"], 1002);
    assert_eq!(report["top_staff_by_month"]["2024-04"], 2002);
    assert_eq!(report["peak_hour"], 13);

    Ok(())
}

#[test]
fn test_cli_single_metric_operations_print_bare_values() -> Result<()> {
    let sample_path = Path::new("samples").join("transactions");

    let expectations = [
        ("peak-volume", "\"250.50\""),
        ("peak-value", "\"170.50\""),
        ("top-product", "\"SKU-1\""),
        ("peak-hour", "13")
    ];

    for (operation, expected) in expectations {
        let (success, stdout) = run(&sample_path, Some(operation))?;

        assert!(success, "{operation} failed");
        assert_eq!(stdout.trim(), expected, "unexpected output for {operation}");
    }

    Ok(())
}

#[test]
fn test_cli_empty_folder_fails_report_but_not_single_metrics() -> Result<()> {
    let empty = tempdir()?;

    let (success, stdout) = run(empty.path(), Some("report"))?;

    assert!(!success);
    assert!(stdout.is_empty());

    let (success, stdout) = run(empty.path(), Some("peak-hour"))?;

    assert!(success);
    assert_eq!(stdout.trim(), "-1");

    let (success, stdout) = run(empty.path(), Some("top-staff"))?;

    assert!(success);
    assert_eq!(stdout.trim(), "{}");

    let (success, stdout) = run(empty.path(), Some("top-product"))?;

    assert!(success);
    assert_eq!(stdout.trim(), "null");

    Ok(())
}

#[test]
fn test_cli_rejects_unknown_operation() -> Result<()> {
    let (success, stdout) = run(Path::new("samples"), Some("median"))?;

    assert!(!success);
    assert!(stdout.is_empty());

    Ok(())
}
