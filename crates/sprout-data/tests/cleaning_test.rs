//! Integration tests for loading and cleaning the bundled sample.

use polars::prelude::ChunkAgg;
use sprout_data::{CleaningRules, clean_table, load_table};
use std::path::PathBuf;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample_growth_data.csv")
}

#[test]
fn test_sample_cleaning_counts() {
    let raw = load_table(&sample_path()).unwrap();
    let (cleaned, report) = clean_table(&raw, &CleaningRules::default()).unwrap();

    assert_eq!(report.raw_rows, raw.height());
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.missing_core_removed, 2);
    assert_eq!(report.negative_removed, 1);
    assert_eq!(report.excluded_removed, 1);
    assert_eq!(cleaned.height(), raw.height() - 5);
    assert_eq!(report.clean_rows, cleaned.height());
}

#[test]
fn test_sample_na_region_survives() {
    let raw = load_table(&sample_path()).unwrap();
    let (cleaned, _) = clean_table(&raw, &CleaningRules::default()).unwrap();

    let regions = cleaned.column("region").unwrap().str().unwrap();
    assert_eq!(regions.null_count(), 0);
    assert!(regions.into_no_null_iter().any(|region| region == "NA"));
}

#[test]
fn test_sample_outlier_removed() {
    let raw = load_table(&sample_path()).unwrap();
    let (cleaned, _) = clean_table(&raw, &CleaningRules::default()).unwrap();

    let dates = cleaned.column("date").unwrap().str().unwrap();
    let users = cleaned.column("user_id").unwrap().str().unwrap();
    let hit = dates
        .into_no_null_iter()
        .zip(users.into_no_null_iter())
        .any(|(date, user)| date == "2026-01-20" && user == "U1065");
    assert!(!hit);

    let revenue = cleaned.column("revenue_usd").unwrap().f64().unwrap();
    assert!(revenue.max().unwrap() < 9900.0);
}

#[test]
fn test_sample_keeps_rows_missing_only_cost() {
    let raw = load_table(&sample_path()).unwrap();
    let (cleaned, _) = clean_table(&raw, &CleaningRules::default()).unwrap();

    let cost = cleaned.column("cost_usd").unwrap().f64().unwrap();
    assert_eq!(cost.null_count(), 1);
}
