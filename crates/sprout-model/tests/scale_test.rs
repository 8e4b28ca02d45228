//! Fits must not depend on the units of a predictor.

use approx::assert_relative_eq;
use polars::prelude::*;
use rstest::rstest;
use sprout_data::{CleaningRules, clean_table, load_table};
use sprout_model::{ModelSpec, analyze_model};
use std::path::PathBuf;

fn cleaned_sample() -> DataFrame {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample_growth_data.csv");
    let raw = load_table(&path).unwrap();
    clean_table(&raw, &CleaningRules::default()).unwrap().0
}

fn with_sessions_times(df: &DataFrame, factor: f64) -> DataFrame {
    df.clone()
        .lazy()
        .with_columns([(col("sessions") * lit(factor)).alias("sessions")])
        .collect()
        .unwrap()
}

#[rstest]
#[case(1e3)]
#[case(1e5)]
fn test_scaled_sessions_match_unscaled_fit(#[case] factor: f64) {
    let cleaned = cleaned_sample();
    let spec = ModelSpec::defaults().remove(0);

    let base = analyze_model(&cleaned, &spec).unwrap();
    let scaled = analyze_model(&with_sessions_times(&cleaned, factor), &spec).unwrap();

    assert!(!scaled.is_degenerate(), "{scaled}");
    assert_eq!(scaled.nobs, base.nobs);
    assert_relative_eq!(scaled.r_squared, base.r_squared, max_relative = 1e-9);
    assert_relative_eq!(scaled.adj_r_squared, base.adj_r_squared, max_relative = 1e-9);
    assert_relative_eq!(scaled.p_value, base.p_value, max_relative = 1e-6);
    assert_relative_eq!(scaled.coefficient * factor, base.coefficient, max_relative = 1e-9);
}

#[test]
fn test_scaled_outcome_keeps_r_squared() {
    let cleaned = cleaned_sample();
    let spec = ModelSpec::defaults().remove(1);
    let scaled_orders = cleaned
        .clone()
        .lazy()
        .with_columns([(col("orders") * lit(1e4)).alias("orders")])
        .collect()
        .unwrap();

    let base = analyze_model(&cleaned, &spec).unwrap();
    let scaled = analyze_model(&scaled_orders, &spec).unwrap();

    assert!(!scaled.is_degenerate(), "{scaled}");
    assert_relative_eq!(scaled.r_squared, base.r_squared, max_relative = 1e-9);
    assert_relative_eq!(scaled.coefficient * 1e4, base.coefficient, max_relative = 1e-9);
}
