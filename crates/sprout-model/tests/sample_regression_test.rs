//! Regressions over the bundled sample.

use sprout_data::{CleaningRules, clean_table, load_table};
use sprout_model::{Analyzer, ModelSpec, fit_model};
use std::path::PathBuf;

fn cleaned_sample() -> polars::prelude::DataFrame {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample_growth_data.csv");
    let raw = load_table(&path).unwrap();
    clean_table(&raw, &CleaningRules::default()).unwrap().0
}

#[test]
fn test_sample_models_fit() {
    let cleaned = cleaned_sample();
    let results = Analyzer::default().analyze(&cleaned).unwrap();

    assert_eq!(results.len(), 3);
    for result in &results {
        assert!(!result.is_degenerate(), "{result}");
        assert_eq!(result.nobs, cleaned.height());
        assert!(result.r_squared > 0.0 && result.r_squared <= 1.0);
        assert!(result.adj_r_squared <= result.r_squared);
        assert!(result.coefficient > 0.0);
        assert!((0.0..=1.0).contains(&result.p_value));
    }
}

#[test]
fn test_sample_refit_is_identical() {
    let cleaned = cleaned_sample();
    let analyzer = Analyzer::default();

    let first = analyzer.analyze(&cleaned).unwrap();
    let second = analyzer.analyze(&cleaned).unwrap();
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.r_squared.to_bits(), b.r_squared.to_bits());
        assert_eq!(a.adj_r_squared.to_bits(), b.adj_r_squared.to_bits());
        assert_eq!(a.coefficient.to_bits(), b.coefficient.to_bits());
        assert_eq!(a.p_value.to_bits(), b.p_value.to_bits());
    }
}

#[test]
fn test_sample_design_has_na_region_dummy() {
    let cleaned = cleaned_sample();
    let spec = ModelSpec::defaults().remove(0);
    let fit = fit_model(&cleaned, &spec).unwrap();

    // APAC is the reference region; NA gets its own indicator.
    assert!(fit.names().iter().any(|n| n == "C(region)[T.NA]"));
    assert!(fit.names().iter().any(|n| n == "C(region)[T.EU]"));
    assert!(!fit.names().iter().any(|n| n == "C(region)[T.APAC]"));
    assert!(fit.names().iter().any(|n| n == "C(channel)[T.paid]"));
}
