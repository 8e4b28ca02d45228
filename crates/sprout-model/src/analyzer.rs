//! Runs the growth regressions over a cleaned table.

use crate::design::build_design;
use crate::error::RegressionError;
use crate::model::ModelSpec;
use crate::ols::{self, OlsFit};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Summary statistics of one fitted model.
///
/// Statistics are NaN when the model could not be fitted (too few rows or a
/// rank-deficient design).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Model label, e.g. "Model 1"
    pub label: String,
    /// Formula text
    pub formula: String,
    /// Dependent variable
    pub outcome: String,
    /// Reported predictor
    pub predictor: String,
    /// Observations used in the fit
    pub nobs: usize,
    /// R²
    pub r_squared: f64,
    /// Adjusted R²
    pub adj_r_squared: f64,
    /// Predictor coefficient
    pub coefficient: f64,
    /// Two-sided p-value of the predictor coefficient
    pub p_value: f64,
}

impl RegressionResult {
    /// Extract the reported statistics from a fit.
    pub fn from_fit(spec: &ModelSpec, fit: &OlsFit) -> Result<Self, RegressionError> {
        Ok(Self {
            label: spec.label.clone(),
            formula: spec.formula(),
            outcome: spec.outcome.clone(),
            predictor: spec.predictor.clone(),
            nobs: fit.nobs(),
            r_squared: fit.r_squared(),
            adj_r_squared: fit.adj_r_squared(),
            coefficient: fit.coefficient(&spec.predictor)?,
            p_value: fit.p_value(&spec.predictor)?,
        })
    }

    /// A result whose statistics are all NaN.
    pub fn degenerate(spec: &ModelSpec, nobs: usize) -> Self {
        Self {
            label: spec.label.clone(),
            formula: spec.formula(),
            outcome: spec.outcome.clone(),
            predictor: spec.predictor.clone(),
            nobs,
            r_squared: f64::NAN,
            adj_r_squared: f64::NAN,
            coefficient: f64::NAN,
            p_value: f64::NAN,
        }
    }

    /// Whether the model could not be fitted.
    pub const fn is_degenerate(&self) -> bool {
        self.r_squared.is_nan()
    }
}

impl fmt::Display for RegressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: R²={:.4}, adj R²={:.4}, {}={:.4} (p={:.4e}, n={})",
            self.label,
            self.formula,
            self.r_squared,
            self.adj_r_squared,
            self.predictor,
            self.coefficient,
            self.p_value,
            self.nobs
        )
    }
}

/// Fit one model and keep the full fit.
pub fn fit_model(df: &DataFrame, spec: &ModelSpec) -> Result<OlsFit, RegressionError> {
    let design = build_design(df, spec)?;
    ols::fit(&design.x, &design.y, design.names)
}

/// Fit one model and extract its reported statistics.
///
/// Degenerate input is reported as NaN statistics with a warning; other
/// errors are returned.
pub fn analyze_model(
    df: &DataFrame,
    spec: &ModelSpec,
) -> Result<RegressionResult, RegressionError> {
    let design = build_design(df, spec)?;
    let nobs = design.nrows();

    match ols::fit(&design.x, &design.y, design.names) {
        Ok(fit) => RegressionResult::from_fit(spec, &fit),
        Err(e) if e.is_degenerate() => {
            warn!(
                model = %spec.label,
                formula = %spec.formula(),
                error = %e,
                "degenerate regression, reporting NaN"
            );
            Ok(RegressionResult::degenerate(spec, nobs))
        }
        Err(e) => Err(e),
    }
}

/// Runs a fixed list of model specifications.
#[derive(Debug, Clone)]
pub struct Analyzer {
    specs: Vec<ModelSpec>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(ModelSpec::defaults())
    }
}

impl Analyzer {
    /// Create an analyzer for the given specifications.
    pub const fn new(specs: Vec<ModelSpec>) -> Self {
        Self { specs }
    }

    /// Model specifications in run order.
    pub fn specs(&self) -> &[ModelSpec] {
        &self.specs
    }

    /// Fit every model.
    pub fn analyze(&self, df: &DataFrame) -> Result<Vec<RegressionResult>, RegressionError> {
        self.specs
            .iter()
            .map(|spec| {
                let result = analyze_model(df, spec)?;
                info!("{result}");
                Ok(result)
            })
            .collect()
    }
}
