//! Ordinary least squares.
//!
//! Solves the normal equations `(XᵀX) β = Xᵀy` by Gauss-Jordan elimination
//! with partial pivoting. The inverse of `XᵀX` is kept for the coefficient
//! covariance `σ² (XᵀX)⁻¹` with `σ² = SSR / (n - k)`.
//!
//! R² is centered, so the design is expected to contain an intercept column.
//! P-values are two-sided, from Student's t with `n - k` degrees of freedom.

use crate::error::RegressionError;
use ndarray::{Array1, Array2, ArrayView1};
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::debug;

/// Pivots of the equilibrated `XᵀX` smaller than this are treated as zero.
const PIVOT_TOLERANCE: f64 = 1e-10;

/// A fitted least squares model.
#[derive(Debug, Clone)]
pub struct OlsFit {
    names: Vec<String>,
    params: Array1<f64>,
    std_errors: Array1<f64>,
    t_values: Array1<f64>,
    p_values: Array1<f64>,
    normalized_cov: Array2<f64>,
    residual_variance: f64,
    r_squared: f64,
    adj_r_squared: f64,
    nobs: usize,
    df_resid: usize,
}

impl OlsFit {
    /// Parameter names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Estimated coefficients in column order.
    pub const fn params(&self) -> &Array1<f64> {
        &self.params
    }

    /// Standard errors of the coefficients.
    pub const fn std_errors(&self) -> &Array1<f64> {
        &self.std_errors
    }

    /// t statistics of the coefficients.
    pub const fn t_values(&self) -> &Array1<f64> {
        &self.t_values
    }

    /// Two-sided p-values of the coefficients.
    pub const fn p_values(&self) -> &Array1<f64> {
        &self.p_values
    }

    /// Coefficient of determination.
    pub const fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// R² adjusted for the number of parameters.
    pub const fn adj_r_squared(&self) -> f64 {
        self.adj_r_squared
    }

    /// Residual variance `SSR / (n - k)`.
    pub const fn residual_variance(&self) -> f64 {
        self.residual_variance
    }

    /// Number of observations.
    pub const fn nobs(&self) -> usize {
        self.nobs
    }

    /// Residual degrees of freedom `n - k`.
    pub const fn df_resid(&self) -> usize {
        self.df_resid
    }

    fn index_of(&self, name: &str) -> Result<usize, RegressionError> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| RegressionError::UnknownParameter(name.to_string()))
    }

    /// Coefficient of a named parameter.
    pub fn coefficient(&self, name: &str) -> Result<f64, RegressionError> {
        Ok(self.params[self.index_of(name)?])
    }

    /// Standard error of a named parameter.
    pub fn std_error(&self, name: &str) -> Result<f64, RegressionError> {
        Ok(self.std_errors[self.index_of(name)?])
    }

    /// p-value of a named parameter.
    pub fn p_value(&self, name: &str) -> Result<f64, RegressionError> {
        Ok(self.p_values[self.index_of(name)?])
    }

    /// Fitted value for one row of regressors.
    pub fn predict(&self, row: ArrayView1<'_, f64>) -> f64 {
        row.dot(&self.params)
    }

    /// Standard error of the fitted mean at one row of regressors,
    /// `sqrt(σ² xᵀ (XᵀX)⁻¹ x)`.
    pub fn mean_std_error(&self, row: ArrayView1<'_, f64>) -> f64 {
        let leverage = row.dot(&self.normalized_cov.dot(&row));
        (self.residual_variance * leverage).sqrt()
    }

    /// Two-sided Student's t critical value at `confidence` (e.g. 0.95).
    pub fn t_critical(&self, confidence: f64) -> Result<f64, RegressionError> {
        let dist = students_t(self.df_resid)?;
        Ok(dist.inverse_cdf(0.5 + confidence / 2.0))
    }
}

/// Fit `y ~ x` by ordinary least squares.
///
/// # Errors
///
/// - [`RegressionError::DimensionMismatch`] if `names`, `x` and `y` disagree
/// - [`RegressionError::InsufficientData`] if there are no residual degrees of freedom
/// - [`RegressionError::RankDeficient`] if `x` does not have full column rank
pub fn fit(
    x: &Array2<f64>,
    y: &Array1<f64>,
    names: Vec<String>,
) -> Result<OlsFit, RegressionError> {
    let (n, k) = x.dim();
    if names.len() != k {
        return Err(RegressionError::DimensionMismatch {
            expected: k,
            actual: names.len(),
        });
    }
    if y.len() != n {
        return Err(RegressionError::DimensionMismatch {
            expected: n,
            actual: y.len(),
        });
    }
    if n <= k {
        return Err(RegressionError::InsufficientData {
            required: k + 1,
            actual: n,
        });
    }

    let xtx = x.t().dot(x);
    let xty = x.t().dot(y);
    let normalized_cov = invert(&xtx).map_err(|column| RegressionError::RankDeficient {
        column: names[column].clone(),
    })?;

    let params = normalized_cov.dot(&xty);
    let residuals = y - &x.dot(&params);
    let ssr = residuals.dot(&residuals);

    let mean = y.sum() / n as f64;
    let tss: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();

    let df_resid = n - k;
    let r_squared = 1.0 - ssr / tss;
    let adj_r_squared = 1.0 - (n as f64 - 1.0) / df_resid as f64 * (1.0 - r_squared);
    let residual_variance = ssr / df_resid as f64;

    let std_errors = normalized_cov
        .diag()
        .mapv(|d| (residual_variance * d).sqrt());
    let t_values = &params / &std_errors;

    let dist = students_t(df_resid)?;
    let p_values = t_values.mapv(|t| {
        if t.is_nan() {
            f64::NAN
        } else {
            2.0 * dist.sf(t.abs())
        }
    });

    debug!(nobs = n, params = k, r_squared, adj_r_squared, "ols fit");

    Ok(OlsFit {
        names,
        params,
        std_errors,
        t_values,
        p_values,
        normalized_cov,
        residual_variance,
        r_squared,
        adj_r_squared,
        nobs: n,
        df_resid,
    })
}

fn students_t(df: usize) -> Result<StudentsT, RegressionError> {
    StudentsT::new(0.0, 1.0, df as f64).map_err(|e| RegressionError::Distribution(e.to_string()))
}

/// Invert a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// Rows and then columns are scaled to a largest entry of one before
/// elimination, so the pivot test does not depend on the units of each
/// predictor. The scaling is undone on the result.
///
/// On failure returns the index of the column whose pivot vanished.
fn invert(matrix: &Array2<f64>) -> Result<Array2<f64>, usize> {
    let n = matrix.nrows();
    let rows = max_abs(matrix.rows());
    if let Some(r) = rows.iter().position(|v| *v == 0.0) {
        return Err(r);
    }
    let row_scaled = Array2::from_shape_fn((n, n), |(i, j)| matrix[[i, j]] / rows[i]);
    let cols = max_abs(row_scaled.columns());
    if let Some(c) = cols.iter().position(|v| *v == 0.0) {
        return Err(c);
    }

    let mut a = Array2::from_shape_fn((n, n), |(i, j)| row_scaled[[i, j]] / cols[j]);
    let mut inv = Array2::<f64>::eye(n);

    for c in 0..n {
        let mut pivot_row = c;
        for r in (c + 1)..n {
            if a[[r, c]].abs() > a[[pivot_row, c]].abs() {
                pivot_row = r;
            }
        }
        let pivot = a[[pivot_row, c]];
        if pivot.is_nan() || pivot.abs() <= PIVOT_TOLERANCE {
            return Err(c);
        }

        if pivot_row != c {
            for j in 0..n {
                a.swap([c, j], [pivot_row, j]);
                inv.swap([c, j], [pivot_row, j]);
            }
        }

        for j in 0..n {
            a[[c, j]] /= pivot;
            inv[[c, j]] /= pivot;
        }

        for r in 0..n {
            if r == c {
                continue;
            }
            let factor = a[[r, c]];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                let da = factor * a[[c, j]];
                let di = factor * inv[[c, j]];
                a[[r, j]] -= da;
                inv[[r, j]] -= di;
            }
        }
    }

    // A = R B C, so A⁻¹ = C⁻¹ B⁻¹ R⁻¹.
    Ok(Array2::from_shape_fn((n, n), |(i, j)| inv[[i, j]] / (cols[i] * rows[j])))
}

fn max_abs<'a>(lanes: impl IntoIterator<Item = ArrayView1<'a, f64>>) -> Vec<f64> {
    lanes
        .into_iter()
        .map(|lane| lane.fold(0.0_f64, |acc, v| acc.max(v.abs())))
        .collect()
}
