//! Design matrix construction with treatment-coded categoricals.
//!
//! Each categorical column becomes one indicator column per level except the
//! reference level, which is the first level in sorted order. Dummy columns
//! are named `C(column)[T.level]`.

use crate::error::RegressionError;
use crate::model::ModelSpec;
use ndarray::{Array1, Array2};
use polars::prelude::*;
use sprout_data::schema::is_numeric;
use std::collections::BTreeSet;

/// Name of the constant column.
pub const INTERCEPT: &str = "Intercept";

/// Sorted levels of one categorical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorical {
    /// Source column name
    pub column: String,
    /// Distinct non-null values in sorted order
    pub levels: Vec<String>,
}

impl Categorical {
    /// Collect the levels of a string column.
    pub fn from_column(df: &DataFrame, column: &str) -> Result<Self, RegressionError> {
        let levels: BTreeSet<String> = df
            .column(column)?
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();

        Ok(Self {
            column: column.to_string(),
            levels: levels.into_iter().collect(),
        })
    }

    /// The omitted level, if any level exists.
    pub fn reference(&self) -> Option<&str> {
        self.levels.first().map(String::as_str)
    }

    /// Levels that get an indicator column.
    pub fn encoded_levels(&self) -> &[String] {
        self.levels.get(1..).unwrap_or(&[])
    }

    /// Indicator column names, one per encoded level.
    pub fn dummy_names(&self) -> Vec<String> {
        self.encoded_levels()
            .iter()
            .map(|level| dummy_column_name(&self.column, level))
            .collect()
    }
}

/// Column name for the indicator of `level` in `column`.
pub fn dummy_column_name(column: &str, level: &str) -> String {
    format!("C({column})[T.{level}]")
}

/// Regressors and response ready for least squares.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    /// Parameter names, one per column of `x`
    pub names: Vec<String>,
    /// Regressors (n x k)
    pub x: Array2<f64>,
    /// Response (n)
    pub y: Array1<f64>,
}

impl DesignMatrix {
    /// Number of observations.
    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    /// Number of parameters.
    pub fn ncols(&self) -> usize {
        self.x.ncols()
    }
}

/// Build the design matrix for `spec` from a cleaned table.
///
/// Rows with a missing value in any model column are dropped first. Column
/// order is intercept, predictor, then the dummies of each categorical in
/// `spec.categoricals` order.
pub fn build_design(df: &DataFrame, spec: &ModelSpec) -> Result<DesignMatrix, RegressionError> {
    let columns = spec.columns();
    let frame = df
        .clone()
        .lazy()
        .select(columns.iter().map(|name| col(*name)).collect::<Vec<_>>())
        .filter(present(&columns))
        .collect()?;

    let categoricals = spec
        .categoricals
        .iter()
        .map(|name| Categorical::from_column(&frame, name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut names = vec![INTERCEPT.to_string(), spec.predictor.clone()];
    let mut exprs = vec![
        lit(1.0).alias(INTERCEPT),
        col(spec.predictor.as_str()).cast(DataType::Float64),
        col(spec.outcome.as_str()).cast(DataType::Float64),
    ];
    for categorical in &categoricals {
        for level in categorical.encoded_levels() {
            let name = dummy_column_name(&categorical.column, level);
            exprs.push(
                when(col(categorical.column.as_str()).eq(lit(level.as_str())))
                    .then(lit(1.0))
                    .otherwise(lit(0.0))
                    .alias(&name),
            );
            names.push(name);
        }
    }

    let encoded = frame.lazy().select(exprs).collect()?;
    let n = encoded.height();

    let mut x = Array2::<f64>::zeros((n, names.len()));
    for (j, name) in names.iter().enumerate() {
        let values = encoded.column(name)?.f64()?;
        for (i, value) in values.into_iter().enumerate() {
            x[[i, j]] = value.unwrap_or(f64::NAN);
        }
    }

    let y = encoded
        .column(spec.outcome.as_str())?
        .f64()?
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect::<Array1<f64>>();

    Ok(DesignMatrix { names, x, y })
}

/// True where every model column holds a usable value.
fn present(columns: &[&str]) -> Expr {
    columns
        .iter()
        .map(|name| {
            let not_null = col(*name).is_not_null();
            if is_numeric(name) {
                not_null.and(col(*name).is_not_nan())
            } else {
                not_null
            }
        })
        .reduce(|acc, expr| acc.and(expr))
        .unwrap_or_else(|| lit(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataFrame {
        df!(
            "channel" => ["paid", "organic", "referral", "paid", "organic"],
            "region" => ["NA", "EU", "NA", "APAC", "EU"],
            "sessions" => [Some(10.0), Some(20.0), Some(30.0), None, Some(50.0)],
            "orders" => [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]
        )
        .unwrap()
    }

    #[test]
    fn test_levels_sorted_with_first_as_reference() {
        let cat = Categorical::from_column(&table(), "channel").unwrap();
        assert_eq!(cat.levels, vec!["organic", "paid", "referral"]);
        assert_eq!(cat.reference(), Some("organic"));
        assert_eq!(
            cat.dummy_names(),
            vec!["C(channel)[T.paid]", "C(channel)[T.referral]"]
        );
    }

    #[test]
    fn test_na_is_a_level() {
        let cat = Categorical::from_column(&table(), "region").unwrap();
        assert_eq!(cat.levels, vec!["APAC", "EU", "NA"]);
    }

    #[test]
    fn test_build_design_drops_missing_rows() {
        let spec = ModelSpec::new("m", "orders", "sessions");
        let design = build_design(&table(), &spec).unwrap();

        // The APAC row has no sessions, so only EU and NA remain for region.
        assert_eq!(
            design.names,
            vec![
                "Intercept",
                "sessions",
                "C(channel)[T.paid]",
                "C(channel)[T.referral]",
                "C(region)[T.NA]",
            ]
        );
        assert_eq!(design.nrows(), 4);
        assert_eq!(design.ncols(), 5);
        assert_eq!(design.y.to_vec(), vec![1.0, 2.0, 3.0, 5.0]);

        // paid / NA row
        assert_eq!(design.x.row(0).to_vec(), vec![1.0, 10.0, 1.0, 0.0, 1.0]);
        // organic / EU row is all reference levels
        assert_eq!(design.x.row(1).to_vec(), vec![1.0, 20.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_table() {
        let empty = table().head(Some(0));
        let spec = ModelSpec::new("m", "orders", "sessions");
        let design = build_design(&empty, &spec).unwrap();

        assert_eq!(design.nrows(), 0);
        assert_eq!(design.names, vec!["Intercept", "sessions"]);
    }
}
