//! Row cleaning rules.
//!
//! Four filters run in a fixed order: exact duplicates, rows missing a core
//! field, rows with negative sessions, and explicitly excluded
//! `(date, user_id)` pairs. Each rule is counted against the rows that
//! survived the previous one, so a row hit by several rules is counted once.

use crate::error::Result;
use crate::schema::{CORE_COLUMNS, DATE, SESSIONS, USER_ID};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

const OUTLIER_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2026, 1, 20) {
    Some(date) => date,
    None => panic!("invalid outlier date"),
};

/// A single row removed by composite key regardless of its values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExcludedRow {
    /// Observation date.
    pub date: NaiveDate,
    /// User identifier.
    pub user_id: String,
}

impl ExcludedRow {
    /// Create a new exclusion.
    pub fn new(date: NaiveDate, user_id: impl Into<String>) -> Self {
        Self {
            date,
            user_id: user_id.into(),
        }
    }

    /// Date as it appears in the `date` column.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Configuration for [`clean_table`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningRules {
    /// Columns that must be non-missing (default: sessions, signups, orders, revenue_usd)
    pub core_columns: Vec<String>,
    /// Column whose negative values are dropped (default: "sessions")
    pub non_negative_column: String,
    /// Rows removed by `(date, user_id)` (default: 2026-01-20 / U1065)
    pub excluded_rows: Vec<ExcludedRow>,
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self {
            core_columns: CORE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            non_negative_column: SESSIONS.to_string(),
            excluded_rows: vec![ExcludedRow::new(OUTLIER_DATE, "U1065")],
        }
    }
}

/// Row counts removed by each cleaning rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows in the loaded table.
    pub raw_rows: usize,
    /// Exact duplicates of an earlier row.
    pub duplicates_removed: usize,
    /// Rows missing a core field.
    pub missing_core_removed: usize,
    /// Rows with a negative value in the non-negative column.
    pub negative_removed: usize,
    /// Rows matching an excluded `(date, user_id)` pair.
    pub excluded_removed: usize,
    /// Rows left for analysis.
    pub clean_rows: usize,
}

impl CleaningReport {
    /// Total rows removed across all rules.
    pub const fn total_removed(&self) -> usize {
        self.duplicates_removed
            + self.missing_core_removed
            + self.negative_removed
            + self.excluded_removed
    }
}

impl fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} rows (duplicates: {}, missing core fields: {}, negative sessions: {}, excluded: {})",
            self.raw_rows,
            self.clean_rows,
            self.duplicates_removed,
            self.missing_core_removed,
            self.negative_removed,
            self.excluded_removed
        )
    }
}

/// Apply the cleaning rules to a loaded table.
///
/// Row order of the survivors is preserved. An empty result is not an error.
pub fn clean_table(
    table: &DataFrame,
    rules: &CleaningRules,
) -> Result<(DataFrame, CleaningReport)> {
    let raw_rows = table.height();

    let deduped = table
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    let deduped_rows = deduped.height();

    let complete = deduped
        .lazy()
        .filter(complete_rows(&rules.core_columns))
        .collect()?;
    let complete_rows_left = complete.height();

    let non_negative = complete
        .lazy()
        .filter(col(rules.non_negative_column.as_str()).gt_eq(lit(0.0)))
        .collect()?;
    let non_negative_rows = non_negative.height();

    let cleaned = non_negative
        .lazy()
        .filter(not_excluded(&rules.excluded_rows))
        .collect()?;

    let report = CleaningReport {
        raw_rows,
        duplicates_removed: raw_rows - deduped_rows,
        missing_core_removed: deduped_rows - complete_rows_left,
        negative_removed: complete_rows_left - non_negative_rows,
        excluded_removed: non_negative_rows - cleaned.height(),
        clean_rows: cleaned.height(),
    };
    debug!(?report, "cleaning rule counts");
    info!("cleaned table: {report}");

    Ok((cleaned, report))
}

/// True where every core column is present and not NaN.
fn complete_rows(columns: &[String]) -> Expr {
    columns
        .iter()
        .map(|name| {
            col(name.as_str())
                .is_not_null()
                .and(col(name.as_str()).is_not_nan())
        })
        .reduce(|acc, expr| acc.and(expr))
        .unwrap_or_else(|| lit(true))
}

/// True where the row matches none of the excluded pairs.
fn not_excluded(excluded: &[ExcludedRow]) -> Expr {
    excluded
        .iter()
        .map(|row| {
            col(DATE)
                .neq(lit(row.date_key()))
                .or(col(USER_ID).neq(lit(row.user_id.clone())))
        })
        .reduce(|acc, expr| acc.and(expr))
        .unwrap_or_else(|| lit(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataFrame {
        df!(
            "date" => ["2026-01-02", "2026-01-02", "2026-01-03", "2026-01-04", "2026-01-20", "2026-01-20", "2026-01-21"],
            "channel" => ["paid", "paid", "organic", "referral", "referral", "paid", "organic"],
            "region" => ["NA", "NA", "EU", "APAC", "APAC", "EU", "NA"],
            "user_id" => ["U1", "U1", "U2", "U3", "U1065", "U9", "U1065"],
            "sessions" => [Some(10.0), Some(10.0), Some(12.0), Some(-3.0), Some(50.0), Some(40.0), Some(30.0)],
            "signups" => [Some(2.0), Some(2.0), None, Some(1.0), Some(5.0), Some(4.0), Some(3.0)],
            "orders" => [Some(1.0), Some(1.0), Some(1.0), Some(0.0), Some(3.0), Some(2.0), Some(1.0)],
            "revenue_usd" => [Some(20.0), Some(20.0), Some(25.0), Some(0.0), Some(9900.0), Some(40.0), Some(22.0)],
            "cost_usd" => [Some(5.0), Some(5.0), Some(1.0), Some(1.0), Some(3.0), None, Some(2.0)]
        )
        .unwrap()
    }

    #[test]
    fn test_default_rules() {
        let rules = CleaningRules::default();
        assert_eq!(rules.core_columns, vec!["sessions", "signups", "orders", "revenue_usd"]);
        assert_eq!(rules.non_negative_column, "sessions");
        assert_eq!(rules.excluded_rows.len(), 1);
        assert_eq!(rules.excluded_rows[0].date_key(), "2026-01-20");
        assert_eq!(rules.excluded_rows[0].user_id, "U1065");
    }

    #[test]
    fn test_each_rule_counted_once() {
        let (cleaned, report) = clean_table(&table(), &CleaningRules::default()).unwrap();

        assert_eq!(report.raw_rows, 7);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(report.missing_core_removed, 1);
        assert_eq!(report.negative_removed, 1);
        assert_eq!(report.excluded_removed, 1);
        assert_eq!(report.clean_rows, 3);
        assert_eq!(report.raw_rows - report.total_removed(), report.clean_rows);
        assert_eq!(cleaned.height(), 3);
    }

    #[test]
    fn test_exclusion_needs_both_keys() {
        let (cleaned, _) = clean_table(&table(), &CleaningRules::default()).unwrap();
        let users: Vec<&str> = cleaned
            .column("user_id")
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();

        // U1065 on another date and another user on the excluded date both survive.
        assert_eq!(users, vec!["U1", "U9", "U1065"]);
    }

    #[test]
    fn test_missing_cost_is_kept() {
        let (cleaned, _) = clean_table(&table(), &CleaningRules::default()).unwrap();
        let cost = cleaned.column("cost_usd").unwrap().f64().unwrap();
        assert_eq!(cost.null_count(), 1);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let rules = CleaningRules::default();
        let (once, _) = clean_table(&table(), &rules).unwrap();
        let (twice, report) = clean_table(&once, &rules).unwrap();

        assert_eq!(report.total_removed(), 0);
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn test_empty_result_is_valid() {
        let all_negative = table()
            .lazy()
            .with_column(lit(-1.0).alias("sessions"))
            .collect()
            .unwrap();

        let (cleaned, report) = clean_table(&all_negative, &CleaningRules::default()).unwrap();
        assert_eq!(cleaned.height(), 0);
        assert_eq!(report.clean_rows, 0);
        assert_eq!(report.raw_rows, report.total_removed());
    }
}
