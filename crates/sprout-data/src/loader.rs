//! CSV loading for the growth table.

use crate::error::{DataError, Result};
use crate::schema::{COLUMNS, NUMERIC_COLUMNS};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Load a growth CSV into a DataFrame.
///
/// Schema inference is disabled so every cell arrives as text and empty cells
/// stay empty strings; the literal `NA` therefore survives as a region code.
/// The numeric columns are then cast non-strictly to `Float64`, turning
/// unparseable cells (including empty ones) into nulls.
///
/// # Errors
///
/// - [`DataError::NotFound`] if `path` does not exist
/// - [`DataError::MissingColumn`] if the header lacks a schema column
/// - [`DataError::Polars`] if the file is not valid delimited text
pub fn load_table(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(DataError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_missing_is_null(false))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    require_columns(&raw, path)?;
    debug!(rows = raw.height(), path = %path.display(), "read raw csv");

    let table = raw
        .lazy()
        .with_columns(NUMERIC_COLUMNS.map(|name| col(name).cast(DataType::Float64)))
        .collect()?;

    info!(rows = table.height(), "loaded growth table");
    Ok(table)
}

fn require_columns(df: &DataFrame, path: &Path) -> Result<()> {
    let names = df.get_column_names();
    for column in COLUMNS {
        if !names.iter().any(|name| name.as_str() == column) {
            return Err(DataError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "date,channel,region,user_id,sessions,signups,orders,revenue_usd,cost_usd";

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        write!(file, "{body}").unwrap();
        file
    }

    #[test]
    fn test_na_region_is_a_value() {
        let file = write_csv("2026-01-02,paid,NA,U1,10,2,1,20,5\n");
        let df = load_table(file.path()).unwrap();

        let region = df.column("region").unwrap().str().unwrap();
        assert_eq!(region.get(0), Some("NA"));
        assert_eq!(region.null_count(), 0);
    }

    #[test]
    fn test_numeric_columns_are_coerced() {
        let file = write_csv("2026-01-02,paid,EU,U1,10,abc,1,,5.5\n");
        let df = load_table(file.path()).unwrap();

        assert_eq!(df.column("sessions").unwrap().dtype(), &DataType::Float64);
        let sessions = df.column("sessions").unwrap().f64().unwrap();
        let signups = df.column("signups").unwrap().f64().unwrap();
        let revenue = df.column("revenue_usd").unwrap().f64().unwrap();
        let cost = df.column("cost_usd").unwrap().f64().unwrap();
        assert_eq!(sessions.get(0), Some(10.0));
        assert_eq!(signups.get(0), None);
        assert_eq!(revenue.get(0), None);
        assert_eq!(cost.get(0), Some(5.5));
    }

    #[test]
    fn test_missing_file() {
        let err = load_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }

    #[test]
    fn test_missing_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "date,channel,region,user_id,sessions,signups,revenue_usd,cost_usd"
        )
        .unwrap();
        writeln!(file, "2026-01-02,paid,EU,U1,10,2,20,5").unwrap();

        let err = load_table(file.path()).unwrap_err();
        match err {
            DataError::MissingColumn { column, .. } => assert_eq!(column, "orders"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
