//! End-to-end run: load, clean, analyze, render.

use sprout_data::{CleaningReport, CleaningRules, DataError, clean_table, load_table};
use sprout_model::{Analyzer, ModelSpec, RegressionError, RegressionResult};
use sprout_output::{
    Artifact, BusinessReport, ChartSpec, OutputError, RegressionChart, RegressionReport,
    ShowcasePage,
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Bundled sample table.
pub const DEFAULT_INPUT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../data/sample_growth_data.csv"
);

/// Default report directory.
pub const DEFAULT_OUTPUT_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../reports");

/// Errors that can stop a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Loading or cleaning failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// Fitting failed for a reason other than degenerate data
    #[error(transparent)]
    Regression(#[from] RegressionError),

    /// Rendering or writing an artifact failed
    #[error(transparent)]
    Output(#[from] OutputError),

    /// Resolving paths or creating the output directory failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Inputs and settings of one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source CSV
    pub input: PathBuf,
    /// Report directory, created with parents if missing
    pub output_dir: PathBuf,
    /// Row filters
    pub rules: CleaningRules,
    /// Regressions to fit
    pub models: Vec<ModelSpec>,
    /// Charts to draw
    pub charts: Vec<ChartSpec>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT, DEFAULT_OUTPUT_DIR)
    }
}

impl PipelineConfig {
    /// Default rules, models and charts for the given paths.
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            rules: CleaningRules::default(),
            models: ModelSpec::defaults(),
            charts: ChartSpec::defaults(),
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Absolute input path
    pub data_file: PathBuf,
    /// Absolute report directory
    pub output_dir: PathBuf,
    /// Row counts per cleaning rule
    pub cleaning: CleaningReport,
    /// Fitted models in report order
    pub results: Vec<RegressionResult>,
    /// Every file written, in write order
    pub written: Vec<PathBuf>,
}

/// Run the whole pipeline.
///
/// The table is loaded, cleaned and fitted and the chart data collected
/// before the output directory is created, so any input error leaves the
/// file system untouched. Existing files in the output directory are
/// overwritten.
pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let raw = load_table(&config.input)?;
    let data_file = fs::canonicalize(&config.input)?;
    let shown = display_path(&data_file);
    info!(input = %shown, "loaded input");

    let (clean, cleaning) = clean_table(&raw, &config.rules)?;

    let results = Analyzer::new(config.models.clone()).analyze(&clean)?;
    let charts = config
        .charts
        .iter()
        .map(|spec| RegressionChart::from_table(&clean, spec))
        .collect::<Result<Vec<_>, _>>()?;

    let regression =
        RegressionReport::new(shown.clone(), cleaning.clean_rows, results, &config.charts);
    let business = BusinessReport::new(shown.clone());
    let showcase = ShowcasePage::new(shown, cleaning.raw_rows, cleaning.clean_rows, &config.charts);

    fs::create_dir_all(&config.output_dir)?;
    let output_dir = fs::canonicalize(&config.output_dir)?;

    let documents = business.documents();
    let mut artifacts: Vec<&dyn Artifact> = vec![&regression];
    artifacts.extend(documents.iter().map(|d| d as &dyn Artifact));
    artifacts.push(&showcase);
    artifacts.extend(charts.iter().map(|c| c as &dyn Artifact));

    let written = artifacts
        .iter()
        .map(|artifact| artifact.write_to(&output_dir))
        .collect::<Result<Vec<_>, _>>()?;
    info!(dir = %output_dir.display(), files = written.len(), "wrote reports");

    Ok(RunSummary {
        data_file,
        output_dir,
        cleaning,
        results: regression.results().to_vec(),
        written,
    })
}

/// Path text as shown in reports, with forward slashes.
pub fn display_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
