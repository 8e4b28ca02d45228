#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sprout/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod artifact;
pub mod business;
pub mod chart;
pub mod error;
pub mod format;
pub mod regression;
pub mod showcase;

pub use artifact::{Artifact, UTF8_BOM, write_text};
pub use business::{BusinessDocument, BusinessFormat, BusinessReport};
pub use chart::{ChartSpec, FitBand, RegressionChart};
pub use error::{OutputError, Result};
pub use regression::{REGRESSION_REPORT_FILE, RegressionReport};
pub use showcase::{SHOWCASE_FILE, ShowcasePage};
