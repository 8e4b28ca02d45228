#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sprout/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod clean;
pub mod error;
pub mod loader;
pub mod schema;

pub use clean::{CleaningReport, CleaningRules, ExcludedRow, clean_table};
pub use error::{DataError, Result};
pub use loader::load_table;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
