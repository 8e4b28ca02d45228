#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sprout/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod analyzer;
pub mod design;
pub mod error;
pub mod model;
pub mod ols;

// Re-export main types
pub use analyzer::{Analyzer, RegressionResult, analyze_model, fit_model};
pub use design::{Categorical, DesignMatrix, build_design};
pub use error::RegressionError;
pub use model::ModelSpec;
pub use ols::OlsFit;
