#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sprout/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod pipeline;

// Re-export stage crates
pub use sprout_data as data;
pub use sprout_model as model;
pub use sprout_output as output;

pub use pipeline::{
    DEFAULT_INPUT, DEFAULT_OUTPUT_DIR, PipelineConfig, PipelineError, RunSummary, run,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
