//! Regression model specifications.

use serde::{Deserialize, Serialize};
use sprout_data::schema::{CHANNEL, ORDERS, REGION, REVENUE_USD, SESSIONS, SIGNUPS};

/// One linear model: `outcome ~ predictor + C(cat_1) + ... + C(cat_n)`.
///
/// The predictor is the single continuous regressor whose coefficient and
/// p-value are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Display label, e.g. "Model 1"
    pub label: String,
    /// Dependent variable
    pub outcome: String,
    /// Reported continuous predictor
    pub predictor: String,
    /// Categorical controls, dummy encoded
    pub categoricals: Vec<String>,
}

impl ModelSpec {
    /// Create a model controlling for channel and region.
    pub fn new(label: impl Into<String>, outcome: &str, predictor: &str) -> Self {
        Self {
            label: label.into(),
            outcome: outcome.to_string(),
            predictor: predictor.to_string(),
            categoricals: vec![CHANNEL.to_string(), REGION.to_string()],
        }
    }

    /// The three growth regressions, in report order.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Model 1", ORDERS, SESSIONS),
            Self::new("Model 2", REVENUE_USD, ORDERS),
            Self::new("Model 3", SIGNUPS, SESSIONS),
        ]
    }

    /// Formula text in Wilkinson notation.
    pub fn formula(&self) -> String {
        let mut terms = vec![self.predictor.clone()];
        terms.extend(self.categoricals.iter().map(|c| format!("C({c})")));
        format!("{} ~ {}", self.outcome, terms.join(" + "))
    }

    /// Every table column the model reads.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns = vec![self.outcome.as_str(), self.predictor.as_str()];
        columns.extend(self.categoricals.iter().map(String::as_str));
        columns
    }
}
