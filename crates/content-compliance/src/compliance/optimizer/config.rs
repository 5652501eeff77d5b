use serde::{Deserialize, Serialize};

use super::OptimizationError;
use crate::compliance::catalog::RuleCatalog;
use crate::compliance::evaluation::DEFAULT_REQUIRED_THRESHOLD;

/// Ceiling no configured retry budget may exceed.
pub const MAX_RETRIES_LIMIT: usize = 100;

const DEFAULT_MAX_RETRIES_LIMIT: usize = 20;

fn default_max_retries_limit() -> usize {
    DEFAULT_MAX_RETRIES_LIMIT
}

/// Targets and budget for one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationConfig {
    pub target_applicable_score: u8,
    /// Passed-item target; `None` means 90% of the catalog.
    pub target_absolute_points: Option<usize>,
    pub max_retries: usize,
    /// Largest `max_retries` a request may ask for; set by the operator, not the request.
    #[serde(default = "default_max_retries_limit")]
    pub max_retries_limit: usize,
    /// Extra NotApplicable rules promoted beyond the exact point gap.
    pub promotion_buffer: usize,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            target_applicable_score: DEFAULT_REQUIRED_THRESHOLD,
            target_absolute_points: None,
            max_retries: 5,
            max_retries_limit: DEFAULT_MAX_RETRIES_LIMIT,
            promotion_buffer: 2,
        }
    }
}

impl OptimizationConfig {
    /// Rejects targets and budgets the catalog cannot honor.
    pub fn validate(&self, catalog: &RuleCatalog) -> Result<(), OptimizationError> {
        let invalid = |message: String| Err(OptimizationError::InvalidConfig(message));

        if self.target_applicable_score > 100 {
            return invalid(format!(
                "target applicable score {} exceeds 100",
                self.target_applicable_score
            ));
        }
        if self.max_retries_limit > MAX_RETRIES_LIMIT {
            return invalid(format!(
                "retry limit {} exceeds the ceiling of {MAX_RETRIES_LIMIT}",
                self.max_retries_limit
            ));
        }
        if self.max_retries > self.max_retries_limit {
            return invalid(format!(
                "max retries {} exceeds the limit of {}",
                self.max_retries, self.max_retries_limit
            ));
        }
        if let Some(points) = self.target_absolute_points {
            if points > catalog.len() {
                return invalid(format!(
                    "target of {points} passed items exceeds the {} rule catalog",
                    catalog.len()
                ));
            }
        }
        if self.promotion_buffer > catalog.len() {
            return invalid(format!(
                "promotion buffer {} exceeds the {} rule catalog",
                self.promotion_buffer,
                catalog.len()
            ));
        }
        Ok(())
    }

    pub fn target_points(&self, catalog: &RuleCatalog) -> usize {
        self.target_absolute_points
            .unwrap_or_else(|| catalog.default_target_points())
    }
}
