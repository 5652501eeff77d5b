use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog::{RuleCatalog, RuleCategory, RuleView};
use super::document::{ContentDocument, ContentLimits, ValidationError};
use super::evaluation::{EvaluationError, EvaluationReport, Evaluator};
use super::optimizer::{
    CancellationSignal, ConvergenceOrchestrator, OptimizationConfig, OptimizationError,
    OptimizationOutcome,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub content: String,
    /// Threshold for the `Excellent` verdict; the service default applies when absent.
    #[serde(default, alias = "requiredThreshold")]
    pub required_threshold: Option<u8>,
}

/// Per-request adjustments layered over the service defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationOverrides {
    #[serde(default, alias = "targetApplicableScore")]
    pub target_applicable_score: Option<u8>,
    #[serde(default, alias = "targetAbsolutePoints")]
    pub target_absolute_points: Option<usize>,
    #[serde(default, alias = "maxRetries")]
    pub max_retries: Option<usize>,
    #[serde(default, alias = "promotionBuffer")]
    pub promotion_buffer: Option<usize>,
}

impl OptimizationOverrides {
    pub fn apply(&self, base: OptimizationConfig) -> OptimizationConfig {
        OptimizationConfig {
            target_applicable_score: self
                .target_applicable_score
                .unwrap_or(base.target_applicable_score),
            target_absolute_points: self.target_absolute_points.or(base.target_absolute_points),
            max_retries: self.max_retries.unwrap_or(base.max_retries),
            max_retries_limit: base.max_retries_limit,
            promotion_buffer: self.promotion_buffer.unwrap_or(base.promotion_buffer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub content: String,
    #[serde(default)]
    pub config: OptimizationOverrides,
}

/// Facade composing the shared catalog with process-wide defaults.
#[derive(Debug, Clone)]
pub struct ComplianceService {
    catalog: Arc<RuleCatalog>,
    defaults: OptimizationConfig,
    limits: ContentLimits,
}

impl ComplianceService {
    pub fn new(
        catalog: Arc<RuleCatalog>,
        defaults: OptimizationConfig,
        limits: ContentLimits,
    ) -> Self {
        Self {
            catalog,
            defaults,
            limits,
        }
    }

    pub fn catalog(&self) -> &Arc<RuleCatalog> {
        &self.catalog
    }

    pub fn defaults(&self) -> &OptimizationConfig {
        &self.defaults
    }

    pub fn limits(&self) -> ContentLimits {
        self.limits
    }

    /// Catalog listing, optionally narrowed to one category.
    pub fn rules(&self, category: Option<RuleCategory>) -> Vec<RuleView> {
        self.catalog
            .rules()
            .iter()
            .filter(|rule| category.map_or(true, |category| rule.category() == category))
            .map(|rule| rule.view())
            .collect()
    }

    /// Score a buffer without changing it.
    pub fn evaluate(
        &self,
        request: EvaluateRequest,
    ) -> Result<EvaluationReport, ComplianceServiceError> {
        let document = ContentDocument::parse(request.content, self.limits)?;
        let threshold = request
            .required_threshold
            .unwrap_or(self.defaults.target_applicable_score);
        if threshold > 100 {
            return Err(OptimizationError::InvalidConfig(format!(
                "required threshold {threshold} exceeds 100"
            ))
            .into());
        }

        let evaluator = Evaluator::new(Arc::clone(&self.catalog), threshold);
        Ok(evaluator.evaluate(document.as_str())?)
    }

    /// Run the remediation loop on a buffer.
    pub fn optimize(
        &self,
        request: OptimizeRequest,
    ) -> Result<OptimizationOutcome, ComplianceServiceError> {
        let (orchestrator, document) = self.prepare(request)?;
        Ok(orchestrator.optimize(document.as_str())?)
    }

    pub fn optimize_with(
        &self,
        request: OptimizeRequest,
        cancel: &dyn CancellationSignal,
    ) -> Result<OptimizationOutcome, ComplianceServiceError> {
        let (orchestrator, document) = self.prepare(request)?;
        Ok(orchestrator.optimize_with(document.as_str(), cancel)?)
    }

    fn prepare(
        &self,
        request: OptimizeRequest,
    ) -> Result<(ConvergenceOrchestrator, ContentDocument), ComplianceServiceError> {
        let document = ContentDocument::parse(request.content, self.limits)?;
        let config = request.config.apply(self.defaults);
        let orchestrator = ConvergenceOrchestrator::new(Arc::clone(&self.catalog), config)?;
        Ok((orchestrator, document))
    }
}

/// Error raised by the compliance service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComplianceServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Optimization(#[from] OptimizationError),
}

impl ComplianceServiceError {
    /// Whether the caller, rather than the engine, is at fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ComplianceServiceError::Validation(_)
                | ComplianceServiceError::Optimization(OptimizationError::InvalidConfig(_))
        )
    }

    /// Rule implicated in an engine fault.
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            ComplianceServiceError::Validation(_) => None,
            ComplianceServiceError::Evaluation(err) => Some(err.rule_id()),
            ComplianceServiceError::Optimization(err) => err.rule_id(),
        }
    }
}
