//! Rule-based content compliance scoring with bounded iterative remediation.
//!
//! The [`RuleCatalog`] is built once and shared read-only. Every request gets its own
//! content buffer and reports: the [`Evaluator`] scores a buffer, the [`Remediator`]
//! appends idempotent fragments for unresolved rules, and the
//! [`ConvergenceOrchestrator`] alternates the two until the targets are met or the retry
//! budget runs out.

pub mod catalog;
pub mod document;
pub mod evaluation;
pub mod optimizer;
pub mod remediation;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{
    marker_for, CatalogError, Check, Evidence, FailureMode, Placement, Rule, RuleCatalog,
    RuleCategory, RuleDefinition, RuleFault, RuleView, MARKER_PREFIX,
};
pub use document::{ContentDocument, ContentLimits, ContentView, ValidationError};
pub use evaluation::{
    CategorySummary, ComplianceLevel, EvaluationError, EvaluationReport, Evaluator,
    RuleResult, RuleStatus,
};
pub use optimizer::{
    select_targets, CancellationFlag, CancellationSignal, ConvergenceOrchestrator,
    IterationTrace, OptimizationConfig, OptimizationError, OptimizationOutcome, Selection,
    SelectionKind, Termination, MAX_RETRIES_LIMIT,
};
pub use remediation::{Remediation, RemediationError, Remediator};
pub use router::compliance_router;
pub use service::{
    ComplianceService, ComplianceServiceError, EvaluateRequest, OptimizationOverrides,
    OptimizeRequest,
};
