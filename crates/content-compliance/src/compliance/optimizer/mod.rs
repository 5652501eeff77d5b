//! Bounded evaluate/remediate loop.
//!
//! Control flow lives in the pure [`reduce`] function; [`ConvergenceOrchestrator`] only
//! performs the side of each transition that touches content.

mod config;
mod selection;
mod state;

pub use config::{OptimizationConfig, MAX_RETRIES_LIMIT};
pub use selection::{select_targets, Selection, SelectionKind};
pub use state::{reduce, OptimizerEvent, OptimizerState, Termination};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::catalog::RuleCatalog;
use super::evaluation::{EvaluationError, EvaluationReport, Evaluator};
use super::remediation::{RemediationError, Remediator};

/// Polled before every remediation pass.
pub trait CancellationSignal {
    fn is_cancelled(&self) -> bool;
}

/// Shareable flag; clone the surrounding `Arc` to hand it to another task.
#[derive(Debug, Default)]
pub struct CancellationFlag {
    cancelled: AtomicBool,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl CancellationSignal for CancellationFlag {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

struct NeverCancelled;

impl CancellationSignal for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// What one remediation pass did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IterationTrace {
    pub iteration: usize,
    pub kind: SelectionKind,
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
    pub applicable_score_before: u8,
    pub applicable_score_after: u8,
    pub passed_items_after: usize,
}

/// Final content and the report that describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationOutcome {
    pub content: String,
    pub report: EvaluationReport,
    pub retries_used: usize,
    pub evaluations: usize,
    pub termination: Termination,
    pub target_points: usize,
    pub iterations: Vec<IterationTrace>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptimizationError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Remediation(#[from] RemediationError),
    #[error("invalid optimization config: {0}")]
    InvalidConfig(String),
}

impl OptimizationError {
    /// Rule that faulted, when the error came from the engine.
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            OptimizationError::Evaluation(err) => Some(err.rule_id()),
            OptimizationError::Remediation(err) => Some(err.rule_id()),
            OptimizationError::InvalidConfig(_) => None,
        }
    }
}

pub struct ConvergenceOrchestrator {
    catalog: Arc<RuleCatalog>,
    evaluator: Evaluator,
    remediator: Remediator,
    config: OptimizationConfig,
    target_points: usize,
}

impl ConvergenceOrchestrator {
    pub fn new(
        catalog: Arc<RuleCatalog>,
        config: OptimizationConfig,
    ) -> Result<Self, OptimizationError> {
        config.validate(&catalog)?;
        let target_points = config.target_points(&catalog);

        Ok(Self {
            evaluator: Evaluator::new(Arc::clone(&catalog), config.target_applicable_score),
            remediator: Remediator::new(Arc::clone(&catalog)),
            catalog,
            config,
            target_points,
        })
    }

    pub fn config(&self) -> &OptimizationConfig {
        &self.config
    }

    pub fn target_points(&self) -> usize {
        self.target_points
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn is_satisfied(&self, report: &EvaluationReport) -> bool {
        report.passed_items >= self.target_points
            && report.applicable_score >= self.config.target_applicable_score
    }

    pub fn optimize(&self, content: &str) -> Result<OptimizationOutcome, OptimizationError> {
        self.optimize_with(content, &NeverCancelled)
    }

    /// Runs at most `max_retries + 1` evaluations. Engine faults abort the run without a
    /// partial report; exhaustion and cancellation are reported as outcomes.
    pub fn optimize_with(
        &self,
        content: &str,
        cancel: &dyn CancellationSignal,
    ) -> Result<OptimizationOutcome, OptimizationError> {
        let max_retries = self.config.max_retries;
        let mut content = content.to_string();
        let mut report = self.evaluator.evaluate(&content)?;
        let mut evaluations = 1;
        let mut iterations = Vec::new();
        let mut state = OptimizerState::INITIAL;

        let termination = loop {
            if let Some(termination) = state.termination() {
                break termination;
            }

            state = match state {
                OptimizerState::Evaluating { .. } => {
                    let satisfied = self.is_satisfied(&report);
                    reduce(state, OptimizerEvent::Evaluated { satisfied }, max_retries)
                }
                OptimizerState::Remediating { .. } if cancel.is_cancelled() => {
                    reduce(state, OptimizerEvent::CancellationRequested, max_retries)
                }
                OptimizerState::Remediating { retries } => {
                    let selection = select_targets(
                        &report,
                        &self.catalog,
                        self.target_points,
                        self.config.promotion_buffer,
                    );
                    let rule_ids: Vec<&str> =
                        selection.rule_ids.iter().map(String::as_str).collect();
                    let remediation = self.remediator.remediate_rules(&content, &rule_ids)?;

                    let before = report.applicable_score;
                    content = remediation.content;
                    report = self.evaluator.evaluate(&content)?;
                    evaluations += 1;

                    debug!(
                        iteration = retries,
                        kind = ?selection.kind,
                        applied = remediation.applied.len(),
                        skipped = remediation.skipped.len(),
                        applicable_score = report.applicable_score,
                        passed_items = report.passed_items,
                        "remediation pass complete"
                    );
                    iterations.push(IterationTrace {
                        iteration: retries,
                        kind: selection.kind,
                        applied: remediation.applied,
                        skipped: remediation.skipped,
                        applicable_score_before: before,
                        applicable_score_after: report.applicable_score,
                        passed_items_after: report.passed_items,
                    });

                    reduce(state, OptimizerEvent::Remediated, max_retries)
                }
                terminal => terminal,
            };
        };

        let retries_used = state.retries();
        info!(
            ?termination,
            retries_used,
            evaluations,
            applicable_score = report.applicable_score,
            passed_items = report.passed_items,
            target_points = self.target_points,
            "content optimization finished"
        );

        Ok(OptimizationOutcome {
            content,
            report,
            retries_used,
            evaluations,
            termination,
            target_points: self.target_points,
            iterations,
        })
    }
}
