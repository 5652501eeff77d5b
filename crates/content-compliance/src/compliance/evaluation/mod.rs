mod score;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog::{FailureMode, Rule, RuleCatalog, RuleCategory, RuleFault};
use super::document::ContentView;
use score::ScoreCard;

/// Default applicable score required for an `Excellent` verdict.
pub const DEFAULT_REQUIRED_THRESHOLD: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    Passed,
    Failed,
    Pending,
    NotApplicable,
}

impl RuleStatus {
    pub fn is_unresolved(self) -> bool {
        matches!(self, RuleStatus::Failed | RuleStatus::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceLevel {
    Excellent,
    NeedsImprovement,
}

/// Outcome of one rule against one buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule_id: String,
    pub category: RuleCategory,
    pub status: RuleStatus,
    pub weight: u32,
    pub points: u32,
}

impl RuleResult {
    fn new(rule: &Rule, status: RuleStatus) -> Self {
        let points = if status == RuleStatus::Passed {
            rule.weight()
        } else {
            0
        };
        Self {
            rule_id: rule.id().to_string(),
            category: rule.category(),
            status,
            weight: rule.weight(),
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: RuleCategory,
    pub passed: usize,
    pub total: usize,
    pub earned_points: u64,
    pub max_points: u64,
}

/// Per-buffer scoring snapshot. Results follow catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub results: Vec<RuleResult>,
    pub total_items: usize,
    pub passed_items: usize,
    pub failed_items: usize,
    pub pending_items: usize,
    pub not_applicable_items: usize,
    pub earned_points: u64,
    pub max_points: u64,
    pub applicable_max_points: u64,
    pub raw_score: u8,
    pub applicable_score: u8,
    pub required_threshold: u8,
    pub compliance_level: ComplianceLevel,
    pub categories: Vec<CategorySummary>,
}

impl EvaluationReport {
    fn from_results(results: Vec<RuleResult>, required_threshold: u8) -> Self {
        let count = |status: RuleStatus| {
            results
                .iter()
                .filter(|result| result.status == status)
                .count()
        };
        let passed_items = count(RuleStatus::Passed);
        let failed_items = count(RuleStatus::Failed);
        let pending_items = count(RuleStatus::Pending);
        let not_applicable_items = count(RuleStatus::NotApplicable);

        let card = ScoreCard::tally(&results);
        let applicable_score = card.applicable_score();
        let compliance_level = if applicable_score >= required_threshold {
            ComplianceLevel::Excellent
        } else {
            ComplianceLevel::NeedsImprovement
        };

        let categories = RuleCategory::ALL
            .into_iter()
            .filter_map(|category| summarize(category, &results))
            .collect();

        Self {
            total_items: results.len(),
            passed_items,
            failed_items,
            pending_items,
            not_applicable_items,
            earned_points: card.earned,
            max_points: card.max,
            applicable_max_points: card.applicable_max,
            raw_score: card.raw_score(),
            applicable_score,
            required_threshold,
            compliance_level,
            categories,
            results,
        }
    }

    /// Failed and Pending results, in catalog order.
    pub fn unresolved(&self) -> Vec<&RuleResult> {
        self.results
            .iter()
            .filter(|result| result.status.is_unresolved())
            .collect()
    }

    pub fn not_applicable(&self) -> Vec<&RuleResult> {
        self.results
            .iter()
            .filter(|result| result.status == RuleStatus::NotApplicable)
            .collect()
    }

    pub fn result(&self, rule_id: &str) -> Option<&RuleResult> {
        self.results.iter().find(|result| result.rule_id == rule_id)
    }

    pub fn unresolved_rule_ids(&self) -> Vec<&str> {
        self.unresolved()
            .into_iter()
            .map(|result| result.rule_id.as_str())
            .collect()
    }
}

fn summarize(category: RuleCategory, results: &[RuleResult]) -> Option<CategorySummary> {
    let in_category: Vec<&RuleResult> = results
        .iter()
        .filter(|result| result.category == category)
        .collect();
    if in_category.is_empty() {
        return None;
    }

    let card = ScoreCard::tally(in_category.iter().copied());
    Some(CategorySummary {
        category,
        passed: in_category
            .iter()
            .filter(|result| result.status == RuleStatus::Passed)
            .count(),
        total: in_category.len(),
        earned_points: card.earned,
        max_points: card.max,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("rule '{rule_id}' faulted during evaluation: {fault}")]
    Rule { rule_id: String, fault: RuleFault },
}

impl EvaluationError {
    pub fn rule_id(&self) -> &str {
        match self {
            EvaluationError::Rule { rule_id, .. } => rule_id,
        }
    }
}

/// Stateless scorer over a shared catalog.
#[derive(Debug, Clone)]
pub struct Evaluator {
    catalog: Arc<RuleCatalog>,
    required_threshold: u8,
}

impl Evaluator {
    pub fn new(catalog: Arc<RuleCatalog>, required_threshold: u8) -> Self {
        Self {
            catalog,
            required_threshold,
        }
    }

    pub fn catalog(&self) -> &Arc<RuleCatalog> {
        &self.catalog
    }

    pub fn required_threshold(&self) -> u8 {
        self.required_threshold
    }

    /// Scores `content` against every rule. Aborts on the first faulting predicate.
    pub fn evaluate(&self, content: &str) -> Result<EvaluationReport, EvaluationError> {
        let view = ContentView::new(content);
        let results = self
            .catalog
            .rules()
            .iter()
            .map(|rule| {
                classify(rule, &view)
                    .map(|status| RuleResult::new(rule, status))
                    .map_err(|fault| EvaluationError::Rule {
                        rule_id: rule.id().to_string(),
                        fault,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EvaluationReport::from_results(
            results,
            self.required_threshold,
        ))
    }
}

fn classify(rule: &Rule, view: &ContentView<'_>) -> Result<RuleStatus, RuleFault> {
    if !rule.is_applicable(view)? {
        return Ok(RuleStatus::NotApplicable);
    }
    if rule.passes(view)? {
        return Ok(RuleStatus::Passed);
    }
    Ok(match rule.failure_mode() {
        FailureMode::Pending => RuleStatus::Pending,
        FailureMode::Failed => RuleStatus::Failed,
    })
}
