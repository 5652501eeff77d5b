use serde::{Deserialize, Serialize};

use crate::compliance::catalog::RuleCatalog;
use crate::compliance::evaluation::{EvaluationReport, RuleResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    /// Failed and Pending rules.
    Unresolved,
    /// NotApplicable rules converted to scored items to close a point gap.
    Promotion,
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub kind: SelectionKind,
    pub rule_ids: Vec<String>,
}

impl Selection {
    fn nothing() -> Self {
        Self {
            kind: SelectionKind::Nothing,
            rule_ids: Vec::new(),
        }
    }
}

/// Chooses what the next remediation pass targets.
///
/// Unresolved rules always win. Only when none remain and the passed-item target is
/// still unmet are remediable NotApplicable rules promoted, heaviest first with catalog
/// order breaking ties, up to the gap plus `buffer`.
pub fn select_targets(
    report: &EvaluationReport,
    catalog: &RuleCatalog,
    target_points: usize,
    buffer: usize,
) -> Selection {
    let unresolved = report.unresolved();
    if !unresolved.is_empty() {
        return Selection {
            kind: SelectionKind::Unresolved,
            rule_ids: unresolved
                .into_iter()
                .map(|result| result.rule_id.clone())
                .collect(),
        };
    }

    if report.passed_items >= target_points {
        return Selection::nothing();
    }

    let mut candidates: Vec<&RuleResult> = report
        .not_applicable()
        .into_iter()
        .filter(|result| {
            catalog
                .get(&result.rule_id)
                .is_some_and(|rule| rule.is_remediable())
        })
        .collect();
    if candidates.is_empty() {
        return Selection::nothing();
    }

    // Stable sort keeps catalog order among equal weights.
    candidates.sort_by(|a, b| b.weight.cmp(&a.weight));
    let quota = target_points
        .saturating_sub(report.passed_items)
        .saturating_add(buffer);

    Selection {
        kind: SelectionKind::Promotion,
        rule_ids: candidates
            .into_iter()
            .take(quota)
            .map(|result| result.rule_id.clone())
            .collect(),
    }
}
