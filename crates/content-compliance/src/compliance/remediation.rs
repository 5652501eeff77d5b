use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use super::catalog::{Placement, Rule, RuleCatalog, RuleCategory, RuleFault};
use super::document::ContentView;
use super::evaluation::{RuleResult, RuleStatus};

/// Buffer produced by one remediation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remediation {
    pub content: String,
    /// Rules whose fragment was inserted by this pass.
    pub applied: Vec<String>,
    /// Rules left untouched: no remedy, or their marker was already present.
    pub skipped: Vec<String>,
}

impl Remediation {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemediationError {
    #[error("rule '{0}' is not in the catalog")]
    UnknownRule(String),
    #[error("fragment generator for rule '{rule_id}' faulted: {fault}")]
    Generator { rule_id: String, fault: RuleFault },
    #[error("fragment generated for rule '{rule_id}' does not satisfy the rule")]
    IneffectiveFragment { rule_id: String },
}

impl RemediationError {
    pub fn rule_id(&self) -> &str {
        match self {
            RemediationError::UnknownRule(rule_id)
            | RemediationError::Generator { rule_id, .. }
            | RemediationError::IneffectiveFragment { rule_id } => rule_id,
        }
    }
}

/// Applies additive, marker-guarded fragments for selected rules.
#[derive(Debug, Clone)]
pub struct Remediator {
    catalog: Arc<RuleCatalog>,
}

impl Remediator {
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self { catalog }
    }

    /// Remediates every result that has not passed. NotApplicable results are treated
    /// exactly like Pending ones.
    pub fn remediate(
        &self,
        content: &str,
        results: &[RuleResult],
    ) -> Result<Remediation, RemediationError> {
        let rule_ids: Vec<&str> = results
            .iter()
            .filter(|result| result.status != RuleStatus::Passed)
            .map(|result| result.rule_id.as_str())
            .collect();
        self.remediate_rules(content, &rule_ids)
    }

    pub fn remediate_rules(
        &self,
        content: &str,
        rule_ids: &[&str],
    ) -> Result<Remediation, RemediationError> {
        let mut grouped: BTreeMap<RuleCategory, BTreeSet<usize>> = BTreeMap::new();
        for rule_id in rule_ids {
            let rule = self
                .catalog
                .get(rule_id)
                .ok_or_else(|| RemediationError::UnknownRule(rule_id.to_string()))?;
            grouped
                .entry(rule.category())
                .or_default()
                .insert(rule.position());
        }

        let view = ContentView::new(content);
        let mut head = Block::default();
        let mut tail = Block::default();
        let mut applied = Vec::new();
        let mut skipped = Vec::new();

        let rules = self.catalog.rules();
        for position in grouped.into_values().flatten() {
            let rule = &rules[position];
            let Some(remedy) = rule.remedy() else {
                skipped.push(rule.id().to_string());
                continue;
            };
            if view.contains_marker(rule.marker()) {
                skipped.push(rule.id().to_string());
                continue;
            }

            let fragment = render_fragment(rule, &view)?;
            trace!(rule_id = rule.id(), "remediation fragment rendered");
            match remedy.placement {
                Placement::Prepend => head.insert(fragment, rule.marker()),
                Placement::Append => tail.insert(fragment, rule.marker()),
            }
            applied.push(rule.id().to_string());
        }

        Ok(Remediation {
            content: assemble(content, &head.lines, &tail.lines),
            applied,
            skipped,
        })
    }
}

/// Lines of one placement block. Rules rendering the same fragment share its line, each
/// adding its own marker.
#[derive(Default)]
struct Block {
    fragments: Vec<String>,
    lines: Vec<String>,
}

impl Block {
    fn insert(&mut self, fragment: String, marker: &str) {
        match self.fragments.iter().position(|existing| *existing == fragment) {
            Some(index) => {
                self.lines[index].push(' ');
                self.lines[index].push_str(marker);
            }
            None => {
                self.lines.push(format!("{fragment} {marker}"));
                self.fragments.push(fragment);
            }
        }
    }
}

fn render_fragment(rule: &Rule, view: &ContentView<'_>) -> Result<String, RemediationError> {
    let generator_fault = |fault| RemediationError::Generator {
        rule_id: rule.id().to_string(),
        fault,
    };

    let fragment = match rule.remedy() {
        Some(remedy) => remedy.render(view).map_err(generator_fault)?,
        None => return Err(RemediationError::UnknownRule(rule.id().to_string())),
    };
    if !rule.accepts_fragment(&fragment).map_err(generator_fault)? {
        return Err(RemediationError::IneffectiveFragment {
            rule_id: rule.id().to_string(),
        });
    }

    Ok(fragment)
}

fn assemble(content: &str, head: &[String], tail: &[String]) -> String {
    let mut output = String::with_capacity(
        content.len() + head.iter().chain(tail).map(|line| line.len() + 1).sum::<usize>(),
    );

    for line in head {
        output.push_str(line);
        output.push('\n');
    }
    output.push_str(content);
    if !tail.is_empty() && !content.is_empty() && !content.ends_with('\n') {
        output.push('\n');
    }
    for line in tail {
        output.push_str(line);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_wraps_content_without_touching_it() {
        let head = vec!["<head-line>".to_string()];
        let tail = vec!["<tail-line>".to_string()];
        assert_eq!(
            assemble("body", &head, &tail),
            "<head-line>\nbody\n<tail-line>\n"
        );
        assert_eq!(assemble("body\n", &[], &tail), "body\n<tail-line>\n");
        assert_eq!(assemble("", &head, &tail), "<head-line>\n<tail-line>\n");
        assert_eq!(assemble("body", &[], &[]), "body");
    }

    #[test]
    fn identical_fragments_share_a_line() {
        let mut block = Block::default();
        block.insert("<title>A</title>".to_string(), "<!-- remediated:a -->");
        block.insert("<p>B</p>".to_string(), "<!-- remediated:b -->");
        block.insert("<title>A</title>".to_string(), "<!-- remediated:c -->");
        assert_eq!(
            block.lines,
            vec![
                "<title>A</title> <!-- remediated:a --> <!-- remediated:c -->",
                "<p>B</p> <!-- remediated:b -->",
            ]
        );
    }
}
