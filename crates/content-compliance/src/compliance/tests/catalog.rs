use super::common::*;
use serde_json::json;

use crate::compliance::{FailureMode, Remediator, RuleCategory};

#[test]
fn standard_table_splits_into_always_gated_and_hard_rules() {
    let catalog = standard_catalog();
    let gated = catalog.rules().iter().filter(|rule| rule.is_conditional()).count();
    let hard = catalog
        .rules()
        .iter()
        .filter(|rule| rule.failure_mode() == FailureMode::Failed)
        .count();
    assert_eq!(gated, 28);
    assert_eq!(hard, 4);
    assert_eq!(remediable_ids(&catalog, false).len(), 79);
    assert_eq!(remediable_ids(&catalog, true).len(), 107);
}

#[test]
fn every_fragment_renders_on_empty_and_authored_content() {
    let catalog = standard_catalog();
    let ids = remediable_ids(&catalog, true);
    let remediator = Remediator::new(catalog.clone());

    for content in ["", ARTICLE] {
        let remediation = remediator
            .remediate_rules(content, &ids)
            .expect("every fragment satisfies its rule");
        assert_eq!(remediation.applied.len(), ids.len());
        for rule in catalog.rules().iter().filter(|rule| rule.is_remediable()) {
            let lines = remediation
                .content
                .lines()
                .filter(|line| line.contains(rule.marker()))
                .count();
            assert_eq!(lines, 1, "{} should own exactly one line", rule.id());
        }
    }
}

#[test]
fn rules_are_listed_in_category_blocks() {
    let catalog = standard_catalog();
    let mut seen = Vec::new();
    for rule in catalog.rules() {
        if seen.last() != Some(&rule.category()) {
            assert!(
                !seen.contains(&rule.category()),
                "{} is split across the table",
                rule.category().label()
            );
            seen.push(rule.category());
        }
    }
    assert_eq!(seen, RuleCategory::ALL.to_vec());
}

#[test]
fn rule_views_serialize_with_wire_names() {
    let catalog = standard_catalog();
    let view = catalog.get("og.title").expect("rule exists").view();
    let payload = serde_json::to_value(&view).expect("serializes");
    assert_eq!(payload["category"], json!("open_graph"));
    assert_eq!(payload["category_label"], json!("Open Graph"));
    assert_eq!(payload["failure_mode"], json!("pending"));
    assert_eq!(payload["placement"], json!("prepend"));
    assert_eq!(payload["weight"], json!(2));

    let hard = catalog.get("content.word-count").expect("rule exists").view();
    let payload = serde_json::to_value(&hard).expect("serializes");
    assert_eq!(payload["failure_mode"], json!("failed"));
    assert!(payload.get("placement").is_none());
}

#[test]
fn positions_follow_table_order() {
    let catalog = standard_catalog();
    for (index, rule) in catalog.rules().iter().enumerate() {
        assert_eq!(rule.position(), index);
        assert_eq!(
            catalog.get(rule.id()).map(|found| found.position()),
            Some(index)
        );
    }
}
