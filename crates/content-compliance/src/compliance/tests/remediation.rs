use std::sync::Arc;

use super::common::*;

use crate::compliance::catalog::Placement;
use crate::compliance::{
    marker_for, Check, Evaluator, RemediationError, Remediator, RuleCatalog, RuleCategory,
    RuleDefinition, RuleFault, RuleStatus,
};

fn tiny_remediator() -> Remediator {
    Remediator::new(tiny_catalog())
}

#[test]
fn fragments_land_at_their_placement_with_markers() {
    let remediation = tiny_remediator()
        .remediate_rules("Body text", &["tiny.summary", "tiny.title"])
        .expect("remediates");

    let lines: Vec<&str> = remediation.content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        format!("<title>Tiny catalog page</title> {}", marker_for("tiny.title"))
    );
    assert_eq!(lines[1], "Body text");
    assert_eq!(
        lines[2],
        format!(
            r#"<p class="summary">Summary of the page.</p> {}"#,
            marker_for("tiny.summary")
        )
    );
    assert_eq!(remediation.applied, vec!["tiny.title", "tiny.summary"]);
    assert!(remediation.skipped.is_empty());
    assert!(remediation.changed());
}

#[test]
fn second_pass_with_same_rules_is_a_no_op() {
    let remediator = tiny_remediator();
    let rules = ["tiny.title", "tiny.summary", "tiny.faq"];
    let once = remediator
        .remediate_rules("Body", &rules)
        .expect("remediates");
    let twice = remediator
        .remediate_rules(&once.content, &rules)
        .expect("remediates");

    assert_eq!(once.content, twice.content);
    assert!(!twice.changed());
    assert_eq!(twice.skipped.len(), rules.len());
}

#[test]
fn hard_rules_are_skipped_and_reported() {
    let remediation = tiny_remediator()
        .remediate_rules("", &["tiny.body", "tiny.title"])
        .expect("remediates");

    assert_eq!(remediation.applied, vec!["tiny.title"]);
    assert_eq!(remediation.skipped, vec!["tiny.body"]);
}

#[test]
fn unknown_rule_is_an_error() {
    let error = tiny_remediator()
        .remediate_rules("", &["tiny.missing"])
        .expect_err("unknown rule");
    assert_eq!(error, RemediationError::UnknownRule("tiny.missing".to_string()));
    assert_eq!(error.rule_id(), "tiny.missing");
}

#[test]
fn existing_content_is_preserved_verbatim() {
    let catalog = standard_catalog();
    let original = "Line one\n\n  indented line\nlast line without newline";
    let remediated = with_fragments(&catalog, original, &remediable_ids(&catalog, true));
    assert!(remediated.contains(original));
}

#[test]
fn prepended_blocks_follow_category_order() {
    let catalog = standard_catalog();
    let remediated = with_fragments(&catalog, "Body", &["tech.doctype", "meta.charset"]);
    let lines: Vec<&str> = remediated.lines().collect();
    assert!(lines[0].contains(&marker_for("meta.charset")));
    assert!(lines[1].contains(&marker_for("tech.doctype")));
    assert_eq!(lines[2], "Body");
}

#[test]
fn companion_rules_share_one_title_and_one_description() {
    let catalog = standard_catalog();
    let rules = [
        "meta.title",
        "meta.title-length",
        "meta.description",
        "meta.description-length",
    ];
    let remediated = with_fragments(&catalog, "", &rules);

    let titles: Vec<&str> = remediated
        .lines()
        .filter(|line| line.contains("<title>"))
        .collect();
    assert_eq!(titles.len(), 1);
    assert!(titles[0].contains(&marker_for("meta.title")));
    assert!(titles[0].contains(&marker_for("meta.title-length")));

    let descriptions = remediated
        .lines()
        .filter(|line| line.contains(r#"<meta name="description""#))
        .count();
    assert_eq!(descriptions, 1);
    assert_eq!(remediated.lines().count(), 2);

    let report = Evaluator::new(Arc::clone(&catalog), 90)
        .evaluate(&remediated)
        .expect("evaluates");
    for rule_id in rules {
        assert_eq!(
            report.result(rule_id).map(|result| result.status),
            Some(RuleStatus::Passed),
            "{rule_id}"
        );
    }
}

#[test]
fn derived_fragments_use_authored_text() {
    let catalog = standard_catalog();
    let remediated = with_fragments(&catalog, ARTICLE, &["meta.title", "og.title"]);
    assert!(remediated.contains("<title>Building Healthy Garden Soil</title>"));
    assert!(remediated
        .contains(r#"<meta property="og:title" content="Building Healthy Garden Soil">"#));
}

#[test]
fn remediating_results_promotes_not_applicable_rules() {
    let catalog = tiny_catalog();
    let evaluator = Evaluator::new(Arc::clone(&catalog), 90);
    let report = evaluator.evaluate("Body").expect("evaluates");
    let not_applicable: Vec<_> = report.not_applicable().into_iter().cloned().collect();
    assert_eq!(not_applicable.len(), 2);

    let remediation = Remediator::new(Arc::clone(&catalog))
        .remediate("Body", &not_applicable)
        .expect("remediates");
    let after = evaluator.evaluate(&remediation.content).expect("evaluates");

    for rule_id in ["tiny.faq", "tiny.video"] {
        assert_eq!(
            after.result(rule_id).map(|result| result.status),
            Some(RuleStatus::Passed)
        );
    }
    assert!(after.earned_points > report.earned_points);
}

#[test]
fn passed_results_are_ignored_by_remediate() {
    let catalog = tiny_catalog();
    let content = "<title>Hand written title</title>\nBody";
    let report = Evaluator::new(Arc::clone(&catalog), 90)
        .evaluate(content)
        .expect("evaluates");

    let remediation = Remediator::new(catalog)
        .remediate(content, &report.results)
        .expect("remediates");
    assert!(!remediation.applied.contains(&"tiny.title".to_string()));
    assert!(remediation.applied.contains(&"tiny.summary".to_string()));
}

#[test]
fn fragment_that_misses_its_rule_is_rejected() {
    let catalog = Arc::new(
        RuleCatalog::new(vec![RuleDefinition::new(
            "broken.title",
            RuleCategory::MetaTags,
            "title present",
            Check::Contains("<title>"),
        )
        .prepend("<h1>Not a title</h1>")])
        .expect("catalog builds"),
    );

    let error = Remediator::new(catalog)
        .remediate_rules("", &["broken.title"])
        .expect_err("fragment is ineffective");
    assert_eq!(
        error,
        RemediationError::IneffectiveFragment {
            rule_id: "broken.title".to_string()
        }
    );
}

fn failing_generator(_: &crate::compliance::ContentView<'_>) -> Result<String, RuleFault> {
    Err(RuleFault::new("generator exploded"))
}

#[test]
fn generator_fault_propagates_with_rule_id() {
    let catalog = Arc::new(
        RuleCatalog::new(vec![RuleDefinition::new(
            "broken.generator",
            RuleCategory::MetaTags,
            "title present",
            Check::Contains("<title>"),
        )
        .derive(Placement::Prepend, failing_generator)])
        .expect("catalog builds"),
    );

    match Remediator::new(catalog).remediate_rules("", &["broken.generator"]) {
        Err(RemediationError::Generator { rule_id, fault }) => {
            assert_eq!(rule_id, "broken.generator");
            assert_eq!(fault.message(), "generator exploded");
        }
        other => panic!("expected generator fault, got {other:?}"),
    }
}
