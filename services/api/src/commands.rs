use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Args;
use content_compliance::compliance::{
    ComplianceLevel, EvaluateRequest, EvaluationReport, OptimizationOutcome,
    OptimizationOverrides, OptimizeRequest, RuleCategory, RuleView,
};
use content_compliance::error::AppError;
use serde::Serialize;
use tracing::info;

use crate::infra::{bootstrap, read_input};

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Document to score, or `-` for stdin
    #[arg(long, default_value = "-")]
    pub(crate) input: PathBuf,
    /// Applicable score required for an Excellent verdict
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) threshold: Option<u8>,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct OptimizeArgs {
    /// Document to remediate, or `-` for stdin
    #[arg(long, default_value = "-")]
    pub(crate) input: PathBuf,
    /// Write the remediated document here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Applicable score the run must reach
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) target_score: Option<u8>,
    /// Passed-item count the run must reach
    #[arg(long)]
    pub(crate) target_points: Option<usize>,
    /// Remediation passes allowed after the first evaluation
    #[arg(long)]
    pub(crate) max_retries: Option<usize>,
    /// Print the full outcome as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RulesArgs {
    /// Only list rules in this category (e.g. open-graph)
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: Option<RuleCategory>,
    /// Print the listing as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_category(raw: &str) -> Result<RuleCategory, String> {
    RuleCategory::from_name(raw).ok_or_else(|| {
        let known: Vec<&str> = RuleCategory::ALL.iter().map(|category| category.name()).collect();
        format!("unknown category '{raw}' (expected one of: {})", known.join(", "))
    })
}

/// JSON envelope for command output.
#[derive(Debug, Serialize)]
struct CommandOutput<'a, T: Serialize> {
    generated_at: DateTime<Utc>,
    input: &'a str,
    result: T,
}

fn print_json<T: Serialize>(input: &Path, result: T) -> Result<(), AppError> {
    let input = input.to_string_lossy();
    let output = CommandOutput {
        generated_at: Utc::now(),
        input: &input,
        result,
    };
    let rendered = serde_json::to_string_pretty(&output).map_err(io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let (_config, service) = bootstrap()?;
    let content = read_input(&args.input)?;
    let report = service.evaluate(EvaluateRequest {
        content,
        required_threshold: args.threshold,
    })?;

    if args.json {
        return print_json(&args.input, &report);
    }

    println!("Compliance evaluation for {}", args.input.display());
    render_report(&report);
    Ok(())
}

pub(crate) fn run_optimize(args: OptimizeArgs) -> Result<(), AppError> {
    let (_config, service) = bootstrap()?;
    let content = read_input(&args.input)?;
    let outcome = service.optimize(OptimizeRequest {
        content,
        config: OptimizationOverrides {
            target_applicable_score: args.target_score,
            target_absolute_points: args.target_points,
            max_retries: args.max_retries,
            promotion_buffer: None,
        },
    })?;

    if let Some(path) = &args.output {
        fs::write(path, &outcome.content)?;
        info!(path = %path.display(), bytes = outcome.content.len(), "remediated document written");
    }

    if args.json {
        return print_json(&args.input, &outcome);
    }

    if args.output.is_some() {
        render_outcome(&outcome);
    } else {
        // Keep stdout clean for piping the document.
        eprintln!("{}", outcome_summary(&outcome));
        print!("{}", outcome.content);
    }
    Ok(())
}

pub(crate) fn run_rules(args: RulesArgs) -> Result<(), AppError> {
    let (_config, service) = bootstrap()?;
    let rules = service.rules(args.category);

    if args.json {
        let input = args.category.map_or("all", |category| category.name());
        return print_json(Path::new(input), &rules);
    }

    println!("{} rules", rules.len());
    for rule in &rules {
        println!("{}", rule_line(rule));
    }
    Ok(())
}

fn level_label(level: ComplianceLevel) -> &'static str {
    match level {
        ComplianceLevel::Excellent => "excellent",
        ComplianceLevel::NeedsImprovement => "needs improvement",
    }
}

fn render_report(report: &EvaluationReport) {
    println!(
        "  Level: {} (applicable score {}%, required {}%)",
        level_label(report.compliance_level),
        report.applicable_score,
        report.required_threshold
    );
    println!(
        "  Raw score: {}% ({} of {} points)",
        report.raw_score, report.earned_points, report.max_points
    );
    println!(
        "  Items: {} passed, {} failed, {} pending, {} not applicable",
        report.passed_items, report.failed_items, report.pending_items, report.not_applicable_items
    );

    println!("\nCategories");
    for summary in &report.categories {
        println!(
            "  {:<20} {:>3}/{:<3} items {:>4}/{:<4} points",
            summary.category.label(),
            summary.passed,
            summary.total,
            summary.earned_points,
            summary.max_points
        );
    }

    let unresolved = report.unresolved_rule_ids();
    if !unresolved.is_empty() {
        println!("\nUnresolved rules");
        for rule_id in unresolved {
            println!("  - {rule_id}");
        }
    }
}

fn outcome_summary(outcome: &OptimizationOutcome) -> String {
    format!(
        "Optimization {:?} after {} remediation passes ({} evaluations): applicable score {}%, {} of {} target items passed",
        outcome.termination,
        outcome.retries_used,
        outcome.evaluations,
        outcome.report.applicable_score,
        outcome.report.passed_items,
        outcome.target_points
    )
}

fn render_outcome(outcome: &OptimizationOutcome) {
    println!("{}", outcome_summary(outcome));
    for trace in &outcome.iterations {
        println!(
            "  Pass {} ({:?}): {} applied, {} skipped, score {}% -> {}%",
            trace.iteration,
            trace.kind,
            trace.applied.len(),
            trace.skipped.len(),
            trace.applicable_score_before,
            trace.applicable_score_after
        );
    }
    render_report(&outcome.report);
}

fn rule_line(rule: &RuleView) -> String {
    let gate = if rule.conditional { " (conditional)" } else { "" };
    format!(
        "  {:<32} {:<18} w{:<2} {:?}{gate}",
        rule.id, rule.category_label, rule.weight, rule.failure_mode
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_compliance::compliance::RuleCatalog;

    #[test]
    fn category_names_accept_hyphens() {
        assert_eq!(parse_category("open-graph"), Ok(RuleCategory::OpenGraph));
        let error = parse_category("astrology").expect_err("unknown category");
        assert!(error.contains("meta_tags"));
    }

    #[test]
    fn rule_lines_flag_conditional_rules() {
        let catalog = RuleCatalog::standard().expect("standard catalog builds");
        let gated = catalog
            .rules()
            .iter()
            .find(|rule| rule.is_conditional())
            .expect("gated rule exists");
        assert!(rule_line(&gated.view()).ends_with("(conditional)"));
    }

    #[test]
    fn json_envelope_carries_a_timestamp() {
        let output = CommandOutput {
            generated_at: Utc::now(),
            input: "draft.md",
            result: serde_json::json!({ "ok": true }),
        };
        let value = serde_json::to_value(&output).expect("serializes");
        assert!(value["generated_at"].is_string());
        assert_eq!(value["input"], "draft.md");
        assert_eq!(value["result"]["ok"], true);
    }
}
