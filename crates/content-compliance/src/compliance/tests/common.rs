use std::sync::{Arc, OnceLock};

use axum::response::Response;
use serde_json::Value;

use crate::compliance::{
    compliance_router, Check, ComplianceService, ContentLimits, OptimizationConfig, Remediator,
    RuleCatalog, RuleCategory, RuleDefinition, RuleFault,
};

/// Writer-authored text that trips no applicability gate and satisfies every hard rule.
pub(super) const ARTICLE: &str = include_str!("../../../tests/fixtures/soil_article.md");

pub(super) fn standard_catalog() -> Arc<RuleCatalog> {
    static CATALOG: OnceLock<Arc<RuleCatalog>> = OnceLock::new();
    Arc::clone(CATALOG.get_or_init(|| {
        Arc::new(RuleCatalog::standard().expect("standard catalog builds"))
    }))
}

/// Ids of remediable rules, optionally including gated ones.
pub(super) fn remediable_ids(catalog: &RuleCatalog, include_conditional: bool) -> Vec<&'static str> {
    catalog
        .rules()
        .iter()
        .filter(|rule| rule.is_remediable())
        .filter(|rule| include_conditional || !rule.is_conditional())
        .map(|rule| rule.id())
        .collect()
}

pub(super) fn with_fragments(catalog: &Arc<RuleCatalog>, content: &str, rule_ids: &[&str]) -> String {
    Remediator::new(Arc::clone(catalog))
        .remediate_rules(content, rule_ids)
        .expect("fragments apply")
        .content
}

/// The article with every always-applicable fragment already in place.
pub(super) fn article_with_baseline() -> String {
    let catalog = standard_catalog();
    let ids = remediable_ids(&catalog, false);
    with_fragments(&catalog, ARTICLE, &ids)
}

/// The article carrying every rule's marker.
pub(super) fn fully_remediated_article() -> String {
    let catalog = standard_catalog();
    let ids = remediable_ids(&catalog, true);
    with_fragments(&catalog, ARTICLE, &ids)
}

/// Five rules: two always-applicable remediable, one hard, two gated.
pub(super) fn tiny_catalog() -> Arc<RuleCatalog> {
    Arc::new(RuleCatalog::new(tiny_definitions()).expect("tiny catalog builds"))
}

pub(super) fn tiny_definitions() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "tiny.title",
            RuleCategory::MetaTags,
            "title present",
            Check::Contains("<title>"),
        )
        .weight(2)
        .prepend("<title>Tiny catalog page</title>"),
        RuleDefinition::new(
            "tiny.summary",
            RuleCategory::ContentStructure,
            "summary present",
            Check::Contains(r#"class="summary""#),
        )
        .append(r#"<p class="summary">Summary of the page.</p>"#),
        RuleDefinition::new(
            "tiny.body",
            RuleCategory::ContentStructure,
            "body present",
            Check::MinWords(1),
        )
        .weight(2)
        .hard(),
        RuleDefinition::new(
            "tiny.faq",
            RuleCategory::StructuredData,
            "faq markup",
            Check::Contains("faqpage"),
        )
        .applies_when(Check::Pattern(r"(?i)\bfaq\b"))
        .append(r#"<script type="application/ld+json">{"@type":"FAQPage"}</script>"#),
        RuleDefinition::new(
            "tiny.video",
            RuleCategory::StructuredData,
            "video markup",
            Check::Contains("videoobject"),
        )
        .applies_when(Check::Pattern(r"(?i)\bvideo\b"))
        .weight(3)
        .append(r#"<script type="application/ld+json">{"@type":"VideoObject"}</script>"#),
    ]
}

/// Ten always-applicable rules of weight one, each satisfied by its own token.
pub(super) fn flat_catalog() -> Arc<RuleCatalog> {
    const TOKENS: [&str; 10] = [
        "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india",
        "juliet",
    ];
    const IDS: [&str; 10] = [
        "flat.alpha",
        "flat.bravo",
        "flat.charlie",
        "flat.delta",
        "flat.echo",
        "flat.foxtrot",
        "flat.golf",
        "flat.hotel",
        "flat.india",
        "flat.juliet",
    ];

    let definitions = IDS
        .into_iter()
        .zip(TOKENS)
        .map(|(id, token)| {
            RuleDefinition::new(id, RuleCategory::TechnicalSeo, "token present", Check::Contains(token))
                .append(token)
        })
        .collect();
    Arc::new(RuleCatalog::new(definitions).expect("flat catalog builds"))
}

fn exploding(_: &str) -> Result<bool, RuleFault> {
    Err(RuleFault::new("predicate exploded"))
}

/// A catalog whose second rule always faults.
pub(super) fn faulting_catalog() -> Arc<RuleCatalog> {
    let mut definitions = tiny_definitions();
    definitions.insert(
        1,
        RuleDefinition::new(
            "tiny.exploding",
            RuleCategory::MetaTags,
            "always faults",
            Check::Custom(exploding),
        )
        .hard(),
    );
    Arc::new(RuleCatalog::new(definitions).expect("faulting catalog builds"))
}

pub(super) fn service_with(catalog: Arc<RuleCatalog>) -> ComplianceService {
    ComplianceService::new(catalog, OptimizationConfig::default(), ContentLimits::default())
}

pub(super) fn standard_service() -> ComplianceService {
    service_with(standard_catalog())
}

pub(super) fn router_with(service: ComplianceService) -> axum::Router {
    compliance_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
