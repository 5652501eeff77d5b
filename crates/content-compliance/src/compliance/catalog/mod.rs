//! Declarative rule table keyed by rule id.
//!
//! Each row pairs a pass predicate with an optional applicability gate and, for rules the
//! engine can fix on its own, a fragment generator. [`RuleCatalog::new`] validates the
//! table and compiles every pattern once; the result is immutable and meant to be shared
//! behind an `Arc`.

mod predicate;
mod standard;

pub use predicate::{
    average_sentence_words, paragraph_count, plain_text, word_count, Check, PredicateFn,
    RuleFault,
};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::document::ContentView;
use predicate::Predicate;

/// Prefix shared by every remediation marker.
pub const MARKER_PREFIX: &str = "<!-- remediated:";

/// Marker token proving a rule's remediation is already in the buffer.
pub fn marker_for(rule_id: &str) -> String {
    format!("{MARKER_PREFIX}{rule_id} -->")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    MetaTags,
    OpenGraph,
    StructuredData,
    AiAssistant,
    CoreWebVitals,
    ContentStructure,
    VoiceSearch,
    TechnicalSeo,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 8] = [
        RuleCategory::MetaTags,
        RuleCategory::OpenGraph,
        RuleCategory::StructuredData,
        RuleCategory::AiAssistant,
        RuleCategory::CoreWebVitals,
        RuleCategory::ContentStructure,
        RuleCategory::VoiceSearch,
        RuleCategory::TechnicalSeo,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::MetaTags => "Meta Tags",
            Self::OpenGraph => "Open Graph",
            Self::StructuredData => "Structured Data",
            Self::AiAssistant => "AI Assistant",
            Self::CoreWebVitals => "Core Web Vitals",
            Self::ContentStructure => "Content Structure",
            Self::VoiceSearch => "Voice Search",
            Self::TechnicalSeo => "Technical SEO",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::MetaTags => "meta_tags",
            Self::OpenGraph => "open_graph",
            Self::StructuredData => "structured_data",
            Self::AiAssistant => "ai_assistant",
            Self::CoreWebVitals => "core_web_vitals",
            Self::ContentStructure => "content_structure",
            Self::VoiceSearch => "voice_search",
            Self::TechnicalSeo => "technical_seo",
        }
    }

    /// Accepts the wire name (`open_graph`) or a dashed variant (`open-graph`).
    pub fn from_name(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.name() == normalized)
    }
}

/// Status assigned when an applicable rule's predicate is not satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Improvable condition; always carries a remedy.
    Pending,
    /// Hard requirement the engine cannot author on the writer's behalf.
    Failed,
}

/// Text scope a pass predicate is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evidence {
    Document,
    Authored,
}

#[derive(Debug, Clone, Copy)]
pub enum Applicability {
    Always,
    /// Gate judged on authored text.
    When(Check),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Prepend,
    Append,
}

pub type GeneratorFn = fn(&ContentView<'_>) -> Result<String, RuleFault>;

#[derive(Debug, Clone, Copy)]
pub enum Fragment {
    Static(&'static str),
    Derived(GeneratorFn),
}

#[derive(Debug, Clone, Copy)]
pub struct Remedy {
    pub placement: Placement,
    pub fragment: Fragment,
}

impl Remedy {
    /// Single-line fragment text, without its marker.
    pub(crate) fn render(&self, view: &ContentView<'_>) -> Result<String, RuleFault> {
        let raw = match self.fragment {
            Fragment::Static(text) => text.to_string(),
            Fragment::Derived(generator) => generator(view)?,
        };
        Ok(raw.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct RuleDefinition {
    pub id: &'static str,
    pub category: RuleCategory,
    pub weight: u32,
    pub description: &'static str,
    pub check: Check,
    pub applicability: Applicability,
    pub failure: FailureMode,
    pub evidence: Evidence,
    pub remedy: Option<Remedy>,
}

impl RuleDefinition {
    pub fn new(
        id: &'static str,
        category: RuleCategory,
        description: &'static str,
        check: Check,
    ) -> Self {
        Self {
            id,
            category,
            weight: 1,
            description,
            check,
            applicability: Applicability::Always,
            failure: FailureMode::Pending,
            evidence: Evidence::Document,
            remedy: None,
        }
    }

    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn applies_when(mut self, gate: Check) -> Self {
        self.applicability = Applicability::When(gate);
        self
    }

    /// Writer-owned requirement: judged on authored text and never remediated.
    pub fn hard(mut self) -> Self {
        self.failure = FailureMode::Failed;
        self.evidence = Evidence::Authored;
        self.remedy = None;
        self
    }

    pub fn prepend(self, fragment: &'static str) -> Self {
        self.remedy(Placement::Prepend, Fragment::Static(fragment))
    }

    pub fn append(self, fragment: &'static str) -> Self {
        self.remedy(Placement::Append, Fragment::Static(fragment))
    }

    pub fn derive(self, placement: Placement, generator: GeneratorFn) -> Self {
        self.remedy(placement, Fragment::Derived(generator))
    }

    fn remedy(mut self, placement: Placement, fragment: Fragment) -> Self {
        self.remedy = Some(Remedy {
            placement,
            fragment,
        });
        self
    }
}

/// Validated, compiled rule.
#[derive(Debug)]
pub struct Rule {
    definition: RuleDefinition,
    pass: Predicate,
    gate: Option<Predicate>,
    marker: String,
    position: usize,
}

impl Rule {
    pub fn id(&self) -> &'static str {
        self.definition.id
    }

    pub fn category(&self) -> RuleCategory {
        self.definition.category
    }

    pub fn weight(&self) -> u32 {
        self.definition.weight
    }

    pub fn description(&self) -> &'static str {
        self.definition.description
    }

    pub fn failure_mode(&self) -> FailureMode {
        self.definition.failure
    }

    pub fn evidence(&self) -> Evidence {
        self.definition.evidence
    }

    pub fn remedy(&self) -> Option<&Remedy> {
        self.definition.remedy.as_ref()
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Index in catalog order.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_remediable(&self) -> bool {
        self.definition.remedy.is_some()
    }

    pub fn is_conditional(&self) -> bool {
        self.gate.is_some()
    }

    /// Gated rules become applicable once their own marker is present.
    pub(crate) fn is_applicable(&self, view: &ContentView<'_>) -> Result<bool, RuleFault> {
        match &self.gate {
            None => Ok(true),
            Some(_) if view.contains_marker(&self.marker) => Ok(true),
            Some(gate) => gate.test(view.authored(), view.authored_lower()),
        }
    }

    pub(crate) fn passes(&self, view: &ContentView<'_>) -> Result<bool, RuleFault> {
        match self.definition.evidence {
            Evidence::Document => self.pass.test(view.text(), view.lower()),
            Evidence::Authored => self.pass.test(view.authored(), view.authored_lower()),
        }
    }

    /// Whether a lone fragment line satisfies the pass predicate.
    pub(crate) fn accepts_fragment(&self, line: &str) -> Result<bool, RuleFault> {
        self.pass.test(line, &line.to_lowercase())
    }

    pub fn view(&self) -> RuleView {
        RuleView {
            id: self.id(),
            category: self.category(),
            category_label: self.category().label(),
            weight: self.weight(),
            description: self.description(),
            failure_mode: self.failure_mode(),
            conditional: self.is_conditional(),
            placement: self.remedy().map(|remedy| remedy.placement),
        }
    }
}

/// Serializable listing entry for API and CLI consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleView {
    pub id: &'static str,
    pub category: RuleCategory,
    pub category_label: &'static str,
    pub weight: u32,
    pub description: &'static str,
    pub failure_mode: FailureMode,
    pub conditional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("rule catalog is empty")]
    Empty,
    #[error("rule id '{0}' must be non-empty and free of whitespace or '>'")]
    InvalidRuleId(String),
    #[error("rule '{0}' is defined more than once")]
    DuplicateRule(String),
    #[error("rule '{0}' must carry a weight of at least 1")]
    ZeroWeight(String),
    #[error("rule '{rule_id}' has an invalid pattern")]
    InvalidPattern {
        rule_id: String,
        #[source]
        source: regex::Error,
    },
    #[error("rule '{rule_id}' matches on '{needle}', which is not lowercase")]
    CaseSensitiveNeedle { rule_id: String, needle: String },
    #[error("pending rule '{0}' has no remedy")]
    MissingRemedy(String),
    #[error("rule '{0}' judges authored text, so its remedy could never satisfy it")]
    UnreachableRemedy(String),
    #[error("rule '{0}' has a fragment spanning multiple lines")]
    MultilineFragment(String),
}

/// Immutable, validated rule table.
#[derive(Debug)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
    index: HashMap<&'static str, usize>,
}

impl RuleCatalog {
    /// The canonical 111-rule table.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(standard::rule_definitions())
    }

    pub fn new(definitions: Vec<RuleDefinition>) -> Result<Self, CatalogError> {
        if definitions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut rules = Vec::with_capacity(definitions.len());
        let mut index = HashMap::with_capacity(definitions.len());

        for (position, definition) in definitions.into_iter().enumerate() {
            validate(&definition)?;
            if index.insert(definition.id, position).is_some() {
                return Err(CatalogError::DuplicateRule(definition.id.to_string()));
            }

            let compile = |check: Check| {
                Predicate::compile(check).map_err(|source| CatalogError::InvalidPattern {
                    rule_id: definition.id.to_string(),
                    source,
                })
            };
            let pass = compile(definition.check)?;
            let gate = match definition.applicability {
                Applicability::Always => None,
                Applicability::When(gate) => Some(compile(gate)?),
            };

            rules.push(Rule {
                marker: marker_for(definition.id),
                definition,
                pass,
                gate,
                position,
            });
        }

        Ok(Self { rules, index })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, rule_id: &str) -> Option<&Rule> {
        self.index.get(rule_id).map(|position| &self.rules[*position])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules_in(&self, category: RuleCategory) -> impl Iterator<Item = &Rule> {
        self.rules
            .iter()
            .filter(move |rule| rule.category() == category)
    }

    /// Passed-item target used when a request does not set one: 90% of the catalog,
    /// rounded up.
    pub fn default_target_points(&self) -> usize {
        (self.rules.len() * 9).div_ceil(10)
    }

    pub fn views(&self) -> Vec<RuleView> {
        self.rules.iter().map(Rule::view).collect()
    }
}

fn validate(definition: &RuleDefinition) -> Result<(), CatalogError> {
    let id = definition.id;
    if id.is_empty() || id.contains(char::is_whitespace) || id.contains('>') {
        return Err(CatalogError::InvalidRuleId(id.to_string()));
    }
    if definition.weight == 0 {
        return Err(CatalogError::ZeroWeight(id.to_string()));
    }

    let gate = match definition.applicability {
        Applicability::Always => None,
        Applicability::When(gate) => Some(gate),
    };
    for check in std::iter::once(&definition.check).chain(gate.as_ref()) {
        if let Some(needle) = check
            .needles()
            .iter()
            .find(|needle| needle.to_lowercase() != **needle)
        {
            return Err(CatalogError::CaseSensitiveNeedle {
                rule_id: id.to_string(),
                needle: needle.to_string(),
            });
        }
    }

    match (&definition.remedy, definition.failure, definition.evidence) {
        (None, FailureMode::Pending, _) => Err(CatalogError::MissingRemedy(id.to_string())),
        (Some(_), _, Evidence::Authored) => Err(CatalogError::UnreachableRemedy(id.to_string())),
        (
            Some(Remedy {
                fragment: Fragment::Static(text),
                ..
            }),
            _,
            _,
        ) if text.contains('\n') => Err(CatalogError::MultilineFragment(id.to_string())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(id: &'static str) -> RuleDefinition {
        RuleDefinition::new(
            id,
            RuleCategory::MetaTags,
            "title present",
            Check::Contains("<title>"),
        )
        .prepend("<title>Example page title</title>")
    }

    #[test]
    fn standard_catalog_has_canonical_shape() {
        let catalog = RuleCatalog::standard().expect("standard catalog builds");
        assert_eq!(catalog.len(), 111);
        for category in RuleCategory::ALL {
            assert!(
                catalog.rules_in(category).count() >= 10,
                "{} is underpopulated",
                category.label()
            );
        }
        assert_eq!(catalog.default_target_points(), 100);
    }

    #[test]
    fn standard_catalog_rules_are_remediable_unless_hard() {
        let catalog = RuleCatalog::standard().expect("standard catalog builds");
        for rule in catalog.rules() {
            match rule.failure_mode() {
                FailureMode::Pending => assert!(rule.is_remediable(), "{}", rule.id()),
                FailureMode::Failed => {
                    assert!(!rule.is_remediable(), "{}", rule.id());
                    assert_eq!(rule.evidence(), Evidence::Authored);
                }
            }
        }
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(RuleCatalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = RuleCatalog::new(vec![definition("meta.title"), definition("meta.title")]);
        match result {
            Err(CatalogError::DuplicateRule(id)) => assert_eq!(id, "meta.title"),
            other => panic!("expected duplicate rule, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_weight() {
        let result = RuleCatalog::new(vec![definition("meta.title").weight(0)]);
        assert!(matches!(result, Err(CatalogError::ZeroWeight(_))));
    }

    #[test]
    fn rejects_invalid_patterns_with_rule_id() {
        let broken = RuleDefinition::new(
            "meta.broken",
            RuleCategory::MetaTags,
            "broken pattern",
            Check::Pattern("(<title"),
        )
        .prepend("<title>x</title>");
        match RuleCatalog::new(vec![broken]) {
            Err(CatalogError::InvalidPattern { rule_id, .. }) => assert_eq!(rule_id, "meta.broken"),
            other => panic!("expected invalid pattern, got {other:?}"),
        }
    }

    #[test]
    fn rejects_uppercase_needles() {
        let shouty = RuleDefinition::new(
            "meta.shouty",
            RuleCategory::MetaTags,
            "uppercase needle",
            Check::Contains("<TITLE>"),
        )
        .prepend("<TITLE>x</TITLE>");
        assert!(matches!(
            RuleCatalog::new(vec![shouty]),
            Err(CatalogError::CaseSensitiveNeedle { .. })
        ));
    }

    #[test]
    fn rejects_pending_rule_without_remedy() {
        let bare = RuleDefinition::new(
            "meta.bare",
            RuleCategory::MetaTags,
            "no remedy",
            Check::Contains("<title>"),
        );
        assert!(matches!(
            RuleCatalog::new(vec![bare]),
            Err(CatalogError::MissingRemedy(_))
        ));
    }

    #[test]
    fn rejects_remedy_on_authored_evidence() {
        let mut unreachable = definition("content.unreachable");
        unreachable.evidence = Evidence::Authored;
        assert!(matches!(
            RuleCatalog::new(vec![unreachable]),
            Err(CatalogError::UnreachableRemedy(_))
        ));
    }

    #[test]
    fn rejects_ids_that_would_break_markers() {
        assert!(matches!(
            RuleCatalog::new(vec![definition("meta title")]),
            Err(CatalogError::InvalidRuleId(_))
        ));
        assert!(matches!(
            RuleCatalog::new(vec![definition("meta->title")]),
            Err(CatalogError::InvalidRuleId(_))
        ));
    }

    #[test]
    fn category_names_round_trip() {
        for category in RuleCategory::ALL {
            assert_eq!(RuleCategory::from_name(category.name()), Some(category));
        }
        assert_eq!(
            RuleCategory::from_name("Open-Graph"),
            Some(RuleCategory::OpenGraph)
        );
        assert_eq!(RuleCategory::from_name("unknown"), None);
    }

    #[test]
    fn marker_is_unique_per_rule() {
        assert_eq!(marker_for("meta.title"), "<!-- remediated:meta.title -->");
        assert!(!marker_for("meta.title-length").contains(&marker_for("meta.title")));
    }
}
