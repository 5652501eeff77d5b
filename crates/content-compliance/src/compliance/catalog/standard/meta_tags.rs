use super::fragments;
use super::LANGUAGE_GATE;
use crate::compliance::catalog::{Check, Placement, RuleCategory, RuleDefinition};

const CATEGORY: RuleCategory = RuleCategory::MetaTags;

pub(super) fn rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "meta.title",
            CATEGORY,
            "Page declares a non-empty <title>",
            Check::Pattern(r"(?is)<title>\s*[^<\s][^<]*</title>"),
        )
        .weight(3)
        .derive(Placement::Prepend, fragments::title_tag),
        RuleDefinition::new(
            "meta.title-length",
            CATEGORY,
            "Title is between 10 and 60 characters",
            Check::Custom(fragments::title_length_within),
        )
        .derive(Placement::Prepend, fragments::title_tag),
        RuleDefinition::new(
            "meta.description",
            CATEGORY,
            "Meta description is present",
            Check::Contains(r#"<meta name="description""#),
        )
        .weight(3)
        .derive(Placement::Prepend, fragments::description_tag),
        RuleDefinition::new(
            "meta.description-length",
            CATEGORY,
            "Meta description is between 50 and 160 characters",
            Check::Custom(fragments::description_length_within),
        )
        .weight(2)
        .derive(Placement::Prepend, fragments::description_tag),
        RuleDefinition::new(
            "meta.viewport",
            CATEGORY,
            "Viewport is configured for mobile rendering",
            Check::Contains(r#"name="viewport""#),
        )
        .weight(2)
        .prepend(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#),
        RuleDefinition::new(
            "meta.charset",
            CATEGORY,
            "Character encoding is declared",
            Check::Pattern(r"(?i)<meta\s+charset="),
        )
        .prepend(r#"<meta charset="utf-8">"#),
        RuleDefinition::new(
            "meta.robots",
            CATEGORY,
            "Robots directive allows indexing",
            Check::Contains(r#"name="robots""#),
        )
        .prepend(r#"<meta name="robots" content="index, follow">"#),
        RuleDefinition::new(
            "meta.robots-snippet",
            CATEGORY,
            "Search snippets and previews are not truncated",
            Check::Contains("max-snippet"),
        )
        .prepend(r#"<meta name="googlebot" content="max-snippet:-1, max-image-preview:large">"#),
        RuleDefinition::new(
            "meta.canonical",
            CATEGORY,
            "Canonical URL is declared",
            Check::Contains(r#"rel="canonical""#),
        )
        .weight(2)
        .prepend(r#"<link rel="canonical" href="/">"#),
        RuleDefinition::new(
            "meta.language",
            CATEGORY,
            "Document language is declared",
            Check::Pattern(r#"(?i)<html[^>]*\slang=|http-equiv="content-language""#),
        )
        .prepend(r#"<meta http-equiv="content-language" content="en">"#),
        RuleDefinition::new(
            "meta.author",
            CATEGORY,
            "Author is named in metadata",
            Check::Contains(r#"name="author""#),
        )
        .prepend(r#"<meta name="author" content="Editorial Team">"#),
        RuleDefinition::new(
            "meta.keywords",
            CATEGORY,
            "Topic keywords are listed",
            Check::Contains(r#"name="keywords""#),
        )
        .derive(Placement::Prepend, fragments::keywords_tag),
        RuleDefinition::new(
            "meta.theme-color",
            CATEGORY,
            "Browser theme color is set",
            Check::Contains(r#"name="theme-color""#),
        )
        .prepend(r##"<meta name="theme-color" content="#ffffff">"##),
        RuleDefinition::new(
            "meta.referrer",
            CATEGORY,
            "Referrer policy is declared",
            Check::Contains(r#"name="referrer""#),
        )
        .prepend(r#"<meta name="referrer" content="strict-origin-when-cross-origin">"#),
        RuleDefinition::new(
            "meta.hreflang",
            CATEGORY,
            "Language alternates are linked for multilingual content",
            Check::Contains("hreflang="),
        )
        .applies_when(LANGUAGE_GATE)
        .prepend(r#"<link rel="alternate" hreflang="x-default" href="/">"#),
    ]
}
