use super::fragments;
use super::{COMPARISON_GATE, HOW_TO_GATE};
use crate::compliance::catalog::{Check, Placement, RuleCategory, RuleDefinition};

const CATEGORY: RuleCategory = RuleCategory::AiAssistant;

pub(super) fn rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "ai.direct-answer",
            CATEGORY,
            "A direct answer block leads the content",
            Check::Contains(r#"class="answer""#),
        )
        .weight(3)
        .append(r#"<p class="answer">The short answer comes first, followed by the supporting detail.</p>"#),
        RuleDefinition::new(
            "ai.definition",
            CATEGORY,
            "The main term is defined explicitly",
            Check::Contains("<dfn"),
        )
        .weight(2)
        .append("<p><dfn>Key term</dfn>: a plain-language definition of the main subject.</p>"),
        RuleDefinition::new(
            "ai.faq-section",
            CATEGORY,
            "A question and answer section is present",
            Check::Contains(r#"id="faq""#),
        )
        .weight(2)
        .append(r#"<section id="faq"><h2>Frequently asked questions</h2></section>"#),
        RuleDefinition::new(
            "ai.question-headings",
            CATEGORY,
            "At least one heading is phrased as a question",
            Check::Pattern(r"(?i)<h[23][^>]*>[^<]*\?\s*</h[23]>"),
        )
        .weight(2)
        .append("<h2>What should readers know first?</h2>"),
        RuleDefinition::new(
            "ai.key-facts",
            CATEGORY,
            "Key facts are summarized in a list",
            Check::Contains(r#"class="key-facts""#),
        )
        .append(r#"<ul class="key-facts"><li>Key facts are listed here for quick reference.</li></ul>"#),
        RuleDefinition::new(
            "ai.entity",
            CATEGORY,
            "The primary entity is identified in structured data",
            Check::Contains(r#""about""#),
        )
        .derive(Placement::Append, fragments::entity_schema),
        RuleDefinition::new(
            "ai.citations",
            CATEGORY,
            "Sources are cited",
            Check::Pattern(r"(?i)<cite\b|<blockquote[^>]*\bcite="),
        )
        .weight(2)
        .append("<p>Source: <cite>Primary reference material</cite></p>"),
        RuleDefinition::new(
            "ai.statistics",
            CATEGORY,
            "Claims are backed by figures",
            Check::Pattern(r"\d+(\.\d+)?\s?%"),
        )
        .append(r#"<p class="statistic">Coverage: 100% of the key questions are answered on this page.</p>"#),
        RuleDefinition::new(
            "ai.author-expertise",
            CATEGORY,
            "Author credentials are shown",
            Check::Contains(r#"class="author-bio""#),
        )
        .weight(2)
        .append(r#"<aside class="author-bio">Written by the editorial team with subject-matter review.</aside>"#),
        RuleDefinition::new(
            "ai.llms-txt",
            CATEGORY,
            "An llms.txt summary is linked",
            Check::Contains("/llms.txt"),
        )
        .prepend(r#"<link rel="alternate" type="text/plain" href="/llms.txt">"#),
        RuleDefinition::new(
            "ai.crawler-access",
            CATEGORY,
            "AI crawlers are explicitly allowed",
            Check::Contains(r#"name="gptbot""#),
        )
        .prepend(r#"<meta name="GPTBot" content="index, follow">"#),
        RuleDefinition::new(
            "ai.tldr",
            CATEGORY,
            "A one-line TL;DR is provided",
            Check::Contains(r#"class="tldr""#),
        )
        .append(r#"<p class="tldr">TL;DR: the key point of this page in one sentence.</p>"#),
        RuleDefinition::new(
            "ai.semantic-sections",
            CATEGORY,
            "Content uses semantic sectioning elements",
            Check::Pattern(r"(?i)<(article|section|main)\b"),
        )
        .append("<article><p>The main article content is outlined in the sections on this page.</p></article>"),
        RuleDefinition::new(
            "ai.comparison-table",
            CATEGORY,
            "Comparisons are laid out in a table",
            Check::Contains("<table"),
        )
        .applies_when(COMPARISON_GATE)
        .append(r#"<table class="comparison"><tr><th>Option</th><th>Strengths</th></tr></table>"#),
        RuleDefinition::new(
            "ai.step-list",
            CATEGORY,
            "Instructions are an ordered list",
            Check::Contains("<ol"),
        )
        .applies_when(HOW_TO_GATE)
        .append(r#"<ol class="steps"><li>Start with the first step listed here.</li></ol>"#),
        RuleDefinition::new(
            "ai.conversational",
            CATEGORY,
            "Content addresses the reader directly",
            Check::Pattern(r"(?i)\b(you|your)\b"),
        )
        .append("<p>You will find the answer to your question in the sections below.</p>"),
    ]
}
