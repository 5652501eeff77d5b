use super::fragments;
use crate::compliance::catalog::{Check, Placement, RuleCategory, RuleDefinition};

const CATEGORY: RuleCategory = RuleCategory::ContentStructure;

pub(super) fn rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "content.body",
            CATEGORY,
            "The writer supplied body text",
            Check::MinWords(1),
        )
        .weight(5)
        .hard(),
        RuleDefinition::new(
            "content.word-count",
            CATEGORY,
            "Body text runs to at least 300 words",
            Check::MinWords(300),
        )
        .weight(4)
        .hard(),
        RuleDefinition::new(
            "content.paragraphs",
            CATEGORY,
            "Body text is split into at least three paragraphs",
            Check::MinParagraphs(3),
        )
        .weight(3)
        .hard(),
        RuleDefinition::new(
            "content.sentence-length",
            CATEGORY,
            "Sentences average 25 words or fewer",
            Check::Custom(fragments::balanced_sentences),
        )
        .weight(3)
        .hard(),
        RuleDefinition::new(
            "content.h1",
            CATEGORY,
            "A primary heading is present",
            Check::Pattern(r"(?im)<h1[\s>]|^#\s"),
        )
        .weight(2)
        .derive(Placement::Append, fragments::primary_heading),
        RuleDefinition::new(
            "content.h2",
            CATEGORY,
            "Content is divided by section headings",
            Check::Pattern(r"(?im)<h2[\s>]|^##\s"),
        )
        .weight(2)
        .append("<h2>Overview</h2>"),
        RuleDefinition::new(
            "content.h3",
            CATEGORY,
            "Sections use subheadings",
            Check::Pattern(r"(?im)<h3[\s>]|^###\s"),
        )
        .append("<h3>Details</h3>"),
        RuleDefinition::new(
            "content.lists",
            CATEGORY,
            "Content includes a list",
            Check::Pattern(r"(?im)<(ul|ol)[\s>]|^\s*([-*]|\d+\.)\s"),
        )
        .append("<ul><li>Key point covered on this page</li></ul>"),
        RuleDefinition::new(
            "content.toc",
            CATEGORY,
            "A table of contents links the sections",
            Check::Contains(r#"class="toc""#),
        )
        .append(r##"<nav class="toc"><a href="#summary">Summary</a></nav>"##),
        RuleDefinition::new(
            "content.summary",
            CATEGORY,
            "A summary section is anchored for linking",
            Check::Contains(r#"id="summary""#),
        )
        .weight(2)
        .append(r#"<p id="summary">Summary: the main points of this page are listed above.</p>"#),
        RuleDefinition::new(
            "content.internal-links",
            CATEGORY,
            "Content links to related pages on the same site",
            Check::Pattern(r#"(?i)<a\s[^>]*href="/|\]\(/"#),
        )
        .weight(2)
        .append(r#"<a href="/related">Related articles</a>"#),
        RuleDefinition::new(
            "content.external-citations",
            CATEGORY,
            "Content links to external references",
            Check::Pattern(r#"(?i)<a\s[^>]*href="https?://|\]\(https?://"#),
        )
        .append(r#"<a href="https://schema.org" rel="noopener">Further reading</a>"#),
        RuleDefinition::new(
            "content.last-updated",
            CATEGORY,
            "A last-updated notice is shown",
            Check::Contains("<time"),
        )
        .append(r#"<p class="last-updated">Last updated: <time>see revision history</time></p>"#),
        RuleDefinition::new(
            "content.emphasis",
            CATEGORY,
            "Key takeaways are emphasized",
            Check::Pattern(r"(?i)<(strong|b|em)>|\*\*[^*]+\*\*"),
        )
        .append("<p><strong>Key takeaway:</strong> focus on the main answer first.</p>"),
        RuleDefinition::new(
            "content.conclusion",
            CATEGORY,
            "Content closes with a conclusion",
            Check::Pattern(r"(?i)\b(conclusion|in summary|final thoughts)\b"),
        )
        .append(r#"<p class="conclusion">In summary, the points above answer the main question.</p>"#),
        RuleDefinition::new(
            "content.glossary",
            CATEGORY,
            "Specialist terms are explained in a definition list",
            Check::Contains("<dl"),
        )
        .append("<dl><dt>Term</dt><dd>Short explanation of the term.</dd></dl>"),
    ]
}
