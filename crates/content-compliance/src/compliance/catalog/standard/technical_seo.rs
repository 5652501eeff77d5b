use super::{AMP_GATE, IMAGE_GATE, NEW_TAB_GATE, PAGINATION_GATE};
use crate::compliance::catalog::{Check, RuleCategory, RuleDefinition};

const CATEGORY: RuleCategory = RuleCategory::TechnicalSeo;

pub(super) fn rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "tech.doctype",
            CATEGORY,
            "HTML5 doctype is declared",
            Check::Contains("<!doctype html"),
        )
        .weight(2)
        .prepend("<!DOCTYPE html>"),
        RuleDefinition::new(
            "tech.sitemap",
            CATEGORY,
            "XML sitemap is linked",
            Check::Contains(r#"rel="sitemap""#),
        )
        .prepend(r#"<link rel="sitemap" type="application/xml" href="/sitemap.xml">"#),
        RuleDefinition::new(
            "tech.robots-txt",
            CATEGORY,
            "robots.txt is referenced",
            Check::Contains("/robots.txt"),
        )
        .prepend(r#"<link rel="help" type="text/plain" href="/robots.txt">"#),
        RuleDefinition::new(
            "tech.favicon",
            CATEGORY,
            "Favicon is declared",
            Check::Contains(r#"rel="icon""#),
        )
        .prepend(r#"<link rel="icon" href="/favicon.ico">"#),
        RuleDefinition::new(
            "tech.manifest",
            CATEGORY,
            "Web app manifest is linked",
            Check::Contains(r#"rel="manifest""#),
        )
        .prepend(r#"<link rel="manifest" href="/site.webmanifest">"#),
        RuleDefinition::new(
            "tech.touch-icon",
            CATEGORY,
            "Touch icon is declared",
            Check::Contains(r#"rel="apple-touch-icon""#),
        )
        .prepend(r#"<link rel="apple-touch-icon" href="/apple-touch-icon.png">"#),
        RuleDefinition::new(
            "tech.csp",
            CATEGORY,
            "Content security policy is declared",
            Check::Contains("content-security-policy"),
        )
        .weight(2)
        .prepend(r#"<meta http-equiv="Content-Security-Policy" content="default-src 'self'">"#),
        RuleDefinition::new(
            "tech.rss",
            CATEGORY,
            "Feed is discoverable",
            Check::Contains("application/rss+xml"),
        )
        .prepend(r#"<link rel="alternate" type="application/rss+xml" href="/feed.xml">"#),
        RuleDefinition::new(
            "tech.image-alt",
            CATEGORY,
            "Images carry alternative text",
            Check::Pattern(r#"(?i)<img\b[^>]*\balt="[^"]+""#),
        )
        .applies_when(IMAGE_GATE)
        .weight(2)
        .append(r#"<img src="/images/cover.jpg" alt="Illustration of the topic">"#),
        RuleDefinition::new(
            "tech.pagination",
            CATEGORY,
            "Paginated series link to the next page",
            Check::Contains(r#"rel="next""#),
        )
        .applies_when(PAGINATION_GATE)
        .prepend(r#"<link rel="next" href="?page=2">"#),
        RuleDefinition::new(
            "tech.amp",
            CATEGORY,
            "AMP version is linked",
            Check::Contains(r#"rel="amphtml""#),
        )
        .applies_when(AMP_GATE)
        .prepend(r#"<link rel="amphtml" href="/amp/">"#),
        RuleDefinition::new(
            "tech.noopener",
            CATEGORY,
            "Links opening new tabs are isolated",
            Check::Contains("noopener"),
        )
        .applies_when(NEW_TAB_GATE)
        .append(r#"<a href="/" target="_blank" rel="noopener noreferrer">Open in a new tab</a>"#),
    ]
}
