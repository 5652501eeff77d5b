use super::{FONT_GATE, IMAGE_GATE, SCRIPT_GATE};
use crate::compliance::catalog::{Check, RuleCategory, RuleDefinition};

const CATEGORY: RuleCategory = RuleCategory::CoreWebVitals;

pub(super) fn rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "cwv.preconnect",
            CATEGORY,
            "Critical origins are preconnected",
            Check::Contains(r#"rel="preconnect""#),
        )
        .prepend(r#"<link rel="preconnect" href="https://cdn.example.com">"#),
        RuleDefinition::new(
            "cwv.dns-prefetch",
            CATEGORY,
            "Third-party hosts are resolved early",
            Check::Contains(r#"rel="dns-prefetch""#),
        )
        .prepend(r#"<link rel="dns-prefetch" href="https://cdn.example.com">"#),
        RuleDefinition::new(
            "cwv.preload",
            CATEGORY,
            "Render-critical resources are preloaded",
            Check::Contains(r#"rel="preload""#),
        )
        .weight(2)
        .prepend(r#"<link rel="preload" href="/styles/main.css" as="style">"#),
        RuleDefinition::new(
            "cwv.critical-css",
            CATEGORY,
            "Critical CSS is inlined",
            Check::Pattern(r"(?i)<style[\s>]"),
        )
        .weight(2)
        .prepend("<style>body{margin:0;font-family:system-ui,sans-serif}</style>"),
        RuleDefinition::new(
            "cwv.layout-stability",
            CATEGORY,
            "Media reserve space to avoid layout shift",
            Check::Contains("aspect-ratio"),
        )
        .prepend("<style>img,video{max-width:100%;height:auto;aspect-ratio:16/9}</style>"),
        RuleDefinition::new(
            "cwv.image-dimensions",
            CATEGORY,
            "Images declare explicit dimensions",
            Check::Pattern(r"(?i)<img\b[^>]*\bwidth="),
        )
        .applies_when(IMAGE_GATE)
        .weight(2)
        .append(r#"<img src="/images/cover.jpg" alt="Cover image" width="1200" height="630">"#),
        RuleDefinition::new(
            "cwv.lazy-loading",
            CATEGORY,
            "Offscreen images load lazily",
            Check::Contains(r#"loading="lazy""#),
        )
        .applies_when(IMAGE_GATE)
        .append(r#"<img src="/images/cover.jpg" alt="Cover image" loading="lazy">"#),
        RuleDefinition::new(
            "cwv.modern-images",
            CATEGORY,
            "Images use a modern format",
            Check::Pattern(r"(?i)\.(webp|avif)\b"),
        )
        .applies_when(IMAGE_GATE)
        .append(r#"<img src="/images/cover.webp" alt="Cover image">"#),
        RuleDefinition::new(
            "cwv.async-decoding",
            CATEGORY,
            "Images decode off the main thread",
            Check::Contains(r#"decoding="async""#),
        )
        .applies_when(IMAGE_GATE)
        .append(r#"<img src="/images/cover.jpg" alt="Cover image" decoding="async">"#),
        RuleDefinition::new(
            "cwv.fetch-priority",
            CATEGORY,
            "The largest image is fetched with high priority",
            Check::Contains("fetchpriority="),
        )
        .applies_when(IMAGE_GATE)
        .prepend(r#"<link rel="preload" as="image" href="/images/cover.jpg" fetchpriority="high">"#),
        RuleDefinition::new(
            "cwv.font-display",
            CATEGORY,
            "Web fonts swap in without blocking text",
            Check::Contains("font-display"),
        )
        .applies_when(FONT_GATE)
        .prepend("<style>@font-face{font-family:body;font-display:swap}</style>"),
        RuleDefinition::new(
            "cwv.defer-scripts",
            CATEGORY,
            "External scripts are deferred",
            Check::Pattern(r"(?i)<script[^>]*\s(defer|async)[\s>=]"),
        )
        .applies_when(SCRIPT_GATE)
        .append(r#"<script src="/scripts/app.js" defer></script>"#),
    ]
}
