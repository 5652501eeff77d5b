use super::fragments;
use super::{PRODUCT_GATE, VIDEO_GATE};
use crate::compliance::catalog::{Check, Placement, RuleCategory, RuleDefinition};

const CATEGORY: RuleCategory = RuleCategory::OpenGraph;

pub(super) fn rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "og.title",
            CATEGORY,
            "Open Graph title is set",
            Check::Contains(r#"property="og:title""#),
        )
        .weight(2)
        .derive(Placement::Prepend, fragments::og_title),
        RuleDefinition::new(
            "og.description",
            CATEGORY,
            "Open Graph description is set",
            Check::Contains(r#"property="og:description""#),
        )
        .weight(2)
        .derive(Placement::Prepend, fragments::og_description),
        RuleDefinition::new(
            "og.type",
            CATEGORY,
            "Open Graph object type is set",
            Check::Contains(r#"property="og:type""#),
        )
        .prepend(r#"<meta property="og:type" content="article">"#),
        RuleDefinition::new(
            "og.url",
            CATEGORY,
            "Open Graph URL is set",
            Check::Contains(r#"property="og:url""#),
        )
        .prepend(r#"<meta property="og:url" content="/">"#),
        RuleDefinition::new(
            "og.image",
            CATEGORY,
            "Share image is provided",
            Check::Contains(r#"property="og:image""#),
        )
        .weight(2)
        .prepend(r#"<meta property="og:image" content="/images/share.jpg">"#),
        RuleDefinition::new(
            "og.image-alt",
            CATEGORY,
            "Share image carries alternative text",
            Check::Contains(r#"property="og:image:alt""#),
        )
        .derive(Placement::Prepend, fragments::og_image_alt),
        RuleDefinition::new(
            "og.site-name",
            CATEGORY,
            "Site name is set",
            Check::Contains(r#"property="og:site_name""#),
        )
        .prepend(r#"<meta property="og:site_name" content="Content Hub">"#),
        RuleDefinition::new(
            "twitter.card",
            CATEGORY,
            "Twitter card type is set",
            Check::Contains(r#"name="twitter:card""#),
        )
        .weight(2)
        .prepend(r#"<meta name="twitter:card" content="summary_large_image">"#),
        RuleDefinition::new(
            "twitter.title",
            CATEGORY,
            "Twitter card title is set",
            Check::Contains(r#"name="twitter:title""#),
        )
        .derive(Placement::Prepend, fragments::twitter_title),
        RuleDefinition::new(
            "twitter.description",
            CATEGORY,
            "Twitter card description is set",
            Check::Contains(r#"name="twitter:description""#),
        )
        .derive(Placement::Prepend, fragments::twitter_description),
        RuleDefinition::new(
            "og.video",
            CATEGORY,
            "Embedded video is exposed to link previews",
            Check::Contains(r#"property="og:video""#),
        )
        .applies_when(VIDEO_GATE)
        .prepend(r#"<meta property="og:video" content="/media/feature.mp4">"#),
        RuleDefinition::new(
            "og.price",
            CATEGORY,
            "Product price is exposed to link previews",
            Check::Contains("product:price:amount"),
        )
        .applies_when(PRODUCT_GATE)
        .weight(2)
        .prepend(r#"<meta property="product:price:amount" content="0.00">"#),
    ]
}
