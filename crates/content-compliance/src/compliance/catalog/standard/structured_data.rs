use super::fragments;
use super::{
    EVENT_GATE, FAQ_GATE, HOW_TO_GATE, LOCAL_GATE, PRODUCT_GATE, RECIPE_GATE, REVIEW_GATE,
    VIDEO_GATE,
};
use crate::compliance::catalog::{Check, Placement, RuleCategory, RuleDefinition};

const CATEGORY: RuleCategory = RuleCategory::StructuredData;

pub(super) fn rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "schema.jsonld",
            CATEGORY,
            "JSON-LD structured data block is present",
            Check::Contains("application/ld+json"),
        )
        .weight(3)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"WebSite","name":"Content Hub","url":"/"}</script>"#),
        RuleDefinition::new(
            "schema.webpage",
            CATEGORY,
            "WebPage entity is described",
            Check::Pattern(r#"(?i)"@type"\s*:\s*"webpage""#),
        )
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"WebPage","url":"/"}</script>"#),
        RuleDefinition::new(
            "schema.article",
            CATEGORY,
            "Article entity carries a headline",
            Check::Pattern(r#"(?i)"@type"\s*:\s*"(article|newsarticle|blogposting)""#),
        )
        .weight(2)
        .derive(Placement::Append, fragments::article_schema),
        RuleDefinition::new(
            "schema.organization",
            CATEGORY,
            "Publishing organization is described",
            Check::Pattern(r#"(?i)"@type"\s*:\s*"organization""#),
        )
        .weight(2)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Organization","name":"Content Hub","url":"/"}</script>"#),
        RuleDefinition::new(
            "schema.breadcrumb",
            CATEGORY,
            "Breadcrumb trail is described",
            Check::Contains("breadcrumblist"),
        )
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"BreadcrumbList","itemListElement":[{"@type":"ListItem","position":1,"name":"Home","item":"/"}]}</script>"#),
        RuleDefinition::new(
            "schema.author",
            CATEGORY,
            "Author is attached to the structured data",
            Check::Pattern(r#"(?i)"author"\s*:\s*\{"#),
        )
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"CreativeWork","author":{"@type":"Person","name":"Editorial Team"}}</script>"#),
        RuleDefinition::new(
            "schema.date-published",
            CATEGORY,
            "Publication date is declared",
            Check::Contains(r#""datepublished""#),
        )
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"CreativeWork","datePublished":"2024-01-01"}</script>"#),
        RuleDefinition::new(
            "schema.date-modified",
            CATEGORY,
            "Modification date is declared",
            Check::Contains(r#""datemodified""#),
        )
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"CreativeWork","dateModified":"2024-01-01"}</script>"#),
        RuleDefinition::new(
            "schema.faq",
            CATEGORY,
            "FAQ content is marked up as FAQPage",
            Check::Pattern(r#"(?i)"@type"\s*:\s*"faqpage""#),
        )
        .applies_when(FAQ_GATE)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"FAQPage","mainEntity":[{"@type":"Question","name":"What does this page cover?","acceptedAnswer":{"@type":"Answer","text":"The questions answered on this page."}}]}</script>"#),
        RuleDefinition::new(
            "schema.howto",
            CATEGORY,
            "Instructions are marked up as HowTo",
            Check::Pattern(r#"(?i)"@type"\s*:\s*"howto""#),
        )
        .applies_when(HOW_TO_GATE)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"HowTo","name":"Instructions","step":[{"@type":"HowToStep","text":"Follow the steps on this page."}]}</script>"#),
        RuleDefinition::new(
            "schema.product",
            CATEGORY,
            "Products are marked up with offers",
            Check::Pattern(r#"(?i)"@type"\s*:\s*"product""#),
        )
        .applies_when(PRODUCT_GATE)
        .weight(2)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Product","name":"Featured product","offers":{"@type":"Offer","priceCurrency":"USD","price":"0.00"}}</script>"#),
        RuleDefinition::new(
            "schema.review",
            CATEGORY,
            "Ratings are marked up as AggregateRating",
            Check::Contains("aggregaterating"),
        )
        .applies_when(REVIEW_GATE)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"CreativeWork","aggregateRating":{"@type":"AggregateRating","ratingValue":"5","reviewCount":"1"}}</script>"#),
        RuleDefinition::new(
            "schema.event",
            CATEGORY,
            "Events are marked up as Event",
            Check::Pattern(r#"(?i)"@type"\s*:\s*"event""#),
        )
        .applies_when(EVENT_GATE)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Event","name":"Featured event","eventAttendanceMode":"https://schema.org/MixedEventAttendanceMode"}</script>"#),
        RuleDefinition::new(
            "schema.recipe",
            CATEGORY,
            "Recipes are marked up as Recipe",
            Check::Pattern(r#"(?i)"@type"\s*:\s*"recipe""#),
        )
        .applies_when(RECIPE_GATE)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Recipe","name":"Featured recipe","recipeIngredient":[]}</script>"#),
        RuleDefinition::new(
            "schema.video",
            CATEGORY,
            "Videos are marked up as VideoObject",
            Check::Contains("videoobject"),
        )
        .applies_when(VIDEO_GATE)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"VideoObject","name":"Featured video","contentUrl":"/media/feature.mp4"}</script>"#),
        RuleDefinition::new(
            "schema.local-business",
            CATEGORY,
            "Local business details are marked up",
            Check::Contains("localbusiness"),
        )
        .applies_when(LOCAL_GATE)
        .weight(2)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"LocalBusiness","name":"Content Hub"}</script>"#),
    ]
}
