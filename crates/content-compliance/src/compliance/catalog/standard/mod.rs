//! The canonical rule table, one file per category.

mod ai_assistant;
mod content_structure;
mod core_web_vitals;
mod fragments;
mod meta_tags;
mod open_graph;
mod structured_data;
mod technical_seo;
mod voice_search;

use super::{Check, RuleDefinition};

// Applicability gates. They run against authored text only.
const IMAGE_GATE: Check = Check::Pattern(r"(?i)<img\b");
const VIDEO_GATE: Check = Check::Pattern(r"(?i)\b(videos?|youtube|vimeo|watch the)\b");
const FAQ_GATE: Check = Check::Pattern(r"(?i)\b(faqs?|frequently asked)\b");
const HOW_TO_GATE: Check =
    Check::Pattern(r"(?i)\b(how to|step \d+|step-by-step|instructions)\b");
const PRODUCT_GATE: Check =
    Check::Pattern(r"(?i)\b(price|pricing|buy|add to cart|in stock|products?)\b|\$\d");
const REVIEW_GATE: Check = Check::Pattern(r"(?i)\b(reviews?|ratings?|stars|testimonials?)\b");
const EVENT_GATE: Check = Check::Pattern(r"(?i)\b(events?|tickets?|conference|webinar|venue)\b");
const RECIPE_GATE: Check = Check::Pattern(r"(?i)\b(recipes?|ingredients|cook time|prep time)\b");
const LOCAL_GATE: Check = Check::Pattern(
    r"(?i)\b(opening hours|our address|located (in|at)|visit us|near me|nearby|directions)\b",
);
const LANGUAGE_GATE: Check =
    Check::Pattern(r"(?i)\b(translations?|multilingual|hreflang|español|français|deutsch)\b");
const FONT_GATE: Check = Check::Pattern(r"(?i)@font-face|fonts\.googleapis");
const SCRIPT_GATE: Check = Check::Pattern(r"(?i)<script\s[^>]*\bsrc=");
const COMPARISON_GATE: Check =
    Check::Pattern(r"(?i)\b(vs|versus|comparison)\b|\bcompared (to|with)\b");
const PHONE_GATE: Check = Check::Pattern(r"(?i)\b(call us|phone|contact us)\b");
const PAGINATION_GATE: Check = Check::Pattern(r"(?i)\b(page \d+|next page|previous page)\b");
const AMP_GATE: Check = Check::Pattern(r"(?i)\b(amp (version|pages?)|accelerated mobile pages)\b");
const NEW_TAB_GATE: Check = Check::Pattern(r#"(?i)target="_blank""#);

pub(super) fn rule_definitions() -> Vec<RuleDefinition> {
    [
        meta_tags::rules(),
        open_graph::rules(),
        structured_data::rules(),
        ai_assistant::rules(),
        core_web_vitals::rules(),
        content_structure::rules(),
        voice_search::rules(),
        technical_seo::rules(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
