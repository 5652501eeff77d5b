use super::fragments;
use super::{FAQ_GATE, HOW_TO_GATE, LOCAL_GATE, PHONE_GATE};
use crate::compliance::catalog::{Check, RuleCategory, RuleDefinition};

const CATEGORY: RuleCategory = RuleCategory::VoiceSearch;

pub(super) fn rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "voice.speakable",
            CATEGORY,
            "Speakable sections are declared",
            Check::Contains(r#""speakable""#),
        )
        .weight(2)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"WebPage","speakable":{"@type":"SpeakableSpecification","cssSelector":[".summary",".answer"]}}</script>"#),
        RuleDefinition::new(
            "voice.question-phrases",
            CATEGORY,
            "Content poses natural spoken questions",
            Check::Pattern(r"(?i)\b(what|how|why|when|where|who)\b[^.?!]*\?"),
        )
        .weight(2)
        .append("<p>What is the quickest way to get started? Begin with the summary.</p>"),
        RuleDefinition::new(
            "voice.concise-answer",
            CATEGORY,
            "A short spoken answer is available",
            Check::Contains(r#"class="voice-answer""#),
        )
        .append(r#"<p class="voice-answer">Here is the short spoken answer to the main question.</p>"#),
        RuleDefinition::new(
            "voice.natural-language",
            CATEGORY,
            "Phrasing is conversational",
            Check::Pattern(r"(?i)\b(you can|you'll|let's|here's)\b"),
        )
        .append("<p>Here's what you can do next.</p>"),
        RuleDefinition::new(
            "voice.long-tail",
            CATEGORY,
            "Long-tail query phrasing is covered",
            Check::Pattern(r"(?i)\b(best way to|what is the|how do i|how can i)\b"),
        )
        .append("<p>What is the best way to use this guide? Start at the top.</p>"),
        RuleDefinition::new(
            "voice.several-questions",
            CATEGORY,
            "At least three questions are answered",
            Check::Custom(fragments::several_questions),
        )
        .append("<p>Who is this for? What does it cover? Why does it matter?</p>"),
        RuleDefinition::new(
            "voice.readable-summary",
            CATEGORY,
            "A summary is marked for read-aloud",
            Check::Contains(r#"class="summary""#),
        )
        .append(r#"<p class="summary">In short, the page answers the main question directly.</p>"#),
        RuleDefinition::new(
            "voice.recency",
            CATEGORY,
            "Freshness is stated",
            Check::Pattern(r"(?i)\b(updated|reviewed|as of)\b"),
        )
        .append("<p>Reviewed and updated regularly for accuracy.</p>"),
        RuleDefinition::new(
            "voice.local-intent",
            CATEGORY,
            "A postal address is available for local queries",
            Check::Contains(r#""address""#),
        )
        .applies_when(LOCAL_GATE)
        .weight(2)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Place","address":{"@type":"PostalAddress","addressLocality":"Local area"}}</script>"#),
        RuleDefinition::new(
            "voice.faq-answers",
            CATEGORY,
            "Questions carry accepted answers",
            Check::Contains("acceptedanswer"),
        )
        .applies_when(FAQ_GATE)
        .append(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Question","name":"What is covered here?","acceptedAnswer":{"@type":"Answer","text":"The key facts listed on this page."}}</script>"#),
        RuleDefinition::new(
            "voice.phone",
            CATEGORY,
            "Phone numbers are tappable",
            Check::Contains(r#"href="tel:"#),
        )
        .applies_when(PHONE_GATE)
        .append(r#"<a href="tel:+10000000000">Call us</a>"#),
        RuleDefinition::new(
            "voice.howto-steps",
            CATEGORY,
            "Steps are numbered for spoken walkthroughs",
            Check::Contains("step 1"),
        )
        .applies_when(HOW_TO_GATE)
        .append("<p>Step 1: read the summary. Step 2: follow the key facts.</p>"),
    ]
}
