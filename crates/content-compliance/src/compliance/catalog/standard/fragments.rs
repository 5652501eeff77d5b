//! Content-derived fragment generators and the custom predicates they must satisfy.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::super::predicate::{average_sentence_words, plain_text};
use super::super::RuleFault;
use crate::compliance::document::ContentView;

pub(super) const TITLE_MIN_CHARS: usize = 10;
pub(super) const TITLE_MAX_CHARS: usize = 60;
pub(super) const DESCRIPTION_MIN_CHARS: usize = 50;
pub(super) const DESCRIPTION_MAX_CHARS: usize = 160;
const DESCRIPTION_TARGET_CHARS: usize = 155;
const MAX_AVERAGE_SENTENCE_WORDS: f64 = 25.0;
const MIN_QUESTIONS: usize = 3;

const FALLBACK_TITLE: &str = "Content overview and key facts";
const FALLBACK_DESCRIPTION: &str =
    "A concise overview with direct answers, key facts and practical guidance.";
const FALLBACK_KEYWORDS: &str = "overview, guide, answers";

const STOPWORDS: &[&str] = &[
    "about", "after", "again", "their", "there", "these", "those", "which", "while", "where",
    "would", "could", "should", "other", "being", "because", "every", "under", "through",
];

static TITLE_TAG: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?is)<title>(.*?)</title>"));
static DESCRIPTION_TAG: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+name="description"\s+content="([^"]*)""#)
});

fn compiled(
    pattern: &'static LazyLock<Result<Regex, regex::Error>>,
    name: &str,
) -> Result<&'static Regex, RuleFault> {
    pattern
        .as_ref()
        .map_err(|err| RuleFault::new(format!("{name} pattern failed to compile: {err}")))
}

/// Strips markup, heading hashes and characters unsafe inside attributes or JSON strings.
fn clean(raw: &str) -> Result<String, RuleFault> {
    let plain = plain_text(raw)?;
    let safe: String = plain
        .chars()
        .filter(|ch| !matches!(ch, '"' | '<' | '>' | '\\') && !ch.is_control())
        .collect();
    let words: Vec<&str> = safe.split_whitespace().collect();
    Ok(words.join(" ").trim_start_matches('#').trim().to_string())
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect::<String>().trim_end().to_string()
}

/// Title from the first heading, else the first non-blank authored line.
pub(super) fn page_title(view: &ContentView<'_>) -> Result<String, RuleFault> {
    let authored = view.authored();
    let heading = authored.lines().find(|line| {
        let trimmed = line.trim_start();
        trimmed.starts_with('#') || trimmed.to_ascii_lowercase().contains("<h1")
    });
    let candidate = match heading {
        Some(line) => clean(line)?,
        None => match authored.lines().find(|line| !line.trim().is_empty()) {
            Some(line) => clean(line)?,
            None => String::new(),
        },
    };

    let title = truncate_chars(&candidate, TITLE_MAX_CHARS);
    if title.chars().count() < TITLE_MIN_CHARS {
        return Ok(FALLBACK_TITLE.to_string());
    }
    Ok(title)
}

/// Leading sentences of the authored text, sized for a meta description.
pub(super) fn page_summary(view: &ContentView<'_>) -> Result<String, RuleFault> {
    let body = clean(view.authored())?;
    let mut summary = String::new();
    for sentence in body.split_inclusive(['.', '!', '?']) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(sentence);
        if summary.chars().count() >= DESCRIPTION_MIN_CHARS {
            break;
        }
    }

    if summary.chars().count() < DESCRIPTION_MIN_CHARS {
        summary = if summary.is_empty() {
            FALLBACK_DESCRIPTION.to_string()
        } else {
            format!("{summary} {FALLBACK_DESCRIPTION}")
        };
    }

    Ok(truncate_chars(&summary, DESCRIPTION_TARGET_CHARS))
}

/// Five most frequent longer words, ties broken alphabetically.
pub(super) fn page_keywords(view: &ContentView<'_>) -> Result<String, RuleFault> {
    let body = clean(view.authored())?.to_lowercase();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for word in body.split(|ch: char| !ch.is_alphabetic()) {
        if word.chars().count() >= 5 && !STOPWORDS.contains(&word) {
            *counts.entry(word).or_default() += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let keywords: Vec<&str> = ranked.into_iter().take(5).map(|(word, _)| word).collect();

    if keywords.is_empty() {
        return Ok(FALLBACK_KEYWORDS.to_string());
    }
    Ok(keywords.join(", "))
}

pub(super) fn title_tag(view: &ContentView<'_>) -> Result<String, RuleFault> {
    Ok(format!("<title>{}</title>", page_title(view)?))
}

pub(super) fn description_tag(view: &ContentView<'_>) -> Result<String, RuleFault> {
    Ok(format!(
        r#"<meta name="description" content="{}">"#,
        page_summary(view)?
    ))
}

pub(super) fn keywords_tag(view: &ContentView<'_>) -> Result<String, RuleFault> {
    Ok(format!(
        r#"<meta name="keywords" content="{}">"#,
        page_keywords(view)?
    ))
}

pub(super) fn og_title(view: &ContentView<'_>) -> Result<String, RuleFault> {
    Ok(format!(
        r#"<meta property="og:title" content="{}">"#,
        page_title(view)?
    ))
}

pub(super) fn og_description(view: &ContentView<'_>) -> Result<String, RuleFault> {
    Ok(format!(
        r#"<meta property="og:description" content="{}">"#,
        page_summary(view)?
    ))
}

pub(super) fn og_image_alt(view: &ContentView<'_>) -> Result<String, RuleFault> {
    Ok(format!(
        r#"<meta property="og:image:alt" content="{}">"#,
        page_title(view)?
    ))
}

pub(super) fn twitter_title(view: &ContentView<'_>) -> Result<String, RuleFault> {
    Ok(format!(
        r#"<meta name="twitter:title" content="{}">"#,
        page_title(view)?
    ))
}

pub(super) fn twitter_description(view: &ContentView<'_>) -> Result<String, RuleFault> {
    Ok(format!(
        r#"<meta name="twitter:description" content="{}">"#,
        page_summary(view)?
    ))
}

pub(super) fn article_schema(view: &ContentView<'_>) -> Result<String, RuleFault> {
    Ok(format!(
        r#"<script type="application/ld+json">{{"@context":"https://schema.org","@type":"Article","headline":"{}"}}</script>"#,
        page_title(view)?
    ))
}

pub(super) fn entity_schema(view: &ContentView<'_>) -> Result<String, RuleFault> {
    Ok(format!(
        r#"<script type="application/ld+json">{{"@context":"https://schema.org","@type":"WebPage","about":{{"@type":"Thing","name":"{}"}}}}</script>"#,
        page_title(view)?
    ))
}

pub(super) fn primary_heading(view: &ContentView<'_>) -> Result<String, RuleFault> {
    Ok(format!("<h1>{}</h1>", page_title(view)?))
}

pub(super) fn title_length_within(text: &str) -> Result<bool, RuleFault> {
    let titles = compiled(&TITLE_TAG, "title")?;
    Ok(titles.captures_iter(text).any(|captures| {
        let length = captures[1].trim().chars().count();
        (TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&length)
    }))
}

pub(super) fn description_length_within(text: &str) -> Result<bool, RuleFault> {
    let descriptions = compiled(&DESCRIPTION_TAG, "description")?;
    Ok(descriptions.captures_iter(text).any(|captures| {
        let length = captures[1].trim().chars().count();
        (DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&length)
    }))
}

pub(super) fn balanced_sentences(text: &str) -> Result<bool, RuleFault> {
    Ok(average_sentence_words(text)?
        .map(|average| average <= MAX_AVERAGE_SENTENCE_WORDS)
        .unwrap_or(false))
}

pub(super) fn several_questions(text: &str) -> Result<bool, RuleFault> {
    Ok(text.matches('?').count() >= MIN_QUESTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prefers_headings_and_strips_markup() {
        let text = "intro line\n# Soil Health Basics for \"Home\" Gardens\nbody";
        let view = ContentView::new(text);
        assert_eq!(
            page_title(&view).expect("title"),
            "Soil Health Basics for Home Gardens"
        );

        let html = "<h1>Composting <em>at</em> home, explained</h1>";
        assert_eq!(
            page_title(&ContentView::new(html)).expect("title"),
            "Composting at home, explained"
        );
    }

    #[test]
    fn title_falls_back_when_too_short() {
        assert_eq!(page_title(&ContentView::new("")).expect("title"), FALLBACK_TITLE);
        assert_eq!(page_title(&ContentView::new("Hi")).expect("title"), FALLBACK_TITLE);
    }

    #[test]
    fn title_is_capped() {
        let long = "word ".repeat(40);
        let title = page_title(&ContentView::new(&long)).expect("title");
        assert!(title.chars().count() <= TITLE_MAX_CHARS);
        assert!(title_length_within(&format!("<title>{title}</title>")).expect("checks"));
    }

    #[test]
    fn summary_always_lands_in_description_range() {
        let rambling = "A very long sentence without an end ".repeat(20);
        for text in ["", "Short.", rambling.as_str()] {
            let summary = page_summary(&ContentView::new(text)).expect("summary");
            let length = summary.chars().count();
            assert!(
                (DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&length),
                "{length} chars for {text:?}"
            );
            assert!(!summary.contains('"'));
        }
    }

    #[test]
    fn keywords_rank_by_frequency_then_alphabet() {
        let view = ContentView::new("mulch mulch compost compost water garden garden garden");
        assert_eq!(
            page_keywords(&view).expect("keywords"),
            "garden, compost, mulch, water"
        );
        assert_eq!(
            page_keywords(&ContentView::new("a b c")).expect("keywords"),
            FALLBACK_KEYWORDS
        );
    }

    #[test]
    fn sentence_balance_requires_some_text() {
        assert!(!balanced_sentences("").expect("checks"));
        assert!(balanced_sentences("Short and clear. Still short.").expect("checks"));
        let rambling = format!("{}.", "word ".repeat(40));
        assert!(!balanced_sentences(&rambling).expect("checks"));
    }

    #[test]
    fn description_length_reads_meta_content() {
        let short = r#"<meta name="description" content="too short">"#;
        assert!(!description_length_within(short).expect("checks"));
        let fits = format!(
            r#"<meta name="description" content="{}">"#,
            "x".repeat(DESCRIPTION_MIN_CHARS)
        );
        assert!(description_length_within(&fits).expect("checks"));
    }
}
