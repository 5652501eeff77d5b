use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Fault raised by a predicate or fragment generator. Never used for "rule not satisfied".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RuleFault {
    message: String,
}

impl RuleFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type PredicateFn = fn(&str) -> Result<bool, RuleFault>;

/// Declarative predicate over a text scope.
///
/// Substring needles are matched against the lowercased scope and must themselves be
/// lowercase. Patterns run against the original text and are compiled once when the
/// catalog is built.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    Contains(&'static str),
    ContainsAny(&'static [&'static str]),
    ContainsAll(&'static [&'static str]),
    Pattern(&'static str),
    MinWords(usize),
    MinParagraphs(usize),
    Custom(PredicateFn),
}

impl Check {
    pub(crate) fn needles(&self) -> &[&'static str] {
        match self {
            Check::Contains(needle) => std::slice::from_ref(needle),
            Check::ContainsAny(needles) | Check::ContainsAll(needles) => needles,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Predicate {
    Contains(&'static str),
    ContainsAny(&'static [&'static str]),
    ContainsAll(&'static [&'static str]),
    Pattern(Regex),
    MinWords(usize),
    MinParagraphs(usize),
    Custom(PredicateFn),
}

impl Predicate {
    pub(crate) fn compile(check: Check) -> Result<Self, regex::Error> {
        Ok(match check {
            Check::Contains(needle) => Self::Contains(needle),
            Check::ContainsAny(needles) => Self::ContainsAny(needles),
            Check::ContainsAll(needles) => Self::ContainsAll(needles),
            Check::Pattern(pattern) => Self::Pattern(Regex::new(pattern)?),
            Check::MinWords(min) => Self::MinWords(min),
            Check::MinParagraphs(min) => Self::MinParagraphs(min),
            Check::Custom(predicate) => Self::Custom(predicate),
        })
    }

    /// `lower` must be `text.to_lowercase()`.
    pub(crate) fn test(&self, text: &str, lower: &str) -> Result<bool, RuleFault> {
        match self {
            Self::Contains(needle) => Ok(lower.contains(needle)),
            Self::ContainsAny(needles) => Ok(needles.iter().any(|needle| lower.contains(needle))),
            Self::ContainsAll(needles) => Ok(needles.iter().all(|needle| lower.contains(needle))),
            Self::Pattern(regex) => Ok(regex.is_match(text)),
            Self::MinWords(min) => Ok(word_count(text)? >= *min),
            Self::MinParagraphs(min) => Ok(paragraph_count(text)? >= *min),
            Self::Custom(predicate) => predicate(text),
        }
    }
}

static MARKUP: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"<[^>]*>"));

fn markup() -> Result<&'static Regex, RuleFault> {
    MARKUP
        .as_ref()
        .map_err(|err| RuleFault::new(format!("markup pattern failed to compile: {err}")))
}

/// Text with markup tags replaced by spaces. Line structure is preserved.
pub fn plain_text(text: &str) -> Result<Cow<'_, str>, RuleFault> {
    Ok(markup()?.replace_all(text, " "))
}

fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

pub fn word_count(text: &str) -> Result<usize, RuleFault> {
    Ok(plain_text(text)?
        .split_whitespace()
        .filter(|token| is_word(token))
        .count())
}

/// Larger of blank-line separated blocks and `<p>` elements.
pub fn paragraph_count(text: &str) -> Result<usize, RuleFault> {
    let plain = plain_text(text)?;
    let mut blocks = 0;
    let mut in_block = false;
    for line in plain.lines() {
        if line.split_whitespace().any(is_word) {
            if !in_block {
                blocks += 1;
                in_block = true;
            }
        } else {
            in_block = false;
        }
    }

    let lower = text.to_ascii_lowercase();
    let tagged = lower.matches("<p>").count() + lower.matches("<p ").count();

    Ok(blocks.max(tagged))
}

/// Mean words per sentence, or `None` when the text has no sentences.
pub fn average_sentence_words(text: &str) -> Result<Option<f64>, RuleFault> {
    let plain = plain_text(text)?;
    let lengths: Vec<usize> = plain
        .split(['.', '!', '?'])
        .map(|sentence| sentence.split_whitespace().filter(|token| is_word(token)).count())
        .filter(|words| *words > 0)
        .collect();

    if lengths.is_empty() {
        return Ok(None);
    }

    let total: usize = lengths.iter().sum();
    Ok(Some(total as f64 / lengths.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_checks_use_lowercase_scope() {
        let predicate = Predicate::compile(Check::Contains("og:title")).expect("compiles");
        let text = r#"<meta property="OG:Title" content="x">"#;
        assert!(predicate
            .test(text, &text.to_lowercase())
            .expect("no fault"));
    }

    #[test]
    fn contains_all_requires_every_needle() {
        let predicate =
            Predicate::compile(Check::ContainsAll(&["alpha", "beta"])).expect("compiles");
        assert!(!predicate.test("alpha", "alpha").expect("no fault"));
        assert!(predicate.test("beta alpha", "beta alpha").expect("no fault"));
    }

    #[test]
    fn invalid_pattern_fails_to_compile() {
        assert!(Predicate::compile(Check::Pattern("(unclosed")).is_err());
    }

    #[test]
    fn custom_faults_surface_unchanged() {
        fn broken(_: &str) -> Result<bool, RuleFault> {
            Err(RuleFault::new("boom"))
        }
        let predicate = Predicate::compile(Check::Custom(broken)).expect("compiles");
        assert_eq!(
            predicate.test("", "").expect_err("fault"),
            RuleFault::new("boom")
        );
    }

    #[test]
    fn word_count_ignores_markup_and_punctuation() {
        assert_eq!(word_count("<p>Two words</p> -- !").expect("counts"), 2);
        assert_eq!(word_count("").expect("counts"), 0);
    }

    #[test]
    fn paragraphs_from_blank_lines_or_tags() {
        assert_eq!(paragraph_count("one\n\ntwo\n \nthree").expect("counts"), 3);
        assert_eq!(
            paragraph_count("<p>one</p><p>two</p>").expect("counts"),
            2
        );
        assert_eq!(paragraph_count("").expect("counts"), 0);
    }

    #[test]
    fn sentence_average_handles_empty_text() {
        assert_eq!(average_sentence_words("").expect("computes"), None);
        let average = average_sentence_words("One two three. Four five!")
            .expect("computes")
            .expect("has sentences");
        assert!((average - 2.5).abs() < f64::EPSILON);
    }
}
