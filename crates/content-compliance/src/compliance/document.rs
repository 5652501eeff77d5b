use serde::Serialize;

use super::catalog::MARKER_PREFIX;

const DEFAULT_MAX_CONTENT_BYTES: usize = 1024 * 1024;

/// Input bounds enforced before a buffer is handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentLimits {
    pub max_bytes: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_CONTENT_BYTES,
        }
    }
}

/// Rejections raised before evaluation begins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("content must not be empty")]
    Empty,
    #[error("content is {actual} bytes, exceeding the {max} byte limit")]
    TooLarge { max: usize, actual: usize },
}

/// Text buffer owned by a single optimization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDocument {
    text: String,
}

impl ContentDocument {
    pub fn parse(text: impl Into<String>, limits: ContentLimits) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::Empty);
        }
        if text.len() > limits.max_bytes {
            return Err(ValidationError::TooLarge {
                max: limits.max_bytes,
                actual: text.len(),
            });
        }
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Read-only projection of a buffer used by predicates and fragment generators.
///
/// "Authored" text is the buffer with every remediation line removed, so checks that must
/// be satisfied by the writer cannot be satisfied by inserted boilerplate.
#[derive(Debug)]
pub struct ContentView<'a> {
    text: &'a str,
    lower: String,
    authored: String,
    authored_lower: String,
}

impl<'a> ContentView<'a> {
    pub fn new(text: &'a str) -> Self {
        let authored = text
            .lines()
            .filter(|line| !line.contains(MARKER_PREFIX))
            .collect::<Vec<_>>()
            .join("\n");
        let authored_lower = authored.to_lowercase();

        Self {
            text,
            lower: text.to_lowercase(),
            authored,
            authored_lower,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn authored(&self) -> &str {
        &self.authored
    }

    pub fn authored_lower(&self) -> &str {
        &self.authored_lower
    }

    pub fn contains_marker(&self, marker: &str) -> bool {
        self.text.contains(marker)
    }
}
