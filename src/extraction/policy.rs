use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_FRAGMENT_WORDS: usize = 12;

/// Decides whether a `(n)` line inside an explanation block is a fragment of
/// the explanation or a genuine new sub-section.
///
/// The thresholds were tuned against a handful of statute PDFs. A short
/// genuine sub-section that starts in lower case is misread as a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationPolicy {
    /// Longest text, in whitespace-separated words, still treated as a fragment.
    pub max_fragment_words: usize,
    /// An uppercase first letter ends the explanation block.
    pub uppercase_start_ends_explanation: bool,
}

impl Default for ExplanationPolicy {
    fn default() -> Self {
        Self {
            max_fragment_words: DEFAULT_MAX_FRAGMENT_WORDS,
            uppercase_start_ends_explanation: true,
        }
    }
}

impl ExplanationPolicy {
    pub fn with_max_fragment_words(mut self, max_fragment_words: usize) -> Self {
        self.max_fragment_words = max_fragment_words;
        self
    }

    pub fn is_fragment(&self, text: &str) -> bool {
        if text.split_whitespace().count() > self.max_fragment_words {
            return false;
        }

        let starts_upper = text
            .chars()
            .next()
            .map(|value| value.is_uppercase())
            .unwrap_or(false);

        !(self.uppercase_start_ends_explanation && starts_upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lowercase_text_is_a_fragment() {
        let policy = ExplanationPolicy::default();
        assert!(policy.is_fragment("short note"));
        assert!(policy.is_fragment(""));
    }

    #[test]
    fn uppercase_or_long_text_ends_the_explanation() {
        let policy = ExplanationPolicy::default();
        assert!(!policy.is_fragment("Short note"));
        assert!(!policy.is_fragment(
            "one two three four five six seven eight nine ten eleven twelve thirteen"
        ));
        assert!(policy.is_fragment(
            "one two three four five six seven eight nine ten eleven twelve"
        ));
    }

    #[test]
    fn thresholds_are_overridable() {
        let policy = ExplanationPolicy {
            uppercase_start_ends_explanation: false,
            ..ExplanationPolicy::default().with_max_fragment_words(3)
        };
        assert!(policy.is_fragment("Capitalised but short"));
        assert!(!policy.is_fragment("four words are here"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let policy: ExplanationPolicy =
            serde_json::from_str(r#"{"max_fragment_words": 20}"#).expect("policy json parses");
        assert_eq!(policy.max_fragment_words, 20);
        assert!(policy.uppercase_start_ends_explanation);
    }
}
