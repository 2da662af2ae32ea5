//! Content-matching signatures.
//!
//! A signature is a single predicate over raw text. The inspector only
//! depends on the [`Signature`] trait, so new kinds can be added without
//! touching its control flow.

use regex::{Regex, RegexBuilder};

/// Trait for matching raw request text against a known attack fragment.
pub trait Signature: Send + Sync + std::fmt::Debug {
    /// Stable name used in logs and metrics. Never sent to clients.
    fn name(&self) -> &str;

    /// Returns true if the text contains this attack fragment.
    fn matches(&self, text: &str) -> bool;
}

/// Case-insensitive regular expression signature.
#[derive(Debug, Clone)]
pub struct RegexSignature {
    name: String,
    regex: Regex,
}

impl RegexSignature {
    /// Compile a new signature. The pattern always matches case-insensitively.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            name: name.into(),
            regex,
        })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Signature for RegexSignature {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Literal substring signature, ASCII case-insensitive.
#[derive(Debug, Clone)]
pub struct LiteralSignature {
    name: String,
    needle: String,
}

impl LiteralSignature {
    pub fn new(name: impl Into<String>, needle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            needle: needle.into(),
        }
    }
}

impl Signature for LiteralSignature {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, text: &str) -> bool {
        let needle = self.needle.as_bytes();
        if needle.is_empty() {
            return false;
        }
        text.as_bytes()
            .windows(needle.len())
            .any(|window| window.eq_ignore_ascii_case(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_signature_ignores_case() {
        let sig = RegexSignature::new("drop", r";\s*drop\b").unwrap();
        assert!(sig.matches("1; DROP TABLE users"));
        assert!(sig.matches("1;drop table users"));
        assert!(!sig.matches("1; dropped"));
        assert_eq!(sig.name(), "drop");
        assert_eq!(sig.pattern(), r";\s*drop\b");
    }

    #[test]
    fn test_regex_signature_rejects_invalid_pattern() {
        assert!(RegexSignature::new("broken", "(unclosed").is_err());
    }

    #[test]
    fn test_literal_signature() {
        let sig = LiteralSignature::new("comment", "--");
        assert!(sig.matches("select 1--"));
        assert!(sig.matches("--"));
        assert!(!sig.matches("a-b-c"));
        assert!(!sig.matches("-"));
        assert!(!sig.matches(""));

        let word = LiteralSignature::new("word", "Sleep(");
        assert!(word.matches("x=SLEEP(5)"));
    }

    #[test]
    fn test_empty_literal_never_matches() {
        let sig = LiteralSignature::new("empty", "");
        assert!(!sig.matches("anything"));
    }
}
