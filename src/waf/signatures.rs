//! The signature set.
//!
//! Built once at startup and shared read-only by every request.
//! Declaration order decides which signature is reported when several match.

use crate::config::WafConfig;
use crate::waf::signature::{LiteralSignature, RegexSignature, Signature};

/// `or 1=1`, `and '2'='2'`, ...
pub const BOOLEAN_TAUTOLOGY: &str = r"\b(or|and)\b\s+'?\d+'?\s*=\s*'?\d+'?";
/// `or '1'='1'`. Subsumed by [`BOOLEAN_TAUTOLOGY`], kept for compatibility.
pub const QUOTED_TAUTOLOGY: &str = r"\b(or|and)\b\s+'1'\s*=\s*'1'";
/// SQL line comment.
pub const LINE_COMMENT: &str = "--";
/// Statement separator followed by `DROP`.
pub const STACKED_DROP: &str = r";\s*drop\b";

/// Ordered, immutable collection of signatures.
#[derive(Debug)]
pub struct SignatureSet {
    signatures: Vec<Box<dyn Signature>>,
}

impl SignatureSet {
    pub fn new(signatures: Vec<Box<dyn Signature>>) -> Self {
        Self { signatures }
    }

    /// The built-in SQL injection signatures.
    pub fn builtin() -> Self {
        let signatures: Vec<Box<dyn Signature>> = vec![
            Box::new(builtin_regex("boolean-tautology", BOOLEAN_TAUTOLOGY)),
            Box::new(builtin_regex("quoted-tautology", QUOTED_TAUTOLOGY)),
            Box::new(LiteralSignature::new("line-comment", LINE_COMMENT)),
            Box::new(builtin_regex("stacked-drop", STACKED_DROP)),
        ];
        Self::new(signatures)
    }

    /// Built-in signatures followed by any configured extras.
    pub fn from_config(config: &WafConfig) -> Result<Self, regex::Error> {
        let mut set = Self::builtin();
        for extra in &config.extra_signatures {
            let sig = RegexSignature::new(extra.name.clone(), &extra.pattern)?;
            set.signatures.push(Box::new(sig));
        }
        Ok(set)
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Signature> {
        self.signatures.iter().map(|s| s.as_ref())
    }

    /// First signature matching the text, if any.
    pub fn first_match(&self, text: &str) -> Option<&dyn Signature> {
        self.iter().find(|sig| sig.matches(text))
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

impl Default for SignatureSet {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_regex(name: &str, pattern: &str) -> RegexSignature {
    RegexSignature::new(name, pattern).expect("built-in signature must compile")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SignatureConfig;

    fn hit(set: &SignatureSet, text: &str) -> Option<String> {
        set.first_match(text).map(|s| s.name().to_string())
    }

    #[test]
    fn test_builtin_order() {
        let set = SignatureSet::builtin();
        let names: Vec<&str> = set.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["boolean-tautology", "quoted-tautology", "line-comment", "stacked-drop"]
        );
    }

    #[test]
    fn test_boolean_tautology() {
        let set = SignatureSet::builtin();
        assert_eq!(hit(&set, "id=1 or 1=1").as_deref(), Some("boolean-tautology"));
        assert_eq!(hit(&set, "x AND 2 = 2").as_deref(), Some("boolean-tautology"));
        assert_eq!(hit(&set, "admin' OR '1'='1'").as_deref(), Some("boolean-tautology"));
        assert_eq!(hit(&set, "name=oregon&x=1=1"), None);
        assert_eq!(hit(&set, "color or flavor"), None);
    }

    #[test]
    fn test_line_comment() {
        let set = SignatureSet::builtin();
        assert_eq!(hit(&set, "q=select+1--").as_deref(), Some("line-comment"));
        assert_eq!(hit(&set, "q=a-b"), None);
    }

    #[test]
    fn test_stacked_drop() {
        let set = SignatureSet::builtin();
        assert_eq!(hit(&set, "1; DROP TABLE users").as_deref(), Some("stacked-drop"));
        assert_eq!(hit(&set, "1;\tdRoP table x").as_deref(), Some("stacked-drop"));
        assert_eq!(hit(&set, "a;b"), None);
        assert_eq!(hit(&set, "drop table"), None);
    }

    #[test]
    fn test_quoted_tautology_alone() {
        let quoted = RegexSignature::new("quoted-tautology", QUOTED_TAUTOLOGY).unwrap();
        assert!(quoted.matches("x' or '1'='1"));
        assert!(quoted.matches("x' AND '1' = '1"));
        assert!(!quoted.matches("x' or '2'='2"));
    }

    #[test]
    fn test_extra_signatures_follow_builtins() {
        let config = WafConfig {
            extra_signatures: vec![SignatureConfig {
                name: "union-select".into(),
                pattern: r"union\s+select".into(),
            }],
        };
        let set = SignatureSet::from_config(&config).unwrap();
        assert_eq!(set.len(), 5);
        assert_eq!(hit(&set, "1 UNION SELECT pw").as_deref(), Some("union-select"));
    }

    #[test]
    fn test_invalid_extra_signature() {
        let config = WafConfig {
            extra_signatures: vec![SignatureConfig {
                name: "broken".into(),
                pattern: "[".into(),
            }],
        };
        assert!(SignatureSet::from_config(&config).is_err());
    }
}
