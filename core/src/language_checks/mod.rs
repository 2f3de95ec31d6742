//! Language conformance checks
//!
//! Heuristic, fingerprint-based validation that a submitted snippet
//! plausibly belongs to the claimed language. Detection is presence-based,
//! not exclusive: a snippet may match several languages' fingerprints, and
//! shared syntax (comments, imports) produces expected false positives.
//! This is a cheap gate against gross mismatches, not a parser.

mod c;
mod java;
mod python;

use std::collections::HashMap;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Languages the validator carries fingerprints for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Java,
    Python,
}

impl Language {
    /// Parse a language tag; `None` for tags outside the supported set.
    pub fn from_tag(tag: &str) -> Option<Language> {
        match tag.to_lowercase().as_str() {
            "c" => Some(Language::C),
            "java" => Some(Language::Java),
            "python" => Some(Language::Python),
            _ => None,
        }
    }

    /// Lowercase wire tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Java => "java",
            Language::Python => "python",
        }
    }

    /// Capitalized name for user-facing messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Java => "Java",
            Language::Python => "Python",
        }
    }

    /// The other languages probed when this one is claimed, in priority
    /// order. The first whose fingerprint matches wins.
    fn probe_order(&self) -> &'static [Language] {
        match self {
            Language::C => &[Language::Python, Language::Java],
            Language::Java => &[Language::Python, Language::C],
            Language::Python => &[Language::C, Language::Java],
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Transient validator output; produced fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Whether the snippet is accepted for the claimed language
    pub valid: bool,
    /// The language the snippet looks like instead, when rejected
    pub detected: Option<Language>,
}

impl Verdict {
    fn accept() -> Self {
        Verdict {
            valid: true,
            detected: None,
        }
    }

    fn reject(detected: Language) -> Self {
        Verdict {
            valid: false,
            detected: Some(detected),
        }
    }
}

/// Ordered set of independent fingerprint predicates for one language.
pub(crate) struct Fingerprint {
    patterns: Vec<Regex>,
}

impl Fingerprint {
    pub(crate) fn compile(patterns: &[&str]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True when any predicate matches the snippet.
    fn matches(&self, code: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(code))
    }
}

/// Fingerprint registry and probe logic for all supported languages.
///
/// Stateless and deterministic; a single instance is safely shared across
/// concurrent requests.
pub struct LanguageValidator {
    fingerprints: HashMap<Language, Fingerprint>,
}

impl LanguageValidator {
    /// Compile the fingerprint registry for all supported languages.
    pub fn new() -> Result<Self> {
        let mut fingerprints = HashMap::new();
        fingerprints.insert(Language::C, c::fingerprint()?);
        fingerprints.insert(Language::Java, java::fingerprint()?);
        fingerprints.insert(Language::Python, python::fingerprint()?);
        Ok(Self { fingerprints })
    }

    /// Check a snippet against the claimed language tag.
    ///
    /// For a supported claimed language, every *other* supported language
    /// is probed in the claimed language's priority order; the first match
    /// rejects the snippet. The claimed language's own fingerprint is never
    /// consulted, so a snippet matching nothing is accepted by default.
    /// Tags outside the supported set probe nothing and are accepted.
    pub fn validate(&self, code: &str, claimed: &str) -> Verdict {
        let language = match Language::from_tag(claimed) {
            Some(language) => language,
            None => return Verdict::accept(),
        };

        for other in language.probe_order() {
            if let Some(fingerprint) = self.fingerprints.get(other) {
                if fingerprint.matches(code) {
                    return Verdict::reject(*other);
                }
            }
        }

        Verdict::accept()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYTHON_SNIPPET: &str = "def foo():\n    print(1)";
    const JAVA_SNIPPET: &str =
        "public class Main {\n    public static void main(String[] args) {\n        System.out.println(1);\n    }\n}";
    const C_SNIPPET: &str =
        "#include <stdio.h>\n\nint main(void) {\n    printf(\"1\\n\");\n    return 0;\n}";

    #[test]
    fn test_python_code_claimed_as_c_is_rejected() {
        let validator = LanguageValidator::new().unwrap();
        let verdict = validator.validate(PYTHON_SNIPPET, "c");
        assert!(!verdict.valid);
        assert_eq!(verdict.detected, Some(Language::Python));
    }

    #[test]
    fn test_every_wrong_language_pair_is_detected() {
        let validator = LanguageValidator::new().unwrap();
        let cases = [
            (PYTHON_SNIPPET, "c", Language::Python),
            (PYTHON_SNIPPET, "java", Language::Python),
            (C_SNIPPET, "python", Language::C),
            (C_SNIPPET, "java", Language::C),
            (JAVA_SNIPPET, "c", Language::Java),
            (JAVA_SNIPPET, "python", Language::Java),
        ];

        for (code, claimed, expected) in cases {
            let verdict = validator.validate(code, claimed);
            assert!(!verdict.valid, "{claimed} claim should be rejected");
            assert_eq!(verdict.detected, Some(expected), "claimed {claimed}");
        }
    }

    #[test]
    fn test_own_fingerprint_is_never_checked() {
        let validator = LanguageValidator::new().unwrap();
        // Pure Java: matches only Java's own fingerprint, so a Java claim
        // passes even though the snippet is unmistakably Java.
        let verdict = validator.validate("String[] args;", "java");
        assert!(verdict.valid);
        assert_eq!(verdict.detected, None);
    }

    #[test]
    fn test_fingerprint_free_code_is_accepted_for_every_claim() {
        let validator = LanguageValidator::new().unwrap();
        let snippet = "x = 1";
        for claimed in ["c", "java", "python"] {
            let verdict = validator.validate(snippet, claimed);
            assert!(verdict.valid, "permissive default failed for {claimed}");
        }
    }

    #[test]
    fn test_unsupported_tag_is_accepted() {
        let validator = LanguageValidator::new().unwrap();
        let verdict = validator.validate(PYTHON_SNIPPET, "rust");
        assert!(verdict.valid);
        assert_eq!(verdict.detected, None);
    }

    #[test]
    fn test_probe_order_for_c_prefers_python() {
        let validator = LanguageValidator::new().unwrap();
        // Matches both Python (import) and Java (import java.) fingerprints;
        // Python is probed first for a C claim.
        let verdict = validator.validate("import java.util.List;", "c");
        assert_eq!(verdict.detected, Some(Language::Python));
    }

    #[test]
    fn test_printf_does_not_trip_the_python_print_pattern() {
        let validator = LanguageValidator::new().unwrap();
        let verdict = validator.validate("printf(\"hello\");", "c");
        assert!(verdict.valid);
    }

    #[test]
    fn test_language_tag_parsing_is_case_insensitive() {
        assert_eq!(Language::from_tag("Python"), Some(Language::Python));
        assert_eq!(Language::from_tag("JAVA"), Some(Language::Java));
        assert_eq!(Language::from_tag("go"), None);
    }
}
