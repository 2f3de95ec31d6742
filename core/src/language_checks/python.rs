//! Python-specific fingerprint patterns

use anyhow::Result;

use super::Fingerprint;

/// Lexical markers strongly indicative of Python source: definition and
/// import keywords, print calls, colon-terminated block headers, and the
/// hash comment marker.
pub(crate) fn fingerprint() -> Result<Fingerprint> {
    Fingerprint::compile(&[
        r"def\s+",
        r"import\s+",
        r"from\s+.*import",
        r"print\(",
        r"if\s+.*:",
        r"elif\s+",
        r"else:",
        r"for\s+.*in\s+.*:",
        r"#\s+",
    ])
}
