//! Java-specific fingerprint patterns

use anyhow::Result;

use super::Fingerprint;

/// Lexical markers strongly indicative of Java source: class visibility
/// modifiers, the console-print idiom, array-type syntax, and imports from
/// the `java.` namespace.
pub(crate) fn fingerprint() -> Result<Fingerprint> {
    Fingerprint::compile(&[
        r"public\s+class",
        r"private\s+class",
        r"System\.out\.println",
        r"public\s+static\s+void\s+main",
        r"String\[\]",
        r"import\s+java\.",
    ])
}
