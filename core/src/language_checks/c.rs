//! C-specific fingerprint patterns

use anyhow::Result;

use super::Fingerprint;

/// Lexical markers strongly indicative of C source: angle-bracket include
/// directives, console I/O calls, and pointer/char-array syntax.
pub(crate) fn fingerprint() -> Result<Fingerprint> {
    Fingerprint::compile(&[
        r"#include\s+<",
        r"printf\(",
        r"int\s+main\s*\(",
        r"scanf\(",
        r"const\s+char",
        r"char\s+\*",
    ])
}
