//! Error types surfaced at pattern construction time.

use thiserror::Error;

/// Errors returned while parsing a pattern string.
///
/// These are the only two failures the engine can produce; matching itself
/// never errors (backreferences to unset groups and similar soft failures
/// just make the current path backtrack, per the engine's design).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `[...]` character class was never closed.
    #[error("ParseError: unterminated character class starting at position {position}")]
    UnterminatedClass {
        /// Index (in characters) of the opening `[`.
        position: usize,
    },
    /// A `(` was never closed, or a stray `)` appeared with nothing open.
    #[error("ParseError: unmatched parenthesis at position {position}")]
    UnmatchedParen {
        /// Index (in characters) where the mismatch was detected.
        position: usize,
    },
}
