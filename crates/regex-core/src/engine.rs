//! Core pieces of the regex engine: parser, AST, character classes, and the
//! backtracking matcher. Wired together behind [`crate::Regex`].
pub(crate) mod ast;
pub(crate) mod class;
pub(crate) mod matcher;
pub(crate) mod parser;

pub(crate) use ast::Pattern;
pub(crate) use matcher::Captures;

use crate::error::ParseError;

/// Parses `pattern` into its compiled tree.
pub(crate) fn compile(pattern: &str) -> Result<Pattern, ParseError> {
    parser::parse(pattern)
}

/// Runs a compiled pattern against `text`, returning the capture array on
/// the first successful match.
pub(crate) fn match_captures(pattern: &Pattern, text: &str) -> Option<Captures> {
    matcher::captures(pattern, text)
}
