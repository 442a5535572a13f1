//! A small backtracking regex engine: literals, `.`, `\d`/`\w`, character
//! classes, `?`/`+`/`*` quantifiers, alternation, capturing groups, and
//! backreferences.
//!
//! ```
//! use regex_core::Regex;
//!
//! let re = Regex::new(r"(cat|dog)s?").unwrap();
//! assert!(re.is_match("I have two dogs"));
//! assert_eq!(re.captures("dogs").unwrap()[0].as_deref(), Some("dog"));
//! ```

mod engine;
pub mod error;

use error::ParseError;

/// A compiled pattern.
pub struct Regex {
    pattern: engine::Pattern,
}

impl Regex {
    /// Parses `pattern`, returning a [`ParseError`] if it is malformed.
    pub fn new(pattern: &str) -> Result<Self, ParseError> {
        let pattern = engine::compile(pattern)?;
        Ok(Self { pattern })
    }

    /// Whether `text` contains a match anywhere (or, for an anchored
    /// pattern, at the anchored position(s)).
    pub fn is_match(&self, text: &str) -> bool {
        self.captures(text).is_some()
    }

    /// Finds the first match and returns its capture groups, 0-indexed by
    /// `(group number - 1)`. `None` if no group participated in the match,
    /// `Some(None)` slots for groups that did not participate even though
    /// the overall pattern matched (e.g. the untaken side of an
    /// alternation). Returns `None` overall if there is no match at all.
    pub fn captures(&self, text: &str) -> Option<Vec<Option<String>>> {
        engine::match_captures(&self.pattern, text)
    }
}
