//! AST definitions for the regex engine.
//!
//! A parsed pattern is a [`Pattern`]: a set of top-level alternatives plus the
//! two anchor flags, built from [`Node`]s. Each node in a [`Sequence`] carries
//! its own [`Quantifier`]; groups carry their own list of alternatives and a
//! fixed 1-based capture index, assigned left-to-right at parse time.

/// Quantifier attached to an atom or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// No quantifier: match exactly once.
    None,
    /// `?`: zero or one, greedy toward one.
    Question,
    /// `+`: one or more, greedy.
    Plus,
    /// `*`: zero or more, greedy.
    Star,
}

/// A single node in the expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Matches exactly one character.
    Literal(char),
    /// `.` — matches any one character, including `\n`.
    Wildcard,
    /// `\d` — matches one decimal digit.
    EscapeDigit,
    /// `\w` — matches one letter, digit, or `_`.
    EscapeWord,
    /// `[...]` — a character class. `body` is the verbatim text between the
    /// brackets; range semantics are evaluated at match time, not here.
    Class {
        /// Raw class body, exactly as it appeared between `[` and `]`.
        body: String,
        /// Whether the class was negated (`[^...]`).
        negated: bool,
    },
    /// `\1`..`\9` — matches the text captured by a prior group.
    Backref(usize),
    /// `(...)` — a capturing group; `index` is 1-based and assigned
    /// left-to-right over unescaped `(` during parsing.
    Group {
        /// Alternatives inside the group, tried in source order.
        alternatives: Vec<Sequence>,
        /// 1-based capture slot this group writes to.
        index: usize,
    },
}

/// An ordered list of quantified nodes — one branch of an alternation.
pub type Sequence = Vec<(Node, Quantifier)>;

/// A fully parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Top-level alternatives (unparenthesized `|` at the outermost level).
    pub alternatives: Vec<Sequence>,
    /// Leading `^`.
    pub anchor_start: bool,
    /// Trailing `$`.
    pub anchor_end: bool,
    /// Number of capturing groups in the pattern.
    pub group_count: usize,
}
