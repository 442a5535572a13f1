//! Parses a pattern string into a [`Pattern`].
//!
//! The grammar:
//!
//! ```text
//! pattern     := '^'? alternatives '$'?
//! alternatives:= sequence ('|' sequence)*
//! sequence    := (atom | group) quantifier? *
//! atom        := '.' | '\' digit | '\d' | '\w' | '\' any | '[' class_body ']' | any
//! group       := '(' alternatives ')'
//! quantifier  := '?' | '+' | '*'
//! ```
//!
//! `^`/`$` are stripped once, from the raw pattern, before the recursive
//! descent begins; inside a group they are ordinary literal characters.

use crate::engine::ast::{Node, Pattern, Quantifier, Sequence};
use crate::error::ParseError;

/// Parses `pattern` into its compiled tree.
pub fn parse(pattern: &str) -> Result<Pattern, ParseError> {
    let raw: Vec<char> = pattern.chars().collect();
    let (core, anchor_start, anchor_end) = strip_anchors(&raw);

    let mut parser = Parser {
        chars: core,
        pos: 0,
        next_group_index: 0,
    };
    let alternatives = parser.parse_alternatives()?;

    if parser.pos != core.len() {
        // A ')' was left over with nothing open to close.
        return Err(ParseError::UnmatchedParen {
            position: parser.pos,
        });
    }

    Ok(Pattern {
        alternatives,
        anchor_start,
        anchor_end,
        group_count: parser.next_group_index,
    })
}

/// Splits off a leading `^` and a trailing, unescaped `$`.
///
/// Returns the core slice (with anchors removed) plus the two anchor flags.
fn strip_anchors(chars: &[char]) -> (&[char], bool, bool) {
    let len = chars.len();

    let anchor_start = len > 0 && chars[0] == '^';
    let start = if anchor_start { 1 } else { 0 };

    let anchor_end = len > start && chars[len - 1] == '$' && !is_escaped(chars, len - 1);
    let end = if anchor_end { len - 1 } else { len };

    (&chars[start..end.max(start)], anchor_start, anchor_end)
}

/// Whether `chars[idx]` is preceded by an odd run of backslashes (and so is
/// itself an escaped character rather than a bare one).
fn is_escaped(chars: &[char], idx: usize) -> bool {
    let mut count = 0;
    let mut i = idx;
    while i > 0 && chars[i - 1] == '\\' {
        count += 1;
        i -= 1;
    }
    count % 2 == 1
}

struct Parser<'a> {
    chars: &'a [char],
    pos: usize,
    next_group_index: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// `sequence ('|' sequence)*`.
    fn parse_alternatives(&mut self) -> Result<Vec<Sequence>, ParseError> {
        let mut alternatives = vec![self.parse_sequence()?];
        while self.peek() == Some('|') {
            self.advance();
            alternatives.push(self.parse_sequence()?);
        }
        Ok(alternatives)
    }

    /// A run of quantified atoms/groups, stopping at `|`, `)`, or end of input.
    fn parse_sequence(&mut self) -> Result<Sequence, ParseError> {
        let mut seq = Sequence::new();
        loop {
            match self.peek() {
                None | Some('|') | Some(')') => break,
                Some('(') => {
                    self.advance();
                    self.next_group_index += 1;
                    let index = self.next_group_index;
                    let alternatives = self.parse_alternatives()?;
                    match self.advance() {
                        Some(')') => {}
                        _ => {
                            return Err(ParseError::UnmatchedParen { position: self.pos });
                        }
                    }
                    let node = Node::Group { alternatives, index };
                    let quantifier = self.parse_quantifier();
                    seq.push((node, quantifier));
                }
                Some(_) => {
                    let node = self.parse_atom()?;
                    let quantifier = self.parse_quantifier();
                    seq.push((node, quantifier));
                }
            }
        }
        Ok(seq)
    }

    /// Consumes a trailing `?`/`+`/`*`, if present.
    fn parse_quantifier(&mut self) -> Quantifier {
        match self.peek() {
            Some('?') => {
                self.advance();
                Quantifier::Question
            }
            Some('+') => {
                self.advance();
                Quantifier::Plus
            }
            Some('*') => {
                self.advance();
                Quantifier::Star
            }
            _ => Quantifier::None,
        }
    }

    /// A single non-group atom: literal, wildcard, escape, or class.
    fn parse_atom(&mut self) -> Result<Node, ParseError> {
        let c = self.advance().expect("caller already peeked Some");
        match c {
            '.' => Ok(Node::Wildcard),
            '[' => self.parse_class(),
            '\\' => match self.advance() {
                Some(d) if d.is_ascii_digit() && d != '0' => {
                    Ok(Node::Backref(d.to_digit(10).unwrap() as usize))
                }
                Some('d') => Ok(Node::EscapeDigit),
                Some('w') => Ok(Node::EscapeWord),
                Some(other) => Ok(Node::Literal(other)),
                None => Ok(Node::Literal('\\')),
            },
            _ => Ok(Node::Literal(c)),
        }
    }

    /// `[...]`, called with `pos` just past the opening `[`.
    fn parse_class(&mut self) -> Result<Node, ParseError> {
        let class_start = self.pos - 1;

        let negated = if self.peek() == Some('^') {
            self.advance();
            true
        } else {
            false
        };

        let mut body = String::new();
        loop {
            match self.advance() {
                Some(']') => return Ok(Node::Class { body, negated }),
                Some(c) => body.push(c),
                None => {
                    return Err(ParseError::UnterminatedClass {
                        position: class_start,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(c: char) -> (Node, Quantifier) {
        (Node::Literal(c), Quantifier::None)
    }

    #[test]
    fn test_parse_literal_sequence() {
        let pattern = parse("abc").unwrap();
        assert_eq!(pattern.alternatives, vec![vec![lit('a'), lit('b'), lit('c')]]);
        assert!(!pattern.anchor_start);
        assert!(!pattern.anchor_end);
        assert_eq!(pattern.group_count, 0);
    }

    #[test]
    fn test_parse_anchors() {
        let pattern = parse("^cat$").unwrap();
        assert!(pattern.anchor_start);
        assert!(pattern.anchor_end);
        assert_eq!(pattern.alternatives, vec![vec![lit('c'), lit('a'), lit('t')]]);
    }

    #[test]
    fn test_parse_wildcard_and_quantifiers() {
        let pattern = parse("a?b+c*.").unwrap();
        assert_eq!(
            pattern.alternatives,
            vec![vec![
                (Node::Literal('a'), Quantifier::Question),
                (Node::Literal('b'), Quantifier::Plus),
                (Node::Literal('c'), Quantifier::Star),
                (Node::Wildcard, Quantifier::None),
            ]]
        );
    }

    #[test]
    fn test_parse_escape_digit_and_word() {
        let pattern = parse("\\d\\w").unwrap();
        assert_eq!(
            pattern.alternatives,
            vec![vec![
                (Node::EscapeDigit, Quantifier::None),
                (Node::EscapeWord, Quantifier::None),
            ]]
        );
    }

    #[test]
    fn test_parse_backreference() {
        let pattern = parse("(a)\\1").unwrap();
        assert_eq!(pattern.group_count, 1);
        match &pattern.alternatives[0][1] {
            (Node::Backref(1), Quantifier::None) => {}
            other => panic!("expected Backref(1), got {other:?}"),
        }
    }

    #[test]
    fn test_backref_digit_is_single_character() {
        // \10 parses as group 1 followed by literal '0'.
        let pattern = parse("(a)\\10").unwrap();
        assert_eq!(
            pattern.alternatives[0][1..],
            vec![(Node::Backref(1), Quantifier::None), lit('0')]
        );
    }

    #[test]
    fn test_parse_class_negated_and_range() {
        let pattern = parse("[^a-z0-9]").unwrap();
        match &pattern.alternatives[0][0] {
            (Node::Class { body, negated }, Quantifier::None) => {
                assert_eq!(body, "a-z0-9");
                assert!(negated);
            }
            other => panic!("expected Class, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_unterminated_class_is_error() {
        let err = parse("[abc").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedClass { position: 0 });
    }

    #[test]
    fn test_parse_unmatched_open_paren_is_error() {
        let err = parse("(ab").unwrap_err();
        assert!(matches!(err, ParseError::UnmatchedParen { .. }));
    }

    #[test]
    fn test_parse_unmatched_close_paren_is_error() {
        let err = parse("ab)").unwrap_err();
        assert!(matches!(err, ParseError::UnmatchedParen { .. }));
    }

    #[test]
    fn test_parse_alternation_and_group_indices() {
        let pattern = parse("(cat|dog)s?").unwrap();
        assert_eq!(pattern.group_count, 1);
        match &pattern.alternatives[0][0] {
            (Node::Group { alternatives, index }, Quantifier::None) => {
                assert_eq!(*index, 1);
                assert_eq!(alternatives.len(), 2);
            }
            other => panic!("expected Group, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_group_indices_assigned_left_to_right() {
        // Group indices follow the order unescaped '(' appear, regardless of nesting.
        let pattern = parse("((a)(b))").unwrap();
        assert_eq!(pattern.group_count, 3);
        match &pattern.alternatives[0][0] {
            (Node::Group { alternatives, index: 1 }, _) => {
                let inner = &alternatives[0];
                match &inner[0] {
                    (Node::Group { index: 2, .. }, _) => {}
                    other => panic!("expected Group(2), got {other:?}"),
                }
                match &inner[1] {
                    (Node::Group { index: 3, .. }, _) => {}
                    other => panic!("expected Group(3), got {other:?}"),
                }
            }
            other => panic!("expected Group(1), got {other:?}"),
        }
    }

    #[test]
    fn test_empty_alternative_is_allowed() {
        // "(|a)" has an empty first alternative.
        let pattern = parse("(|a)").unwrap();
        match &pattern.alternatives[0][0] {
            (Node::Group { alternatives, .. }, _) => {
                assert_eq!(alternatives[0], Vec::new());
                assert_eq!(alternatives[1], vec![lit('a')]);
            }
            other => panic!("expected Group, got {other:?}"),
        }
    }

    #[test]
    fn test_anchor_inside_group_is_literal() {
        let pattern = parse("(^a)").unwrap();
        match &pattern.alternatives[0][0] {
            (Node::Group { alternatives, .. }, _) => {
                assert_eq!(alternatives[0], vec![lit('^'), lit('a')]);
            }
            other => panic!("expected Group, got {other:?}"),
        }
        assert!(!pattern.anchor_start);
    }

    #[test]
    fn test_escaped_dollar_is_not_an_anchor() {
        let pattern = parse("a\\$").unwrap();
        assert!(!pattern.anchor_end);
        assert_eq!(pattern.alternatives[0], vec![lit('a'), lit('$')]);
    }

    #[test]
    fn test_dollar_alone_is_end_anchor_on_empty_body() {
        let pattern = parse("$").unwrap();
        assert!(pattern.anchor_end);
        assert_eq!(pattern.alternatives, vec![Sequence::new()]);
    }

    #[test]
    fn test_empty_class_body() {
        let pattern = parse("[]").unwrap();
        match &pattern.alternatives[0][0] {
            (Node::Class { body, negated }, _) => {
                assert_eq!(body, "");
                assert!(!negated);
            }
            other => panic!("expected Class, got {other:?}"),
        }
    }
}
