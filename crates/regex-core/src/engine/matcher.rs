//! Backtracking search engine.
//!
//! Walks a [`Pattern`] against an input's characters using continuation-passing
//! recursion: every `match_*` function takes "the rest of the match" as a
//! continuation closure and returns whether some full match (this node, plus
//! everything the continuation still has to satisfy) was found. This gives
//! the lazy, try-next-alternative-on-demand search that greedy, source-order
//! preference requires, without generators or materializing every candidate
//! up front.
//!
//! Capture save/restore: before trying a speculative branch (an alternative
//! inside a group, or the "skip" arm of `?`), the caller clones the capture
//! vector; if that branch's continuation ultimately fails, the snapshot is
//! restored. Every function here that can fail leaves captures exactly as it
//! found them on a `false` return — this invariant is what lets outer callers
//! skip their own snapshot/restore and rely on the inner ones transitively.

use crate::engine::ast::{Node, Pattern, Quantifier, Sequence};
use crate::engine::class::class_matches;

/// Capture slots, 1-indexed conceptually (`captures[i]` holds group `i+1`).
pub type Captures = Vec<Option<String>>;

/// A continuation: given a cursor position and the live capture state,
/// reports whether the remainder of the match succeeds from there.
type Continuation<'k> = dyn FnMut(usize, &mut Captures) -> bool + 'k;

/// Runs `pattern` against `text`, returning the capture array on the first
/// successful match, or `None` if no starting position matches.
///
/// Honors `anchor_start`/`anchor_end`: an anchored pattern is tried at a
/// single starting position (0, or every position if unanchored) and must
/// consume through the text's end if `anchor_end` is set.
pub fn captures(pattern: &Pattern, text: &str) -> Option<Captures> {
    let chars: Vec<char> = text.chars().collect();
    let starts: Vec<usize> = if pattern.anchor_start {
        vec![0]
    } else {
        (0..=chars.len()).collect()
    };

    for start in starts {
        let mut caps: Captures = vec![None; pattern.group_count];
        let anchor_end = pattern.anchor_end;
        let len = chars.len();
        let mut k = move |pos: usize, _caps: &mut Captures| -> bool { !anchor_end || pos == len };

        if try_alternatives(&pattern.alternatives, &chars, start, &mut caps, &mut k) {
            return Some(caps);
        }
    }
    None
}

/// Tries each alternative in source order at `pos`, restoring `caps` between
/// failed attempts.
fn try_alternatives(
    alternatives: &[Sequence],
    chars: &[char],
    pos: usize,
    caps: &mut Captures,
    k: &mut Continuation,
) -> bool {
    let snapshot = caps.clone();
    for seq in alternatives {
        if match_sequence(seq, chars, pos, caps, k) {
            return true;
        }
        *caps = snapshot.clone();
    }
    false
}

/// Matches a full sequence of quantified nodes, left to right, threading the
/// outer continuation through each step.
fn match_sequence(
    seq: &Sequence,
    chars: &[char],
    pos: usize,
    caps: &mut Captures,
    k: &mut Continuation,
) -> bool {
    match seq.split_first() {
        None => k(pos, caps),
        Some(((node, quantifier), rest)) => {
            let mut continue_with_rest =
                |next_pos: usize, caps: &mut Captures| match_sequence(rest, chars, next_pos, caps, k);
            match_quantified(node, *quantifier, chars, pos, caps, &mut continue_with_rest)
        }
    }
}

/// Dispatches a single quantified node (atom or group) to its matcher.
fn match_quantified(
    node: &Node,
    quantifier: Quantifier,
    chars: &[char],
    pos: usize,
    caps: &mut Captures,
    k: &mut Continuation,
) -> bool {
    if let Node::Group { alternatives, index } = node {
        return match quantifier {
            Quantifier::None => match_group_once(alternatives, *index, chars, pos, caps, k),
            Quantifier::Question => match_group_question(alternatives, *index, chars, pos, caps, k),
            Quantifier::Plus => match_group_repeat(alternatives, *index, chars, pos, caps, 1, k),
            Quantifier::Star => match_group_repeat(alternatives, *index, chars, pos, caps, 0, k),
        };
    }

    match quantifier {
        Quantifier::None => match_atom_once(node, chars, pos, caps, k),
        Quantifier::Question => match_atom_question(node, chars, pos, caps, k),
        Quantifier::Plus => match_atom_repeat(node, chars, pos, caps, 1, k),
        Quantifier::Star => match_atom_repeat(node, chars, pos, caps, 0, k),
    }
}

// ---- atoms ---------------------------------------------------------------

/// Whether `node` (a non-`Group` node) matches the single character `c`.
/// `Backref` is handled separately since it matches a whole substring, not
/// one character; this is reached only for the other variants.
fn atom_char_matches(node: &Node, c: char) -> bool {
    match node {
        Node::Literal(lit) => *lit == c,
        Node::Wildcard => true,
        Node::EscapeDigit => c.is_ascii_digit(),
        Node::EscapeWord => c.is_ascii_alphanumeric() || c == '_',
        Node::Class { body, negated } => class_matches(body, *negated, c),
        Node::Backref(_) | Node::Group { .. } => {
            unreachable!("backreferences and groups are matched by their own functions")
        }
    }
}

fn match_atom_once(
    node: &Node,
    chars: &[char],
    pos: usize,
    caps: &mut Captures,
    k: &mut Continuation,
) -> bool {
    if let Node::Backref(index) = node {
        return match_backref(*index, chars, pos, caps, k);
    }
    match chars.get(pos) {
        Some(&c) if atom_char_matches(node, c) => k(pos + 1, caps),
        _ => false,
    }
}

fn match_atom_question(
    node: &Node,
    chars: &[char],
    pos: usize,
    caps: &mut Captures,
    k: &mut Continuation,
) -> bool {
    if match_atom_once(node, chars, pos, caps, k) {
        return true;
    }
    k(pos, caps)
}

/// `min` is 0 for `*`, 1 for `+`. Greedy: always tries to extend before
/// trying to stop, which yields longest-match-first backtracking order.
fn match_atom_repeat(
    node: &Node,
    chars: &[char],
    pos: usize,
    caps: &mut Captures,
    min: usize,
    k: &mut Continuation,
) -> bool {
    if let Some(step) = atom_step_at(node, chars, pos, caps) {
        if step > 0 && match_atom_repeat(node, chars, pos + step, caps, min.saturating_sub(1), k) {
            return true;
        }
    }
    if min == 0 {
        k(pos, caps)
    } else {
        false
    }
}

/// If `node` matches at `pos`, the number of characters it consumes there
/// (1 for ordinary atoms, the captured length for a backreference).
/// `None` if it doesn't match at `pos` at all.
fn atom_step_at(node: &Node, chars: &[char], pos: usize, caps: &Captures) -> Option<usize> {
    match node {
        Node::Backref(index) => {
            backref_matches_at(*index, chars, pos, caps).then(|| {
                caps[index - 1].as_ref().unwrap().chars().count()
            })
        }
        other => chars.get(pos).filter(|&&c| atom_char_matches(other, c)).map(|_| 1),
    }
}

// ---- backreferences --------------------------------------------------

/// Whether the text captured by group `index` occurs at `pos`. An
/// unassigned group never matches (the branch simply fails to backtrack).
fn backref_matches_at(index: usize, chars: &[char], pos: usize, caps: &Captures) -> bool {
    let Some(captured) = index.checked_sub(1).and_then(|i| caps.get(i)).and_then(|c| c.as_ref())
    else {
        return false;
    };
    let captured_chars: Vec<char> = captured.chars().collect();
    let end = pos + captured_chars.len();
    end <= chars.len() && chars[pos..end] == captured_chars[..]
}

fn match_backref(
    index: usize,
    chars: &[char],
    pos: usize,
    caps: &mut Captures,
    k: &mut Continuation,
) -> bool {
    if !backref_matches_at(index, chars, pos, caps) {
        return false;
    }
    let len = caps[index - 1].as_ref().unwrap().chars().count();
    k(pos + len, caps)
}

// ---- groups ---------------------------------------------------------------

/// Tries each alternative of a group once, assigning the captured substring
/// to `captures[index - 1]` before invoking the outer continuation. Restores
/// the capture snapshot between failed alternatives.
fn match_group_once(
    alternatives: &[Sequence],
    index: usize,
    chars: &[char],
    pos: usize,
    caps: &mut Captures,
    k: &mut Continuation,
) -> bool {
    let snapshot = caps.clone();
    for seq in alternatives {
        let mut assign_then_continue = |end_pos: usize, caps: &mut Captures| -> bool {
            let text: String = chars[pos..end_pos].iter().collect();
            caps[index - 1] = Some(text);
            k(end_pos, caps)
        };
        if match_sequence(seq, chars, pos, caps, &mut assign_then_continue) {
            return true;
        }
        *caps = snapshot.clone();
    }
    false
}

fn match_group_question(
    alternatives: &[Sequence],
    index: usize,
    chars: &[char],
    pos: usize,
    caps: &mut Captures,
    k: &mut Continuation,
) -> bool {
    if match_group_once(alternatives, index, chars, pos, caps, k) {
        return true;
    }
    k(pos, caps)
}

/// `min` is 0 for `*`, 1 for `+`. Each additional iteration re-tries
/// `match_group_once`, which re-assigns the capture slot to that
/// iteration's text on success — so the last iteration's text wins for
/// repeated groups. Stops extending once an iteration consumes zero
/// characters, to avoid looping forever on an empty-capturing group.
fn match_group_repeat(
    alternatives: &[Sequence],
    index: usize,
    chars: &[char],
    pos: usize,
    caps: &mut Captures,
    min: usize,
    k: &mut Continuation,
) -> bool {
    let mut extend = |end_pos: usize, caps: &mut Captures| -> bool {
        if end_pos == pos {
            return k(end_pos, caps);
        }
        match_group_repeat(alternatives, index, chars, end_pos, caps, min.saturating_sub(1), k)
    };
    if match_group_once(alternatives, index, chars, pos, caps, &mut extend) {
        return true;
    }
    if min == 0 {
        k(pos, caps)
    } else {
        false
    }
}
