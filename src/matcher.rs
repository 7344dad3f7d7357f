use std::collections::HashSet;

use crate::ast::{is_word_char, RegexNode, RepeatKind};

// Return all possible end positions after matching `node` at `pos`, in the
// order a backtracking matcher would try them.
pub fn match_forward(node: &RegexNode, input: &[char], pos: usize) -> Vec<usize> {
    match node {
        RegexNode::Seq(nodes) => {
            let mut positions = vec![pos];
            for n in nodes {
                let mut next_positions = Ends::default();
                for p in positions {
                    next_positions.extend(match_forward(n, input, p));
                }
                if next_positions.is_empty() {
                    return Vec::new();
                }
                positions = next_positions.into_vec();
            }
            positions
        }
        RegexNode::Alt(branches) => {
            let mut all_positions = Ends::default();
            for br in branches {
                all_positions.extend(match_forward(br, input, pos));
            }
            all_positions.into_vec()
        }
        RegexNode::Group(inner) => match_forward(inner, input, pos),
        RegexNode::Repeat { node: inner, kind } => {
            repeat(*kind, pos, &|p: usize| match_forward(inner, input, p))
        }
        _ if is_zero_width(node) => {
            if assertion_holds(node, input, pos) { vec![pos] } else { vec![] }
        }
        _ => {
            if pos < input.len() && char_matches(node, input[pos]) { vec![pos + 1] } else { vec![] }
        }
    }
}

// Mirror of `match_forward`: return all possible start positions of a match of
// `node` that ends at `end`, scanning right to left. Zero-width assertions are
// still tested at the position itself.
pub fn match_backward(node: &RegexNode, input: &[char], end: usize) -> Vec<usize> {
    match node {
        RegexNode::Seq(nodes) => {
            let mut positions = vec![end];
            for n in nodes.iter().rev() {
                let mut next_positions = Ends::default();
                for p in positions {
                    next_positions.extend(match_backward(n, input, p));
                }
                if next_positions.is_empty() {
                    return Vec::new();
                }
                positions = next_positions.into_vec();
            }
            positions
        }
        RegexNode::Alt(branches) => {
            let mut all_positions = Ends::default();
            for br in branches {
                all_positions.extend(match_backward(br, input, end));
            }
            all_positions.into_vec()
        }
        RegexNode::Group(inner) => match_backward(inner, input, end),
        RegexNode::Repeat { node: inner, kind } => {
            repeat(*kind, end, &|p: usize| match_backward(inner, input, p))
        }
        _ if is_zero_width(node) => {
            if assertion_holds(node, input, end) { vec![end] } else { vec![] }
        }
        _ => {
            if end > 0 && char_matches(node, input[end - 1]) { vec![end - 1] } else { vec![] }
        }
    }
}

// Positions in first-seen order, without repeats.
#[derive(Default)]
struct Ends {
    order: Vec<usize>,
    seen: HashSet<usize>,
}

impl Ends {
    fn push(&mut self, p: usize) {
        if self.seen.insert(p) {
            self.order.push(p);
        }
    }

    fn extend(&mut self, from: impl IntoIterator<Item = usize>) {
        for p in from {
            self.push(p);
        }
    }

    fn contains(&self, p: usize) -> bool {
        self.seen.contains(&p)
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn into_vec(self) -> Vec<usize> {
        self.order
    }
}

// Greedy repetition in either direction; `step` runs one iteration of the body.
fn repeat(kind: RepeatKind, pos: usize, step: &dyn Fn(usize) -> Vec<usize>) -> Vec<usize> {
    let mut results = Ends::default();
    match kind {
        RepeatKind::ZeroOrOne => {
            results.extend(step(pos));
            results.push(pos);
        }
        RepeatKind::ZeroOrMore => star(pos, step, &mut results),
        RepeatKind::OneOrMore => {
            for p in step(pos) {
                star(p, step, &mut results);
            }
        }
    }
    results.into_vec()
}

// Depth-first over further iterations, deepest first, with an explicit stack
// so long inputs do not exhaust the call stack. Each step moves in one
// direction only, so a position already in `results` has its whole subtree
// there too.
fn star(pos: usize, step: &dyn Fn(usize) -> Vec<usize>, results: &mut Ends) {
    if results.contains(pos) {
        return;
    }
    let mut stack = vec![(pos, step(pos).into_iter())];
    while let Some((at, frontier)) = stack.last_mut() {
        let at = *at;
        match frontier.next() {
            // An iteration that consumed nothing cannot make progress.
            Some(p) if p == at || results.contains(p) => {}
            Some(p) => stack.push((p, step(p).into_iter())),
            None => {
                stack.pop();
                results.push(at);
            }
        }
    }
}

fn is_zero_width(node: &RegexNode) -> bool {
    matches!(
        node,
        RegexNode::Lookahead { .. }
            | RegexNode::StartAnchor
            | RegexNode::EndAnchor
            | RegexNode::AbsoluteEnd
            | RegexNode::WordBoundary { .. }
    )
}

fn assertion_holds(node: &RegexNode, input: &[char], pos: usize) -> bool {
    match node {
        RegexNode::StartAnchor => pos == 0,
        RegexNode::EndAnchor => pos == input.len() || (pos + 1 == input.len() && input[pos] == '\n'),
        RegexNode::AbsoluteEnd => pos == input.len(),
        RegexNode::WordBoundary { negated } => {
            let before = pos > 0 && is_word_char(input[pos - 1]);
            let after = pos < input.len() && is_word_char(input[pos]);
            (before != after) != *negated
        }
        RegexNode::Lookahead { node: inner, negated } => {
            match_forward(inner, input, pos).is_empty() == *negated
        }
        _ => false,
    }
}

// Checks if a single input character satisfies a single-character node.
fn char_matches(node: &RegexNode, c: char) -> bool {
    match node {
        RegexNode::Literal(l) => *l == c,
        RegexNode::Dot => c != '\n',
        RegexNode::Digit { negated } => c.is_ascii_digit() != *negated,
        RegexNode::Word { negated } => is_word_char(c) != *negated,
        RegexNode::Space { negated } => c.is_whitespace() != *negated,
        RegexNode::CharClass { items, negated } => items.iter().any(|item| item.contains(c)) != *negated,
        _ => false,
    }
}
