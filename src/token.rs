use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::ast::RegexNode;
use crate::error::Error;
use crate::matcher::{match_backward, match_forward};
use crate::parser;

/// A match location, in character indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// An immutable, compiled token pattern.
///
/// Cloning is cheap and tokens can be shared between threads. Two tokens are
/// equal iff their pattern texts are equal.
#[derive(Clone)]
pub struct Token {
    inner: Arc<Compiled>,
}

struct Compiled {
    source: String,
    node: RegexNode,
}

impl Token {
    /// Compile a pattern.
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let node = parser::parse(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self::from_parts(pattern.to_owned(), node))
    }

    pub(crate) fn from_parts(source: String, node: RegexNode) -> Self {
        Self {
            inner: Arc::new(Compiled { source, node }),
        }
    }

    pub fn source(&self) -> &str {
        &self.inner.source
    }

    pub(crate) fn node(&self) -> &RegexNode {
        &self.inner.node
    }

    /// Whether this is the empty pattern, which matches between every pair of
    /// characters.
    pub fn is_epsilon(&self) -> bool {
        self.inner.source.is_empty()
    }

    /// Non-overlapping matches, scanning left to right.
    pub fn find_all(&self, text: &str) -> Vec<Span> {
        self.find_all_chars(&chars(text))
    }

    /// Non-overlapping matches, scanning right to left. The result is ordered
    /// by decreasing position.
    pub fn find_all_rev(&self, text: &str) -> Vec<Span> {
        self.find_all_rev_chars(&chars(text))
    }

    /// Whether the pattern matches at the very start of `text`.
    pub fn matches_at_start(&self, text: &str) -> bool {
        self.matches_at_start_chars(&chars(text))
    }

    /// Whether some match ends at the end of `text`, or just before a final
    /// newline.
    pub fn matches_at_end(&self, text: &str) -> bool {
        self.matches_at_end_chars(&chars(text))
    }

    /// Number of non-overlapping matches in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.find_all(text).len()
    }

    pub(crate) fn find_all_chars(&self, input: &[char]) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut pos = 0;
        while pos <= input.len() {
            match match_forward(self.node(), input, pos).first() {
                Some(&end) => {
                    spans.push(Span { start: pos, end });
                    // Step past an empty match so the scan keeps moving.
                    pos = if end == pos { pos + 1 } else { end };
                }
                None => pos += 1,
            }
        }
        spans
    }

    pub(crate) fn find_all_rev_chars(&self, input: &[char]) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut end = input.len();
        loop {
            if let Some(&start) = match_backward(self.node(), input, end).first() {
                spans.push(Span { start, end });
                if start < end {
                    end = start;
                    continue;
                }
            }
            if end == 0 {
                break;
            }
            end -= 1;
        }
        spans
    }

    pub(crate) fn matches_at_start_chars(&self, input: &[char]) -> bool {
        !match_forward(self.node(), input, 0).is_empty()
    }

    pub(crate) fn matches_at_end_chars(&self, input: &[char]) -> bool {
        let len = input.len();
        let before_newline = len.checked_sub(1).filter(|&i| input[i] == '\n');
        std::iter::once(len)
            .chain(before_newline)
            .any(|end| !match_backward(self.node(), input, end).is_empty())
    }
}

pub(crate) fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.source() == other.source()
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source().hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&self.source()).finish()
    }
}

impl std::str::FromStr for Token {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::new(s)
    }
}
