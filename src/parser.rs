use crate::ast::{ClassItem, RegexNode, RepeatKind};
use crate::error::PatternError;

/// Parser for token patterns.
///
/// The `Parser` struct holds the pattern and the current byte offset into it.
pub struct Parser<'a> {
    pub pattern: &'a str,
    pub pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given pattern.
    pub fn new(pattern: &'a str) -> Self {
        Self { pattern, pos: 0 }
    }

    /// Peek at the next character in the pattern without advancing.
    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    /// Advance the parser by one character and return it.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Expect a specific character and advance if it matches.
    fn expect(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Entry point for parsing a whole pattern.
    ///
    /// The empty pattern parses to an empty sequence, which matches the empty
    /// string everywhere.
    pub fn parse(&mut self) -> Result<RegexNode, PatternError> {
        let node = self.parse_alt()?;
        if self.peek() == Some(')') {
            return Err(PatternError::UnmatchedParen(self.pos));
        }
        Ok(node)
    }

    /// Parse alternation (`|`) in the pattern.
    ///
    /// Example:
    /// - Pattern: `\\|/` → Alt([Seq([Literal('\\')]), Seq([Literal('/')])])
    /// - Pattern: `abc`  → Seq([Literal('a'), Literal('b'), Literal('c')])
    fn parse_alt(&mut self) -> Result<RegexNode, PatternError> {
        let mut branches = vec![self.parse_seq()?];
        while self.expect('|') {
            branches.push(self.parse_seq()?);
        }
        if branches.len() == 1 {
            Ok(branches.swap_remove(0))
        } else {
            Ok(RegexNode::Alt(branches))
        }
    }

    /// Parse a sequence of atoms up to the next `|`, `)` or the end.
    fn parse_seq(&mut self) -> Result<RegexNode, PatternError> {
        let mut nodes = Vec::new();
        while let Some(ch) = self.peek() {
            if ch == ')' || ch == '|' {
                break;
            }
            nodes.push(self.parse_repeat()?);
        }
        Ok(RegexNode::Seq(nodes))
    }

    /// Parse an atom and an optional greedy quantifier (`?`, `*`, `+`).
    fn parse_repeat(&mut self) -> Result<RegexNode, PatternError> {
        if let Some(q) = self.peek().filter(|&c| matches!(c, '?' | '*' | '+')) {
            return Err(PatternError::NothingToRepeat {
                quantifier: q,
                offset: self.pos,
            });
        }
        let atom = self.parse_atom()?;
        let kind = match self.peek() {
            Some('?') => RepeatKind::ZeroOrOne,
            Some('*') => RepeatKind::ZeroOrMore,
            Some('+') => RepeatKind::OneOrMore,
            _ => return Ok(atom),
        };
        self.advance();
        Ok(RegexNode::Repeat {
            node: Box::new(atom),
            kind,
        })
    }

    /// Parse a single atom: group, lookahead, class, escape, anchor or literal.
    ///
    /// Examples:
    /// - Pattern: `(?!\.+)` → Lookahead { node: Repeat(Literal('.')), negated: true }
    /// - Pattern: `[a-z]`   → CharClass { items: [Range('a', 'z')], negated: false }
    /// - Pattern: `\d`      → Digit { negated: false }
    /// - Pattern: `\b`      → WordBoundary { negated: false }
    fn parse_atom(&mut self) -> Result<RegexNode, PatternError> {
        let start = self.pos;
        match self.advance() {
            Some('(') => {
                let lookahead = if self.expect('?') {
                    match self.advance() {
                        Some(':') => None,
                        Some('!') => Some(true),
                        Some('=') => Some(false),
                        Some(c) => return Err(PatternError::UnsupportedGroup(c)),
                        None => return Err(PatternError::UnclosedGroup(start)),
                    }
                } else {
                    None
                };
                let node = self.parse_alt()?;
                if !self.expect(')') {
                    return Err(PatternError::UnclosedGroup(start));
                }
                Ok(match lookahead {
                    Some(negated) => RegexNode::Lookahead {
                        node: Box::new(node),
                        negated,
                    },
                    None => RegexNode::Group(Box::new(node)),
                })
            }
            Some('[') => self.parse_char_class(start),
            Some('\\') => self.parse_escape(),
            Some('.') => Ok(RegexNode::Dot),
            Some('^') => Ok(RegexNode::StartAnchor),
            Some('$') => Ok(RegexNode::EndAnchor),
            Some(c) => Ok(RegexNode::Literal(c)),
            None => Ok(RegexNode::Seq(vec![])),
        }
    }

    /// Parse the escape following a backslash outside a class.
    fn parse_escape(&mut self) -> Result<RegexNode, PatternError> {
        let escape_start = self.pos - 1;
        let node = match self.advance().ok_or(PatternError::DanglingEscape)? {
            'd' => RegexNode::Digit { negated: false },
            'D' => RegexNode::Digit { negated: true },
            'w' => RegexNode::Word { negated: false },
            'W' => RegexNode::Word { negated: true },
            's' => RegexNode::Space { negated: false },
            'S' => RegexNode::Space { negated: true },
            'b' => RegexNode::WordBoundary { negated: false },
            'B' => RegexNode::WordBoundary { negated: true },
            'A' => RegexNode::StartAnchor,
            'Z' => RegexNode::EndAnchor,
            'z' => RegexNode::AbsoluteEnd,
            'u' => RegexNode::Literal(self.parse_unicode_escape(escape_start)?),
            c => RegexNode::Literal(unescape_char(c)),
        };
        Ok(node)
    }

    /// Parse the four hex digits of a `\uXXXX` escape.
    fn parse_unicode_escape(&mut self, escape_start: usize) -> Result<char, PatternError> {
        let digits = self
            .pattern
            .get(self.pos..self.pos + 4)
            .ok_or(PatternError::InvalidUnicodeEscape(escape_start))?;
        let code = u32::from_str_radix(digits, 16)
            .map_err(|_| PatternError::InvalidUnicodeEscape(escape_start))?;
        let ch = char::from_u32(code).ok_or(PatternError::InvalidUnicodeEscape(escape_start))?;
        self.pos += 4;
        Ok(ch)
    }

    /// Parse a character class, e.g. `[a-zA-Z0-9]` or `[^.]`.
    ///
    /// A `]` directly after the opening bracket (or `[^`) is taken literally.
    fn parse_char_class(&mut self, start: usize) -> Result<RegexNode, PatternError> {
        let negated = self.expect('^');
        let mut items = Vec::new();
        let mut first = true;
        loop {
            let ch = self.advance().ok_or(PatternError::UnclosedClass(start))?;
            if ch == ']' && !first {
                break;
            }
            first = false;
            let item = if ch == '\\' {
                self.parse_class_escape()?
            } else {
                ClassItem::Char(ch)
            };
            // A '-' before the closing bracket is a literal.
            let is_range = matches!(item, ClassItem::Char(_))
                && self.peek() == Some('-')
                && self.pattern[self.pos + 1..].chars().next().is_some_and(|c| c != ']');
            match item {
                ClassItem::Char(lo) if is_range => {
                    self.advance();
                    let hi = match self.advance().ok_or(PatternError::UnclosedClass(start))? {
                        '\\' => match self.parse_class_escape()? {
                            ClassItem::Char(c) => c,
                            _ => return Err(PatternError::InvalidRange(lo, '\\')),
                        },
                        c => c,
                    };
                    if lo > hi {
                        return Err(PatternError::InvalidRange(lo, hi));
                    }
                    items.push(ClassItem::Range(lo, hi));
                }
                item => items.push(item),
            }
        }
        Ok(RegexNode::CharClass { items, negated })
    }

    /// Parse the escape following a backslash inside a class.
    fn parse_class_escape(&mut self) -> Result<ClassItem, PatternError> {
        let escape_start = self.pos - 1;
        let item = match self.advance().ok_or(PatternError::DanglingEscape)? {
            'd' => ClassItem::Digit,
            'w' => ClassItem::Word,
            's' => ClassItem::Space,
            'u' => ClassItem::Char(self.parse_unicode_escape(escape_start)?),
            c => ClassItem::Char(unescape_char(c)),
        };
        Ok(item)
    }
}

fn unescape_char(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}

/// Parse a complete pattern.
pub fn parse(pattern: &str) -> Result<RegexNode, PatternError> {
    Parser::new(pattern).parse()
}
