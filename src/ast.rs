#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexNode {
    Seq(Vec<RegexNode>),
    Alt(Vec<RegexNode>),
    Repeat {
        node: Box<RegexNode>,
        kind: RepeatKind,
    },
    Group(Box<RegexNode>),
    Lookahead {
        node: Box<RegexNode>,
        negated: bool,
    },
    StartAnchor,
    EndAnchor,
    AbsoluteEnd,
    WordBoundary {
        negated: bool,
    },
    Dot,
    Digit {
        negated: bool,
    },
    Word {
        negated: bool,
    },
    Space {
        negated: bool,
    },
    CharClass {
        items: Vec<ClassItem>,
        negated: bool,
    },
    Literal(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatKind {
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
}

/// One member of a bracketed character class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassItem {
    Char(char),
    Range(char, char),
    Digit,
    Word,
    Space,
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl ClassItem {
    pub fn contains(&self, c: char) -> bool {
        match self {
            ClassItem::Char(x) => *x == c,
            ClassItem::Range(lo, hi) => *lo <= c && c <= *hi,
            ClassItem::Digit => c.is_ascii_digit(),
            ClassItem::Word => is_word_char(c),
            ClassItem::Space => c.is_whitespace(),
        }
    }
}
