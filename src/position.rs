use std::fmt;
use std::num::NonZeroI32;

use crate::error::Error;
use crate::token::{chars, Token};

/// Which match a boundary refers to: positive counts from the start of the
/// string, negative from the end. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurrence(NonZeroI32);

impl Occurrence {
    pub const FIRST: Occurrence = match NonZeroI32::new(1) {
        Some(n) => Occurrence(n),
        None => panic!("one is non-zero"),
    };

    pub const LAST: Occurrence = match NonZeroI32::new(-1) {
        Some(n) => Occurrence(n),
        None => panic!("minus one is non-zero"),
    };

    pub fn new(count: i32) -> Result<Self, Error> {
        NonZeroI32::new(count).map(Occurrence).ok_or(Error::ZeroOccurrence)
    }

    pub fn get(self) -> i32 {
        self.0.get()
    }

    /// Whether matches are counted from the start of the string.
    pub fn from_start(self) -> bool {
        self.0.get() > 0
    }

    /// How many matching boundaries to count, ignoring direction.
    pub fn rank(self) -> u32 {
        self.0.get().unsigned_abs()
    }

    /// The next occurrence in counting order, if it is representable.
    pub fn next(self) -> Option<Self> {
        let next = if self.from_start() {
            self.0.get().checked_add(1)?
        } else {
            self.0.get().checked_sub(1)?
        };
        NonZeroI32::new(next).map(Occurrence)
    }
}

impl TryFrom<i32> for Occurrence {
    type Error = Error;

    fn try_from(count: i32) -> Result<Self, Self::Error> {
        Occurrence::new(count)
    }
}

impl From<NonZeroI32> for Occurrence {
    fn from(count: NonZeroI32) -> Self {
        Occurrence(count)
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Locates an index inside a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Position {
    /// A fixed offset; negative offsets count back from the end, with `-1`
    /// meaning the end of the string.
    Constant(isize),
    /// The boundary where text ending in `left` meets text starting with
    /// `right`, picking the `occurrence`-th such boundary.
    Boundary {
        left: Token,
        right: Token,
        occurrence: Occurrence,
    },
}

impl Position {
    pub fn constant(k: isize) -> Self {
        Position::Constant(k)
    }

    pub fn boundary(left: Token, right: Token, occurrence: Occurrence) -> Self {
        Position::Boundary {
            left,
            right,
            occurrence,
        }
    }

    /// Resolve against `text`, in character indices.
    pub fn eval(&self, text: &str) -> Option<usize> {
        self.eval_chars(&chars(text))
    }

    pub(crate) fn eval_chars(&self, input: &[char]) -> Option<usize> {
        match self {
            Position::Constant(k) if *k >= 0 => Some(k.unsigned_abs()),
            Position::Constant(k) => input.len().checked_sub(k.unsigned_abs() - 1),
            Position::Boundary {
                left,
                right,
                occurrence,
            } if occurrence.from_start() => scan_forward(left, right, occurrence.rank(), input),
            Position::Boundary {
                left,
                right,
                occurrence,
            } => scan_backward(left, right, occurrence.rank(), input),
        }
    }
}

// Walks the ends of `left` matches from the start and counts those where
// `right` matches next.
fn scan_forward(left: &Token, right: &Token, mut count: u32, input: &[char]) -> Option<usize> {
    // With an empty `left`, every index inside a `right` match is also a
    // candidate; only the index where the match begins may count.
    let exclusions = if left.is_epsilon() {
        right.find_all_chars(input)
    } else {
        Vec::new()
    };
    let mut exclusions = exclusions.iter().peekable();
    for span in left.find_all_chars(input) {
        let t = span.end;
        // Both lists run in increasing order.
        while exclusions.next_if(|ex| ex.end < t).is_some() {}
        if exclusions.peek().is_some_and(|ex| t > ex.start && t <= ex.end) {
            continue;
        }
        if right.matches_at_start_chars(&input[t..]) {
            count -= 1;
            if count == 0 {
                return Some(t);
            }
        }
    }
    None
}

// Walks the starts of `right` matches from the end and counts those where
// `left` matches just before.
fn scan_backward(left: &Token, right: &Token, mut count: u32, input: &[char]) -> Option<usize> {
    for span in right.find_all_rev_chars(input) {
        let t = span.start;
        if left.matches_at_end_chars(&input[..t]) {
            count -= 1;
            if count == 0 {
                return Some(t);
            }
        }
    }
    None
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Constant(k) => write!(f, "CPos({k})"),
            Position::Boundary {
                left,
                right,
                occurrence,
            } => write!(f, "Pos({left:?}, {right:?}, {occurrence})"),
        }
    }
}
