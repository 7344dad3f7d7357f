use crate::bindings::{Bindings, Var};
use crate::token::Token;

/// Holds when the variable contains at least `min_count` non-overlapping
/// matches of `token`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    pub var: Var,
    pub token: Token,
    pub min_count: usize,
}

impl Match {
    pub fn new(var: Var, token: Token) -> Self {
        Self {
            var,
            token,
            min_count: 1,
        }
    }

    pub fn at_least(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }

    /// An absent variable never matches.
    pub fn eval(&self, bindings: &Bindings<'_>) -> bool {
        match bindings.lookup(&self.var) {
            Some(text) => self.token.count(text) >= self.min_count,
            None => false,
        }
    }
}

/// A boolean guard over match counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Conditional {
    Match(Match),
    NotMatch(Match),
    /// Holds when every member holds; vacuously true when empty.
    Conjunct(Vec<Conditional>),
    /// Holds when some member holds; vacuously false when empty.
    Disjunct(Vec<Conditional>),
}

impl Conditional {
    pub fn matches(var: Var, token: Token) -> Self {
        Conditional::Match(Match::new(var, token))
    }

    pub fn not_matches(var: Var, token: Token) -> Self {
        Conditional::NotMatch(Match::new(var, token))
    }

    pub fn eval(&self, bindings: &Bindings<'_>) -> bool {
        match self {
            Conditional::Match(m) => m.eval(bindings),
            Conditional::NotMatch(m) => !m.eval(bindings),
            Conditional::Conjunct(all) => all.iter().all(|c| c.eval(bindings)),
            Conditional::Disjunct(any) => any.iter().any(|c| c.eval(bindings)),
        }
    }

    pub fn eval_str(&self, subject: &str) -> bool {
        self.eval(&Bindings::subject(subject))
    }
}

impl From<Match> for Conditional {
    fn from(m: Match) -> Self {
        Conditional::Match(m)
    }
}
