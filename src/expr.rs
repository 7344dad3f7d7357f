use std::fmt;
use std::sync::Arc;

use crate::bindings::{Bindings, Var};
use crate::conditional::Conditional;
use crate::error::Unresolvable;
use crate::position::{Occurrence, Position};
use crate::token::{chars, Token};
use crate::tokens;

/// A leaf that produces a string from the bound inputs.
#[derive(Debug, Clone)]
pub enum AtomicExpr {
    /// A literal; never consults the input.
    ConstStr(String),
    /// The text between two positions of a variable.
    SubStr {
        var: Var,
        start: Position,
        end: Position,
    },
    /// The full text of the `occurrence`-th match of `token`.
    SubStr2 {
        var: Var,
        token: Token,
        occurrence: Occurrence,
    },
    Loop(Loop),
}

impl AtomicExpr {
    pub fn const_str(literal: impl Into<String>) -> Self {
        AtomicExpr::ConstStr(literal.into())
    }

    pub fn substr(var: Var, start: Position, end: Position) -> Self {
        AtomicExpr::SubStr { var, start, end }
    }

    pub fn substr2(var: Var, token: Token, occurrence: Occurrence) -> Self {
        AtomicExpr::SubStr2 {
            var,
            token,
            occurrence,
        }
    }

    pub fn eval(&self, bindings: &Bindings<'_>) -> Result<String, Unresolvable> {
        match self {
            AtomicExpr::ConstStr(literal) => Ok(literal.clone()),
            AtomicExpr::SubStr { var, start, end } => {
                let text = bindings.lookup(var).ok_or(Unresolvable)?;
                slice(&chars(text), start, end)
            }
            AtomicExpr::SubStr2 {
                var,
                token,
                occurrence,
            } => {
                let text = bindings.lookup(var).ok_or(Unresolvable)?;
                let start = Position::boundary(tokens::epsilon(), token.clone(), *occurrence);
                let end = Position::boundary(token.clone(), tokens::epsilon(), *occurrence);
                slice(&chars(text), &start, &end)
            }
            AtomicExpr::Loop(l) => l.eval(bindings),
        }
    }

    pub fn eval_str(&self, subject: &str) -> Result<String, Unresolvable> {
        self.eval(&Bindings::subject(subject))
    }
}

// `start` must land inside the string and `end` must not precede it.
fn slice(input: &[char], start: &Position, end: &Position) -> Result<String, Unresolvable> {
    let i1 = start.eval_chars(input).ok_or(Unresolvable)?;
    let i2 = end.eval_chars(input).ok_or(Unresolvable)?;
    if i1 >= input.len() || i2 > input.len() || i1 > i2 {
        return Err(Unresolvable);
    }
    Ok(input[i1..i2].iter().collect())
}

type LoopBody = dyn Fn(Occurrence) -> TraceExpr + Send + Sync;

/// Concatenates the results of a body evaluated at loop indices 1, 2, ...
/// until the body fails.
///
/// A loop whose first iteration fails fails as a whole. Loops are unbounded
/// unless given a limit; a body still succeeding past its limit fails.
#[derive(Clone)]
pub struct Loop {
    body: Arc<LoopBody>,
    limit: Option<usize>,
}

impl Loop {
    pub fn new(body: impl Fn(Occurrence) -> TraceExpr + Send + Sync + 'static) -> Self {
        Self {
            body: Arc::new(body),
            limit: None,
        }
    }

    /// Cap the number of successful iterations.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn eval(&self, bindings: &Bindings<'_>) -> Result<String, Unresolvable> {
        let mut k = Occurrence::FIRST;
        let mut out = (self.body)(k).eval(bindings)?;
        for iteration in 2.. {
            k = k.next().ok_or(Unresolvable)?;
            match (self.body)(k).eval(bindings) {
                Err(Unresolvable) => return Ok(out),
                Ok(_) if self.limit.is_some_and(|limit| iteration > limit) => return Err(Unresolvable),
                Ok(part) => out.push_str(&part),
            }
        }
        Err(Unresolvable)
    }
}

impl fmt::Debug for Loop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loop")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl From<Loop> for AtomicExpr {
    fn from(l: Loop) -> Self {
        AtomicExpr::Loop(l)
    }
}

/// A program fragment producing a string, or failing.
#[derive(Debug, Clone)]
pub enum TraceExpr {
    /// Joins its parts in order; fails as a whole if any part fails.
    Concatenate(Vec<AtomicExpr>),
    /// Always fails.
    Epsilon,
    Atomic(AtomicExpr),
}

impl TraceExpr {
    pub fn concat(parts: impl IntoIterator<Item = AtomicExpr>) -> Self {
        TraceExpr::Concatenate(parts.into_iter().collect())
    }

    pub fn eval(&self, bindings: &Bindings<'_>) -> Result<String, Unresolvable> {
        match self {
            TraceExpr::Concatenate(parts) => parts.iter().map(|part| part.eval(bindings)).collect(),
            TraceExpr::Epsilon => Err(Unresolvable),
            TraceExpr::Atomic(atom) => atom.eval(bindings),
        }
    }

    pub fn eval_str(&self, subject: &str) -> Result<String, Unresolvable> {
        self.eval(&Bindings::subject(subject))
    }
}

impl From<AtomicExpr> for TraceExpr {
    fn from(atom: AtomicExpr) -> Self {
        TraceExpr::Atomic(atom)
    }
}

/// Guarded dispatch: the first branch whose condition holds decides the
/// result. No holding condition is a failure.
#[derive(Debug, Clone, Default)]
pub struct Switch {
    branches: Vec<(Conditional, TraceExpr)>,
}

impl Switch {
    pub fn new(branches: Vec<(Conditional, TraceExpr)>) -> Self {
        Self { branches }
    }

    pub fn case(mut self, condition: Conditional, expr: impl Into<TraceExpr>) -> Self {
        self.branches.push((condition, expr.into()));
        self
    }

    pub fn branches(&self) -> &[(Conditional, TraceExpr)] {
        &self.branches
    }

    pub fn eval(&self, bindings: &Bindings<'_>) -> Result<String, Unresolvable> {
        self.branches
            .iter()
            .find(|(condition, _)| condition.eval(bindings))
            .ok_or(Unresolvable)
            .and_then(|(_, expr)| expr.eval(bindings))
    }

    pub fn eval_str(&self, subject: &str) -> Result<String, Unresolvable> {
        self.eval(&Bindings::subject(subject))
    }
}
