//! An interpreter for FlashFill-style string transformation programs.
//!
//! Programs are trees of position expressions, extraction expressions, match
//! predicates and guarded dispatch, built once and evaluated against any
//! number of inputs. Evaluation never panics: anything that cannot be
//! computed comes back as [`Unresolvable`].
//!
//! All string indices are character indices.

pub mod ast;
pub mod bindings;
pub mod conditional;
pub mod error;
pub mod expr;
pub mod matcher;
pub mod parser;
pub mod position;
pub mod token;
pub mod tokens;

pub use bindings::{Bindings, Var};
pub use conditional::{Conditional, Match};
pub use error::{Error, PatternError, Unresolvable};
pub use expr::{AtomicExpr, Loop, Switch, TraceExpr};
pub use position::{Occurrence, Position};
pub use token::{Span, Token};
