use thiserror::Error;

/// Problems found while parsing a token pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("unclosed group opened at offset {0}")]
    UnclosedGroup(usize),
    #[error("unclosed character class opened at offset {0}")]
    UnclosedClass(usize),
    #[error("unmatched ')' at offset {0}")]
    UnmatchedParen(usize),
    #[error("pattern ends with a lone backslash")]
    DanglingEscape,
    #[error("quantifier '{quantifier}' at offset {offset} has nothing to repeat")]
    NothingToRepeat { quantifier: char, offset: usize },
    #[error("unsupported group kind '(?{0}'")]
    UnsupportedGroup(char),
    #[error("invalid \\u escape at offset {0}")]
    InvalidUnicodeEscape(usize),
    #[error("invalid class range {0}-{1}")]
    InvalidRange(char, char),
}

/// Errors raised while building an expression tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid token pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
    #[error("occurrence count must not be zero")]
    ZeroOccurrence,
}

/// The single failure outcome of evaluating an expression.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expression could not be resolved against the input")]
pub struct Unresolvable;
