use std::collections::HashMap;
use std::fmt;

/// A reference to one of the input strings of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Var {
    /// The string the evaluation is pinned to.
    #[default]
    Subject,
    /// A named input column.
    Column(String),
}

impl Var {
    pub fn column(name: impl Into<String>) -> Self {
        Var::Column(name.into())
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Var::Subject => f.write_str("<subject>"),
            Var::Column(name) => write!(f, "{name}"),
        }
    }
}

/// The input strings visible to one evaluation.
///
/// A variable without a value is absent: extraction over it is unresolvable
/// and match predicates over it are false.
#[derive(Debug, Clone, Default)]
pub struct Bindings<'a> {
    subject: Option<&'a str>,
    columns: HashMap<String, &'a str>,
}

impl<'a> Bindings<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings pinned to a single subject string.
    pub fn subject(subject: &'a str) -> Self {
        Self {
            subject: Some(subject),
            columns: HashMap::new(),
        }
    }

    pub fn with_subject(mut self, subject: &'a str) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_column(mut self, name: impl Into<String>, value: &'a str) -> Self {
        self.columns.insert(name.into(), value);
        self
    }

    pub fn lookup(&self, var: &Var) -> Option<&'a str> {
        match var {
            Var::Subject => self.subject,
            Var::Column(name) => self.columns.get(name).copied(),
        }
    }
}
