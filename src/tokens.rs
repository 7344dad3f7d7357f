//! The fixed token catalogue and the combinators that build compound
//! boundary patterns from it.

use once_cell::sync::Lazy;

use crate::ast::RegexNode;
use crate::token::Token;

macro_rules! builtin_tokens {
    ($($(#[$doc:meta])* $name:ident = $pattern:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name() -> Token {
                static TOKEN: Lazy<Token> =
                    Lazy::new(|| Token::new($pattern).expect("built-in token pattern is valid"));
                TOKEN.clone()
            }
        )*

        /// Every catalogue token, paired with its name.
        pub fn all() -> Vec<(&'static str, Token)> {
            vec![$((stringify!($name), $name())),*]
        }
    };
}

builtin_tokens! {
    /// A run of digits.
    num = r"\d+";
    /// A run of ASCII letters.
    alpha = r"[a-zA-Z]+";
    lower = r"[a-z]+";
    upper = r"[A-Z]+";
    /// A run of Latin-1 accented letters.
    accent = r"[\u00C0-\u00FF]+";
    alphanumeric = r"[a-zA-Z0-9]+";
    whitespace = r"\s+";
    non_whitespace = r"\S+";
    comma = r",+";
    /// A run of forward or backward slashes.
    slash = r"(\\|/)+";
    hyphen = r"-+";
    left_paren = r"\(+";
    right_paren = r"\)+";
    any = r".+";
    word = r"\w+";
    dot = r"\.+";
    /// The empty pattern, matching at every position.
    epsilon = "";
    start = r"\A";
    end = r"\Z";
}

/// `r1` immediately followed by `r2`.
pub fn sequence(r1: &Token, r2: &Token) -> Token {
    let mut items = Vec::new();
    let mut source = String::new();
    push_operand(&mut items, &mut source, r1);
    push_operand(&mut items, &mut source, r2);
    Token::from_parts(source, RegexNode::Seq(items))
}

/// Like [`sequence`], but the whole match must start and end on word
/// boundaries.
pub fn bounded_sequence(r1: &Token, r2: &Token) -> Token {
    let mut items = vec![RegexNode::WordBoundary { negated: false }];
    let mut source = String::from(r"\b");
    push_operand(&mut items, &mut source, r1);
    push_operand(&mut items, &mut source, r2);
    items.push(RegexNode::WordBoundary { negated: false });
    source.push_str(r"\b");
    Token::from_parts(source, RegexNode::Seq(items))
}

/// Zero-width assertion that `r` does not match going forward.
pub fn negate(r: &Token) -> Token {
    let node = RegexNode::Lookahead {
        node: Box::new(r.node().clone()),
        negated: true,
    };
    Token::from_parts(format!("(?!{})", r.source()), RegexNode::Seq(vec![node]))
}

// Appends an operand so that the combined text parses back to the combined
// tree. A top-level alternation is grouped to keep it from swallowing its
// neighbours.
fn push_operand(items: &mut Vec<RegexNode>, source: &mut String, operand: &Token) {
    match operand.node() {
        RegexNode::Seq(nodes) => {
            items.extend(nodes.iter().cloned());
            source.push_str(operand.source());
        }
        node @ RegexNode::Alt(_) => {
            items.push(RegexNode::Group(Box::new(node.clone())));
            source.push_str("(?:");
            source.push_str(operand.source());
            source.push(')');
        }
        node => {
            items.push(node.clone());
            source.push_str(operand.source());
        }
    }
}
