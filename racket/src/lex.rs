use lazy_static::lazy_static;
use regex::Regex;
use serde_derive::Serialize;

use crate::error::Error;

/// The classes a source token can fall into.
///
/// `None` marks a whitespace run: it advances the scan position like any
/// other match but is never stored in the token stream.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum TokenKind {
    None,
    Identifier,
    Number,
    Boolean,
    String,
    Symbol,
    Delimiter,
}

/// A matched token: the byte offset it starts at, the matched text and its
/// class. Immutable once created.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Token {
    pub index: usize,
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    fn new(index: usize, text: &str, kind: TokenKind) -> Self {
        Token {
            index,
            text: text.to_owned(),
            kind,
        }
    }
}

lazy_static! {
    /// The lexing rules in priority order. At every position the first rule
    /// that matches wins, even when a later rule would match more text:
    /// `#truely` lexes as the boolean `#true` followed by the identifier
    /// `ly`, and `123abc` as the number `123` followed by `abc`.
    static ref RULES: Vec<(Regex, TokenKind)> = vec![
        (Regex::new(r"^[0-9]+").unwrap(), TokenKind::Number),
        (Regex::new(r"^(?:#true|#false|#t|#f)").unwrap(), TokenKind::Boolean),
        (
            Regex::new(r##"^#[^()\[\]{}",'`;#|\\\s]+"##).unwrap(),
            TokenKind::Symbol,
        ),
        (
            Regex::new(r##"^[^()\[\]{}",'`;#|\\\s]+"##).unwrap(),
            TokenKind::Identifier,
        ),
        (
            Regex::new(r#"^"(?:\\.|[^"])*""#).unwrap(),
            TokenKind::String,
        ),
        (
            Regex::new(r##"^[()\[\]{}",'`;#|\\]"##).unwrap(),
            TokenKind::Delimiter,
        ),
        (Regex::new(r"^\s+").unwrap(), TokenKind::None),
    ];
}

/// Match a single token at `index`, trying each rule in order.
fn fetch(source: &str, index: usize) -> Result<Token, Error> {
    let rest = &source[index..];
    for (rule, kind) in RULES.iter() {
        if let Some(found) = rule.find(rest) {
            return Ok(Token::new(index, found.as_str(), *kind));
        }
    }
    Err(Error::Lex(index))
}

/// Turn source text into its ordered token stream.
///
/// Total over the input: either every byte is covered by some rule or the
/// scan fails at the first uncovered offset. Whitespace matches are
/// consumed for offset bookkeeping and discarded.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut index = 0;
    while index < source.len() {
        let token = fetch(source, index)?;
        index += token.text.len();
        if token.kind != TokenKind::None {
            tokens.push(token);
        }
    }
    Ok(tokens)
}
