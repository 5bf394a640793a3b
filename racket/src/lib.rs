//! An interpreter for a small Racket-like teaching language.
//!
//! Source text flows through four stages: [`lex`] turns it into tokens,
//! [`parse`] groups them into parenthesis trees and lowers those into a
//! typed [`ast::Program`], and [`interpret`] evaluates the program against
//! an environment seeded from [`library`]. [`execute`] wires the stages
//! together and reports one result per top-level expression.

pub mod ast;
pub mod env;
pub mod error;
pub mod interpret;
pub mod lex;
pub mod library;
pub mod parse;
pub mod value;

use serde_derive::Serialize;

pub use error::Error;
pub use value::Data;

/// The outcome of one top-level expression, or of a whole failed run.
/// Exactly one of the two fields is populated.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct RunResult {
    pub value: Option<Data>,
    pub error: Option<String>,
}

impl RunResult {
    pub fn value(data: Data) -> Self {
        RunResult {
            value: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        RunResult {
            value: None,
            error: Some(message),
        }
    }
}

/// Execute source text and report one result per top-level expression,
/// in source order.
///
/// Any failure while lexing, parsing or evaluating aborts the whole run:
/// the report is then a single error result, and values already computed
/// for the run are discarded.
pub fn execute(source: &str) -> Vec<RunResult> {
    match parse::parse(source).and_then(|program| interpret::run(&program)) {
        Ok(values) => values.into_iter().map(RunResult::value).collect(),
        Err(error) => vec![RunResult::error(error.to_string())],
    }
}
