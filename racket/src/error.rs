use thiserror::Error;

/// Everything that can go wrong between source text and the final values.
///
/// Nothing is recovered inside the core: every failure unwinds to the
/// [`execute`](crate::execute) call, which turns it into a single error
/// result and drops any values already computed for the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No lexing rule matched the source at this byte offset.
    #[error("unexpected code from index {0}")]
    Lex(usize),

    /// A malformed form, e.g. an `if` with the wrong number of parts.
    #[error("{0}")]
    Syntax(String),

    /// A name looked up in an environment that does not bind it.
    #[error("undefined identifier: {0}")]
    UndefinedIdentifier(String),

    /// A value used with the wrong capability (data vs. procedure).
    #[error("cannot cast {found} to {expected}")]
    Cast {
        expected: &'static str,
        found: &'static str,
    },

    /// A data value read through the wrong accessor.
    #[error("cannot read {found} as {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A procedure received an argument count it does not support.
    #[error("the expected number of arguments does not match the given number")]
    Arity,

    /// A built-in routine received an operand outside its domain.
    #[error("expected a {0} value")]
    Domain(&'static str),
}
