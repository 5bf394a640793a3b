use std::fmt;
use std::rc::Rc;

use derive_more::From;
use serde_derive::Serialize;

use crate::ast::Lambda;
use crate::env::Environment;
use crate::error::Error;
use crate::interpret;

/// A built-in operation implemented in the host language.
///
/// Routines are stateless, shared behind `Rc`, and receive
/// already-evaluated values rather than expressions.
pub trait Routine: fmt::Debug {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error>;
}

/// The result of evaluating an expression: either constant data or a
/// callable procedure. Casting to the wrong side fails.
#[derive(Debug, Clone, From)]
pub enum Value {
    Data(Data),
    Procedure(Procedure),
}

impl Value {
    pub fn is_data(&self) -> bool {
        matches!(self, Value::Data(_))
    }

    /// Borrow the value as data; fails on procedures.
    pub fn as_data(&self) -> Result<&Data, Error> {
        match self {
            Value::Data(data) => Ok(data),
            Value::Procedure(_) => Err(Error::Cast {
                expected: "data",
                found: "procedure",
            }),
        }
    }

    /// Take the value as data; fails on procedures.
    pub fn into_data(self) -> Result<Data, Error> {
        match self {
            Value::Data(data) => Ok(data),
            Value::Procedure(_) => Err(Error::Cast {
                expected: "data",
                found: "procedure",
            }),
        }
    }

    /// Take the value as a procedure; fails on data.
    pub fn into_procedure(self) -> Result<Procedure, Error> {
        match self {
            Value::Procedure(procedure) => Ok(procedure),
            Value::Data(_) => Err(Error::Cast {
                expected: "procedure",
                found: "data",
            }),
        }
    }
}

/// An immutable constant: a number, a string or a boolean.
///
/// Serializes untagged, so a number result crosses the host boundary as a
/// plain number and so on.
#[derive(Debug, PartialEq, Clone, From, Serialize)]
#[serde(untagged)]
pub enum Data {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl Data {
    /// The payload type name, as it appears in mismatch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Data::Number(_) => "number",
            Data::String(_) => "string",
            Data::Boolean(_) => "boolean",
        }
    }

    pub fn number(&self) -> Result<f64, Error> {
        match self {
            Data::Number(number) => Ok(*number),
            other => Err(Error::TypeMismatch {
                expected: "number",
                found: other.kind(),
            }),
        }
    }

    pub fn string(&self) -> Result<&str, Error> {
        match self {
            Data::String(string) => Ok(string),
            other => Err(Error::TypeMismatch {
                expected: "string",
                found: other.kind(),
            }),
        }
    }

    pub fn boolean(&self) -> Result<bool, Error> {
        match self {
            Data::Boolean(boolean) => Ok(*boolean),
            other => Err(Error::TypeMismatch {
                expected: "boolean",
                found: other.kind(),
            }),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Data::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Data::String(_))
    }

    /// Build a number from a `Number` token's text.
    pub fn from_number_literal(text: &str) -> Result<Data, Error> {
        text.parse::<f64>()
            .map(Data::from)
            .map_err(|_| Error::Syntax(format!("invalid number literal: {text}")))
    }

    /// Build a boolean from a `Boolean` token's text.
    pub fn from_boolean_literal(text: &str) -> Result<Data, Error> {
        match text {
            "#true" | "#t" => Ok(Data::Boolean(true)),
            "#false" | "#f" => Ok(Data::Boolean(false)),
            other => Err(Error::Syntax(format!("cannot read {other} as a boolean"))),
        }
    }

    /// Build a string from a `String` token's text: the surrounding quotes
    /// are stripped and each backslash escape collapses to the escaped
    /// character itself.
    pub fn from_quoted_literal(text: &str) -> Data {
        let inner = text.strip_prefix('"').unwrap_or(text);
        let inner = inner.strip_suffix('"').unwrap_or(inner);

        let mut value = String::with_capacity(inner.len());
        let mut characters = inner.chars();
        while let Some(character) = characters.next() {
            if character == '\\' {
                if let Some(escaped) = characters.next() {
                    value.push(escaped);
                }
            } else {
                value.push(character);
            }
        }
        Data::String(value)
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Number(number) => write!(f, "{number}"),
            Data::String(string) => write!(f, "\"{string}\""),
            Data::Boolean(boolean) => write!(f, "{boolean}"),
        }
    }
}

/// A callable value: a built-in routine or a user lambda closed over its
/// defining environment.
#[derive(Debug, Clone)]
pub enum Procedure {
    Routine(Rc<dyn Routine>),
    Lambda(LambdaProcedure),
}

impl Procedure {
    /// Apply the procedure to already-evaluated inputs.
    pub fn apply(&self, inputs: &[Value]) -> Result<Value, Error> {
        match self {
            Procedure::Routine(routine) => routine.evaluate(inputs),
            Procedure::Lambda(lambda) => lambda.apply(inputs),
        }
    }
}

/// A lambda expression together with the environment it captured.
#[derive(Clone)]
pub struct LambdaProcedure {
    lambda: Rc<Lambda>,
    environment: Environment,
}

impl LambdaProcedure {
    pub fn new(lambda: Rc<Lambda>, environment: Environment) -> Self {
        LambdaProcedure {
            lambda,
            environment,
        }
    }

    /// Bind the formals to the inputs in a fresh copy of the captured
    /// environment and evaluate the body against it.
    fn apply(&self, inputs: &[Value]) -> Result<Value, Error> {
        if self.lambda.formals.len() != inputs.len() {
            return Err(Error::Arity);
        }
        let environment = self.environment.extend(&self.lambda.formals, inputs);
        interpret::evaluate(&self.lambda.body, &environment)
    }
}

// The captured environment can reach this closure again; keep it out of
// the debug output.
impl fmt::Debug for LambdaProcedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LambdaProcedure({:?})", self.lambda.formals)
    }
}
