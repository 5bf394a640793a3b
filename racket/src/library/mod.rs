//! The built-in routine library merged into every run's root environment.

mod string;

pub use string::StringModule;

use std::rc::Rc;

use crate::ast::{Definition, Expression};
use crate::error::Error;
use crate::value::{Data, Routine, Value};

/// A named collection of routines contributed to the library.
pub trait Module {
    fn definitions(&self) -> Vec<(&'static str, Rc<dyn Routine>)>;
}

/// The ordered built-in definitions: the arithmetic and comparison
/// routines first, then the string module's contributions. When merged
/// into an environment, later same-named entries overwrite earlier ones.
pub fn module() -> Vec<Definition> {
    let mut definitions = Vec::new();

    bind(&mut definitions, "+", Rc::new(Add));
    bind(&mut definitions, "-", Rc::new(Subtract));
    bind(&mut definitions, "*", Rc::new(Multiply));
    bind(&mut definitions, "/", Rc::new(Divide));
    bind(&mut definitions, ">", Rc::new(GreaterThan));
    bind(&mut definitions, "<", Rc::new(LessThan));
    bind(&mut definitions, "=", Rc::new(Equals));

    for (identifier, routine) in StringModule.definitions() {
        bind(&mut definitions, identifier, routine);
    }

    definitions
}

fn bind(definitions: &mut Vec<Definition>, identifier: &str, routine: Rc<dyn Routine>) {
    definitions.push(Definition {
        identifier: identifier.to_owned(),
        expression: Expression::Routine(routine),
    });
}

/// `+`: the sum of the operands; zero operands sum to 0.
#[derive(Debug)]
struct Add;

impl Routine for Add {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error> {
        let mut sum = 0.0;
        for parameter in parameters {
            sum += parameter.as_data()?.number()?;
        }
        Ok(Data::Number(sum).into())
    }
}

/// `-`: seeded at twice the first operand, then every operand (the first
/// included) is subtracted, so `(- a)` is `a` and `(- a b)` is `a - b`.
#[derive(Debug)]
struct Subtract;

impl Routine for Subtract {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error> {
        let first = parameters.first().ok_or(Error::Arity)?;
        let mut difference = first.as_data()?.number()? * 2.0;
        for parameter in parameters {
            difference -= parameter.as_data()?.number()?;
        }
        Ok(Data::Number(difference).into())
    }
}

/// `*`: the product of the operands; zero operands multiply to 1.
#[derive(Debug)]
struct Multiply;

impl Routine for Multiply {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error> {
        let mut product = 1.0;
        for parameter in parameters {
            product *= parameter.as_data()?.number()?;
        }
        Ok(Data::Number(product).into())
    }
}

/// `/`: seeded at the square of the first operand, then divided by every
/// operand (the first included), so `(/ a)` is `a` and `(/ a b)` is
/// `a / b`.
#[derive(Debug)]
struct Divide;

impl Routine for Divide {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error> {
        let first = parameters.first().ok_or(Error::Arity)?;
        let seed = first.as_data()?.number()?;
        let mut quotient = seed * seed;
        for parameter in parameters {
            quotient /= parameter.as_data()?.number()?;
        }
        Ok(Data::Number(quotient).into())
    }
}

/// Chained comparison over the operands in argument order; zero or one
/// operands hold vacuously. Once the chain has failed, the remaining
/// operands are not read at all.
fn chain(parameters: &[Value], holds: fn(f64, f64) -> bool) -> Result<Value, Error> {
    let mut result = true;
    let mut last: Option<f64> = None;
    for parameter in parameters {
        if !result {
            break;
        }
        let number = parameter.as_data()?.number()?;
        if let Some(previous) = last {
            if !holds(previous, number) {
                result = false;
            }
        }
        last = Some(number);
    }
    Ok(Data::Boolean(result).into())
}

/// `>`: strictly decreasing over the operands.
#[derive(Debug)]
struct GreaterThan;

impl Routine for GreaterThan {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error> {
        chain(parameters, |previous, next| previous > next)
    }
}

/// `<`: strictly increasing over the operands.
#[derive(Debug)]
struct LessThan;

impl Routine for LessThan {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error> {
        chain(parameters, |previous, next| previous < next)
    }
}

/// `=`: all operands equal.
#[derive(Debug)]
struct Equals;

impl Routine for Equals {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error> {
        chain(parameters, |previous, next| previous == next)
    }
}
