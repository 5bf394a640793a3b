//! String routines, contributed to the library as a module.

use std::rc::Rc;

use super::Module;
use crate::error::Error;
use crate::value::{Data, Routine, Value};

/// The string portion of the built-in library.
pub struct StringModule;

impl Module for StringModule {
    fn definitions(&self) -> Vec<(&'static str, Rc<dyn Routine>)> {
        vec![
            ("string?", Rc::new(IsString)),
            ("string-length", Rc::new(StringLength)),
            ("string-append", Rc::new(StringAppend)),
            ("substring", Rc::new(Substring)),
            ("string=?", Rc::new(StringEquals)),
        ]
    }
}

/// `string?`: whether the single operand is string data. Procedures and
/// non-string data answer `#false` rather than failing.
#[derive(Debug)]
struct IsString;

impl Routine for IsString {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error> {
        match parameters {
            [parameter] => {
                let is_string = matches!(parameter, Value::Data(Data::String(_)));
                Ok(Data::Boolean(is_string).into())
            }
            _ => Err(Error::Arity),
        }
    }
}

/// `string-length`: the number of characters in the operand.
#[derive(Debug)]
struct StringLength;

impl Routine for StringLength {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error> {
        match parameters {
            [parameter] => {
                let length = expect_string(parameter)?.chars().count();
                Ok(Data::Number(length as f64).into())
            }
            _ => Err(Error::Arity),
        }
    }
}

/// `string-append`: the concatenation of the operands; zero operands
/// append to `""`.
#[derive(Debug)]
struct StringAppend;

impl Routine for StringAppend {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error> {
        let mut value = String::new();
        for parameter in parameters {
            value.push_str(expect_string(parameter)?);
        }
        Ok(Data::String(value).into())
    }
}

/// `substring`: `(substring s start [end])`, with `end` defaulting to the
/// string's length. Positions count characters, are clamped to the
/// string, and are swapped if they cross.
#[derive(Debug)]
struct Substring;

impl Routine for Substring {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error> {
        let (string, start, end) = match parameters {
            [string, start] => (expect_string(string)?, expect_number(start)?, None),
            [string, start, end] => (
                expect_string(string)?,
                expect_number(start)?,
                Some(expect_number(end)?),
            ),
            _ => return Err(Error::Arity),
        };

        let characters: Vec<char> = string.chars().collect();
        let length = characters.len();
        let clamp = |position: f64| position.max(0.0).min(length as f64) as usize;

        let start = clamp(start);
        let end = end.map_or(length, clamp);
        let (start, end) = if start <= end { (start, end) } else { (end, start) };

        let value: String = characters[start..end].iter().collect();
        Ok(Data::String(value).into())
    }
}

/// `string=?`: whether every operand equals the first; takes two or more
/// operands. The answer `#false` comes back at the first mismatch, before
/// any later operand is inspected.
#[derive(Debug)]
struct StringEquals;

impl Routine for StringEquals {
    fn evaluate(&self, parameters: &[Value]) -> Result<Value, Error> {
        if parameters.len() < 2 {
            return Err(Error::Arity);
        }
        let value = expect_string(&parameters[0])?;
        for parameter in parameters {
            if expect_string(parameter)? != value {
                return Ok(Data::Boolean(false).into());
            }
        }
        Ok(Data::Boolean(true).into())
    }
}

fn expect_string(parameter: &Value) -> Result<&str, Error> {
    match parameter {
        Value::Data(Data::String(string)) => Ok(string),
        _ => Err(Error::Domain("string")),
    }
}

fn expect_number(parameter: &Value) -> Result<f64, Error> {
    match parameter {
        Value::Data(Data::Number(number)) => Ok(*number),
        _ => Err(Error::Domain("number")),
    }
}
