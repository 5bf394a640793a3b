//! Evaluation of parsed programs.

use crate::ast::{Expression, Program};
use crate::env::Environment;
use crate::error::Error;
use crate::library;
use crate::value::{Data, LambdaProcedure, Procedure, Value};

/// Run a program: seed a fresh root environment from the built-in
/// library, bind the program's definitions, then evaluate each top-level
/// expression in source order and collect the resulting data.
///
/// All or nothing: the first failure discards every value already
/// computed for the run.
pub fn run(program: &Program) -> Result<Vec<Data>, Error> {
    let environment = Environment::new();

    for definition in library::module() {
        let value = evaluate(&definition.expression, &environment)?;
        environment.define(&definition.identifier, value);
    }

    for definition in &program.definitions {
        let value = evaluate(&definition.expression, &environment)?;
        environment.define(&definition.identifier, value);
    }

    let mut values = Vec::new();
    for expression in &program.expressions {
        values.push(evaluate(expression, &environment)?.into_data()?);
    }
    Ok(values)
}

/// Evaluate one expression against an environment.
pub fn evaluate(expression: &Expression, environment: &Environment) -> Result<Value, Error> {
    match expression {
        Expression::Constant(data) => Ok(Value::Data(data.clone())),
        Expression::Identifier(name) => environment.lookup(name),
        Expression::Routine(routine) => Ok(Value::Procedure(Procedure::Routine(routine.clone()))),
        Expression::Lambda(lambda) => Ok(Value::Procedure(Procedure::Lambda(
            LambdaProcedure::new(lambda.clone(), environment.clone()),
        ))),
        Expression::Call {
            operator,
            arguments,
        } => {
            let procedure = evaluate(operator, environment)?.into_procedure()?;
            let mut inputs = Vec::with_capacity(arguments.len());
            for argument in arguments {
                inputs.push(evaluate(argument, environment)?);
            }
            procedure.apply(&inputs)
        }
        // the bindings are never installed; the body sees the enclosing
        // environment only
        Expression::Bind { body, .. } => evaluate(body, environment),
        Expression::If {
            test,
            then,
            otherwise,
        } => {
            if evaluate(test, environment)?.as_data()?.boolean()? {
                evaluate(then, environment)
            } else {
                evaluate(otherwise, environment)
            }
        }
    }
}
