use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::Error;
use crate::value::Value;

/// A lexical environment: one ordered binding map behind a shared handle.
///
/// Cloning shares the map, so a closure captured while the root
/// environment is still being seeded observes bindings added afterwards.
/// Per-application environments come from [`Environment::extend`], which
/// flat-copies every entry instead of chaining a parent pointer; shadowing
/// is overwrite-on-copy, and an extended environment is never written to
/// again.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: Rc<RefCell<BTreeMap<String, Value>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Bind `identifier` to `value`, overwriting any previous binding.
    pub fn define(&self, identifier: &str, value: Value) {
        self.bindings
            .borrow_mut()
            .insert(identifier.to_owned(), value);
    }

    /// Look up `identifier`, failing if the environment does not bind it.
    pub fn lookup(&self, identifier: &str) -> Result<Value, Error> {
        self.bindings
            .borrow()
            .get(identifier)
            .cloned()
            .ok_or_else(|| Error::UndefinedIdentifier(identifier.to_owned()))
    }

    /// Build the environment for one procedure application: a fresh copy
    /// of every current binding with the formals overlaid positionally.
    pub fn extend(&self, formals: &[String], inputs: &[Value]) -> Environment {
        let mut bindings = self.bindings.borrow().clone();
        for (formal, input) in formals.iter().zip(inputs) {
            bindings.insert(formal.clone(), input.clone());
        }
        Environment {
            bindings: Rc::new(RefCell::new(bindings)),
        }
    }
}
