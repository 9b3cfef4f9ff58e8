//! Attribute lookup functions for the host's expression evaluator
//!
//! Both lookups are pure: they work on whatever attribute list the caller
//! hands in and never touch the reconciler or the remote database.
//!
//! The [`Function`] trait is the binding surface. It checks argument shape
//! and converts JSON values before delegating to [`get_first`] or
//! [`get_all`], so those two stay total over well-formed input.

mod get_all;
mod get_first;

pub use get_all::{GetAllFunction, get_all};
pub use get_first::{GetFirstFunction, get_first};

use crate::error::{Error, Result};
use crate::object::Attribute;
use serde_json::Value;

/// Static description of a function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    /// One-line summary
    pub summary: &'static str,
    /// Longer markdown description
    pub description: &'static str,
    /// Parameter names, in call order
    pub parameters: &'static [&'static str],
}

/// A function callable by name from the host
pub trait Function: Send + Sync {
    /// Name the host exposes the function under
    fn name(&self) -> &'static str;

    /// Summary, description and parameters
    fn definition(&self) -> FunctionDefinition;

    /// Bind the arguments and evaluate
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if the arguments have the wrong count or shape.
    fn run(&self, args: &[Value]) -> Result<Value>;
}

/// Every function provided by this crate
pub fn all() -> Vec<Box<dyn Function>> {
    vec![Box::new(GetFirstFunction), Box::new(GetAllFunction)]
}

/// Find a function by name
pub fn lookup(name: &str) -> Option<Box<dyn Function>> {
    all().into_iter().find(|function| function.name() == name)
}

/// Bind `(attributes: list<{name, value}>, key: string)`
fn bind_lookup_args(function: &str, args: &[Value]) -> Result<(Vec<Attribute>, String)> {
    let [attributes, key] = args else {
        return Err(Error::invalid_input(format!(
            "{} expects 2 arguments (attributes, key), got {}",
            function,
            args.len()
        )));
    };

    let attributes: Vec<Attribute> = serde_json::from_value(attributes.clone()).map_err(|e| {
        Error::invalid_input(format!(
            "{}: attributes must be a list of {{name, value}} objects: {}",
            function, e
        ))
    })?;

    let key = key
        .as_str()
        .ok_or_else(|| Error::invalid_input(format!("{}: key must be a string", function)))?
        .to_string();

    Ok((attributes, key))
}
