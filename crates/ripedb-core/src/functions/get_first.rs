use super::{Function, FunctionDefinition, bind_lookup_args};
use crate::error::Result;
use crate::object::Attribute;
use serde_json::Value;

/// Value of the first attribute named `key`, in list order
///
/// `None` when no attribute has that name. An attribute that is present with
/// an empty value yields `Some("")`.
pub fn get_first<'a>(attributes: &'a [Attribute], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|attribute| attribute.name == key)
        .map(|attribute| attribute.value.as_str())
}

/// `get_first(attributes, key) -> string | null`
#[derive(Debug, Clone, Copy, Default)]
pub struct GetFirstFunction;

impl Function for GetFirstFunction {
    fn name(&self) -> &'static str {
        "get_first"
    }

    fn definition(&self) -> FunctionDefinition {
        FunctionDefinition {
            summary: "Get the first value of an attribute",
            description: "Returns the first value of an attribute.\n\
                          If the attribute does not exist, returns `null`.",
            parameters: &["attributes", "key"],
        }
    }

    fn run(&self, args: &[Value]) -> Result<Value> {
        let (attributes, key) = bind_lookup_args(self.name(), args)?;

        Ok(get_first(&attributes, &key)
            .map(|value| Value::String(value.to_string()))
            .unwrap_or(Value::Null))
    }
}
