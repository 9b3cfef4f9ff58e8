use super::{Function, FunctionDefinition, bind_lookup_args};
use crate::error::Result;
use crate::object::Attribute;
use serde_json::Value;

/// Values of every attribute named `key`, in list order
///
/// Empty values are treated as absent and skipped, so the result never holds
/// an empty string.
pub fn get_all<'a>(attributes: &'a [Attribute], key: &str) -> Vec<&'a str> {
    attributes
        .iter()
        .filter(|attribute| attribute.name == key && !attribute.value.is_empty())
        .map(|attribute| attribute.value.as_str())
        .collect()
}

/// `get_all(attributes, key) -> list<string>`
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAllFunction;

impl Function for GetAllFunction {
    fn name(&self) -> &'static str {
        "get_all"
    }

    fn definition(&self) -> FunctionDefinition {
        FunctionDefinition {
            summary: "Get all values of an attribute",
            description: "Returns all the values of an attribute.\n\
                          If the attribute does not exist, returns `[]` (an empty list).",
            parameters: &["attributes", "key"],
        }
    }

    fn run(&self, args: &[Value]) -> Result<Value> {
        let (attributes, key) = bind_lookup_args(self.name(), args)?;

        Ok(Value::Array(
            get_all(&attributes, &key)
                .into_iter()
                .map(|value| Value::String(value.to_string()))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_matches_in_order() {
        let attributes = vec![
            Attribute::new("mnt-by", "RIPE-MNT"),
            Attribute::new("mnt-by", "ARIN-MNT"),
        ];
        assert_eq!(get_all(&attributes, "mnt-by"), ["RIPE-MNT", "ARIN-MNT"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let attributes = vec![Attribute::new("mnt-by", "RIPE-MNT")];
        assert!(get_all(&attributes, "admin-c").is_empty());
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let attributes = vec![
            Attribute::new("remarks", ""),
            Attribute::new("remarks", "kept"),
            Attribute::new("remarks", ""),
        ];
        assert_eq!(get_all(&attributes, "remarks"), ["kept"]);
        assert!(get_all(&attributes[..1], "remarks").is_empty());
    }

    #[test]
    fn test_run_returns_list() {
        let args = [
            json!([
                { "name": "mnt-by", "value": "RIPE-MNT" },
                { "name": "mnt-by", "value": "ARIN-MNT" },
            ]),
            json!("mnt-by"),
        ];
        assert_eq!(GetAllFunction.run(&args).unwrap(), json!(["RIPE-MNT", "ARIN-MNT"]));

        let args = [json!([{ "name": "mnt-by", "value": "RIPE-MNT" }]), json!("admin-c")];
        assert_eq!(GetAllFunction.run(&args).unwrap(), json!([]));
    }
}
