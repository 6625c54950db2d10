//! Subcommands for use from a terminal: a one-off call and the method listing.

use anyhow::{Context, Result};

use crate::action::{ActionInputs, InputArgs};
use crate::engine::{self, ReceiverTypeTag};

/// Invokes once and renders the result, as `String(result)` text or as JSON.
pub fn call(inputs: InputArgs, json: bool) -> Result<String> {
    let inputs = ActionInputs::try_from(inputs)?;
    let result = engine::invoke(&inputs.to_request())?;
    if json {
        serde_json::to_string(&result).context("unable to serialize result")
    } else {
        Ok(result.to_string())
    }
}

/// One operation name per line.
pub fn list_methods(type_tag: &str) -> Result<String> {
    let tag = ReceiverTypeTag::resolve(type_tag)?;
    Ok(engine::supported_methods(tag).join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InvocationError;

    fn inputs(value: &str, method: &str, type_tag: &str) -> InputArgs {
        InputArgs {
            value: Some(value.to_string()),
            method: Some(method.to_string()),
            type_tag: Some(type_tag.to_string()),
            ..InputArgs::default()
        }
    }

    #[test]
    fn call_renders_text_or_json() {
        let mut split = inputs("a-b", "split", "string");
        split.args = Some("-".to_string());
        split.arg_types = Some("string".to_string());
        assert_eq!(call(split.clone(), false).unwrap(), "a,b");
        assert_eq!(call(split, true).unwrap(), r#"["a","b"]"#);

        assert_eq!(call(inputs("2.50", "number", "valueOf"), true).unwrap(), "2.5");
        assert_eq!(call(inputs("4", "number", "valueOf"), true).unwrap(), "4");
        assert_eq!(call(inputs("x", "string", "__lookupGetter__"), true).unwrap(), "null");
    }

    #[test]
    fn call_reports_engine_errors() {
        let err = call(inputs("abc", "string", "nope"), false).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InvocationError>(),
            Some(&InvocationError::MethodNotFound {
                method: "nope".to_string(),
                type_name: "string",
            })
        );
        assert!(call(InputArgs::default(), true).is_err());
    }

    #[test]
    fn listing_per_type() {
        let listing = list_methods("number").unwrap();
        let names: Vec<&str> = listing.lines().collect();
        assert!(names.contains(&"toFixed"));
        assert!(!names.contains(&"toUpperCase"));
        assert!(list_methods("string").unwrap().lines().any(|name| name == "trimLeft"));
    }

    #[test]
    fn listing_rejects_unknown_types() {
        for tag in ["regex", "date", ""] {
            let err = list_methods(tag).unwrap_err();
            assert_eq!(err.to_string(), format!("Unsupported type '{tag}'."));
        }
    }
}
