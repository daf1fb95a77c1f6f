//! # Shared Command Utilities
//!
//! Parsing helpers used by the command handlers: `Name=Value` words and the
//! JSON object read by `--input-json`.

use std::io::Read;

use handled::Handle;
use serde_json::{Map, Value};

use crate::commands::errors::UserError;
use crate::errors::InvocationError;

/// Splits `Name=Value` words into binding pairs.
///
/// The value is everything after the first `=`, so values may themselves
/// contain `=` (policies, base64 tokens).
///
/// # Arguments
/// * `words` - The free words following the operation name
///
/// # Returns
/// * `Ok(pairs)` - `(name, value)` pairs in command-line order
/// * `Err(InvocationError::MalformedBinding)` - A word without `=` or with an empty name
pub fn parse_bindings(words: &[String]) -> Result<Vec<(String, String)>, InvocationError> {
    words
        .iter()
        .map(|word| match word.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.to_string()))
            }
            _ => Err(InvocationError::MalformedBinding(word.clone())),
        })
        .collect()
}

/// Reads the JSON object for `--input-json` from a file, or from `stdin` when `source` is `-`.
pub fn read_input_json<R>(source: &str, stdin: R) -> Result<Map<String, Value>, UserError>
where
    R: Read,
{
    let text = if source == "-" {
        let mut text = String::new();
        let mut stdin = stdin;
        stdin.read_to_string(&mut text).map_err(|e| handled(&e))?;
        text
    } else {
        std::fs::read_to_string(source).map_err(|e| handled(&e))?
    };
    parse_input_json(&text)
}

/// Parses piped input: one JSON object, or a list holding exactly one object.
pub fn parse_input_json(text: &str) -> Result<Map<String, Value>, UserError> {
    let value: Value = serde_json::from_str(text).map_err(|e| handled(&e))?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Array(mut items) if items.len() == 1 => match items.pop() {
            Some(Value::Object(map)) => Ok(map),
            _ => Err(not_an_object()),
        },
        _ => Err(not_an_object()),
    }
}

fn not_an_object() -> UserError {
    UserError {
        message: "Input for --input-json is not a JSON object".to_string(),
        usage_hint: Some(
            "Pipe one object, e.g. the output of describe-firewall --select Firewall".to_string(),
        ),
    }
}

fn handled<E>(error: &E) -> UserError
where
    E: Handle<UserError> + std::fmt::Display,
{
    error.handle().unwrap_or_else(|| UserError {
        message: error.to_string(),
        usage_hint: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_on_first_equals() {
        let pairs = parse_bindings(&words(&["FirewallName=edge-fw", "UpdateToken=abc=="])).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("FirewallName".to_string(), "edge-fw".to_string()),
                ("UpdateToken".to_string(), "abc==".to_string())
            ]
        );
    }

    #[test]
    fn rejects_words_without_a_name() {
        assert_eq!(
            parse_bindings(&words(&["edge-fw"])),
            Err(InvocationError::MalformedBinding("edge-fw".to_string()))
        );
        assert!(parse_bindings(&words(&["=edge-fw"])).is_err());
    }

    #[test]
    fn empty_values_are_kept() {
        let pairs = parse_bindings(&words(&["Description="])).unwrap();
        assert_eq!(pairs[0].1, "");
    }

    #[test]
    fn reads_stdin_when_source_is_dash() {
        let input = br#"{"FirewallName": "edge-fw", "Unrelated": 1}"#;
        let map = read_input_json("-", &input[..]).unwrap();
        assert_eq!(map["FirewallName"], "edge-fw");
    }

    #[test]
    fn accepts_single_item_lists_only() {
        assert!(parse_input_json(r#"[{"FirewallName": "a"}]"#).is_ok());
        assert!(parse_input_json(r#"[{"FirewallName": "a"}, {"FirewallName": "b"}]"#).is_err());
        assert!(parse_input_json("\"edge-fw\"").is_err());
        let err = parse_input_json("{not json").unwrap_err();
        assert!(err.message.starts_with("JSON parsing error"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_input_json("/nonexistent/nfwctl-input.json", std::io::empty()).unwrap_err();
        assert!(err.message.starts_with("File operation error"));
    }
}
