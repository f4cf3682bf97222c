use serde::Deserialize;

use super::ToolCallError;

/// A single argument as it arrives in a tool call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum ToolArgValue {
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl ToolArgValue {
    /// Strings pass through; integers become their decimal digits.
    pub(crate) fn into_text(self, param: &str) -> Result<String, ToolCallError> {
        match self {
            ToolArgValue::Text(text) => Ok(text),
            ToolArgValue::Integer(n) => Ok(n.to_string()),
            ToolArgValue::Unsigned(n) => Ok(n.to_string()),
            ToolArgValue::Float(_) => Err(ToolCallError::InvalidArguments(format!(
                "'{param}' must be a string"
            ))),
        }
    }

    /// Accept `7`, `7.0` and `"7"`; always render as `"7"`.
    pub(crate) fn into_integer_text(self, param: &str) -> Result<String, ToolCallError> {
        let invalid =
            || ToolCallError::InvalidArguments(format!("'{param}' must be an integer"));
        match self {
            ToolArgValue::Integer(n) => Ok(n.to_string()),
            ToolArgValue::Unsigned(n) => Ok(n.to_string()),
            ToolArgValue::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                if f < i64::MIN as f64 || f >= i64::MAX as f64 {
                    return Err(invalid());
                }
                Ok((f as i64).to_string())
            }
            ToolArgValue::Float(_) => Err(invalid()),
            ToolArgValue::Text(text) => text
                .trim()
                .parse::<i64>()
                .map(|n| n.to_string())
                .map_err(|_| invalid()),
        }
    }
}

/// Pull `param` out of a call's `arguments` object.
pub(crate) fn required_arg(
    arguments: &serde_json::Value,
    param: &str,
) -> Result<ToolArgValue, ToolCallError> {
    let value = arguments
        .get(param)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ToolCallError::InvalidArguments(format!("missing argument '{param}'")))?;
    ToolArgValue::deserialize(value).map_err(|_| {
        ToolCallError::InvalidArguments(format!("'{param}' must be a string or a number"))
    })
}

/// Turn repeated `key=value` CLI flags (plus an optional JSON object) into call arguments.
pub(crate) fn parse_cli_arguments(
    pairs: &[String],
    json: Option<&str>,
) -> Result<serde_json::Value, ToolCallError> {
    let mut map = match json {
        Some(raw) => match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) => {
                return Err(ToolCallError::InvalidArguments(
                    "arguments JSON must be an object".to_string(),
                ));
            }
            Err(e) => {
                return Err(ToolCallError::InvalidArguments(format!(
                    "arguments JSON: {e}"
                )));
            }
        },
        None => serde_json::Map::new(),
    };
    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            ToolCallError::InvalidArguments(format!("expected key=value, got '{pair}'"))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ToolCallError::InvalidArguments(format!(
                "empty argument name in '{pair}'"
            )));
        }
        map.insert(key.to_string(), serde_json::Value::String(value.to_string()));
    }
    Ok(serde_json::Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_is_rendered_in_decimal() {
        let args = json!({ "number": 7 });
        let value = required_arg(&args, "number").unwrap();
        assert_eq!(value, ToolArgValue::Integer(7));
        assert_eq!(value.into_integer_text("number").unwrap(), "7");
    }

    #[test]
    fn whole_float_and_numeric_string_are_integers() {
        assert_eq!(
            ToolArgValue::Float(7.0).into_integer_text("number").unwrap(),
            "7"
        );
        assert_eq!(
            ToolArgValue::Text(" 14 ".into()).into_integer_text("number").unwrap(),
            "14"
        );
        assert_eq!(
            ToolArgValue::Integer(-3).into_integer_text("number").unwrap(),
            "-3"
        );
    }

    #[test]
    fn integers_beyond_i64_keep_their_digits() {
        let args = json!({ "number": u64::MAX });
        let value = required_arg(&args, "number").unwrap();
        assert_eq!(value, ToolArgValue::Unsigned(u64::MAX));
        assert_eq!(
            value.clone().into_integer_text("number").unwrap(),
            "18446744073709551615"
        );
        assert_eq!(value.into_text("name").unwrap(), "18446744073709551615");
    }

    #[test]
    fn fractional_or_textual_integer_is_rejected() {
        assert!(ToolArgValue::Float(7.5).into_integer_text("number").is_err());
        assert!(ToolArgValue::Float(f64::NAN).into_integer_text("number").is_err());
        assert!(ToolArgValue::Text("seven".into()).into_integer_text("number").is_err());
    }

    #[test]
    fn string_param_accepts_text_and_integers() {
        assert_eq!(
            ToolArgValue::Text("Alice".into()).into_text("name").unwrap(),
            "Alice"
        );
        assert_eq!(ToolArgValue::Integer(42).into_text("name").unwrap(), "42");
        assert!(ToolArgValue::Float(1.5).into_text("name").is_err());
    }

    #[test]
    fn missing_or_null_argument_is_reported() {
        let args = json!({ "name": null });
        let err = required_arg(&args, "name").unwrap_err();
        assert_eq!(err.to_string(), "invalid arguments: missing argument 'name'");
        assert!(required_arg(&json!({}), "message").is_err());
    }

    #[test]
    fn structured_argument_is_rejected() {
        let args = json!({ "name": ["a"], "flag": true });
        assert!(required_arg(&args, "name").is_err());
        assert!(required_arg(&args, "flag").is_err());
    }

    #[test]
    fn cli_pairs_and_json_are_merged() {
        let pairs = vec!["name=Alice".to_string(), "message=a=b".to_string()];
        let args = parse_cli_arguments(&pairs, Some(r#"{"subject": "Hi", "name": "Bob"}"#)).unwrap();
        assert_eq!(args["name"], "Alice");
        assert_eq!(args["message"], "a=b");
        assert_eq!(args["subject"], "Hi");
    }

    #[test]
    fn cli_pair_without_equals_is_rejected() {
        assert!(parse_cli_arguments(&["name".to_string()], None).is_err());
        assert!(parse_cli_arguments(&["=x".to_string()], None).is_err());
        assert!(parse_cli_arguments(&[], Some("[1, 2]")).is_err());
    }
}
