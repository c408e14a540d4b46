//! Structural validation of tool arguments against a declared input schema.
//!
//! The same schema document that `tools/list` advertises drives validation,
//! so the advertised contract and the enforced one cannot drift apart. Only
//! the JSON-Schema subset the descriptors use is checked: `type`,
//! `properties`, `required`, `items` and `enum`. Unknown extra fields are
//! tolerated; every violation is reported, not just the first.

use serde_json::Value;
use std::fmt;

/// One schema violation, anchored to the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted field path, e.g. `requestOptions.datasourcesFilter[2]`.
    pub path: String,
    pub reason: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

/// Check `value` against `schema`, collecting every violation.
pub fn validate(schema: &Value, value: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_value(schema, value, "", &mut violations);
    violations
}

fn check_value(schema: &Value, value: &Value, path: &str, out: &mut Vec<Violation>) {
    if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            out.push(Violation {
                path: path.to_string(),
                reason: format!("must be one of: {}", render_enum(allowed)),
            });
            return;
        }
    }

    let Some(expected) = schema.get("type").and_then(Value::as_str) else {
        return;
    };
    if !type_matches(expected, value) {
        out.push(Violation {
            path: path.to_string(),
            reason: format!("expected {expected}, got {}", type_name(value)),
        });
        return;
    }

    match expected {
        "object" => check_object(schema, value, path, out),
        "array" => check_array(schema, value, path, out),
        _ => {}
    }
}

fn check_object(schema: &Value, value: &Value, path: &str, out: &mut Vec<Violation>) {
    let Some(object) = value.as_object() else {
        return;
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for field in required.iter().filter_map(Value::as_str) {
            if !object.contains_key(field) {
                out.push(Violation {
                    path: join(path, field),
                    reason: "required field is missing".to_string(),
                });
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return;
    };
    for (field, field_schema) in properties {
        if let Some(field_value) = object.get(field) {
            check_value(field_schema, field_value, &join(path, field), out);
        }
    }
}

fn check_array(schema: &Value, value: &Value, path: &str, out: &mut Vec<Violation>) {
    let Some(items) = schema.get("items") else {
        return;
    };
    let Some(array) = value.as_array() else {
        return;
    };
    for (index, item) in array.iter().enumerate() {
        check_value(items, item, &format!("{path}[{index}]"), out);
    }
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "boolean" => value.is_boolean(),
        "integer" => value.as_i64().is_some() || value.as_u64().is_some(),
        "number" => value.is_number(),
        // Unrecognized type keyword: accept rather than reject.
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

fn render_enum(allowed: &[Value]) -> String {
    allowed
        .iter()
        .map(|v| match v.as_str() {
            Some(s) => s.to_string(),
            None => v.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string"},
                "pageSize": {"type": "integer"},
                "people": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "role": {"type": "string", "enum": ["OWNER", "VIEWER"]}
                        },
                        "required": ["name"]
                    }
                }
            },
            "required": ["query"]
        })
    }

    #[test]
    fn valid_arguments_pass() {
        let args = json!({
            "query": "roadmap",
            "pageSize": 5,
            "people": [{"name": "Ada", "role": "OWNER"}]
        });
        assert_eq!(validate(&sample_schema(), &args), vec![]);
    }

    #[test]
    fn missing_required_field_is_reported_by_path() {
        let violations = validate(&sample_schema(), &json!({"pageSize": 5}));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "query");
        assert_eq!(violations[0].reason, "required field is missing");
    }

    #[test]
    fn wrong_primitive_type_is_reported() {
        let violations = validate(&sample_schema(), &json!({"query": 42}));
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            "query: expected string, got number"
        );
    }

    #[test]
    fn nested_violations_carry_indexed_paths() {
        let args = json!({
            "query": "ok",
            "people": [{"name": "Ada"}, {"role": "EDITOR"}]
        });
        let violations = validate(&sample_schema(), &args);
        let rendered: Vec<String> = violations.iter().map(Violation::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "people[1].name: required field is missing".to_string(),
                "people[1].role: must be one of: OWNER, VIEWER".to_string(),
            ]
        );
    }

    #[test]
    fn multiple_violations_are_all_reported() {
        let violations = validate(&sample_schema(), &json!({"query": 1, "pageSize": "ten"}));
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let args = json!({"query": "ok", "experimental": true});
        assert_eq!(validate(&sample_schema(), &args), vec![]);
    }

    #[test]
    fn integers_reject_fractions() {
        let violations = validate(&sample_schema(), &json!({"query": "ok", "pageSize": 1.5}));
        assert_eq!(
            violations[0].to_string(),
            "pageSize: expected integer, got number"
        );
    }

    #[test]
    fn non_object_arguments_are_rejected_at_the_root() {
        let violations = validate(&sample_schema(), &json!("query"));
        assert_eq!(violations[0].to_string(), "expected object, got string");
    }
}
