//! Filter expression grammar.
//!
//! ```text
//! expr      := clause (connector clause)*
//! connector := "and" | "or"
//! clause    := {"not": clause}
//!            | {"and": expr} | {"or": expr}
//!            | {column: {operator: operand, ...}}
//! ```
//!
//! Operands are checked against the operator: comparisons take numbers or
//! date strings, text operators take strings, ranges take two-element arrays.

use serde_json::{Map, Value};

use super::{ValidationError, MAX_FILTER_DEPTH};

const CONNECTORS: [&str; 2] = ["and", "or"];

/// Comparison operators accepted inside a column clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Equals,
    NotEquals,
    Gt,
    Gte,
    Lt,
    Lte,
    Range,
    Between,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Minfreq,
}

impl Operator {
    fn parse(name: &str) -> Option<Self> {
        let op = match name {
            "equals" => Operator::Equals,
            "not-equals" => Operator::NotEquals,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "range" => Operator::Range,
            "between" => Operator::Between,
            "contains" => Operator::Contains,
            "not-contains" => Operator::NotContains,
            "starts-with" => Operator::StartsWith,
            "ends-with" => Operator::EndsWith,
            "minfreq" => Operator::Minfreq,
            _ => return None,
        };
        Some(op)
    }

    /// Check the operand; on mismatch return what was expected.
    fn check_operand(self, operand: &Value) -> Result<(), &'static str> {
        let ok = match self {
            Operator::Equals | Operator::NotEquals => is_scalar(operand),
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => is_comparable(operand),
            Operator::Range | Operator::Between => operand
                .as_array()
                .map(|bounds| bounds.len() == 2 && bounds.iter().all(is_comparable))
                .unwrap_or(false),
            Operator::Contains | Operator::NotContains | Operator::StartsWith | Operator::EndsWith => {
                operand.as_str().map(|s| !s.is_empty()).unwrap_or(false)
            }
            Operator::Minfreq => operand.as_u64().map(|n| n > 0).unwrap_or(false),
        };
        if ok {
            return Ok(());
        }
        Err(match self {
            Operator::Equals | Operator::NotEquals => "a string, number or boolean",
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => "a number or date string",
            Operator::Range | Operator::Between => "a two-element array of numbers or date strings",
            Operator::Contains | Operator::NotContains | Operator::StartsWith | Operator::EndsWith => {
                "a non-empty string"
            }
            Operator::Minfreq => "a positive integer",
        })
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn is_comparable(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_))
}

fn invalid(path: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidFilter {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Validate a filter expression (the `query` of count, extraction and saved
/// queries).
pub fn validate_filter(expr: &[Value]) -> Result<(), ValidationError> {
    validate_expr(expr, "query", 1)
}

fn validate_expr(expr: &[Value], path: &str, depth: usize) -> Result<(), ValidationError> {
    if expr.is_empty() {
        return Err(invalid(path, "expression is empty"));
    }
    for (idx, item) in expr.iter().enumerate() {
        let at = format!("{}[{}]", path, idx);
        if idx % 2 == 1 {
            match item.as_str() {
                Some(c) if CONNECTORS.contains(&c) => {}
                _ => return Err(invalid(&at, "expected connector 'and' or 'or'")),
            }
        } else {
            validate_clause(item, &at, depth)?;
        }
    }
    if expr.len() % 2 == 0 {
        return Err(invalid(path, "expression ends with a connector"));
    }
    Ok(())
}

fn validate_clause(value: &Value, path: &str, depth: usize) -> Result<(), ValidationError> {
    if depth > MAX_FILTER_DEPTH {
        return Err(ValidationError::NestingTooDeep { max: MAX_FILTER_DEPTH });
    }
    let clause = value
        .as_object()
        .ok_or_else(|| invalid(path, "expected a clause object"))?;
    let mut entries = clause.iter();
    let (key, body) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => return Err(invalid(path, "clause must have exactly one key")),
    };

    match key.as_str() {
        "not" => validate_clause(body, &format!("{}.not", path), depth + 1),
        "and" | "or" => {
            let group = body
                .as_array()
                .ok_or_else(|| invalid(path, format!("'{}' group must be a list", key)))?;
            validate_expr(group, &format!("{}.{}", path, key), depth + 1)
        }
        column => validate_conditions(column, body, path),
    }
}

fn validate_conditions(column: &str, body: &Value, path: &str) -> Result<(), ValidationError> {
    if column.is_empty() {
        return Err(invalid(path, "column name is empty"));
    }
    let conditions: &Map<String, Value> = body
        .as_object()
        .ok_or_else(|| invalid(path, format!("conditions for '{}' must be an object", column)))?;
    if conditions.is_empty() {
        return Err(invalid(path, format!("no operator given for '{}'", column)));
    }

    for (name, operand) in conditions {
        let op = Operator::parse(name).ok_or_else(|| ValidationError::UnknownOperator {
            column: column.to_string(),
            operator: name.clone(),
        })?;
        op.check_operand(operand)
            .map_err(|expected| invalid(&format!("{}.{}.{}", path, column, name), format!("expected {}", expected)))?;
    }

    if conditions.contains_key("minfreq") && !conditions.contains_key("between") {
        return Err(invalid(path, "'minfreq' requires 'between'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filter(value: Value) -> Vec<Value> {
        value.as_array().cloned().unwrap()
    }

    #[test]
    fn test_accepts_valid_expressions() {
        let expr = filter(json!([
            {"gender": {"equals": "female"}},
            "and",
            {"age": {"gte": 18, "lt": 65}},
            "or",
            {"not": {"name": {"starts-with": "a"}}},
            "and",
            {"or": [{"city": {"equals": "Paris"}}, "or", {"city": {"equals": "Rome"}}]}
        ]));
        assert_eq!(validate_filter(&expr), Ok(()));

        let ts = filter(json!([
            {"purchases": {"equals": "book", "between": ["2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z"], "minfreq": 2}}
        ]));
        assert_eq!(validate_filter(&ts), Ok(()));
    }

    #[test]
    fn test_rejects_structure_errors() {
        assert!(matches!(validate_filter(&[]), Err(ValidationError::InvalidFilter { .. })));

        let dangling = filter(json!([{"a": {"equals": 1}}, "and"]));
        assert!(matches!(validate_filter(&dangling), Err(ValidationError::InvalidFilter { .. })));

        let bad_connector = filter(json!([{"a": {"equals": 1}}, "xor", {"b": {"equals": 2}}]));
        let err = validate_filter(&bad_connector).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFilter {
                path: "query[1]".into(),
                reason: "expected connector 'and' or 'or'".into()
            }
        );

        let two_keys = filter(json!([{"a": {"equals": 1}, "b": {"equals": 2}}]));
        assert!(validate_filter(&two_keys).is_err());
    }

    #[test]
    fn test_rejects_operator_misuse() {
        let unknown = filter(json!([{"age": {"approx": 3}}]));
        assert_eq!(
            validate_filter(&unknown),
            Err(ValidationError::UnknownOperator {
                column: "age".into(),
                operator: "approx".into()
            })
        );

        let bad_operand = filter(json!([{"name": {"contains": 5}}]));
        assert!(matches!(validate_filter(&bad_operand), Err(ValidationError::InvalidFilter { .. })));

        let bad_range = filter(json!([{"age": {"range": [1]}}]));
        assert!(validate_filter(&bad_range).is_err());

        let lone_minfreq = filter(json!([{"visits": {"equals": "x", "minfreq": 2}}]));
        assert!(validate_filter(&lone_minfreq).is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let mut clause = json!({"age": {"equals": 1}});
        for _ in 0..MAX_FILTER_DEPTH - 1 {
            clause = json!({"not": clause});
        }
        assert_eq!(validate_filter(&[clause.clone()]), Ok(()));

        let too_deep = json!({"not": clause});
        assert_eq!(
            validate_filter(&[too_deep]),
            Err(ValidationError::NestingTooDeep { max: MAX_FILTER_DEPTH })
        );
    }

    #[test]
    fn test_validation_is_pure() {
        let expr = filter(json!([{"age": {"gt": 1}}, "or", {"age": {"lt": 0}}]));
        let before = expr.clone();
        let first = validate_filter(&expr);
        let second = validate_filter(&expr);
        assert_eq!(first, second);
        assert_eq!(expr, before);
    }
}
