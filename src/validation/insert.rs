//! Insert payload validator.
//!
//! Values are checked heuristically since the client does not know the
//! declared column types: scalars pass, lists must be homogeneous, and lists
//! of objects must be time-series points.

use serde_json::Value;

use crate::client::types::{InsertPayload, AUTO_CREATE_KEY};

use super::{check_count, Validate, ValidationError, MAX_COLUMNS_PER_ENTITY, MAX_INSERT_ENTITIES};

/// Reserved column naming the destination table.
const TABLE_KEY: &str = "table";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScalarKind {
    Number,
    Text,
    Bool,
}

fn scalar_kind(value: &Value) -> Option<ScalarKind> {
    match value {
        Value::Number(_) => Some(ScalarKind::Number),
        Value::String(_) => Some(ScalarKind::Text),
        Value::Bool(_) => Some(ScalarKind::Bool),
        _ => None,
    }
}

impl Validate for InsertPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.entities.is_empty() {
            return Err(ValidationError::EmptyPayload("insert"));
        }
        check_count("entities", self.entities.len(), MAX_INSERT_ENTITIES)?;

        for (entity_id, values) in &self.entities {
            if entity_id.trim().is_empty() {
                return Err(ValidationError::invalid("entity id", "must not be empty"));
            }
            if entity_id == AUTO_CREATE_KEY {
                return Err(ValidationError::invalid(
                    "entity id",
                    format!("'{}' is reserved", AUTO_CREATE_KEY),
                ));
            }
            if values.is_empty() {
                return Err(ValidationError::invalid(
                    format!("entity '{}'", entity_id),
                    "no columns given",
                ));
            }
            check_count("columns per entity", values.len(), MAX_COLUMNS_PER_ENTITY)?;

            for (column, value) in values {
                let field = format!("{}.{}", entity_id, column);
                if column == TABLE_KEY {
                    match value.as_str() {
                        Some(table) if !table.is_empty() => continue,
                        _ => return Err(ValidationError::invalid(field, "table must be a non-empty string")),
                    }
                }
                check_value(&field, value)?;
            }
        }
        Ok(())
    }
}

fn check_value(field: &str, value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Null => Err(ValidationError::invalid(field, "null values are not accepted")),
        Value::Object(_) => Err(ValidationError::invalid(
            field,
            "objects are only accepted as time-series points inside a list",
        )),
        Value::Array(items) => check_list(field, items),
        _ => Ok(()),
    }
}

fn check_list(field: &str, items: &[Value]) -> Result<(), ValidationError> {
    let first = items
        .first()
        .ok_or_else(|| ValidationError::invalid(field, "list is empty"))?;

    if first.is_object() {
        let mut series_kind = None;
        for point in items {
            let kind = check_point(field, point)?;
            match series_kind {
                None => series_kind = Some(kind),
                Some(expected) if expected != kind => {
                    return Err(ValidationError::invalid(field, "time-series mixes numeric and string values"));
                }
                Some(_) => {}
            }
        }
        return Ok(());
    }

    let expected = scalar_kind(first)
        .ok_or_else(|| ValidationError::invalid(field, "list items must be strings, numbers or booleans"))?;
    for item in items {
        if scalar_kind(item) != Some(expected) {
            return Err(ValidationError::invalid(field, "list mixes value types"));
        }
    }
    Ok(())
}

/// A time-series point is `{"value": number|string, "date": string}`.
fn check_point(field: &str, point: &Value) -> Result<ScalarKind, ValidationError> {
    let obj = point
        .as_object()
        .ok_or_else(|| ValidationError::invalid(field, "list mixes time-series points and plain values"))?;
    let date = obj.get("date").ok_or_else(|| ValidationError::MissingField {
        context: format!("time-series point in {}", field),
        field: "date",
    })?;
    if !date.as_str().map(|d| !d.is_empty()).unwrap_or(false) {
        return Err(ValidationError::invalid(field, "time-series date must be a non-empty string"));
    }
    let value = obj.get("value").ok_or_else(|| ValidationError::MissingField {
        context: format!("time-series point in {}", field),
        field: "value",
    })?;
    match scalar_kind(value) {
        Some(kind @ (ScalarKind::Number | ScalarKind::Text)) => Ok(kind),
        _ => Err(ValidationError::invalid(field, "time-series value must be a number or string")),
    }
}
