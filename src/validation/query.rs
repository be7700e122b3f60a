//! Count, aggregation, top-values, exists and saved query validators.

use std::collections::HashSet;

use crate::client::types::{AggregationQuery, CountQuery, SavedQuery, SavedQueryBody, SavedQueryType, TopValuesRequest};

use super::filter::validate_filter;
use super::{
    check_count, Validate, ValidationError, MAX_AGGREGATION_COLUMNS, MAX_COUNT_QUERIES, MAX_EXISTS_IDS,
    MAX_TOP_VALUES_CONTAINS, MAX_TOP_VALUES_PARAMS, MAX_TOP_VALUES_QUERIES,
};

impl Validate for CountQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.query_name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                context: "count query".to_string(),
                field: "query-name",
            });
        }
        if let Some(table) = &self.table {
            if table.is_empty() {
                return Err(ValidationError::invalid("table", "must not be empty"));
            }
        }
        validate_filter(&self.query)
    }
}

impl Validate for [CountQuery] {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPayload("count query"));
        }
        check_count("count queries", self.len(), MAX_COUNT_QUERIES)?;

        let mut names = HashSet::new();
        for query in self {
            query.validate()?;
            if !names.insert(query.query_name.as_str()) {
                return Err(ValidationError::Duplicate {
                    what: "query name",
                    name: query.query_name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Validate for AggregationQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.query.is_empty() {
            return Err(ValidationError::EmptyPayload("aggregation"));
        }
        check_count("aggregation columns", self.query.len(), MAX_AGGREGATION_COLUMNS)?;
        if let Some(idx) = self.query.iter().position(|entry| !entry.is_object()) {
            return Err(ValidationError::invalid(
                format!("query[{}]", idx),
                "aggregation entries must be objects",
            ));
        }
        match &self.filter {
            Some(filter) => validate_filter(filter),
            None => Ok(()),
        }
    }
}

impl Validate for TopValuesRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPayload("top values"));
        }
        check_count("top values queries", self.len(), MAX_TOP_VALUES_QUERIES)?;

        for (name, query) in self {
            if name.trim().is_empty() {
                return Err(ValidationError::invalid("top values query name", "must not be empty"));
            }
            if query.column.trim().is_empty() {
                return Err(ValidationError::MissingField {
                    context: format!("top values query '{}'", name),
                    field: "column",
                });
            }
            check_count("parameters per top values query", query.param_count(), MAX_TOP_VALUES_PARAMS)?;
            check_count("contains values", query.contains.len(), MAX_TOP_VALUES_CONTAINS)?;
        }
        Ok(())
    }
}

/// Validate the ids of an exists-entity query.
pub fn validate_entity_ids(ids: &[String]) -> Result<(), ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::EmptyPayload("exists entity"));
    }
    check_count("entity ids", ids.len(), MAX_EXISTS_IDS)?;
    if ids.iter().any(|id| id.trim().is_empty()) {
        return Err(ValidationError::invalid("entity id", "must not be empty"));
    }
    Ok(())
}

/// Validate a saved query name; it becomes a URL path segment.
pub fn validate_saved_query_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField {
            context: "saved query".to_string(),
            field: "name",
        });
    }
    if name.contains('/') || name.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid(
            "saved query name",
            "must not contain '/' or whitespace",
        ));
    }
    Ok(())
}

impl Validate for SavedQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_saved_query_name(&self.name)?;
        if self.cache_period == Some(0) {
            return Err(ValidationError::invalid("cache-period", "must be greater than zero"));
        }
        match (self.query_type, &self.query) {
            (SavedQueryType::TopValues, SavedQueryBody::TopValues(request)) => request.validate(),
            (SavedQueryType::TopValues, SavedQueryBody::List(_)) => Err(ValidationError::invalid(
                "query",
                "top_values saved queries take a map of named queries",
            )),
            (_, SavedQueryBody::TopValues(_)) => Err(ValidationError::invalid(
                "query",
                format!("{} saved queries take a list", self.query_type.as_str()),
            )),
            (query_type, SavedQueryBody::List(list)) if query_type.takes_filter() => validate_filter(list),
            (_, SavedQueryBody::List(list)) => {
                if list.is_empty() {
                    return Err(ValidationError::EmptyPayload("saved query"));
                }
                check_count("aggregation columns", list.len(), MAX_AGGREGATION_COLUMNS)
            }
        }
    }
}
