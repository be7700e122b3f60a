//! Client-side payload validation.
//!
//! # Responsibilities
//! - Reject malformed payloads before any network call
//! - One validator per payload shape (columns, inserts, count and generic
//!   queries, data extraction, saved queries)
//! - Name the violated constraint in the returned error
//!
//! # Design Decisions
//! - Validators are pure: they borrow the payload, never mutate it, and
//!   return the same result on every run
//! - Fail fast on the first violated rule
//! - Shape is enforced by the typed payloads in `client::types`; the
//!   validators check what the types cannot (lengths, counts, grammar)

pub mod columns;
pub mod extraction;
pub mod filter;
pub mod insert;
pub mod query;

use thiserror::Error;

pub use filter::validate_filter;
pub use query::validate_entity_ids;

/// Maximum characters in a column name or api-name.
pub const MAX_COLUMN_NAME_LEN: usize = 100;
/// Maximum characters in a column description.
pub const MAX_COLUMN_DESCRIPTION_LEN: usize = 300;
/// Maximum entities in one insert request.
pub const MAX_INSERT_ENTITIES: usize = 1_000;
/// Maximum columns set on one entity per insert.
pub const MAX_COLUMNS_PER_ENTITY: usize = 256;
/// Maximum named queries in one count request.
pub const MAX_COUNT_QUERIES: usize = 10;
/// Maximum column entries in an aggregation query.
pub const MAX_AGGREGATION_COLUMNS: usize = 5;
/// Maximum named queries in one top-values request.
pub const MAX_TOP_VALUES_QUERIES: usize = 5;
/// Maximum keys in one top-values query.
pub const MAX_TOP_VALUES_PARAMS: usize = 6;
/// Maximum `contains` values in one top-values query.
pub const MAX_TOP_VALUES_CONTAINS: usize = 5;
/// Maximum ids in an exists-entity query.
pub const MAX_EXISTS_IDS: usize = 100;
/// Maximum explicitly named columns in a data extraction query.
pub const MAX_EXTRACTION_COLUMNS: usize = 10;
/// Maximum `limit` in a data extraction query.
pub const MAX_EXTRACTION_LIMIT: u32 = 100;
/// Maximum nesting of `not` / grouped clauses in a filter.
pub const MAX_FILTER_DEPTH: usize = 5;

/// A violated payload constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} payload is empty")]
    EmptyPayload(&'static str),

    #[error("{context} is missing required field '{field}'")]
    MissingField { context: String, field: &'static str },

    #[error("{field} is too long ({actual} characters, max {max})")]
    TooLong { field: String, max: usize, actual: usize },

    #[error("too many {what}: {actual} (max {max})")]
    TooMany { what: &'static str, max: usize, actual: usize },

    #[error("'{field}' is only accepted on {allowed}")]
    NotAllowed { field: &'static str, allowed: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("'{first}' and '{second}' cannot be used together")]
    MutuallyExclusive { first: &'static str, second: &'static str },

    #[error("duplicate {what} '{name}'")]
    Duplicate { what: &'static str, name: String },

    #[error("invalid filter at {path}: {reason}")]
    InvalidFilter { path: String, reason: String },

    #[error("unknown operator '{operator}' on column '{column}'")]
    UnknownOperator { column: String, operator: String },

    #[error("filter nesting exceeds {max} levels")]
    NestingTooDeep { max: usize },
}

impl ValidationError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// A payload that can check itself before dispatch.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Reject `value` when it has more than `max` characters.
pub(crate) fn check_len(field: impl Into<String>, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.into(),
            max,
            actual,
        });
    }
    Ok(())
}

/// Reject `actual` when it exceeds `max`.
pub(crate) fn check_count(what: &'static str, actual: usize, max: usize) -> Result<(), ValidationError> {
    if actual > max {
        return Err(ValidationError::TooMany { what, max, actual });
    }
    Ok(())
}
