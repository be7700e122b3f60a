//! Data extraction validator for `result` and `score` queries.

use crate::client::types::{ColumnSelection, DataExtractionQuery};

use super::filter::validate_filter;
use super::{check_count, Validate, ValidationError, MAX_EXTRACTION_COLUMNS, MAX_EXTRACTION_LIMIT};

impl Validate for DataExtractionQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_filter(&self.query)?;

        if self.limit.is_some() && self.page_token.is_some() {
            return Err(ValidationError::MutuallyExclusive {
                first: "limit",
                second: "page-token",
            });
        }

        match &self.columns {
            Some(ColumnSelection::Keyword(keyword)) if keyword != ColumnSelection::ALL => {
                return Err(ValidationError::invalid(
                    "columns",
                    "expected 'all' or a list of column names",
                ));
            }
            Some(ColumnSelection::Names(names)) => {
                if names.is_empty() {
                    return Err(ValidationError::invalid("columns", "list is empty"));
                }
                check_count("extracted columns", names.len(), MAX_EXTRACTION_COLUMNS)?;
            }
            _ => {}
        }

        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_EXTRACTION_LIMIT {
                return Err(ValidationError::invalid(
                    "limit",
                    format!("must be between 1 and {}", MAX_EXTRACTION_LIMIT),
                ));
            }
        }

        if let Some(token) = &self.page_token {
            if token.is_empty() {
                return Err(ValidationError::invalid("page-token", "must not be empty"));
            }
        }
        Ok(())
    }
}
