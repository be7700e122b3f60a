//! Column definition validator.

use crate::client::types::{ColumnDefinition, ColumnType, Columns};

use super::{check_len, Validate, ValidationError, MAX_COLUMN_DESCRIPTION_LEN, MAX_COLUMN_NAME_LEN};

impl Validate for ColumnDefinition {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                context: "column".to_string(),
                field: "name",
            });
        }
        check_len("column name", &self.name, MAX_COLUMN_NAME_LEN)?;
        let context = || format!("column '{}'", self.name);

        if let Some(api_name) = &self.api_name {
            if api_name.trim().is_empty() {
                return Err(ValidationError::invalid(format!("{} api-name", context()), "must not be empty"));
            }
            check_len("column api-name", api_name, MAX_COLUMN_NAME_LEN)?;
        }

        if let Some(description) = &self.description {
            check_len("column description", description, MAX_COLUMN_DESCRIPTION_LEN)?;
        }

        match self.column_type {
            ColumnType::String if self.cardinality.is_none() => {
                return Err(ValidationError::MissingField {
                    context: context(),
                    field: "cardinality",
                });
            }
            ColumnType::Enumerated => match &self.range {
                None => {
                    return Err(ValidationError::MissingField {
                        context: context(),
                        field: "range",
                    })
                }
                Some(range) if range.is_empty() => {
                    return Err(ValidationError::invalid(
                        format!("{} range", context()),
                        "must list at least one value",
                    ));
                }
                Some(_) => {}
            },
            _ => {}
        }

        match (self.column_type.is_decimal(), self.decimal_place) {
            (true, None) => Err(ValidationError::MissingField {
                context: context(),
                field: "decimal-place",
            }),
            (false, Some(_)) => Err(ValidationError::NotAllowed {
                field: "decimal-place",
                allowed: "decimal and decimal-time-series columns",
            }),
            _ => Ok(()),
        }
    }
}

impl Validate for Columns {
    fn validate(&self) -> Result<(), ValidationError> {
        let columns = self.as_slice();
        if columns.is_empty() {
            return Err(ValidationError::EmptyPayload("column"));
        }
        columns.iter().try_for_each(|column| column.validate())
    }
}
