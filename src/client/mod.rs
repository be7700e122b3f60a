//! Public client surface.
//!
//! # Responsibilities
//! - Typed request payloads for every operation (types.rs)
//! - One async method per REST operation (slicingdice.rs)
//! - Expose the status and headers of the last successful call
//!
//! # Design Decisions
//! - Payloads are validated before the key is checked or a request is built
//! - Each operation declares its endpoint, method and required key level in one place

pub mod slicingdice;
pub mod types;

pub use slicingdice::SlicingDice;
pub use types::{
    AggregationQuery, AutoCreate, Cardinality, ColumnDefinition, ColumnSelection, ColumnType, Columns, CountQuery,
    DataExtractionQuery, EntityValues, InsertPayload, SavedQuery, SavedQueryBody, SavedQueryType, TopValuesQuery,
    TopValuesRequest,
};
