//! The `SlicingDice` client.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::{AuthLevel, Credentials, KeyResolver};
use crate::config::schema::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{Dispatcher, Endpoint, ResponseMeta};
use crate::validation::query::validate_saved_query_name;
use crate::validation::{validate_entity_ids, Validate, ValidationError};

use super::types::{
    AggregationQuery, Columns, CountQuery, DataExtractionQuery, InsertPayload, SavedQuery, TopValuesRequest,
};

/// Async client for the SlicingDice API.
///
/// A single key is resolved at construction from the configured credentials
/// (master, then custom, then write, then read) and used for every call.
#[derive(Debug)]
pub struct SlicingDice {
    dispatcher: Dispatcher,
    uses_test_endpoint: bool,
    last: Mutex<Option<ResponseMeta>>,
}

impl SlicingDice {
    /// Client with default settings and the given keys.
    pub fn new(keys: Credentials) -> Result<Self> {
        Self::from_config(ClientConfig::default().with_keys(keys))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let dispatcher = Dispatcher::new(&config)?;
        Ok(Self {
            dispatcher,
            uses_test_endpoint: config.uses_test_endpoint,
            last: Mutex::new(None),
        })
    }

    /// Send sandbox-capable calls to the `/test` endpoint.
    pub fn with_test_endpoint(mut self, enabled: bool) -> Self {
        self.uses_test_endpoint = enabled;
        self
    }

    pub fn uses_test_endpoint(&self) -> bool {
        self.uses_test_endpoint
    }

    pub fn key_resolver(&self) -> &KeyResolver {
        self.dispatcher.resolver()
    }

    /// HTTP status of the last successful call.
    pub fn status_code(&self) -> Option<u16> {
        self.last_meta().map(|meta| meta.status)
    }

    /// Response headers of the last successful call.
    pub fn headers(&self) -> Option<BTreeMap<String, String>> {
        self.last_meta().map(|meta| meta.headers)
    }

    fn last_meta(&self) -> Option<ResponseMeta> {
        self.last.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(&self, meta: ResponseMeta) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(meta);
    }

    async fn call(
        &self,
        endpoint: Endpoint,
        method: Method,
        required: AuthLevel,
        body: Option<Value>,
    ) -> Result<Value> {
        let response = self
            .dispatcher
            .dispatch(&endpoint, method, required, body.as_ref(), self.uses_test_endpoint)
            .await?;
        self.record(response.meta);
        Ok(response.payload)
    }

    // Database and columns

    /// Database information. Always hits the production endpoint.
    pub async fn get_database(&self) -> Result<Value> {
        self.call(Endpoint::Database, Method::GET, AuthLevel::Master, None).await
    }

    /// Create one column or a batch.
    pub async fn create_column(&self, columns: impl Into<Columns>) -> Result<Value> {
        let columns = columns.into();
        columns.validate()?;
        self.call(Endpoint::Column, Method::POST, AuthLevel::Write, Some(encode(&columns)?)).await
    }

    pub async fn get_columns(&self) -> Result<Value> {
        self.call(Endpoint::Column, Method::GET, AuthLevel::Master, None).await
    }

    // Insertion

    pub async fn insert(&self, payload: &InsertPayload) -> Result<Value> {
        payload.validate()?;
        self.call(Endpoint::Insert, Method::POST, AuthLevel::Write, Some(encode(payload)?)).await
    }

    // Queries

    pub async fn count_entity(&self, queries: &[CountQuery]) -> Result<Value> {
        queries.validate()?;
        self.call(Endpoint::CountEntity, Method::POST, AuthLevel::Read, Some(encode(queries)?)).await
    }

    /// Total entity count over `tables`. The list is always sent, even when empty.
    pub async fn count_entity_total(&self, tables: &[String]) -> Result<Value> {
        if tables.iter().any(|t| t.trim().is_empty()) {
            return Err(ValidationError::invalid("tables", "table names must not be empty").into());
        }
        let body = json!({ "tables": tables });
        self.call(Endpoint::CountEntityTotal, Method::POST, AuthLevel::Read, Some(body)).await
    }

    pub async fn count_event(&self, queries: &[CountQuery]) -> Result<Value> {
        queries.validate()?;
        self.call(Endpoint::CountEvent, Method::POST, AuthLevel::Read, Some(encode(queries)?)).await
    }

    pub async fn aggregation(&self, query: &AggregationQuery) -> Result<Value> {
        query.validate()?;
        self.call(Endpoint::Aggregation, Method::POST, AuthLevel::Read, Some(encode(query)?)).await
    }

    pub async fn top_values(&self, request: &TopValuesRequest) -> Result<Value> {
        request.validate()?;
        self.call(Endpoint::TopValues, Method::POST, AuthLevel::Read, Some(encode(request)?)).await
    }

    /// Which of `ids` exist, optionally within `table`.
    pub async fn exists_entity(&self, ids: &[String], table: Option<&str>) -> Result<Value> {
        validate_entity_ids(ids)?;
        let mut body = json!({ "ids": ids });
        if let Some(table) = table {
            body["table"] = Value::from(table);
        }
        self.call(Endpoint::ExistsEntity, Method::POST, AuthLevel::Read, Some(body)).await
    }

    // Saved queries

    pub async fn get_saved_query(&self, name: &str) -> Result<Value> {
        validate_saved_query_name(name)?;
        self.call(Endpoint::SavedQuery(name.to_string()), Method::GET, AuthLevel::Read, None).await
    }

    pub async fn get_saved_queries(&self) -> Result<Value> {
        self.call(Endpoint::SavedQueries, Method::GET, AuthLevel::Master, None).await
    }

    pub async fn create_saved_query(&self, query: &SavedQuery) -> Result<Value> {
        query.validate()?;
        self.call(Endpoint::SavedQueries, Method::POST, AuthLevel::Master, Some(encode(query)?)).await
    }

    /// Replace the saved query `name` with `query`.
    pub async fn update_saved_query(&self, name: &str, query: &SavedQuery) -> Result<Value> {
        validate_saved_query_name(name)?;
        query.validate()?;
        self.call(
            Endpoint::SavedQuery(name.to_string()),
            Method::PUT,
            AuthLevel::Master,
            Some(encode(query)?),
        )
        .await
    }

    pub async fn delete_saved_query(&self, name: &str) -> Result<Value> {
        validate_saved_query_name(name)?;
        self.call(Endpoint::SavedQuery(name.to_string()), Method::DELETE, AuthLevel::Master, None).await
    }

    // Data extraction

    pub async fn result(&self, query: &DataExtractionQuery) -> Result<Value> {
        query.validate()?;
        self.call(Endpoint::DataExtractionResult, Method::POST, AuthLevel::Read, Some(encode(query)?)).await
    }

    pub async fn score(&self, query: &DataExtractionQuery) -> Result<Value> {
        query.validate()?;
        self.call(Endpoint::DataExtractionScore, Method::POST, AuthLevel::Read, Some(encode(query)?)).await
    }
}

fn encode<T: Serialize + ?Sized>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload).map_err(Error::Encode)
}
