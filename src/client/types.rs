//! Typed request payloads.
//!
//! Filter expressions stay as JSON values; their grammar is checked by
//! `validation::filter`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column data types supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnType {
    UniqueId,
    Boolean,
    String,
    Integer,
    Decimal,
    Enumerated,
    Date,
    Datetime,
    IntegerTimeSeries,
    DecimalTimeSeries,
    StringTimeSeries,
}

impl ColumnType {
    pub fn is_decimal(self) -> bool {
        matches!(self, ColumnType::Decimal | ColumnType::DecimalTimeSeries)
    }

    pub fn is_time_series(self) -> bool {
        matches!(
            self,
            ColumnType::IntegerTimeSeries | ColumnType::DecimalTimeSeries | ColumnType::StringTimeSeries
        )
    }
}

/// Cardinality hint for string columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    High,
    Low,
}

/// A column definition for `create_column`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ColumnDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub column_type: ColumnType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Required for `string` columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,

    /// Required for decimal columns, rejected elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_place: Option<u8>,

    /// Allowed values; required for `enumerated` columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<String>>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            api_name: None,
            description: None,
            cardinality: None,
            decimal_place: None,
            range: None,
        }
    }

    pub fn with_api_name(mut self, api_name: impl Into<String>) -> Self {
        self.api_name = Some(api_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = Some(cardinality);
        self
    }

    pub fn with_decimal_place(mut self, places: u8) -> Self {
        self.decimal_place = Some(places);
        self
    }

    pub fn with_range<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.range = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// One column or a batch of columns, sent as an object or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Columns {
    One(ColumnDefinition),
    Many(Vec<ColumnDefinition>),
}

impl Columns {
    pub fn as_slice(&self) -> &[ColumnDefinition] {
        match self {
            Columns::One(column) => std::slice::from_ref(column),
            Columns::Many(columns) => columns,
        }
    }
}

impl From<ColumnDefinition> for Columns {
    fn from(column: ColumnDefinition) -> Self {
        Columns::One(column)
    }
}

impl From<Vec<ColumnDefinition>> for Columns {
    fn from(columns: Vec<ColumnDefinition>) -> Self {
        Columns::Many(columns)
    }
}

/// What the service may create on the fly during an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoCreate {
    Table,
    Column,
}

/// Column values keyed by column api-name.
pub type EntityValues = BTreeMap<String, Value>;

/// Top-level key of an insert payload that is not an entity id.
pub const AUTO_CREATE_KEY: &str = "auto-create";

/// Insert payload: entity id → column → value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsertPayload {
    #[serde(rename = "auto-create", default, skip_serializing_if = "Vec::is_empty")]
    pub auto_create: Vec<AutoCreate>,

    #[serde(flatten)]
    pub entities: BTreeMap<String, EntityValues>,
}

impl InsertPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one column value for an entity.
    pub fn set(
        &mut self,
        entity_id: impl Into<String>,
        column: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.entities
            .entry(entity_id.into())
            .or_default()
            .insert(column.into(), value.into());
        self
    }

    /// Builder form of `set`.
    pub fn with(mut self, entity_id: impl Into<String>, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(entity_id, column, value);
        self
    }

    pub fn with_auto_create(mut self, kinds: impl IntoIterator<Item = AutoCreate>) -> Self {
        self.auto_create = kinds.into_iter().collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// A named count query (entity or event).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CountQuery {
    pub query_name: String,

    /// Filter expression.
    pub query: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_cache: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

impl CountQuery {
    pub fn new(query_name: impl Into<String>, query: Vec<Value>) -> Self {
        Self {
            query_name: query_name.into(),
            query,
            bypass_cache: None,
            table: None,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn bypass_cache(mut self, bypass: bool) -> Self {
        self.bypass_cache = Some(bypass);
        self
    }
}

/// Aggregation query: column aggregations plus an optional filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationQuery {
    pub query: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<Value>>,
}

/// One named top-values query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopValuesQuery {
    pub column: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contains: Vec<String>,

    /// Extra service parameters such as `quantity`.
    #[serde(flatten)]
    pub params: BTreeMap<String, Value>,
}

impl TopValuesQuery {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            contains: Vec::new(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_contains<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contains = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Number of keys sent for this query.
    pub fn param_count(&self) -> usize {
        1 + usize::from(!self.contains.is_empty()) + self.params.len()
    }
}

/// Top-values request: query name → query.
pub type TopValuesRequest = BTreeMap<String, TopValuesQuery>;

/// Column selection for data extraction: the keyword `all` or explicit names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSelection {
    Keyword(String),
    Names(Vec<String>),
}

impl ColumnSelection {
    pub const ALL: &'static str = "all";

    pub fn all() -> Self {
        ColumnSelection::Keyword(Self::ALL.to_string())
    }
}

/// Data extraction query for `result` and `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DataExtractionQuery {
    pub query: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnSelection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl DataExtractionQuery {
    pub fn new(query: Vec<Value>) -> Self {
        Self {
            query,
            columns: None,
            limit: None,
            page_token: None,
        }
    }

    pub fn with_columns(mut self, columns: ColumnSelection) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }
}

/// Query kinds that can be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SavedQueryType {
    #[serde(rename = "count/entity")]
    CountEntity,
    #[serde(rename = "count/event")]
    CountEvent,
    #[serde(rename = "aggregation")]
    Aggregation,
    #[serde(rename = "top_values")]
    TopValues,
    #[serde(rename = "result")]
    Result,
    #[serde(rename = "score")]
    Score,
}

impl SavedQueryType {
    /// Wire name of the query kind.
    pub fn as_str(self) -> &'static str {
        match self {
            SavedQueryType::CountEntity => "count/entity",
            SavedQueryType::CountEvent => "count/event",
            SavedQueryType::Aggregation => "aggregation",
            SavedQueryType::TopValues => "top_values",
            SavedQueryType::Result => "result",
            SavedQueryType::Score => "score",
        }
    }

    /// Whether the saved `query` is a filter expression.
    pub fn takes_filter(self) -> bool {
        matches!(
            self,
            SavedQueryType::CountEntity | SavedQueryType::CountEvent | SavedQueryType::Result | SavedQueryType::Score
        )
    }
}

/// Body of a saved query: a list for filter and aggregation kinds, a map of
/// named queries for `top_values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SavedQueryBody {
    List(Vec<Value>),
    TopValues(TopValuesRequest),
}

impl From<Vec<Value>> for SavedQueryBody {
    fn from(list: Vec<Value>) -> Self {
        SavedQueryBody::List(list)
    }
}

impl From<TopValuesRequest> for SavedQueryBody {
    fn from(request: TopValuesRequest) -> Self {
        SavedQueryBody::TopValues(request)
    }
}

/// A named, persisted query definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SavedQuery {
    pub name: String,

    #[serde(rename = "type")]
    pub query_type: SavedQueryType,

    pub query: SavedQueryBody,

    /// Seconds the service may cache results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_period: Option<u64>,
}

impl SavedQuery {
    pub fn new(name: impl Into<String>, query_type: SavedQueryType, query: impl Into<SavedQueryBody>) -> Self {
        Self {
            name: name.into(),
            query_type,
            query: query.into(),
            cache_period: None,
        }
    }

    pub fn with_cache_period(mut self, secs: u64) -> Self {
        self.cache_period = Some(secs);
        self
    }
}
