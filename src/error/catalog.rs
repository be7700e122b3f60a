//! Service error catalog.
//!
//! # Responsibilities
//! - Map the integer codes returned by the service to typed error kinds
//! - Carry a static human message per kind
//! - Group codes into categories by documented range
//!
//! # Design Decisions
//! - One sorted static table is the single source of truth; lookups are a
//!   binary search, so the table is compiled once and shared across threads
//! - Unmapped codes resolve to `ServiceErrorKind::Unknown`, never a panic

use std::fmt;

/// Broad grouping of service error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// 10-19: authentication and authorization.
    Auth,
    /// 20-29: request format.
    Request,
    /// 30-39: account state.
    Account,
    /// 40-59: column definitions.
    Field,
    /// 60-79: indexing and time-series.
    Index,
    /// 80-127: queries.
    Query,
    /// 130 and above: service internals.
    Internal,
    /// Anything outside the documented ranges.
    Unknown,
}

impl ErrorCategory {
    /// Category for a raw code, by documented range.
    pub fn from_code(code: i64) -> Self {
        match code {
            10..=19 => ErrorCategory::Auth,
            20..=29 => ErrorCategory::Request,
            30..=39 => ErrorCategory::Account,
            40..=59 => ErrorCategory::Field,
            60..=79 => ErrorCategory::Index,
            80..=127 => ErrorCategory::Query,
            130.. => ErrorCategory::Internal,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Typed error kinds reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    AuthMissingHeader,
    AuthApiKey,
    AuthInvalidApiKey,
    AuthIncorrectPermission,
    AuthInvalidRemote,
    CustomKeyInvalidFieldCreation,
    CustomKeyInvalidPermissionForField,
    CustomKeyInvalidOperation,
    CustomKeyNotPermitted,
    CustomKeyRouteNotPermitted,
    DemoApiInvalidEndpoint,
    RequestMissingContentType,
    RequestIncorrectContentTypeValue,
    RequestRateLimit,
    RequestInvalidJson,
    RequestInvalidHttpMethod,
    RequestInvalidEndpoint,
    RequestIncorrectHttp,
    RequestExceedLimit,
    AccountMissingPaymentMethod,
    AccountPaymentRequired,
    AccountBanned,
    AccountDisabled,
    FieldInvalidRange,
    FieldMissingParam,
    FieldType,
    FieldIntegerValues,
    FieldAlreadyExists,
    FieldLimit,
    FieldTimeSeriesLimit,
    FieldTimeSeriesSystemLimit,
    FieldDecimalType,
    FieldStorageValue,
    FieldInvalidApiName,
    FieldInvalidName,
    FieldInvalidDescription,
    FieldExceedDescriptionLength,
    FieldInvalidCardinality,
    FieldDecimalLimit,
    FieldRangeLimit,
    FieldExceededMaxNameLength,
    FieldExceededMaxApiNameLength,
    FieldEmptyEntityId,
    FieldExceededPermittedValue,
    IndexInvalidDecimalPlaces,
    IndexEntityValueType,
    IndexFieldNameType,
    IndexFieldType,
    IndexEntityNameTooBig,
    IndexFieldValueTooBig,
    IndexTimeSeriesDateFormat,
    IndexFieldNotActive,
    IndexIdLimit,
    IndexFieldLimit,
    IndexDateFormat,
    IndexFieldStringEmptyValue,
    IndexFieldTimeSeriesInvalidParameter,
    IndexFieldNumericInvalidValue,
    IndexFieldTimeSeriesMissingValue,
    QueryTimeSeriesInvalidPrecisionSeconds,
    QueryTimeSeriesInvalidPrecisionMinutes,
    QueryTimeSeriesInvalidPrecisionHours,
    QueryDateFormat,
    QueryRelativeInterval,
    QueryMissingQuery,
    QueryInvalidType,
    QueryMissingTypeParam,
    QueryInvalidOperator,
    QueryIncorrectOperatorUsage,
    QueryFieldNotActive,
    QueryMissingOperator,
    QueryIncomplete,
    QueryEventCount,
    QueryInvalidMetric,
    QueryInteger,
    QueryFieldLimit,
    QueryLevelLimit,
    QueryBadAggsFormation,
    QueryInvalidAggFilter,
    QueryMetricsLevel,
    QueryTimeSeries,
    QueryMetricsType,
    QueryContainsNumeric,
    QueryExistsEntityLimit,
    QueryMultipleFilters,
    QueryMissingNameParam,
    QuerySavedAlreadyExists,
    QuerySavedNotExists,
    QuerySavedInvalidType,
    MethodNotAllowed,
    QueryExistsMissingIds,
    QueryInvalidFormat,
    QueryTopValuesParameterEmpty,
    QueryDataExtractionLimitValue,
    QueryDataExtractionLimitValueTooBig,
    QueryDataExtractionLimitAndPageToken,
    QueryDataExtractionPageTokenValue,
    QueryDataExtractionFieldLimit,
    QueryExistsEntityEmpty,
    QuerySavedInvalidQueryValue,
    QuerySavedInvalidCachePeriodValue,
    QuerySavedInvalidName,
    QueryCountInvalidParameter,
    QueryAggregationInvalidParameter,
    QueryAggregationInvalidFilterQuery,
    QueryInvalidMinfreq,
    QueryExceededMaxNumberQueries,
    QueryInvalidOperatorUsage,
    QueryInvalidParameterUsage,
    QueryParameterInvalidFieldUsage,
    QueryInvalidFieldUsage,
    Internal,
    FieldCreateInternal,
    /// Fallback for codes the catalog does not know.
    Unknown,
}

/// One row of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: u16,
    pub kind: ServiceErrorKind,
    pub message: &'static str,
}

const fn entry(code: u16, kind: ServiceErrorKind, message: &'static str) -> CatalogEntry {
    CatalogEntry { code, kind, message }
}

use ServiceErrorKind as K;

// Sorted by code.
static CATALOG: &[CatalogEntry] = &[
    entry(10, K::AuthMissingHeader, "Authorization header is missing"),
    entry(11, K::AuthApiKey, "API key is not valid for this request"),
    entry(12, K::AuthInvalidApiKey, "API key is invalid"),
    entry(13, K::AuthIncorrectPermission, "API key does not have permission for this operation"),
    entry(14, K::AuthInvalidRemote, "Request origin is not allowed for this key"),
    entry(15, K::CustomKeyInvalidFieldCreation, "Custom key cannot create this column"),
    entry(16, K::CustomKeyInvalidPermissionForField, "Custom key has no permission for this column"),
    entry(17, K::CustomKeyInvalidOperation, "Custom key cannot perform this operation"),
    entry(18, K::CustomKeyNotPermitted, "Custom keys are not permitted for this account"),
    entry(19, K::CustomKeyRouteNotPermitted, "Custom key cannot access this route"),
    entry(20, K::DemoApiInvalidEndpoint, "Endpoint is not available on the demo API"),
    entry(21, K::RequestMissingContentType, "Request is missing the Content-Type header"),
    entry(22, K::RequestIncorrectContentTypeValue, "Request Content-Type value is not supported"),
    entry(23, K::RequestRateLimit, "Request rate limit exceeded"),
    entry(24, K::RequestInvalidJson, "Request body is not valid JSON"),
    entry(25, K::RequestInvalidHttpMethod, "HTTP method is not valid for this endpoint"),
    entry(26, K::RequestInvalidEndpoint, "Endpoint does not exist"),
    entry(27, K::RequestIncorrectHttp, "Request must use HTTPS"),
    entry(28, K::RequestExceedLimit, "Request exceeds the size limit"),
    entry(30, K::AccountMissingPaymentMethod, "Account has no payment method"),
    entry(31, K::AccountPaymentRequired, "Account payment is required"),
    entry(32, K::AccountBanned, "Account is banned"),
    entry(33, K::AccountDisabled, "Account is disabled"),
    entry(39, K::FieldInvalidRange, "Column range is invalid"),
    entry(40, K::FieldMissingParam, "Column definition is missing a parameter"),
    entry(41, K::FieldType, "Column type is invalid"),
    entry(42, K::FieldIntegerValues, "Column integer values are invalid"),
    entry(43, K::FieldAlreadyExists, "Column already exists"),
    entry(44, K::FieldLimit, "Column limit reached"),
    entry(45, K::FieldTimeSeriesLimit, "Time-series column limit reached"),
    entry(46, K::FieldTimeSeriesSystemLimit, "Time-series system limit reached"),
    entry(47, K::FieldDecimalType, "Decimal column definition is invalid"),
    entry(48, K::FieldStorageValue, "Column storage value is invalid"),
    entry(49, K::FieldInvalidApiName, "Column api-name is invalid"),
    entry(50, K::FieldInvalidName, "Column name is invalid"),
    entry(51, K::FieldInvalidDescription, "Column description is invalid"),
    entry(52, K::FieldExceedDescriptionLength, "Column description is too long"),
    entry(53, K::FieldInvalidCardinality, "Column cardinality is invalid"),
    entry(54, K::FieldDecimalLimit, "Column decimal places exceed the limit"),
    entry(55, K::FieldRangeLimit, "Column range exceeds the limit"),
    entry(56, K::FieldExceededMaxNameLength, "Column name is too long"),
    entry(57, K::FieldExceededMaxApiNameLength, "Column api-name is too long"),
    entry(58, K::FieldEmptyEntityId, "Entity id is empty"),
    entry(59, K::FieldExceededPermittedValue, "Column value exceeds the permitted value"),
    entry(60, K::IndexInvalidDecimalPlaces, "Inserted value has invalid decimal places"),
    entry(61, K::IndexEntityValueType, "Entity value type is invalid"),
    entry(62, K::IndexFieldNameType, "Column name type is invalid"),
    entry(63, K::IndexFieldType, "Inserted value does not match the column type"),
    entry(64, K::IndexEntityNameTooBig, "Entity id is too long"),
    entry(65, K::IndexFieldValueTooBig, "Inserted value is too big"),
    entry(66, K::IndexTimeSeriesDateFormat, "Time-series date format is invalid"),
    entry(67, K::IndexFieldNotActive, "Column is not active"),
    entry(68, K::IndexIdLimit, "Insert exceeds the entity limit"),
    entry(69, K::IndexFieldLimit, "Insert exceeds the column limit"),
    entry(70, K::IndexDateFormat, "Date format is invalid"),
    entry(71, K::IndexFieldStringEmptyValue, "String value is empty"),
    entry(72, K::IndexFieldTimeSeriesInvalidParameter, "Time-series parameter is invalid"),
    entry(73, K::IndexFieldNumericInvalidValue, "Numeric value is invalid"),
    entry(74, K::IndexFieldTimeSeriesMissingValue, "Time-series value is missing"),
    entry(75, K::QueryTimeSeriesInvalidPrecisionSeconds, "Time-series precision in seconds is invalid"),
    entry(76, K::QueryTimeSeriesInvalidPrecisionMinutes, "Time-series precision in minutes is invalid"),
    entry(77, K::QueryTimeSeriesInvalidPrecisionHours, "Time-series precision in hours is invalid"),
    entry(78, K::QueryDateFormat, "Query date format is invalid"),
    entry(79, K::QueryRelativeInterval, "Query relative interval is invalid"),
    entry(80, K::QueryMissingQuery, "Query is missing"),
    entry(81, K::QueryInvalidType, "Query type is invalid"),
    entry(82, K::QueryMissingTypeParam, "Query type parameter is missing"),
    entry(83, K::QueryInvalidOperator, "Query operator is invalid"),
    entry(84, K::QueryIncorrectOperatorUsage, "Query operator is used incorrectly"),
    entry(85, K::QueryFieldNotActive, "Queried column is not active"),
    entry(86, K::QueryMissingOperator, "Query operator is missing"),
    entry(87, K::QueryIncomplete, "Query is incomplete"),
    entry(88, K::QueryEventCount, "Event count query is invalid"),
    entry(89, K::QueryInvalidMetric, "Query metric is invalid"),
    entry(90, K::QueryInteger, "Query integer value is invalid"),
    entry(91, K::QueryFieldLimit, "Query exceeds the column limit"),
    entry(92, K::QueryLevelLimit, "Query exceeds the nesting level limit"),
    entry(93, K::QueryBadAggsFormation, "Aggregation query is malformed"),
    entry(94, K::QueryInvalidAggFilter, "Aggregation filter is invalid"),
    entry(95, K::QueryMetricsLevel, "Query metrics level is invalid"),
    entry(96, K::QueryTimeSeries, "Time-series query is invalid"),
    entry(97, K::QueryMetricsType, "Query metrics type is invalid"),
    entry(98, K::QueryContainsNumeric, "Query 'contains' cannot be used on numeric columns"),
    entry(99, K::QueryExistsEntityLimit, "Exists query exceeds the entity limit"),
    entry(100, K::QueryMultipleFilters, "Query has multiple filters"),
    entry(102, K::QueryMissingNameParam, "Query name parameter is missing"),
    entry(103, K::QuerySavedAlreadyExists, "Saved query already exists"),
    entry(104, K::QuerySavedNotExists, "Saved query does not exist"),
    entry(105, K::QuerySavedInvalidType, "Saved query type is invalid"),
    entry(106, K::MethodNotAllowed, "Method not allowed"),
    entry(107, K::QueryExistsMissingIds, "Exists query is missing ids"),
    entry(108, K::QueryInvalidFormat, "Query format is invalid"),
    entry(109, K::QueryTopValuesParameterEmpty, "Top values query parameter is empty"),
    entry(110, K::QueryDataExtractionLimitValue, "Data extraction limit is invalid"),
    entry(111, K::QueryDataExtractionLimitValueTooBig, "Data extraction limit is too big"),
    entry(112, K::QueryDataExtractionLimitAndPageToken, "Data extraction cannot use limit and page-token together"),
    entry(113, K::QueryDataExtractionPageTokenValue, "Data extraction page-token is invalid"),
    entry(114, K::QueryDataExtractionFieldLimit, "Data extraction exceeds the column limit"),
    entry(115, K::QueryExistsEntityEmpty, "Exists query has no entities"),
    entry(116, K::QuerySavedInvalidQueryValue, "Saved query value is invalid"),
    entry(117, K::QuerySavedInvalidCachePeriodValue, "Saved query cache period is invalid"),
    entry(118, K::QuerySavedInvalidName, "Saved query name is invalid"),
    entry(119, K::QueryCountInvalidParameter, "Count query parameter is invalid"),
    entry(120, K::QueryAggregationInvalidParameter, "Aggregation query parameter is invalid"),
    entry(121, K::QueryAggregationInvalidFilterQuery, "Aggregation filter query is invalid"),
    entry(122, K::QueryInvalidMinfreq, "Query minfreq is invalid"),
    entry(123, K::QueryExceededMaxNumberQueries, "Request exceeds the maximum number of queries"),
    entry(124, K::QueryInvalidOperatorUsage, "Query operator usage is invalid"),
    entry(125, K::QueryInvalidParameterUsage, "Query parameter usage is invalid"),
    entry(126, K::QueryParameterInvalidFieldUsage, "Query parameter is used on an invalid column"),
    entry(127, K::QueryInvalidFieldUsage, "Query column usage is invalid"),
    entry(130, K::Internal, "Internal service error"),
    entry(131, K::FieldCreateInternal, "Internal error while creating the column"),
];

/// The full catalog, sorted by code.
pub fn catalog() -> &'static [CatalogEntry] {
    CATALOG
}

fn find(code: i64) -> Option<&'static CatalogEntry> {
    let code = u16::try_from(code).ok()?;
    CATALOG
        .binary_search_by_key(&code, |e| e.code)
        .ok()
        .map(|idx| &CATALOG[idx])
}

/// Map a service error code to its kind.
pub fn map_code(code: i64) -> ServiceErrorKind {
    find(code).map(|e| e.kind).unwrap_or(ServiceErrorKind::Unknown)
}

impl ServiceErrorKind {
    /// Catalog code for this kind; `None` for `Unknown`.
    pub fn code(self) -> Option<u16> {
        CATALOG.iter().find(|e| e.kind == self).map(|e| e.code)
    }

    pub fn message(self) -> &'static str {
        CATALOG
            .iter()
            .find(|e| e.kind == self)
            .map(|e| e.message)
            .unwrap_or("Unmapped service error")
    }

    pub fn category(self) -> ErrorCategory {
        self.code()
            .map(|c| ErrorCategory::from_code(i64::from(c)))
            .unwrap_or(ErrorCategory::Unknown)
    }
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
