//! Response decoding and error mapping.
//!
//! # Responsibilities
//! - Reject empty bodies
//! - Decode the JSON body
//! - Map embedded service error codes through the catalog
//! - Treat any status other than 200 without an error code as an HTTP error
//!
//! An embedded error code takes precedence over the HTTP status, so a 200
//! response carrying `{"code": 42}` is still a failure.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};

/// The only status treated as success.
pub const SUCCESS_STATUS: u16 = 200;

/// Undecoded response as received from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

/// Status and headers of the most recent exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
}

/// Successfully decoded response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub payload: Value,
    pub meta: ResponseMeta,
}

/// Decode `raw` and turn service-reported failures into errors.
pub fn handle_response(raw: RawResponse) -> Result<ApiResponse> {
    let body = raw
        .body
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .ok_or_else(|| Error::Transport(format!("empty response body (HTTP {})", raw.status)))?;

    let payload: Value = serde_json::from_str(body).map_err(Error::Decode)?;

    if let Some((code, message)) = embedded_error(&payload) {
        return Err(Error::from_service_code(code, raw.status, message));
    }
    if raw.status != SUCCESS_STATUS {
        return Err(Error::Http(raw.status));
    }

    Ok(ApiResponse {
        payload,
        meta: ResponseMeta {
            status: raw.status,
            headers: raw.headers,
        },
    })
}

/// Either `{"code": n, "message": ..}` or `{"errors": [{"code": n, ..}, ..]}`.
/// Only the first entry of an error list is reported.
fn embedded_error(payload: &Value) -> Option<(i64, Option<String>)> {
    let obj = payload.as_object()?;
    let source = match obj.get("errors").and_then(Value::as_array) {
        Some(errors) => errors.first()?.as_object()?,
        None => obj,
    };
    let code = source.get("code").and_then(Value::as_i64)?;
    let message = source.get("message").and_then(Value::as_str).map(str::to_string);
    Some((code, message))
}
