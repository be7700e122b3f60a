//! Outbound HTTP exchange.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Method;
use url::Url;

use crate::config::schema::ClientConfig;
use crate::error::{Error, Result};

use super::response::RawResponse;

/// Thin wrapper over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct Requester {
    http: reqwest::Client,
    timeout: Duration,
}

impl Requester {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let timeout = config.timeout();
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!config.use_ssl);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform a single exchange. Non-2xx statuses are not errors here.
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<RawResponse> {
        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        Ok(RawResponse {
            status,
            headers,
            body: if text.is_empty() { None } else { Some(text) },
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Transport(format!("request timed out after {}s", self.timeout.as_secs()))
        } else {
            Error::Transport(err.to_string())
        }
    }
}

/// Lowercased header names; repeated headers are joined with ", ".
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else { continue };
        out.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    out
}
