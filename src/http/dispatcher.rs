//! Request dispatcher.
//!
//! Every client operation goes through [`Dispatcher::dispatch`], which checks
//! the resolved key against the operation's required level, builds the URL
//! and headers, performs one HTTP exchange and hands the result to
//! [`handle_response`].

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::auth::{AuthLevel, KeyResolver};
use crate::config::loader::ConfigError;
use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, FieldError};
use crate::error::{Error, Result};

use super::endpoints::Endpoint;
use super::request::Requester;
use super::response::{handle_response, ApiResponse};

#[derive(Debug, Clone)]
pub struct Dispatcher {
    resolver: KeyResolver,
    requester: Requester,
    base_url: Url,
    content_type: HeaderValue,
}

impl Dispatcher {
    /// Validate `config`, resolve its key and build the HTTP client.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        validate_config(config).map_err(ConfigError::Validation)?;

        let resolver = KeyResolver::new(&config.keys)?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ConfigError::Validation(vec![FieldError::new("base_url", e.to_string())]))?;
        let content_type = HeaderValue::from_str(&config.content_type)
            .map_err(|e| ConfigError::Validation(vec![FieldError::new("content_type", e.to_string())]))?;
        let requester = Requester::new(config)?;

        tracing::debug!(
            base_url = %base_url,
            key_kind = ?resolver.kind(),
            timeout_secs = requester.timeout().as_secs(),
            "Dispatcher initialized"
        );

        Ok(Self {
            resolver,
            requester,
            base_url,
            content_type,
        })
    }

    pub fn resolver(&self) -> &KeyResolver {
        &self.resolver
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send one request and decode the response.
    ///
    /// Authorization is checked before anything is sent; a rejected key never
    /// reaches the network.
    pub async fn dispatch(
        &self,
        endpoint: &Endpoint,
        method: Method,
        required: AuthLevel,
        body: Option<&Value>,
        sandbox: bool,
    ) -> Result<ApiResponse> {
        let key = self.resolver.check_authorization(required)?;
        let url = endpoint.url(&self.base_url, sandbox)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, self.content_type.clone());
        let mut auth = HeaderValue::from_str(key)
            .map_err(|_| Error::InvalidCredentials("API key is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let body = body.map(serde_json::to_string).transpose().map_err(Error::Encode)?;

        tracing::debug!(
            method = %method,
            url = %url,
            required = %required,
            body_bytes = body.as_ref().map(String::len).unwrap_or(0),
            "Dispatching request"
        );

        let raw = self.requester.send(method, url, headers, body).await?;
        tracing::debug!(status = raw.status, "Response received");
        handle_response(raw)
    }
}
