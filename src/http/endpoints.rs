//! Service endpoints and URL construction.

use url::Url;

use crate::error::{Error, Result};

/// Path segment inserted after the base URL for sandbox calls.
pub const TEST_SUFFIX: &str = "/test";

/// REST endpoints exposed by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Database,
    Column,
    Insert,
    CountEntity,
    CountEntityTotal,
    CountEvent,
    Aggregation,
    TopValues,
    ExistsEntity,
    SavedQueries,
    /// A single saved query, addressed by name.
    SavedQuery(String),
    DataExtractionResult,
    DataExtractionScore,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Database => "/database/",
            Endpoint::Column => "/column/",
            Endpoint::Insert => "/insert/",
            Endpoint::CountEntity => "/query/count/entity/",
            Endpoint::CountEntityTotal => "/query/count/entity/total/",
            Endpoint::CountEvent => "/query/count/event/",
            Endpoint::Aggregation => "/query/aggregation/",
            Endpoint::TopValues => "/query/top_values/",
            Endpoint::ExistsEntity => "/query/exists/entity/",
            Endpoint::SavedQueries | Endpoint::SavedQuery(_) => "/query/saved/",
            Endpoint::DataExtractionResult => "/data_extraction/result/",
            Endpoint::DataExtractionScore => "/data_extraction/score/",
        }
    }

    /// Whether the `/test` sandbox applies. Database info is account-wide.
    pub fn supports_sandbox(&self) -> bool {
        !matches!(self, Endpoint::Database)
    }

    /// Full request URL under `base`.
    pub fn url(&self, base: &Url, sandbox: bool) -> Result<Url> {
        let mut raw = base.as_str().trim_end_matches('/').to_string();
        if sandbox && self.supports_sandbox() {
            raw.push_str(TEST_SUFFIX);
        }
        raw.push_str(self.path());

        let mut url = Url::parse(&raw).map_err(|e| Error::Transport(format!("invalid request URL '{}': {}", raw, e)))?;
        if let Endpoint::SavedQuery(name) = self {
            url.path_segments_mut()
                .map_err(|_| Error::Transport(format!("cannot append path to '{}'", raw)))?
                .pop_if_empty()
                .push(name);
        }
        Ok(url)
    }
}
