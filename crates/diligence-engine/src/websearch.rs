//! Google Custom Search client.
//!
//! Used by the verification procedure to gather evidence for extracted
//! claims. Both the API key and the search-engine id are required; when
//! either is missing the backend reports itself unconfigured so
//! verification can degrade to SKIP without issuing calls.

use async_trait::async_trait;
use diligence_core::{BackendError, SearchHit};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::backend::SearchBackend;

const SEARCH_API_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Results retained per query.
pub const MAX_RESULTS: usize = 5;

pub struct GoogleSearchBackend {
    api_key: String,
    engine_id: String,
    client: reqwest::Client,
}

impl GoogleSearchBackend {
    pub fn new(api_key: String, engine_id: String) -> Self {
        Self {
            api_key,
            engine_id,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .expect("reqwest client"),
        }
    }

    /// Read `GOOGLE_SEARCH_API_KEY` and `GOOGLE_SEARCH_ENGINE_ID` from the
    /// environment. Missing variables yield an unconfigured backend rather
    /// than an error; verification handles the degradation.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("GOOGLE_SEARCH_API_KEY").unwrap_or_default(),
            std::env::var("GOOGLE_SEARCH_ENGINE_ID").unwrap_or_default(),
        )
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

#[async_trait]
impl SearchBackend for GoogleSearchBackend {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, BackendError> {
        if !self.is_configured() {
            return Err(BackendError::NotConfigured("search"));
        }

        debug!(query, "search backend request");

        let response = self
            .client
            .get(SEARCH_API_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", "5"),
            ])
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(parsed
            .items
            .into_iter()
            .take(MAX_RESULTS)
            .map(|item| SearchHit {
                title: item.title,
                snippet: item.snippet,
                url: item.link,
            })
            .collect())
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.engine_id.is_empty()
    }
}
