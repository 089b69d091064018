//! Blocking search client for the backend's `_search` endpoint.

use crate::model::{Record, SearchResponse};
use crate::query::{SearchParams, build_query};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

/// The poller's view of the backend: one time-bounded query per call.
pub trait SearchBackend {
    fn search(&self, params: &SearchParams) -> Result<Vec<Record>>;
}

pub struct EsClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl EsClient {
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(concat!("estail/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building http client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl SearchBackend for EsClient {
    fn search(&self, params: &SearchParams) -> Result<Vec<Record>> {
        let url = format!("{}/_search", self.base_url);
        let body = build_query(params);
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .with_context(|| format!("sending search request to {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            let detail = detail.trim();
            if detail.is_empty() {
                anyhow::bail!("search backend returned {status}");
            }
            anyhow::bail!("search backend returned {status}: {detail:.200}");
        }

        let decoded: SearchResponse = response
            .json()
            .context("decoding search response")?;
        debug!(
            took_ms = decoded.took,
            timed_out = decoded.timed_out,
            hits = decoded.hits.hits.len(),
            "search completed"
        );
        Ok(decoded.hits.hits)
    }
}
