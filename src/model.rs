//! Wire model for the backend's `_search` response.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Field the backend sorts on and record times are extracted from.
pub const TIMESTAMP_FIELD: &str = "@timestamp";

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: Option<u64>,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub hits: Hits,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub hits: Vec<Record>,
}

/// One matched log document, with any highlight fragments the backend
/// produced for it. Keyed by field path; kept ordered so rendering is
/// deterministic.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Value,
    #[serde(default)]
    pub highlight: BTreeMap<String, Vec<String>>,
}

impl Record {
    /// Raw `@timestamp` string, if the document carries one.
    pub fn timestamp_raw(&self) -> Option<&str> {
        self.source.get(TIMESTAMP_FIELD)?.as_str()
    }

    /// Parsed record time. Records without one (or with an unparsable one)
    /// yield `None` and are never tracked for duplicate suppression.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp_raw()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}
