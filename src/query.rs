//! Builds the `_search` request body.

use crate::highlight::{HIGHLIGHT_BEGIN, HIGHLIGHT_END};
use crate::model::TIMESTAMP_FIELD;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

/// One search request, as the poller issues it.
#[derive(Debug, Clone)]
pub struct SearchParams<'a> {
    /// User query, passed through verbatim as a `query_string`.
    pub query: &'a str,
    pub limit: usize,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Ask the backend for marked-up fragments on every field. Off in pipe
    /// mode, where nothing would render them.
    pub highlight: bool,
}

/// Fragment sizing mirrors what log documents need: one fragment can hold a
/// whole stack trace, and a hundred of them covers any realistic document.
const FRAGMENT_SIZE: u32 = 32_000;
const NUMBER_OF_FRAGMENTS: u32 = 100;

pub fn build_query(params: &SearchParams) -> Value {
    let mut body = json!({
        "size": params.limit,
        "sort": {
            TIMESTAMP_FIELD: {
                "order": "asc",
                // Sorting must not fail on indices that lack the field.
                "unmapped_type": "long"
            }
        },
        "query": {
            "bool": {
                "must": [
                    {
                        "query_string": {
                            "query": params.query,
                            "analyze_wildcard": true
                        }
                    },
                    {
                        "range": {
                            TIMESTAMP_FIELD: {
                                "gte": params.start.timestamp_millis(),
                                "lte": params.end.timestamp_millis(),
                                "format": "epoch_millis"
                            }
                        }
                    }
                ]
            }
        }
    });
    if params.highlight {
        body["highlight"] = json!({
            "pre_tags": [HIGHLIGHT_BEGIN],
            "post_tags": [HIGHLIGHT_END],
            "fields": {
                "*": {
                    // Fragments must come from the stored source so the bare
                    // text matches the document verbatim.
                    "force_source": true,
                    "fragment_size": FRAGMENT_SIZE,
                    "number_of_fragments": NUMBER_OF_FRAGMENTS
                }
            }
        });
    }
    body
}
