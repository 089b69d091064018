//! Re-inserts backend highlight fragments into the matched document.
//!
//! The backend returns, per field path, copies of the field value with the
//! matched substrings wrapped in sentinel markers. Reinjection locates the
//! live value at each path and rewrites every occurrence of the bare matched
//! text with its marked-up form, so the presenter can later turn the markers
//! into terminal colors.

use serde_json::Value;
use std::collections::BTreeMap;

/// Sentinel wrapped around matched substrings by the backend, as requested
/// in the query's highlight directive. Unusual on purpose: it must never
/// collide with text that occurs in real log data.
pub const HIGHLIGHT_BEGIN: &str = "@BEGIN-ESTAIL-HIGHLIGHT@";
pub const HIGHLIGHT_END: &str = "@END-ESTAIL-HIGHLIGHT@";

/// Secondary not-analyzed index variant of a field. Highlights on these
/// paths never correspond to a renderable value in the document.
const RAW_FIELD_SUFFIX: &str = ".raw";

/// Applies every fragment to the document in place. Paths that do not
/// resolve to a value are skipped silently; a highlight is a rendering
/// hint, never a reason to drop the record.
pub fn apply_highlights(doc: &mut Value, highlights: &BTreeMap<String, Vec<String>>) {
    for (path, fragments) in highlights {
        if path.ends_with(RAW_FIELD_SUFFIX) {
            continue;
        }
        let Some(slot) = resolve_path(doc, path) else {
            continue;
        };
        for fragment in fragments {
            let bare = fragment
                .replace(HIGHLIGHT_BEGIN, "")
                .replace(HIGHLIGHT_END, "");
            if bare.is_empty() {
                // An empty needle would interleave the fragment between
                // every character of the target string.
                continue;
            }
            let current = slot.take();
            *slot = inject(current, &bare, fragment);
        }
    }
}

/// Walks one mapping level per dotted segment, except the last, and returns
/// the slot holding the final segment's value. Any shape mismatch along the
/// way means the path names nothing renderable and resolves to `None`.
fn resolve_path<'doc>(doc: &'doc mut Value, path: &str) -> Option<&'doc mut Value> {
    let segments: Vec<&str> = path.split('.').collect();
    let (last, parents) = segments.split_last()?;
    let mut node = doc;
    for segment in parents {
        node = node.as_object_mut()?.get_mut(*segment)?;
    }
    node.as_object_mut()?.get_mut(*last)
}

/// Rebuilds `value` with every occurrence of `bare` in string leaves
/// replaced by the marked-up `fragment`. Arrays and nested mappings
/// recurse; non-string scalars pass through untouched.
fn inject(value: Value, bare: &str, fragment: &str) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| inject(item, bare, fragment))
                .collect(),
        ),
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, item)| (key, inject(item, bare, fragment)))
                .collect(),
        ),
        Value::String(text) => Value::String(text.replace(bare, fragment)),
        other => other,
    }
}
