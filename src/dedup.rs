//! Duplicate suppression for follow mode.
//!
//! Each poll re-scans a window that overlaps the previous one, so most hits
//! in a follow-mode response were already printed. The window tracks which
//! record ids were emitted and when, advances its start as wall time passes,
//! and drops entries the backend can no longer return.

use crate::model::Record;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;

/// Lookback kept behind "now" when the window advances, so records that
/// reach the backend slightly late or out of order still fall inside it.
pub const GRACE_SECONDS: i64 = 10;

#[derive(Debug)]
pub struct DedupWindow {
    start: DateTime<Utc>,
    seen: HashMap<String, DateTime<Utc>>,
}

impl DedupWindow {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            seen: HashMap::new(),
        }
    }

    /// Lower bound of the next query's time range.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Records not yet emitted, in input order. Leaves the window unchanged;
    /// tracking happens separately so a failed print never marks a record
    /// as seen.
    pub fn filter_new<'r>(&self, records: &'r [Record]) -> Vec<&'r Record> {
        records
            .iter()
            .filter(|record| !self.seen.contains_key(&record.id))
            .collect()
    }

    /// Tracks every record that carries a parseable timestamp. Records
    /// without one stay untracked and may be printed again on a later poll;
    /// accepted, since the backend orders hits by this very field.
    pub fn record_seen(&mut self, records: &[Record]) {
        for record in records {
            if let Some(ts) = record.timestamp() {
                self.seen.insert(record.id.clone(), ts);
            }
        }
    }

    /// Moves the window start up to `now - GRACE_SECONDS`, never backward.
    pub fn advance(&mut self, now: DateTime<Utc>) {
        let candidate = now - TimeDelta::seconds(GRACE_SECONDS);
        if candidate > self.start {
            self.start = candidate;
        }
    }

    /// Drops entries dated before the window start. With a non-regressing
    /// start such records cannot appear in any future response, so keeping
    /// them would only grow the map without bound.
    pub fn evict_stale(&mut self) {
        let start = self.start;
        self.seen.retain(|_, ts| *ts >= start);
    }

    /// Number of ids currently tracked.
    pub fn tracked(&self) -> usize {
        self.seen.len()
    }
}
