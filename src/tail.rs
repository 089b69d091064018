//! The poll loop: query, filter, print, advance, sleep.

use crate::client::SearchBackend;
use crate::dedup::DedupWindow;
use crate::printer::RecordPrinter;
use crate::query::SearchParams;
use anyhow::Result;
use chrono::{TimeDelta, Utc};
use std::io::Write;
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

/// Pause between polls in follow mode.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct TailOptions {
    pub query: String,
    pub num_results: usize,
    /// How far back the first query reaches.
    pub period: TimeDelta,
    pub follow: bool,
}

pub struct Tailer<B, W> {
    backend: B,
    printer: RecordPrinter<W>,
    window: DedupWindow,
    options: TailOptions,
    poll_interval: Duration,
}

impl<B: SearchBackend, W: Write> Tailer<B, W> {
    pub fn new(backend: B, printer: RecordPrinter<W>, options: TailOptions) -> Self {
        let window = DedupWindow::new(Utc::now() - options.period);
        Self {
            backend,
            printer,
            window,
            options,
            poll_interval: POLL_INTERVAL,
        }
    }

    #[cfg(test)]
    fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Runs until the batch is printed, or forever in follow mode. Backend
    /// and write errors are fatal either way; everything printed before the
    /// failure stays printed.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let now = Utc::now();
            let params = SearchParams {
                query: &self.options.query,
                limit: self.options.num_results,
                start: self.window.start(),
                end: now,
                highlight: self.printer.interactive(),
            };
            let records = self.backend.search(&params)?;
            let fresh = self.window.filter_new(&records);
            debug!(
                returned = records.len(),
                fresh = fresh.len(),
                window_start = %self.window.start(),
                "poll cycle"
            );
            for record in fresh {
                self.printer.print(record)?;
            }

            if !self.options.follow {
                return Ok(());
            }

            self.window.advance(Utc::now());
            self.window.record_seen(&records);
            self.window.evict_stale();
            trace!(tracked = self.window.tracked(), "seen set updated");
            thread::sleep(self.poll_interval);
        }
    }
}
