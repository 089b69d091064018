//! Renders records for humans and for pipes.

use crate::highlight::{self, HIGHLIGHT_BEGIN, HIGHLIGHT_END};
use crate::model::Record;
use anyhow::Result;
use colored::Colorize;
use std::io::Write;

/// ANSI substitution for the sentinel markers in interactive mode.
const MARK_BEGIN_ANSI: &str = "\x1b[1;31m";
const MARK_END_ANSI: &str = "\x1b[0m";

/// Header shown for records without a usable `@timestamp`.
const NO_TIMESTAMP: &str = "-";

pub struct RecordPrinter<W> {
    out: W,
    interactive: bool,
}

impl<W: Write> RecordPrinter<W> {
    pub fn new(out: W, interactive: bool) -> Self {
        Self { out, interactive }
    }

    /// True when rendering colors and highlights. The poller only asks the
    /// backend for highlight fragments in this mode.
    pub fn interactive(&self) -> bool {
        self.interactive
    }

    /// Writes one record. Interactive mode pretty-prints the document with
    /// highlight markers swapped for colors and a blank separator line;
    /// pipe mode emits exactly one compact line per record.
    pub fn print(&mut self, record: &Record) -> Result<()> {
        let timestamp = record.timestamp_raw().unwrap_or(NO_TIMESTAMP);
        if self.interactive {
            let mut doc = record.source.clone();
            highlight::apply_highlights(&mut doc, &record.highlight);
            let rendered = serde_json::to_string_pretty(&doc)?
                .replace(HIGHLIGHT_BEGIN, MARK_BEGIN_ANSI)
                .replace(HIGHLIGHT_END, MARK_END_ANSI);
            writeln!(self.out, "{} -- {rendered}\n", timestamp.blue().bold())?;
        } else {
            let rendered = serde_json::to_string(&record.source)?;
            writeln!(self.out, "{timestamp} -- {rendered}")?;
        }
        Ok(())
    }
}
