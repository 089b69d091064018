pub mod client;
pub mod dedup;
pub mod duration;
pub mod highlight;
pub mod model;
pub mod printer;
pub mod query;
pub mod tail;

use anyhow::Result;
use clap::Parser;
use client::EsClient;
use is_terminal::IsTerminal;
use printer::RecordPrinter;
use std::io;
use std::time::Duration;
use tail::{TailOptions, Tailer};

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "estail",
    version,
    about = "Tail logs from an Elasticsearch backend"
)]
pub struct Cli {
    /// Search query, passed to the backend as a query_string
    /// (e.g. 'status:500 AND path:"/api/checkout"')
    pub query: String,

    /// Base URL of the search backend
    #[arg(short = 'e', long, env = "ELASTICSEARCH_URL", value_name = "URL")]
    pub elasticsearch_url: String,

    /// Maximum number of results per query
    #[arg(short = 'n', long, default_value_t = 100, value_name = "N")]
    pub num_results: usize,

    /// How far back to search, e.g. '90 seconds', '3 hours', '1 day'
    #[arg(short, long, default_value = "1 day", value_name = "PERIOD")]
    pub period: String,

    /// Keep polling for new records, like tail -f
    #[arg(short, long)]
    pub follow: bool,

    /// Seconds allowed for establishing the backend connection
    #[arg(long, default_value_t = 3, value_name = "SECONDS")]
    pub connect_timeout: u64,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let period = duration::parse_duration(&cli.period)?;
    let backend = EsClient::new(
        &cli.elasticsearch_url,
        Duration::from_secs(cli.connect_timeout),
    )?;
    // Colors and highlight markup only make sense on a terminal; piped
    // output stays one plain line per record.
    let interactive = io::stdout().is_terminal();
    let printer = RecordPrinter::new(io::stdout(), interactive);
    let options = TailOptions {
        query: cli.query,
        num_results: cli.num_results,
        period,
        follow: cli.follow,
    };
    tracing::info!(
        url = %cli.elasticsearch_url,
        follow = cli.follow,
        interactive,
        "starting search"
    );
    Tailer::new(backend, printer, options).run()
}
