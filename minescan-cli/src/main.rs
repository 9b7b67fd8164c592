//! `minescan` command.
//!
//! ```bash
//! # Gold sheet, default exchanges, price <= 10
//! minescan --workbook ./workbook
//!
//! # Silver on TSX Venture only, between $0.50 and $3, as CSV
//! minescan --workbook ./workbook --sector Silver --exchange TSXV \
//!     --min-price 0.5 --max-price 3 --format csv
//!
//! # Offline run against saved provider responses
//! minescan --workbook ./workbook --snapshot-dir ./snapshots
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`, e.g.
//! `RUST_LOG=minescan=debug,minescan_middleware=trace`.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use minescan::{Scanner, SnapshotConnector, Workbook, report};
use minescan_core::{PriceConnector, ScanConfig, ScanError};
use minescan_middleware::ConnectorBuilder;
use minescan_yfinance::YfConnector;
use tracing::info;

mod cli;

use cli::{Args, Format, parse_config};

/// Error surfaced by `main`; printed as its message rather than its debug form.
struct Failure(ScanError);

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Failure {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    let args = Args::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(args)).map_err(|e| Box::new(Failure(e)) as Box<dyn std::error::Error>)
}

async fn load_config(args: &Args) -> Result<ScanConfig, ScanError> {
    let base = match &args.config {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ScanError::Config(format!("{}: {e}", path.display())))?;
            parse_config(&text)?
        }
        None => ScanConfig::default(),
    };
    args.merge_into(base)
}

fn connector(args: &Args, cfg: &ScanConfig) -> Result<Arc<dyn PriceConnector>, ScanError> {
    let builder = match &args.snapshot_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "using snapshot connector");
            let raw: Arc<dyn PriceConnector> = Arc::new(SnapshotConnector::new(dir));
            ConnectorBuilder::new(raw)
                .with_pacing(&cfg.pacing)
                .with_cache(&cfg.cache)
        }
        None => YfConnector::rate_limited(&cfg.cache, &cfg.pacing)?,
    };
    Ok(builder.build())
}

async fn run(args: Args) -> Result<(), ScanError> {
    let workbook = Workbook::open(&args.workbook)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let write_err = |e: std::io::Error| ScanError::Other(e.to_string());

    if args.list_sectors {
        for name in workbook.sheet_names()? {
            writeln!(out, "{name}").map_err(write_err)?;
        }
        return Ok(());
    }

    let cfg = load_config(&args).await?;
    let rows = workbook.load_sheet(&cfg.filter.sector)?;
    info!(sector = %cfg.filter.sector, rows = rows.len(), "scanning");

    let scanner = Scanner::builder()
        .with_connector(connector(&args, &cfg)?)
        .build()?;
    let scan = scanner.scan(&rows, &cfg.filter).await?;

    report::render(&scan, args.format.into(), &mut out)?;
    if args.format != Format::Table {
        eprintln!("{}", report::summary_line(&scan));
        if scan.rows.is_empty() {
            eprintln!("{}", report::NO_MATCH);
        }
    }
    Ok(())
}
