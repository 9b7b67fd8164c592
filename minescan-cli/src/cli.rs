use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use minescan::ReportFormat;
use minescan_core::{PacingConfig, ScanConfig, ScanError, Venue};

/// Scan a sector of Canadian mining stocks for trailing returns.
#[derive(Debug, Parser)]
#[command(name = "minescan", version, about, long_about = None)]
pub struct Args {
    /// Workbook: a spreadsheet with one sheet per sector, or a directory holding one
    /// `<Sector>.csv` per sector.
    #[arg(long, env = "MINESCAN_WORKBOOK")]
    pub workbook: PathBuf,

    /// Sector (sheet) to scan [default: Gold].
    #[arg(long, env = "MINESCAN_SECTOR")]
    pub sector: Option<String>,

    /// Exchange to keep; repeat for several [default: TSX, TSXV, CSE].
    #[arg(long = "exchange", env = "MINESCAN_EXCHANGES", value_delimiter = ',')]
    pub exchanges: Vec<String>,

    /// Keep rows from every exchange, including unknown ones.
    #[arg(long, conflicts_with = "exchanges")]
    pub any_exchange: bool,

    /// Inclusive minimum price.
    #[arg(long, env = "MINESCAN_MIN_PRICE")]
    pub min_price: Option<f64>,

    /// Inclusive maximum price [default: 10].
    #[arg(long, env = "MINESCAN_MAX_PRICE")]
    pub max_price: Option<f64>,

    /// Output format.
    #[arg(long, value_enum, env = "MINESCAN_FORMAT", default_value_t = Format::Table)]
    pub format: Format,

    /// How long provider responses are reused, in hours. 0 disables the cache.
    #[arg(long, env = "MINESCAN_CACHE_HOURS")]
    pub cache_hours: Option<u64>,

    /// Delay after each successful provider request, in milliseconds.
    #[arg(long, env = "MINESCAN_DELAY_MS")]
    pub delay_ms: Option<u64>,

    /// Read saved `<SYMBOL>.json` responses from this directory instead of Yahoo Finance.
    #[arg(long, env = "MINESCAN_SNAPSHOT_DIR")]
    pub snapshot_dir: Option<PathBuf>,

    /// TOML configuration file; flags take precedence over its values.
    #[arg(long, env = "MINESCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the workbook's sectors and exit.
    #[arg(long)]
    pub list_sectors: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Csv,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Table => Self::Table,
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
        }
    }
}

/// Parse a TOML configuration document.
pub fn parse_config(text: &str) -> Result<ScanConfig, ScanError> {
    toml::from_str(text).map_err(|e| ScanError::Config(e.to_string()))
}

impl Args {
    /// Layer command-line flags over `base`.
    ///
    /// Offline snapshot runs do not pace requests unless `--delay-ms` is given.
    pub fn merge_into(&self, mut cfg: ScanConfig) -> Result<ScanConfig, ScanError> {
        if let Some(sector) = &self.sector {
            cfg.filter.sector = sector.trim().to_string();
        }
        if self.any_exchange {
            cfg.filter.exchanges.clear();
        } else if !self.exchanges.is_empty() {
            cfg.filter.exchanges = self.exchanges.iter().map(|e| Venue::parse(e)).collect();
        }
        if self.min_price.is_some() {
            cfg.filter.price_min = self.min_price;
        }
        if self.max_price.is_some() {
            cfg.filter.price_max = self.max_price;
        }
        if let Some(hours) = self.cache_hours {
            cfg.cache.ttl_ms = hours.saturating_mul(3_600_000);
        }
        if self.snapshot_dir.is_some() && self.delay_ms.is_none() {
            cfg.pacing = PacingConfig::disabled();
        }
        if let Some(ms) = self.delay_ms {
            cfg.pacing.delay_after_success_ms = ms;
        }
        cfg.filter.validate()?;
        Ok(cfg)
    }
}
