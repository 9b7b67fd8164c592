//! Offline connector backed by saved provider responses.
//!
//! Each symbol lives in `<dir>/<SYMBOL>.json` using the provider's column layout:
//!
//! ```json
//! { "Date": ["2024-01-02", "2024-01-03"], "Close": [21.5, [21.7]] }
//! ```
//!
//! Dates may be ISO strings (a time part is ignored) or epoch milliseconds. Close
//! cells may be numbers, one-element arrays, or `null`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use minescan_core::{
    HistoryProvider, PriceConnector, PricePoint, PriceSeries, ResolvedSymbol, Scalar, ScanError,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DateCell {
    Text(String),
    EpochMillis(i64),
}

impl DateCell {
    fn to_date(&self) -> Result<NaiveDate, ScanError> {
        match self {
            Self::Text(s) => {
                let day = s.trim().get(..10).unwrap_or(s.as_str());
                NaiveDate::parse_from_str(day, "%Y-%m-%d")
                    .map_err(|e| ScanError::Data(format!("bad date '{s}': {e}")))
            }
            Self::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms)
                .map(|ts| ts.date_naive())
                .ok_or_else(|| ScanError::Data(format!("bad timestamp {ms}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(rename = "Date")]
    date: Vec<DateCell>,
    #[serde(rename = "Close")]
    close: Vec<Option<Scalar>>,
}

/// Parse one snapshot document.
///
/// # Errors
/// Returns `ScanError::Data` for malformed JSON, unparsable dates, multi-element
/// close arrays, or columns of different lengths.
pub fn parse_snapshot(json: &str) -> Result<PriceSeries, ScanError> {
    let file: SnapshotFile =
        serde_json::from_str(json).map_err(|e| ScanError::Data(e.to_string()))?;
    if file.date.len() != file.close.len() {
        return Err(ScanError::Data(format!(
            "{} dates but {} closes",
            file.date.len(),
            file.close.len()
        )));
    }
    file.date
        .iter()
        .zip(&file.close)
        .map(|(d, c)| {
            let date = d.to_date()?;
            let close = match c {
                Some(s) => s.value()?,
                None => None,
            };
            Ok(PricePoint { date, close })
        })
        .collect::<Result<Vec<_>, ScanError>>()
        .map(PriceSeries::new)
}

/// Connector that reads saved responses from a directory.
pub struct SnapshotConnector {
    dir: PathBuf,
}

impl SnapshotConnector {
    /// Connector name reported in logs and errors.
    pub const NAME: &'static str = "minescan-snapshot";

    /// Serve snapshots from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, symbol: &ResolvedSymbol) -> Option<PathBuf> {
        let s = symbol.as_str();
        if s.is_empty() || s.contains(['/', '\\']) || s.starts_with('.') {
            return None;
        }
        Some(self.dir.join(format!("{s}.json")))
    }
}

impl PriceConnector for SnapshotConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Snapshot"
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }
}

#[async_trait]
impl HistoryProvider for SnapshotConnector {
    async fn daily_history(&self, symbol: &ResolvedSymbol) -> Result<PriceSeries, ScanError> {
        let not_found = || ScanError::not_found(format!("history for {symbol}"));
        let path = self.file_for(symbol).ok_or_else(not_found)?;
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => {
                return Err(ScanError::connector(
                    Self::NAME,
                    format!("{}: {e}", path.display()),
                ));
            }
        };
        parse_snapshot(&text).map_err(|e| match e {
            ScanError::Data(msg) => ScanError::Data(format!("{}: {msg}", path.display())),
            other => other,
        })
    }
}
