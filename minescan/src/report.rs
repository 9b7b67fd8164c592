//! Rendering scan reports as a text table, CSV or JSON.

use std::fmt::Write as _;
use std::io::Write;
use std::str::FromStr;

use minescan_core::{Horizon, ScanError};
use serde::{Deserialize, Serialize};

use crate::core::{ScanReport, ScanRow};

/// Notice printed instead of a table when nothing matched.
pub const NO_MATCH: &str = "No stock matches the criteria";

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Aligned text table with a summary footer.
    #[default]
    Table,
    /// CSV with a header row.
    Csv,
    /// The whole report as JSON.
    Json,
}

impl FromStr for ReportFormat {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ScanError::InvalidArg(format!("unknown format '{other}'"))),
        }
    }
}

const TEXT_COLUMNS: [&str; 5] = ["Ticker", "Company", "Exchange", "Sector", "Symbol"];

fn headers() -> Vec<&'static str> {
    TEXT_COLUMNS
        .into_iter()
        .chain(std::iter::once("Price"))
        .chain(Horizon::ALL.into_iter().map(Horizon::column))
        .collect()
}

fn cells(row: &ScanRow, absent: &str) -> Vec<String> {
    let num = |v: Option<f64>| v.map_or_else(|| absent.to_string(), |x| format!("{x:.2}"));
    let mut out = vec![
        row.ticker.clone(),
        row.company.clone(),
        row.exchange.clone(),
        row.sector.clone(),
        row.symbol.to_string(),
        num(Some(row.metrics.price)),
    ];
    out.extend(Horizon::ALL.into_iter().map(|h| num(row.metrics.get(h))));
    out
}

/// `N rows processed, M ignored, K outside price range`.
#[must_use]
pub fn summary_line(report: &ScanReport) -> String {
    format!(
        "{} rows processed, {} ignored, {} outside price range",
        report.processed, report.ignored, report.out_of_range
    )
}

/// Render `report` as an aligned text table.
///
/// Text columns are left-aligned and numeric columns right-aligned. Absent values
/// show as `-`. An empty report renders the no-match notice instead of a table.
#[must_use]
pub fn render_table(report: &ScanReport) -> String {
    let mut out = String::new();
    if report.rows.is_empty() {
        out.push_str(NO_MATCH);
        out.push('\n');
    } else {
        let head = headers();
        let body: Vec<Vec<String>> = report.rows.iter().map(|r| cells(r, "-")).collect();
        let widths: Vec<usize> = head
            .iter()
            .enumerate()
            .map(|(i, h)| {
                body.iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();
        let line = |cols: &[String]| {
            let mut s = String::new();
            for (i, c) in cols.iter().enumerate() {
                if i > 0 {
                    s.push_str("  ");
                }
                let w = widths[i];
                if i < TEXT_COLUMNS.len() {
                    let _ = write!(s, "{c:<w$}");
                } else {
                    let _ = write!(s, "{c:>w$}");
                }
            }
            s.trim_end().to_string()
        };
        let head: Vec<String> = head.into_iter().map(str::to_string).collect();
        out.push_str(&line(&head));
        out.push('\n');
        for r in &body {
            out.push_str(&line(r));
            out.push('\n');
        }
    }
    out.push_str(&summary_line(report));
    out.push('\n');
    out
}

/// Write `report` as CSV. Absent values are empty cells.
///
/// # Errors
/// Returns `ScanError::Other` if writing fails.
pub fn write_csv<W: Write>(report: &ScanReport, out: W) -> Result<(), ScanError> {
    let mut w = csv::Writer::from_writer(out);
    let io = |e: csv::Error| ScanError::Other(e.to_string());
    w.write_record(headers()).map_err(io)?;
    for row in &report.rows {
        w.write_record(cells(row, "")).map_err(io)?;
    }
    w.flush().map_err(|e| ScanError::Other(e.to_string()))
}

/// Write `report` as pretty JSON. Absent values are `null`.
///
/// # Errors
/// Returns `ScanError::Other` if serialization or writing fails.
pub fn write_json<W: Write>(report: &ScanReport, mut out: W) -> Result<(), ScanError> {
    serde_json::to_writer_pretty(&mut out, report).map_err(|e| ScanError::Other(e.to_string()))?;
    writeln!(out).map_err(|e| ScanError::Other(e.to_string()))
}

/// Write `report` in `format`.
///
/// # Errors
/// Returns `ScanError::Other` if writing fails.
pub fn render<W: Write>(report: &ScanReport, format: ReportFormat, mut out: W) -> Result<(), ScanError> {
    match format {
        ReportFormat::Table => out
            .write_all(render_table(report).as_bytes())
            .map_err(|e| ScanError::Other(e.to_string())),
        ReportFormat::Csv => write_csv(report, out),
        ReportFormat::Json => write_json(report, out),
    }
}
