//! Workbook of per-sector sheets.
//!
//! A workbook is either a spreadsheet file (`.xlsx`, `.xlsm`, `.xls`, `.ods`) with
//! one sheet per sector, or a directory holding one `<Sector>.csv` file per sector.
//! Each sheet needs `Ticker`, `Company` and `Exchange` columns in its first row;
//! header names are matched without regard to case or surrounding whitespace,
//! extra columns are ignored.

use std::io;
use std::path::{Path, PathBuf};

use calamine::{Reader, Sheets, open_workbook_auto};
use minescan_core::{ScanError, Venue};
use serde::{Deserialize, Serialize};

/// One workbook row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    /// Ticker as written in the sheet.
    pub ticker: String,
    /// Company name.
    pub company: String,
    /// Exchange code as written in the sheet.
    pub exchange: String,
    /// Sector, taken from the sheet name.
    pub sector: String,
}

impl RawEntry {
    /// Parsed listing venue.
    #[must_use]
    pub fn venue(&self) -> Venue {
        Venue::parse(&self.exchange)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Spreadsheet,
    CsvDir,
}

/// Handle on a workbook file or directory.
#[derive(Debug, Clone)]
pub struct Workbook {
    root: PathBuf,
    layout: Layout,
}

const SHEET_EXT: &str = "csv";
const SPREADSHEET_EXTS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SPREADSHEET_EXTS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

impl Workbook {
    /// Open the workbook at `root`: a spreadsheet file or a directory of CSV sheets.
    ///
    /// # Errors
    /// Returns `ScanError::Sheet` if `root` does not exist, is a file of another
    /// kind, or is a spreadsheet that cannot be read.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ScanError> {
        let root = root.as_ref();
        let layout = if root.is_dir() {
            Layout::CsvDir
        } else if root.is_file() && is_spreadsheet(root) {
            Layout::Spreadsheet
        } else if root.is_file() {
            return Err(ScanError::sheet(
                root.display().to_string(),
                "not a spreadsheet (.xlsx, .xlsm, .xlsb, .xls, .ods) or a directory of CSV sheets",
            ));
        } else {
            return Err(ScanError::sheet(
                root.display().to_string(),
                "workbook not found",
            ));
        };
        let wb = Self {
            root: root.to_path_buf(),
            layout,
        };
        if layout == Layout::Spreadsheet {
            wb.spreadsheet()?;
        }
        Ok(wb)
    }

    /// Workbook file or directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn spreadsheet(&self) -> Result<Sheets<io::BufReader<std::fs::File>>, ScanError> {
        open_workbook_auto(&self.root)
            .map_err(|e| ScanError::sheet(self.root.display().to_string(), e.to_string()))
    }

    /// Sector names available in the workbook, sorted.
    ///
    /// # Errors
    /// Returns `ScanError::Sheet` if the workbook cannot be read.
    pub fn sheet_names(&self) -> Result<Vec<String>, ScanError> {
        let mut names = match self.layout {
            Layout::Spreadsheet => self.spreadsheet()?.sheet_names(),
            Layout::CsvDir => self.csv_sheet_names()?,
        };
        names.sort();
        Ok(names)
    }

    fn csv_sheet_names(&self) -> Result<Vec<String>, ScanError> {
        let read = std::fs::read_dir(&self.root).map_err(|e| io_err(&self.root, &e))?;
        let mut names = Vec::new();
        for item in read {
            let path = item.map_err(|e| io_err(&self.root, &e))?.path();
            let is_sheet = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(SHEET_EXT));
            if is_sheet
                && path.is_file()
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        Ok(names)
    }

    /// Load every row of the sheet named `sector` (case-insensitive).
    ///
    /// # Errors
    /// Returns `ScanError::Sheet` when the sheet is missing, unreadable, or lacks a
    /// required column.
    pub fn load_sheet(&self, sector: &str) -> Result<Vec<RawEntry>, ScanError> {
        let wanted = sector.trim();
        let name = self
            .sheet_names()?
            .into_iter()
            .find(|n| n.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ScanError::sheet(
                    self.root.display().to_string(),
                    format!("no sheet named '{wanted}'"),
                )
            })?;
        let rows = match self.layout {
            Layout::Spreadsheet => self.load_spreadsheet_sheet(&name)?,
            Layout::CsvDir => {
                let path = self.root.join(format!("{name}.{SHEET_EXT}"));
                let file = std::fs::File::open(&path).map_err(|e| io_err(&path, &e))?;
                parse_sheet(file, &name, &path.display().to_string())?
            }
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(sheet = %name, rows = rows.len(), "loaded sheet");
        Ok(rows)
    }

    fn load_spreadsheet_sheet(&self, name: &str) -> Result<Vec<RawEntry>, ScanError> {
        let label = format!("{}[{name}]", self.root.display());
        let range = self
            .spreadsheet()?
            .worksheet_range(name)
            .map_err(|e| ScanError::sheet(label.as_str(), e.to_string()))?;
        let mut rows = range
            .rows()
            .map(|row| row.iter().map(ToString::to_string).collect::<Vec<_>>());
        let headers = rows.next().unwrap_or_default();
        collect_entries(&headers, rows.map(Ok), name, &label)
    }
}

fn io_err(path: &Path, e: &io::Error) -> ScanError {
    ScanError::sheet(path.display().to_string(), e.to_string())
}

/// Parse one CSV sheet, labelling every row with `sector`.
///
/// Rows whose ticker cell is blank are skipped.
///
/// # Errors
/// Returns `ScanError::Sheet` (tagged with `path`) for malformed CSV or a missing
/// required column.
pub fn parse_sheet<R: io::Read>(
    reader: R,
    sector: &str,
    path: &str,
) -> Result<Vec<RawEntry>, ScanError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| ScanError::sheet(path, e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    let records = rdr.records().map(|record| {
        record
            .map(|r| r.iter().map(str::to_string).collect())
            .map_err(|e| ScanError::sheet(path, e.to_string()))
    });
    collect_entries(&headers, records, sector, path)
}

fn collect_entries<I>(
    headers: &[String],
    rows: I,
    sector: &str,
    path: &str,
) -> Result<Vec<RawEntry>, ScanError>
where
    I: IntoIterator<Item = Result<Vec<String>, ScanError>>,
{
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| ScanError::sheet(path, format!("missing column '{name}'")))
    };
    let ticker_at = column("Ticker")?;
    let company_at = column("Company")?;
    let exchange_at = column("Exchange")?;

    let mut out = Vec::new();
    for row in rows {
        let row = row?;
        let cell = |i: usize| row.get(i).map(|c| c.trim().to_string()).unwrap_or_default();
        let ticker = cell(ticker_at);
        if ticker.is_empty() {
            continue;
        }
        out.push(RawEntry {
            ticker,
            company: cell(company_at),
            exchange: cell(exchange_at),
            sector: sector.to_string(),
        });
    }
    Ok(out)
}
