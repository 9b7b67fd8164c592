use std::fs;

use minescan::Workbook;
use minescan_core::{ScanError, Venue};

fn workbook() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Gold.csv"),
        "Ticker,Company,Exchange\nABX,Barrick Gold,TSX\n,Placeholder,TSX\nAUX,Aux Metals,TSX.V\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("Silver.csv"),
        "Exchange,Ticker,Company,Secteur\nCSE,AG,First Silver,Silver\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "not a sheet").unwrap();
    dir
}

#[test]
fn lists_sheets_sorted() {
    let dir = workbook();
    let wb = Workbook::open(dir.path()).unwrap();
    assert_eq!(wb.sheet_names().unwrap(), ["Gold", "Silver"]);
}

#[test]
fn sheet_lookup_ignores_case_and_labels_sector() {
    let dir = workbook();
    let wb = Workbook::open(dir.path()).unwrap();
    let rows = wb.load_sheet("gold").unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.sector == "Gold"));
    assert_eq!(rows[1].venue(), Venue::Tsxv);

    let silver = wb.load_sheet(" SILVER ").unwrap();
    assert_eq!(silver[0].ticker, "AG");
    assert_eq!(silver[0].venue(), Venue::Cse);
}

#[test]
fn missing_sheet_is_fatal() {
    let dir = workbook();
    let err = Workbook::open(dir.path())
        .unwrap()
        .load_sheet("Uranium")
        .unwrap_err();
    assert!(matches!(err, ScanError::Sheet { .. }));
    assert!(err.is_fatal());
}

#[test]
fn missing_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = Workbook::open(dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, ScanError::Sheet { .. }));
}

#[test]
fn missing_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Copper.csv"), "Ticker,Name,Exchange\nCS,Capstone,TSX\n").unwrap();
    let err = Workbook::open(dir.path())
        .unwrap()
        .load_sheet("Copper")
        .unwrap_err();
    assert!(err.to_string().contains("Company"));
}

fn write_xlsx(path: &std::path::Path, sheets: &[(&str, &[&[&str]])]) {
    let mut book = rust_xlsxwriter::Workbook::new();
    for (name, rows) in sheets {
        let ws = book.add_worksheet();
        ws.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    ws.write_string(r as u32, c as u16, *cell).unwrap();
                }
            }
        }
    }
    book.save(path).unwrap();
}

fn spreadsheet() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Stock Minier.xlsx");
    let gold: &[&[&str]] = &[
        &[" Ticker ", "Company", "EXCHANGE", "Notes"],
        &["ABX", "Barrick Gold", "TSX", "big"],
        &["", "Placeholder", "TSX", ""],
        &["AUX", "Aux Metals", "TSX.V"],
    ];
    let silver: &[&[&str]] = &[&["Ticker", "Company", "Exchange"], &["AG", "First Silver", "CSE"]];
    write_xlsx(&path, &[("Silver", silver), ("Gold", gold)]);
    (dir, path)
}

#[test]
fn spreadsheet_sheets_load_like_csv_ones() {
    let (_dir, path) = spreadsheet();
    let wb = Workbook::open(&path).unwrap();
    assert_eq!(wb.sheet_names().unwrap(), ["Gold", "Silver"]);

    let gold = wb.load_sheet("GOLD").unwrap();
    let tickers: Vec<_> = gold.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, ["ABX", "AUX"]);
    assert!(gold.iter().all(|r| r.sector == "Gold"));
    assert_eq!(gold[1].venue(), Venue::Tsxv);

    let silver = wb.load_sheet("Silver").unwrap();
    assert_eq!(silver[0].company, "First Silver");
    assert_eq!(silver[0].venue(), Venue::Cse);
}

#[test]
fn spreadsheet_missing_sheet_or_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    let copper: &[&[&str]] = &[&["Ticker", "Name", "Exchange"], &["CS", "Capstone", "TSX"]];
    write_xlsx(&path, &[("Copper", copper)]);
    let wb = Workbook::open(&path).unwrap();

    let err = wb.load_sheet("Copper").unwrap_err();
    assert!(matches!(err, ScanError::Sheet { .. }));
    assert!(err.to_string().contains("Company"));

    let err = wb.load_sheet("Uranium").unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn unsupported_or_corrupt_workbook_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let txt = dir.path().join("tickers.txt");
    fs::write(&txt, "ABX").unwrap();
    assert!(matches!(Workbook::open(&txt).unwrap_err(), ScanError::Sheet { .. }));

    let bogus = dir.path().join("broken.xlsx");
    fs::write(&bogus, "not a zip archive").unwrap();
    assert!(matches!(Workbook::open(&bogus).unwrap_err(), ScanError::Sheet { .. }));
}
