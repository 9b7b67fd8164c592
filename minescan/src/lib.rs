//! Minescan scans a sector of Canadian mining stocks for trailing returns.
//!
//! Overview
//! - [`sheet`] loads the workbook rows of one sector.
//! - [`resolver`] turns a ticker and its exchange into provider symbol candidates.
//! - [`Scanner`] walks each candidate chain against a `PriceConnector`, computes
//!   [`Metrics`] with [`returns`], and filters and sorts the rows.
//! - [`report`] renders the result as a table, CSV or JSON.
//! - [`snapshot`] is an offline connector over saved provider responses.
//!
//! The scan is sequential: one provider request is in flight at a time. Pacing and
//! caching are applied by wrapping the connector with `minescan-middleware`.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use minescan::{Scanner, Workbook, report};
//! use minescan_core::{CacheConfig, PacingConfig, ScanFilter};
//! use minescan_middleware::ConnectorBuilder;
//!
//! let raw = Arc::new(minescan::snapshot::SnapshotConnector::new("snapshots"));
//! let connector = ConnectorBuilder::new(raw)
//!     .with_pacing(&PacingConfig::disabled())
//!     .with_cache(&CacheConfig::default())
//!     .build();
//! let scanner = Scanner::builder().with_connector(connector).build()?;
//!
//! let rows = Workbook::open("Stock Minier.xlsx")?.load_sheet("Gold")?;
//! let report = scanner.scan(&rows, &ScanFilter::default()).await?;
//! print!("{}", report::render_table(&report));
//! ```
#![warn(missing_docs)]

mod core;
/// Report rendering.
pub mod report;
/// Symbol resolution.
pub mod resolver;
/// Return calculation.
pub mod returns;
/// Workbook loading.
pub mod sheet;
/// Offline snapshot connector.
pub mod snapshot;

pub use crate::core::{Outcome, ScanReport, ScanRow, Scanner, ScannerBuilder, SkipReason};
pub use report::ReportFormat;
pub use resolver::{normalize_ticker, resolve, resolve_venue};
pub use returns::{Metrics, compute_metrics};
pub use sheet::{RawEntry, Workbook};
pub use snapshot::SnapshotConnector;
