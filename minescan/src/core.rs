use std::sync::Arc;

use minescan_core::{PriceConnector, ResolvedSymbol, ScanError, ScanFilter};
use serde::{Deserialize, Serialize};

use crate::resolver::resolve_venue;
use crate::returns::{Metrics, compute_metrics};
use crate::sheet::RawEntry;

/// Why a ticker produced no metrics.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The ticker cell normalised to nothing.
    NoCandidates,
    /// No candidate had usable closes, or the first that did had fewer than two.
    Exhausted,
    /// A candidate failed in a way that ends the chain (rate limit, transport, bad payload).
    Failed(ScanError),
}

/// Terminal state of one ticker's candidate chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A candidate yielded usable history.
    Resolved {
        /// Candidate that answered.
        symbol: ResolvedSymbol,
        /// Unrounded metrics.
        metrics: Metrics,
    },
    /// No candidate yielded usable history.
    Skipped(SkipReason),
}

/// One row of scan output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRow {
    /// Ticker as written in the workbook.
    pub ticker: String,
    /// Company name.
    pub company: String,
    /// Exchange code as written in the workbook.
    pub exchange: String,
    /// Sector (sheet name).
    pub sector: String,
    /// Provider symbol that answered.
    pub symbol: ResolvedSymbol,
    /// Price and returns, rounded to two decimals.
    pub metrics: Metrics,
}

/// Result of a scan: matching rows plus counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Matching rows, best one-year return first.
    pub rows: Vec<ScanRow>,
    /// Rows that passed the exchange filter and entered resolution.
    pub processed: usize,
    /// Rows for which no candidate produced metrics.
    pub ignored: usize,
    /// Resolved rows dropped by the price bounds.
    pub out_of_range: usize,
}

/// Sequential scan driver over a single price connector.
pub struct Scanner {
    connector: Arc<dyn PriceConnector>,
}

/// Builder for [`Scanner`].
#[derive(Default)]
pub struct ScannerBuilder {
    connector: Option<Arc<dyn PriceConnector>>,
}

impl ScannerBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connector used for history lookups. Usually a wrapped stack from
    /// `ConnectorBuilder`.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn PriceConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Build the scanner.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connector was set or it lacks daily history.
    pub fn build(self) -> Result<Scanner, ScanError> {
        let connector = self.connector.ok_or_else(|| {
            ScanError::InvalidArg("no connector registered; add one via with_connector(...)".into())
        })?;
        if connector.as_history_provider().is_none() {
            return Err(ScanError::InvalidArg(format!(
                "connector {} does not provide daily history",
                connector.name()
            )));
        }
        Ok(Scanner { connector })
    }
}

impl Scanner {
    /// Start building a new scanner.
    #[must_use]
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::new()
    }

    /// Connector the scanner queries.
    #[must_use]
    pub fn connector(&self) -> &Arc<dyn PriceConnector> {
        &self.connector
    }

    /// Try `candidates` in order and return the first that yields metrics.
    #[must_use]
    pub async fn compute_returns(
        &self,
        candidates: &[ResolvedSymbol],
    ) -> Option<(ResolvedSymbol, Metrics)> {
        match self.try_candidates(candidates).await {
            Outcome::Resolved { symbol, metrics } => Some((symbol, metrics)),
            Outcome::Skipped(_) => None,
        }
    }

    /// Walk the candidate chain and report how it ended.
    ///
    /// `NotFound` and series without a usable close move on to the next candidate.
    /// The first series with a usable close ends the chain, resolved only if it has
    /// at least two. Any other error stops the chain.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "minescan::core::try_candidates",
            skip(self, candidates),
            fields(candidates = candidates.len()),
        )
    )]
    pub async fn try_candidates(&self, candidates: &[ResolvedSymbol]) -> Outcome {
        if candidates.is_empty() {
            return Outcome::Skipped(SkipReason::NoCandidates);
        }
        let Some(hp) = self.connector.as_history_provider() else {
            return Outcome::Skipped(SkipReason::Failed(ScanError::InvalidArg(
                "connector lost its history capability".into(),
            )));
        };
        for symbol in candidates {
            match hp.daily_history(symbol).await {
                Ok(series) if series.has_closes() => {
                    return match compute_metrics(&series) {
                        Some(metrics) => Outcome::Resolved {
                            symbol: symbol.clone(),
                            metrics,
                        },
                        None => {
                            #[cfg(feature = "tracing")]
                            tracing::debug!(%symbol, points = series.len(), "too few closes");
                            Outcome::Skipped(SkipReason::Exhausted)
                        }
                    };
                }
                Ok(_series) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(%symbol, points = _series.len(), "no usable closes");
                }
                Err(e) if !e.ends_candidate_chain() => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(%symbol, "not found");
                }
                Err(e) => return Outcome::Skipped(SkipReason::Failed(e)),
            }
        }
        Outcome::Skipped(SkipReason::Exhausted)
    }

    /// Scan `entries` sequentially and return the filtered, sorted rows.
    ///
    /// Rows are kept when their venue passes the exchange filter, a candidate resolves,
    /// and the unrounded price lies within the inclusive bounds. Sorting is by
    /// unrounded one-year return, descending, ties keeping workbook order. Metrics
    /// are rounded last.
    ///
    /// # Errors
    /// Returns `ScanError::Config` if the filter bounds are inconsistent. Per-row
    /// provider failures never fail the scan.
    pub async fn scan(
        &self,
        entries: &[RawEntry],
        filter: &ScanFilter,
    ) -> Result<ScanReport, ScanError> {
        filter.validate()?;
        let mut report = ScanReport::default();
        let mut kept: Vec<ScanRow> = Vec::new();

        for entry in entries {
            let venue = entry.venue();
            if !filter.admits_venue(&venue) {
                continue;
            }
            report.processed += 1;
            let candidates = resolve_venue(&entry.ticker, &venue);
            match self.try_candidates(&candidates).await {
                Outcome::Resolved { symbol, metrics } => {
                    if !filter.admits_price(metrics.price) {
                        report.out_of_range += 1;
                        continue;
                    }
                    kept.push(ScanRow {
                        ticker: entry.ticker.clone(),
                        company: entry.company.clone(),
                        exchange: entry.exchange.clone(),
                        sector: entry.sector.clone(),
                        symbol,
                        metrics,
                    });
                }
                Outcome::Skipped(reason) => {
                    #[cfg(feature = "tracing")]
                    tracing::info!(ticker = %entry.ticker, ?reason, "ignored");
                    #[cfg(not(feature = "tracing"))]
                    let _ = reason;
                    report.ignored += 1;
                }
            }
        }

        sort_by_one_year(&mut kept);
        for row in &mut kept {
            row.metrics = row.metrics.rounded();
        }
        report.rows = kept;
        Ok(report)
    }
}

/// Descending by one-year return; rows without one go last. Stable.
fn sort_by_one_year(rows: &mut [ScanRow]) {
    rows.sort_by(|a, b| match (a.metrics.one_year(), b.metrics.one_year()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
