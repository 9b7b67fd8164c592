use std::sync::Arc;

use chrono::NaiveDate;
use minescan::{Outcome, RawEntry, ScanReport, Scanner, SkipReason};
use minescan_core::{PriceConnector, PriceSeries, ResolvedSymbol, ScanError, ScanFilter, Venue};
use minescan_mock::{DynamicMockConnector, DynamicMockController, MockBehavior, MockConnector};

fn series(closes: &[f64]) -> PriceSeries {
    PriceSeries::from_closes(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), closes)
}

fn entry(ticker: &str, exchange: &str) -> RawEntry {
    RawEntry {
        ticker: ticker.into(),
        company: format!("{ticker} Mining"),
        exchange: exchange.into(),
        sector: "Gold".into(),
    }
}

fn dynamic() -> (Scanner, DynamicMockController) {
    let (raw, ctl) = DynamicMockConnector::new_with_controller("dyn");
    let scanner = Scanner::builder().with_connector(raw).build().unwrap();
    (scanner, ctl)
}

fn all_venues() -> ScanFilter {
    ScanFilter {
        exchanges: Vec::new(),
        price_min: None,
        price_max: None,
        ..ScanFilter::default()
    }
}

#[tokio::test]
async fn chain_stops_at_first_usable_candidate() {
    let (scanner, ctl) = dynamic();
    ctl.set_history_behavior("XYZ.TO", MockBehavior::Return(PriceSeries::empty()))
        .await;
    ctl.set_history_behavior("XYZ.V", MockBehavior::Return(series(&[1.0, 2.0])))
        .await;
    ctl.set_history_behavior("XYZ.CN", MockBehavior::Return(series(&[5.0, 6.0])))
        .await;

    let candidates = minescan::resolve("xyz", "");
    let (symbol, metrics) = scanner.compute_returns(&candidates).await.unwrap();
    assert_eq!(symbol.as_str(), "XYZ.V");
    assert_eq!(metrics.price, 2.0);
    assert_eq!(ctl.history_requests().await, vec!["XYZ.TO", "XYZ.V"]);
}

#[tokio::test]
async fn short_first_series_ends_the_chain_unresolved() {
    let (scanner, ctl) = dynamic();
    ctl.set_history_behavior("XYZ.TO", MockBehavior::Return(series(&[3.0])))
        .await;
    ctl.set_history_behavior("XYZ.V", MockBehavior::Return(series(&[1.0, 2.0])))
        .await;

    let candidates = minescan::resolve("XYZ", "");
    assert!(scanner.compute_returns(&candidates).await.is_none());
    assert_eq!(ctl.history_requests().await, vec!["XYZ.TO"]);
}

#[tokio::test]
async fn series_without_usable_closes_moves_on() {
    let (scanner, ctl) = dynamic();
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let blank = PriceSeries::new(vec![
        minescan_core::PricePoint::missing(start),
        minescan_core::PricePoint::missing(start + chrono::Days::new(1)),
    ]);
    ctl.set_history_behavior("XYZ.TO", MockBehavior::Return(blank))
        .await;
    ctl.set_history_behavior("XYZ.V", MockBehavior::Return(series(&[1.0, 2.0])))
        .await;

    let (symbol, _) = scanner
        .compute_returns(&minescan::resolve("XYZ", ""))
        .await
        .unwrap();
    assert_eq!(symbol.as_str(), "XYZ.V");
    assert_eq!(ctl.history_requests().await, vec!["XYZ.TO", "XYZ.V"]);
}

#[tokio::test]
async fn not_found_moves_to_next_candidate() {
    let (scanner, ctl) = dynamic();
    ctl.set_history_behavior("XYZ", MockBehavior::Return(series(&[1.0, 1.5])))
        .await;
    let out = scanner.try_candidates(&minescan::resolve("XYZ", "NEO")).await;
    assert!(matches!(out, Outcome::Resolved { ref symbol, .. } if symbol.as_str() == "XYZ"));
    assert_eq!(ctl.history_requests().await.len(), 4);
}

#[tokio::test]
async fn rate_limit_ends_the_chain() {
    let (scanner, ctl) = dynamic();
    ctl.set_history_behavior(
        "XYZ.TO",
        MockBehavior::Fail(ScanError::rate_limited("dyn", "history for XYZ.TO")),
    )
    .await;
    ctl.set_history_behavior("XYZ.V", MockBehavior::Return(series(&[1.0, 2.0])))
        .await;

    let out = scanner.try_candidates(&minescan::resolve("XYZ", "")).await;
    assert!(matches!(
        out,
        Outcome::Skipped(SkipReason::Failed(ScanError::RateLimited { .. }))
    ));
    assert_eq!(ctl.history_requests().await, vec!["XYZ.TO"]);
}

#[tokio::test]
async fn all_empty_is_exhausted() {
    let (scanner, _ctl) = dynamic();
    let out = scanner.try_candidates(&minescan::resolve("NONE", "CSE")).await;
    assert_eq!(out, Outcome::Skipped(SkipReason::Exhausted));
    let out = scanner.try_candidates(&[]).await;
    assert_eq!(out, Outcome::Skipped(SkipReason::NoCandidates));
}

#[tokio::test]
async fn price_bounds_are_inclusive_on_unrounded_price() {
    let (scanner, ctl) = dynamic();
    ctl.set_history_behavior("AT.TO", MockBehavior::Return(series(&[4.0, 5.00])))
        .await;
    ctl.set_history_behavior("OVER.TO", MockBehavior::Return(series(&[4.0, 5.01])))
        .await;
    ctl.set_history_behavior("EDGE.TO", MockBehavior::Return(series(&[4.0, 5.004])))
        .await;
    ctl.set_history_behavior("LOW.TO", MockBehavior::Return(series(&[4.0, 1.99])))
        .await;
    let filter = ScanFilter {
        price_min: Some(2.0),
        price_max: Some(5.0),
        ..all_venues()
    };
    let entries = [
        entry("AT", "TSX"),
        entry("OVER", "TSX"),
        entry("EDGE", "TSX"),
        entry("LOW", "TSX"),
    ];
    let report = scanner.scan(&entries, &filter).await.unwrap();
    let tickers: Vec<_> = report.rows.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, ["AT"]);
    assert_eq!(report.processed, 4);
    assert_eq!(report.out_of_range, 3);
    assert_eq!(report.ignored, 0);
}

#[tokio::test]
async fn ignored_rows_do_not_stop_the_scan() {
    let (scanner, ctl) = dynamic();
    ctl.set_history_behavior("A.TO", MockBehavior::Return(series(&[1.0, 1.1])))
        .await;
    ctl.set_history_behavior(
        "B.TO",
        MockBehavior::Fail(ScanError::connector("dyn", "timeout")),
    )
    .await;
    ctl.set_history_behavior("D.TO", MockBehavior::Return(series(&[1.0, 1.3])))
        .await;
    let entries = [
        entry("A", "TSX"),
        entry("B", "TSX"),
        entry("C", "TSX"),
        entry("D", "TSX"),
    ];
    let report = scanner.scan(&entries, &all_venues()).await.unwrap();
    let tickers: Vec<_> = report.rows.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, ["D", "A"]);
    assert_eq!(report.ignored, 2);
    assert_eq!(report.processed, 4);
}

#[tokio::test]
async fn exchange_filter_limits_processed_rows() {
    let (scanner, ctl) = dynamic();
    ctl.set_history_behavior("A.TO", MockBehavior::Return(series(&[1.0, 1.1])))
        .await;
    ctl.set_history_behavior("B.V", MockBehavior::Return(series(&[1.0, 1.1])))
        .await;
    let filter = ScanFilter {
        exchanges: vec![Venue::Tsx],
        ..all_venues()
    };
    let report = scanner
        .scan(&[entry("A", "TSX"), entry("B", "TSXV")], &filter)
        .await
        .unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(ctl.history_requests().await, vec!["A.TO"]);
}

#[tokio::test]
async fn sort_is_descending_with_stable_ties_and_rounding_last() {
    let (scanner, ctl) = dynamic();
    ctl.set_history_behavior("LO.TO", MockBehavior::Return(series(&[1.0, 1.001])))
        .await;
    ctl.set_history_behavior("HI.TO", MockBehavior::Return(series(&[1.0, 1.004])))
        .await;
    ctl.set_history_behavior("T1.TO", MockBehavior::Return(series(&[2.0, 2.0])))
        .await;
    ctl.set_history_behavior("T2.TO", MockBehavior::Return(series(&[3.0, 3.0])))
        .await;
    let entries = [
        entry("T1", "TSX"),
        entry("LO", "TSX"),
        entry("T2", "TSX"),
        entry("HI", "TSX"),
    ];
    let report = scanner.scan(&entries, &all_venues()).await.unwrap();
    let tickers: Vec<_> = report.rows.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, ["HI", "LO", "T1", "T2"]);
    assert_eq!(report.rows[0].metrics.one_year(), Some(0.4));
    assert_eq!(report.rows[1].metrics.one_year(), Some(0.1));
    assert_eq!(report.rows[0].symbol, ResolvedSymbol::new("HI.TO"));
}

#[tokio::test]
async fn inverted_bounds_fail_the_scan() {
    let (scanner, _ctl) = dynamic();
    let filter = ScanFilter {
        price_min: Some(6.0),
        price_max: Some(5.0),
        ..all_venues()
    };
    let err = scanner.scan(&[entry("A", "TSX")], &filter).await.unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn fixture_connector_end_to_end() {
    let raw: Arc<dyn PriceConnector> = Arc::new(MockConnector::new());
    let scanner = Scanner::builder().with_connector(raw).build().unwrap();
    let entries = [
        entry("ABX", "TSX"),
        entry("K", "TSX"),
        entry("AUX", "TSXV"),
        entry("LIT", "CSE"),
        entry("EMPTY", "TSX"),
        entry("RATELIMIT", "TSX"),
    ];
    let report: ScanReport = scanner.scan(&entries, &all_venues()).await.unwrap();
    assert_eq!(report.processed, 6);
    assert_eq!(report.ignored, 2);
    assert_eq!(report.rows.len(), 4);
    let best = &report.rows[0];
    assert!(best.metrics.one_year().unwrap() >= report.rows[1].metrics.one_year().unwrap());
}

#[test]
fn builder_requires_connector() {
    assert!(matches!(
        Scanner::builder().build(),
        Err(ScanError::InvalidArg(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn wrapped_stack_paces_once_and_serves_duplicates_from_cache() {
    use minescan_core::{CacheConfig, PacingConfig};
    use minescan_middleware::ConnectorBuilder;

    let (raw, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_history_behavior("A.TO", MockBehavior::Return(series(&[1.0, 1.2])))
        .await;
    let connector = ConnectorBuilder::new(raw)
        .with_pacing(&PacingConfig::default())
        .with_cache(&CacheConfig::default())
        .build();
    let scanner = Scanner::builder().with_connector(connector).build().unwrap();

    let start = tokio::time::Instant::now();
    let report = scanner
        .scan(&[entry("A", "TSX"), entry("a ", "tsx"), entry("Z", "TSX")], &all_venues())
        .await
        .unwrap();
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.ignored, 1);
    assert_eq!(ctl.request_count("A.TO").await, 1);
    assert_eq!(start.elapsed(), std::time::Duration::from_secs(1));
}
