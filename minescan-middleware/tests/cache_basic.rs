use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use minescan_core::{CacheConfig, PriceSeries, ResolvedSymbol, ScanError};
use minescan_middleware::{ConnectorBuilder, NoopCache};
use minescan_mock::{DynamicMockConnector, MockBehavior};

fn series(closes: &[f64]) -> PriceSeries {
    PriceSeries::from_closes(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), closes)
}

#[tokio::test]
async fn repeated_symbol_is_served_from_cache() {
    let (raw, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_history_behavior("ABX.TO", MockBehavior::Return(series(&[10.0, 11.0])))
        .await;
    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(&CacheConfig::default())
        .build();
    let hp = wrapped.as_history_provider().unwrap();
    let sym = ResolvedSymbol::new("ABX.TO");

    let first = hp.daily_history(&sym).await.unwrap();
    let second = hp.daily_history(&sym).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(ctl.request_count("ABX.TO").await, 1);
}

#[tokio::test]
async fn empty_series_is_cached() {
    let (raw, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_history_behavior("NOPE.TO", MockBehavior::Return(PriceSeries::empty()))
        .await;
    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(&CacheConfig::default())
        .build();
    let hp = wrapped.as_history_provider().unwrap();
    let sym = ResolvedSymbol::new("NOPE.TO");

    assert!(hp.daily_history(&sym).await.unwrap().is_empty());
    assert!(hp.daily_history(&sym).await.unwrap().is_empty());
    assert_eq!(ctl.request_count("NOPE.TO").await, 1);
}

#[tokio::test]
async fn errors_are_not_cached() {
    let (raw, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_history_behavior(
        "BUSY.TO",
        MockBehavior::Fail(ScanError::connector("dyn", "503")),
    )
    .await;
    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(&CacheConfig::default())
        .build();
    let hp = wrapped.as_history_provider().unwrap();
    let sym = ResolvedSymbol::new("BUSY.TO");

    assert!(hp.daily_history(&sym).await.is_err());
    ctl.set_history_behavior("BUSY.TO", MockBehavior::Return(series(&[1.0])))
        .await;
    assert_eq!(hp.daily_history(&sym).await.unwrap().len(), 1);
    assert_eq!(ctl.request_count("BUSY.TO").await, 2);
}

#[tokio::test]
async fn cache_keys_are_per_symbol() {
    let (raw, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_history_behavior("A.TO", MockBehavior::Return(series(&[1.0])))
        .await;
    ctl.set_history_behavior("A.V", MockBehavior::Return(series(&[2.0, 3.0])))
        .await;
    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(&CacheConfig::default())
        .build();
    let hp = wrapped.as_history_provider().unwrap();

    assert_eq!(hp.daily_history(&"A.TO".into()).await.unwrap().len(), 1);
    assert_eq!(hp.daily_history(&"A.V".into()).await.unwrap().len(), 2);
    assert_eq!(hp.daily_history(&"A.TO".into()).await.unwrap().len(), 1);
    assert_eq!(ctl.history_requests().await, vec!["A.TO", "A.V"]);
}

#[tokio::test]
async fn noop_store_always_refetches() {
    let (raw, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_history_behavior("ABX.TO", MockBehavior::Return(series(&[5.0])))
        .await;
    let wrapped = ConnectorBuilder::new(raw)
        .with_cache_store(Arc::new(NoopCache), Duration::from_secs(60))
        .build();
    let hp = wrapped.as_history_provider().unwrap();
    let sym = ResolvedSymbol::new("ABX.TO");

    hp.daily_history(&sym).await.unwrap();
    hp.daily_history(&sym).await.unwrap();
    assert_eq!(ctl.request_count("ABX.TO").await, 2);
}
