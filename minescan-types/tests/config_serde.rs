use minescan_types::{CacheConfig, PacingConfig, ScanConfig, ScanFilter, Venue};

#[test]
fn partial_toml_falls_back_to_defaults() {
    let raw = r#"
        [filter]
        sector = "Silver"
        exchanges = ["tsx.v", "CSE"]
        price_min = 0.5

        [pacing]
        delay_after_success_ms = 250
    "#;
    let cfg: ScanConfig = toml::from_str(raw).expect("parse toml config");

    assert_eq!(cfg.filter.sector, "Silver");
    assert_eq!(cfg.filter.exchanges, vec![Venue::Tsxv, Venue::Cse]);
    assert_eq!(cfg.filter.price_min, Some(0.5));
    assert_eq!(cfg.filter.price_max, Some(10.0));
    assert_eq!(cfg.pacing.delay_after_success_ms, 250);
    assert_eq!(
        cfg.pacing.rate_limit_pause_ms,
        PacingConfig::default().rate_limit_pause_ms
    );
    assert_eq!(cfg.cache, CacheConfig::default());
}

#[test]
fn scan_config_json_roundtrip() {
    let cfg = ScanConfig {
        filter: ScanFilter {
            sector: "Lithium".into(),
            exchanges: vec![Venue::Tsx, Venue::Other("NYSE".into())],
            price_min: Some(2.0),
            price_max: None,
        },
        cache: CacheConfig::from_hours(6),
        pacing: PacingConfig::disabled(),
    };

    let json = serde_json::to_string(&cfg).expect("serialize scan config");
    let de: ScanConfig = serde_json::from_str(&json).expect("deserialize scan config");

    assert_eq!(de, cfg);
    assert_eq!(de.cache.ttl().as_secs(), 6 * 3600);
}

#[test]
fn price_bounds_are_inclusive() {
    let filter = ScanFilter {
        price_min: Some(2.0),
        price_max: Some(5.0),
        ..ScanFilter::default()
    };
    assert!(filter.admits_price(5.0));
    assert!(filter.admits_price(2.0));
    assert!(!filter.admits_price(5.01));
    assert!(!filter.admits_price(1.99));
}

#[test]
fn empty_exchange_list_admits_unknown_venues() {
    let mut filter = ScanFilter::default();
    assert!(!filter.admits_venue(&Venue::Other("NEO".into())));
    filter.exchanges.clear();
    assert!(filter.admits_venue(&Venue::Other("NEO".into())));
}

#[test]
fn inverted_bounds_are_rejected() {
    let filter = ScanFilter {
        price_min: Some(6.0),
        price_max: Some(5.0),
        ..ScanFilter::default()
    };
    assert!(filter.validate().is_err());
    assert!(ScanFilter::default().validate().is_ok());
}
