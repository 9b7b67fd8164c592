use chrono::{Datelike, NaiveDate, Weekday};
use minescan_core::{Candle, Currency, HistoryResponse, IsoCurrency, Money, PriceSeries};
use rust_decimal::Decimal;

/// Symbols with fixture data, for documentation and tests.
pub const SYMBOLS: &[&str] = &["ABX.TO", "K.TO", "AUX.V", "LIT.CN", "EMPTY.TO"];

pub fn by_symbol(s: &str) -> Option<PriceSeries> {
    let resp = match s {
        // Two years of steady gains: long enough for the strict 1Y look-back.
        "ABX.TO" => build(300, |i| 2_000 + 2 * i),
        // Slow decline, just over a year of sessions.
        "K.TO" => build(260, |i| 1_200 - i),
        // Recent listing: 1Y falls back to the first session.
        "AUX.V" => build(100, |i| 50 + i / 2),
        // Ten sessions only.
        "LIT.CN" => build(10, |i| 100 + i),
        "EMPTY.TO" => build(0, |_| 0),
        _ => return None,
    };
    Some(PriceSeries::from_history(&resp))
}

fn cad(cents: i64) -> Money {
    Money::new(Decimal::new(cents, 2), Currency::Iso(IsoCurrency::CAD)).unwrap()
}

/// Weekday sessions starting on 2024-01-02.
fn sessions(n: usize) -> Vec<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .iter_days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .take(n)
        .collect()
}

fn build(n: usize, close_cents: impl Fn(i64) -> i64) -> HistoryResponse {
    let candles = sessions(n)
        .into_iter()
        .zip(0i64..)
        .map(|(date, i)| {
            let px = cad(close_cents(i));
            Candle {
                ts: date.and_hms_opt(21, 0, 0).unwrap().and_utc(),
                open: px.clone(),
                high: px.clone(),
                low: px.clone(),
                close: px,
                close_unadj: None,
                volume: Some(100_000),
            }
        })
        .collect();
    HistoryResponse {
        candles,
        actions: vec![],
        adjusted: false,
        meta: None,
    }
}
