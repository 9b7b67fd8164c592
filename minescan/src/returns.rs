//! Trailing returns over fixed horizons.

use std::collections::BTreeMap;

use minescan_core::{Horizon, PriceSeries};
use serde::{Deserialize, Serialize};

/// Last price and trailing percentage returns of one symbol.
///
/// Values are kept unrounded until [`Metrics::rounded`] is called so that filtering
/// and sorting compare exact figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Most recent usable close.
    pub price: f64,
    /// Percentage return per horizon; `None` when the series is too short.
    pub returns: BTreeMap<Horizon, Option<f64>>,
}

impl Metrics {
    /// Return for `h`, if available.
    #[must_use]
    pub fn get(&self, h: Horizon) -> Option<f64> {
        self.returns.get(&h).copied().flatten()
    }

    /// One-year return; absent only when the series has exactly 252 points.
    #[must_use]
    pub fn one_year(&self) -> Option<f64> {
        self.get(Horizon::Year1)
    }

    /// Copy with price and every return rounded to two decimals.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            price: round2(self.price),
            returns: self
                .returns
                .iter()
                .map(|(h, v)| (*h, v.map(round2)))
                .collect(),
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn pct(last: f64, base: f64) -> f64 {
    (last / base - 1.0) * 100.0
}

/// Derive [`Metrics`] from a daily series.
///
/// Missing and non-positive closes are dropped first; fewer than two remaining
/// points yields `None`. A horizon of `n` sessions needs more than `n` points.
/// The one-year return falls back to the first point as its baseline when the
/// series has fewer than 252 points. At exactly 252 it is absent.
#[must_use]
pub fn compute_metrics(series: &PriceSeries) -> Option<Metrics> {
    let closes = series.closes();
    let len = closes.len();
    if len < 2 {
        return None;
    }
    let last = closes[len - 1];

    let returns = Horizon::ALL
        .into_iter()
        .map(|h| {
            let n = h.lookback();
            let value = if len > n {
                Some(pct(last, closes[len - 1 - n]))
            } else if h == Horizon::Year1 && len < n {
                Some(pct(last, closes[0]))
            } else {
                None
            };
            (h, value)
        })
        .collect();

    Some(Metrics {
        price: last,
        returns,
    })
}
