//! Daily closing-price series exchanged between connectors and the calculator.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::{HistoryResponse, ScanError};

/// One trading session of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Session date.
    pub date: NaiveDate,
    /// Closing price, if the provider reported one.
    pub close: Option<f64>,
}

impl PricePoint {
    /// Construct a point with a known close.
    #[must_use]
    pub const fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close: Some(close),
        }
    }

    /// Construct a point whose close is missing.
    #[must_use]
    pub const fn missing(date: NaiveDate) -> Self {
        Self { date, close: None }
    }

    /// The close if it is present and usable in arithmetic.
    #[must_use]
    pub fn usable_close(&self) -> Option<f64> {
        self.close.filter(|c| c.is_finite() && *c > 0.0)
    }
}

/// Ordered sequence of daily closes, ascending by date. May be empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, ordering the points by date. Points sharing a date keep their input order.
    #[must_use]
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    /// An empty series.
    #[must_use]
    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a series of consecutive calendar days starting at `start`.
    #[must_use]
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Self {
        let points = start
            .iter_days()
            .zip(closes)
            .map(|(date, close)| PricePoint::new(date, *close))
            .collect();
        Self { points }
    }

    /// Convert a provider history response into a series of closes.
    ///
    /// Only the close column is kept; a close that cannot be represented as `f64`
    /// becomes a missing point rather than an error.
    #[must_use]
    pub fn from_history(resp: &HistoryResponse) -> Self {
        let points = resp
            .candles
            .iter()
            .map(|c| PricePoint {
                date: c.ts.date_naive(),
                close: c.close.amount().to_f64(),
            })
            .collect();
        Self::new(points)
    }

    /// All points, including those with a missing close.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of points, including those with a missing close.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the provider returned no rows at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Usable closes in date order, with missing or non-positive values dropped.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().filter_map(PricePoint::usable_close).collect()
    }

    /// True if at least one point carries a usable close.
    #[must_use]
    pub fn has_closes(&self) -> bool {
        self.points.iter().any(|p| p.usable_close().is_some())
    }

    /// Date of the most recent point.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A numeric cell as some providers serialize it: a bare number or a one-element array.
///
/// Use `Option<Scalar>` for cells that may also be `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Plain number.
    Value(f64),
    /// Number wrapped in a (normally one-element) array; inner `null`s are allowed.
    Wrapped(Vec<Option<f64>>),
}

impl Scalar {
    /// Resolve to a plain number.
    ///
    /// An empty array or a wrapped `null` resolves to `None`.
    ///
    /// # Errors
    /// Returns `ScanError::Data` when the array holds more than one element.
    pub fn value(&self) -> Result<Option<f64>, ScanError> {
        match self {
            Self::Value(v) => Ok(Some(*v)),
            Self::Wrapped(items) => match items.as_slice() {
                [] => Ok(None),
                [single] => Ok(*single),
                many => Err(ScanError::Data(format!(
                    "expected a single value, got an array of {}",
                    many.len()
                ))),
            },
        }
    }
}
