//! Fixed look-back windows used for trailing returns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Trailing-return horizon, expressed in trading days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Horizon {
    /// One trading day.
    #[serde(rename = "1D")]
    Day1,
    /// One week (5 sessions).
    #[serde(rename = "1W")]
    Week1,
    /// One month (21 sessions).
    #[serde(rename = "1M")]
    Month1,
    /// Three months (63 sessions).
    #[serde(rename = "3M")]
    Month3,
    /// Six months (126 sessions).
    #[serde(rename = "6M")]
    Month6,
    /// One year (252 sessions).
    #[serde(rename = "1Y")]
    Year1,
}

impl Horizon {
    /// All horizons, shortest first.
    pub const ALL: [Self; 6] = [
        Self::Day1,
        Self::Week1,
        Self::Month1,
        Self::Month3,
        Self::Month6,
        Self::Year1,
    ];

    /// Number of trading days to look back.
    #[must_use]
    pub const fn lookback(self) -> usize {
        match self {
            Self::Day1 => 1,
            Self::Week1 => 5,
            Self::Month1 => 21,
            Self::Month3 => 63,
            Self::Month6 => 126,
            Self::Year1 => 252,
        }
    }

    /// Short label, e.g. `1M`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Day1 => "1D",
            Self::Week1 => "1W",
            Self::Month1 => "1M",
            Self::Month3 => "3M",
            Self::Month6 => "6M",
            Self::Year1 => "1Y",
        }
    }

    /// Column header used by report renderers, e.g. `1M %`.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Day1 => "1D %",
            Self::Week1 => "1W %",
            Self::Month1 => "1M %",
            Self::Month3 => "3M %",
            Self::Month6 => "6M %",
            Self::Year1 => "1Y %",
        }
    }

    /// Position of this horizon inside [`Horizon::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
