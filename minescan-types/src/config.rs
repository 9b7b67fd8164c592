//! Configuration types shared by the scanner, middleware and binary.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ScanError, Venue};

/// Sectors shipped in the default workbook, in display order.
pub const DEFAULT_SECTORS: [&str; 4] = ["Gold", "Silver", "Copper", "Lithium"];

/// Response cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live of a cached provider response, in milliseconds. `0` disables caching.
    pub ttl_ms: u64,
    /// Maximum number of symbols kept in memory.
    pub capacity: u64,
}

impl CacheConfig {
    /// Build a configuration from a TTL expressed in hours.
    #[must_use]
    pub const fn from_hours(hours: u64) -> Self {
        Self {
            ttl_ms: hours.saturating_mul(3_600_000),
            capacity: 4096,
        }
    }

    /// TTL as a `Duration`.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Whether caching is enabled at all.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.ttl_ms > 0
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::from_hours(1)
    }
}

/// Request pacing used to stay under the provider's per-client rate limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay inserted after every successful, non-empty fetch.
    pub delay_after_success_ms: u64,
    /// Pause taken when the provider reports a rate limit, before giving up on the symbol.
    pub rate_limit_pause_ms: u64,
}

impl PacingConfig {
    /// Configuration that never sleeps; used by tests and offline snapshots.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            delay_after_success_ms: 0,
            rate_limit_pause_ms: 0,
        }
    }

    /// Delay after a successful fetch as a `Duration`.
    #[must_use]
    pub const fn delay_after_success(&self) -> Duration {
        Duration::from_millis(self.delay_after_success_ms)
    }

    /// Rate-limit pause as a `Duration`.
    #[must_use]
    pub const fn rate_limit_pause(&self) -> Duration {
        Duration::from_millis(self.rate_limit_pause_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            delay_after_success_ms: 1_000,
            rate_limit_pause_ms: 2_000,
        }
    }
}

/// User-tunable row filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanFilter {
    /// Sector (workbook sheet) to scan.
    pub sector: String,
    /// Venues to keep. An empty list keeps every row, including unknown venues.
    pub exchanges: Vec<Venue>,
    /// Inclusive lower price bound.
    pub price_min: Option<f64>,
    /// Inclusive upper price bound.
    pub price_max: Option<f64>,
}

impl ScanFilter {
    /// Check bounds for consistency.
    ///
    /// # Errors
    /// Returns `ScanError::Config` when a bound is negative or not finite, or when
    /// `price_min` exceeds `price_max`.
    pub fn validate(&self) -> Result<(), ScanError> {
        for (name, bound) in [("price_min", self.price_min), ("price_max", self.price_max)] {
            if let Some(v) = bound
                && (!v.is_finite() || v < 0.0)
            {
                return Err(ScanError::Config(format!("{name} must be a non-negative number")));
            }
        }
        if let (Some(lo), Some(hi)) = (self.price_min, self.price_max)
            && lo > hi
        {
            return Err(ScanError::Config(format!(
                "price_min ({lo}) is greater than price_max ({hi})"
            )));
        }
        Ok(())
    }

    /// Whether a row listed on `venue` passes the exchange filter.
    #[must_use]
    pub fn admits_venue(&self, venue: &Venue) -> bool {
        self.exchanges.is_empty() || self.exchanges.contains(venue)
    }

    /// Whether `price` lies within the inclusive bounds.
    #[must_use]
    pub fn admits_price(&self, price: f64) -> bool {
        self.price_min.is_none_or(|lo| price >= lo) && self.price_max.is_none_or(|hi| price <= hi)
    }
}

impl Default for ScanFilter {
    fn default() -> Self {
        Self {
            sector: DEFAULT_SECTORS[0].to_string(),
            exchanges: Venue::KNOWN.to_vec(),
            price_min: None,
            price_max: Some(10.0),
        }
    }
}

/// Top-level configuration, loadable from a TOML file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Row filter.
    pub filter: ScanFilter,
    /// Response cache.
    pub cache: CacheConfig,
    /// Request pacing.
    pub pacing: PacingConfig,
}
