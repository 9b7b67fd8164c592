//! minescan-core
//!
//! Core types and traits shared across the minescan workspace.
//!
//! - `connector`: the `PriceConnector` trait and its `HistoryProvider` capability.
//! - `series`: the `PriceSeries` handed from connectors to the return calculator.
//! - `cache`: the `ResponseCache` collaborator injected into the caching middleware.
//! - `middleware`: the `Middleware` trait implemented by connector wrappers.
//!
//! Provider-facing domain types (`HistoryResponse`, `Candle`, `Money`, ...) come from
//! `paft` and are re-exported here so downstream crates depend on `minescan-core` only.
#![warn(missing_docs)]

/// Response cache contract.
pub mod cache;
/// Connector capability traits.
pub mod connector;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
/// Daily price series and tolerant numeric cells.
pub mod series;
mod symbol;

pub use cache::ResponseCache;
pub use connector::{HistoryProvider, PriceConnector};
pub use middleware::Middleware;
pub use series::{PricePoint, PriceSeries, Scalar};
pub use symbol::ResolvedSymbol;

pub use minescan_types::{
    CacheConfig, DEFAULT_SECTORS, Horizon, PacingConfig, ScanConfig, ScanError, ScanFilter, Venue,
};

pub use paft::domain::{AssetKind, Instrument};
pub use paft::market::requests::history::{HistoryRequest, Interval, Range};
pub use paft::market::responses::history::{Candle, HistoryResponse};
pub use paft::money::{Currency, IsoCurrency, Money};
pub use rust_decimal::Decimal;
