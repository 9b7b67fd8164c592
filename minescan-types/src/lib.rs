//! Minescan-specific error, configuration and domain enums built on top of `paft`.
#![warn(missing_docs)]

mod config;
mod error;
mod horizon;
mod venue;

pub use config::{CacheConfig, DEFAULT_SECTORS, PacingConfig, ScanConfig, ScanFilter};
pub use error::ScanError;
pub use horizon::Horizon;
pub use venue::Venue;
