#![doc = include_str!("../README.md")]
//! minescan-middleware
//!
//! Connector wrappers and the builder that stacks them.

mod builder;
mod cache;
mod pacing;

pub use crate::builder::ConnectorBuilder;
pub use crate::cache::{CacheMiddleware, CachingConnector, MemoryCache, NoopCache};
pub use crate::pacing::{PacingConnector, PacingMiddleware};
