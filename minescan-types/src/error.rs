use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the minescan workspace.
///
/// Per-symbol failures (`NotFound`, `RateLimited`, `Connector`, `Data`) never abort a scan;
/// the scanner folds them into its ignored count. `Sheet` and `Config` are whole-scan failures.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanError {
    /// The provider has no data for the requested symbol.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "history for ABX.TO".
        what: String,
    },

    /// Issues with the returned or expected data (missing columns, unparsable payload).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The provider rejected the request because of its per-client rate limit.
    #[error("{connector} rate limited: {context}")]
    RateLimited {
        /// Connector name that reported the limit.
        connector: String,
        /// What was being requested.
        context: String,
    },

    /// The input workbook or one of its sheets could not be read.
    #[error("workbook {path}: {msg}")]
    Sheet {
        /// Path of the workbook or sheet.
        path: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Invalid configuration (bad file, inconsistent bounds).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl ScanError {
    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `RateLimited` error.
    pub fn rate_limited(connector: impl Into<String>, context: impl Into<String>) -> Self {
        Self::RateLimited {
            connector: connector.into(),
            context: context.into(),
        }
    }

    /// Helper: build a `Sheet` error for a workbook path.
    pub fn sheet(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Sheet {
            path: path.into(),
            msg: msg.into(),
        }
    }

    /// Returns true if a candidate symbol failing with this error should stop the
    /// candidate chain for the whole ticker.
    ///
    /// `NotFound` only means this suffix is wrong, so the next candidate is tried.
    /// Rate limits, transport failures and malformed payloads give up on the ticker.
    #[must_use]
    pub const fn ends_candidate_chain(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }

    /// Returns true for failures that abort a scan instead of skipping one row.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Sheet { .. } | Self::Config(_))
    }
}

impl From<paft::Error> for ScanError {
    fn from(err: paft::Error) -> Self {
        use paft::Error as E;
        match err {
            E::Money(_) => Self::Data(err.to_string()),
            E::Core(_) | E::Domain(_) | E::Market(_) | E::MoneyParse(_) | E::Canonical(_) => {
                Self::InvalidArg(err.to_string())
            }
        }
    }
}

impl From<paft::market::MarketError> for ScanError {
    fn from(e: paft::market::MarketError) -> Self {
        Self::InvalidArg(e.to_string())
    }
}

impl From<paft::money::MoneyError> for ScanError {
    fn from(e: paft::money::MoneyError) -> Self {
        Self::Data(e.to_string())
    }
}
