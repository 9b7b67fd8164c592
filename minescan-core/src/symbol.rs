use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier understood by the market-data provider, e.g. `ABX.TO`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedSymbol(String);

impl ResolvedSymbol {
    /// Wrap an already-normalized provider symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Borrow the symbol text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the symbol carries a venue suffix such as `.TO`.
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        self.0.contains('.')
    }
}

impl fmt::Display for ResolvedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResolvedSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResolvedSymbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
