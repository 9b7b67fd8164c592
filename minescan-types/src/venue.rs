//! Listing venues found in the workbook's `Exchange` column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canadian listing venue of a ticker.
///
/// Parsing never fails: anything not recognised is kept, uppercased, in `Other`
/// so the resolver can fall back to trying every provider suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Venue {
    /// Toronto Stock Exchange.
    Tsx,
    /// TSX Venture Exchange.
    Tsxv,
    /// Canadian Securities Exchange.
    Cse,
    /// Unrecognised or empty exchange code, uppercased.
    Other(String),
}

impl Venue {
    /// All venues the resolver knows a provider suffix for.
    pub const KNOWN: [Self; 3] = [Self::Tsx, Self::Tsxv, Self::Cse];

    /// Parse an exchange code, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        let code = code.trim().to_ascii_uppercase();
        match code.as_str() {
            "TSX" => Self::Tsx,
            "TSXV" | "TSX.V" | "TSX-V" => Self::Tsxv,
            "CSE" => Self::Cse,
            _ => Self::Other(code),
        }
    }

    /// Canonical code used in filters and output.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Tsx => "TSX",
            Self::Tsxv => "TSXV",
            Self::Cse => "CSE",
            Self::Other(code) => code,
        }
    }

    /// Yahoo Finance suffix for this venue, if it has one.
    #[must_use]
    pub const fn yahoo_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Tsx => Some(".TO"),
            Self::Tsxv => Some(".V"),
            Self::Cse => Some(".CN"),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Venue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for Venue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Venue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
