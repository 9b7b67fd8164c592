//! Mapping workbook tickers to provider symbols.

use minescan_core::{ResolvedSymbol, Venue};

/// Canonical form of a raw ticker cell.
///
/// Uppercases and drops every space, non-breaking space and tab, wherever it sits.
#[must_use]
pub fn normalize_ticker(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\t'))
        .collect::<String>()
        .trim()
        .to_uppercase()
}

/// Ordered provider candidates for `ticker` listed on `exchange`.
///
/// See [`resolve_venue`].
#[must_use]
pub fn resolve(ticker: &str, exchange: &str) -> Vec<ResolvedSymbol> {
    resolve_venue(ticker, &Venue::parse(exchange))
}

/// Ordered provider candidates for `ticker` listed on an already-parsed venue.
///
/// A ticker that already carries a `.` suffix is its own sole candidate. A known
/// venue yields exactly one suffixed symbol. Anything else tries every suffix,
/// TSX first, and finally the bare ticker. An empty ticker yields nothing.
#[must_use]
pub fn resolve_venue(ticker: &str, venue: &Venue) -> Vec<ResolvedSymbol> {
    let t = normalize_ticker(ticker);
    if t.is_empty() {
        return Vec::new();
    }
    if t.contains('.') {
        return vec![ResolvedSymbol::new(t)];
    }
    if let Some(suffix) = venue.yahoo_suffix() {
        return vec![ResolvedSymbol::new(format!("{t}{suffix}"))];
    }
    Venue::KNOWN
        .iter()
        .filter_map(Venue::yahoo_suffix)
        .map(|suffix| ResolvedSymbol::new(format!("{t}{suffix}")))
        .chain(std::iter::once(ResolvedSymbol::new(t.clone())))
        .collect()
}
