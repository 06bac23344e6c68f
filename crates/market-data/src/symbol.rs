//! Broker symbol normalization.
//!
//! Holdings extractors hand back whatever the broker printed: lowercase
//! tickers, NSE series suffixes ("-EQ", "-BE"), or abbreviations that do not
//! match the exchange listing. Quotes are only fetched for normalized symbols.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// NSE trading-series suffixes that brokers append to the listed symbol.
const SERIES_SUFFIXES: &[&str] = &["-EQ", "-BE", "-BZ", "-SM", "-ST"];

lazy_static! {
    /// Known broker abbreviations that differ from the listed ticker.
    static ref TICKER_FIXES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("ART", "ANANDRATHI");
        m.insert("ARATHI", "ANANDRATHI");
        m.insert("BARODA", "BANKBARODA");
        m.insert("BOB", "BANKBARODA");
        m.insert("CANB", "CANBK");
        m.insert("JFS", "JIOFIN");
        m.insert("JIOFINANCE", "JIOFIN");
        m.insert("ONE97", "PAYTM");
        m.insert("LIC", "LICI");
        m.insert("BHSL", "BAJAJHIND");
        m.insert("BFIL", "BALUFORGE");
        m.insert("AZE", "AZAD");
        m.insert("ETNL", "ETERNAL");
        m.insert("MOFSL", "MOTILALOFS");
        m
    };
}

/// Normalize a broker-supplied ticker into its listed form.
///
/// Uppercases, trims, strips any exchange suffix (".NS", ".BO") and trading
/// series suffix, then applies known alias fixes.
pub fn normalize_symbol(raw: &str) -> String {
    let mut symbol = raw.trim().to_uppercase();

    for exchange in [".NS", ".BO"] {
        if let Some(stripped) = symbol.strip_suffix(exchange) {
            symbol = stripped.to_string();
        }
    }
    for series in SERIES_SUFFIXES {
        if let Some(stripped) = symbol.strip_suffix(series) {
            symbol = stripped.to_string();
        }
    }

    match TICKER_FIXES.get(symbol.as_str()) {
        Some(fixed) => (*fixed).to_string(),
        None => symbol,
    }
}

/// Build the provider lookup symbol from a normalized ticker.
///
/// Appends the configured exchange suffix (e.g. ".NS") unless the symbol
/// already carries one.
pub fn lookup_symbol(normalized: &str, exchange_suffix: &str) -> String {
    if normalized.is_empty() || normalized.contains('.') || exchange_suffix.is_empty() {
        return normalized.to_string();
    }
    format!("{}{}", normalized, exchange_suffix)
}
