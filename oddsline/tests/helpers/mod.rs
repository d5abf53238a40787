#![allow(dead_code)]

// Re-export helpers so tests can `use helpers::*;`
pub mod mock_connector;

pub use mock_connector::MockConnector;

use std::sync::Arc;

use oddsline::{OddslineConnector, Sample, SecondaryKind, SelectionEntry, SeriesKey, Session};

/// Symbol used for the overlay across tests.
pub const BTC: &str = "BTCUSDT";

/// Build a series from `(t, p)` pairs.
pub fn s(points: &[(i64, f64)]) -> Vec<Sample> {
    points.iter().copied().map(Sample::from).collect()
}

/// Construct a `SeriesKey` for test usage with infallible expectations.
pub fn key(k: &str) -> SeriesKey {
    SeriesKey::new(k).expect("valid static test key")
}

/// Selection entry whose source id equals its key.
pub fn entry(k: &str) -> SelectionEntry {
    SelectionEntry::new(key(k))
}

/// Overlay kind labelled `BTC`.
pub fn btc() -> SecondaryKind {
    SecondaryKind::new(BTC)
        .and_then(|k| k.with_label("BTC"))
        .expect("valid kind")
}

/// Session over a single connector with default configuration.
pub fn session(conn: &Arc<MockConnector>) -> Session {
    Session::builder()
        .with_connector(Arc::clone(conn) as Arc<dyn OddslineConnector>)
        .build()
        .expect("session")
}

/// Session over a single connector with the `BTC` overlay active.
pub fn session_with_btc(conn: &Arc<MockConnector>) -> Session {
    Session::builder()
        .with_connector(Arc::clone(conn) as Arc<dyn OddslineConnector>)
        .secondary(btc())
        .build()
        .expect("session")
}

/// Price of `column` at `ts`, if a row exists there.
pub fn value_at(rows: &[oddsline::AlignedRow], ts: i64, column: &str) -> Option<f64> {
    rows.iter()
        .find(|r| r.timestamp == ts)
        .and_then(|r| r.get(column))
}
