use std::sync::Arc;

use chrono::DateTime;
use oddsline::{OddslineConnector, SecondaryKind, SelectionEntry, SeriesKey, SessionView};

/// Return a connector for demos.
#[must_use]
pub fn get_connector() -> Arc<dyn OddslineConnector> {
    println!("--- (Using Mock Connector) ---");
    Arc::new(oddsline_mock::MockConnector::new())
}

/// Selection entry for one side of a fixture market.
///
/// # Errors
/// Returns `InvalidArg` if `key` is empty or reserved.
pub fn side(
    key: &str,
    label: &str,
    source_id: &str,
) -> Result<SelectionEntry, oddsline::OddslineError> {
    Ok(SelectionEntry::new(SeriesKey::new(key)?)
        .label(label)
        .source_id(source_id))
}

/// The BTC overlay labelled `BTC`.
///
/// # Errors
/// Never fails for the built-in symbol; the signature mirrors `SecondaryKind::new`.
pub fn btc() -> Result<SecondaryKind, oddsline::OddslineError> {
    SecondaryKind::new("BTCUSDT")?.with_label("BTC")
}

/// Print the rows of a view as a fixed-width table, one column per series.
pub fn print_rows(view: &SessionView, limit: usize) {
    let mut columns: Vec<String> = view
        .selected
        .iter()
        .map(|s| s.entry.key.to_string())
        .collect();
    if view.selected.len() >= 2 {
        columns.push(oddsline::SUM_COLUMN.to_string());
    }
    if let Some(kind) = &view.secondary {
        columns.push(kind.label().to_string());
    }

    print!("{:<17}", "time (UTC)");
    for c in &columns {
        print!("{c:>10}");
    }
    println!();
    for row in view.rows.iter().take(limit) {
        let ts = DateTime::from_timestamp(row.timestamp, 0).map_or_else(
            || row.timestamp.to_string(),
            |dt| dt.format("%m-%d %H:%M").to_string(),
        );
        print!("{ts:<17}");
        for c in &columns {
            match row.get(c) {
                Some(v) => print!("{v:>10.4}"),
                None => print!("{:>10}", "-"),
            }
        }
        println!();
    }
    if view.rows.len() > limit {
        println!("... {} more rows", view.rows.len() - limit);
    }
}
