//! Oddsline aligns prediction-market price series with a crypto price overlay.
//!
//! Overview
//! - Fetches each selected primary series once through a `SeriesProvider`
//!   and keeps it for the session (`SeriesStore`).
//! - Keeps one secondary series covered over the union span of the selected
//!   series, fetching only the missing left/right deltas (`RangeCache`).
//! - Rebuilds aligned rows on every change: nearest-match values per series,
//!   a `sum` column gated on all selected series being present, and the
//!   overlay value under its label.
//! - Publishes immutable `SessionView` snapshots through a `watch` channel.
//!
//! Key behaviors and trade-offs
//! - Memoization: stored series are never evicted during a session, so a
//!   reselect costs no request but may show data as old as the first fetch.
//! - Failures: a failed primary fetch rolls back only that selection; a failed
//!   overlay fetch drops only the overlay column and leaves coverage untouched
//!   so the next recompute retries the same ranges.
//! - Tolerances: 270s for primary series and 120s for the overlay by default.
//!
//! Examples
//! Building a session over two connectors:
//! ```rust,ignore
//! use std::sync::Arc;
//! use oddsline::{SecondaryKind, Session};
//!
//! let session = Session::builder()
//!     .with_connector(Arc::new(ClobConnector::new()))
//!     .with_connector(Arc::new(KlinesConnector::new()))
//!     .secondary(SecondaryKind::new("BTCUSDT")?.with_label("BTC")?)
//!     .build()?;
//! ```
//!
//! Selecting both sides of a market and reading the rows:
//! ```rust,ignore
//! use oddsline::{SelectionEntry, SeriesKey};
//!
//! session.select(SelectionEntry::new(SeriesKey::new("yes")?).source_id("7131")).await?;
//! let view = session.select(SelectionEntry::new(SeriesKey::new("no")?).source_id("7132")).await?;
//! for row in &view.rows {
//!     println!("{} {:?} {:?}", row.timestamp, row.get("yes"), row.sum());
//! }
//! ```
//!
//! See the `demos` crate for runnable walk-throughs.
#![warn(missing_docs)]

pub(crate) mod core;
pub mod range_cache;
mod selection;
pub mod store;

pub use core::{Session, SessionBuilder};
pub use range_cache::{Coverage, RangeCache};
pub use store::SeriesStore;

// Re-export core types for convenience
pub use oddsline_core::{
    AlignConfig, AlignedRow, OddslineConfig, OddslineConnector, OddslineError,
    PageProvider, PagedRangeProvider, PagingConfig, Phase, RangeProvider, SUM_COLUMN, Sample,
    SecondaryKind, SelectedSeries, SelectionEntry, SeriesKey, SeriesProvider, SessionView,
};
