//! oddsline-core
//!
//! Core traits and utilities shared across the oddsline workspace.
//!
//! - `types`: re-exports of the shared data model (samples, keys, rows, config).
//! - `connector`: the `OddslineConnector` trait and its series/range provider roles.
//! - `paging`: assembles one range from an upstream that serves bounded pages.
//! - `timeseries`: normalization, coverage planning, and nearest-neighbour alignment.
//!
//! Everything here is runtime-agnostic; the providers are `async_trait` objects
//! and the orchestrating `oddsline` crate drives them on Tokio.
#![warn(missing_docs)]

/// Connector role traits and the umbrella `OddslineConnector` interface.
pub mod connector;
/// Range assembly over page-limited upstreams.
pub mod paging;
/// Time-series utilities for normalizing, planning coverage, and aligning.
pub mod timeseries;
pub mod types;

pub use connector::{OddslineConnector, RangeProvider, SeriesProvider};
pub use paging::{PageProvider, PagedRangeProvider};
pub use timeseries::align::{SecondaryOverlay, build_rows, nearest, nearest_sample};
pub use timeseries::coverage::{CoveragePlan, plan_coverage};
pub use timeseries::merge::{merge_series, normalize_series};
pub use timeseries::util::{ensure_range, is_strictly_ascending, span_of, union_span};
pub use types::*;
