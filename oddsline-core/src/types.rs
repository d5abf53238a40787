//! Re-export of the shared data model from `oddsline-types`.
// Consolidated re-exports so downstream crates can depend on `oddsline-core` only

pub use oddsline_types::{
    AlignConfig, AlignedRow, OddslineConfig, OddslineError, PagingConfig, Phase,
    SUM_COLUMN, Sample, SecondaryKind, SelectedSeries, SelectionEntry, SeriesKey, SessionView,
};
pub use oddsline_types::{
    DEFAULT_FIDELITY_MINUTES, DEFAULT_PRIMARY_TOLERANCE_SECS, DEFAULT_SECONDARY_TOLERANCE_SECS,
};
