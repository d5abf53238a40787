//! Data model, error type, and configuration primitives shared by the oddsline crates.
#![warn(missing_docs)]

mod config;
mod error;
mod row;
mod sample;
mod selection;
mod view;

pub use config::{
    AlignConfig, DEFAULT_FIDELITY_MINUTES, DEFAULT_PRIMARY_TOLERANCE_SECS,
    DEFAULT_SECONDARY_TOLERANCE_SECS, OddslineConfig, PagingConfig,
};
pub use error::OddslineError;
pub use row::AlignedRow;
pub use sample::{SUM_COLUMN, Sample, SecondaryKind, SeriesKey};
pub use selection::SelectionEntry;
pub use view::{Phase, SelectedSeries, SessionView};
