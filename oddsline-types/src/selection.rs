use serde::{Deserialize, Serialize};

use crate::SeriesKey;

/// A primary series the user asked to compare, with its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    /// Unique key of the series.
    pub key: SeriesKey,
    /// Display label, e.g. "Will BTC close above 100k? (Yes)".
    pub label: String,
    /// Upstream identifier passed to the series fetch (e.g. a CLOB token id).
    pub source_id: String,
    /// Optional lower bound for the fetch; falls back to the session default.
    pub since: Option<i64>,
}

impl SelectionEntry {
    /// Build an entry whose label and source id default to the key.
    #[must_use]
    pub fn new(key: SeriesKey) -> Self {
        Self {
            label: key.to_string(),
            source_id: key.to_string(),
            key,
            since: None,
        }
    }

    /// Set the display label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the upstream source identifier.
    #[must_use]
    pub fn source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = source_id.into();
        self
    }

    /// Set the fetch lower bound (seconds).
    #[must_use]
    pub const fn since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }
}
