use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::SUM_COLUMN;

/// One output record of the aligner: each active series' nearest value at `timestamp`.
///
/// `values` is sparse; a missing column means no sample fell within tolerance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignedRow {
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    /// Column name (series key, `sum`, or secondary label) to value.
    pub values: BTreeMap<String, f64>,
}

impl AlignedRow {
    /// An empty row at `timestamp`.
    #[must_use]
    pub const fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            values: BTreeMap::new(),
        }
    }

    /// Value of a column, if present.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// The derived cross-series sum, if present.
    #[must_use]
    pub fn sum(&self) -> Option<f64> {
        self.get(SUM_COLUMN)
    }
}
