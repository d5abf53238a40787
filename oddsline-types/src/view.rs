//! Snapshot types handed to the rendering layer.

use serde::{Deserialize, Serialize};

use crate::{AlignedRow, OddslineError, SecondaryKind, SelectionEntry, SeriesKey};

/// Coarse state of a session's selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing is selected.
    #[default]
    Idle,
    /// At least one selected series is still being fetched.
    Loading(Vec<SeriesKey>),
    /// Every selected series has its data.
    Ready,
}

/// A selected series as shown to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedSeries {
    /// The selection entry with its display metadata.
    pub entry: SelectionEntry,
    /// True while the series fetch is outstanding.
    pub loading: bool,
}

/// Immutable snapshot of a session: aligned rows plus selection and error flags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionView {
    /// Monotonic version of the selection state this view was built from.
    pub generation: u64,
    /// Aligned rows, ascending by timestamp.
    pub rows: Vec<AlignedRow>,
    /// Selected series in selection order.
    pub selected: Vec<SelectedSeries>,
    /// Coarse selection phase.
    pub phase: Phase,
    /// Active secondary series kind, if any.
    pub secondary: Option<SecondaryKind>,
    /// Interval currently held by the secondary range cache.
    pub coverage: Option<(i64, i64)>,
    /// Most recent failed selection, naming the series that was rolled back.
    pub last_error: Option<OddslineError>,
    /// Failure to cover the secondary series during the last recompute.
    pub secondary_error: Option<OddslineError>,
}

impl SessionView {
    /// Keys of all selected series in selection order.
    #[must_use]
    pub fn selected_keys(&self) -> Vec<&SeriesKey> {
        self.selected.iter().map(|s| &s.entry.key).collect()
    }

    /// True while any selected series is loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading(_))
    }
}
