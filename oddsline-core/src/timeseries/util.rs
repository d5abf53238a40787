//! Shared helpers for series spans and invariants.

use crate::{OddslineError, Sample};

/// Reject spans with `min > max`.
///
/// # Errors
/// Returns `InvalidRange` when `min > max`.
pub const fn ensure_range(min: i64, max: i64) -> Result<(), OddslineError> {
    if min > max {
        return Err(OddslineError::invalid_range(min, max));
    }
    Ok(())
}

/// First and last timestamp of a sorted series, or `None` if it is empty.
#[must_use]
pub fn span_of(series: &[Sample]) -> Option<(i64, i64)> {
    Some((series.first()?.t, series.last()?.t))
}

/// Smallest interval containing the spans of all non-empty series.
#[must_use]
pub fn union_span<'a, I>(series: I) -> Option<(i64, i64)>
where
    I: IntoIterator<Item = &'a [Sample]>,
{
    series
        .into_iter()
        .filter_map(span_of)
        .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
}

/// True if timestamps are strictly increasing (sorted, no duplicates).
#[must_use]
pub fn is_strictly_ascending(series: &[Sample]) -> bool {
    series.windows(2).all(|w| w[0].t < w[1].t)
}
