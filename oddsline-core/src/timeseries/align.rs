use std::collections::BTreeSet;

use crate::{AlignConfig, AlignedRow, SUM_COLUMN, Sample, SeriesKey};

/// The secondary series handed to [`build_rows`] with its column label.
#[derive(Debug, Clone, Copy)]
pub struct SecondaryOverlay<'a> {
    /// Column label in the produced rows.
    pub label: &'a str,
    /// Sorted secondary samples.
    pub series: &'a [Sample],
}

/// Find the sample nearest to `target` within `tolerance` seconds.
///
/// `series` must be sorted ascending by `t`. The candidates are the sample at
/// the insertion point of `target` and the one before it; on equal distance the
/// earlier sample wins. A negative tolerance never matches.
#[must_use]
pub fn nearest_sample(series: &[Sample], target: i64, tolerance: i64) -> Option<&Sample> {
    let tolerance = u64::try_from(tolerance).ok()?;
    let idx = series.partition_point(|s| s.t < target);
    let before = idx.checked_sub(1).and_then(|i| series.get(i));
    let after = series.get(idx);
    let best = match (before, after) {
        (Some(b), Some(a)) => {
            if target.abs_diff(b.t) <= a.t.abs_diff(target) {
                b
            } else {
                a
            }
        }
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => return None,
    };
    (best.t.abs_diff(target) <= tolerance).then_some(best)
}

/// Price of the sample nearest to `target` within `tolerance`, if any.
#[must_use]
pub fn nearest(series: &[Sample], target: i64, tolerance: i64) -> Option<f64> {
    nearest_sample(series, target, tolerance).map(|s| s.p)
}

/// Align the selected primary series and an optional secondary series on one axis.
///
/// Produces one row per distinct timestamp found in any input, ascending. Each
/// row carries every selected series' nearest value within the primary
/// tolerance, the secondary value (under its label) within the secondary
/// tolerance, and `sum` when at least two series are selected and all of them
/// have a value at that timestamp.
#[must_use]
pub fn build_rows<'a, I>(
    selected: I,
    secondary: Option<SecondaryOverlay<'_>>,
    cfg: &AlignConfig,
) -> Vec<AlignedRow>
where
    I: IntoIterator<Item = (&'a SeriesKey, &'a [Sample])>,
{
    let selected: Vec<(&SeriesKey, &[Sample])> = selected.into_iter().collect();

    let mut timestamps: BTreeSet<i64> = BTreeSet::new();
    for (_, series) in &selected {
        timestamps.extend(series.iter().map(|s| s.t));
    }
    if let Some(overlay) = secondary {
        timestamps.extend(overlay.series.iter().map(|s| s.t));
    }

    let mut rows = Vec::with_capacity(timestamps.len());
    for ts in timestamps {
        let mut row = AlignedRow::new(ts);
        let mut sum = 0.0;
        let mut present = 0usize;
        for (key, series) in &selected {
            if let Some(p) = nearest(series, ts, cfg.primary_tolerance_secs) {
                row.values.insert(key.to_string(), p);
                sum += p;
                present += 1;
            }
        }
        // Partial sums are never emitted.
        if selected.len() >= 2 && present == selected.len() {
            row.values.insert(SUM_COLUMN.to_string(), sum);
        }
        if let Some(overlay) = secondary
            && let Some(p) = nearest(overlay.series, ts, cfg.secondary_tolerance_secs)
        {
            row.values.insert(overlay.label.to_string(), p);
        }
        rows.push(row);
    }
    rows
}
