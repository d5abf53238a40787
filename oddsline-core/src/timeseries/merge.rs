use std::collections::BTreeMap;

use crate::Sample;

/// Normalize an upstream sample list into a series.
///
/// - Samples with a non-finite price are dropped.
/// - The list is stable-sorted ascending by `t`.
/// - For duplicate timestamps the first occurrence (in input order) is kept.
#[must_use]
pub fn normalize_series(mut samples: Vec<Sample>) -> Vec<Sample> {
    samples.retain(|s| s.p.is_finite());
    samples.sort_by_key(|s| s.t);
    samples.dedup_by_key(|s| s.t);
    samples
}

/// Merge several sample lists in priority order (first is highest).
///
/// Samples are keyed by `t`; the first appearance wins for duplicates and the
/// output is sorted ascending. Non-finite prices are skipped.
#[must_use]
pub fn merge_series<I>(series: I) -> Vec<Sample>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = Sample>,
{
    let mut map: BTreeMap<i64, f64> = BTreeMap::new();
    for s in series {
        for sample in s {
            if sample.p.is_finite() {
                map.entry(sample.t).or_insert(sample.p);
            }
        }
    }
    map.into_iter().map(|(t, p)| Sample { t, p }).collect()
}
