//! Incremental coverage cache for the secondary series.

use std::sync::Arc;

use futures::future::try_join_all;
use oddsline_core::{
    CoveragePlan, OddslineError, RangeProvider, Sample, SecondaryKind, merge_series,
    normalize_series, plan_coverage,
};

/// Outcome of [`RangeCache::ensure_covered`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coverage {
    /// The request was already covered; nothing was fetched.
    Hit,
    /// Nothing usable was cached; the whole request was fetched.
    Full,
    /// Only the listed delta ranges were fetched and merged in.
    Extended {
        /// The one or two sub-ranges that were fetched.
        ranges: Vec<(i64, i64)>,
    },
}

/// Tracks the contiguous interval already fetched for one secondary kind.
///
/// Invariant: when `covered` is `Some((lo, hi))`, every sample the upstream
/// serves with `lo <= t <= hi` is present in `series`. All mutation goes
/// through [`ensure_covered`](Self::ensure_covered) and [`reset`](Self::reset).
#[derive(Debug)]
pub struct RangeCache {
    kind: Option<SecondaryKind>,
    covered: Option<(i64, i64)>,
    series: Arc<[Sample]>,
}

impl Default for RangeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeCache {
    /// An empty cache with no kind.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: None,
            covered: None,
            series: Arc::from(Vec::new()),
        }
    }

    /// Kind whose coverage is held, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<&SecondaryKind> {
        self.kind.as_ref()
    }

    /// Covered interval, if any.
    #[must_use]
    pub const fn covered(&self) -> Option<(i64, i64)> {
        self.covered
    }

    /// Snapshot of the merged series.
    #[must_use]
    pub fn series(&self) -> Arc<[Sample]> {
        Arc::clone(&self.series)
    }

    /// Drop all coverage and the cached kind.
    pub fn reset(&mut self) {
        self.kind = None;
        self.covered = None;
        self.series = Arc::from(Vec::new());
    }

    /// Extend coverage so that `[min, max]` is fully held for `kind`.
    ///
    /// - A different kind than the cached one discards the cache and fetches
    ///   the whole request.
    /// - A request inside the covered interval fetches nothing.
    /// - Otherwise the missing left and right deltas are fetched concurrently,
    ///   merged with the cached samples (cached samples win on equal `t`), and
    ///   the covered interval is widened.
    ///
    /// # Errors
    /// - `InvalidRange` if `min > max`.
    /// - `FetchFailed` naming `symbol [start, end]` if any fetch fails; the
    ///   coverage is left as it was, so a retry fetches the same ranges.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "oddsline::range_cache",
            skip(self, provider),
            fields(symbol = %kind.symbol(), covered = ?self.covered),
        )
    )]
    pub async fn ensure_covered(
        &mut self,
        provider: &dyn RangeProvider,
        kind: &SecondaryKind,
        min: i64,
        max: i64,
    ) -> Result<Coverage, OddslineError> {
        oddsline_core::ensure_range(min, max)?;
        if self.kind.as_ref() != Some(kind) {
            self.reset();
            self.kind = Some(kind.clone());
        }

        let outcome = match plan_coverage(self.covered, min, max)? {
            CoveragePlan::Hit => Coverage::Hit,
            CoveragePlan::Full((start, end)) => {
                let fetched = fetch_range(provider, kind, start, end).await?;
                self.series = Arc::from(normalize_series(fetched));
                self.covered = Some((start, end));
                Coverage::Full
            }
            CoveragePlan::Extend(ranges) => {
                let fetched = try_join_all(
                    ranges
                        .iter()
                        .map(|&(start, end)| fetch_range(provider, kind, start, end)),
                )
                .await?;
                let merged = merge_series(std::iter::once(self.series.to_vec()).chain(fetched));
                self.series = Arc::from(merged);
                self.covered = self
                    .covered
                    .map(|(lo, hi)| (lo.min(min), hi.max(max)));
                Coverage::Extended { ranges }
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "oddsline::range_cache",
            outcome = ?outcome,
            covered = ?self.covered,
            samples = self.series.len(),
            "coverage ensured"
        );
        Ok(outcome)
    }
}

async fn fetch_range(
    provider: &dyn RangeProvider,
    kind: &SecondaryKind,
    start: i64,
    end: i64,
) -> Result<Vec<Sample>, OddslineError> {
    let mut samples = provider
        .fetch_range(kind.symbol(), start, end)
        .await
        .map_err(|e| e.tag_fetch(format!("{} [{start}, {end}]", kind.symbol())))?;
    samples.retain(|s| s.t >= start && s.t <= end);
    Ok(samples)
}
