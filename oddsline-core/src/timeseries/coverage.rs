use crate::OddslineError;
use crate::timeseries::util::ensure_range;

/// What must be fetched to extend a covered interval to a requested one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoveragePlan {
    /// The request lies inside the covered interval; nothing to fetch.
    Hit,
    /// Nothing is covered; fetch the whole `(min, max)` request.
    Full((i64, i64)),
    /// Fetch these one or two delta ranges, left side first.
    Extend(Vec<(i64, i64)>),
}

/// Plan the fetches needed to cover `[min, max]` given the current coverage.
///
/// Delta ranges share their inner bound with the covered interval
/// (`[min, covered_min]` and `[covered_max, max]`); the overlap sample is
/// removed by the merge.
///
/// # Errors
/// Returns `InvalidRange` if `min > max`.
pub fn plan_coverage(
    covered: Option<(i64, i64)>,
    min: i64,
    max: i64,
) -> Result<CoveragePlan, OddslineError> {
    ensure_range(min, max)?;
    let Some((lo, hi)) = covered else {
        return Ok(CoveragePlan::Full((min, max)));
    };
    if min >= lo && max <= hi {
        return Ok(CoveragePlan::Hit);
    }
    let mut deltas = Vec::with_capacity(2);
    if min < lo {
        deltas.push((min, lo));
    }
    if max > hi {
        deltas.push((hi, max));
    }
    Ok(CoveragePlan::Extend(deltas))
}
