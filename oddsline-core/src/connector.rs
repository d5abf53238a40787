use async_trait::async_trait;

use crate::{OddslineError, Sample};

/// Focused role trait for connectors that serve primary (prediction-market) series.
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// Fetch price samples for `source_id` from `since` onward at roughly
    /// `fidelity_minutes` spacing.
    ///
    /// Output order is not required to be ascending; callers normalize.
    async fn fetch_series(
        &self,
        source_id: &str,
        since: i64,
        fidelity_minutes: u32,
    ) -> Result<Vec<Sample>, OddslineError>;
}

/// Focused role trait for connectors that serve the secondary (crypto) series.
#[async_trait]
pub trait RangeProvider: Send + Sync {
    /// Fetch every sample for `symbol` with `start <= t <= end`.
    ///
    /// Implementations handle upstream pagination internally and return one
    /// ascending, deduplicated series for the whole span.
    async fn fetch_range(
        &self,
        symbol: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Sample>, OddslineError>;
}

/// Umbrella connector interface; roles are advertised through the `as_*` accessors.
pub trait OddslineConnector: Send + Sync {
    /// A stable identifier used in logs and error tags (e.g. "polymarket-clob").
    fn name(&self) -> &'static str;

    /// Advertise primary-series capability by returning a usable trait object reference.
    fn as_series_provider(&self) -> Option<&dyn SeriesProvider> {
        None
    }

    /// Advertise secondary-range capability by returning a usable trait object reference.
    fn as_range_provider(&self) -> Option<&dyn RangeProvider> {
        None
    }
}
