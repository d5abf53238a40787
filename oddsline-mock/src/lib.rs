//! Mock connectors for CI-safe tests and demos.
//!
//! - [`MockConnector`] serves deterministic fixture data for both roles.
//! - [`DynamicMockConnector`] defers every call to a test-side controller and
//!   records the requests it receives.
use async_trait::async_trait;
use oddsline_core::connector::{OddslineConnector, RangeProvider, SeriesProvider};
use oddsline_core::{OddslineError, PageProvider, PagedRangeProvider, PagingConfig, Sample};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use fixtures::klines::KLINE_STEP_SECS;
pub use fixtures::markets::{BTC_70K_NO, BTC_70K_YES, ETH_FLIP_YES};

const NAME: &str = "oddsline-mock";

/// Candles per page served by the fixture kline pages.
pub const KLINE_PAGE_LIMIT: usize = 50;

fn maybe_fail(id: &str, capability: &'static str) -> Result<(), OddslineError> {
    match id {
        "FAIL" => Err(OddslineError::connector(
            NAME,
            format!("forced failure: {capability}"),
        )),
        _ => Ok(()),
    }
}

/// Page-limited kline upstream over the fixture candles.
pub struct KlinePages;

#[async_trait]
impl PageProvider for KlinePages {
    async fn fetch_page(
        &self,
        symbol: &str,
        start: i64,
        end: i64,
        limit: usize,
    ) -> Result<Vec<Sample>, OddslineError> {
        maybe_fail(symbol, "klines")?;
        fixtures::klines::page(symbol, start, end, limit)
            .ok_or_else(|| OddslineError::not_found(format!("klines for {symbol}")))
    }
}

/// Mock connector providing deterministic primary series and paginated klines.
///
/// Source id or symbol `FAIL` forces a connector error.
pub struct MockConnector {
    klines: PagedRangeProvider<KlinePages>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// A mock whose klines are served in pages of [`KLINE_PAGE_LIMIT`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            klines: PagedRangeProvider::new(
                NAME,
                KlinePages,
                PagingConfig {
                    page_limit: KLINE_PAGE_LIMIT,
                    max_pages: 1000,
                },
            ),
        }
    }
}

impl OddslineConnector for MockConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn as_series_provider(&self) -> Option<&dyn SeriesProvider> {
        Some(self as &dyn SeriesProvider)
    }

    fn as_range_provider(&self) -> Option<&dyn RangeProvider> {
        Some(&self.klines as &dyn RangeProvider)
    }
}

#[async_trait]
impl SeriesProvider for MockConnector {
    async fn fetch_series(
        &self,
        source_id: &str,
        since: i64,
        fidelity_minutes: u32,
    ) -> Result<Vec<Sample>, OddslineError> {
        maybe_fail(source_id, "series")?;
        fixtures::markets::by_source_id(source_id, since, fidelity_minutes)
            .ok_or_else(|| OddslineError::not_found(format!("series for {source_id}")))
    }
}
