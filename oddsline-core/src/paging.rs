use async_trait::async_trait;

use crate::connector::{OddslineConnector, RangeProvider};
use crate::timeseries::merge::normalize_series;
use crate::timeseries::util::ensure_range;
use crate::{OddslineError, PagingConfig, Sample};

/// Upstream that returns at most `limit` samples per call, starting at `start`.
#[async_trait]
pub trait PageProvider: Send + Sync {
    /// Fetch up to `limit` samples for `symbol` with `start <= t <= end`, ascending.
    async fn fetch_page(
        &self,
        symbol: &str,
        start: i64,
        end: i64,
        limit: usize,
    ) -> Result<Vec<Sample>, OddslineError>;
}

/// Adapter that serves whole ranges by walking a [`PageProvider`].
///
/// Each page starts one second after the last timestamp of the previous page.
/// The walk stops on a short page, an empty page, or once the end of the span
/// is reached.
pub struct PagedRangeProvider<P> {
    name: &'static str,
    inner: P,
    cfg: PagingConfig,
}

impl<P: PageProvider> PagedRangeProvider<P> {
    /// Wrap a page provider under a connector name.
    pub const fn new(name: &'static str, inner: P, cfg: PagingConfig) -> Self {
        Self { name, inner, cfg }
    }

    /// The wrapped page provider.
    pub const fn inner(&self) -> &P {
        &self.inner
    }

    /// Paging limits in effect.
    pub const fn config(&self) -> PagingConfig {
        self.cfg
    }
}

#[async_trait]
impl<P: PageProvider> RangeProvider for PagedRangeProvider<P> {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "oddsline::paging",
            skip(self),
            fields(connector = self.name, page_limit = self.cfg.page_limit),
        )
    )]
    async fn fetch_range(
        &self,
        symbol: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Sample>, OddslineError> {
        ensure_range(start, end)?;
        let limit = self.cfg.page_limit;
        if limit == 0 {
            return Err(OddslineError::InvalidArg("page_limit must be > 0".into()));
        }

        let mut out: Vec<Sample> = Vec::new();
        let mut cursor = start;
        for _page in 0..self.cfg.max_pages {
            let page = self.inner.fetch_page(symbol, cursor, end, limit).await?;
            let len = page.len();
            let Some(last) = page.iter().map(|s| s.t).max() else {
                return Ok(normalize_series(out));
            };
            if last < cursor {
                return Err(OddslineError::Data(format!(
                    "page for {symbol} ended at {last}, before cursor {cursor}"
                )));
            }
            out.extend(page.into_iter().filter(|s| s.t >= start && s.t <= end));
            if len < limit || last >= end {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "oddsline::paging", pages = _page + 1, samples = out.len(), "range assembled");
                return Ok(normalize_series(out));
            }
            cursor = last + 1;
        }
        Err(OddslineError::Data(format!(
            "range {symbol} [{start}, {end}] exceeded {} pages",
            self.cfg.max_pages
        )))
    }
}

impl<P: PageProvider> OddslineConnector for PagedRangeProvider<P> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_range_provider(&self) -> Option<&dyn RangeProvider> {
        Some(self as &dyn RangeProvider)
    }
}
