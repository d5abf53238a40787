use std::sync::Arc;

use async_trait::async_trait;
use oddsline::{OddslineConnector, OddslineError, Sample, Session};
use oddsline_core::connector::SeriesProvider;
use oddsline_core::{PageProvider, PagedRangeProvider, PagingConfig};
use oddsline_demos::common::{btc, print_rows, side};

/// A hand-written primary source serving one flat series.
struct FlatMarket;

impl OddslineConnector for FlatMarket {
    fn name(&self) -> &'static str {
        "flat-market"
    }

    fn as_series_provider(&self) -> Option<&dyn SeriesProvider> {
        Some(self as &dyn SeriesProvider)
    }
}

#[async_trait]
impl SeriesProvider for FlatMarket {
    async fn fetch_series(
        &self,
        source_id: &str,
        since: i64,
        fidelity_minutes: u32,
    ) -> Result<Vec<Sample>, OddslineError> {
        println!("-> FlatMarket serving {source_id} from {since}");
        let step = i64::from(fidelity_minutes) * 60;
        Ok((0..12).map(|i| Sample::new(since + i * step, 0.5)).collect())
    }
}

/// An exchange-like upstream that returns at most `limit` candles per call.
struct TinyPages;

#[async_trait]
impl PageProvider for TinyPages {
    async fn fetch_page(
        &self,
        symbol: &str,
        start: i64,
        end: i64,
        limit: usize,
    ) -> Result<Vec<Sample>, OddslineError> {
        println!("-> TinyPages {symbol} [{start}, {end}] limit {limit}");
        let first = (start + 299).div_euclid(300) * 300;
        Ok((0..)
            .map(|i| first + i * 300)
            .take_while(|t| *t <= end)
            .take(limit)
            .map(|t| Sample::new(t, 60_000.0 + (t % 3_600) as f64))
            .collect())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let klines = PagedRangeProvider::new(
        "tiny-pages",
        TinyPages,
        PagingConfig {
            page_limit: 8,
            ..PagingConfig::default()
        },
    );

    let session = Session::builder()
        .with_connector(Arc::new(FlatMarket))
        .with_connector(Arc::new(klines))
        .secondary(btc()?)
        .fidelity_minutes(10)
        .default_since(1_730_764_800)
        .build()?;

    let view = session.select(side("flat", "Flat market", "flat-1")?).await?;
    print_rows(&view, 24);
    Ok(())
}
