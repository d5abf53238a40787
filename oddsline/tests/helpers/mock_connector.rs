#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use oddsline::{OddslineConnector, OddslineError, RangeProvider, Sample, SeriesProvider};
use tokio::sync::Notify;
use tokio::time::{Duration, sleep};

type SeriesFn = Arc<dyn Fn(&str, i64, u32) -> Result<Vec<Sample>, OddslineError> + Send + Sync>;
type RangeFn = Arc<dyn Fn(&str, i64, i64) -> Result<Vec<Sample>, OddslineError> + Send + Sync>;

/// Simple in-memory connector used by integration tests.
///
/// Roles are advertised only when a behavior for them was configured. Every
/// call is recorded before the behavior runs.
pub struct MockConnector {
    pub name: &'static str,
    pub delay: Duration,
    pub series_fn: Option<SeriesFn>,
    pub range_fn: Option<RangeFn>,
    // Source ids whose fetch waits for a notification before answering.
    pub series_gates: HashMap<String, Arc<Notify>>,
    // Range starts that notify a gate when called, and starts that wait on one.
    pub range_signals: HashMap<i64, Arc<Notify>>,
    pub range_gates: HashMap<i64, Arc<Notify>>,
    series_calls: Mutex<Vec<(String, i64, u32)>>,
    range_calls: Mutex<Vec<(String, i64, i64)>>,
}

impl MockConnector {
    pub fn builder() -> MockConnectorBuilder {
        MockConnectorBuilder::new()
    }

    /// Every `fetch_series` call as `(source_id, since, fidelity_minutes)`.
    pub fn series_calls(&self) -> Vec<(String, i64, u32)> {
        self.series_calls.lock().unwrap().clone()
    }

    /// Number of `fetch_series` calls for one source id.
    pub fn series_calls_for(&self, source_id: &str) -> usize {
        self.series_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _, _)| id == source_id)
            .count()
    }

    /// Every `fetch_range` call as `(symbol, start, end)`.
    pub fn range_calls(&self) -> Vec<(String, i64, i64)> {
        self.range_calls.lock().unwrap().clone()
    }

    /// `(start, end)` of every `fetch_range` call, sorted.
    pub fn range_spans(&self) -> Vec<(i64, i64)> {
        let mut spans: Vec<(i64, i64)> = self
            .range_calls()
            .into_iter()
            .map(|(_, start, end)| (start, end))
            .collect();
        spans.sort_unstable();
        spans
    }

    pub fn clear_calls(&self) {
        self.series_calls.lock().unwrap().clear();
        self.range_calls.lock().unwrap().clear();
    }
}

impl OddslineConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_series_provider(&self) -> Option<&dyn SeriesProvider> {
        self.series_fn
            .as_ref()
            .map(|_| self as &dyn SeriesProvider)
    }

    fn as_range_provider(&self) -> Option<&dyn RangeProvider> {
        self.range_fn.as_ref().map(|_| self as &dyn RangeProvider)
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
        self.series_calls
            .lock()
            .unwrap()
            .push((source_id.to_string(), since, fidelity_minutes));
        if let Some(gate) = self.series_gates.get(source_id) {
            gate.notified().await;
        }
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        match &self.series_fn {
            Some(f) => f(source_id, since, fidelity_minutes),
            None => Err(OddslineError::unsupported("series")),
        }
    }
}

#[async_trait]
impl RangeProvider for MockConnector {
    async fn fetch_range(
        &self,
        symbol: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Sample>, OddslineError> {
        self.range_calls
            .lock()
            .unwrap()
            .push((symbol.to_string(), start, end));
        if let Some(signal) = self.range_signals.get(&start) {
            signal.notify_one();
        }
        if let Some(gate) = self.range_gates.get(&start) {
            gate.notified().await;
        }
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        match &self.range_fn {
            Some(f) => f(symbol, start, end),
            None => Err(OddslineError::unsupported("range")),
        }
    }
}

pub struct MockConnectorBuilder {
    name: &'static str,
    delay: Duration,
    series_fn: Option<SeriesFn>,
    range_fn: Option<RangeFn>,
    series_gates: HashMap<String, Arc<Notify>>,
    range_signals: HashMap<i64, Arc<Notify>>,
    range_gates: HashMap<i64, Arc<Notify>>,
}

impl MockConnectorBuilder {
    pub fn new() -> Self {
        Self {
            name: "mock",
            delay: Duration::ZERO,
            series_fn: None,
            range_fn: None,
            series_gates: HashMap::new(),
            range_signals: HashMap::new(),
            range_gates: HashMap::new(),
        }
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn delay(mut self, d: Duration) -> Self {
        self.delay = d;
        self
    }

    pub fn with_series_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, i64, u32) -> Result<Vec<Sample>, OddslineError> + Send + Sync + 'static,
    {
        self.series_fn = Some(Arc::new(f));
        self
    }

    /// Serve fixed series by source id; unknown ids fail with `NotFound`.
    pub fn returns_series(self, table: &[(&str, Vec<Sample>)]) -> Self {
        let table: HashMap<String, Vec<Sample>> = table
            .iter()
            .map(|(id, series)| ((*id).to_string(), series.clone()))
            .collect();
        self.with_series_fn(move |id, _, _| {
            table
                .get(id)
                .cloned()
                .ok_or_else(|| OddslineError::not_found(format!("series {id}")))
        })
    }

    pub fn with_range_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, i64, i64) -> Result<Vec<Sample>, OddslineError> + Send + Sync + 'static,
    {
        self.range_fn = Some(Arc::new(f));
        self
    }

    /// Serve one full series for every symbol, clipped to each requested span.
    pub fn returns_range(self, full: Vec<Sample>) -> Self {
        self.with_range_fn(move |_, start, end| {
            Ok(full
                .iter()
                .copied()
                .filter(|s| s.t >= start && s.t <= end)
                .collect())
        })
    }

    /// Serve a dense grid `start..=end` with `step` spacing and price `t / 1000`.
    pub fn returns_grid_range(self, step: i64) -> Self {
        self.with_range_fn(move |_, start, end| {
            let first = start.div_euclid(step) * step;
            let first = if first < start { first + step } else { first };
            Ok((first..=end)
                .step_by(step as usize)
                .map(|t| Sample::new(t, t as f64 / 1000.0))
                .collect())
        })
    }

    /// Hold `fetch_series` for `source_id` until `gate` is notified.
    pub fn gate_series(mut self, source_id: &str, gate: Arc<Notify>) -> Self {
        self.series_gates.insert(source_id.to_string(), gate);
        self
    }

    /// Hold `fetch_range` calls starting at `start` until `gate` is notified.
    pub fn gate_range(mut self, start: i64, gate: Arc<Notify>) -> Self {
        self.range_gates.insert(start, gate);
        self
    }

    /// Notify `signal` as soon as a `fetch_range` call starting at `start` arrives.
    pub fn signal_range(mut self, start: i64, signal: Arc<Notify>) -> Self {
        self.range_signals.insert(start, signal);
        self
    }

    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(MockConnector {
            name: self.name,
            delay: self.delay,
            series_fn: self.series_fn,
            range_fn: self.range_fn,
            series_gates: self.series_gates,
            range_signals: self.range_signals,
            range_gates: self.range_gates,
            series_calls: Mutex::new(Vec::new()),
            range_calls: Mutex::new(Vec::new()),
        })
    }
}
