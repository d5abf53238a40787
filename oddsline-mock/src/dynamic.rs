use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use oddsline_core::connector::{OddslineConnector, RangeProvider, SeriesProvider};
use oddsline_core::{OddslineError, Sample};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(OddslineError),
    /// Hang indefinitely (simulate a stalled upstream).
    Hang,
}

#[derive(Default)]
struct InternalState {
    series_rules: HashMap<String, MockBehavior<Vec<Sample>>>,
    range_rules: HashMap<String, MockBehavior<Vec<Sample>>>,
    series_requests: Vec<(String, i64, u32)>,
    range_requests: Vec<(String, i64, i64)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `fetch_series` calls for a source id.
    pub async fn set_series_behavior(
        &self,
        source_id: impl Into<String>,
        behavior: MockBehavior<Vec<Sample>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.series_rules.insert(source_id.into(), behavior);
    }

    /// Set the behavior for `fetch_range` calls for a symbol.
    ///
    /// Returned samples are clipped to the requested span, so one full series
    /// can back every delta request.
    pub async fn set_range_behavior(
        &self,
        symbol: impl Into<String>,
        behavior: MockBehavior<Vec<Sample>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.range_rules.insert(symbol.into(), behavior);
    }

    /// Every `fetch_series` call received, as `(source_id, since, fidelity_minutes)`.
    pub async fn series_requests(&self) -> Vec<(String, i64, u32)> {
        self.state.lock().await.series_requests.clone()
    }

    /// Every `fetch_range` call received, as `(symbol, start, end)`.
    pub async fn range_requests(&self) -> Vec<(String, i64, i64)> {
        self.state.lock().await.range_requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.series_rules.clear();
        guard.range_rules.clear();
        guard.series_requests.clear();
        guard.range_requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn OddslineConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn OddslineConnector>, controller)
    }
}

impl OddslineConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_series_provider(&self) -> Option<&dyn SeriesProvider> {
        Some(self as &dyn SeriesProvider)
    }

    fn as_range_provider(&self) -> Option<&dyn RangeProvider> {
        Some(self as &dyn RangeProvider)
    }
}

async fn resolve(
    behavior: Option<MockBehavior<Vec<Sample>>>,
    capability: &str,
) -> Result<Vec<Sample>, OddslineError> {
    match behavior {
        Some(MockBehavior::Return(samples)) => Ok(samples),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => {
            std::future::pending::<()>().await;
            unreachable!()
        }
        None => Err(OddslineError::unsupported(capability)),
    }
}

#[async_trait]
impl SeriesProvider for DynamicMockConnector {
    async fn fetch_series(
        &self,
        source_id: &str,
        since: i64,
        fidelity_minutes: u32,
    ) -> Result<Vec<Sample>, OddslineError> {
        // Log and snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard
                .series_requests
                .push((source_id.to_string(), since, fidelity_minutes));
            guard.series_rules.get(source_id).cloned()
        };
        resolve(behavior, "series").await
    }
}

#[async_trait]
impl RangeProvider for DynamicMockConnector {
    async fn fetch_range(
        &self,
        symbol: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Sample>, OddslineError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.range_requests.push((symbol.to_string(), start, end));
            guard.range_rules.get(symbol).cloned()
        };
        let mut samples = resolve(behavior, "range").await?;
        samples.retain(|s| s.t >= start && s.t <= end);
        Ok(samples)
    }
}
