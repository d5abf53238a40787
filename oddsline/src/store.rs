//! Memoized, per-key storage of primary series.

use std::collections::HashMap;
use std::sync::Arc;

use oddsline_core::{
    OddslineError, Sample, SelectionEntry, SeriesKey, SeriesProvider, normalize_series,
};
use tokio::sync::{Mutex, OnceCell};

type Slot = Arc<OnceCell<Arc<[Sample]>>>;

/// Holds each requested primary series, fetched at most once per key.
///
/// Eviction policy: none. A series stays stored for the lifetime of the store,
/// so deselecting and reselecting a key reuses the data already held instead
/// of fetching it again.
///
/// Concurrent requests for the same key share one in-flight fetch. A failed
/// fetch leaves the key empty so that a later request retries it.
#[derive(Default)]
pub struct SeriesStore {
    slots: Mutex<HashMap<SeriesKey, Slot>>,
}

impl SeriesStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, key: &SeriesKey) -> Slot {
        let mut slots = self.slots.lock().await;
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    /// Return the series for `entry`, fetching it through `provider` on first use.
    ///
    /// The upstream output is normalized (sorted ascending, duplicate timestamps
    /// and non-finite prices removed) before it is stored.
    ///
    /// # Errors
    /// Returns `FetchFailed` naming the entry's key if the upstream fetch fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "oddsline::store",
            skip(self, provider, entry),
            fields(key = %entry.key, source_id = %entry.source_id),
        )
    )]
    pub async fn request(
        &self,
        provider: &dyn SeriesProvider,
        entry: &SelectionEntry,
        since: i64,
        fidelity_minutes: u32,
    ) -> Result<Arc<[Sample]>, OddslineError> {
        let slot = self.slot(&entry.key).await;
        slot.get_or_try_init(|| async {
            let raw = provider
                .fetch_series(&entry.source_id, since, fidelity_minutes)
                .await
                .map_err(|e| e.tag_fetch(entry.key.as_str()))?;
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "oddsline::store", samples = raw.len(), "series fetched");
            Ok::<_, OddslineError>(Arc::from(normalize_series(raw)))
        })
        .await
        .cloned()
    }

    /// The stored series for `key`, without fetching.
    pub async fn get(&self, key: &SeriesKey) -> Option<Arc<[Sample]>> {
        let slots = self.slots.lock().await;
        slots.get(key).and_then(|slot| slot.get().cloned())
    }

    /// True if a series for `key` has been fetched successfully.
    pub async fn contains(&self, key: &SeriesKey) -> bool {
        self.get(key).await.is_some()
    }

    /// Number of stored series.
    pub async fn len(&self) -> usize {
        let slots = self.slots.lock().await;
        slots.values().filter(|slot| slot.initialized()).count()
    }

    /// True if no series has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
