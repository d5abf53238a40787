use std::sync::Arc;

use oddsline_core::{
    OddslineConfig, OddslineConnector, OddslineError, Phase, RangeProvider, Sample,
    SecondaryKind, SecondaryOverlay, SelectedSeries, SelectionEntry, SeriesKey, SeriesProvider,
    SessionView, build_rows, union_span,
};
use tokio::sync::{Mutex, watch};

use crate::range_cache::RangeCache;
use crate::store::SeriesStore;

/// A selected primary series with the attempt that inserted it.
pub(crate) struct Selected {
    pub(crate) entry: SelectionEntry,
    pub(crate) attempt: u64,
    pub(crate) data: Option<Arc<[Sample]>>,
}

/// Mutable selection state; only the session mutates it.
#[derive(Default)]
pub(crate) struct SelectionState {
    pub(crate) entries: Vec<Selected>,
    pub(crate) secondary: Option<SecondaryKind>,
    pub(crate) last_error: Option<OddslineError>,
    pub(crate) next_attempt: u64,
    pub(crate) generation: u64,
}

impl SelectionState {
    pub(crate) fn position(&self, key: &SeriesKey) -> Option<usize> {
        self.entries.iter().position(|s| &s.entry.key == key)
    }

    pub(crate) const fn bump(&mut self) {
        self.generation += 1;
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            generation: self.generation,
            entries: self
                .entries
                .iter()
                .map(|s| (s.entry.clone(), s.data.clone()))
                .collect(),
            secondary: self.secondary.clone(),
            last_error: self.last_error.clone(),
        }
    }
}

/// Value copy of the selection state taken for one recompute.
struct Snapshot {
    generation: u64,
    entries: Vec<(SelectionEntry, Option<Arc<[Sample]>>)>,
    secondary: Option<SecondaryKind>,
    last_error: Option<OddslineError>,
}

impl Snapshot {
    fn loaded(&self) -> impl Iterator<Item = (&SeriesKey, &[Sample])> {
        self.entries
            .iter()
            .filter_map(|(e, data)| data.as_deref().map(|d| (&e.key, d)))
    }

    fn phase(&self) -> Phase {
        if self.entries.is_empty() {
            return Phase::Idle;
        }
        let loading: Vec<SeriesKey> = self
            .entries
            .iter()
            .filter(|(_, data)| data.is_none())
            .map(|(e, _)| e.key.clone())
            .collect();
        if loading.is_empty() {
            Phase::Ready
        } else {
            Phase::Loading(loading)
        }
    }
}

/// Session that tracks selected prediction-market series, keeps the crypto
/// overlay covered, and publishes aligned rows.
pub struct Session {
    pub(crate) series_connector: Arc<dyn OddslineConnector>,
    pub(crate) range_connector: Option<Arc<dyn OddslineConnector>>,
    pub(crate) cfg: OddslineConfig,
    pub(crate) store: SeriesStore,
    pub(crate) state: Mutex<SelectionState>,
    pub(crate) cache: Mutex<RangeCache>,
    pub(crate) view_tx: watch::Sender<Arc<SessionView>>,
}

/// Builder for constructing a `Session` with custom configuration.
pub struct SessionBuilder {
    connectors: Vec<Arc<dyn OddslineConnector>>,
    cfg: OddslineConfig,
    secondary: Option<SecondaryKind>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder {
    /// Create a new builder with default tolerances (270s primary, 120s
    /// secondary), 10 minute fidelity, and no connectors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: OddslineConfig::default(),
            secondary: None,
        }
    }

    /// Register a connector.
    ///
    /// The first registered connector advertising a series provider serves
    /// primary series; the first advertising a range provider serves the
    /// secondary overlay. One connector may serve both.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn OddslineConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub const fn config(mut self, cfg: OddslineConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Nearest-match tolerance for primary series, in seconds.
    #[must_use]
    pub const fn primary_tolerance_secs(mut self, secs: i64) -> Self {
        self.cfg.align.primary_tolerance_secs = secs;
        self
    }

    /// Nearest-match tolerance for the secondary series, in seconds.
    #[must_use]
    pub const fn secondary_tolerance_secs(mut self, secs: i64) -> Self {
        self.cfg.align.secondary_tolerance_secs = secs;
        self
    }

    /// Sampling interval requested from the primary source.
    #[must_use]
    pub const fn fidelity_minutes(mut self, minutes: u32) -> Self {
        self.cfg.fidelity_minutes = minutes;
        self
    }

    /// Fetch lower bound for entries that do not carry their own.
    #[must_use]
    pub const fn default_since(mut self, since: i64) -> Self {
        self.cfg.default_since = since;
        self
    }

    /// Start with a secondary overlay already active.
    #[must_use]
    pub fn secondary(mut self, kind: SecondaryKind) -> Self {
        self.secondary = Some(kind);
        self
    }

    /// Build the `Session`.
    ///
    /// # Errors
    /// - `Unsupported` if no connector provides primary series.
    /// - `InvalidArg` for a negative tolerance or a zero fidelity.
    pub fn build(self) -> Result<Session, OddslineError> {
        let align = self.cfg.align;
        if align.primary_tolerance_secs < 0 || align.secondary_tolerance_secs < 0 {
            return Err(OddslineError::InvalidArg(
                "tolerances must be non-negative".into(),
            ));
        }
        if self.cfg.fidelity_minutes == 0 {
            return Err(OddslineError::InvalidArg(
                "fidelity_minutes must be > 0".into(),
            ));
        }
        let series_connector = self
            .connectors
            .iter()
            .find(|c| c.as_series_provider().is_some())
            .cloned()
            .ok_or_else(|| OddslineError::unsupported("series"))?;
        let range_connector = self
            .connectors
            .iter()
            .find(|c| c.as_range_provider().is_some())
            .cloned();

        let state = SelectionState {
            secondary: self.secondary,
            ..SelectionState::default()
        };
        let (view_tx, _) = watch::channel(Arc::new(SessionView {
            secondary: state.secondary.clone(),
            ..SessionView::default()
        }));
        Ok(Session {
            series_connector,
            range_connector,
            cfg: self.cfg,
            store: SeriesStore::new(),
            state: Mutex::new(state),
            cache: Mutex::new(RangeCache::new()),
            view_tx,
        })
    }
}

impl Session {
    /// Start building a new `Session`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use oddsline::{Session, SecondaryKind};
    ///
    /// let session = Session::builder()
    ///     .with_connector(Arc::new(ClobConnector::new()))
    ///     .with_connector(Arc::new(KlinesConnector::new()))
    ///     .secondary(SecondaryKind::new("BTCUSDT")?.with_label("BTC")?)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &OddslineConfig {
        &self.cfg
    }

    /// The primary-series store.
    #[must_use]
    pub const fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// Latest published view.
    #[must_use]
    pub fn view(&self) -> Arc<SessionView> {
        self.view_tx.borrow().clone()
    }

    /// Subscribe to published views.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionView>> {
        self.view_tx.subscribe()
    }

    /// Covered interval of the secondary range cache.
    pub async fn coverage(&self) -> Option<(i64, i64)> {
        self.cache.lock().await.covered()
    }

    pub(crate) fn series_provider(&self) -> Result<&dyn SeriesProvider, OddslineError> {
        self.series_connector
            .as_series_provider()
            .ok_or_else(|| OddslineError::unsupported("series"))
    }

    pub(crate) fn range_provider(&self) -> Result<&dyn RangeProvider, OddslineError> {
        self.range_connector
            .as_deref()
            .and_then(|c| c.as_range_provider())
            .ok_or_else(|| OddslineError::unsupported("range"))
    }

    /// Rebuild rows from the current state and publish the resulting view.
    ///
    /// Runs under the range cache lock: the selection snapshot, the coverage
    /// update, and the row rebuild form one step, so a rebuild never observes
    /// a cache or selection mid-mutation.
    ///
    /// Recomputes therefore queue behind one another: while an overlay fetch
    /// is in flight, every other publication waits for it. Primary fetches in
    /// `select` run outside this lock.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "oddsline::session", skip(self))
    )]
    pub(crate) async fn recompute(&self) -> Arc<SessionView> {
        let mut cache = self.cache.lock().await;
        let snap = self.state.lock().await.snapshot();

        let span = union_span(snap.loaded().map(|(_, s)| s));
        let mut secondary_error = None;
        let overlay: Option<(SecondaryKind, Arc<[Sample]>)> = match (&snap.secondary, span) {
            (Some(kind), Some((lo, hi))) => {
                let covered = match self.range_provider() {
                    Ok(provider) => cache.ensure_covered(provider, kind, lo, hi).await,
                    Err(e) => Err(e),
                };
                match covered {
                    Ok(_) => Some((kind.clone(), cache.series())),
                    Err(e) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(target: "oddsline::session", symbol = %kind.symbol(), error = %e, "secondary overlay unavailable");
                        secondary_error = Some(e);
                        None
                    }
                }
            }
            _ => {
                cache.reset();
                None
            }
        };

        let rows = build_rows(
            snap.loaded(),
            overlay.as_ref().map(|(kind, series)| SecondaryOverlay {
                label: kind.label(),
                series: &series[..],
            }),
            &self.cfg.align,
        );

        let view = Arc::new(SessionView {
            generation: snap.generation,
            rows,
            selected: snap
                .entries
                .iter()
                .map(|(entry, data)| SelectedSeries {
                    entry: entry.clone(),
                    loading: data.is_none(),
                })
                .collect(),
            phase: snap.phase(),
            secondary: snap.secondary.clone(),
            coverage: cache.covered(),
            last_error: snap.last_error.clone(),
            secondary_error,
        });
        drop(cache);

        self.view_tx.send_if_modified(|current| {
            if view.generation >= current.generation {
                *current = Arc::clone(&view);
                true
            } else {
                false
            }
        });
        view
    }
}
