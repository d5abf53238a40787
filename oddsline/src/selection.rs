//! Selection transitions: select, deselect, and overlay switching.

use std::sync::Arc;

use oddsline_core::{OddslineError, SecondaryKind, SelectionEntry, SeriesKey, SessionView};

use crate::Session;
use crate::core::Selected;

impl Session {
    /// Select a primary series and wait for its data.
    ///
    /// Selecting a key that is already selected is a no-op returning the
    /// current view. Otherwise the entry is inserted as loading and a view
    /// with `Phase::Loading` is published before the fetch starts. On success
    /// the entry is marked loaded; on failure it is removed again, the error
    /// is recorded in the view, and returned.
    ///
    /// A fetch that completes after its key was deselected never re-adds the
    /// key. Its data stays in the store for a later reselect.
    ///
    /// The loading recompute runs alongside the primary fetch, so the fetch
    /// does not wait for an overlay fetch already in flight.
    ///
    /// # Errors
    /// Returns `FetchFailed` naming the entry's key when the fetch fails, or
    /// `InvalidArg` when the key equals the overlay's column label.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "oddsline::session",
            skip(self, entry),
            fields(key = %entry.key),
        )
    )]
    pub async fn select(&self, entry: SelectionEntry) -> Result<Arc<SessionView>, OddslineError> {
        let attempt = {
            let mut st = self.state.lock().await;
            if st.position(&entry.key).is_some() {
                return Ok(self.view());
            }
            if let Some(kind) = st
                .secondary
                .as_ref()
                .filter(|k| k.label() == entry.key.as_str())
            {
                return Err(OddslineError::InvalidArg(format!(
                    "series key '{}' collides with the overlay label of {}",
                    entry.key,
                    kind.symbol()
                )));
            }
            let attempt = st.next_attempt;
            st.next_attempt += 1;
            st.entries.push(Selected {
                entry: entry.clone(),
                attempt,
                data: self.store.get(&entry.key).await,
            });
            st.bump();
            attempt
        };

        let since = entry.since.unwrap_or(self.cfg.default_since);
        let fetch = async {
            match self.series_provider() {
                Ok(provider) => {
                    self.store
                        .request(provider, &entry, since, self.cfg.fidelity_minutes)
                        .await
                }
                Err(e) => Err(e.tag_fetch(entry.key.as_str())),
            }
        };
        let (_, result) = tokio::join!(self.recompute(), fetch);

        let still_selected = {
            let mut st = self.state.lock().await;
            let idx = st
                .position(&entry.key)
                .filter(|&i| st.entries[i].attempt == attempt);
            match (idx, &result) {
                (Some(i), Ok(data)) => {
                    st.entries[i].data = Some(Arc::clone(data));
                    st.bump();
                }
                (Some(i), Err(e)) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(target: "oddsline::session", key = %entry.key, error = %e, "selection rolled back");
                    st.entries.remove(i);
                    st.last_error = Some(e.clone());
                    st.bump();
                }
                (None, _) => {}
            }
            idx.is_some()
        };

        let view = if still_selected {
            self.recompute().await
        } else {
            self.view()
        };
        result.map(|_| view)
    }

    /// Remove a series from the selection.
    ///
    /// Returns `false` if the key was not selected. Removing the last series
    /// clears the secondary coverage.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "oddsline::session", skip(self))
    )]
    pub async fn deselect(&self, key: &SeriesKey) -> bool {
        {
            let mut st = self.state.lock().await;
            let Some(i) = st.position(key) else {
                return false;
            };
            st.entries.remove(i);
            st.bump();
        }
        self.recompute().await;
        true
    }

    /// Switch the secondary overlay, or turn it off with `None`.
    ///
    /// A different kind discards the cached coverage; the next recompute
    /// fetches the whole union span for the new kind.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the new label equals a selected key, and the
    /// secondary error when the new overlay could not be covered. The primary
    /// rows are still published without it.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "oddsline::session", skip(self))
    )]
    pub async fn set_secondary(
        &self,
        kind: Option<SecondaryKind>,
    ) -> Result<Arc<SessionView>, OddslineError> {
        {
            let mut st = self.state.lock().await;
            if st.secondary == kind {
                drop(st);
                return self.refresh().await;
            }
            if let Some(k) = kind
                .as_ref()
                .filter(|k| st.entries.iter().any(|s| s.entry.key.as_str() == k.label()))
            {
                return Err(OddslineError::InvalidArg(format!(
                    "overlay label '{}' collides with a selected series key",
                    k.label()
                )));
            }
            st.secondary = kind;
            st.bump();
        }
        let view = self.recompute().await;
        match &view.secondary_error {
            Some(e) => Err(e.clone()),
            None => Ok(view),
        }
    }

    /// Recompute against the current state, retrying any missing overlay range.
    ///
    /// # Errors
    /// Returns the secondary error when the overlay could not be covered.
    pub async fn refresh(&self) -> Result<Arc<SessionView>, OddslineError> {
        self.state.lock().await.bump();
        let view = self.recompute().await;
        match &view.secondary_error {
            Some(e) => Err(e.clone()),
            None => Ok(view),
        }
    }

    /// Forget the last selection error.
    pub async fn clear_errors(&self) -> Arc<SessionView> {
        {
            let mut st = self.state.lock().await;
            st.last_error = None;
            st.bump();
        }
        self.recompute().await
    }

    /// Keys of the selected series in selection order, including loading ones.
    pub async fn selected_keys(&self) -> Vec<SeriesKey> {
        let st = self.state.lock().await;
        st.entries.iter().map(|s| s.entry.key.clone()).collect()
    }
}
