//! Point samples and series identifiers.

use core::fmt;
use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::OddslineError;

/// Column name of the derived cross-series sum in aligned rows.
pub const SUM_COLUMN: &str = "sum";

/// One observed price at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Unix timestamp in seconds.
    pub t: i64,
    /// Observed price.
    pub p: f64,
}

impl Sample {
    /// Construct a sample from a timestamp and a price.
    #[must_use]
    pub const fn new(t: i64, p: f64) -> Self {
        Self { t, p }
    }
}

impl From<(i64, f64)> for Sample {
    fn from((t, p): (i64, f64)) -> Self {
        Self { t, p }
    }
}

/// Opaque identifier of one primary series instance (e.g. a market and outcome side).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeriesKey(String);

impl SeriesKey {
    /// Build a key from a non-empty string.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the key is empty (after trimming) or equals the
    /// reserved [`SUM_COLUMN`] name.
    pub fn new(key: impl Into<String>) -> Result<Self, OddslineError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(OddslineError::InvalidArg("series key is empty".into()));
        }
        if key == SUM_COLUMN {
            return Err(OddslineError::InvalidArg(format!(
                "series key '{SUM_COLUMN}' is reserved"
            )));
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SeriesKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SeriesKey {
    type Error = OddslineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SeriesKey> for String {
    fn from(k: SeriesKey) -> Self {
        k.0
    }
}

/// Identifies the secondary (cryptocurrency) series used as an overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecondaryKind {
    symbol: String,
    label: String,
}

impl SecondaryKind {
    /// Build a kind for an upstream symbol such as `BTCUSDT`; the row label defaults to the symbol.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the symbol is empty.
    pub fn new(symbol: impl Into<String>) -> Result<Self, OddslineError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(OddslineError::InvalidArg("secondary symbol is empty".into()));
        }
        Ok(Self {
            label: symbol.clone(),
            symbol,
        })
    }

    /// Override the column label used in aligned rows (e.g. `BTC`).
    ///
    /// # Errors
    /// Returns `InvalidArg` if the label is empty or equals [`SUM_COLUMN`].
    pub fn with_label(mut self, label: impl Into<String>) -> Result<Self, OddslineError> {
        let label = label.into();
        if label.trim().is_empty() || label == SUM_COLUMN {
            return Err(OddslineError::InvalidArg(format!(
                "invalid secondary label '{label}'"
            )));
        }
        self.label = label;
        Ok(self)
    }

    /// Upstream symbol passed to the range fetch.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Column label in aligned rows.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for SecondaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}
