//! Configuration types shared across the session and connectors.

use serde::{Deserialize, Serialize};

/// Default nearest-match tolerance for primary (market) series, in seconds.
pub const DEFAULT_PRIMARY_TOLERANCE_SECS: i64 = 270;
/// Default nearest-match tolerance for the secondary (crypto) series, in seconds.
pub const DEFAULT_SECONDARY_TOLERANCE_SECS: i64 = 120;
/// Default sampling interval requested from the primary source, in minutes.
pub const DEFAULT_FIDELITY_MINUTES: u32 = 10;

/// Alignment tolerances used when building rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Maximum `|t - target|` for a primary sample to count as present.
    pub primary_tolerance_secs: i64,
    /// Maximum `|t - target|` for a secondary sample to count as present.
    ///
    /// Tighter than the primary tolerance because candles are denser.
    pub secondary_tolerance_secs: i64,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            primary_tolerance_secs: DEFAULT_PRIMARY_TOLERANCE_SECS,
            secondary_tolerance_secs: DEFAULT_SECONDARY_TOLERANCE_SECS,
        }
    }
}

/// Global configuration for an oddsline `Session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddslineConfig {
    /// Alignment tolerances.
    pub align: AlignConfig,
    /// Sampling interval requested from the primary-series source.
    pub fidelity_minutes: u32,
    /// Fetch lower bound used when a selection entry does not carry one.
    pub default_since: i64,
}

impl Default for OddslineConfig {
    fn default() -> Self {
        Self {
            align: AlignConfig::default(),
            fidelity_minutes: DEFAULT_FIDELITY_MINUTES,
            default_since: 0,
        }
    }
}

/// Limits for assembling a range from an upstream that serves bounded pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Maximum samples returned by one upstream page.
    pub page_limit: usize,
    /// Upper bound on pages walked for one range before giving up.
    pub max_pages: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_limit: 1000,
            max_pages: 1000,
        }
    }
}
