use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the oddsline workspace.
///
/// Covers upstream fetch failures (tagged with the series key or range that
/// failed), malformed span requests, argument validation, and data issues.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OddslineError {
    /// An upstream fetch for a primary series or a secondary range failed.
    #[error("fetch failed for {target}: {msg}")]
    FetchFailed {
        /// The series key or `symbol [start, end]` range that could not be fetched.
        target: String,
        /// Human-readable error message from the upstream source.
        msg: String,
    },

    /// A requested span has `min > max`.
    #[error("invalid range: min={min} > max={max}")]
    InvalidRange {
        /// Requested lower bound (seconds).
        min: i64,
        /// Requested upper bound (seconds).
        max: i64,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the returned or expected data (non-monotonic pages, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource could not be found upstream, e.g. an unknown token id.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource.
        what: String,
    },

    /// No registered connector provides the requested capability.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label, e.g. "series" or "range".
        capability: String,
    },
}

impl OddslineError {
    /// Helper: build a `FetchFailed` error for a target and message.
    pub fn fetch_failed(target: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::FetchFailed {
            target: target.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `InvalidRange` error.
    #[must_use]
    pub const fn invalid_range(min: i64, max: i64) -> Self {
        Self::InvalidRange { min, max }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Wrap an upstream error as `FetchFailed` for `target`.
    ///
    /// An inner `FetchFailed` is retagged; its own target is folded into the message.
    #[must_use]
    pub fn tag_fetch(self, target: impl Into<String>) -> Self {
        match self {
            Self::FetchFailed { target: inner, msg } => Self::FetchFailed {
                target: target.into(),
                msg: format!("{inner}: {msg}"),
            },
            other => Self::FetchFailed {
                target: target.into(),
                msg: other.to_string(),
            },
        }
    }

    /// The series key or range named by a `FetchFailed` error.
    #[must_use]
    pub fn fetch_target(&self) -> Option<&str> {
        match self {
            Self::FetchFailed { target, .. } => Some(target),
            _ => None,
        }
    }
}
