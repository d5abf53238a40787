//! Shared helpers for the oddsline demos.
pub mod common;
