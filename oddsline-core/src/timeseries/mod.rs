/// Nearest-neighbour lookup and row alignment across series.
pub mod align;
/// Delta planning against a covered interval.
pub mod coverage;
/// Sorting, deduplication, and first-wins merging of sample lists.
pub mod merge;
/// Span helpers and series invariants.
pub mod util;
