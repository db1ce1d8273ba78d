//! Small helpers shared across layers.
//!
//! - [`ordered_set`] - Insertion-ordered deduplication
//! - [`query`] - Search query normalization

pub mod ordered_set;
pub mod query;

pub use ordered_set::OrderedSet;
pub use query::normalize_query;
