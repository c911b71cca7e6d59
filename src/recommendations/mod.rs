//! Recommendation retrieval.
//!
//! Fetches the recommended-song list from the configured origin (live
//! service or static snapshot) and exposes it as a load-state for the
//! presentation layer.

pub mod origin;
pub mod source;

pub use origin::{origin_from_config, ApiOrigin, RecommendationOrigin, SnapshotOrigin};
pub use source::{LoadState, RecommendationSource};
