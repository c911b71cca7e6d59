//! Client core for the SoundSage music recommendation experience.
//!
//! Two cooperating components drive a session: [`RecommendationSource`]
//! fetches the recommended-song list from the configured origin (live
//! recommender service or static snapshot) and exposes it as a load-state,
//! and [`FeedbackReporter`] ships each user rating to the feedback endpoint
//! as an independent fire-and-forget task. [`RecommendationSession`] ties
//! them together into the read-mostly surface the presentation layer
//! consumes.

pub mod config;
pub mod errors;
pub mod feedback;
pub mod models;
pub mod recommendations;
pub mod session;

pub use config::{ClientConfig, OriginConfig};
pub use errors::{FetchError, InvalidRating};
pub use feedback::{FeedbackReporter, FeedbackSink, HttpSink};
pub use models::{FeedbackRecord, Rating, RecommendationList, RecommendedSong, Song, SongId};
pub use recommendations::{
    ApiOrigin, LoadState, RecommendationOrigin, RecommendationSource, SnapshotOrigin,
};
pub use session::RecommendationSession;
