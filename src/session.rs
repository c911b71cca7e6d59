//! Session surface consumed by the presentation layer.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::errors::InvalidRating;
use crate::feedback::{FeedbackReporter, HttpSink};
use crate::models::{RecommendationList, SongId};
use crate::recommendations::{origin_from_config, LoadState, RecommendationSource};

/// One user-facing recommendation session.
///
/// Owns the source, the per-song rating slots, and the reporter. The
/// renderer reads the list and the slots; the only mutation it can drive is
/// [`rate`], which overwrites the local slot and fires an independent
/// submission. There is no other mutable surface.
///
/// [`rate`]: RecommendationSession::rate
pub struct RecommendationSession {
    source: RecommendationSource,
    reporter: FeedbackReporter,
    ratings: RwLock<HashMap<SongId, u8>>,
}

impl RecommendationSession {
    /// Wire a session from configuration.
    pub fn new(config: &ClientConfig) -> Self {
        let sink = HttpSink::new(config.feedback_url.clone()).with_timeout(config.request_timeout());
        let mut reporter = FeedbackReporter::new(Arc::new(sink));
        if let Some(user_id) = &config.user_id {
            reporter = reporter.with_user(user_id.clone());
        }

        Self::with_parts(
            RecommendationSource::new(origin_from_config(config)),
            reporter,
        )
    }

    /// Assemble a session from already-built parts.
    pub fn with_parts(source: RecommendationSource, reporter: FeedbackReporter) -> Self {
        Self {
            source,
            reporter,
            ratings: RwLock::new(HashMap::new()),
        }
    }

    /// Load-on-mount: run the initial fetch for this session.
    pub async fn start(&self) {
        self.source.load().await;
    }

    /// The source's lifecycle state.
    pub fn load_state(&self) -> LoadState {
        self.source.state()
    }

    /// The current list; empty while not loaded or after a failed fetch.
    pub fn recommendations(&self) -> RecommendationList {
        self.source.list()
    }

    /// Rate one song.
    ///
    /// The slot goes `Unrated → Rated(value)`; a new rating overwrites the
    /// old one without waiting for the prior submission. The submission runs
    /// detached and its outcome never flows back here, so the displayed
    /// rating stands whether or not the backend acknowledges. Ratings for
    /// ids not in the current list are logged and ignored.
    pub fn rate(&self, id: SongId, rating: u8) -> Result<(), InvalidRating> {
        let Some(song) = self.source.song(id) else {
            log::warn!("Ignoring rating for unknown song id {:?}", id);
            return Ok(());
        };

        self.reporter.submit(song.clone(), rating)?;
        self.ratings.write().insert(id, rating);
        log::info!("Rated \"{}\" by {}: {} stars", song.name, song.artist_line(), rating);

        Ok(())
    }

    /// Current slot value for one song, if rated.
    pub fn rating_of(&self, id: SongId) -> Option<u8> {
        self.ratings.read().get(&id).copied()
    }

    /// Tear this activation down for a fresh start.
    ///
    /// Slots are cleared along with the list: ids are positional, so ratings
    /// from a previous list must not attach to the next one.
    pub fn reset(&self) {
        self.source.reset();
        self.ratings.write().clear();
    }
}
