//! Fire-and-forget submission of song ratings.
//!
//! Ratings are best-effort telemetry, not durable state: each submission is
//! a detached task whose outcome is logged and otherwise dropped, so a slow
//! or failing delivery for one song never blocks another and a backend
//! failure never reverts what the user sees.

use std::sync::Arc;

use crate::errors::InvalidRating;
use crate::feedback::sink::FeedbackSink;
use crate::models::{FeedbackRecord, Rating, Song};

/// Submits one rating for one song, independently of all other submissions.
pub struct FeedbackReporter {
    sink: Arc<dyn FeedbackSink>,
    user_id: Option<String>,
}

impl FeedbackReporter {
    pub fn new(sink: Arc<dyn FeedbackSink>) -> Self {
        Self {
            sink,
            user_id: None,
        }
    }

    /// Embed a user identifier in every outbound record.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Validate and ship one rating.
    ///
    /// Out-of-range values are rejected synchronously, before any network
    /// activity. A valid rating returns immediately while the delivery runs
    /// detached; submissions never wait on each other and a re-rating simply
    /// issues a new one. Must be called from within the async runtime.
    pub fn submit(&self, song: Song, rating: u8) -> Result<(), InvalidRating> {
        let rating = Rating::new(rating)?;

        let record = FeedbackRecord {
            rating,
            song,
            user_id: self.user_id.clone(),
        };
        let sink = Arc::clone(&self.sink);

        tokio::spawn(async move {
            match sink.deliver(&record).await {
                Ok(()) => log::debug!(
                    "Feedback acknowledged for \"{}\" ({} stars)",
                    record.song.name,
                    record.rating.value()
                ),
                Err(e) => log::warn!(
                    "Feedback delivery failed for \"{}\" by {}: {}",
                    record.song.name,
                    record.song.artist_line(),
                    e
                ),
            }
        });

        Ok(())
    }
}
