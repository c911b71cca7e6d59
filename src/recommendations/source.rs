//! Load-state machine for the recommendation list.
//!
//! The source fetches once per activation and exposes the result as a
//! load-state the presentation layer reads. Fetch failures are absorbed
//! here: consumers see an empty list, the failure goes to the log, and
//! nothing propagates past the component boundary.

use parking_lot::RwLock;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::FetchError;
use crate::models::{RecommendationList, Song, SongId};
use crate::recommendations::origin::RecommendationOrigin;

/// Lifecycle of the recommendation fetch.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(RecommendationList),
    Failed(FetchError),
}

impl LoadState {
    /// Terminal states stay put until the source is reset.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Loaded(_) | LoadState::Failed(_))
    }
}

/// Fetches the recommendation list from one configured origin.
///
/// Owns the list exclusively; consumers get clones and cannot mutate it.
pub struct RecommendationSource {
    origin: Arc<dyn RecommendationOrigin>,
    state: RwLock<LoadState>,
    /// Held across the fetch await so a second `load()` is a no-op.
    fetch_guard: Mutex<()>,
    /// Bumped by `reset()`; completions from an older activation check it
    /// and discard themselves instead of writing stale state.
    epoch: AtomicU64,
}

impl RecommendationSource {
    pub fn new(origin: Arc<dyn RecommendationOrigin>) -> Self {
        Self {
            origin,
            state: RwLock::new(LoadState::Idle),
            fetch_guard: Mutex::new(()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Run the fetch for this activation.
    ///
    /// At most one request is in flight at a time: calling this while a
    /// fetch is running returns immediately without issuing a second one.
    /// There is no automatic retry; after `Failed`, call [`reset`] and load
    /// again.
    ///
    /// [`reset`]: RecommendationSource::reset
    pub async fn load(&self) {
        let Ok(_guard) = self.fetch_guard.try_lock() else {
            log::debug!("Recommendation fetch already in flight, ignoring load()");
            return;
        };

        *self.state.write() = LoadState::Loading;
        let epoch = self.epoch.load(Ordering::Acquire);

        log::info!(
            "Fetching recommendations from origin '{}'",
            self.origin.id()
        );

        let outcome = match self.origin.fetch().await {
            Ok(payload) => extract_songs(payload).map(RecommendationList::new),
            Err(e) => Err(e),
        };

        if self.epoch.load(Ordering::Acquire) != epoch {
            log::debug!("Discarding fetch result from a previous activation");
            return;
        }

        match outcome {
            Ok(list) => {
                log::info!("Loaded {} recommended songs", list.len());
                *self.state.write() = LoadState::Loaded(list);
            }
            Err(e) => {
                log::error!("Recommendation fetch failed: {}", e);
                *self.state.write() = LoadState::Failed(e);
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoadState {
        self.state.read().clone()
    }

    /// The loaded list, or an empty one when nothing is loaded.
    ///
    /// The display layer renders from this without caring whether the fetch
    /// failed; failures surface only in `state()` and the log.
    pub fn list(&self) -> RecommendationList {
        match &*self.state.read() {
            LoadState::Loaded(list) => list.clone(),
            _ => RecommendationList::default(),
        }
    }

    /// Look up one song in the loaded list.
    pub fn song(&self, id: SongId) -> Option<Song> {
        match &*self.state.read() {
            LoadState::Loaded(list) => list.get(id).cloned(),
            _ => None,
        }
    }

    /// Return to `Idle` for a fresh activation.
    ///
    /// A fetch still in flight is orphaned: its completion sees the epoch
    /// change and discards its result.
    pub fn reset(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        *self.state.write() = LoadState::Idle;
    }
}

/// Pull the song array out of either accepted payload shape.
///
/// The live service wraps the list (`{"recommendations": [...]}`), the
/// static snapshot serves a bare array; both normalize to the same songs.
fn extract_songs(payload: Value) -> Result<Vec<Song>, FetchError> {
    let items = if let Some(field) = payload.get("recommendations") {
        field
            .as_array()
            .cloned()
            .ok_or_else(|| FetchError::Shape("'recommendations' field is not an array".to_string()))?
    } else if let Some(array) = payload.as_array() {
        array.clone()
    } else {
        return Err(FetchError::Shape(
            "payload has neither a 'recommendations' field nor an array shape".to_string(),
        ));
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).map_err(|e| FetchError::Shape(format!("song entry: {}", e)))
        })
        .collect()
}
