//! Shared data model for the recommendation and feedback components.

use serde::{Deserialize, Serialize};

use crate::errors::InvalidRating;

/// A recommended song as served by the backend.
///
/// Only the fields the client renders are mapped; anything else the
/// recommender attaches to a song is ignored. The audio-feature scores are
/// passed through verbatim: the upstream producer keeps them in `[0.0, 1.0]`
/// but the client does not enforce that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<String>,
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
}

impl Song {
    /// Comma-joined artist credit for display and logging.
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

/// Stable identifier for a song within one loaded list.
///
/// The wire format carries no song ID, so the list assigns one from the
/// server-ordered position. Two songs sharing a display name stay
/// distinguishable for feedback purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SongId(pub usize);

/// One entry of a loaded recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedSong {
    pub id: SongId,
    pub song: Song,
}

/// The ordered recommendation list for one session.
///
/// Insertion order is display order is server order. A list is created whole
/// on a successful fetch and replaced whole on a re-fetch; it is never
/// mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendationList {
    entries: Vec<RecommendedSong>,
}

impl RecommendationList {
    /// Build a list from songs in server order, assigning position-based ids.
    ///
    /// Songs without artist credits are kept (the card renders an empty
    /// credit line) but counted as a data-quality warning.
    pub fn new(songs: Vec<Song>) -> Self {
        let missing_credits = songs.iter().filter(|s| s.artists.is_empty()).count();
        if missing_credits > 0 {
            log::warn!(
                "{} of {} recommended songs arrived without artist credits",
                missing_credits,
                songs.len()
            );
        }

        let entries = songs
            .into_iter()
            .enumerate()
            .map(|(index, song)| RecommendedSong {
                id: SongId(index),
                song,
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[RecommendedSong] {
        &self.entries
    }

    pub fn get(&self, id: SongId) -> Option<&Song> {
        self.entries.get(id.0).map(|entry| &entry.song)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A validated 1-5 star rating.
///
/// Serializes as the bare integer the feedback endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, InvalidRating> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidRating(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Outbound feedback body: one rating for one song.
///
/// Constructed at submission time and immutable once sent. `user_id` rides
/// along only when the session is configured with one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRecord {
    pub rating: Rating,
    pub song: Song,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(name: &str) -> Song {
        Song {
            name: name.to_string(),
            artists: vec!["Artist X".to_string()],
            danceability: 0.8,
            energy: 0.6,
            valence: 0.5,
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(0).unwrap_err(), InvalidRating(0));
        assert_eq!(Rating::new(3).unwrap().value(), 3);
    }

    #[test]
    fn test_list_assigns_ids_in_server_order() {
        let list = RecommendationList::new(vec![song("First"), song("Second"), song("First")]);

        assert_eq!(list.len(), 3);
        assert_eq!(list.entries()[0].id, SongId(0));
        assert_eq!(list.entries()[2].id, SongId(2));
        // Duplicate names keep distinct ids
        assert_eq!(list.get(SongId(0)).unwrap().name, "First");
        assert_eq!(list.get(SongId(2)).unwrap().name, "First");
        assert!(list.get(SongId(3)).is_none());
    }

    #[test]
    fn test_list_keeps_songs_without_artists() {
        let mut uncredited = song("Untitled");
        uncredited.artists.clear();

        let list = RecommendationList::new(vec![uncredited]);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(SongId(0)).unwrap().artist_line(), "");
    }

    #[test]
    fn test_song_ignores_unknown_wire_fields() {
        let song: Song = serde_json::from_str(
            r#"{"name":"Song A","artists":["Artist X"],"danceability":0.8,
                "energy":0.6,"valence":0.5,"tempo":120.0,"album":"Extras"}"#,
        )
        .unwrap();

        assert_eq!(song.name, "Song A");
        assert_eq!(song.artists, vec!["Artist X"]);
    }

    #[test]
    fn test_feedback_record_wire_shape() {
        let record = FeedbackRecord {
            rating: Rating::new(4).unwrap(),
            song: song("Song A"),
            user_id: None,
        };

        let body = serde_json::to_value(&record).unwrap();
        assert_eq!(body["rating"], 4);
        assert_eq!(body["song"]["name"], "Song A");
        assert_eq!(body["song"]["artists"][0], "Artist X");
        assert!(body.get("user_id").is_none());
    }

    #[test]
    fn test_feedback_record_carries_user_id_when_set() {
        let record = FeedbackRecord {
            rating: Rating::new(2).unwrap(),
            song: song("Song A"),
            user_id: Some("1".to_string()),
        };

        let body = serde_json::to_value(&record).unwrap();
        assert_eq!(body["user_id"], "1");
    }
}
