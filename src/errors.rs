use serde::Serialize;
use thiserror::Error;

/// Failures while talking to the recommendation or feedback endpoints.
///
/// These never cross the component boundary as panics or bubbled errors:
/// the source converts them into its `Failed` state and the reporter logs
/// and drops them.
#[derive(Debug, Clone, Error, Serialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum FetchError {
    /// Network-level failure before any HTTP status was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success HTTP status
    #[error("Endpoint returned status {status}")]
    Protocol { status: u16 },

    /// Payload was malformed or missing the expected recommendation shape
    #[error("Malformed payload: {0}")]
    Shape(String),

    /// Static snapshot file could not be read
    #[error("Snapshot unavailable: {0}")]
    Resource(String),
}

/// A rating outside the accepted 1-5 range.
///
/// The one error that surfaces synchronously to the caller: it is a contract
/// violation, not an environmental failure, and is raised before any network
/// activity.
#[derive(Debug, Clone, Copy, Error, Serialize, PartialEq, Eq)]
#[error("Rating {0} is outside the accepted range 1-5")]
pub struct InvalidRating(pub u8);
