//! Fire-and-forget reporting of user ratings.

pub mod reporter;
pub mod sink;

pub use reporter::FeedbackReporter;
pub use sink::{FeedbackSink, HttpSink};
