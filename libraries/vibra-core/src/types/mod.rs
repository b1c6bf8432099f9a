//! Domain types for Vibra Player

mod ids;
mod track;

pub use ids::{ArtistId, TrackId, UserId};
pub use track::Track;
