//! Chat-ready horse announcements built from a scored match.

mod message;
pub mod views;

pub use message::{HorseMessages, MessageOptions};
pub use views::{MatchScoreView, PlayerScoreView};
