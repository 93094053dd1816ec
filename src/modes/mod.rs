//! The interactive surfaces: a human round, model playback and the
//! standalone network demo.

pub mod human;
pub mod playback;
pub mod visualize;

pub use human::HumanRound;
pub use playback::{ModelPlayback, PLAYBACK_HEIGHT, PLAYBACK_WIDTH};
pub use visualize::VisualizerDemo;
