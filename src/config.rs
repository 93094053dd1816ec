//! Application settings: tick pacing, network shape and palette.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::game::OBSERVATION_LEN;
use crate::style::Style;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Delay between simulation ticks.
    pub game_tick_ms: u64,
    /// Delay between frames of the standalone visualizer demo.
    pub visualizer_tick_ms: u64,
    /// Pause on the final frame of a lost round before the game-over screen.
    pub loss_pause_ms: u64,
    /// Layer widths of the playback network. First entry is the observation width,
    /// last entry the four directions.
    pub architecture: Vec<usize>,
    pub style: Style,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game_tick_ms: 100,
            visualizer_tick_ms: 200,
            loss_pause_ms: 500,
            architecture: vec![OBSERVATION_LEN, 8, 8, 4],
            style: Style::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Playback needs a network whose ends fit the snake.
    pub fn playback_architecture_ok(&self) -> bool {
        self.architecture.first() == Some(&OBSERVATION_LEN) && self.architecture.last() == Some(&4)
    }
}
