//! Grid snake with a small feed-forward network that can play it, plus an
//! animated view of the network's forward passes.

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod modes;
pub mod nn;
pub mod render;
pub mod style;
pub mod ui;

pub use error::{Result, SnakeError};
