//! Feed-forward network and its activation sweep visualizer.

pub mod network;
pub mod persistence;
pub mod visualizer;

pub use network::{LayerParams, Network, ParameterSet};
pub use visualizer::{ActivationVisualizer, Edge, Neuron, VISUALIZER_HEIGHT, VISUALIZER_WIDTH};
