//! Error types for the snake simulation and the activation visualizer.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, SnakeError>;

/// Errors raised by the simulation core and the network visualizer.
///
/// A lost round is not an error; it is reported through the step result.
#[derive(Debug, Error)]
pub enum SnakeError {
    /// Human-mode direction code outside 1..=4.
    #[error("invalid direction code {0}, must be an int 1-4")]
    InvalidDirection(i64),

    /// Environment action index outside 0..=3.
    #[error("invalid action index {0}, must be an int 0-3")]
    InvalidActionIndex(i64),

    /// Input vector does not match the expected width.
    #[error("input length mismatch: expected {expected}, got {actual}")]
    InputLength {
        /// Expected width.
        expected: usize,
        /// Actual width.
        actual: usize,
    },

    /// Forward pass requested on a network without layers.
    #[error("network architecture has no layers")]
    EmptyArchitecture,

    /// Parameter set has the wrong number of layers.
    #[error("parameter set has {actual} layers, network expects {expected}")]
    LayerCount {
        /// Layers in the network.
        expected: usize,
        /// Layers in the parameter set.
        actual: usize,
    },

    /// A layer's weight or bias shape does not fit the architecture.
    #[error("layer {layer} shape mismatch: expected {expected:?}, got {actual:?}")]
    ParameterShape {
        /// Index of the offending layer.
        layer: usize,
        /// Expected (outputs, inputs).
        expected: (usize, usize),
        /// Actual (outputs, inputs).
        actual: (usize, usize),
    },

    /// Filesystem error while persisting parameters.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialisation error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encoding error.
    #[error("encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Binary decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}
