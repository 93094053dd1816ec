//! Grid snake simulation: heading, board geometry, body movement and the
//! per-tick state machine.

pub mod direction;
pub mod grid;
pub mod observation;
pub mod simulation;
pub mod snake;

pub use direction::Direction;
pub use grid::Point;
pub use observation::{OBSERVATION_LEN, Observation};
pub use simulation::{ReversalPolicy, Simulation, Sprite, StepOutcome};
pub use snake::Segment;
