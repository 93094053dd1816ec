//! Software rendering into RGBA pixel buffers.

pub mod board;
pub mod canvas;
pub mod font;

pub use canvas::Canvas;
