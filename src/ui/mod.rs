pub mod screens;
pub mod widgets;

pub use screens::{HomeScreen, Message, ScreenKind, transition};
pub use widgets::{Button, ButtonState};
