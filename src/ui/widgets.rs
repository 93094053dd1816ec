use crate::render::Canvas;
use crate::style::Style;

const LABEL_SCALE: u32 = 2;
const LABEL_PADDING: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    Hover,
    Pressed,
}

/// Rectangular text button. Reports its state; the caller decides what a
/// press means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub label: String,
}

impl Button {
    pub fn new(position: (i32, i32), width: u32, height: u32, label: impl Into<String>) -> Self {
        Self { x: position.0, y: position.1, width, height, label: label.into() }
    }

    pub fn contains(&self, point: (i32, i32)) -> bool {
        let (px, py) = point;
        px >= self.x && py >= self.y && px < self.x + self.width as i32 && py < self.y + self.height as i32
    }

    pub fn state(&self, mouse: Option<(i32, i32)>, mouse_down: bool) -> ButtonState {
        match mouse {
            Some(p) if self.contains(p) && mouse_down => ButtonState::Pressed,
            Some(p) if self.contains(p) => ButtonState::Hover,
            _ => ButtonState::Idle,
        }
    }

    pub fn draw(&self, canvas: &mut Canvas, state: ButtonState, style: &Style) {
        let background = match state {
            ButtonState::Idle => style.button_background,
            ButtonState::Hover => style.button_hover,
            ButtonState::Pressed => style.button_click,
        };
        canvas.fill_rect(self.x, self.y, self.width, self.height, background);
        canvas.draw_text(&self.label, self.x + LABEL_PADDING, self.y + LABEL_PADDING, LABEL_SCALE, style.button_text);
    }
}
