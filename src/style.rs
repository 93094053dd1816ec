//! Colour palette shared by every screen.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Linear blend towards `high`; `t` is clamped to [0, 1].
    pub fn lerp(self, high: Rgb, t: f32) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Rgb(mix(self.0, high.0), mix(self.1, high.1), mix(self.2, high.2))
    }
}

/// Immutable palette handed to the renderers. Loaded with the app config so
/// colours can be overridden without touching code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub head: Rgb,
    pub body: Rgb,
    pub food: Rgb,
    pub dead: Rgb,
    pub board_background: Rgb,
    pub grid: Rgb,
    pub menu_background: Rgb,
    pub loss_background: Rgb,
    pub loss_grid: Rgb,
    pub text: Rgb,
    pub hud_background: Rgb,
    pub button_background: Rgb,
    pub button_text: Rgb,
    pub button_hover: Rgb,
    pub button_click: Rgb,
    pub positive_weight: Rgb,
    pub negative_weight: Rgb,
    pub neuron_fill: Rgb,
    pub neuron_border: Rgb,
    pub neuron_highlight: Rgb,
    pub visualizer_background: Rgb,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            head: Rgb(0, 102, 0),
            body: Rgb(31, 190, 31),
            food: Rgb(7, 247, 227),
            dead: Rgb(255, 0, 0),
            board_background: Rgb::BLACK,
            grid: Rgb(120, 120, 120),
            menu_background: Rgb(99, 5, 102),
            loss_background: Rgb(0, 0, 153),
            loss_grid: Rgb(20, 20, 20),
            text: Rgb::WHITE,
            hud_background: Rgb(20, 20, 20),
            button_background: Rgb::WHITE,
            button_text: Rgb::BLACK,
            button_hover: Rgb(153, 153, 255),
            button_click: Rgb(130, 130, 255),
            positive_weight: Rgb(252, 3, 211),
            negative_weight: Rgb(3, 252, 244),
            neuron_fill: Rgb(77, 2, 163),
            neuron_border: Rgb(200, 200, 200),
            neuron_highlight: Rgb::WHITE,
            visualizer_background: Rgb::BLACK,
        }
    }
}
