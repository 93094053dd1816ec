//! Screen flow. Screens emit `Message`s; `transition` decides where to go.

use crate::game::grid::BOARD;
use crate::render::board::draw_grid;
use crate::render::{Canvas, font};
use crate::style::{Rgb, Style};

use super::widgets::Button;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Home,
    Game,
    GameOver,
    TrainModel,
    SelectModel,
    RunModel,
    Visualize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    PlayHuman,
    TrainModel,
    SelectModel,
    ModelReady,
    RoundLost { score: u32 },
    BackToMenu,
    PlayAgain,
}

/// Next screen for `message`, or `None` when the current screen ignores it.
pub fn transition(from: ScreenKind, message: Message) -> Option<ScreenKind> {
    use Message as M;
    use ScreenKind as S;
    match (from, message) {
        (S::Home, M::PlayHuman) => Some(S::Game),
        (S::Home, M::TrainModel) => Some(S::TrainModel),
        (S::Home, M::SelectModel) => Some(S::SelectModel),
        (S::TrainModel, M::BackToMenu) => Some(S::Home),
        (S::SelectModel, M::ModelReady) => Some(S::RunModel),
        (S::SelectModel, M::BackToMenu) => Some(S::Home),
        (S::Game | S::RunModel, M::RoundLost { .. }) => Some(S::GameOver),
        (S::GameOver, M::BackToMenu) => Some(S::Home),
        (S::GameOver, M::PlayAgain) => Some(S::Game),
        _ => None,
    }
}

const BUTTON_WIDTH: u32 = 150;
const BUTTON_HEIGHT: u32 = 50;

/// Main menu: one button per mode.
pub struct HomeScreen {
    buttons: Vec<(Button, Message)>,
}

impl HomeScreen {
    pub fn new() -> Self {
        let entries = [
            ((20, 20), "Play", Message::PlayHuman),
            ((20, 90), "Train Model", Message::TrainModel),
            ((20, 160), "Run Model", Message::SelectModel),
        ];
        let buttons = entries
            .into_iter()
            .map(|(pos, label, msg)| (Button::new(pos, BUTTON_WIDTH, BUTTON_HEIGHT, label), msg))
            .collect();
        Self { buttons }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter().map(|(b, _)| b)
    }

    /// Message for a click at `mouse`, if it landed on a button.
    pub fn click(&self, mouse: Option<(i32, i32)>) -> Option<Message> {
        let mouse = mouse?;
        self.buttons.iter().find(|(b, _)| b.contains(mouse)).map(|&(_, msg)| msg)
    }

    pub fn draw(&self, canvas: &mut Canvas, mouse: Option<(i32, i32)>, mouse_down: bool, style: &Style) {
        canvas.clear(style.menu_background);
        for (button, _) in &self.buttons {
            button.draw(canvas, button.state(mouse, mouse_down), style);
        }
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn centered(canvas: &mut Canvas, text: &str, y: i32, scale: u32, color: Rgb) {
    let width = font::text_width(text, scale) as i32;
    let x = (canvas.width() as i32 - width) / 2;
    canvas.draw_text(text, x, y, scale, color);
}

pub fn draw_game_over(canvas: &mut Canvas, score: u32, style: &Style) {
    canvas.fill_rect(0, 0, BOARD, BOARD, style.loss_background);
    draw_grid(canvas, (0, 0), style.loss_grid);
    centered(canvas, "Game Over", 100, 5, style.text);
    centered(canvas, &format!("Score: {score}"), 170, 4, style.text);
    centered(canvas, "Press SPACE for Menu", 280, 2, style.text);
    centered(canvas, "or SHIFT to Play Again", 304, 2, style.text);
}

/// Plain full-screen message, used while a screen has nothing else to show.
pub fn draw_notice(canvas: &mut Canvas, text: &str, style: &Style) {
    canvas.clear(style.menu_background);
    centered(canvas, text, canvas.height() as i32 / 2 - 7, 2, style.text);
}
