//! Window, event loop and the screen the player is currently looking at.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use pixels::{Pixels, SurfaceTexture};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, warn};
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use crate::config::AppConfig;
use crate::game::grid::BOARD;
use crate::game::{Direction, OBSERVATION_LEN};
use crate::modes::{HumanRound, ModelPlayback, PLAYBACK_HEIGHT, PLAYBACK_WIDTH, VisualizerDemo};
use crate::nn::{ActivationVisualizer, VISUALIZER_HEIGHT, VISUALIZER_WIDTH, persistence};
use crate::render::Canvas;
use crate::ui::screens::{draw_game_over, draw_notice};
use crate::ui::{HomeScreen, Message, ScreenKind, transition};

/// Where the app opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StartMode {
    #[default]
    Menu,
    Human,
    Playback,
    Visualize,
}

/// The slice of keyboard and mouse state the screens care about, taken
/// once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub direction: Option<Direction>,
    pub space: bool,
    pub shift: bool,
    /// Cursor in canvas pixels, `None` when outside the canvas.
    pub mouse: Option<(i32, i32)>,
    pub mouse_down: bool,
    pub clicked: bool,
}

impl InputSnapshot {
    pub fn capture(input: &WinitInputHelper, pixels: &Pixels) -> Self {
        let pressed = |keys: &[VirtualKeyCode]| keys.iter().any(|&k| input.key_pressed(k));
        let direction = if pressed(&[VirtualKeyCode::Up, VirtualKeyCode::W]) {
            Some(Direction::Up)
        } else if pressed(&[VirtualKeyCode::Down, VirtualKeyCode::S]) {
            Some(Direction::Down)
        } else if pressed(&[VirtualKeyCode::Left, VirtualKeyCode::A]) {
            Some(Direction::Left)
        } else if pressed(&[VirtualKeyCode::Right, VirtualKeyCode::D]) {
            Some(Direction::Right)
        } else {
            None
        };
        let mouse = input
            .mouse()
            .and_then(|pos| pixels.window_pos_to_pixel(pos).ok())
            .map(|(x, y)| (x as i32, y as i32));
        Self {
            direction,
            space: pressed(&[VirtualKeyCode::Space]),
            shift: pressed(&[VirtualKeyCode::LShift, VirtualKeyCode::RShift]),
            mouse,
            mouse_down: input.mouse_held(0),
            clicked: input.mouse_pressed(0),
        }
    }
}

enum Screen {
    Home(HomeScreen),
    Game(HumanRound),
    GameOver { score: u32 },
    TrainModel,
    SelectModel,
    RunModel(ModelPlayback),
    Visualize(VisualizerDemo),
}

impl Screen {
    fn kind(&self) -> ScreenKind {
        match self {
            Screen::Home(_) => ScreenKind::Home,
            Screen::Game(_) => ScreenKind::Game,
            Screen::GameOver { .. } => ScreenKind::GameOver,
            Screen::TrainModel => ScreenKind::TrainModel,
            Screen::SelectModel => ScreenKind::SelectModel,
            Screen::RunModel(_) => ScreenKind::RunModel,
            Screen::Visualize(_) => ScreenKind::Visualize,
        }
    }
}

/// Canvas size each screen draws into.
pub fn screen_size(kind: ScreenKind) -> (u32, u32) {
    match kind {
        ScreenKind::RunModel => (PLAYBACK_WIDTH, PLAYBACK_HEIGHT),
        ScreenKind::Visualize => (VISUALIZER_WIDTH, VISUALIZER_HEIGHT),
        _ => (BOARD, BOARD),
    }
}

pub struct App {
    config: AppConfig,
    model_path: Option<PathBuf>,
    rng: SmallRng,
    screen: Screen,
    canvas: Canvas,
    staged_model: Option<ActivationVisualizer>,
    last_tick: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig, model_path: Option<PathBuf>, seed: Option<u64>, start: StartMode) -> Result<Self> {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut app = Self {
            config,
            model_path,
            rng,
            screen: Screen::Home(HomeScreen::new()),
            canvas: Canvas::new(BOARD, BOARD),
            staged_model: None,
            last_tick: None,
        };
        let first = match start {
            StartMode::Menu => ScreenKind::Home,
            StartMode::Human => ScreenKind::Game,
            StartMode::Playback => ScreenKind::SelectModel,
            StartMode::Visualize => ScreenKind::Visualize,
        };
        app.enter(first, 0)?;
        Ok(app)
    }

    pub fn kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// Handles one frame of input, advances the active screen when its tick
    /// is due and redraws the canvas.
    pub fn update(&mut self, input: &InputSnapshot, now: Instant) -> Result<()> {
        let due = self.tick_due(now);
        let message = match &mut self.screen {
            Screen::Home(home) if input.clicked => home.click(input.mouse),
            Screen::Home(_) => None,
            Screen::GameOver { .. } if input.space => Some(Message::BackToMenu),
            Screen::GameOver { .. } if input.shift => Some(Message::PlayAgain),
            Screen::GameOver { .. } => None,
            Screen::TrainModel => {
                info!("training is not available yet, returning to the menu");
                Some(Message::BackToMenu)
            }
            Screen::SelectModel => None,
            Screen::Game(round) => {
                if let Some(direction) = input.direction {
                    round.steer(direction);
                }
                if due { round.tick(now) } else { None }
            }
            Screen::RunModel(playback) => {
                if due {
                    playback.tick(now)?
                } else {
                    None
                }
            }
            Screen::Visualize(demo) => {
                if due {
                    demo.tick()?;
                }
                None
            }
        };
        let message = match self.screen {
            Screen::SelectModel => Some(self.select_model()),
            _ => message,
        };
        if let Some(message) = message {
            self.dispatch(message)?;
        }
        self.draw(input);
        Ok(())
    }

    fn dispatch(&mut self, message: Message) -> Result<()> {
        let from = self.kind();
        let Some(to) = transition(from, message) else {
            debug!(?from, ?message, "message ignored");
            return Ok(());
        };
        info!(?from, ?to, "switching screen");
        let score = match message {
            Message::RoundLost { score } => score,
            _ => 0,
        };
        self.enter(to, score)
    }

    fn enter(&mut self, kind: ScreenKind, score: u32) -> Result<()> {
        let pause = Duration::from_millis(self.config.loss_pause_ms);
        self.screen = match kind {
            ScreenKind::Home => Screen::Home(HomeScreen::new()),
            ScreenKind::Game => Screen::Game(HumanRound::seeded(self.rng.r#gen(), pause)),
            ScreenKind::GameOver => Screen::GameOver { score },
            ScreenKind::TrainModel => Screen::TrainModel,
            ScreenKind::SelectModel => Screen::SelectModel,
            ScreenKind::RunModel => {
                let visualizer = match self.staged_model.take() {
                    Some(visualizer) => visualizer,
                    None => self.load_model()?,
                };
                Screen::RunModel(ModelPlayback::seeded(self.rng.r#gen(), visualizer, pause))
            }
            ScreenKind::Visualize => {
                let visualizer = self.load_model()?;
                Screen::Visualize(VisualizerDemo::new(visualizer, SmallRng::seed_from_u64(self.rng.r#gen())))
            }
        };
        let (width, height) = screen_size(kind);
        if self.canvas_size() != (width, height) {
            self.canvas = Canvas::new(width, height);
        }
        self.last_tick = None;
        Ok(())
    }

    /// Prepares the network for playback. A model that cannot be used sends
    /// the player back to the menu instead of ending the program.
    fn select_model(&mut self) -> Message {
        match self.load_model().and_then(|visualizer| {
            let arch = visualizer.architecture();
            if arch.first() != Some(&OBSERVATION_LEN) || arch.last() != Some(&4) {
                bail!("model architecture {arch:?} cannot drive the snake");
            }
            Ok(visualizer)
        }) {
            Ok(visualizer) => {
                self.staged_model = Some(visualizer);
                Message::ModelReady
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "could not load model");
                Message::BackToMenu
            }
        }
    }

    fn load_model(&mut self) -> Result<ActivationVisualizer> {
        let style = self.config.style.clone();
        let mut visualizer = ActivationVisualizer::new(&self.config.architecture, style, &mut self.rng);
        match &self.model_path {
            Some(path) => {
                let params = persistence::load(path)
                    .with_context(|| format!("Failed to load model: {}", path.display()))?;
                visualizer.change_state(params)?;
            }
            None => info!("no model file given, using freshly initialised weights"),
        }
        Ok(visualizer)
    }

    fn tick_interval(&self) -> Option<Duration> {
        match self.screen {
            Screen::Game(_) | Screen::RunModel(_) => Some(Duration::from_millis(self.config.game_tick_ms)),
            Screen::Visualize(_) => Some(Duration::from_millis(self.config.visualizer_tick_ms)),
            _ => None,
        }
    }

    fn tick_due(&mut self, now: Instant) -> bool {
        let Some(interval) = self.tick_interval() else {
            return false;
        };
        match self.last_tick {
            Some(last) if now.duration_since(last) < interval => false,
            _ => {
                self.last_tick = Some(now);
                true
            }
        }
    }

    fn draw(&mut self, input: &InputSnapshot) {
        let style = &self.config.style;
        let canvas = &mut self.canvas;
        match &self.screen {
            Screen::Home(home) => home.draw(canvas, input.mouse, input.mouse_down, style),
            Screen::Game(round) => round.draw(canvas, style),
            Screen::GameOver { score } => draw_game_over(canvas, *score, style),
            Screen::TrainModel => draw_notice(canvas, "Training", style),
            Screen::SelectModel => draw_notice(canvas, "Loading model", style),
            Screen::RunModel(playback) => playback.draw(canvas, style),
            Screen::Visualize(demo) => demo.draw(canvas),
        }
    }
}

pub fn run(mut app: App) -> Result<()> {
    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    let (width, height) = app.canvas_size();
    let window = WindowBuilder::new()
        .with_title("Neural Snake")
        .with_inner_size(LogicalSize::new(width, height))
        .with_resizable(false)
        .build(&event_loop)?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(width, height, surface_texture)?
    };
    let mut buffer_size = (width, height);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        if let Event::RedrawRequested(_) = event {
            let frame = pixels.frame_mut();
            let bytes = app.canvas().as_bytes();
            if frame.len() == bytes.len() {
                frame.copy_from_slice(bytes);
            }
            if let Err(err) = pixels.render() {
                error!(error = %err, "render failed");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape) || input.close_requested() || input.destroyed() {
                *control_flow = ControlFlow::Exit;
                return;
            }

            if let Some(size) = input.window_resized() {
                if let Err(err) = pixels.resize_surface(size.width, size.height) {
                    error!(error = %err, "surface resize failed");
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }

            let snapshot = InputSnapshot::capture(&input, &pixels);
            if let Err(err) = app.update(&snapshot, Instant::now()) {
                error!(error = %format!("{err:#}"), "update failed");
                *control_flow = ControlFlow::Exit;
                return;
            }

            let size = app.canvas_size();
            if size != buffer_size {
                window.set_inner_size(LogicalSize::new(size.0, size.1));
                if let Err(err) = pixels.resize_buffer(size.0, size.1) {
                    error!(error = %err, "buffer resize failed");
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                buffer_size = size;
            }

            window.request_redraw();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(start: StartMode) -> App {
        App::new(AppConfig::default(), None, Some(7), start).unwrap()
    }

    fn click(x: i32, y: i32) -> InputSnapshot {
        InputSnapshot { mouse: Some((x, y)), clicked: true, ..Default::default() }
    }

    #[test]
    fn play_button_starts_a_round() {
        let mut app = app(StartMode::Menu);
        assert_eq!(app.kind(), ScreenKind::Home);
        app.update(&click(30, 30), Instant::now()).unwrap();
        assert_eq!(app.kind(), ScreenKind::Game);
        assert_eq!(app.canvas_size(), (BOARD, BOARD));
    }

    #[test]
    fn train_button_bounces_back_to_menu() {
        let mut app = app(StartMode::Menu);
        let now = Instant::now();
        app.update(&click(30, 100), now).unwrap();
        assert_eq!(app.kind(), ScreenKind::TrainModel);
        app.update(&InputSnapshot::default(), now).unwrap();
        assert_eq!(app.kind(), ScreenKind::Home);
    }

    #[test]
    fn run_button_opens_playback_with_fresh_weights() {
        let mut app = app(StartMode::Menu);
        let now = Instant::now();
        app.update(&click(30, 170), now).unwrap();
        assert_eq!(app.kind(), ScreenKind::SelectModel);
        app.update(&InputSnapshot::default(), now).unwrap();
        assert_eq!(app.kind(), ScreenKind::RunModel);
        assert_eq!(app.canvas_size(), (PLAYBACK_WIDTH, PLAYBACK_HEIGHT));
    }

    #[test]
    fn missing_model_file_returns_to_menu() {
        let path = std::env::temp_dir().join("neural_snake_missing_model.json");
        let mut app = App::new(AppConfig::default(), Some(path), Some(7), StartMode::Playback).unwrap();
        assert_eq!(app.kind(), ScreenKind::SelectModel);
        app.update(&InputSnapshot::default(), Instant::now()).unwrap();
        assert_eq!(app.kind(), ScreenKind::Home);
    }

    #[test]
    fn model_that_cannot_drive_the_snake_returns_to_menu() {
        let path = std::env::temp_dir().join(format!("neural_snake_small_model_{}.json", std::process::id()));
        let small = crate::nn::Network::new(&[3, 4], &mut SmallRng::seed_from_u64(2));
        persistence::save(&small.parameters(), &path).unwrap();

        let mut app = App::new(AppConfig::default(), Some(path.clone()), Some(7), StartMode::Playback).unwrap();
        app.update(&InputSnapshot::default(), Instant::now()).unwrap();
        assert_eq!(app.kind(), ScreenKind::Home);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn saved_model_is_adopted_for_playback() {
        let path = std::env::temp_dir().join(format!("neural_snake_full_model_{}.bin", std::process::id()));
        let model = crate::nn::Network::new(&[OBSERVATION_LEN, 6, 4], &mut SmallRng::seed_from_u64(2));
        persistence::save(&model.parameters(), &path).unwrap();

        let mut app = App::new(AppConfig::default(), Some(path.clone()), Some(7), StartMode::Playback).unwrap();
        app.update(&InputSnapshot::default(), Instant::now()).unwrap();
        assert_eq!(app.kind(), ScreenKind::RunModel);
        match &app.screen {
            Screen::RunModel(playback) => assert_eq!(playback.visualizer().architecture(), &[OBSERVATION_LEN, 6, 4]),
            _ => unreachable!(),
        }
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn human_round_ends_on_game_over_then_replays() {
        let mut app = app(StartMode::Human);
        let mut now = Instant::now();
        let steer_up = InputSnapshot { direction: Some(Direction::Up), ..Default::default() };
        app.update(&steer_up, now).unwrap();
        for _ in 0..100 {
            if app.kind() == ScreenKind::GameOver {
                break;
            }
            now += Duration::from_millis(100);
            app.update(&InputSnapshot::default(), now).unwrap();
        }
        assert_eq!(app.kind(), ScreenKind::GameOver);

        app.update(&InputSnapshot { shift: true, ..Default::default() }, now).unwrap();
        assert_eq!(app.kind(), ScreenKind::Game);
    }

    #[test]
    fn space_on_game_over_goes_home() {
        let mut app = app(StartMode::Menu);
        app.enter(ScreenKind::GameOver, 4).unwrap();
        app.update(&InputSnapshot { space: true, ..Default::default() }, Instant::now()).unwrap();
        assert_eq!(app.kind(), ScreenKind::Home);
    }

    #[test]
    fn visualizer_mode_uses_tall_canvas() {
        let mut app = app(StartMode::Visualize);
        assert_eq!(app.canvas_size(), (VISUALIZER_WIDTH, VISUALIZER_HEIGHT));
        app.update(&InputSnapshot::default(), Instant::now()).unwrap();
        assert_eq!(app.kind(), ScreenKind::Visualize);
    }
}
