//! A trained network plays while its forward passes are animated beside
//! the board.

use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::error::Result;
use crate::game::grid::BOARD;
use crate::game::{Direction, ReversalPolicy, Simulation};
use crate::nn::{ActivationVisualizer, VISUALIZER_HEIGHT, VISUALIZER_WIDTH};
use crate::render::Canvas;
use crate::render::board::draw_board;
use crate::style::Style;
use crate::ui::Message;

pub const PLAYBACK_WIDTH: u32 = BOARD + VISUALIZER_WIDTH;
pub const PLAYBACK_HEIGHT: u32 = VISUALIZER_HEIGHT;

const HUD_Y: i32 = BOARD as i32 + 20;

pub struct ModelPlayback<R = SmallRng> {
    sim: Simulation<R>,
    visualizer: ActivationVisualizer,
    pending: Option<Direction>,
    lost_at: Option<Instant>,
    loss_pause: Duration,
}

impl ModelPlayback<SmallRng> {
    pub fn seeded(seed: u64, visualizer: ActivationVisualizer, loss_pause: Duration) -> Self {
        Self::with_simulation(Simulation::seeded(ReversalPolicy::Ignore, seed), visualizer, loss_pause)
    }
}

impl<R: Rng> ModelPlayback<R> {
    pub fn with_simulation(sim: Simulation<R>, visualizer: ActivationVisualizer, loss_pause: Duration) -> Self {
        Self { sim, visualizer, pending: None, lost_at: None, loss_pause }
    }

    pub fn simulation(&self) -> &Simulation<R> {
        &self.sim
    }

    pub fn visualizer(&self) -> &ActivationVisualizer {
        &self.visualizer
    }

    /// One tick: a new move is chosen only after the previous decision has
    /// finished animating, so the board and the network stay in step.
    pub fn tick(&mut self, now: Instant) -> Result<Option<Message>> {
        if let Some(at) = self.lost_at {
            let score = self.sim.score();
            return Ok((now.duration_since(at) >= self.loss_pause).then_some(Message::RoundLost { score }));
        }
        if self.visualizer.is_forward_complete() {
            if let Some(action) = self.pending.take() {
                if self.sim.step(Some(action)).lost {
                    info!(score = self.sim.score(), "model round over");
                    self.lost_at = Some(now);
                    return Ok(None);
                }
            }
            let logits = self.visualizer.forward(self.sim.observation().as_slice())?;
            let action = Direction::from_logits(&logits)?;
            debug!(?action, ?logits, "model chose move");
            self.pending = Some(action);
        }
        self.visualizer.render_frame();
        Ok(None)
    }

    pub fn draw(&self, canvas: &mut Canvas, style: &Style) {
        canvas.clear(style.hud_background);
        draw_board(canvas, &self.sim, style, (0, 0));
        canvas.draw_text(&format!("Score: {}", self.sim.score()), 20, HUD_Y, 3, style.text);
        canvas.blit(self.visualizer.frame(), BOARD as i32, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{OBSERVATION_LEN, Point};
    use crate::nn::{LayerParams, Network, ParameterSet};
    use rand::rngs::mock::StepRng;

    /// Single linear layer that always prefers `preferred`.
    fn fixed_policy(preferred: Direction) -> ActivationVisualizer {
        let mut biases = vec![0.0; 4];
        biases[preferred.action_index()] = 1.0;
        let params = ParameterSet {
            architecture: vec![OBSERVATION_LEN, 4],
            layers: vec![LayerParams { weights: vec![vec![0.0; OBSERVATION_LEN]; 4], biases }],
        };
        ActivationVisualizer::with_network(Network::from_parameters(params).unwrap(), Style::default())
    }

    fn playback(preferred: Direction) -> ModelPlayback<StepRng> {
        let sim = Simulation::with_rng(ReversalPolicy::Ignore, StepRng::new(0, 0));
        ModelPlayback::with_simulation(sim, fixed_policy(preferred), Duration::ZERO)
    }

    #[test]
    fn moves_only_after_sweep_finishes() {
        let mut pb = playback(Direction::Right);
        let now = Instant::now();
        pb.tick(now).unwrap();
        // two layers: three frames per sweep
        assert_eq!(pb.visualizer().remaining_animation_steps(), 2);
        pb.tick(now).unwrap();
        pb.tick(now).unwrap();
        assert!(pb.visualizer().is_forward_complete());
        assert_eq!(pb.simulation().head(), Point::new(226, 226));
        pb.tick(now).unwrap();
        assert_eq!(pb.simulation().head(), Point::new(251, 226));
    }

    #[test]
    fn losing_round_reports_score() {
        let mut pb = playback(Direction::Right);
        let now = Instant::now();
        let mut message = None;
        for _ in 0..200 {
            message = pb.tick(now).unwrap();
            if message.is_some() {
                break;
            }
        }
        assert_eq!(message, Some(Message::RoundLost { score: 0 }));
    }

    #[test]
    fn draws_board_and_network_side_by_side() {
        let pb = playback(Direction::Up);
        let style = Style::default();
        let mut canvas = Canvas::new(PLAYBACK_WIDTH, PLAYBACK_HEIGHT);
        pb.draw(&mut canvas, &style);
        assert_eq!(canvas.pixel(30, 10), Some(style.board_background));
        assert_eq!(canvas.pixel(10, 10), Some(style.food));
        assert_eq!(canvas.pixel(10, BOARD + 100), Some(style.hud_background));
    }
}
