//! Keyboard-driven round.

use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::SmallRng;
use tracing::info;

use crate::game::{Direction, ReversalPolicy, Simulation};
use crate::render::Canvas;
use crate::render::board::draw_board;
use crate::style::Style;
use crate::ui::Message;

pub struct HumanRound<R = SmallRng> {
    sim: Simulation<R>,
    steer: Option<Direction>,
    lost_at: Option<Instant>,
    loss_pause: Duration,
}

impl HumanRound<SmallRng> {
    pub fn seeded(seed: u64, loss_pause: Duration) -> Self {
        Self::with_simulation(Simulation::seeded(ReversalPolicy::EndRound, seed), loss_pause)
    }
}

impl<R: Rng> HumanRound<R> {
    pub fn with_simulation(sim: Simulation<R>, loss_pause: Duration) -> Self {
        Self { sim, steer: None, lost_at: None, loss_pause }
    }

    pub fn simulation(&self) -> &Simulation<R> {
        &self.sim
    }

    /// Latest key wins; it is applied on the next tick.
    pub fn steer(&mut self, direction: Direction) {
        self.steer = Some(direction);
    }

    /// Advances one tick. Once the round is lost the final frame stays up
    /// for the loss pause, then the round reports its score.
    pub fn tick(&mut self, now: Instant) -> Option<Message> {
        if let Some(at) = self.lost_at {
            let score = self.sim.score();
            return (now.duration_since(at) >= self.loss_pause).then_some(Message::RoundLost { score });
        }
        let outcome = self.sim.step(self.steer.take());
        if outcome.lost {
            info!(score = self.sim.score(), "human round over");
            self.lost_at = Some(now);
        }
        None
    }

    pub fn draw(&self, canvas: &mut Canvas, style: &Style) {
        draw_board(canvas, &self.sim, style, (0, 0));
    }
}
