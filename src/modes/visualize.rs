//! Standalone network demo: random inputs, one sweep after another.

use rand::Rng;
use rand::rngs::SmallRng;
use tracing::debug;

use crate::error::Result;
use crate::nn::ActivationVisualizer;
use crate::render::Canvas;

const INPUT_RANGE: std::ops::RangeInclusive<i32> = -10..=10;

pub struct VisualizerDemo<R = SmallRng> {
    visualizer: ActivationVisualizer,
    rng: R,
}

impl<R: Rng> VisualizerDemo<R> {
    pub fn new(visualizer: ActivationVisualizer, rng: R) -> Self {
        Self { visualizer, rng }
    }

    pub fn visualizer(&self) -> &ActivationVisualizer {
        &self.visualizer
    }

    /// Starts a fresh pass whenever the last one has played out, then
    /// advances the animation by one frame.
    pub fn tick(&mut self) -> Result<()> {
        if self.visualizer.is_forward_complete() {
            let width = self.visualizer.architecture().first().copied().unwrap_or(0);
            let input: Vec<f32> = (0..width).map(|_| self.rng.gen_range(INPUT_RANGE) as f32).collect();
            let output = self.visualizer.forward(&input)?;
            let strongest = output.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            debug!(?input, strongest, "new forward pass");
        }
        self.visualizer.render_frame();
        Ok(())
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.blit(self.visualizer.frame(), 0, 0);
    }
}
