//! Layer-by-layer reveal of a forward pass.
//!
//! After `forward`, each call to `render_frame` highlights the next layer's
//! neurons (coloured by activation strength) and clears the layer before it.
//! A pass over `L` layers takes `L + 1` frames; the last one clears the
//! output layer.

use rand::Rng;
use tracing::debug;

use super::network::{Network, ParameterSet};
use crate::error::Result;
use crate::render::Canvas;
use crate::style::{Rgb, Style};

pub const VISUALIZER_WIDTH: u32 = 501;
pub const VISUALIZER_HEIGHT: u32 = 751;

const COLUMN_SPACING: f32 = 120.0;
const ROW_SPACING: f32 = 60.0;
const MARGIN_X: f32 = 50.0;
const MARGIN_Y: f32 = 50.0;
const NEURON_RADIUS: u32 = 14;
const NEURON_BORDER: u32 = 2;
const MIN_THICKNESS: f32 = 1.0;
const MAX_THICKNESS: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neuron {
    pub center: (i32, i32),
    pub fill: Rgb,
    pub border: Rgb,
}

impl Neuron {
    fn reset(&mut self, style: &Style) {
        self.fill = style.neuron_fill;
        self.border = style.neuron_border;
    }

    fn highlight(&mut self, activation: f32, max_abs: f32, style: &Style) {
        let fraction = if max_abs > 0.0 { activation.abs() / max_abs } else { 0.0 };
        self.fill = style.neuron_fill.lerp(style.neuron_highlight, fraction);
        self.border = style.neuron_highlight;
    }

    fn draw(&self, canvas: &mut Canvas) {
        let (x, y) = self.center;
        canvas.fill_circle(x, y, NEURON_RADIUS, self.border);
        canvas.fill_circle(x, y, NEURON_RADIUS - NEURON_BORDER, self.fill);
    }
}

/// One drawn connection, derived from a single weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: (i32, i32),
    pub to: (i32, i32),
    pub thickness: u32,
    pub color: Rgb,
}

pub struct ActivationVisualizer {
    network: Network,
    style: Style,
    activations: Vec<Vec<f32>>,
    neurons: Vec<Vec<Neuron>>,
    edges: Vec<Edge>,
    background: Canvas,
    frame: Canvas,
    remaining_animation_steps: i32,
}

impl ActivationVisualizer {
    pub fn new<R: Rng + ?Sized>(architecture: &[usize], style: Style, rng: &mut R) -> Self {
        Self::with_network(Network::new(architecture, rng), style)
    }

    pub fn with_network(network: Network, style: Style) -> Self {
        let mut vis = Self {
            network,
            style,
            activations: Vec::new(),
            neurons: Vec::new(),
            edges: Vec::new(),
            background: Canvas::new(VISUALIZER_WIDTH, VISUALIZER_HEIGHT),
            frame: Canvas::new(VISUALIZER_WIDTH, VISUALIZER_HEIGHT),
            remaining_animation_steps: 0,
        };
        vis.draw_network();
        vis
    }

    pub fn architecture(&self) -> &[usize] {
        self.network.architecture()
    }

    /// Adopts pretrained parameters and redraws the static layout.
    pub fn change_state(&mut self, params: ParameterSet) -> Result<()> {
        self.network.load_parameters(params)?;
        self.draw_network();
        debug!(architecture = ?self.network.architecture(), "visualizer adopted new parameters");
        Ok(())
    }

    pub fn model_state(&self) -> ParameterSet {
        self.network.parameters()
    }

    /// Runs the network and arms a new sweep. Returns the output layer.
    pub fn forward(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        self.activations = self.network.forward(input)?;
        self.remaining_animation_steps = self.network.architecture().len() as i32 + 1;
        Ok(self.activations.last().cloned().unwrap_or_default())
    }

    /// True once the current sweep has played out.
    pub fn is_forward_complete(&self) -> bool {
        self.remaining_animation_steps <= 0
    }

    /// Advances the sweep by one tick and returns the frame to show.
    /// Once the sweep is complete this only redraws.
    pub fn render_frame(&mut self) -> &Canvas {
        if !self.is_forward_complete() {
            self.display_activation_step();
        }
        self.frame.blit(&self.background, 0, 0);
        for neuron in self.neurons.iter().flatten() {
            neuron.draw(&mut self.frame);
        }
        &self.frame
    }

    /// Last rendered frame, without advancing the sweep.
    pub fn frame(&self) -> &Canvas {
        &self.frame
    }

    pub fn activations(&self) -> &[Vec<f32>] {
        &self.activations
    }

    pub fn neurons(&self) -> &[Vec<Neuron>] {
        &self.neurons
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn remaining_animation_steps(&self) -> i32 {
        self.remaining_animation_steps
    }

    fn display_activation_step(&mut self) {
        let depth = self.neurons.len() as i32;
        // k counts from -depth up to 0; negative k addresses layer depth + k
        let k = -(self.remaining_animation_steps - 1);
        if k == 0 {
            if let Some(last) = self.neurons.last_mut() {
                last.iter_mut().for_each(|n| n.reset(&self.style));
            }
        } else if let Ok(layer) = usize::try_from(k + depth) {
            let max_abs = self.activations.iter().flatten().fold(0.0f32, |m, a| m.max(a.abs()));
            if let (Some(neurons), Some(acts)) = (self.neurons.get_mut(layer), self.activations.get(layer)) {
                for (neuron, &a) in neurons.iter_mut().zip(acts) {
                    neuron.highlight(a, max_abs, &self.style);
                }
            }
            if layer > 0 {
                self.neurons[layer - 1].iter_mut().for_each(|n| n.reset(&self.style));
            }
        }
        self.remaining_animation_steps -= 1;
    }

    /// Lays out neurons in columns centred on the tallest layer and paints
    /// one edge per weight onto the static background. Any sweep in
    /// progress is discarded.
    fn draw_network(&mut self) {
        let arch = self.network.architecture().to_vec();
        let mid_height = arch.iter().copied().max().unwrap_or(0) as f32 * ROW_SPACING / 2.0;
        let column_top = |width: usize| mid_height - width as f32 * ROW_SPACING / 2.0 + MARGIN_Y;
        let position = |layer: usize, row: usize| {
            let x = COLUMN_SPACING * layer as f32 + MARGIN_X;
            let y = column_top(arch[layer]) + row as f32 * ROW_SPACING;
            (x as i32, y as i32)
        };

        self.edges.clear();
        for (i, params) in self.network.layers().iter().enumerate() {
            let max_abs = params.max_abs_weight();
            for (k, row) in params.weights.iter().enumerate() {
                for (j, &w) in row.iter().enumerate() {
                    let fraction = if max_abs > 0.0 { w.abs() / max_abs } else { 0.0 };
                    let thickness = (MIN_THICKNESS + (MAX_THICKNESS - MIN_THICKNESS) * fraction) as u32;
                    let color = if w > 0.0 { self.style.positive_weight } else { self.style.negative_weight };
                    self.edges.push(Edge { from: position(i, j), to: position(i + 1, k), thickness, color });
                }
            }
        }

        let style = &self.style;
        self.neurons = arch
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                (0..width)
                    .map(|j| Neuron { center: position(i, j), fill: style.neuron_fill, border: style.neuron_border })
                    .collect()
            })
            .collect();
        self.activations = arch.iter().map(|&w| vec![0.0; w]).collect();
        self.remaining_animation_steps = 0;

        self.background.clear(self.style.visualizer_background);
        for edge in &self.edges {
            self.background.line(edge.from, edge.to, edge.thickness, edge.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nn::network::LayerParams;

    fn ones(architecture: &[usize]) -> ActivationVisualizer {
        let layers = architecture
            .windows(2)
            .map(|p| LayerParams { weights: vec![vec![1.0; p[0]]; p[1]], biases: vec![0.0; p[1]] })
            .collect();
        let net = Network::from_parameters(ParameterSet { architecture: architecture.to_vec(), layers }).unwrap();
        ActivationVisualizer::with_network(net, Style::default())
    }

    fn highlighted(vis: &ActivationVisualizer) -> Vec<usize> {
        let style = Style::default();
        vis.neurons()
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.iter().any(|n| n.border == style.neuron_highlight))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn sweep_reveals_one_layer_per_frame() {
        let mut vis = ones(&[2, 3, 1]);
        vis.forward(&[1.0, 1.0]).unwrap();
        assert_eq!(vis.remaining_animation_steps(), 4);

        vis.render_frame();
        assert_eq!(highlighted(&vis), vec![0]);
        vis.render_frame();
        assert_eq!(highlighted(&vis), vec![1]);
        vis.render_frame();
        assert_eq!(highlighted(&vis), vec![2]);
        assert!(!vis.is_forward_complete());
        vis.render_frame();
        assert!(highlighted(&vis).is_empty());
        assert!(vis.is_forward_complete());
    }

    #[test]
    fn strongest_neuron_gets_full_highlight() {
        let mut vis = ones(&[2, 3, 1]);
        // hidden = 2 each, output = 6: output holds the max
        vis.forward(&[1.0, 1.0]).unwrap();
        for _ in 0..3 {
            vis.render_frame();
        }
        let style = Style::default();
        assert_eq!(vis.neurons()[2][0].fill, style.neuron_highlight);
    }

    #[test]
    fn layout_centres_columns_on_tallest_layer() {
        let vis = ones(&[2, 3, 1]);
        let n = vis.neurons();
        // tallest layer spans 3 rows: mid = 90
        assert_eq!(n[1][0].center, (170, 50));
        assert_eq!(n[0][0].center, (50, 80));
        assert_eq!(n[2][0].center, (290, 110));
        assert_eq!(vis.edges().len(), 2 * 3 + 3);
    }

    #[test]
    fn edge_thickness_tracks_relative_weight() {
        let net = Network::from_parameters(ParameterSet {
            architecture: vec![2, 1],
            layers: vec![LayerParams { weights: vec![vec![-2.0, 0.5]], biases: vec![0.0] }],
        })
        .unwrap();
        let vis = ActivationVisualizer::with_network(net, Style::default());
        let style = Style::default();
        assert_eq!(vis.edges()[0].thickness, 4);
        assert_eq!(vis.edges()[0].color, style.negative_weight);
        assert_eq!(vis.edges()[1].thickness, 1);
        assert_eq!(vis.edges()[1].color, style.positive_weight);
    }

    #[test]
    fn all_zero_weights_are_thin() {
        let net = Network::from_parameters(ParameterSet {
            architecture: vec![2, 2],
            layers: vec![LayerParams { weights: vec![vec![0.0; 2]; 2], biases: vec![0.0; 2] }],
        })
        .unwrap();
        let mut vis = ActivationVisualizer::with_network(net, Style::default());
        assert!(vis.edges().iter().all(|e| e.thickness == 1));
        vis.forward(&[0.0, 0.0]).unwrap();
        vis.render_frame();
        assert_eq!(vis.neurons()[0][0].fill, Style::default().neuron_fill);
    }
}
