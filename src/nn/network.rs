use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SnakeError};

/// Weights (`outputs x inputs`) and biases of one linear layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerParams {
    pub weights: Vec<Vec<f32>>,
    pub biases: Vec<f32>,
}

impl LayerParams {
    fn shape(&self) -> (usize, usize) {
        let inputs = self.weights.first().map_or(0, Vec::len);
        (self.weights.len(), inputs)
    }

    fn forward(&self, x: &[f32]) -> Vec<f32> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f32>() + b)
            .collect()
    }

    /// Largest absolute weight, 0 for an empty matrix.
    pub fn max_abs_weight(&self) -> f32 {
        self.weights.iter().flatten().fold(0.0, |m, w| m.max(w.abs()))
    }
}

/// Everything needed to rebuild a network elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub architecture: Vec<usize>,
    pub layers: Vec<LayerParams>,
}

/// Small fully connected network: ReLU between layers, nothing after the last.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    architecture: Vec<usize>,
    layers: Vec<LayerParams>,
}

impl Network {
    /// Uniform init in `±1/sqrt(fan_in)`.
    pub fn new<R: Rng + ?Sized>(architecture: &[usize], rng: &mut R) -> Self {
        let layers = architecture
            .windows(2)
            .map(|pair| {
                let (fan_in, fan_out) = (pair[0], pair[1]);
                let bound = if fan_in == 0 { 0.0 } else { 1.0 / (fan_in as f32).sqrt() };
                let mut sample = || if bound > 0.0 { rng.gen_range(-bound..bound) } else { 0.0 };
                let weights = (0..fan_out).map(|_| (0..fan_in).map(|_| sample()).collect::<Vec<f32>>()).collect();
                let biases = (0..fan_out).map(|_| sample()).collect();
                LayerParams { weights, biases }
            })
            .collect();
        Self { architecture: architecture.to_vec(), layers }
    }

    pub fn from_parameters(params: ParameterSet) -> Result<Self> {
        validate(&params.architecture, &params.layers)?;
        Ok(Self { architecture: params.architecture, layers: params.layers })
    }

    pub fn architecture(&self) -> &[usize] {
        &self.architecture
    }

    pub fn layers(&self) -> &[LayerParams] {
        &self.layers
    }

    /// Adopts an external parameter set, architecture included. The set must
    /// be consistent with its own architecture; on error nothing changes.
    pub fn load_parameters(&mut self, params: ParameterSet) -> Result<()> {
        validate(&params.architecture, &params.layers)?;
        self.architecture = params.architecture;
        self.layers = params.layers;
        Ok(())
    }

    pub fn parameters(&self) -> ParameterSet {
        ParameterSet { architecture: self.architecture.clone(), layers: self.layers.clone() }
    }

    /// Runs one pass and returns every layer's output, input included.
    pub fn forward(&self, input: &[f32]) -> Result<Vec<Vec<f32>>> {
        let &width = self.architecture.first().ok_or(SnakeError::EmptyArchitecture)?;
        if input.len() != width {
            return Err(SnakeError::InputLength { expected: width, actual: input.len() });
        }
        let mut activations = Vec::with_capacity(self.architecture.len());
        activations.push(input.to_vec());
        let last = self.layers.len().saturating_sub(1);
        for (i, layer) in self.layers.iter().enumerate() {
            let mut x = layer.forward(&activations[i]);
            if i < last {
                x.iter_mut().for_each(|v| *v = v.max(0.0));
            }
            activations.push(x);
        }
        Ok(activations)
    }
}

fn validate(architecture: &[usize], layers: &[LayerParams]) -> Result<()> {
    let expected = architecture.len().saturating_sub(1);
    if layers.len() != expected {
        return Err(SnakeError::LayerCount { expected, actual: layers.len() });
    }
    for (i, (layer, pair)) in layers.iter().zip(architecture.windows(2)).enumerate() {
        let want = (pair[1], pair[0]);
        let rows_ok = layer.weights.len() == want.0 && layer.biases.len() == want.0;
        let cols_ok = layer.weights.iter().all(|r| r.len() == want.1);
        if !rows_ok || !cols_ok {
            return Err(SnakeError::ParameterShape { layer: i, expected: want, actual: layer.shape() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn fixed() -> Network {
        // 2 -> 2 -> 1
        Network::from_parameters(ParameterSet {
            architecture: vec![2, 2, 1],
            layers: vec![
                LayerParams { weights: vec![vec![1.0, 1.0], vec![-1.0, -1.0]], biases: vec![0.5, 0.0] },
                LayerParams { weights: vec![vec![2.0, 3.0]], biases: vec![-10.0] },
            ],
        })
        .unwrap()
    }

    #[test]
    fn relu_on_hidden_identity_on_output() {
        let acts = fixed().forward(&[1.0, 2.0]).unwrap();
        assert_eq!(acts[0], vec![1.0, 2.0]);
        assert_eq!(acts[1], vec![3.5, 0.0]);
        // negative output survives: no activation after the last layer
        assert_eq!(acts[2], vec![-3.0]);
    }

    #[test]
    fn input_width_is_checked() {
        let err = fixed().forward(&[1.0]).unwrap_err();
        assert!(matches!(err, SnakeError::InputLength { expected: 2, actual: 1 }));
    }

    #[test]
    fn empty_architecture_cannot_forward() {
        let net = Network::new(&[], &mut SmallRng::seed_from_u64(1));
        assert!(matches!(net.forward(&[]), Err(SnakeError::EmptyArchitecture)));
    }

    #[test]
    fn init_shapes_follow_architecture() {
        let net = Network::new(&[12, 8, 8, 4], &mut SmallRng::seed_from_u64(3));
        let shapes: Vec<_> = net.layers().iter().map(LayerParams::shape).collect();
        assert_eq!(shapes, vec![(8, 12), (8, 8), (4, 8)]);
        let bound = 1.0 / 12f32.sqrt();
        assert!(net.layers()[0].weights.iter().flatten().all(|w| w.abs() <= bound));
    }

    #[test]
    fn parameters_load_into_same_architecture() {
        let mut rng = SmallRng::seed_from_u64(5);
        let a = Network::new(&[3, 2], &mut rng);
        let mut b = Network::new(&[3, 2], &mut rng);
        assert_ne!(a, b);
        b.load_parameters(a.parameters()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn loading_a_different_shape_replaces_architecture() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut net = Network::new(&[3, 2], &mut rng);
        let deeper = Network::new(&[3, 2, 2], &mut rng);
        net.load_parameters(deeper.parameters()).unwrap();
        assert_eq!(net.architecture(), &[3, 2, 2]);
        assert_eq!(net, deeper);
    }

    #[test]
    fn inconsistent_parameters_are_rejected_and_state_kept() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut net = Network::new(&[3, 2], &mut rng);
        let before = net.clone();

        let mut wrong_count = Network::new(&[3, 2, 2], &mut rng).parameters();
        wrong_count.architecture = vec![3, 2];
        assert!(matches!(
            net.load_parameters(wrong_count),
            Err(SnakeError::LayerCount { expected: 1, actual: 2 })
        ));

        let mut wrong_shape = Network::new(&[3, 4], &mut rng).parameters();
        wrong_shape.architecture = vec![3, 2];
        assert!(matches!(net.load_parameters(wrong_shape), Err(SnakeError::ParameterShape { layer: 0, .. })));
        assert_eq!(net, before);
    }
}
