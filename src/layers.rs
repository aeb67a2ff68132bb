//! Dense layer implementation with weights, bias, and activation function.
use crate::activations::Activation;
use rand::Rng;
use std::sync::Arc;

/// Matrix type
pub type Matrix = Vec<Vec<f64>>;

/// A fully-connected (dense) layer with weights, bias, and an activation function.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    pub weights: Matrix,
    pub bias: Vec<f64>,
    pub activation: Arc<dyn Activation + Send + Sync>,
}

impl DenseLayer {
    /// Create a new dense layer using He (Kaiming) uniform initialization and
    /// small positive bias. The caller supplies the RNG so that a run's seed
    /// fully determines the initial parameters.
    pub fn new(
        input_size: usize,
        output_size: usize,
        activation: Arc<dyn Activation + Send + Sync>,
        rng: &mut impl Rng,
    ) -> Self {
        // He uniform: U(-sqrt(6/fan_in), sqrt(6/fan_in))
        let limit = (6.0f64 / (input_size as f64)).sqrt();
        let weights: Matrix = (0..output_size)
            .map(|_| (0..input_size).map(|_| rng.gen_range(-limit..limit)).collect())
            .collect();
        let bias = vec![0.01; output_size];
        Self {
            weights,
            bias,
            activation,
        }
    }

    /// Forward pass: computes pre-activations `z = W·x + b` and activations `a = act(z)`.
    pub fn forward(&self, input: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let z: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, &b)| row.iter().zip(input).map(|(&w, &i)| w * i).sum::<f64>() + b)
            .collect();
        let a: Vec<f64> = z.iter().map(|&val| self.activation.apply(val)).collect();
        (z, a)
    }

    pub fn input_size(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    pub fn output_size(&self) -> usize {
        self.bias.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::Linear;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn forward_computes_affine_map() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut layer = DenseLayer::new(2, 1, Arc::new(Linear), &mut rng);
        layer.weights = vec![vec![2.0, -1.0]];
        layer.bias = vec![0.5];
        let (z, a) = layer.forward(&[3.0, 4.0]);
        assert_eq!(z, vec![2.0 * 3.0 - 4.0 + 0.5]);
        assert_eq!(a, z);
    }

    #[test]
    fn init_is_rng_deterministic() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let a = DenseLayer::new(3, 4, Arc::new(Linear), &mut rng_a);
        let b = DenseLayer::new(3, 4, Arc::new(Linear), &mut rng_b);
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.bias, b.bias);
    }
}
