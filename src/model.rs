//! Shallow feed-forward network for binary classification.
//!
//! Fixed topology: input → dense(hidden, relu) → dense(1, sigmoid). The
//! forward output is a single probability per row; gradients are computed per
//! sample against binary cross-entropy, where the sigmoid output lets the
//! output delta collapse to `p − t`.
use crate::activations::{ReLU, Sigmoid};
use crate::layers::{DenseLayer, Matrix};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::sync::Arc;

/// A two-layer binary classifier. Parameters are owned by the instance and
/// mutated only through an optimizer step.
#[derive(Debug, Clone)]
pub struct ShallowNet {
    pub layers: Vec<DenseLayer>,
    input_size: usize,
}

/// Per-layer gradients in layer order, shaped like the model's parameters.
#[derive(Debug)]
pub struct Gradients {
    pub d_w: Vec<Matrix>,
    pub db: Vec<Vec<f64>>,
}

impl ShallowNet {
    /// Build the topology with He-uniform initial weights drawn from `rng`.
    pub fn new(input_size: usize, hidden_size: usize, rng: &mut StdRng) -> Self {
        let layers = vec![
            DenseLayer::new(input_size, hidden_size, Arc::new(ReLU), rng),
            DenseLayer::new(hidden_size, 1, Arc::new(Sigmoid), rng),
        ];
        Self { layers, input_size }
    }

    /// Build with parameters fully determined by `seed`.
    pub fn seeded(input_size: usize, hidden_size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(input_size, hidden_size, &mut rng)
    }

    /// Reassemble a network from deserialized layers.
    pub(crate) fn from_layers(layers: Vec<DenseLayer>, input_size: usize) -> Self {
        Self { layers, input_size }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.layers[0].output_size()
    }

    /// Forward pass for one row; returns the sigmoid probability.
    pub fn forward(&self, input: &[f64]) -> f64 {
        debug_assert_eq!(input.len(), self.input_size);
        let mut current = input.to_vec();
        for layer in &self.layers {
            let (_, a) = layer.forward(&current);
            current = a;
        }
        current[0]
    }

    /// Probabilities for every row of a feature matrix.
    pub fn predict(&self, features: &Matrix) -> Vec<f64> {
        features.iter().map(|row| self.forward(row)).collect()
    }

    /// Gradients of binary cross-entropy for a single sample.
    pub fn gradients(&self, input: &[f64], target: f64) -> Gradients {
        debug_assert_eq!(input.len(), self.input_size);
        // Forward cache
        let mut activations = vec![input.to_vec()];
        let mut zs: Vec<Vec<f64>> = Vec::with_capacity(self.layers.len());
        let mut current = input.to_vec();
        for layer in &self.layers {
            let (z, a) = layer.forward(&current);
            zs.push(z);
            activations.push(a.clone());
            current = a;
        }
        let prediction = current[0];

        // Backward pass
        let last = self.layers.len() - 1;
        let mut d_w: Vec<Matrix> = Vec::with_capacity(self.layers.len());
        let mut db: Vec<Vec<f64>> = Vec::with_capacity(self.layers.len());
        let mut delta: Vec<f64> = Vec::new();
        for layer_idx in (0..self.layers.len()).rev() {
            let layer = &self.layers[layer_idx];
            let z = &zs[layer_idx];
            let a_prev = &activations[layer_idx];
            // sigmoid + BCE at the output: dz = p - t
            let dz: Vec<f64> = if layer_idx == last {
                vec![prediction - target]
            } else {
                delta
                    .iter()
                    .zip(z)
                    .map(|(&d, &val)| d * layer.activation.derivative(val))
                    .collect()
            };
            // db
            db.push(dz.clone());
            // dW = dz (outer) a_prev
            let mut d_w_layer: Matrix = vec![vec![0.0; a_prev.len()]; dz.len()];
            for (i, dz_i) in dz.iter().copied().enumerate() {
                for (j, &a_prev_j) in a_prev.iter().enumerate() {
                    d_w_layer[i][j] = dz_i * a_prev_j;
                }
            }
            d_w.push(d_w_layer);
            // delta_prev = W^T * dz
            let mut delta_prev = vec![0.0; a_prev.len()];
            for (i, row) in layer.weights.iter().enumerate() {
                for (j, &w) in row.iter().enumerate() {
                    delta_prev[j] += w * dz[i];
                }
            }
            delta = delta_prev;
        }
        // reverse back to layer order
        d_w.reverse();
        db.reverse();
        Gradients { d_w, db }
    }
}

impl Gradients {
    /// Zero gradients shaped like the model.
    pub fn zeros_like(model: &ShallowNet) -> Self {
        let d_w = model
            .layers
            .iter()
            .map(|l| vec![vec![0.0; l.input_size()]; l.output_size()])
            .collect();
        let db = model
            .layers
            .iter()
            .map(|l| vec![0.0; l.output_size()])
            .collect();
        Self { d_w, db }
    }

    /// Elementwise accumulate another gradient of the same shape.
    pub fn accumulate(&mut self, other: &Gradients) {
        for (acc, g) in self.d_w.iter_mut().zip(&other.d_w) {
            for (acc_row, g_row) in acc.iter_mut().zip(g) {
                for (a, &v) in acc_row.iter_mut().zip(g_row) {
                    *a += v;
                }
            }
        }
        for (acc, g) in self.db.iter_mut().zip(&other.db) {
            for (a, &v) in acc.iter_mut().zip(g) {
                *a += v;
            }
        }
    }

    /// Scale every component, e.g. by 1/batch_len to average a batch.
    pub fn scale(&mut self, factor: f64) {
        for m in &mut self.d_w {
            for row in m {
                for v in row {
                    *v *= factor;
                }
            }
        }
        for b in &mut self.db {
            for v in b {
                *v *= factor;
            }
        }
    }
}

impl fmt::Display for ShallowNet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sizes = vec![self.input_size];
        for layer in &self.layers {
            sizes.push(layer.output_size());
        }
        write!(f, "ShallowNet: {:?}", sizes)
    }
}
