//! AdamW optimizer: adaptive moments with decoupled weight decay.
use crate::model::{Gradients, ShallowNet};

/// AdamW step rule. First/second moment buffers are shaped like the model's
/// parameters at construction and advance once per [`AdamW::step`]. With
/// `weight_decay = 0` this is plain Adam.
#[derive(Debug)]
pub struct AdamW {
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    weight_decay: f64,
    /// Completed steps, for bias correction.
    t: u64,
    m: Gradients,
    v: Gradients,
}

impl AdamW {
    /// Buffers shaped like `model`, Keras-style defaults
    /// (β1 0.9, β2 0.999, ε 1e-7).
    pub fn new(model: &ShallowNet, weight_decay: f64) -> Self {
        Self {
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-7,
            weight_decay,
            t: 0,
            m: Gradients::zeros_like(model),
            v: Gradients::zeros_like(model),
        }
    }

    /// One parameter update at the given learning rate.
    ///
    /// `grads` must be shaped like `model` (a batch-averaged gradient from the
    /// trainer). Weight decay applies to weights only, not biases.
    pub fn step(&mut self, model: &mut ShallowNet, grads: &Gradients, lr: f64) {
        self.t += 1;
        let bias1 = 1.0 - self.beta1.powi(self.t as i32);
        let bias2 = 1.0 - self.beta2.powi(self.t as i32);

        for (layer_idx, layer) in model.layers.iter_mut().enumerate() {
            for (i, row) in layer.weights.iter_mut().enumerate() {
                for (j, w) in row.iter_mut().enumerate() {
                    let g = grads.d_w[layer_idx][i][j];
                    let m = &mut self.m.d_w[layer_idx][i][j];
                    let v = &mut self.v.d_w[layer_idx][i][j];
                    *m = self.beta1 * *m + (1.0 - self.beta1) * g;
                    *v = self.beta2 * *v + (1.0 - self.beta2) * g * g;
                    let m_hat = *m / bias1;
                    let v_hat = *v / bias2;
                    *w -= lr * (m_hat / (v_hat.sqrt() + self.epsilon) + self.weight_decay * *w);
                }
            }
            for (i, b) in layer.bias.iter_mut().enumerate() {
                let g = grads.db[layer_idx][i];
                let m = &mut self.m.db[layer_idx][i];
                let v = &mut self.v.db[layer_idx][i];
                *m = self.beta1 * *m + (1.0 - self.beta1) * g;
                *v = self.beta2 * *v + (1.0 - self.beta2) * g * g;
                let m_hat = *m / bias1;
                let v_hat = *v / bias2;
                *b -= lr * m_hat / (v_hat.sqrt() + self.epsilon);
            }
        }
    }

    pub fn steps_taken(&self) -> u64 {
        self.t
    }
}
