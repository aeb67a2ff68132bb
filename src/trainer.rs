//! Mini-batch training loop for the shallow classifier.
//!
//! One run is `epochs` passes over the training rows, each pass split into
//! `ceil(n / batch_size)` contiguous batches (the last batch may be short).
//! Every batch contributes one optimizer step at the schedule's rate for that
//! step; every epoch ends with a validation pass and an observer callback.
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::layers::Matrix;
use crate::loss::binary_cross_entropy;
use crate::metrics;
use crate::model::{Gradients, ShallowNet};
use crate::optimizer::AdamW;
use crate::schedule::LrSchedule;

/// What one epoch produced. `epoch` is 1-based, as in the run logs.
#[derive(Debug, Clone, Copy)]
pub struct EpochStats {
    pub epoch: usize,
    pub train_loss: f64,
    pub val_loss: f64,
    pub val_accuracy: f64,
    /// Effective rate after the epoch's last step, as a schedule query.
    pub learning_rate: f64,
}

/// Invoked synchronously after each epoch's validation pass.
pub trait EpochObserver {
    fn on_epoch_end(&mut self, stats: &EpochStats);
}

impl<F: FnMut(&EpochStats)> EpochObserver for F {
    fn on_epoch_end(&mut self, stats: &EpochStats) {
        self(stats)
    }
}

/// Runs mini-batch gradient descent with a learning-rate schedule.
#[derive(Debug)]
pub struct Trainer<S: LrSchedule> {
    batch_size: usize,
    epochs: usize,
    schedule: S,
}

impl<S: LrSchedule> Trainer<S> {
    pub fn new(config: &RunConfig, schedule: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            batch_size: config.batch_size,
            epochs: config.epochs,
            schedule,
        })
    }

    /// Train `model` in place. Returns per-epoch statistics; any NaN or
    /// infinite batch loss aborts immediately with [`Error::Numeric`].
    pub fn fit(
        &self,
        model: &mut ShallowNet,
        optimizer: &mut AdamW,
        train_features: &Matrix,
        train_labels: &[f64],
        val_features: &Matrix,
        val_labels: &[f64],
        observer: &mut dyn EpochObserver,
    ) -> Result<Vec<EpochStats>> {
        let n = train_features.len();
        if n == 0 {
            return Err(Error::config("train_rows", 0));
        }
        assert_eq!(n, train_labels.len(), "feature/label count mismatch");

        let mut history = Vec::with_capacity(self.epochs);
        let mut step: u64 = 0;
        for epoch in 1..=self.epochs {
            let mut epoch_loss = 0.0;
            let mut start = 0;
            while start < n {
                let end = (start + self.batch_size).min(n);
                let batch_len = (end - start) as f64;

                let mut batch_grads = Gradients::zeros_like(model);
                let mut batch_loss = 0.0;
                for idx in start..end {
                    let input = &train_features[idx];
                    let target = train_labels[idx];
                    batch_loss += binary_cross_entropy(model.forward(input), target);
                    batch_grads.accumulate(&model.gradients(input, target));
                }
                if !batch_loss.is_finite() {
                    return Err(Error::Numeric {
                        context: format!("epoch {epoch}, step {step}"),
                    });
                }
                batch_grads.scale(1.0 / batch_len);
                epoch_loss += batch_loss;

                optimizer.step(model, &batch_grads, self.schedule.rate(step));
                step += 1;
                start = end;
            }

            let val = metrics::evaluate(model, val_features, val_labels)?;
            let stats = EpochStats {
                epoch,
                train_loss: epoch_loss / n as f64,
                val_loss: val.loss,
                val_accuracy: val.accuracy,
                learning_rate: self.schedule.rate(step),
            };
            tracing::info!(
                epoch = stats.epoch,
                train_loss = stats.train_loss,
                val_loss = stats.val_loss,
                val_accuracy = stats.val_accuracy,
                learning_rate = stats.learning_rate,
                "epoch complete"
            );
            observer.on_epoch_end(&stats);
            history.push(stats);
        }
        Ok(history)
    }
}
