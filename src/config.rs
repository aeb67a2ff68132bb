//! Run configuration: the four knobs a training run takes from outside.
use crate::error::{Error, Result};
use serde::Deserialize;

/// Immutable parameters of one training run. Defaults mirror the training
/// scripts: batch size 32, 10 epochs, seed 42, initial rate 0.001.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub batch_size: usize,
    pub epochs: usize,
    pub seed: u64,
    pub learning_rate: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: 32,
            epochs: 10,
            seed: 42,
            learning_rate: 1e-3,
        }
    }
}

impl RunConfig {
    /// Reject parameter values a run cannot proceed with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::config("batch_size", self.batch_size));
        }
        if self.epochs == 0 {
            return Err(Error::config("epochs", self.epochs));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::config("learning_rate", self.learning_rate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        RunConfig::default().validate().unwrap();
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: RunConfig = serde_json::from_str(r#"{"epochs": 30}"#).unwrap();
        assert_eq!(config.epochs, 30);
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.seed, 42);
        assert_eq!(config.learning_rate, 1e-3);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let config = RunConfig {
            batch_size: 0,
            ..RunConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Config { name: "batch_size", .. })
        ));
    }

    #[test]
    fn zero_epochs_is_rejected() {
        let config = RunConfig {
            epochs: 0,
            ..RunConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Config { name: "epochs", .. })
        ));
    }

    #[test]
    fn non_positive_learning_rate_is_rejected() {
        let config = RunConfig {
            learning_rate: 0.0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
