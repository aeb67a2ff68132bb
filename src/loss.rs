//! Loss functions for training neural networks.
use crate::error::{Error, Result};

const EPS: f64 = 1e-12;

/// Binary cross-entropy for one prediction/label pair. The prediction is
/// clamped away from 0 and 1 so the logs stay finite.
pub fn binary_cross_entropy(pred: f64, target: f64) -> f64 {
    let p = pred.clamp(EPS, 1.0 - EPS);
    -(target * p.ln() + (1.0 - target) * (1.0 - p).ln())
}

/// Mean binary cross-entropy over a prediction vector.
///
/// A non-finite mean (a NaN prediction slipped through) surfaces as
/// [`Error::Numeric`] rather than propagating silently.
pub fn mean_bce(preds: &[f64], targets: &[f64]) -> Result<f64> {
    assert_eq!(preds.len(), targets.len(), "prediction/label count mismatch");
    if preds.is_empty() {
        return Ok(0.0);
    }
    let sum: f64 = preds
        .iter()
        .zip(targets)
        .map(|(&p, &t)| binary_cross_entropy(p, t))
        .sum();
    let mean = sum / preds.len() as f64;
    if !mean.is_finite() {
        return Err(Error::Numeric {
            context: "mean binary cross-entropy".into(),
        });
    }
    Ok(mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn confident_correct_prediction_has_small_loss() {
        assert!(binary_cross_entropy(0.99, 1.0) < 0.02);
        assert!(binary_cross_entropy(0.01, 0.0) < 0.02);
    }

    #[test]
    fn half_prediction_is_ln_two() {
        let loss = binary_cross_entropy(0.5, 1.0);
        assert_abs_diff_eq!(loss, std::f64::consts::LN_2, epsilon = 1e-12);
    }

    #[test]
    fn extreme_predictions_stay_finite() {
        assert!(binary_cross_entropy(0.0, 1.0).is_finite());
        assert!(binary_cross_entropy(1.0, 0.0).is_finite());
    }

    #[test]
    fn nan_prediction_is_a_numeric_error() {
        let err = mean_bce(&[f64::NAN], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::Numeric { .. }));
    }

    #[test]
    fn mean_over_pairs() {
        let preds = [0.9, 0.1];
        let targets = [1.0, 0.0];
        let expected = (binary_cross_entropy(0.9, 1.0) + binary_cross_entropy(0.1, 0.0)) / 2.0;
        assert_abs_diff_eq!(mean_bce(&preds, &targets).unwrap(), expected, epsilon = 1e-12);
    }
}
