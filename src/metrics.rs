//! Metrics for evaluating binary classifiers.
use crate::error::Result;
use crate::layers::Matrix;
use crate::loss::mean_bce;
use crate::model::ShallowNet;

/// Held-out loss and accuracy for one evaluation pass.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    pub loss: f64,
    pub accuracy: f64,
}

/// Fraction of rows where the rounded probability matches the label.
pub fn accuracy(preds: &[f64], labels: &[f64]) -> f64 {
    assert_eq!(preds.len(), labels.len(), "prediction/label count mismatch");
    if preds.is_empty() {
        return 0.0;
    }
    let correct = preds
        .iter()
        .zip(labels)
        .filter(|&(&p, &t)| p.round() == t)
        .count();
    correct as f64 / preds.len() as f64
}

/// Evaluate a trained model on a held-out set. Pure; the model is unchanged.
pub fn evaluate(model: &ShallowNet, features: &Matrix, labels: &[f64]) -> Result<Evaluation> {
    let preds = model.predict(features);
    Ok(Evaluation {
        loss: mean_bce(&preds, labels)?,
        accuracy: accuracy(&preds, labels),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_rounded_predictions_match() {
        let preds = [0.9, 0.4, 0.6, 0.1];
        let labels = [1.0, 0.0, 1.0, 0.0];
        assert_eq!(accuracy(&preds, &labels), 1.0);
    }

    #[test]
    fn half_right_is_half_accuracy() {
        let preds = [0.9, 0.9];
        let labels = [1.0, 0.0];
        assert_eq!(accuracy(&preds, &labels), 0.5);
    }

    #[test]
    fn evaluate_bounds_accuracy() {
        let model = ShallowNet::seeded(3, 10, 42);
        let features = vec![vec![0.2, 0.4, 0.6], vec![0.9, 0.1, 0.5]];
        let labels = vec![1.0, 0.0];
        let eval = evaluate(&model, &features, &labels).unwrap();
        assert!((0.0..=1.0).contains(&eval.accuracy));
        assert!(eval.loss.is_finite());
    }
}
