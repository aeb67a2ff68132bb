use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Trait for activation functions.
pub trait Activation: fmt::Debug + Send + Sync + Any {
    fn apply(&self, x: f64) -> f64;
    fn derivative(&self, x: f64) -> f64;
}

/// ReLU: max(0, x)
#[derive(Debug, Clone, Default)]
pub struct ReLU;

impl Activation for ReLU {
    fn apply(&self, x: f64) -> f64 {
        x.max(0.0)
    }
    fn derivative(&self, x: f64) -> f64 {
        (x > 0.0) as u8 as f64
    }
}

/// Sigmoid: 1 / (1 + exp(-x))
#[derive(Debug, Clone, Default)]
pub struct Sigmoid;

impl Activation for Sigmoid {
    fn apply(&self, x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }
    fn derivative(&self, x: f64) -> f64 {
        let s = self.apply(x);
        s * (1.0 - s)
    }
}

/// Linear: identity
#[derive(Debug, Clone, Default)]
pub struct Linear;

impl Activation for Linear {
    fn apply(&self, x: f64) -> f64 {
        x
    }
    fn derivative(&self, _x: f64) -> f64 {
        1.0
    }
}

/// Serializable activation kinds for persistence
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActivationKind {
    ReLU,
    Sigmoid,
    Linear,
}

impl ActivationKind {
    pub fn to_arc(&self) -> std::sync::Arc<dyn Activation + Send + Sync> {
        use std::sync::Arc;
        match self {
            ActivationKind::ReLU => Arc::new(ReLU),
            ActivationKind::Sigmoid => Arc::new(Sigmoid),
            ActivationKind::Linear => Arc::new(Linear),
        }
    }
}

/// Identify the serializable kind of an activation trait object. Returns
/// `None` for an activation outside the kinds this crate builds with, so a
/// caller serializes nothing rather than a wrong model.
pub fn identify_activation_kind(a: &(dyn Activation + Send + Sync)) -> Option<ActivationKind> {
    let any = a as &dyn Any;
    if any.is::<ReLU>() {
        return Some(ActivationKind::ReLU);
    }
    if any.is::<Sigmoid>() {
        return Some(ActivationKind::Sigmoid);
    }
    if any.is::<Linear>() {
        return Some(ActivationKind::Linear);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn relu_clamps_negatives() {
        assert_eq!(ReLU.apply(-2.0), 0.0);
        assert_eq!(ReLU.apply(3.5), 3.5);
        assert_eq!(ReLU.derivative(-1.0), 0.0);
        assert_eq!(ReLU.derivative(1.0), 1.0);
    }

    #[test]
    fn sigmoid_is_centered_and_bounded() {
        assert_abs_diff_eq!(Sigmoid.apply(0.0), 0.5, epsilon = 1e-12);
        assert!(Sigmoid.apply(20.0) > 0.999);
        assert!(Sigmoid.apply(-20.0) < 0.001);
    }

    #[test]
    fn kind_round_trips_through_trait_object() {
        for kind in [ActivationKind::ReLU, ActivationKind::Sigmoid, ActivationKind::Linear] {
            assert_eq!(identify_activation_kind(kind.to_arc().as_ref()), Some(kind));
        }
    }

    #[test]
    fn unknown_activation_has_no_kind() {
        #[derive(Debug)]
        struct Tanh;
        impl Activation for Tanh {
            fn apply(&self, x: f64) -> f64 {
                x.tanh()
            }
            fn derivative(&self, x: f64) -> f64 {
                1.0 - x.tanh().powi(2)
            }
        }
        assert_eq!(identify_activation_kind(&Tanh), None);
    }
}
