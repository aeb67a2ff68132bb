//! Learning-rate schedules.
//!
//! A schedule maps an optimization step index to a rate. Queries are pure, so
//! the trainer can read the effective rate for logging without advancing any
//! state.
use std::f64::consts::PI;

/// Per-step learning rate policy.
pub trait LrSchedule: Send + Sync {
    /// Rate to use at the given 0-indexed optimization step.
    fn rate(&self, step: u64) -> f64;
}

/// The initial rate at every step.
#[derive(Debug, Clone, Copy)]
pub struct Constant {
    pub rate: f64,
}

impl Constant {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl LrSchedule for Constant {
    fn rate(&self, _step: u64) -> f64 {
        self.rate
    }
}

/// Half-cosine decay from an initial rate to zero over a fixed step budget:
/// `r0 · 0.5 · (1 + cos(π·t/T))`. Steps at or past the budget get rate 0;
/// a zero budget degenerates to the initial rate.
#[derive(Debug, Clone, Copy)]
pub struct CosineDecay {
    initial: f64,
    total_steps: u64,
}

impl CosineDecay {
    pub fn new(initial: f64, total_steps: u64) -> Self {
        Self {
            initial,
            total_steps,
        }
    }
}

impl LrSchedule for CosineDecay {
    fn rate(&self, step: u64) -> f64 {
        if self.total_steps == 0 {
            return self.initial;
        }
        if step >= self.total_steps {
            return 0.0;
        }
        let progress = step as f64 / self.total_steps as f64;
        self.initial * 0.5 * (1.0 + (PI * progress).cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn constant_returns_initial_rate_everywhere() {
        let schedule = Constant::new(1e-3);
        for step in [0, 1, 100, 1_000_000] {
            assert_eq!(schedule.rate(step), 1e-3);
        }
    }

    #[test]
    fn cosine_starts_at_initial_and_ends_at_zero() {
        let schedule = CosineDecay::new(1e-3, 1000);
        assert_abs_diff_eq!(schedule.rate(0), 1e-3, epsilon = 1e-15);
        assert_eq!(schedule.rate(1000), 0.0);
        assert_eq!(schedule.rate(5000), 0.0);
    }

    #[test]
    fn cosine_midpoint_is_half_the_initial_rate() {
        let schedule = CosineDecay::new(2e-3, 1000);
        assert_abs_diff_eq!(schedule.rate(500), 1e-3, epsilon = 1e-12);
    }

    #[test]
    fn cosine_is_monotone_decreasing() {
        let schedule = CosineDecay::new(1e-3, 100);
        let mut prev = f64::INFINITY;
        for step in 0..=100 {
            let rate = schedule.rate(step);
            assert!(rate <= prev);
            prev = rate;
        }
    }

    #[test]
    fn zero_step_budget_returns_initial_rate() {
        let schedule = CosineDecay::new(1e-3, 0);
        assert_eq!(schedule.rate(0), 1e-3);
        assert_eq!(schedule.rate(7), 1e-3);
    }
}
