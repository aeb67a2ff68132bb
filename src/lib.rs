//! Training for small binary-classification networks: a fire/smoke detector
//! from sensor readings and a synthetic analog, exported to a portable
//! on-device format.
//!
//! - Deterministic dataset splitting and named-column feature extraction
//! - Shallow relu/sigmoid network with mini-batch AdamW training
//! - Constant and cosine-decay learning-rate schedules
//! - Gzipped-JSON export plus an i8-quantized rendition

pub mod activations;
pub mod config;
pub mod error;
pub mod export;
pub mod layers;
pub mod loss;
pub mod metrics;
pub mod model;
pub mod optimizer;
pub mod schedule;
pub mod split;
pub mod table;
pub mod trainer;

pub use activations::{Activation, ActivationKind, Linear, ReLU, Sigmoid};
pub use config::RunConfig;
pub use error::{Error, Result};
pub use layers::{DenseLayer, Matrix};
pub use loss::{binary_cross_entropy, mean_bce};
pub use metrics::{accuracy, evaluate, Evaluation};
pub use model::{Gradients, ShallowNet};
pub use optimizer::AdamW;
pub use schedule::{Constant, CosineDecay, LrSchedule};
pub use split::{split, Split, SplitFractions, TestRange};
pub use table::{generate_synthetic, Table};
pub use trainer::{EpochObserver, EpochStats, Trainer};
