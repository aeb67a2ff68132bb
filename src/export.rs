//! Model export: gzipped-JSON serialization and the quantized on-device
//! container.
//!
//! The plain format (`.fnet`) is a gzip-compressed JSON document holding every
//! layer's weights, bias, and activation kind. The quantized format (`.fnetq`)
//! re-serializes weights as symmetric per-tensor i8 with an f64 scale, which
//! shrinks the file roughly 8x; biases stay in full precision.
use crate::activations::{identify_activation_kind, Activation, ActivationKind};
use crate::error::{Error, Result};
use crate::layers::{DenseLayer, Matrix};
use crate::model::ShallowNet;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct LayerDto {
    input_size: usize,
    output_size: usize,
    weights: Vec<Vec<f64>>, // [output_size][input_size]
    bias: Vec<f64>,         // [output_size]
    activation: ActivationKind,
}

#[derive(Debug, Serialize, Deserialize)]
struct ModelDto {
    input_size: usize,
    layers: Vec<LayerDto>,
}

fn kind_of(activation: &(dyn Activation + Send + Sync)) -> Result<ActivationKind> {
    identify_activation_kind(activation).ok_or_else(|| Error::UnsupportedActivation {
        activation: format!("{activation:?}"),
    })
}

impl ModelDto {
    fn from_model(model: &ShallowNet) -> Result<Self> {
        fn sanitize_f64(x: f64) -> f64 {
            if x.is_finite() {
                x
            } else {
                0.0
            }
        }
        let layers = model
            .layers
            .iter()
            .map(|layer| {
                Ok(LayerDto {
                    input_size: layer.input_size(),
                    output_size: layer.output_size(),
                    weights: layer
                        .weights
                        .iter()
                        .map(|row| row.iter().map(|&x| sanitize_f64(x)).collect())
                        .collect(),
                    bias: layer.bias.iter().map(|&x| sanitize_f64(x)).collect(),
                    activation: kind_of(layer.activation.as_ref())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            input_size: model.input_size(),
            layers,
        })
    }

    fn into_model(self) -> ShallowNet {
        let layers = self
            .layers
            .into_iter()
            .map(|ld| DenseLayer {
                weights: ld.weights,
                bias: ld.bias,
                activation: ld.activation.to_arc(),
            })
            .collect();
        ShallowNet::from_layers(layers, self.input_size)
    }
}

fn gzip_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(value)?;
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(&json)?;
    Ok(enc.finish()?)
}

fn write_file(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    Ok(())
}

fn read_gzip_json<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let file = File::open(path)?;
    let mut dec = GzDecoder::new(file);
    let mut buf = Vec::new();
    dec.read_to_end(&mut buf)?;
    Ok(serde_json::from_slice(&buf)?)
}

/// Serialize a trained model to the portable byte format.
pub fn export_bytes(model: &ShallowNet) -> Result<Vec<u8>> {
    gzip_json(&ModelDto::from_model(model)?)
}

/// Save a trained model to a `.fnet` file.
pub fn save(model: &ShallowNet, path: impl AsRef<Path>) -> Result<()> {
    write_file(path, &export_bytes(model)?)
}

/// Load a model from a `.fnet` file.
pub fn load(path: impl AsRef<Path>) -> Result<ShallowNet> {
    let dto: ModelDto = read_gzip_json(path)?;
    Ok(dto.into_model())
}

// ============ Quantized container ============

/// One layer with symmetric per-tensor i8 weights.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuantizedLayer {
    pub scale: f64,
    pub weights: Vec<Vec<i8>>, // [output_size][input_size]
    pub bias: Vec<f64>,
    pub activation: ActivationKind,
}

/// Reduced-precision rendition of a trained model.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuantizedModel {
    pub input_size: usize,
    pub layers: Vec<QuantizedLayer>,
}

fn quantize_tensor(weights: &Matrix) -> (f64, Vec<Vec<i8>>) {
    let max_abs = weights
        .iter()
        .flatten()
        .fold(0.0f64, |acc, &w| acc.max(w.abs()));
    if max_abs == 0.0 {
        return (1.0, weights.iter().map(|row| vec![0; row.len()]).collect());
    }
    let scale = max_abs / 127.0;
    let quantized = weights
        .iter()
        .map(|row| {
            row.iter()
                .map(|&w| (w / scale).round().clamp(-127.0, 127.0) as i8)
                .collect()
        })
        .collect();
    (scale, quantized)
}

/// Quantize a trained model's weights to i8.
pub fn quantize(model: &ShallowNet) -> Result<QuantizedModel> {
    let layers = model
        .layers
        .iter()
        .map(|layer| {
            let (scale, weights) = quantize_tensor(&layer.weights);
            Ok(QuantizedLayer {
                scale,
                weights,
                bias: layer.bias.clone(),
                activation: kind_of(layer.activation.as_ref())?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(QuantizedModel {
        input_size: model.input_size(),
        layers,
    })
}

impl QuantizedModel {
    /// Expand back to a full-precision model for inference or inspection.
    /// Weights are recovered to within half a quantization step.
    pub fn to_model(&self) -> ShallowNet {
        let layers = self
            .layers
            .iter()
            .map(|ql| DenseLayer {
                weights: ql
                    .weights
                    .iter()
                    .map(|row| row.iter().map(|&q| q as f64 * ql.scale).collect())
                    .collect(),
                bias: ql.bias.clone(),
                activation: ql.activation.to_arc(),
            })
            .collect();
        ShallowNet::from_layers(layers, self.input_size)
    }
}

/// Serialize the quantized rendition to bytes.
pub fn export_quantized_bytes(model: &ShallowNet) -> Result<Vec<u8>> {
    gzip_json(&quantize(model)?)
}

/// Quantize and save to a `.fnetq` file.
pub fn save_quantized(model: &ShallowNet, path: impl AsRef<Path>) -> Result<()> {
    write_file(path, &export_quantized_bytes(model)?)
}

/// Load a quantized model from a `.fnetq` file.
pub fn load_quantized(path: impl AsRef<Path>) -> Result<QuantizedModel> {
    read_gzip_json(path)
}
