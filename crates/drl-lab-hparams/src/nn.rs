//! Neural-network hyperparameters

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Extra;

/// One layer of the Q-network.
///
/// Layers are written in the compact list form used by hparams files:
/// `["conv", filters, kernel, stride]`, `["gap"]` or `["fc", units]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub enum LayerSpec {
    /// 2-D convolution
    Conv {
        /// Output channels
        filters: u32,
        /// Square kernel size
        kernel: u32,
        /// Stride
        stride: u32,
    },
    /// Global average pooling
    GlobalAvgPool,
    /// Fully-connected layer
    FullyConnected {
        /// Output units
        units: u32,
    },
}

impl LayerSpec {
    /// Convolution layer
    #[must_use]
    pub fn conv(filters: u32, kernel: u32, stride: u32) -> Self {
        Self::Conv { filters, kernel, stride }
    }

    /// Fully-connected layer
    #[must_use]
    pub fn fc(units: u32) -> Self {
        Self::FullyConnected { units }
    }

    /// Tag used in the compact form
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Conv { .. } => "conv",
            Self::GlobalAvgPool => "gap",
            Self::FullyConnected { .. } => "fc",
        }
    }
}

impl fmt::Display for LayerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conv { filters, kernel, stride } => {
                write!(f, "conv({filters}, {kernel}x{kernel}, stride {stride})")
            }
            Self::GlobalAvgPool => write!(f, "gap"),
            Self::FullyConnected { units } => write!(f, "fc({units})"),
        }
    }
}

/// Error raised when a compact layer list is malformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSpecError(String);

impl fmt::Display for LayerSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for LayerSpecError {}

fn layer_arg(kind: &str, args: &[Value], index: usize) -> Result<u32, LayerSpecError> {
    args.get(index)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            LayerSpecError(format!(
                "`{kind}` layer argument {index} must be a non-negative integer"
            ))
        })
}

impl TryFrom<Vec<Value>> for LayerSpec {
    type Error = LayerSpecError;

    fn try_from(value: Vec<Value>) -> Result<Self, Self::Error> {
        let (kind, args) = value
            .split_first()
            .ok_or_else(|| LayerSpecError("empty layer specification".into()))?;
        let kind = kind
            .as_str()
            .ok_or_else(|| LayerSpecError(format!("layer kind must be a string, got {kind}")))?;

        let expected = match kind {
            "conv" => 3,
            "gap" => 0,
            "fc" => 1,
            other => return Err(LayerSpecError(format!("unknown layer kind `{other}`"))),
        };
        if args.len() != expected {
            return Err(LayerSpecError(format!(
                "`{kind}` layer takes {expected} argument(s), got {}",
                args.len()
            )));
        }

        Ok(match kind {
            "conv" => Self::conv(
                layer_arg(kind, args, 0)?,
                layer_arg(kind, args, 1)?,
                layer_arg(kind, args, 2)?,
            ),
            "gap" => Self::GlobalAvgPool,
            _ => Self::fc(layer_arg(kind, args, 0)?),
        })
    }
}

impl From<LayerSpec> for Vec<Value> {
    fn from(layer: LayerSpec) -> Self {
        let mut out = vec![Value::from(layer.kind())];
        match layer {
            LayerSpec::Conv { filters, kernel, stride } => {
                out.extend([filters, kernel, stride].map(Value::from));
            }
            LayerSpec::GlobalAvgPool => {}
            LayerSpec::FullyConnected { units } => out.push(Value::from(units)),
        }
        out
    }
}

/// Neural-network group (`nn_hparams`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NnHparams {
    /// Layer stack, input side first
    pub layers: Vec<LayerSpec>,
    /// Optimizer learning rate
    pub learn_rate: f64,
    /// Optimizer name, e.g. `RMSprop` or `Adam`
    pub optimizer: String,
    /// Model to restore before training
    pub saved_model: Option<PathBuf>,
    /// Keys added by an override source
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for NnHparams {
    fn default() -> Self {
        Self {
            layers: vec![
                LayerSpec::conv(30, 8, 4),
                LayerSpec::conv(40, 4, 3),
                LayerSpec::conv(60, 3, 1),
                LayerSpec::GlobalAvgPool,
                LayerSpec::fc(512),
            ],
            learn_rate: 0.00005,
            optimizer: "RMSprop".to_string(),
            saved_model: None,
            extra: Extra::new(),
        }
    }
}

/// Partial neural-network group supplied by an override source
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NnOverride {
    /// Replacement layer stack
    pub layers: Option<Vec<LayerSpec>>,
    /// Replacement learning rate
    pub learn_rate: Option<f64>,
    /// Replacement optimizer name
    pub optimizer: Option<String>,
    /// Replacement model path; `Some(None)` clears it (JSON `null`)
    #[serde(default, deserialize_with = "crate::explicit_null")]
    pub saved_model: Option<Option<PathBuf>>,
    /// Additional keys
    #[serde(flatten)]
    pub extra: Extra,
}

impl NnHparams {
    /// Overwrite the keys present in `overrides`, keeping everything else
    #[must_use]
    pub fn merged_with(mut self, overrides: &NnOverride) -> Self {
        if let Some(layers) = &overrides.layers {
            self.layers.clone_from(layers);
        }
        if let Some(learn_rate) = overrides.learn_rate {
            self.learn_rate = learn_rate;
        }
        if let Some(optimizer) = &overrides.optimizer {
            self.optimizer.clone_from(optimizer);
        }
        if let Some(saved_model) = &overrides.saved_model {
            self.saved_model.clone_from(saved_model);
        }
        crate::merge_extra(&mut self.extra, &overrides.extra);
        self
    }
}
