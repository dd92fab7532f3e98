//! Environment hyperparameters: environment id, observation preprocessing
//! and action filtering

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Extra;

/// Default environment identifier
pub const DEFAULT_ENV_ID: &str = "Breakout_pygame-v0";

/// Observation preprocessing applied by the experiment.
///
/// Fields missing from an override take their literal defaults, not the
/// values of the record being replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationConfig {
    /// Normalize observation values
    pub normalize: bool,
    /// Target shape for rescaling; empty keeps the native shape
    pub rescaled_shape: Vec<usize>,
    /// Stack optical flow onto observations
    pub opt_flow: bool,
    /// Keys added by an override source
    #[serde(flatten)]
    pub extra: Extra,
}

/// Identifier of an environment action, either its index or its name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionId {
    /// Position in the environment's action set
    Index(i64),
    /// Symbolic action name
    Name(String),
}

/// Action filtering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Actions the agent may never select
    pub excluded_actions: BTreeSet<ActionId>,
    /// Keys added by an override source
    #[serde(flatten)]
    pub extra: Extra,
}

/// Environment group (`env_hparams`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvHparams {
    /// Gym or gym-ple environment id
    pub env_id: String,
    /// Observation preprocessing
    pub observation: ObservationConfig,
    /// Action filtering
    pub action: ActionConfig,
    /// Keys added by an override source
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for EnvHparams {
    fn default() -> Self {
        Self {
            env_id: DEFAULT_ENV_ID.to_string(),
            observation: ObservationConfig::default(),
            action: ActionConfig::default(),
            extra: Extra::new(),
        }
    }
}

/// Partial environment group supplied by an override source.
///
/// `observation` and `action` replace the whole sub-record when present;
/// they are never merged field by field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EnvOverride {
    /// Replacement environment id
    pub env_id: Option<String>,
    /// Replacement observation sub-record
    pub observation: Option<ObservationConfig>,
    /// Replacement action sub-record
    pub action: Option<ActionConfig>,
    /// Additional keys
    #[serde(flatten)]
    pub extra: Extra,
}

impl EnvHparams {
    /// Overwrite the keys present in `overrides`, keeping everything else
    #[must_use]
    pub fn merged_with(mut self, overrides: &EnvOverride) -> Self {
        if let Some(env_id) = &overrides.env_id {
            self.env_id.clone_from(env_id);
        }
        if let Some(observation) = &overrides.observation {
            self.observation = observation.clone();
        }
        if let Some(action) = &overrides.action {
            self.action = action.clone();
        }
        crate::merge_extra(&mut self.extra, &overrides.extra);
        self
    }
}
