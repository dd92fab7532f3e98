//! The resolved hyperparameter set and its override counterpart

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    AgentHparams, AgentOverride, EnvHparams, EnvOverride, HparamsError, NnHparams, NnOverride,
    Result, RunHparams, RunOverride,
};

/// Keys an override source adds beyond the defaults
pub type Extra = serde_json::Map<String, Value>;

/// Names of the four groups, in dump order
pub const GROUP_NAMES: [&str; 4] = ["env_hparams", "run_hparams", "nn_hparams", "agent_hparams"];

pub(crate) fn merge_extra(base: &mut Extra, overrides: &Extra) {
    for (key, value) in overrides {
        base.insert(key.clone(), value.clone());
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`)
pub(crate) fn explicit_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// All four hyperparameter groups handed to the experiment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HparamSet {
    /// Environment group
    #[serde(rename = "env_hparams")]
    pub env: EnvHparams,
    /// Run-control group
    #[serde(rename = "run_hparams")]
    pub run: RunHparams,
    /// Neural-network group
    #[serde(rename = "nn_hparams")]
    pub nn: NnHparams,
    /// Agent group
    #[serde(rename = "agent_hparams")]
    pub agent: AgentHparams,
}

/// Partial versions of all four groups, as produced by an override source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HparamOverrides {
    /// Environment overrides
    pub env: EnvOverride,
    /// Run-control overrides
    pub run: RunOverride,
    /// Neural-network overrides
    pub nn: NnOverride,
    /// Agent overrides
    pub agent: AgentOverride,
}

fn group<T: DeserializeOwned>(
    doc: &mut serde_json::Map<String, Value>,
    name: &'static str,
    source_path: &Path,
) -> Result<T> {
    let value = doc.remove(name).ok_or_else(|| HparamsError::MissingGroup {
        group: name,
        source_path: source_path.to_path_buf(),
    })?;
    serde_json::from_value(value).map_err(|e| HparamsError::Shape {
        group: name,
        message: e.to_string(),
    })
}

impl HparamOverrides {
    /// Build overrides from a parsed document holding the four group tables.
    ///
    /// Every group must be present, even if empty. Top-level keys other than
    /// the four groups are ignored.
    pub fn from_document(doc: Value, source_path: &Path) -> Result<Self> {
        let mut doc = match doc {
            Value::Object(doc) => doc,
            other => {
                return Err(HparamsError::Shape {
                    group: "hparams",
                    message: format!("expected a table of groups, got {other}"),
                })
            }
        };

        Ok(Self {
            env: group(&mut doc, "env_hparams", source_path)?,
            run: group(&mut doc, "run_hparams", source_path)?,
            nn: group(&mut doc, "nn_hparams", source_path)?,
            agent: group(&mut doc, "agent_hparams", source_path)?,
        })
    }
}

impl HparamSet {
    /// Apply a shallow, per-key merge of `overrides` onto every group
    #[must_use]
    pub fn merged_with(self, overrides: &HparamOverrides) -> Self {
        Self {
            env: self.env.merged_with(&overrides.env),
            run: self.run.merged_with(&overrides.run),
            nn: self.nn.merged_with(&overrides.nn),
            agent: self.agent.merged_with(&overrides.agent),
        }
    }

    /// Values that are accepted but unlikely to be intended.
    ///
    /// Nothing here rejects a configuration; the caller decides whether to log.
    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut notes = Vec::new();
        let agent = &self.agent;

        for (name, value) in [
            ("reward_decay", agent.reward_decay),
            ("initial_epsilon", agent.initial_epsilon),
            ("final_epsilon", agent.final_epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                notes.push(format!("agent_hparams.{name} = {value} is outside [0, 1]"));
            }
        }
        if agent.initial_epsilon < agent.final_epsilon {
            notes.push(format!(
                "agent_hparams.initial_epsilon ({}) is below final_epsilon ({})",
                agent.initial_epsilon, agent.final_epsilon
            ));
        }
        if agent.batch_size == 0 {
            notes.push("agent_hparams.batch_size is 0".to_string());
        }
        if agent.target_q_network_update_freq == 0 {
            notes.push("agent_hparams.target_q_network_update_freq is 0".to_string());
        }
        if self.run.num_runs == 0 {
            notes.push("run_hparams.num_runs is 0; nothing will run".to_string());
        }
        if let Some(save_at) = &self.run.save_at {
            for checkpoint in save_at.checkpoints() {
                if let crate::Checkpoint::Fraction(f) = checkpoint {
                    if !(0.0..=1.0).contains(f) {
                        notes.push(format!("run_hparams.save_at fraction {f} is outside [0, 1]"));
                    }
                }
            }
        }
        if self.nn.learn_rate <= 0.0 {
            notes.push(format!("nn_hparams.learn_rate = {} is not positive", self.nn.learn_rate));
        }

        notes
    }
}
