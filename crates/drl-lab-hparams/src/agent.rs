//! Agent hyperparameters for the DQN learner

use serde::{Deserialize, Serialize};

use crate::Extra;

/// Agent group (`agent_hparams`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentHparams {
    /// Discount factor, in [0, 1]
    pub reward_decay: f64,
    /// Exploration rate at the start of training
    pub initial_epsilon: f64,
    /// Exploration rate at the end of the schedule
    pub final_epsilon: f64,
    /// Replay minibatch size
    pub batch_size: u32,
    /// Steps between target-network syncs
    pub target_q_network_update_freq: u32,
    /// Keys added by an override source
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for AgentHparams {
    fn default() -> Self {
        Self {
            reward_decay: 0.99,
            initial_epsilon: 1.0,
            final_epsilon: 0.1,
            batch_size: 32,
            target_q_network_update_freq: 10,
            extra: Extra::new(),
        }
    }
}

/// Partial agent group supplied by an override source
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgentOverride {
    /// Replacement discount factor
    pub reward_decay: Option<f64>,
    /// Replacement initial exploration rate
    pub initial_epsilon: Option<f64>,
    /// Replacement final exploration rate
    pub final_epsilon: Option<f64>,
    /// Replacement minibatch size
    pub batch_size: Option<u32>,
    /// Replacement target sync interval
    pub target_q_network_update_freq: Option<u32>,
    /// Additional keys
    #[serde(flatten)]
    pub extra: Extra,
}

impl AgentHparams {
    /// Overwrite the keys present in `overrides`, keeping everything else
    #[must_use]
    pub fn merged_with(mut self, overrides: &AgentOverride) -> Self {
        if let Some(v) = overrides.reward_decay {
            self.reward_decay = v;
        }
        if let Some(v) = overrides.initial_epsilon {
            self.initial_epsilon = v;
        }
        if let Some(v) = overrides.final_epsilon {
            self.final_epsilon = v;
        }
        if let Some(v) = overrides.batch_size {
            self.batch_size = v;
        }
        if let Some(v) = overrides.target_q_network_update_freq {
            self.target_q_network_update_freq = v;
        }
        crate::merge_extra(&mut self.extra, &overrides.extra);
        self
    }
}
