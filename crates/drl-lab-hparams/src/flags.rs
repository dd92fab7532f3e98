//! Command-line overrides, applied after any file override

use std::path::PathBuf;

use crate::{HparamSet, SaveAt};

/// Per-flag overrides collected from the command line.
///
/// Each field maps to exactly one key; `None`/`false` leaves the key as the
/// earlier passes resolved it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagOverrides {
    /// `--env-id`
    pub env_id: Option<String>,
    /// `--obs-normailize`. Accepted but never applied.
    pub obs_normalize: bool,
    /// `--obs-opt-flow`; can only switch optical flow on
    pub obs_opt_flow: bool,
    /// `--max-steps`
    pub max_steps: Option<u64>,
    /// `-v/--verbose`; can only switch verbosity on
    pub verbose: bool,
    /// `-s/--save`; checkpoints at start and end
    pub save: bool,
    /// `--num-runs`
    pub num_runs: Option<u32>,
    /// `--saved-model`
    pub saved_model: Option<PathBuf>,
    /// `--learn-rate`, parsed as an integer
    pub learn_rate: Option<i64>,
    /// `--optimizer`
    pub optimizer: Option<String>,
}

impl FlagOverrides {
    /// Apply the flags to a resolved set and return the result
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn apply(&self, mut hparams: HparamSet) -> HparamSet {
        if let Some(env_id) = &self.env_id {
            hparams.env.env_id.clone_from(env_id);
        }
        if self.obs_opt_flow {
            hparams.env.observation.opt_flow = true;
        }
        if let Some(max_steps) = self.max_steps {
            hparams.run.max_steps = max_steps;
        }
        if self.verbose {
            hparams.run.verbose = true;
        }
        if self.save {
            hparams.run.save_at = Some(SaveAt::start_and_end());
        }
        if let Some(num_runs) = self.num_runs {
            hparams.run.num_runs = num_runs;
        }
        if let Some(saved_model) = &self.saved_model {
            hparams.nn.saved_model = Some(saved_model.clone());
        }
        if let Some(learn_rate) = self.learn_rate {
            hparams.nn.learn_rate = learn_rate as f64;
        }
        if let Some(optimizer) = &self.optimizer {
            hparams.nn.optimizer.clone_from(optimizer);
        }
        hparams
    }
}
