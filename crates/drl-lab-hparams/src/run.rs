//! Run-control hyperparameters and checkpoint triggers

use serde::{Deserialize, Serialize};

use crate::Extra;

/// Default number of training steps per run
pub const DEFAULT_MAX_STEPS: u64 = 1000;

/// A point in training at which the experiment persists its state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Checkpoint {
    /// Absolute step count
    Step(u64),
    /// Fraction of `max_steps`, 0.0 being the start and 1.0 the end
    Fraction(f64),
}

impl Checkpoint {
    /// Absolute step this trigger fires at for a run of `max_steps` steps
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn at_step(self, max_steps: u64) -> u64 {
        match self {
            Self::Step(step) => step,
            Self::Fraction(fraction) => (fraction.clamp(0.0, 1.0) * max_steps as f64).round() as u64,
        }
    }
}

/// `save_at`: one checkpoint trigger or an ordered list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SaveAt {
    /// A single trigger
    One(Checkpoint),
    /// Several triggers, in order
    Many(Vec<Checkpoint>),
}

impl SaveAt {
    /// Checkpoints at the start and at the end of training, as set by `--save`
    #[must_use]
    pub fn start_and_end() -> Self {
        Self::Many(vec![Checkpoint::Fraction(0.0), Checkpoint::Fraction(1.0)])
    }

    /// All triggers in order
    #[must_use]
    pub fn checkpoints(&self) -> &[Checkpoint] {
        match self {
            Self::One(checkpoint) => std::slice::from_ref(checkpoint),
            Self::Many(checkpoints) => checkpoints,
        }
    }
}

/// Run group (`run_hparams`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunHparams {
    /// Print the resolved configuration before launching
    pub verbose: bool,
    /// When to persist state; `None` disables checkpoints
    pub save_at: Option<SaveAt>,
    /// Training steps per run
    pub max_steps: u64,
    /// Number of independent runs
    pub num_runs: u32,
    /// Keys added by an override source
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for RunHparams {
    fn default() -> Self {
        Self {
            verbose: false,
            save_at: None,
            max_steps: DEFAULT_MAX_STEPS,
            num_runs: 1,
            extra: Extra::new(),
        }
    }
}

/// Partial run group supplied by an override source
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RunOverride {
    /// Replacement verbosity
    pub verbose: Option<bool>,
    /// Replacement `save_at`; `Some(None)` clears it (JSON `null`)
    #[serde(default, deserialize_with = "crate::explicit_null")]
    pub save_at: Option<Option<SaveAt>>,
    /// Replacement step budget
    pub max_steps: Option<u64>,
    /// Replacement run count
    pub num_runs: Option<u32>,
    /// Additional keys
    #[serde(flatten)]
    pub extra: Extra,
}

impl RunHparams {
    /// Overwrite the keys present in `overrides`, keeping everything else
    #[must_use]
    pub fn merged_with(mut self, overrides: &RunOverride) -> Self {
        if let Some(verbose) = overrides.verbose {
            self.verbose = verbose;
        }
        if let Some(save_at) = &overrides.save_at {
            self.save_at = save_at.clone();
        }
        if let Some(max_steps) = overrides.max_steps {
            self.max_steps = max_steps;
        }
        if let Some(num_runs) = overrides.num_runs {
            self.num_runs = num_runs;
        }
        crate::merge_extra(&mut self.extra, &overrides.extra);
        self
    }
}
