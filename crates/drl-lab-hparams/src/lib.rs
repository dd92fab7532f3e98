//! Hyperparameter resolution and experiment launch for drl-lab
//!
//! Four typed groups (environment, run, neural network, agent) start from
//! fixed defaults, take a shallow per-key merge from an optional override
//! document, then take command-line flags. The resolved set is handed to an
//! [`Experiment`] unless the launch is a dry run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod env;
pub mod error;
pub mod experiment;
pub mod flags;
pub mod hparams;
pub mod launcher;
pub mod nn;
pub mod provider;
pub mod report;
pub mod resolver;
pub mod run;

pub use agent::{AgentHparams, AgentOverride};
pub use env::{ActionConfig, ActionId, EnvHparams, EnvOverride, ObservationConfig};
pub use error::{HparamsError, Result};
pub use experiment::{Experiment, LoggingExperiment};
pub use flags::FlagOverrides;
pub use hparams::{Extra, HparamOverrides, HparamSet, GROUP_NAMES};
pub use launcher::{LaunchOptions, LaunchOutcome, Launcher};
pub use nn::{LayerSpec, NnHparams, NnOverride};
pub use provider::{FsOverrideLoader, OverrideFile, OverrideLoader, OverrideProvider};
pub use resolver::Resolver;
pub use run::{Checkpoint, RunHparams, RunOverride, SaveAt};

pub(crate) use hparams::{explicit_null, merge_extra};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Experiment, FlagOverrides, FsOverrideLoader, HparamSet, LaunchOptions, LaunchOutcome,
        Launcher, Result,
    };
}
