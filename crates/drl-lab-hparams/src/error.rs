//! Error types for hyperparameter resolution and experiment launch

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for resolving and launching an experiment
#[derive(Error, Debug)]
pub enum HparamsError {
    /// The `--hparams` path does not exist
    #[error("Config not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The override directory exists but holds no loadable `hparams` document
    #[error("No hparams.toml or hparams.json in {}", .0.display())]
    ModuleNotFound(PathBuf),

    /// The override document lacks one of the four groups
    #[error("Override source {} has no `{group}` group", .source_path.display())]
    MissingGroup {
        /// Group name, e.g. `env_hparams`
        group: &'static str,
        /// Document the group was expected in
        source_path: PathBuf,
    },

    /// A group contains values of an incompatible shape
    #[error("Invalid `{group}` override: {message}")]
    Shape {
        /// Group name, e.g. `nn_hparams`
        group: &'static str,
        /// Deserializer message
        message: String,
    },

    /// TOML syntax error in an override document
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON syntax or serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure raised by the experiment collaborator
    #[error("Experiment error: {0}")]
    Experiment(#[from] anyhow::Error),
}

/// Result type alias for hyperparameter operations
pub type Result<T> = std::result::Result<T, HparamsError>;
