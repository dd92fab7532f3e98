//! Defaults, then the file override, then command-line flags

use std::path::Path;

use tracing::{debug, warn};

use crate::{FlagOverrides, HparamSet, OverrideLoader, Result};

/// Merges the three configuration sources with last-writer-wins precedence
pub struct Resolver<L> {
    loader: L,
}

impl<L: OverrideLoader> Resolver<L> {
    /// Create a resolver that locates override sources through `loader`
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Resolve the final hyperparameter set.
    ///
    /// A failing override source aborts before any flag is applied.
    pub fn resolve(&self, hparams_path: Option<&Path>, flags: &FlagOverrides) -> Result<HparamSet> {
        let mut hparams = HparamSet::default();
        debug!("defaults loaded");

        if let Some(path) = hparams_path {
            let provider = self.loader.load(path)?;
            let overrides = provider.overrides()?;
            hparams = hparams.merged_with(&overrides);
            debug!(source = %provider.source(), "file overrides applied");
        }

        let hparams = flags.apply(hparams);
        debug!("command-line overrides applied");

        for note in hparams.advisories() {
            warn!("{note}");
        }
        Ok(hparams)
    }
}
