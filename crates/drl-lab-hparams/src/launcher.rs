//! Resolve, optionally report, then dispatch to the experiment or skip

use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::report::{report_now, write_report};
use crate::{Experiment, FlagOverrides, HparamSet, OverrideLoader, Resolver, Result};

/// Default experiment name
pub const DEFAULT_EXPERIMENT_NAME: &str = "expt";

/// Everything the command line contributes to a launch
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchOptions {
    /// Name handed to the experiment
    pub name: String,
    /// Override source location
    pub hparams_path: Option<PathBuf>,
    /// Per-flag overrides
    pub flags: FlagOverrides,
    /// Resolve and report without dispatching
    pub dry_run: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_EXPERIMENT_NAME.to_string(),
            hparams_path: None,
            flags: FlagOverrides::default(),
            dry_run: false,
        }
    }
}

/// Terminal state of a launch
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchOutcome {
    /// The experiment was initialized and run
    Dispatched(HparamSet),
    /// Dry run: configuration resolved, experiment never constructed
    DryRunSkipped(HparamSet),
}

impl LaunchOutcome {
    /// The resolved configuration
    #[must_use]
    pub fn hparams(&self) -> &HparamSet {
        match self {
            Self::Dispatched(h) | Self::DryRunSkipped(h) => h,
        }
    }

    /// Whether the experiment ran
    #[must_use]
    pub fn dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }
}

/// Drives one launch from defaults to dispatch
pub struct Launcher<L, W> {
    resolver: Resolver<L>,
    report: W,
}

impl<L: OverrideLoader, W: Write> Launcher<L, W> {
    /// Create a launcher writing its verbose report to `report`
    pub fn new(loader: L, report: W) -> Self {
        Self {
            resolver: Resolver::new(loader),
            report,
        }
    }

    /// Resolve the configuration and hand it to the experiment built by `make`.
    ///
    /// `make` is only called when dispatching; a resolution error returns
    /// before it.
    pub fn launch<E, F>(&mut self, options: &LaunchOptions, make: F) -> Result<LaunchOutcome>
    where
        E: Experiment,
        F: FnOnce(&str) -> E,
    {
        let hparams = self
            .resolver
            .resolve(options.hparams_path.as_deref(), &options.flags)?;

        if hparams.run.verbose || options.flags.verbose {
            write_report(&mut self.report, &hparams, report_now())?;
        }

        if options.dry_run {
            info!(experiment = %options.name, "dry run; experiment not dispatched");
            return Ok(LaunchOutcome::DryRunSkipped(hparams));
        }

        let mut experiment = make(&options.name);
        experiment.init(&hparams.env, &hparams.run, &hparams.nn, &hparams.agent)?;
        info!(experiment = %options.name, "experiment initialized; running");
        experiment.run()?;

        Ok(LaunchOutcome::Dispatched(hparams))
    }

    /// Consume the launcher, returning the report sink
    pub fn into_report(self) -> W {
        self.report
    }
}
