// drl-lab launcher
// Resolves hyperparameters and hands them to an experiment

use anyhow::{Context, Result};
use clap::Parser;
use drl_lab_hparams::{FsOverrideLoader, LaunchOutcome, Launcher, LoggingExperiment};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

fn init_tracing(verbose: bool) {
    let directive = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = cli.launch_options();
    let mut launcher = Launcher::new(FsOverrideLoader, std::io::stdout().lock());

    let outcome = launcher
        .launch(&options, |name: &str| LoggingExperiment::new(name))
        .with_context(|| format!("Failed to launch experiment `{}`", options.name))?;

    match outcome {
        LaunchOutcome::Dispatched(_) => tracing::info!(experiment = %options.name, "finished"),
        LaunchOutcome::DryRunSkipped(_) => tracing::info!(experiment = %options.name, "dry run complete"),
    }

    Ok(())
}
