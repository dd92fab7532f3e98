// drl-lab launcher argument surface

use std::path::PathBuf;

use clap::Parser;
use drl_lab_hparams::{FlagOverrides, LaunchOptions};

#[derive(Parser, Debug)]
#[command(name = "drlctl")]
#[command(about = "Resolve drl-lab hyperparameters and launch an experiment", version)]
pub struct Cli {
    /// Experiment name
    #[arg(long, default_value = "expt")]
    pub name: String,

    /// Directory holding hparams.toml or hparams.json (or the file itself)
    #[arg(long)]
    pub hparams: Option<PathBuf>,

    /// Environment id of gym or gym-ple
    #[arg(long)]
    pub env_id: Option<String>,

    /// Enable observation normalization
    #[arg(long = "obs-normailize")]
    pub obs_normailize: bool,

    /// Enable observation opt-flow
    #[arg(long)]
    pub obs_opt_flow: bool,

    /// Specify max_steps
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Enable verbose
    #[arg(short, long)]
    pub verbose: bool,

    /// Specify num_runs
    #[arg(long)]
    pub num_runs: Option<u32>,

    /// Save checkpoints at the start and the end of training
    #[arg(short, long)]
    pub save: bool,

    /// Path to saved model
    #[arg(long)]
    pub saved_model: Option<PathBuf>,

    /// Specify learn_rate (integer)
    #[arg(long, allow_negative_numbers = true)]
    pub learn_rate: Option<i64>,

    /// Specify optimizer (RMSprop, Adam)
    #[arg(long)]
    pub optimizer: Option<String>,

    /// Dry run
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn flags(&self) -> FlagOverrides {
        FlagOverrides {
            env_id: self.env_id.clone(),
            obs_normalize: self.obs_normailize,
            obs_opt_flow: self.obs_opt_flow,
            max_steps: self.max_steps,
            verbose: self.verbose,
            save: self.save,
            num_runs: self.num_runs,
            saved_model: self.saved_model.clone(),
            learn_rate: self.learn_rate,
            optimizer: self.optimizer.clone(),
        }
    }

    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            name: self.name.clone(),
            hparams_path: self.hparams.clone(),
            flags: self.flags(),
            dry_run: self.dry_run,
        }
    }
}
