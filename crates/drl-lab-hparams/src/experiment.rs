//! The experiment collaborator boundary

use anyhow::{bail, Result};
use tracing::info;

use crate::{AgentHparams, EnvHparams, HparamSet, NnHparams, RunHparams};

/// An experiment driven by resolved hyperparameters.
///
/// The launcher calls [`Experiment::init`] once with the four groups, then
/// [`Experiment::run`] once. Training itself lives behind this trait.
pub trait Experiment {
    /// Prepare the environment, network and agent
    fn init(
        &mut self,
        env: &EnvHparams,
        run: &RunHparams,
        nn: &NnHparams,
        agent: &AgentHparams,
    ) -> Result<()>;

    /// Execute all runs
    fn run(&mut self) -> Result<()>;
}

impl<E: Experiment + ?Sized> Experiment for Box<E> {
    fn init(
        &mut self,
        env: &EnvHparams,
        run: &RunHparams,
        nn: &NnHparams,
        agent: &AgentHparams,
    ) -> Result<()> {
        (**self).init(env, run, nn, agent)
    }

    fn run(&mut self) -> Result<()> {
        (**self).run()
    }
}

/// Experiment that records the hand-off and logs it.
///
/// Used when no training backend is linked into the launcher.
#[derive(Debug, Clone)]
pub struct LoggingExperiment {
    name: String,
    hparams: Option<HparamSet>,
    runs_started: u32,
}

impl LoggingExperiment {
    /// Create a named experiment
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hparams: None,
            runs_started: 0,
        }
    }

    /// Experiment name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hyperparameters received by `init`
    #[must_use]
    pub fn hparams(&self) -> Option<&HparamSet> {
        self.hparams.as_ref()
    }

    /// Number of runs `run` has walked through
    #[must_use]
    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }
}

impl Experiment for LoggingExperiment {
    fn init(
        &mut self,
        env: &EnvHparams,
        run: &RunHparams,
        nn: &NnHparams,
        agent: &AgentHparams,
    ) -> Result<()> {
        let layers = nn
            .layers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        let checkpoints = run
            .save_at
            .as_ref()
            .map(|s| s.checkpoints().iter().map(|c| c.at_step(run.max_steps)).collect::<Vec<_>>())
            .unwrap_or_default();

        info!(
            experiment = %self.name,
            env_id = %env.env_id,
            layers = %layers,
            optimizer = %nn.optimizer,
            learn_rate = nn.learn_rate,
            epsilon = ?(agent.initial_epsilon, agent.final_epsilon),
            checkpoints = ?checkpoints,
            "experiment initialized"
        );

        self.hparams = Some(HparamSet {
            env: env.clone(),
            run: run.clone(),
            nn: nn.clone(),
            agent: agent.clone(),
        });
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        let Some(hparams) = &self.hparams else {
            bail!("experiment `{}` was run before init", self.name);
        };

        for index in 1..=hparams.run.num_runs {
            info!(
                experiment = %self.name,
                run = index,
                of = hparams.run.num_runs,
                max_steps = hparams.run.max_steps,
                "run requested; no training backend linked"
            );
            self.runs_started += 1;
        }
        Ok(())
    }
}
