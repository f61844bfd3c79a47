//! Every-visit Monte Carlo prediction.
use super::{check_env, check_step_size, episode_record, Evaluator};
use crate::{error::MfpError, record::Record, Env, Episode, Policy, ValueFunction};
use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

/// Step size schedule of [`McEvaluator`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum StepSize {
    /// `V(s) <- V(s) + alpha * (G - V(s))`.
    Constant(f32),

    /// `V(s) <- V(s) + (G - V(s)) / N(s)`, where `N(s)` counts the visits of `s`
    /// in the current evaluation. `V(s)` is the mean of the observed returns.
    SampleAverage,
}

impl Default for StepSize {
    fn default() -> Self {
        Self::SampleAverage
    }
}

/// Every-visit Monte Carlo prediction.
///
/// Each episode is run to termination first. The discounted return
/// `G_t = r_t + gamma * G_t+1` is then computed backward from the end of the
/// episode, and every visited state is moved toward the return that followed
/// it, once per visit, in time order. There is no bootstrapping.
pub struct McEvaluator<E: Env> {
    env: E,
    step_size: StepSize,
    value_fun: ValueFunction,
    n_visits: Vec<usize>,
}

impl<E: Env> McEvaluator<E> {
    /// Constructs a Monte Carlo evaluator averaging the observed returns.
    pub fn new(env: E) -> Result<Self, MfpError> {
        Self::with_step_size(env, StepSize::SampleAverage)
    }

    /// Constructs a Monte Carlo evaluator with the given step size schedule.
    pub fn with_step_size(env: E, step_size: StepSize) -> Result<Self, MfpError> {
        check_env(&env)?;
        if let StepSize::Constant(alpha) = step_size {
            check_step_size(alpha)?;
        }
        let num_states = env.num_states();
        debug!(
            "Monte Carlo: num_states = {}, step_size = {:?}",
            num_states, step_size
        );

        Ok(Self {
            env,
            step_size,
            value_fun: ValueFunction::zeros(num_states),
            n_visits: vec![0; num_states],
        })
    }

    /// Step size schedule.
    pub fn step_size(&self) -> StepSize {
        self.step_size
    }

    /// The environment.
    pub fn env(&self) -> &E {
        &self.env
    }
}

impl<E: Env> Evaluator for McEvaluator<E> {
    fn name(&self) -> &'static str {
        "Monte Carlo"
    }

    fn value_function(&self) -> &ValueFunction {
        &self.value_fun
    }

    fn reset(&mut self) {
        self.value_fun.reset();
        self.n_visits.iter_mut().for_each(|n| *n = 0);
    }

    fn run_episode(&mut self, policy: &mut dyn Policy) -> Result<Record> {
        let episode = Episode::rollout(&mut self.env, policy)?;
        let returns = episode.returns(self.env.discount_factor());

        for (t, g) in episode.iter().zip(returns) {
            let alpha = match self.step_size {
                StepSize::Constant(alpha) => alpha,
                StepSize::SampleAverage => {
                    self.n_visits[t.state] += 1;
                    1.0 / self.n_visits[t.state] as f32
                }
            };
            self.value_fun.update_toward(t.state, g, alpha);
        }

        Ok(episode_record(episode.total_reward(), episode.len()))
    }
}
