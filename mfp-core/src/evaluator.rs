//! Estimate the state-value function of a fixed [`Policy`].
use crate::{
    error::MfpError,
    record::{NullRecorder, Record, RecordValue, Recorder},
    Env, Policy, ValueFunction,
};
use anyhow::Result;
use log::{debug, info, trace};
mod config;
mod monte_carlo;
mod td;
mod td_lambda;
pub use config::{EvaluatorConfig, EvaluatorKind};
pub use monte_carlo::{McEvaluator, StepSize};
pub use td::TdEvaluator;
pub use td_lambda::TdLambdaEvaluator;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Estimates the state-value function of a policy from sampled episodes.
///
/// An evaluator owns an environment and a tabular [`ValueFunction`]. Each
/// episode is generated by letting the policy act in the environment until a
/// terminal transition, and is folded into the estimate with an
/// algorithm-specific update rule:
///
/// ```mermaid
/// graph LR
///     P[Policy] -->|Action| E[Env]
///     E -->|Step| V[Evaluator]
///     V -->|State| P
/// ```
///
/// [`Evaluator::evaluate`] always starts from a zero estimate, so calling it
/// repeatedly on the same instance does not carry anything over between calls.
pub trait Evaluator {
    /// Short name of the algorithm.
    fn name(&self) -> &'static str;

    /// The current estimate.
    fn value_function(&self) -> &ValueFunction;

    /// Resets all learned state to zero.
    fn reset(&mut self);

    /// Runs a single episode and folds it into the estimate.
    ///
    /// The returned record contains `"episode_return"` (undiscounted) and
    /// `"episode_length"`. An error leaves the updates applied before the
    /// failing step in place.
    fn run_episode(&mut self, policy: &mut dyn Policy) -> Result<Record>;

    /// Estimates the value function of `policy` from `n_episodes` episodes.
    ///
    /// Returns a copy of the estimate, one value per state. Zero episodes yields
    /// the zero vector.
    fn evaluate(&mut self, policy: &mut dyn Policy, n_episodes: usize) -> Result<Vec<f32>> {
        self.evaluate_with_recorder(policy, n_episodes, &mut NullRecorder {})
    }

    /// Same as [`Evaluator::evaluate`], writing the record of every episode,
    /// with its index under `"episode"`, to `recorder`.
    fn evaluate_with_recorder(
        &mut self,
        policy: &mut dyn Policy,
        n_episodes: usize,
        recorder: &mut dyn Recorder,
    ) -> Result<Vec<f32>> {
        self.reset();
        debug!("{}: evaluating {} episodes", self.name(), n_episodes);

        let mut r_total = 0f32;
        for episode in 0..n_episodes {
            let mut record = self.run_episode(policy)?;
            r_total += record.get_scalar("episode_return")?;
            trace!("{}: episode {}, {:?}", self.name(), episode, record);
            record.insert("episode", RecordValue::Scalar(episode as f32));
            recorder.write(record);
        }

        if n_episodes > 0 {
            info!(
                "{}: {} episodes, mean return = {}",
                self.name(),
                n_episodes,
                r_total / n_episodes as f32
            );
        }

        Ok(self.value_function().to_vec())
    }
}

/// Record of a finished episode.
fn episode_record(r_total: f32, len: usize) -> Record {
    Record::from_slice(&[
        ("episode_return", RecordValue::Scalar(r_total)),
        ("episode_length", RecordValue::Scalar(len as f32)),
    ])
}

/// Checks the properties of the environment the evaluators rely on.
fn check_env<E: Env>(env: &E) -> Result<(), MfpError> {
    if env.num_states() == 0 {
        return Err(MfpError::InvalidNumStates(env.num_states()));
    }
    let discount_factor = env.discount_factor();
    if !(0.0..=1.0).contains(&discount_factor) {
        return Err(MfpError::InvalidDiscountFactor(discount_factor));
    }
    Ok(())
}

fn check_step_size(alpha: f32) -> Result<f32, MfpError> {
    if alpha.is_finite() && alpha > 0.0 {
        Ok(alpha)
    } else {
        Err(MfpError::InvalidStepSize(alpha))
    }
}

fn check_lambda(lambda: f32) -> Result<f32, MfpError> {
    if (0.0..=1.0).contains(&lambda) {
        Ok(lambda)
    } else {
        Err(MfpError::InvalidLambda(lambda))
    }
}
