//! TD(lambda) with accumulating eligibility traces, backward view.
use super::{check_env, check_lambda, check_step_size, episode_record, Evaluator};
use crate::{
    episode, error::MfpError, record::Record, EligibilityTrace, Env, Policy, ValueFunction,
};
use anyhow::Result;
use log::debug;

/// TD(lambda) prediction.
///
/// For every transition `(s, r, s')`:
///
/// 1. `delta = r + gamma * V(s') - V(s)`
/// 2. `e(s) <- e(s) + 1`
/// 3. `V(x) <- V(x) + alpha * delta * e(x)` for every state `x`
/// 4. `e(x) <- gamma * lambda * e(x)` for every state `x`
///
/// Traces are cleared at the start of every episode. With `lambda = 0` this is
/// TD(0); with `lambda = 1` the updates of an episode add up to a Monte Carlo
/// update toward the full return.
pub struct TdLambdaEvaluator<E: Env> {
    env: E,
    alpha: f32,
    lambda: f32,
    value_fun: ValueFunction,
    trace: EligibilityTrace,
}

impl<E: Env> TdLambdaEvaluator<E> {
    /// Constructs a TD(lambda) evaluator with step size `alpha` and trace decay
    /// parameter `lambda`.
    pub fn new(env: E, alpha: f32, lambda: f32) -> Result<Self, MfpError> {
        check_env(&env)?;
        let alpha = check_step_size(alpha)?;
        let lambda = check_lambda(lambda)?;
        let num_states = env.num_states();
        debug!(
            "TD(lambda): num_states = {}, alpha = {}, lambda = {}",
            num_states, alpha, lambda
        );

        Ok(Self {
            env,
            alpha,
            lambda,
            value_fun: ValueFunction::zeros(num_states),
            trace: EligibilityTrace::zeros(num_states),
        })
    }

    /// Step size.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Trace decay parameter.
    pub fn lambda(&self) -> f32 {
        self.lambda
    }

    /// Eligibility traces as left by the last episode.
    pub fn trace(&self) -> &EligibilityTrace {
        &self.trace
    }

    /// The environment.
    pub fn env(&self) -> &E {
        &self.env
    }
}

impl<E: Env> Evaluator for TdLambdaEvaluator<E> {
    fn name(&self) -> &'static str {
        "TD(lambda)"
    }

    fn value_function(&self) -> &ValueFunction {
        &self.value_fun
    }

    fn reset(&mut self) {
        self.value_fun.reset();
        self.trace.reset();
    }

    fn run_episode(&mut self, policy: &mut dyn Policy) -> Result<Record> {
        let gamma = self.env.discount_factor();
        let decay = gamma * self.lambda;
        let mut state = episode::reset(&mut self.env)?;
        let mut r_total = 0f32;
        let mut len = 0;

        self.trace.reset();

        loop {
            let t = episode::step(&mut self.env, policy, state)?;
            let delta = t.reward + gamma * self.value_fun[t.next_state] - self.value_fun[state];
            self.trace.visit(state);
            self.value_fun.update_with_trace(&self.trace, self.alpha, delta);
            self.trace.decay(decay);
            r_total += t.reward;
            len += 1;

            if t.is_terminated {
                break;
            }
            state = t.next_state;
        }

        Ok(episode_record(r_total, len))
    }
}
