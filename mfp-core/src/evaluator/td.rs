//! One-step temporal difference, TD(0).
use super::{check_env, check_step_size, episode_record, Evaluator};
use crate::{episode, error::MfpError, record::Record, Env, Policy, ValueFunction};
use anyhow::Result;
use log::debug;

/// TD(0) prediction.
///
/// After every transition `(s, r, s')` the estimate of `s` moves toward the
/// bootstrapped target:
///
/// `V(s) <- V(s) + alpha * (r + gamma * V(s') - V(s))`
///
/// The terminal state is never the source of a transition, so its value keeps
/// its initial value of zero.
pub struct TdEvaluator<E: Env> {
    env: E,
    alpha: f32,
    value_fun: ValueFunction,
}

impl<E: Env> TdEvaluator<E> {
    /// Constructs a TD(0) evaluator with step size `alpha`.
    pub fn new(env: E, alpha: f32) -> Result<Self, MfpError> {
        check_env(&env)?;
        let alpha = check_step_size(alpha)?;
        debug!(
            "TD(0): num_states = {}, alpha = {}",
            env.num_states(),
            alpha
        );

        Ok(Self {
            value_fun: ValueFunction::zeros(env.num_states()),
            env,
            alpha,
        })
    }

    /// Step size.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// The environment.
    pub fn env(&self) -> &E {
        &self.env
    }
}

impl<E: Env> Evaluator for TdEvaluator<E> {
    fn name(&self) -> &'static str {
        "TD(0)"
    }

    fn value_function(&self) -> &ValueFunction {
        &self.value_fun
    }

    fn reset(&mut self) {
        self.value_fun.reset();
    }

    fn run_episode(&mut self, policy: &mut dyn Policy) -> Result<Record> {
        let gamma = self.env.discount_factor();
        let mut state = episode::reset(&mut self.env)?;
        let mut r_total = 0f32;
        let mut len = 0;

        loop {
            let t = episode::step(&mut self.env, policy, state)?;
            let target = t.reward + gamma * self.value_fun[t.next_state];
            self.value_fun.update_toward(state, target, self.alpha);
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
