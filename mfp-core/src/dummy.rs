//! This module is used for tests.
use crate::{error::MfpError, Action, Env, Policy, State, Step};
use anyhow::Result;

/// Deterministic single-action chain `0 -> 1 -> ... -> n - 1`, the last state
/// being terminal. Every transition yields the same reward.
pub struct ChainEnv {
    num_states: usize,
    reward: f32,
    discount_factor: f32,
    state: Option<State>,
}

impl ChainEnv {
    pub fn new(num_states: usize, reward: f32, discount_factor: f32) -> Self {
        Self {
            num_states,
            reward,
            discount_factor,
            state: None,
        }
    }
}

impl Env for ChainEnv {
    type Config = (usize, f32, f32);

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self::new(config.0, config.1, config.2))
    }

    fn num_states(&self) -> usize {
        self.num_states
    }

    fn num_actions(&self) -> usize {
        1
    }

    fn discount_factor(&self) -> f32 {
        self.discount_factor
    }

    fn reset(&mut self) -> Result<State> {
        self.state = Some(0);
        Ok(0)
    }

    fn step(&mut self, act: Action) -> Result<Step> {
        let state = self.state.ok_or(MfpError::StepBeforeReset)?;
        if state + 1 >= self.num_states {
            return Err(MfpError::StepAfterTermination.into());
        }
        let next_state = state + 1;
        self.state = Some(next_state);
        Ok(Step::new(
            act,
            next_state,
            self.reward,
            next_state + 1 == self.num_states,
        ))
    }
}

/// Replays a fixed trajectory of `(next_state, reward)` from state 0 on every
/// episode, terminating after the last entry.
pub struct ScriptedEnv {
    num_states: usize,
    discount_factor: f32,
    script: Vec<(State, f32)>,
    cursor: usize,
}

impl ScriptedEnv {
    pub fn new(num_states: usize, discount_factor: f32, script: Vec<(State, f32)>) -> Self {
        Self {
            num_states,
            discount_factor,
            script,
            cursor: 0,
        }
    }
}

impl Env for ScriptedEnv {
    type Config = ();

    fn build(_config: &Self::Config, _seed: i64) -> Result<Self> {
        unimplemented!();
    }

    fn num_states(&self) -> usize {
        self.num_states
    }

    fn num_actions(&self) -> usize {
        1
    }

    fn discount_factor(&self) -> f32 {
        self.discount_factor
    }

    fn reset(&mut self) -> Result<State> {
        self.cursor = 0;
        Ok(0)
    }

    fn step(&mut self, act: Action) -> Result<Step> {
        let (next_state, reward) = self.script[self.cursor];
        self.cursor += 1;
        Ok(Step::new(
            act,
            next_state,
            reward,
            self.cursor == self.script.len(),
        ))
    }
}

/// An environment whose first step leaves the declared state space.
pub struct OutOfRangeEnv;

impl Env for OutOfRangeEnv {
    type Config = ();

    fn build(_config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self)
    }

    fn num_states(&self) -> usize {
        2
    }

    fn num_actions(&self) -> usize {
        1
    }

    fn discount_factor(&self) -> f32 {
        1.0
    }

    fn reset(&mut self) -> Result<State> {
        Ok(0)
    }

    fn step(&mut self, act: Action) -> Result<Step> {
        Ok(Step::new(act, 7, 0.0, false))
    }
}

/// An environment with configurable, possibly invalid, properties. Never stepped.
pub struct BadEnv {
    pub num_states: usize,
    pub discount_factor: f32,
}

impl Env for BadEnv {
    type Config = ();

    fn build(_config: &Self::Config, _seed: i64) -> Result<Self> {
        unimplemented!();
    }

    fn num_states(&self) -> usize {
        self.num_states
    }

    fn num_actions(&self) -> usize {
        1
    }

    fn discount_factor(&self) -> f32 {
        self.discount_factor
    }

    fn reset(&mut self) -> Result<State> {
        unimplemented!();
    }

    fn step(&mut self, _act: Action) -> Result<Step> {
        unimplemented!();
    }
}

/// Always takes the same action.
pub struct ConstPolicy(pub Action);

impl Policy for ConstPolicy {
    fn sample(&mut self, _state: State) -> Action {
        self.0
    }
}
