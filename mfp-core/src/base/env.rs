//! Environment.
use super::{Action, State, Step};
use anyhow::Result;

/// Represents an episodic environment with finite state and action spaces.
///
/// Evaluators only interact with the environment through [`Env::reset`] and
/// [`Env::step`]; the transition model is never inspected.
///
/// An implementation must reach a terminal transition in a finite number of
/// steps under every policy it is evaluated with. Evaluators do not detect
/// episodes that never terminate.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// The number of states. States are indexed by `0..num_states()`.
    fn num_states(&self) -> usize;

    /// The number of actions. Actions are indexed by `0..num_actions()`.
    fn num_actions(&self) -> usize;

    /// Discount factor of returns, in `[0, 1]`.
    fn discount_factor(&self) -> f32;

    /// Begins a new episode and returns its initial state.
    fn reset(&mut self) -> Result<State>;

    /// Performs an environment step.
    ///
    /// Calling this method before [`Env::reset`], or after a terminal step without
    /// an intervening reset, is a contract violation and should return an error.
    fn step(&mut self, act: Action) -> Result<Step>;
}
