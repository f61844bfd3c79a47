//! Environment step.
use super::{Action, State};

/// Represents the outcome `(s_t+1, r_t, done)` of taking action `a_t` in an
/// environment.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Action.
    pub act: Action,

    /// Next state.
    pub next_state: State,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if episode is terminated.
    pub is_terminated: bool,
}

impl Step {
    /// Constructs a [`Step`] object.
    pub fn new(act: Action, next_state: State, reward: f32, is_terminated: bool) -> Self {
        Step {
            act,
            next_state,
            reward,
            is_terminated,
        }
    }

    #[inline]
    /// Terminated.
    pub fn is_done(&self) -> bool {
        self.is_terminated
    }
}
