//! Errors in the library.
use crate::{Action, State};
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MfpError {
    /// The environment reports an empty state space.
    #[error("Invalid number of states: {0}")]
    InvalidNumStates(usize),

    /// The discount factor is not in `[0, 1]`.
    #[error("Invalid discount factor: {0}, expected a value in [0, 1]")]
    InvalidDiscountFactor(f32),

    /// The step size is not strictly positive.
    #[error("Invalid step size: {0}, expected a positive value")]
    InvalidStepSize(f32),

    /// The trace decay parameter is not in `[0, 1]`.
    #[error("Invalid lambda: {0}, expected a value in [0, 1]")]
    InvalidLambda(f32),

    /// A state outside of the declared state space.
    #[error("State {state} is out of range, number of states is {num_states}")]
    StateOutOfRange {
        /// The offending state.
        state: State,
        /// The number of states of the environment.
        num_states: usize,
    },

    /// An action outside of the declared action space.
    #[error("Action {act} is out of range, number of actions is {num_actions}")]
    ActionOutOfRange {
        /// The offending action.
        act: Action,
        /// The number of actions of the environment.
        num_actions: usize,
    },

    /// The environment was stepped before it was reset.
    #[error("Environment stepped before reset")]
    StepBeforeReset,

    /// The environment was stepped after the episode terminated.
    #[error("Environment stepped after termination without reset")]
    StepAfterTermination,

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}

impl MfpError {
    /// Returns `true` for errors raised by invalid hyperparameters or environments
    /// at construction time.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumStates(_)
                | Self::InvalidDiscountFactor(_)
                | Self::InvalidStepSize(_)
                | Self::InvalidLambda(_)
        )
    }

    /// Returns `true` for errors raised because an environment or a policy broke
    /// its contract during an episode.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::StateOutOfRange { .. }
                | Self::ActionOutOfRange { .. }
                | Self::StepBeforeReset
                | Self::StepAfterTermination
        )
    }
}
