#![warn(missing_docs)]
//! Model-free prediction of state values in finite MDPs.
//!
//! Three evaluators estimate the state-value function of a fixed [`Policy`]
//! from sampled episodes of an [`Env`], without access to its transition model:
//!
//! * [`TdEvaluator`] - one-step temporal difference, TD(0),
//! * [`TdLambdaEvaluator`] - TD(lambda) with accumulating eligibility traces,
//! * [`McEvaluator`] - every-visit Monte Carlo.
//!
//! All of them implement [`Evaluator`], so they can be driven uniformly:
//!
//! ```ignore
//! let mut evaluator = TdEvaluator::new(env, 0.1)?;
//! let values = evaluator.evaluate(&mut policy, 1000)?;
//! ```
pub mod error;
pub mod record;

mod base;
pub use base::{Action, Configurable, Env, Policy, State, Step};

mod episode;
pub use episode::{Episode, Transition};

mod table;
pub use table::{EligibilityTrace, ValueFunction};

mod evaluator;
pub use evaluator::{
    Evaluator, EvaluatorConfig, EvaluatorKind, McEvaluator, StepSize, TdEvaluator,
    TdLambdaEvaluator,
};

#[cfg(test)]
pub(crate) mod dummy;
