//! Core functionalities.
mod env;
mod policy;
mod step;
pub use env::Env;
pub use policy::{Configurable, Policy};
pub use step::Step;

/// Index of a state of a finite MDP, in `0..num_states`.
pub type State = usize;

/// Index of an action of a finite MDP, in `0..num_actions`.
pub type Action = usize;
