//! Finite tabular MDPs and policies.
//!
//! [`TabularMdp`] implements [`mfp_core::Env`] from an explicit transition
//! table, [`TabularPolicy`] implements [`mfp_core::Policy`] from a table of
//! action probabilities. Both sample with a seeded [`rand::rngs::SmallRng`], so
//! an evaluation run is reproducible given the seeds.
//!
//! ```ignore
//! use mfp_core::{Env, Evaluator, TdEvaluator};
//! use mfp_tabular::{presets, TabularMdp};
//!
//! let env = TabularMdp::build(&presets::create_mdp(), 42)?;
//! let mut policy = presets::create_policy_1(0)?;
//! let values = TdEvaluator::new(env, 0.1)?.evaluate(&mut policy, 1000)?;
//! ```
mod mdp;
mod policy;
pub mod presets;
pub use mdp::{Outcome, TabularMdp, TabularMdpConfig, TransitionConfig};
pub use policy::{TabularPolicy, TabularPolicyConfig};

/// Tolerance on the sum of a probability distribution.
const PROB_TOLERANCE: f32 = 1e-4;
