//! Model-free prediction for finite MDPs.
//!
//! This crate bundles [`mfp_core`], the TD(0), TD(lambda) and Monte Carlo
//! evaluators, with [`mfp_tabular`], tabular MDPs and policies to run them on,
//! and adds [`compare`] for comparing two policies by their estimated values.
pub use mfp_core as core;
pub use mfp_tabular as tabular;
pub mod compare;
