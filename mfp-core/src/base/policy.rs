//! Policy.
use super::{Action, State};
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

/// A fixed policy on a finite MDP.
///
/// Policy is a mapping from a state to an action.
/// The mapping can be either of deterministic or stochastic.
pub trait Policy {
    /// Sample an action given a state.
    fn sample(&mut self, state: State) -> Action;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn sample(&mut self, state: State) -> Action {
        (**self).sample(state)
    }
}

/// A configurable object.
pub trait Configurable {
    /// Configuration.
    type Config: Clone + DeserializeOwned;

    /// Builds the object.
    fn build(config: Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Build the object with the configuration in the yaml file of the given path.
    fn build_from_path(path: impl AsRef<Path>) -> Result<Self>
    where
        Self: Sized,
    {
        let file = std::fs::File::open(path)?;
        let rdr = std::io::BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Self::build(config)
    }
}
