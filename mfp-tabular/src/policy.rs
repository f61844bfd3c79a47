//! Stochastic tabular policy.
use crate::PROB_TOLERANCE;
use anyhow::{bail, Result};
use mfp_core::{Action, Configurable, Env, Policy, State};
use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::SmallRng,
    SeedableRng,
};
use serde::{Deserialize, Serialize};

/// Configuration of [`TabularPolicy`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TabularPolicyConfig {
    /// `probs[s][a]` is the probability of taking action `a` in state `s`.
    pub probs: Vec<Vec<f32>>,

    /// Random seed of action sampling.
    #[serde(default)]
    pub seed: u64,
}

/// A policy given by an explicit distribution over actions in every state.
pub struct TabularPolicy {
    probs: Vec<Vec<f32>>,
    dists: Vec<WeightedIndex<f32>>,
    rng: SmallRng,
}

impl TabularPolicy {
    /// Constructs a policy from action probabilities, `probs[s][a]`.
    ///
    /// Every row must be a probability distribution over the same number of
    /// actions.
    pub fn new(probs: Vec<Vec<f32>>, seed: u64) -> Result<Self> {
        if probs.is_empty() {
            bail!("Policy has no states");
        }
        let num_actions = probs[0].len();
        let dists = probs
            .iter()
            .enumerate()
            .map(|(s, row)| {
                if row.len() != num_actions {
                    bail!(
                        "State {} has {} actions, expected {}",
                        s,
                        row.len(),
                        num_actions
                    );
                }
                distribution(row).map_err(|e| e.context(format!("Invalid policy at state {}", s)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            probs,
            dists,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Always takes `actions[s]` in state `s`.
    pub fn deterministic(actions: &[Action], num_actions: usize) -> Result<Self> {
        let probs = actions
            .iter()
            .map(|&a| {
                if a >= num_actions {
                    bail!("Action {} is out of range, number of actions is {}", a, num_actions);
                }
                let mut row = vec![0f32; num_actions];
                row[a] = 1.0;
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(probs, 0)
    }

    /// Takes every action with the same probability in every state.
    pub fn uniform(num_states: usize, num_actions: usize, seed: u64) -> Result<Self> {
        if num_actions == 0 {
            bail!("Policy has no actions");
        }
        let p = 1.0 / num_actions as f32;
        Self::new(vec![vec![p; num_actions]; num_states], seed)
    }

    /// Probability of taking `act` in `state`.
    pub fn prob(&self, state: State, act: Action) -> f32 {
        self.probs[state][act]
    }

    /// The number of states covered by the policy.
    pub fn num_states(&self) -> usize {
        self.probs.len()
    }

    /// The number of actions.
    pub fn num_actions(&self) -> usize {
        self.probs[0].len()
    }

    /// Checks that the policy can act in every state of `env` and only takes
    /// actions available there.
    pub fn check_env<E: Env>(&self, env: &E) -> Result<()> {
        if self.num_states() < env.num_states() {
            bail!(
                "Policy covers {} states, environment has {}",
                self.num_states(),
                env.num_states()
            );
        }
        let num_actions = env.num_actions();
        for (s, row) in self.probs.iter().enumerate().take(env.num_states()) {
            if let Some(a) = (num_actions..row.len()).find(|&a| row[a] > 0.0) {
                bail!(
                    "Policy takes action {} in state {}, environment has {} actions",
                    a,
                    s,
                    num_actions
                );
            }
        }
        Ok(())
    }
}

impl Policy for TabularPolicy {
    /// Samples an action from the distribution of `state`.
    ///
    /// Panics if `state` is not covered by the policy, see
    /// [`TabularPolicy::check_env`].
    fn sample(&mut self, state: State) -> Action {
        self.dists[state].sample(&mut self.rng)
    }
}

impl Configurable for TabularPolicy {
    type Config = TabularPolicyConfig;

    fn build(config: Self::Config) -> Result<Self> {
        Self::new(config.probs, config.seed)
    }
}

/// Checks that `probs` is a probability distribution and builds a sampler.
pub(crate) fn distribution(probs: &[f32]) -> Result<WeightedIndex<f32>> {
    if probs.iter().any(|p| !p.is_finite() || *p < 0.0) {
        bail!("Probabilities must be finite and non-negative: {:?}", probs);
    }
    let sum: f32 = probs.iter().sum();
    if (sum - 1.0).abs() > PROB_TOLERANCE {
        bail!("Probabilities sum to {}, expected 1: {:?}", sum, probs);
    }
    Ok(WeightedIndex::new(probs)?)
}
