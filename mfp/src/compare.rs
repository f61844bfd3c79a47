//! Comparison of two policies by their estimated value functions.
use anyhow::Result;
use log::info;
use mfp_core::{Env, EvaluatorConfig, State};
use mfp_tabular::{TabularMdp, TabularMdpConfig, TabularPolicy};

/// Estimated values of two policies on the same MDP, by one algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Name of the algorithm.
    pub algorithm: String,

    /// Estimated values of the first policy.
    pub values_1: Vec<f32>,

    /// Estimated values of the second policy.
    pub values_2: Vec<f32>,

    /// States taken into account, terminal states excluded.
    pub states: Vec<State>,
}

impl Comparison {
    /// Returns `true` if the first policy has a strictly higher value in every
    /// compared state.
    pub fn dominates(&self) -> bool {
        self.states
            .iter()
            .all(|&s| self.values_1[s] > self.values_2[s])
    }

    /// `(state, value of policy 1, value of policy 2)` for every compared state.
    pub fn rows(&self) -> impl Iterator<Item = (State, f32, f32)> + '_ {
        self.states
            .iter()
            .map(move |&s| (s, self.values_1[s], self.values_2[s]))
    }
}

/// Evaluates two policies on `mdp` with the configured algorithm.
///
/// Each policy gets its own evaluator and its own environment, built with the
/// same `seed`. Both policies must cover every state of `mdp`.
pub fn compare(
    config: &EvaluatorConfig,
    mdp: &TabularMdpConfig,
    seed: i64,
    policy_1: &mut TabularPolicy,
    policy_2: &mut TabularPolicy,
    n_episodes: usize,
) -> Result<Comparison> {
    let env = TabularMdp::build(mdp, seed)?;
    let states: Vec<State> = (0..env.num_states())
        .filter(|&s| !env.is_terminal(s))
        .collect();
    policy_1.check_env(&env)?;
    policy_2.check_env(&env)?;

    let mut evaluator_1 = config.build(env)?;
    let values_1 = evaluator_1.evaluate(policy_1, n_episodes)?;
    let mut evaluator_2 = config.build(TabularMdp::build(mdp, seed)?)?;
    let values_2 = evaluator_2.evaluate(policy_2, n_episodes)?;

    let comparison = Comparison {
        algorithm: evaluator_1.name().to_string(),
        values_1,
        values_2,
        states,
    };
    info!(
        "{}: policy 1 dominates policy 2 = {}",
        comparison.algorithm,
        comparison.dominates()
    );

    Ok(comparison)
}

#[cfg(test)]
mod test {
    use super::*;
    use mfp_core::EvaluatorKind;
    use mfp_tabular::presets;

    #[test]
    fn test_dominates_ignores_excluded_states() {
        let comparison = Comparison {
            algorithm: "TD(0)".to_string(),
            values_1: vec![2.0, 1.0, 0.0],
            values_2: vec![1.0, 0.5, 0.0],
            states: vec![0, 1],
        };
        assert!(comparison.dominates());
        assert_eq!(
            comparison.rows().collect::<Vec<_>>(),
            vec![(0, 2.0, 1.0), (1, 1.0, 0.5)]
        );

        let comparison = Comparison {
            values_2: vec![1.0, 1.0, 0.0],
            ..comparison
        };
        assert!(!comparison.dominates());
    }

    #[test]
    fn test_policy_not_covering_the_mdp() -> Result<()> {
        let mdp = presets::chain(6, 1.0, 0.9);
        let config = EvaluatorConfig::default().kind(EvaluatorKind::Td);
        let mut short = TabularPolicy::deterministic(&[0, 0, 0], 1)?;
        let mut full = TabularPolicy::deterministic(&[0; 6], 1)?;

        assert!(compare(&config, &mdp, 0, &mut short, &mut full, 1).is_err());
        assert!(compare(&config, &mdp, 0, &mut full, &mut short, 1).is_err());

        let mut other = TabularPolicy::deterministic(&[0; 6], 1)?;
        let comparison = compare(&config, &mdp, 0, &mut full, &mut other, 1)?;
        assert_eq!(comparison.states, vec![0, 1, 2, 3, 4]);
        Ok(())
    }
}
