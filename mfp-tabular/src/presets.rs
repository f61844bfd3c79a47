//! Small MDPs and policies used to compare evaluators.
use crate::{TabularMdpConfig, TabularPolicy};
use anyhow::Result;
use mfp_core::State;

/// Reward of every step not entering the goal of [`create_mdp`].
pub const STEP_REWARD: f32 = -1.0;

/// Reward of entering the goal of [`create_mdp`].
pub const GOAL_REWARD: f32 = 10.0;

/// Deterministic single-action chain `0 -> 1 -> ... -> length - 1`.
///
/// The last state is terminal and every transition yields `reward`, so the
/// value of state `s` is `sum_{k < length - 1 - s} gamma^k * reward`.
///
/// # Panics
///
/// Panics if `length < 2`.
pub fn chain(length: usize, reward: f32, discount_factor: f32) -> TabularMdpConfig {
    assert!(length >= 2, "A chain needs at least two states");
    (0..length - 1).fold(
        TabularMdpConfig::new(length, 1, discount_factor).terminal_states(vec![length - 1]),
        |config, s| config.transition(s, 0, &[(s + 1, 1.0, reward)]),
    )
}

/// A corridor of three states in front of an absorbing goal, state 3.
///
/// Two actions are available in every state:
///
/// * `0` (advance) moves one state forward with probability 0.9 and stays
///   otherwise,
/// * `1` (stay) stays with probability 0.9 and moves forward otherwise.
///
/// Every step costs [`STEP_REWARD`], except entering the goal which yields
/// [`GOAL_REWARD`]. The discount factor is 0.9.
pub fn create_mdp() -> TabularMdpConfig {
    const GOAL: State = 3;
    let reward = |next: State| if next == GOAL { GOAL_REWARD } else { STEP_REWARD };

    (0..GOAL).fold(
        TabularMdpConfig::new(GOAL + 1, 2, 0.9).terminal_states(vec![GOAL]),
        |config, s| {
            config
                .transition(s, 0, &[(s + 1, 0.9, reward(s + 1)), (s, 0.1, STEP_REWARD)])
                .transition(s, 1, &[(s, 0.9, STEP_REWARD), (s + 1, 0.1, reward(s + 1))])
        },
    )
}

/// Advances with probability 0.9 in every state of [`create_mdp`].
pub fn create_policy_1(seed: u64) -> Result<TabularPolicy> {
    TabularPolicy::new(vec![vec![0.9, 0.1]; 4], seed)
}

/// Advances with probability 0.2 in every state of [`create_mdp`].
pub fn create_policy_2(seed: u64) -> Result<TabularPolicy> {
    TabularPolicy::new(vec![vec![0.2, 0.8]; 4], seed)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::TabularMdp;
    use mfp_core::{Env, Policy};

    #[test]
    fn test_chain() -> Result<()> {
        let mut mdp = TabularMdp::build(&chain(3, 1.0, 0.9), 0)?;
        assert_eq!(mdp.num_states(), 3);
        assert_eq!(mdp.num_actions(), 1);
        assert_eq!(mdp.reset()?, 0);
        assert!(!mdp.step(0)?.is_done());
        assert!(mdp.step(0)?.is_done());
        Ok(())
    }

    #[test]
    fn test_create_mdp_episodes_terminate() -> Result<()> {
        let mut mdp = TabularMdp::build(&create_mdp(), 42)?;
        let mut policy = create_policy_2(0)?;
        assert_eq!(mdp.terminal_states(), vec![3]);

        for _ in 0..100 {
            let mut state = mdp.reset()?;
            let mut steps = 0;
            loop {
                let step = mdp.step(policy.sample(state))?;
                steps += 1;
                if step.is_done() {
                    assert_eq!(step.reward, GOAL_REWARD);
                    break;
                }
                assert_eq!(step.reward, STEP_REWARD);
                state = step.next_state;
                assert!(steps < 10_000);
            }
        }
        Ok(())
    }
}
