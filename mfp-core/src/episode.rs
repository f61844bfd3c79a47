//! Episodes sampled from an environment under a policy.
use crate::{error::MfpError, Action, Env, Policy, State};
use anyhow::Result;
use std::slice::Iter;

/// A transition `(s_t, a_t, r_t, s_t+1, done)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// State in which the action was taken.
    pub state: State,

    /// Action.
    pub act: Action,

    /// Reward.
    pub reward: f32,

    /// State after the transition.
    pub next_state: State,

    /// Flag denoting if `next_state` is terminal.
    pub is_terminated: bool,
}

/// An ordered sequence of transitions from a reset to a terminal state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Episode {
    transitions: Vec<Transition>,
}

impl Episode {
    /// Runs the environment from a reset until termination under `policy`.
    ///
    /// Returns an error if the environment fails, or if it or the policy produce
    /// a state or action outside of the declared spaces.
    pub fn rollout<E: Env + ?Sized>(env: &mut E, policy: &mut dyn Policy) -> Result<Self> {
        let mut transitions = Vec::new();
        let mut state = reset(env)?;

        loop {
            let transition = step(env, policy, state)?;
            let is_done = transition.is_terminated;
            state = transition.next_state;
            transitions.push(transition);
            if is_done {
                break;
            }
        }

        Ok(Self { transitions })
    }

    /// The number of transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Returns `true` if the episode has no transitions.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Returns an iterator over the transitions in time order.
    pub fn iter(&self) -> Iter<'_, Transition> {
        self.transitions.iter()
    }

    /// Undiscounted sum of rewards.
    pub fn total_reward(&self) -> f32 {
        self.transitions.iter().map(|t| t.reward).sum()
    }

    /// Discounted returns `G_t = r_t + gamma * G_t+1` for every time step,
    /// with the return after the last transition being zero.
    pub fn returns(&self, discount_factor: f32) -> Vec<f32> {
        let mut returns = vec![0f32; self.transitions.len()];
        let mut g = 0f32;
        for (t, transition) in self.transitions.iter().enumerate().rev() {
            g = transition.reward + discount_factor * g;
            returns[t] = g;
        }
        returns
    }
}

/// Resets the environment and checks the initial state.
pub(crate) fn reset<E: Env + ?Sized>(env: &mut E) -> Result<State> {
    let state = env.reset()?;
    Ok(check_state(state, env.num_states())?)
}

/// Samples an action in `state`, applies it to the environment and checks both
/// the action and the next state against the declared spaces.
pub(crate) fn step<E: Env + ?Sized>(
    env: &mut E,
    policy: &mut dyn Policy,
    state: State,
) -> Result<Transition> {
    let act = policy.sample(state);
    if act >= env.num_actions() {
        return Err(MfpError::ActionOutOfRange {
            act,
            num_actions: env.num_actions(),
        }
        .into());
    }

    let step = env.step(act)?;
    let next_state = check_state(step.next_state, env.num_states())?;

    Ok(Transition {
        state,
        act,
        reward: step.reward,
        next_state,
        is_terminated: step.is_done(),
    })
}

fn check_state(state: State, num_states: usize) -> Result<State, MfpError> {
    if state < num_states {
        Ok(state)
    } else {
        Err(MfpError::StateOutOfRange { state, num_states })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dummy::{ChainEnv, ConstPolicy, OutOfRangeEnv};

    #[test]
    fn test_rollout_chain() -> Result<()> {
        let mut env = ChainEnv::new(4, 1.0, 0.9);
        let episode = Episode::rollout(&mut env, &mut ConstPolicy(0))?;

        assert_eq!(episode.len(), 3);
        let states: Vec<_> = episode.iter().map(|t| t.state).collect();
        assert_eq!(states, vec![0, 1, 2]);
        assert!(episode.iter().last().map_or(false, |t| t.is_terminated));
        assert_eq!(episode.total_reward(), 3.0);
        Ok(())
    }

    #[test]
    fn test_returns() -> Result<()> {
        let mut env = ChainEnv::new(3, 1.0, 0.9);
        let episode = Episode::rollout(&mut env, &mut ConstPolicy(0))?;
        let returns = episode.returns(0.9);

        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 1.9).abs() < 1e-6);
        assert!((returns[1] - 1.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_invalid_action() {
        let mut env = ChainEnv::new(3, 1.0, 0.9);
        let err = Episode::rollout(&mut env, &mut ConstPolicy(1)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<MfpError>(),
            Some(&MfpError::ActionOutOfRange {
                act: 1,
                num_actions: 1
            })
        );
    }

    #[test]
    fn test_invalid_next_state() {
        let mut env = OutOfRangeEnv;
        let err = Episode::rollout(&mut env, &mut ConstPolicy(0)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<MfpError>(),
            Some(&MfpError::StateOutOfRange {
                state: 7,
                num_states: 2
            })
        );
    }
}
