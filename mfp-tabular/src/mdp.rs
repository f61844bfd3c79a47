//! Finite MDP given by an explicit transition table.
use crate::policy::distribution;
use anyhow::{anyhow, bail, Result};
use log::debug;
use mfp_core::{error::MfpError, Action, Env, State, Step};
use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::SmallRng,
    SeedableRng,
};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// A possible result of taking an action in a state.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Outcome {
    /// State after the transition.
    pub next_state: State,

    /// Probability of this outcome.
    pub prob: f32,

    /// Reward of the transition.
    pub reward: f32,
}

/// Outcomes of taking `act` in `state`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TransitionConfig {
    /// State.
    pub state: State,

    /// Action.
    pub act: Action,

    /// Possible outcomes, with probabilities summing to one.
    pub outcomes: Vec<Outcome>,
}

/// Configuration of [`TabularMdp`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TabularMdpConfig {
    /// The number of states.
    pub num_states: usize,

    /// The number of actions.
    pub num_actions: usize,

    /// Discount factor.
    pub discount_factor: f32,

    /// Initial state of every episode.
    #[serde(default)]
    pub start_state: State,

    /// States ending an episode when entered.
    pub terminal_states: Vec<State>,

    /// Transition table. Every action of every non-terminal state must appear
    /// exactly once.
    pub transitions: Vec<TransitionConfig>,
}

impl TabularMdpConfig {
    /// Constructs a configuration without transitions, starting at state 0.
    pub fn new(num_states: usize, num_actions: usize, discount_factor: f32) -> Self {
        Self {
            num_states,
            num_actions,
            discount_factor,
            start_state: 0,
            terminal_states: vec![],
            transitions: vec![],
        }
    }

    /// Sets the initial state.
    pub fn start_state(mut self, v: State) -> Self {
        self.start_state = v;
        self
    }

    /// Sets the terminal states.
    pub fn terminal_states(mut self, v: Vec<State>) -> Self {
        self.terminal_states = v;
        self
    }

    /// Adds the outcomes `(next_state, prob, reward)` of taking `act` in `state`.
    pub fn transition(mut self, state: State, act: Action, outcomes: &[(State, f32, f32)]) -> Self {
        self.transitions.push(TransitionConfig {
            state,
            act,
            outcomes: outcomes
                .iter()
                .map(|&(next_state, prob, reward)| Outcome {
                    next_state,
                    prob,
                    reward,
                })
                .collect(),
        });
        self
    }

    /// Constructs [`TabularMdpConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TabularMdpConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Sampler of the outcomes of a state-action pair.
struct Dynamics {
    dist: WeightedIndex<f32>,
    outcomes: Vec<Outcome>,
}

/// A finite, episodic MDP.
///
/// Episodes start in the configured start state and end when a terminal state
/// is entered. Stepping before the first [`Env::reset`], or after a terminal
/// step, fails with [`MfpError::StepBeforeReset`] or
/// [`MfpError::StepAfterTermination`].
pub struct TabularMdp {
    num_states: usize,
    num_actions: usize,
    discount_factor: f32,
    start_state: State,
    is_terminal: Vec<bool>,

    /// Indexed by `state * num_actions + act`, `None` for terminal states.
    dynamics: Vec<Option<Dynamics>>,
    rng: SmallRng,

    /// Current state, `None` before the first reset.
    state: Option<State>,
    is_done: bool,
}

impl TabularMdp {
    /// Returns `true` if `state` is terminal.
    pub fn is_terminal(&self, state: State) -> bool {
        self.is_terminal[state]
    }

    /// Terminal states in ascending order.
    pub fn terminal_states(&self) -> Vec<State> {
        (0..self.num_states).filter(|&s| self.is_terminal[s]).collect()
    }

    /// Current state, `None` before the first reset.
    pub fn state(&self) -> Option<State> {
        self.state
    }

    fn check_state(&self, state: State) -> Result<State, MfpError> {
        if state < self.num_states {
            Ok(state)
        } else {
            Err(MfpError::StateOutOfRange {
                state,
                num_states: self.num_states,
            })
        }
    }

    fn check_act(&self, act: Action) -> Result<Action, MfpError> {
        if act < self.num_actions {
            Ok(act)
        } else {
            Err(MfpError::ActionOutOfRange {
                act,
                num_actions: self.num_actions,
            })
        }
    }
}

impl Env for TabularMdp {
    type Config = TabularMdpConfig;

    /// Builds the MDP, validating the transition table.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        if config.num_states == 0 {
            return Err(MfpError::InvalidNumStates(0).into());
        }
        if config.num_actions == 0 {
            bail!("MDP has no actions");
        }
        if !(0.0..=1.0).contains(&config.discount_factor) {
            return Err(MfpError::InvalidDiscountFactor(config.discount_factor).into());
        }

        let mut mdp = Self {
            num_states: config.num_states,
            num_actions: config.num_actions,
            discount_factor: config.discount_factor,
            start_state: config.start_state,
            is_terminal: vec![false; config.num_states],
            dynamics: Vec::new(),
            rng: SmallRng::seed_from_u64(seed as _),
            state: None,
            is_done: false,
        };
        mdp.dynamics.resize_with(config.num_states * config.num_actions, || None);

        mdp.check_state(config.start_state)?;
        for &s in config.terminal_states.iter() {
            mdp.check_state(s)?;
            mdp.is_terminal[s] = true;
        }
        if mdp.is_terminal[config.start_state] {
            bail!("Start state {} is terminal", config.start_state);
        }

        for t in config.transitions.iter() {
            mdp.check_state(t.state)?;
            mdp.check_act(t.act)?;
            if mdp.is_terminal[t.state] {
                bail!("Transition defined for terminal state {}", t.state);
            }
            for o in t.outcomes.iter() {
                mdp.check_state(o.next_state)?;
            }
            let probs: Vec<f32> = t.outcomes.iter().map(|o| o.prob).collect();
            let dist = distribution(&probs).map_err(|e| {
                e.context(format!(
                    "Invalid outcomes of state {}, action {}",
                    t.state, t.act
                ))
            })?;

            let ix = t.state * mdp.num_actions + t.act;
            if mdp.dynamics[ix].is_some() {
                bail!("Duplicated transition of state {}, action {}", t.state, t.act);
            }
            mdp.dynamics[ix] = Some(Dynamics {
                dist,
                outcomes: t.outcomes.clone(),
            });
        }

        for s in (0..mdp.num_states).filter(|&s| !mdp.is_terminal[s]) {
            for a in 0..mdp.num_actions {
                if mdp.dynamics[s * mdp.num_actions + a].is_none() {
                    bail!("Missing transition of state {}, action {}", s, a);
                }
            }
        }

        debug!(
            "Built MDP: num_states = {}, num_actions = {}, terminal_states = {:?}",
            mdp.num_states,
            mdp.num_actions,
            mdp.terminal_states()
        );

        Ok(mdp)
    }

    fn num_states(&self) -> usize {
        self.num_states
    }

    fn num_actions(&self) -> usize {
        self.num_actions
    }

    fn discount_factor(&self) -> f32 {
        self.discount_factor
    }

    fn reset(&mut self) -> Result<State> {
        self.state = Some(self.start_state);
        self.is_done = false;
        Ok(self.start_state)
    }

    fn step(&mut self, act: Action) -> Result<Step> {
        let state = self.state.ok_or(MfpError::StepBeforeReset)?;
        if self.is_done {
            return Err(MfpError::StepAfterTermination.into());
        }
        let act = self.check_act(act)?;

        let dynamics = self.dynamics[state * self.num_actions + act]
            .as_ref()
            .ok_or_else(|| anyhow!("No transition of state {}, action {}", state, act))?;
        let outcome = &dynamics.outcomes[dynamics.dist.sample(&mut self.rng)];
        let next_state = outcome.next_state;
        let reward = outcome.reward;

        self.state = Some(next_state);
        self.is_done = self.is_terminal[next_state];

        Ok(Step::new(act, next_state, reward, self.is_done))
    }
}
