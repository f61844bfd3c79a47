//! Dense per-state tables owned by evaluators.
use crate::State;
use std::ops::Index;

/// Tabular estimate of a state-value function, one entry per state.
///
/// The length is fixed at construction and never changes.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueFunction {
    values: Vec<f32>,
}

impl ValueFunction {
    /// Creates a value function of `num_states` zeros.
    pub fn zeros(num_states: usize) -> Self {
        Self {
            values: vec![0f32; num_states],
        }
    }

    /// Resets every estimate to zero.
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.0);
    }

    /// The number of states.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Moves `V[state]` toward `target` by `alpha * (target - V[state])`.
    pub fn update_toward(&mut self, state: State, target: f32, alpha: f32) {
        let v = &mut self.values[state];
        *v += alpha * (target - *v);
    }

    /// Adds `alpha * delta * e[s]` to `V[s]` for every state `s`.
    pub fn update_with_trace(&mut self, trace: &EligibilityTrace, alpha: f32, delta: f32) {
        debug_assert_eq!(self.values.len(), trace.len());
        for (v, e) in self.values.iter_mut().zip(trace.as_slice()) {
            *v += alpha * delta * e;
        }
    }

    /// Returns the estimates as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Returns an owned copy of the estimates.
    pub fn to_vec(&self) -> Vec<f32> {
        self.values.clone()
    }
}

impl Index<State> for ValueFunction {
    type Output = f32;

    fn index(&self, state: State) -> &f32 {
        &self.values[state]
    }
}

/// Accumulating eligibility trace, one entry per state.
#[derive(Clone, Debug, PartialEq)]
pub struct EligibilityTrace {
    traces: Vec<f32>,
}

impl EligibilityTrace {
    /// Creates a trace of `num_states` zeros.
    pub fn zeros(num_states: usize) -> Self {
        Self {
            traces: vec![0f32; num_states],
        }
    }

    /// Resets every trace to zero.
    pub fn reset(&mut self) {
        self.traces.iter_mut().for_each(|e| *e = 0.0);
    }

    /// Adds one to the trace of `state`.
    pub fn visit(&mut self, state: State) {
        self.traces[state] += 1.0;
    }

    /// Multiplies every trace by `factor`.
    pub fn decay(&mut self, factor: f32) {
        self.traces.iter_mut().for_each(|e| *e *= factor);
    }

    /// The number of states.
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Returns `true` if every trace is zero.
    pub fn is_zero(&self) -> bool {
        self.traces.iter().all(|e| *e == 0.0)
    }

    /// Returns the traces as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.traces
    }
}

impl Index<State> for EligibilityTrace {
    type Output = f32;

    fn index(&self, state: State) -> &f32 {
        &self.traces[state]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_value_update_toward() {
        let mut v = ValueFunction::zeros(3);
        v.update_toward(1, 2.0, 0.5);
        assert_eq!(v.as_slice(), &[0.0, 1.0, 0.0]);
        v.update_toward(1, 2.0, 0.5);
        assert_eq!(v[1], 1.5);

        v.reset();
        assert_eq!(v.to_vec(), vec![0.0; 3]);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_trace_visit_and_decay() {
        let mut e = EligibilityTrace::zeros(3);
        e.visit(0);
        e.decay(0.5);
        e.visit(1);
        e.visit(1);
        assert_eq!(e.as_slice(), &[0.5, 2.0, 0.0]);

        e.decay(0.0);
        assert!(e.is_zero());
    }

    #[test]
    fn test_update_with_trace() {
        let mut v = ValueFunction::zeros(3);
        let mut e = EligibilityTrace::zeros(3);
        e.visit(0);
        e.decay(0.5);
        e.visit(2);
        v.update_with_trace(&e, 0.1, 2.0);

        assert!((v[0] - 0.1).abs() < 1e-6);
        assert_eq!(v[1], 0.0);
        assert!((v[2] - 0.2).abs() < 1e-6);
    }
}
