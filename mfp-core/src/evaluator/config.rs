//! Configuration of evaluators.
use super::{Evaluator, McEvaluator, StepSize, TdEvaluator, TdLambdaEvaluator};
use crate::{error::MfpError, Env};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Prediction algorithm.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    /// [`TdEvaluator`].
    Td,

    /// [`TdLambdaEvaluator`].
    TdLambda,

    /// [`McEvaluator`].
    MonteCarlo,
}

/// Configuration of an [`Evaluator`].
///
/// Fields irrelevant to the selected algorithm are ignored.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Algorithm.
    pub kind: EvaluatorKind,

    /// Step size of TD(0) and TD(lambda).
    pub alpha: f32,

    /// Trace decay parameter of TD(lambda).
    pub lambda: f32,

    /// Step size schedule of Monte Carlo.
    pub mc_step_size: StepSize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            kind: EvaluatorKind::Td,
            alpha: 0.1,
            lambda: 0.5,
            mc_step_size: StepSize::SampleAverage,
        }
    }
}

impl EvaluatorConfig {
    /// Sets the algorithm.
    pub fn kind(mut self, v: EvaluatorKind) -> Self {
        self.kind = v;
        self
    }

    /// Sets the step size of TD methods.
    pub fn alpha(mut self, v: f32) -> Self {
        self.alpha = v;
        self
    }

    /// Sets the trace decay parameter.
    pub fn lambda(mut self, v: f32) -> Self {
        self.lambda = v;
        self
    }

    /// Sets the step size schedule of Monte Carlo.
    pub fn mc_step_size(mut self, v: StepSize) -> Self {
        self.mc_step_size = v;
        self
    }

    /// Builds the configured evaluator on `env`.
    pub fn build<E: Env + 'static>(&self, env: E) -> Result<Box<dyn Evaluator>, MfpError> {
        let evaluator: Box<dyn Evaluator> = match self.kind {
            EvaluatorKind::Td => Box::new(TdEvaluator::new(env, self.alpha)?),
            EvaluatorKind::TdLambda => {
                Box::new(TdLambdaEvaluator::new(env, self.alpha, self.lambda)?)
            }
            EvaluatorKind::MonteCarlo => {
                Box::new(McEvaluator::with_step_size(env, self.mc_step_size)?)
            }
        };
        Ok(evaluator)
    }

    /// Constructs [`EvaluatorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`EvaluatorConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
