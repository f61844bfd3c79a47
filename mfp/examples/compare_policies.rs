//! Compares two policies on a small MDP with TD(0), TD(lambda) and Monte Carlo.
use std::convert::TryFrom;
use anyhow::Result;
use clap::Parser;
use mfp::compare::{compare, Comparison};
use mfp_core::{EvaluatorConfig, EvaluatorKind, StepSize};
use mfp_tabular::{presets, TabularMdpConfig};
use serde::Serialize;

const N_EPISODES: usize = 1000;
const ALPHA: f32 = 0.1;
const LAMBDA: f32 = 0.5;
const SEED: i64 = 42;

/// Compares two policies by their values estimated with model-free prediction
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of episodes per evaluation
    #[arg(long, default_value_t = N_EPISODES)]
    n_episodes: usize,

    /// Step size of TD methods
    #[arg(long, default_value_t = ALPHA)]
    alpha: f32,

    /// Trace decay parameter of TD(lambda)
    #[arg(long, default_value_t = LAMBDA)]
    lambda: f32,

    /// Use a constant step size instead of sample averages in Monte Carlo
    #[arg(long)]
    mc_alpha: Option<f32>,

    /// Random seed of the environment and the policies
    #[arg(long, default_value_t = SEED)]
    seed: i64,

    /// YAML file of an MDP, used in place of the built-in one
    #[arg(long)]
    mdp: Option<String>,

    /// Writes the state by state comparison to this CSV file
    #[arg(long)]
    csv: Option<String>,
}

#[derive(Debug, Serialize)]
struct CsvRecord {
    algorithm: String,
    state: usize,
    v_pi1: f32,
    v_pi2: f32,
}

fn evaluator_configs(args: &Args) -> Vec<EvaluatorConfig> {
    let base = EvaluatorConfig::default()
        .alpha(args.alpha)
        .lambda(args.lambda)
        .mc_step_size(match args.mc_alpha {
            Some(alpha) => StepSize::Constant(alpha),
            None => StepSize::SampleAverage,
        });

    [
        EvaluatorKind::Td,
        EvaluatorKind::TdLambda,
        EvaluatorKind::MonteCarlo,
    ]
    .iter()
    .map(|kind| base.clone().kind(*kind))
    .collect()
}

fn run(args: &Args) -> Result<Vec<Comparison>> {
    let mdp = match &args.mdp {
        Some(path) => TabularMdpConfig::load(path)?,
        None => presets::create_mdp(),
    };

    let policy_seed = u64::try_from(args.seed)
        .map_err(|_| anyhow::anyhow!("Seed must be non-negative, got {}", args.seed))?;

    evaluator_configs(args)
        .iter()
        .map(|config| {
            let mut policy_1 = presets::create_policy_1(policy_seed)?;
            let mut policy_2 = presets::create_policy_2(policy_seed)?;
            compare(
                config,
                &mdp,
                args.seed,
                &mut policy_1,
                &mut policy_2,
                args.n_episodes,
            )
        })
        .collect()
}

fn report(comparisons: &[Comparison]) {
    for (i, label) in ["pi1", "pi2"].iter().enumerate() {
        for c in comparisons.iter() {
            let values = if i == 0 { &c.values_1 } else { &c.values_2 };
            println!("Estimated value function of {} ({}):", label, c.algorithm);
            println!("{:?}", values);
        }
        println!();
    }

    println!("Comparison of the value functions of pi1 and pi2:");
    for c in comparisons.iter() {
        println!("------- {} -------", c.algorithm);
        if c.dominates() {
            println!("pi1 is better than pi2 ({}).", c.algorithm);
        } else {
            println!(
                "pi1 is not strictly better than pi2 ({}), state by state:",
                c.algorithm
            );
        }
        for (s, v1, v2) in c.rows() {
            println!("State {} ({}): V_pi1 = {}, V_pi2 = {}", s, c.algorithm, v1, v2);
        }
    }
}

fn write_csv(path: &str, comparisons: &[Comparison]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    for c in comparisons.iter() {
        for (state, v_pi1, v_pi2) in c.rows() {
            wtr.serialize(CsvRecord {
                algorithm: c.algorithm.clone(),
                state,
                v_pi1,
                v_pi2,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let comparisons = run(&args)?;
    report(&comparisons);
    if let Some(path) = &args.csv {
        write_csv(path, &comparisons)?;
    }

    Ok(())
}
