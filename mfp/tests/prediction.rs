use anyhow::Result;
use mfp_core::{
    record::{AggregateRecorder, RecordStorage},
    Env, Evaluator, EvaluatorConfig, EvaluatorKind, McEvaluator, StepSize, TdEvaluator,
    TdLambdaEvaluator,
};
use mfp_tabular::{presets, TabularMdp, TabularMdpConfig, TabularPolicy};
use test_log::test;

/// Exact values of `probs` on `mdp` by iterative policy evaluation.
fn true_values(mdp: &TabularMdpConfig, probs: &[Vec<f32>]) -> Vec<f32> {
    let gamma = mdp.discount_factor as f64;
    let mut v = vec![0f64; mdp.num_states];
    for _ in 0..10_000 {
        let mut v_new = vec![0f64; mdp.num_states];
        for t in mdp.transitions.iter() {
            let p_act = probs[t.state][t.act] as f64;
            for o in t.outcomes.iter() {
                v_new[t.state] +=
                    p_act * o.prob as f64 * (o.reward as f64 + gamma * v[o.next_state]);
            }
        }
        v = v_new;
    }
    v.into_iter().map(|x| x as f32).collect()
}

fn assert_close(v: &[f32], expected: &[f32], tol: f32, name: &str) {
    assert_eq!(v.len(), expected.len());
    for (s, (x, y)) in v.iter().zip(expected.iter()).enumerate() {
        assert!(
            (x - y).abs() < tol,
            "{}: state {}, {} vs {}, {:?} vs {:?}",
            name,
            s,
            x,
            y,
            v,
            expected
        );
    }
}

#[test]
fn test_three_state_chain() -> Result<()> {
    let config = presets::chain(3, 1.0, 0.9);
    let build = || TabularMdp::build(&config, 0);
    let mut policy = TabularPolicy::deterministic(&[0, 0, 0], 1)?;

    let mut evaluators: Vec<Box<dyn Evaluator>> = vec![
        Box::new(TdEvaluator::new(build()?, 0.1)?),
        Box::new(TdLambdaEvaluator::new(build()?, 0.1, 0.5)?),
        Box::new(McEvaluator::with_step_size(build()?, StepSize::Constant(0.1))?),
        Box::new(McEvaluator::new(build()?)?),
    ];

    for evaluator in evaluators.iter_mut() {
        let v = evaluator.evaluate(&mut policy, 1000)?;
        assert_close(&v, &[1.9, 1.0, 0.0], 0.05, evaluator.name());
        assert_eq!(v[2], 0.0);
    }
    Ok(())
}

#[test]
fn test_monte_carlo_exact_on_deterministic_chain() -> Result<()> {
    let gamma = 0.8f32;
    let reward = 1.0f32;
    let config = (0..4).fold(
        TabularMdpConfig::new(5, 1, gamma).terminal_states(vec![4]),
        |c, s| {
            let r = if s == 3 { reward } else { 0.0 };
            c.transition(s, 0, &[(s + 1, 1.0, r)])
        },
    );
    let mut evaluator = McEvaluator::new(TabularMdp::build(&config, 0)?)?;
    let mut policy = TabularPolicy::deterministic(&[0; 5], 1)?;
    let v = evaluator.evaluate(&mut policy, 1)?;

    let expected: Vec<f32> = (0..5)
        .map(|s| if s < 4 { gamma.powi(3 - s) * reward } else { 0.0 })
        .collect();
    assert_close(&v, &expected, 1e-6, "Monte Carlo");
    Ok(())
}

#[test]
fn test_lambda_zero_matches_td0_on_stochastic_mdp() -> Result<()> {
    let config = presets::create_mdp();
    let mut td0 = TdEvaluator::new(TabularMdp::build(&config, 7)?, 0.1)?;
    let mut td_lambda = TdLambdaEvaluator::new(TabularMdp::build(&config, 7)?, 0.1, 0.0)?;

    let v1 = td0.evaluate(&mut presets::create_policy_1(3)?, 300)?;
    let v2 = td_lambda.evaluate(&mut presets::create_policy_1(3)?, 300)?;

    assert_close(&v1, &v2, 1e-5, "TD(lambda = 0)");
    assert_eq!(v2[3], 0.0);
    Ok(())
}

#[test]
fn test_converges_to_true_values() -> Result<()> {
    let config = presets::create_mdp();
    let probs = vec![vec![0.9, 0.1]; 4];
    let expected = true_values(&config, &probs);

    let evaluator_configs = vec![
        EvaluatorConfig::default().kind(EvaluatorKind::Td).alpha(0.005),
        EvaluatorConfig::default()
            .kind(EvaluatorKind::TdLambda)
            .alpha(0.005)
            .lambda(0.5),
        EvaluatorConfig::default().kind(EvaluatorKind::MonteCarlo),
    ];

    for evaluator_config in evaluator_configs.iter() {
        let mut evaluator = evaluator_config.build(TabularMdp::build(&config, 11)?)?;
        let mut policy = TabularPolicy::new(probs.clone(), 5)?;
        let v = evaluator.evaluate(&mut policy, 10_000)?;
        assert_close(&v, &expected, 0.3, evaluator.name());
    }
    Ok(())
}

#[test]
fn test_episode_records() -> Result<()> {
    let config = presets::create_mdp();
    let env = TabularMdp::build(&config, 0)?;
    assert_eq!(env.num_states(), 4);

    let mut evaluator = McEvaluator::new(env)?;
    let mut storage = RecordStorage::new();
    evaluator.evaluate_with_recorder(&mut presets::create_policy_1(0)?, 200, &mut storage)?;
    assert_eq!(storage.len(), 200);

    let record = storage.flush();
    assert!(record.get_scalar("episode_length_min")? >= 3.0);
    assert_eq!(record.get_scalar("episode_max")?, 199.0);
    assert!(record.get_scalar("episode_return_max")? <= presets::GOAL_REWARD - 2.0);
    Ok(())
}
