use ndarray::{ArrayD, IxDyn, arr1, arr2};
use optim_core::{
    Parameters, RegularizerSpec, Result, RuleBuilder, RuleSpec, UpdatePlan,
    UpdateSpec, UpdateTarget,
};

const STEPS: usize = 2000;

fn specs() -> Vec<UpdateSpec> {
    let rules = [
        RuleSpec::Sgd { learning_rate: 0.1 },
        RuleSpec::Momentum {
            learning_rate: 0.05,
            momentum: 0.9,
        },
        RuleSpec::Nag {
            learning_rate: 0.05,
            momentum: 0.9,
        },
        RuleSpec::RmsProp {
            learning_rate: 0.01,
            rho: 0.9,
            epsilon: 1e-6,
        },
        RuleSpec::Adagrad {
            learning_rate: 0.5,
            epsilon: 1e-6,
        },
        RuleSpec::Adadelta {
            learning_rate: 1.0,
            rho: 0.95,
            epsilon: 1e-6,
        },
    ];

    rules
        .into_iter()
        .map(|rule| UpdateSpec {
            rule,
            clipnorm: 0.0,
            regularizer: RegularizerSpec::default(),
        })
        .collect()
}

fn targets() -> Vec<ArrayD<f32>> {
    vec![
        arr2(&[[0.5_f32, -0.25], [0.75, 0.1]]).into_dyn(),
        arr1(&[0.3_f32, -0.4]).into_dyn(),
    ]
}

fn build_arena() -> Parameters {
    let mut params = Parameters::new();
    params.register("w", ArrayD::zeros(IxDyn(&[2, 2])));
    params.register("b", ArrayD::zeros(IxDyn(&[2])));
    params
}

/// Plays the role of the external executor: assigns every parameter pair of
/// the plan back into the arena.
fn apply(params: &mut Parameters, plan: UpdatePlan) {
    for pair in plan {
        if let UpdateTarget::Param(id) = pair.target {
            params.assign(id, pair.value);
        }
    }
}

fn distance(params: &Parameters, targets: &[ArrayD<f32>]) -> f32 {
    params
        .iter()
        .zip(targets)
        .map(|(p, c)| (p.value() - c).mapv(|x| x * x).sum())
        .sum::<f32>()
        .sqrt()
}

#[test]
fn every_rule_descends_a_quadratic_bowl() {
    let _ = env_logger::builder().is_test(true).try_init();

    let targets = targets();
    for spec in specs() {
        let mut params = build_arena();
        let mut rule = RuleBuilder::new().build(&spec).unwrap();

        let mut source = |ps: &Parameters| -> Result<Vec<ArrayD<f32>>> {
            Ok(ps
                .iter()
                .zip(&targets)
                .map(|(p, c)| (p.value() - c) * 2.0)
                .collect())
        };

        let start = distance(&params, &targets);
        for _ in 0..STEPS {
            let plan = rule.updates_with(&params, &mut source).unwrap();
            apply(&mut params, plan);
        }

        let end = distance(&params, &targets);
        assert!(
            end < start * 0.1,
            "rule did not descend: start = {start}, end = {end}, spec = {spec:?}"
        );
    }
}

#[test]
fn shared_policy_does_not_break_the_descent() {
    let spec = UpdateSpec {
        rule: RuleSpec::Momentum {
            learning_rate: 0.05,
            momentum: 0.9,
        },
        clipnorm: 1.0,
        regularizer: RegularizerSpec {
            l1: 0.0,
            l2: 1e-4,
            maxnorm: 0.0,
        },
    };

    let targets = targets();
    let mut params = build_arena();
    let mut rule = RuleBuilder::new().build(&spec).unwrap();

    let mut source = |ps: &Parameters| -> Result<Vec<ArrayD<f32>>> {
        Ok(ps
            .iter()
            .zip(&targets)
            .map(|(p, c)| (p.value() - c) * 2.0)
            .collect())
    };

    let start = distance(&params, &targets);
    for _ in 0..STEPS {
        let plan = rule.updates_with(&params, &mut source).unwrap();
        apply(&mut params, plan);
    }

    // The decayed fixed point sits near the targets, not exactly on them.
    let end = distance(&params, &targets);
    assert!(
        end < start * 0.2,
        "start = {start}, end = {end}"
    );
}
