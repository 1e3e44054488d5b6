use serde::{Deserialize, Serialize};

use crate::{
    error::{OptimErr, Result},
    optimization::{Adadelta, Adagrad, Momentum, Nag, RmsProp, Sgd, UpdateRule},
    regularizer::Regularizer,
};

/// The specification for the `Regularizer` struct.
///
/// All coefficients default to zero, the identity transform.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegularizerSpec {
    pub l1: f32,
    pub l2: f32,
    pub maxnorm: f32,
}

/// The specification for the `UpdateRule` trait.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSpec {
    Sgd {
        learning_rate: f32,
    },
    Momentum {
        learning_rate: f32,
        momentum: f32,
    },
    Nag {
        learning_rate: f32,
        momentum: f32,
    },
    RmsProp {
        learning_rate: f32,
        rho: f32,
        epsilon: f32,
    },
    Adagrad {
        learning_rate: f32,
        epsilon: f32,
    },
    Adadelta {
        learning_rate: f32,
        rho: f32,
        epsilon: f32,
    },
}

/// The specification for a fully configured update rule.
///
/// `clipnorm` and `regularizer` default to their disabled forms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateSpec {
    pub rule: RuleSpec,
    #[serde(default)]
    pub clipnorm: f32,
    #[serde(default)]
    pub regularizer: RegularizerSpec,
}

/// Builds `UpdateRule`s given a specification.
#[derive(Default)]
pub struct RuleBuilder;

impl RuleBuilder {
    /// Creates a new `RuleBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new update rule following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification for the rule and its shared policy.
    ///
    /// # Errors
    /// `NonPositiveEpsilon` if the spec carries an epsilon that cannot guard
    /// a division.
    pub fn build(&self, spec: &UpdateSpec) -> Result<Box<dyn UpdateRule>> {
        let r = spec.regularizer;
        let regularizer = Regularizer::new(r.l1, r.l2, r.maxnorm);
        let clipnorm = spec.clipnorm;

        let rule: Box<dyn UpdateRule> = match spec.rule {
            RuleSpec::Sgd { learning_rate } => Box::new(
                Sgd::new(learning_rate)
                    .with_clipnorm(clipnorm)
                    .with_regularizer(regularizer),
            ),
            RuleSpec::Momentum {
                learning_rate,
                momentum,
            } => Box::new(
                Momentum::new(learning_rate, momentum)
                    .with_clipnorm(clipnorm)
                    .with_regularizer(regularizer),
            ),
            RuleSpec::Nag {
                learning_rate,
                momentum,
            } => Box::new(
                Nag::new(learning_rate, momentum)
                    .with_clipnorm(clipnorm)
                    .with_regularizer(regularizer),
            ),
            RuleSpec::RmsProp {
                learning_rate,
                rho,
                epsilon,
            } => Box::new(
                RmsProp::new(learning_rate, rho, self.check_epsilon(epsilon)?)
                    .with_clipnorm(clipnorm)
                    .with_regularizer(regularizer),
            ),
            RuleSpec::Adagrad {
                learning_rate,
                epsilon,
            } => Box::new(
                Adagrad::new(learning_rate, self.check_epsilon(epsilon)?)
                    .with_clipnorm(clipnorm)
                    .with_regularizer(regularizer),
            ),
            RuleSpec::Adadelta {
                learning_rate,
                rho,
                epsilon,
            } => Box::new(
                Adadelta::new(learning_rate, rho, self.check_epsilon(epsilon)?)
                    .with_clipnorm(clipnorm)
                    .with_regularizer(regularizer),
            ),
        };

        Ok(rule)
    }

    fn check_epsilon(&self, epsilon: f32) -> Result<f32> {
        if epsilon <= 0.0 {
            return Err(OptimErr::NonPositiveEpsilon { got: epsilon });
        }

        Ok(epsilon)
    }
}
