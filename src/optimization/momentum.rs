use std::collections::HashMap;

use log::debug;
use ndarray::ArrayD;

use super::{UpdateRule, update_rule::check_aligned};
use crate::{
    clip::clip_norms,
    error::Result,
    parameters::{ParamId, Parameters},
    plan::{AccumKind, UpdatePair, UpdatePlan},
    regularizer::Regularizer,
};

/// Gradient descent with classical momentum.
///
/// Keeps one velocity tensor per parameter, created lazily as zeros on first
/// sight and carried across steps.
#[derive(Debug)]
pub struct Momentum {
    learning_rate: f32,
    momentum: f32,
    clipnorm: f32,
    regularizer: Regularizer,
    velocity: HashMap<ParamId, ArrayD<f32>>,
}

impl Momentum {
    /// Creates a new `Momentum`.
    ///
    /// # Arguments
    /// * `learning_rate` - The step-size coefficient.
    /// * `momentum` - Weighting of the carried-over velocity.
    pub fn new(learning_rate: f32, momentum: f32) -> Self {
        Self {
            learning_rate,
            momentum,
            clipnorm: 0.0,
            regularizer: Regularizer::default(),
            velocity: HashMap::new(),
        }
    }

    /// Bounds the per-tensor gradient norm seen by every update.
    pub fn with_clipnorm(mut self, clipnorm: f32) -> Self {
        self.clipnorm = clipnorm;
        self
    }

    /// Attaches a regularizer to the produced parameter values.
    pub fn with_regularizer(mut self, regularizer: Regularizer) -> Self {
        self.regularizer = regularizer;
        self
    }
}

impl Default for Momentum {
    fn default() -> Self {
        Self::new(0.01, 0.9)
    }
}

impl UpdateRule for Momentum {
    fn updates(&mut self, params: &Parameters, grads: &[ArrayD<f32>]) -> Result<UpdatePlan> {
        check_aligned(params, grads)?;
        let grads = clip_norms(grads, self.clipnorm);

        let mut plan = Vec::with_capacity(2 * params.len());
        for (p, g) in params.iter().zip(&grads) {
            let m = self
                .velocity
                .entry(p.id())
                .or_insert_with(|| ArrayD::zeros(p.value().raw_dim()));

            let v = &*m * self.momentum - g * self.learning_rate;
            let updated = p.value() + &v;
            let updated = self.regularizer.regularize(updated);

            plan.push(UpdatePair::accum(p.id(), AccumKind::Velocity, v.clone()));
            plan.push(UpdatePair::param(p.id(), updated));
            *m = v;
        }

        let nparams = params.len();
        debug!(params = nparams; "momentum: built update plan");
        Ok(plan)
    }
}
