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

/// Adagrad: per-element step sizes shrink with the cumulative squared
/// gradient.
///
/// The accumulator is a plain running sum `acc' = acc + g^2` over the whole
/// session, so the effective step size never grows.
#[derive(Debug)]
pub struct Adagrad {
    learning_rate: f32,
    epsilon: f32,
    clipnorm: f32,
    regularizer: Regularizer,
    acc: HashMap<ParamId, ArrayD<f32>>,
}

impl Adagrad {
    /// Creates a new `Adagrad`.
    ///
    /// # Arguments
    /// * `learning_rate` - The step-size coefficient.
    /// * `epsilon` - Additive guard for the normalizing square root.
    pub fn new(learning_rate: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            epsilon,
            clipnorm: 0.0,
            regularizer: Regularizer::default(),
            acc: HashMap::new(),
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

impl Default for Adagrad {
    fn default() -> Self {
        Self::new(0.01, 1e-6)
    }
}

impl UpdateRule for Adagrad {
    fn updates(&mut self, params: &Parameters, grads: &[ArrayD<f32>]) -> Result<UpdatePlan> {
        check_aligned(params, grads)?;
        let grads = clip_norms(grads, self.clipnorm);

        let mut plan = Vec::with_capacity(2 * params.len());
        for (p, g) in params.iter().zip(&grads) {
            let acc = self
                .acc
                .entry(p.id())
                .or_insert_with(|| ArrayD::zeros(p.value().raw_dim()));

            let acc_new = &*acc + &g.mapv(|x| x * x);
            let denom = (&acc_new + self.epsilon).mapv(f32::sqrt);
            let updated = p.value() - &((self.learning_rate / &denom) * g);
            let updated = self.regularizer.regularize(updated);

            plan.push(UpdatePair::accum(p.id(), AccumKind::SqSum, acc_new.clone()));
            plan.push(UpdatePair::param(p.id(), updated));
            *acc = acc_new;
        }

        let nparams = params.len();
        debug!(params = nparams; "adagrad: built update plan");
        Ok(plan)
    }
}
