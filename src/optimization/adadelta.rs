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

/// Adadelta: steps scaled by the ratio of two running square averages.
///
/// Keeps two accumulators per parameter: the squared-gradient average and the
/// squared-delta average that feeds the next step's numerator.
#[derive(Debug)]
pub struct Adadelta {
    learning_rate: f32,
    rho: f32,
    epsilon: f32,
    clipnorm: f32,
    regularizer: Regularizer,
    acc: HashMap<ParamId, ArrayD<f32>>,
    acc_delta: HashMap<ParamId, ArrayD<f32>>,
}

impl Adadelta {
    /// Creates a new `Adadelta`.
    ///
    /// # Arguments
    /// * `learning_rate` - The step-size coefficient.
    /// * `rho` - Decay rate shared by both square averages.
    /// * `epsilon` - Additive guard for both square roots.
    pub fn new(learning_rate: f32, rho: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            rho,
            epsilon,
            clipnorm: 0.0,
            regularizer: Regularizer::default(),
            acc: HashMap::new(),
            acc_delta: HashMap::new(),
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

impl Default for Adadelta {
    fn default() -> Self {
        Self::new(1.0, 0.95, 1e-6)
    }
}

impl UpdateRule for Adadelta {
    fn updates(&mut self, params: &Parameters, grads: &[ArrayD<f32>]) -> Result<UpdatePlan> {
        check_aligned(params, grads)?;
        let grads = clip_norms(grads, self.clipnorm);

        let mut plan = Vec::with_capacity(3 * params.len());
        for (p, g) in params.iter().zip(&grads) {
            let acc = self
                .acc
                .entry(p.id())
                .or_insert_with(|| ArrayD::zeros(p.value().raw_dim()));
            let acc_delta = self
                .acc_delta
                .entry(p.id())
                .or_insert_with(|| ArrayD::zeros(p.value().raw_dim()));

            let acc_new = &*acc * self.rho + &(g.mapv(|x| x * x) * (1.0 - self.rho));
            let numer = (&*acc_delta + self.epsilon).mapv(f32::sqrt);
            let denom = (&acc_new + self.epsilon).mapv(f32::sqrt);
            let update = g * &numer / denom;

            let updated = p.value() - &(&update * self.learning_rate);
            let updated = self.regularizer.regularize(updated);
            let acc_delta_new =
                &*acc_delta * self.rho + &(update.mapv(|x| x * x) * (1.0 - self.rho));

            plan.push(UpdatePair::accum(p.id(), AccumKind::SqAvg, acc_new.clone()));
            plan.push(UpdatePair::param(p.id(), updated));
            plan.push(UpdatePair::accum(
                p.id(),
                AccumKind::DeltaAvg,
                acc_delta_new.clone(),
            ));

            *acc = acc_new;
            *acc_delta = acc_delta_new;
        }

        let nparams = params.len();
        debug!(params = nparams; "adadelta: built update plan");
        Ok(plan)
    }
}
