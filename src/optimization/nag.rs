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

/// Nesterov accelerated gradient.
///
/// Shares the velocity recurrence with [`super::Momentum`] but steps from the
/// look-ahead position `p + momentum*v - lr*g`.
#[derive(Debug)]
pub struct Nag {
    learning_rate: f32,
    momentum: f32,
    clipnorm: f32,
    regularizer: Regularizer,
    velocity: HashMap<ParamId, ArrayD<f32>>,
}

impl Nag {
    /// Creates a new `Nag`.
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

impl Default for Nag {
    fn default() -> Self {
        Self::new(0.01, 0.9)
    }
}

impl UpdateRule for Nag {
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
            let updated = p.value() + &(&v * self.momentum) - (g * self.learning_rate);
            let updated = self.regularizer.regularize(updated);

            plan.push(UpdatePair::accum(p.id(), AccumKind::Velocity, v.clone()));
            plan.push(UpdatePair::param(p.id(), updated));
            *m = v;
        }

        let nparams = params.len();
        debug!(params = nparams; "nag: built update plan");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::arr1;

    use super::*;
    use crate::plan::UpdateTarget;

    #[test]
    fn first_step_takes_the_look_ahead_position() {
        let mut params = Parameters::new();
        let b = params.register("b", arr1(&[1.0_f32]).into_dyn());
        let grads = [arr1(&[0.5_f32]).into_dyn()];

        let plan = Nag::new(0.1, 0.9).updates(&params, &grads).unwrap();

        // v = -0.05, p' = 1 + 0.9*(-0.05) - 0.05 = 0.905
        assert_eq!(plan[0].target, UpdateTarget::Accum(b, AccumKind::Velocity));
        assert!((plan[0].value[[0]] + 0.05).abs() < 1e-6);
        assert!((plan[1].value[[0]] - 0.905).abs() < 1e-6);
    }

    #[test]
    fn second_step_reuses_the_stored_velocity() {
        let mut params = Parameters::new();
        let b = params.register("b", arr1(&[1.0_f32]).into_dyn());
        let grads = [arr1(&[0.5_f32]).into_dyn()];
        let mut rule = Nag::new(0.1, 0.9);

        let plan = rule.updates(&params, &grads).unwrap();
        params.assign(b, plan[1].value.clone());

        // v2 = 0.9*(-0.05) - 0.05 = -0.095
        // p2 = 0.905 + 0.9*(-0.095) - 0.05 = 0.7695
        let plan = rule.updates(&params, &grads).unwrap();
        assert!((plan[0].value[[0]] + 0.095).abs() < 1e-6);
        assert!((plan[1].value[[0]] - 0.7695).abs() < 1e-6);
    }
}
