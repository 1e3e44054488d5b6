use log::debug;
use ndarray::ArrayD;

use super::{UpdateRule, update_rule::check_aligned};
use crate::{
    clip::clip_norms,
    error::Result,
    parameters::Parameters,
    plan::{UpdatePair, UpdatePlan},
    regularizer::Regularizer,
};

/// Plain stochastic gradient descent.
#[derive(Debug)]
pub struct Sgd {
    learning_rate: f32,
    clipnorm: f32,
    regularizer: Regularizer,
}

impl Sgd {
    /// Creates a new `Sgd`.
    ///
    /// # Arguments
    /// * `learning_rate` - The step-size coefficient.
    pub fn new(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            clipnorm: 0.0,
            regularizer: Regularizer::default(),
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

impl Default for Sgd {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl UpdateRule for Sgd {
    fn updates(&mut self, params: &Parameters, grads: &[ArrayD<f32>]) -> Result<UpdatePlan> {
        check_aligned(params, grads)?;
        let grads = clip_norms(grads, self.clipnorm);

        let mut plan = Vec::with_capacity(params.len());
        for (p, g) in params.iter().zip(&grads) {
            let updated = p.value() - &(g * self.learning_rate);
            let updated = self.regularizer.regularize(updated);

            plan.push(UpdatePair::param(p.id(), updated));
        }

        let nparams = params.len();
        debug!(params = nparams; "sgd: built update plan");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::arr1;

    use super::*;
    use crate::{error::OptimErr, plan::UpdateTarget};

    #[test]
    fn single_step_matches_the_formula() {
        let mut params = Parameters::new();
        let b = params.register("b", arr1(&[1.0_f32]).into_dyn());
        let grads = [arr1(&[0.5_f32]).into_dyn()];

        let plan = Sgd::new(0.1).updates(&params, &grads).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].target, UpdateTarget::Param(b));
        assert!((plan[0].value[[0]] - 0.95).abs() < 1e-6);
    }

    #[test]
    fn clipnorm_shrinks_oversized_gradients() {
        let mut params = Parameters::new();
        params.register("b", arr1(&[1.0_f32, 1.0]).into_dyn());
        let grads = [arr1(&[3.0_f32, 4.0]).into_dyn()];

        let plan = Sgd::new(0.1)
            .with_clipnorm(1.0)
            .updates(&params, &grads)
            .unwrap();

        // The gradient rescales to [0.6, 0.8] before the step.
        assert!((plan[0].value[[0]] - 0.94).abs() < 1e-3);
        assert!((plan[0].value[[1]] - 0.92).abs() < 1e-3);
    }

    #[test]
    fn regularizer_shapes_the_emitted_value() {
        let mut params = Parameters::new();
        params.register("b", arr1(&[1.0_f32]).into_dyn());
        let grads = [arr1(&[0.5_f32]).into_dyn()];

        let plan = Sgd::new(0.1)
            .with_regularizer(Regularizer::new(0.0, 0.1, 0.0))
            .updates(&params, &grads)
            .unwrap();

        assert!((plan[0].value[[0]] - 0.855).abs() < 1e-6);
    }

    #[test]
    fn rejects_misaligned_gradients() {
        let mut params = Parameters::new();
        params.register("b", arr1(&[1.0_f32]).into_dyn());

        let err = Sgd::default().updates(&params, &[]).unwrap_err();
        assert!(matches!(
            err,
            OptimErr::GradientCountMismatch {
                got: 0,
                expected: 1
            }
        ));
    }
}
