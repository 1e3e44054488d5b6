use ndarray::ArrayD;

use crate::{
    error::{OptimErr, Result},
    gradients::GradientSource,
    parameters::Parameters,
    plan::UpdatePlan,
};

/// Turns one step's gradients into an ordered plan of new state values.
///
/// A rule owns the auxiliary accumulators of every parameter it has seen and
/// is their only writer. `updates` never assigns to parameters; applying the
/// returned plan is the caller's responsibility.
pub trait UpdateRule {
    /// Builds the update plan for one step from precomputed gradients.
    ///
    /// # Arguments
    /// * `params` - The parameter arena, visited in registration order.
    /// * `grads` - Per-parameter gradients aligned with the arena.
    ///
    /// # Errors
    /// `GradientCountMismatch` if `grads` is not aligned with `params`.
    fn updates(&mut self, params: &Parameters, grads: &[ArrayD<f32>]) -> Result<UpdatePlan>;

    /// Builds the update plan for one step, pulling gradients from `source`.
    ///
    /// This is the entry point for callers that hold a scalar objective: the
    /// differentiation engine behind `source` resolves it into per-parameter
    /// gradients first.
    fn updates_with(
        &mut self,
        params: &Parameters,
        source: &mut dyn GradientSource,
    ) -> Result<UpdatePlan> {
        let grads = source.gradients(params)?;
        self.updates(params, &grads)
    }
}

impl std::fmt::Debug for dyn UpdateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn UpdateRule")
    }
}

/// Checks that `grads` carries exactly one gradient per parameter.
pub(super) fn check_aligned(params: &Parameters, grads: &[ArrayD<f32>]) -> Result<()> {
    if grads.len() != params.len() {
        return Err(OptimErr::GradientCountMismatch {
            got: grads.len(),
            expected: params.len(),
        });
    }

    Ok(())
}
