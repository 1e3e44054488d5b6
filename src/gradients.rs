use ndarray::ArrayD;

use crate::{error::Result, parameters::Parameters};

/// The seam to the external differentiation engine.
///
/// The engine behind this trait owns the scalar objective; asking for
/// `gradients` differentiates it with respect to every parameter of the
/// arena. Gradients are consumed immediately by the update rules and never
/// persisted.
pub trait GradientSource {
    /// Produces this step's gradients, aligned with the arena order.
    fn gradients(&mut self, params: &Parameters) -> Result<Vec<ArrayD<f32>>>;
}

impl<F> GradientSource for F
where
    F: FnMut(&Parameters) -> Result<Vec<ArrayD<f32>>>,
{
    fn gradients(&mut self, params: &Parameters) -> Result<Vec<ArrayD<f32>>> {
        self(params)
    }
}
