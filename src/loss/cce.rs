use ndarray::{ArrayView2, Axis};

use super::LossFn;

/// Categorical cross-entropy loss function.
///
/// Expects one class distribution per row; predictions must be strictly
/// positive where the target is nonzero.
#[derive(Default, Clone, Copy)]
pub struct Cce;

impl Cce {
    /// Returns a new `Cce`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Cce {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
        let per_row = (&y * &y_pred.mapv(f32::ln)).sum_axis(Axis(1));
        -per_row.mean().unwrap_or_default()
    }
}
