use ndarray::ArrayView2;

use super::LossFn;

/// Mean absolute error loss function.
#[derive(Default, Clone, Copy)]
pub struct Mae;

impl Mae {
    /// Returns a new `Mae`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mae {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
        (&y_pred - &y).mapv(f32::abs).mean().unwrap_or_default()
    }
}
