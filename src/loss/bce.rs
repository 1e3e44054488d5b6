use ndarray::ArrayView2;

use super::LossFn;

/// Binary cross-entropy loss function.
///
/// Predictions must lie strictly inside `(0, 1)`.
#[derive(Default, Clone, Copy)]
pub struct Bce;

impl Bce {
    /// Returns a new `Bce`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Bce {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
        let pos = &y * &y_pred.mapv(f32::ln);
        let neg = &y.mapv(|t| 1.0 - t) * &y_pred.mapv(|p| (1.0 - p).ln());

        -(pos + neg).mean().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use ndarray::arr2;

    use super::*;

    #[test]
    fn averages_the_elementwise_entropies() {
        let y_pred = arr2(&[[0.9_f32, 0.1]]);
        let y = arr2(&[[1.0_f32, 0.0]]);

        let loss = Bce::new().loss(y_pred.view(), y.view());
        let expected = -(0.9_f32.ln() + 0.9_f32.ln()) / 2.0;

        assert!((loss - expected).abs() < 1e-6);
    }

    #[test]
    fn confident_wrong_predictions_cost_more() {
        let y = arr2(&[[1.0_f32]]);
        let hedged = arr2(&[[0.6_f32]]);
        let wrong = arr2(&[[0.1_f32]]);

        let bce = Bce::new();
        assert!(bce.loss(wrong.view(), y.view()) > bce.loss(hedged.view(), y.view()));
    }
}
