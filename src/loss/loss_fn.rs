use ndarray::ArrayView2;

/// A scalar objective over a batch of predictions.
///
/// Loss functions are plain elementwise transforms reduced by an arithmetic
/// mean; differentiating them is the autodiff engine's business, not theirs.
pub trait LossFn {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32;
}
