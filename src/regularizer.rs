use ndarray::{ArrayD, Axis};

use crate::clip::NORM_EPS;

/// Shrinkage and norm constraints applied to a proposed parameter value.
///
/// The default regularizer is the identity transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct Regularizer {
    l1: f32,
    l2: f32,
    maxnorm: f32,
}

impl Regularizer {
    /// Creates a new `Regularizer`.
    ///
    /// # Arguments
    /// * `l1` - Flat shrinkage subtracted from every element.
    /// * `l2` - Proportional decay coefficient.
    /// * `maxnorm` - Per-column L2 norm bound, `0` disables the constraint.
    pub fn new(l1: f32, l2: f32, maxnorm: f32) -> Self {
        Self { l1, l2, maxnorm }
    }

    /// Applies max-norm, then L2 decay, then the flat L1 step.
    ///
    /// The order is fixed: the max-norm constraint sees the pre-decay value.
    /// The L1 step subtracts the coefficient itself from every element, it is
    /// not scaled by the element's sign.
    pub fn regularize(&self, p: ArrayD<f32>) -> ArrayD<f32> {
        let p = self.max_norm(p);
        let p = &p - &(&p * self.l2);
        p - self.l1
    }

    /// Rescales every column of `p` whose L2 norm exceeds `self.maxnorm`.
    ///
    /// Norms are taken along axis 0, one per trailing-dimension slice.
    fn max_norm(&self, p: ArrayD<f32>) -> ArrayD<f32> {
        if self.maxnorm <= 0.0 {
            return p;
        }

        let norms = p.mapv(|x| x * x).sum_axis(Axis(0)).mapv(f32::sqrt);
        let desired = norms.mapv(|x| x.clamp(0.0, self.maxnorm));
        let scale = desired / (norms + NORM_EPS);
        &p * &scale
    }
}
