use ndarray::ArrayD;

/// Guards the norm divisions in `clip_norm` and `Regularizer::max_norm`.
pub(crate) const NORM_EPS: f32 = 1e-7;

/// Rescales `g` so that its L2 norm does not exceed `n`.
///
/// A bound of zero or less disables clipping and returns `g` untouched.
/// Clipping is per tensor: each gradient is normalized independently, there
/// is no global norm across parameters.
pub fn clip_norm(g: ArrayD<f32>, n: f32) -> ArrayD<f32> {
    if n <= 0.0 {
        return g;
    }

    let norm = g.mapv(|x| x * x).sum().sqrt();
    let desired = norm.clamp(0.0, n);
    g * (desired / (NORM_EPS + norm))
}

/// Applies `clip_norm` to every gradient of `gs`, preserving order.
pub fn clip_norms(gs: &[ArrayD<f32>], n: f32) -> Vec<ArrayD<f32>> {
    gs.iter().map(|g| clip_norm(g.clone(), n)).collect()
}
