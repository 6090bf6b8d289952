// fss.rs - Locate the Binder-curve crossing between two lattice sizes

/// Find the first β where the two Binder curves cross, by linear
/// interpolation of the sign change of their difference.
///
/// Both curves must share the same β grid. Returns `None` when the curves
/// never cross inside the scanned window — for curves bracketing the known
/// critical region that indicates a sampling or statistic bug upstream.
pub fn crossing_beta(betas: &[f64], curve_a: &[f64], curve_b: &[f64]) -> Option<f64> {
    assert_eq!(betas.len(), curve_a.len());
    assert_eq!(betas.len(), curve_b.len());

    for i in 1..betas.len() {
        let d0 = curve_a[i - 1] - curve_b[i - 1];
        let d1 = curve_a[i] - curve_b[i];

        if d0 == 0.0 {
            return Some(betas[i - 1]);
        }
        if d0 * d1 < 0.0 {
            // Linear interpolation of the zero of the difference.
            let t = d0 / (d0 - d1);
            return Some(betas[i - 1] + t * (betas[i] - betas[i - 1]));
        }
    }

    if let (Some(&beta), Some(&a), Some(&b)) = (betas.last(), curve_a.last(), curve_b.last()) {
        if a == b {
            return Some(beta);
        }
    }

    None
}
