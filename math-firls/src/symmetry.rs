//! Expansion of the reduced solution into a symmetric (linear-phase) tap sequence

use crate::normal_equations::{FilterType, half_order};

/// Expand the half-length solution `a[0..=M]` into `taps` (length `num_taps`).
///
/// For type I the centre tap is `2 a[0]`, since the centre coefficient is the
/// unpaired term of the cosine series; every other coefficient is mirrored.
///
/// # Panics
/// Panics if `taps` is empty or `a.len()` is not `(taps.len() - 1) / 2 + 1`.
pub fn symmetrize_into(a: &[f64], taps: &mut [f64]) {
    let num_taps = taps.len();
    let m = half_order(num_taps);
    assert_eq!(a.len(), m + 1, "reduced solution must have M + 1 entries");

    match FilterType::from_num_taps(num_taps) {
        FilterType::TypeI => {
            taps[m] = 2.0 * a[0];
            for (i, &ai) in a.iter().enumerate().skip(1) {
                taps[m + i] = ai;
                taps[m - i] = ai;
            }
        }
        FilterType::TypeII => {
            for (i, &ai) in a.iter().enumerate() {
                taps[m + i + 1] = ai;
                taps[m - i] = ai;
            }
        }
    }
}

/// Allocating variant of [`symmetrize_into`].
pub fn symmetrize(a: &[f64], num_taps: usize) -> Vec<f64> {
    let mut taps = vec![0.0; num_taps];
    symmetrize_into(a, &mut taps);
    taps
}
