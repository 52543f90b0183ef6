//! Least-squares linear-phase FIR filter design

use crate::bands::validate;
use crate::error::{FirlsError, Result};
use crate::normal_equations::NormalEquations;
use crate::symmetry::symmetrize_into;
use math_audio_solvers::lstsq_min_norm;

/// Designs a linear-phase FIR filter minimising the weighted squared error
/// against a piecewise-linear desired response, writing the taps into `result`.
///
/// The number of taps is `result.len()`. On error `result` is left untouched.
///
/// # Arguments
/// * `result` - Output buffer for the filter coefficients
/// * `bands` - Band edges in Hz, two per band, each within `0..=fs/2`
/// * `desired_begin` - Desired gain at the start of each band
/// * `desired_end` - Desired gain at the end of each band
/// * `weight` - Non-negative relative weight of each band
/// * `fs` - Sample rate in Hz
///
/// The normal equations are solved with a complete orthogonal decomposition,
/// so numerically rank-deficient designs (many taps, wide transition bands)
/// still return the minimum-norm least-squares solution instead of failing.
pub fn firls_into(
    result: &mut [f64],
    bands: &[f64],
    desired_begin: &[f64],
    desired_end: &[f64],
    weight: &[f64],
    fs: f64,
) -> Result<()> {
    let num_taps = result.len();
    let normalized = validate(num_taps, bands, desired_begin, desired_end, weight, fs)?;

    let equations =
        NormalEquations::build(num_taps, &normalized, desired_begin, desired_end, weight);
    let a = lstsq_min_norm(&equations.q, &equations.b).to_vec();

    log::debug!(
        "firls: {} taps (type {}), {} bands, {} unknowns",
        num_taps,
        equations.filter_type.short_name(),
        normalized.len(),
        equations.dim()
    );

    symmetrize_into(&a, result);
    Ok(())
}

/// Allocating variant of [`firls_into`] returning `num_taps` coefficients.
///
/// # Example
///
/// ```rust
/// use math_audio_firls::firls;
///
/// // Halfband lowpass: passband 0..0.1, stopband 0.4..0.5 at fs = 1
/// let taps = firls(11, &[0.0, 0.1, 0.4, 0.5], &[1.0, 0.0], &[1.0, 0.0], &[1.0, 1.0], 1.0)
///     .unwrap();
/// assert!((taps[5] - 0.5).abs() < 1e-5);
/// ```
pub fn firls(
    num_taps: usize,
    bands: &[f64],
    desired_begin: &[f64],
    desired_end: &[f64],
    weight: &[f64],
    fs: f64,
) -> Result<Vec<f64>> {
    if num_taps == 0 {
        return Err(FirlsError::InvalidTapCount);
    }
    let mut taps = vec![0.0; num_taps];
    firls_into(&mut taps, bands, desired_begin, desired_end, weight, fs)?;
    Ok(taps)
}
