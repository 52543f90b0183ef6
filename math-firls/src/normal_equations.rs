//! Normal equations of the weighted least-squares FIR design problem
//!
//! For a linear-phase filter of length `N` the amplitude response is a cosine
//! series in `M + 1 = (N - 1) / 2 + 1` unknowns. Minimising the weighted squared
//! error against a piecewise-linear target gives `Q a = b`, where `Q` is a
//! Toeplitz-plus-Hankel matrix built from a single autocorrelation sequence.
//! The common factors `1/2` and `1/π` of `Q` and `b` are dropped since they
//! cancel in the solve.

use crate::bands::NormalizedBands;
use ndarray::{Array1, Array2};
use std::f64::consts::PI;

/// Linear-phase FIR filter type, determined by the parity of the length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    /// Odd length, single unpaired centre tap
    TypeI,
    /// Even length, every tap has a mirror partner
    TypeII,
}

impl FilterType {
    /// Filter type of a filter with `num_taps` taps.
    pub fn from_num_taps(num_taps: usize) -> Self {
        if num_taps.is_multiple_of(2) {
            FilterType::TypeII
        } else {
            FilterType::TypeI
        }
    }

    /// Offset of the Hankel index `i + j + δ`.
    pub fn hankel_offset(self) -> usize {
        match self {
            FilterType::TypeI => 0,
            FilterType::TypeII => 1,
        }
    }

    /// Half-sample shift of the cosine basis.
    pub fn half_offset(self) -> f64 {
        match self {
            FilterType::TypeI => 0.0,
            FilterType::TypeII => 0.5,
        }
    }

    /// Returns the short string representation of the filter type.
    pub fn short_name(self) -> &'static str {
        match self {
            FilterType::TypeI => "I",
            FilterType::TypeII => "II",
        }
    }
}

/// Normalized sinc: `sin(πx) / (πx)`, with `sinc(0) = 1`.
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Number of reduced unknowns minus one: `M = (num_taps - 1) / 2`.
///
/// Zero taps give `M = 0`; callers reject that length before building a system.
#[inline]
pub fn half_order(num_taps: usize) -> usize {
    num_taps.saturating_sub(1) / 2
}

/// The system `Q a = b` for the reduced (half-length) coefficients.
#[derive(Debug, Clone)]
pub struct NormalEquations {
    /// Symmetric `(M+1) x (M+1)` Toeplitz-plus-Hankel matrix
    pub q: Array2<f64>,
    /// Right-hand side of length `M+1`
    pub b: Array1<f64>,
    /// Filter type the system was built for
    pub filter_type: FilterType,
}

impl NormalEquations {
    /// Assemble the normal equations.
    ///
    /// # Arguments
    /// * `num_taps` - Filter length (> 0)
    /// * `bands` - Validated, normalized band edges
    /// * `desired_begin` - Desired gain at each band start
    /// * `desired_end` - Desired gain at each band end
    /// * `weight` - Per-band weights
    pub fn build(
        num_taps: usize,
        bands: &NormalizedBands,
        desired_begin: &[f64],
        desired_end: &[f64],
        weight: &[f64],
    ) -> Self {
        debug_assert!(num_taps > 0, "FIR filter must have at least one tap");
        debug_assert_eq!(bands.len(), weight.len());

        let filter_type = FilterType::from_num_taps(num_taps);
        let q_seq = autocorrelation(num_taps, bands, weight);
        let q = toeplitz_plus_hankel(&q_seq, half_order(num_taps), filter_type);
        let b = right_hand_side(num_taps, bands, desired_begin, desired_end, weight);

        NormalEquations { q, b, filter_type }
    }

    /// Number of reduced unknowns (`M + 1`).
    pub fn dim(&self) -> usize {
        self.b.len()
    }
}

/// Autocorrelation sequence of the band weighting, `q[0..num_taps]`.
///
/// `q(i) = Σ_j w_j (f2_j sinc(i f2_j) - f1_j sinc(i f1_j))`, the integral of
/// `w_j cos(π i f)` over each band.
pub fn autocorrelation(num_taps: usize, bands: &NormalizedBands, weight: &[f64]) -> Array1<f64> {
    Array1::from_shape_fn(num_taps, |i| {
        let n = i as f64;
        bands
            .pairs()
            .zip(weight)
            .map(|((f1, f2), &w)| (sinc(n * f2) * f2 - sinc(n * f1) * f1) * w)
            .sum()
    })
}

/// `Q(i,j) = q(|i-j|) + q(i+j+δ)` for `i, j` in `0..=m`.
pub fn toeplitz_plus_hankel(q: &Array1<f64>, m: usize, filter_type: FilterType) -> Array2<f64> {
    let delta = filter_type.hankel_offset();
    debug_assert!(q.len() > 2 * m + delta);
    Array2::from_shape_fn((m + 1, m + 1), |(i, j)| q[i.abs_diff(j)] + q[i + j + delta])
}

/// Right-hand side `b` for a piecewise-linear target `D(f) = m_j f + c_j`.
///
/// Each band contributes the exact integral of `w_j (m_j f + c_j) cos(π (i + h) f)`,
/// with `h` the half-sample offset of the filter type. For type I the cosine
/// term is singular at `i = 0` and its limit `-m_j (f2² - f1²) / 2` is used.
pub fn right_hand_side(
    num_taps: usize,
    bands: &NormalizedBands,
    desired_begin: &[f64],
    desired_end: &[f64],
    weight: &[f64],
) -> Array1<f64> {
    let filter_type = FilterType::from_num_taps(num_taps);
    let half = filter_type.half_offset();
    let m = half_order(num_taps);

    // Slope and intercept of the target over each band
    let lines: Vec<(f64, f64)> = bands
        .pairs()
        .zip(desired_begin.iter().zip(desired_end))
        .map(|((f1, f2), (&d1, &d2))| {
            let slope = (d2 - d1) / (f2 - f1);
            (slope, d1 - f1 * slope)
        })
        .collect();

    let mut b = Array1::zeros(m + 1);
    for (i, bi) in b.iter_mut().enumerate() {
        let n = i as f64 + half;
        for (((f1, f2), &(slope, intercept)), &w) in bands.pairs().zip(&lines).zip(weight) {
            let sinc_term = f2 * (slope * f2 + intercept) * sinc(n * f2)
                - f1 * (slope * f1 + intercept) * sinc(n * f1);
            let cos_term = if n == 0.0 {
                -0.5 * slope * (f2 * f2 - f1 * f1)
            } else {
                let scale = n * PI;
                slope * ((scale * f2).cos() - (scale * f1).cos()) / (scale * scale)
            };
            *bi += (sinc_term + cos_term) * w;
        }
    }
    b
}
