//! Band specification validation and normalization

use crate::error::{FirlsError, Result};

/// Band edges validated and scaled to the Nyquist frequency.
///
/// Every edge lies in `[0, 1]`, each band has positive width and bands are
/// sorted without overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBands {
    edges: Vec<f64>,
}

impl NormalizedBands {
    /// Number of bands.
    pub fn len(&self) -> usize {
        self.edges.len() / 2
    }

    /// Returns `true` if there are no bands (never the case once validated).
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Normalized edges, two per band.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Iterator over `(f1, f2)` edge pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.edges.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Validate a band specification and normalize its edges to Nyquist.
///
/// # Arguments
/// * `num_taps` - Filter length
/// * `bands` - Band edges in Hz, two per band
/// * `desired_begin` - Desired gain at the start of each band
/// * `desired_end` - Desired gain at the end of each band
/// * `weight` - Relative weight of each band
/// * `fs` - Sample rate in Hz
///
/// Checks run in a fixed order and the first failure is reported. Desired
/// gains are not checked: negative targets are accepted.
pub fn validate(
    num_taps: usize,
    bands: &[f64],
    desired_begin: &[f64],
    desired_end: &[f64],
    weight: &[f64],
    fs: f64,
) -> Result<NormalizedBands> {
    if num_taps < 1 {
        return Err(FirlsError::InvalidTapCount);
    }

    let nyquist = 0.5 * fs;
    if nyquist.is_nan() || nyquist <= 0.0 {
        return Err(FirlsError::InvalidFrequency { fs });
    }

    if bands.is_empty() || !bands.len().is_multiple_of(2) {
        return Err(FirlsError::InvalidBandCount { edges: bands.len() });
    }
    let num_bands = bands.len() / 2;
    for (what, values) in [
        ("desired_begin", desired_begin),
        ("desired_end", desired_end),
        ("weight", weight),
    ] {
        if values.len() != num_bands {
            return Err(FirlsError::BandLengthMismatch {
                what,
                expected: num_bands,
                got: values.len(),
            });
        }
    }

    let invalid_band = |band: usize| FirlsError::InvalidBands {
        band,
        start: bands[2 * band],
        end: bands[2 * band + 1],
        nyquist,
    };

    let edges: Vec<f64> = bands.iter().map(|&f| f / nyquist).collect();
    if let Some(i) = edges.iter().position(|f| !(0.0..=1.0).contains(f)) {
        return Err(invalid_band(i / 2));
    }

    for (i, pair) in edges.chunks_exact(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(invalid_band(i));
        }
        if i > 0 && pair[0] < edges[2 * i - 1] {
            return Err(invalid_band(i));
        }
    }

    if let Some((band, &w)) = weight.iter().enumerate().find(|(_, w)| w.is_nan() || **w < 0.0) {
        return Err(FirlsError::InvalidWeight { band, weight: w });
    }

    Ok(NormalizedBands { edges })
}
