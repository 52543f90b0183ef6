//! FIR magnitude response over `0..=fs/2`
//!
//! Two evaluators share the same uniform frequency grid of `n` points:
//! - [`freqz`]: zero-padded real-input FFT of length `2 (n - 1)`, `O(L log L)`
//! - [`freqz_naive`]: direct DTFT summation, `O(n * num_taps)`, the reference

use crate::error::FreqzError;
use num_complex::Complex64;
use realfft::RealFftPlanner;
use std::f64::consts::PI;

/// Magnitude response sampled on a uniform grid over `[0, fs/2]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrequencyResponse {
    /// Frequencies in Hz
    pub frequencies: Vec<f64>,
    /// Linear magnitude at each frequency
    pub magnitudes: Vec<f64>,
}

impl FrequencyResponse {
    /// Number of frequency points.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns `true` if the response holds no points.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Magnitudes in dB; zero magnitude maps to -200 dB.
    pub fn magnitudes_db(&self) -> Vec<f64> {
        self.magnitudes
            .iter()
            .map(|&m| if m > 0.0 { 20.0 * m.log10() } else { -200.0 })
            .collect()
    }

    /// Largest magnitude over the frequency range `[f_low, f_high]` in Hz.
    pub fn max_in_range(&self, f_low: f64, f_high: f64) -> Option<f64> {
        self.frequencies
            .iter()
            .zip(&self.magnitudes)
            .filter(|&(&f, _)| f >= f_low && f <= f_high)
            .map(|(_, &m)| m)
            .reduce(f64::max)
    }
}

fn check_inputs(
    frequencies: &[f64],
    magnitudes: &[f64],
    taps: &[f64],
    fs: f64,
) -> Result<usize, FreqzError> {
    if frequencies.len() != magnitudes.len() {
        return Err(FreqzError::OutputLengthMismatch {
            frequencies: frequencies.len(),
            magnitudes: magnitudes.len(),
        });
    }
    if frequencies.is_empty() {
        return Err(FreqzError::InvalidPointCount);
    }
    if taps.is_empty() {
        return Err(FreqzError::EmptyTaps);
    }
    if !fs.is_finite() || fs <= 0.0 {
        return Err(FreqzError::InvalidSampleRate { fs });
    }
    Ok(frequencies.len())
}

/// Fill `frequencies` with `n` points uniformly spaced over `[0, fs/2]`.
fn fill_grid(frequencies: &mut [f64], fs: f64) {
    let n = frequencies.len();
    let delta = if n > 1 { fs / (2.0 * (n - 1) as f64) } else { 0.0 };
    for (i, f) in frequencies.iter_mut().enumerate() {
        *f = i as f64 * delta;
    }
}

/// Direct DTFT evaluation into caller-provided buffers.
///
/// `n = frequencies.len()` points; the buffers are only written on success.
pub fn freqz_naive_into(
    frequencies: &mut [f64],
    magnitudes: &mut [f64],
    taps: &[f64],
    fs: f64,
) -> Result<(), FreqzError> {
    let n = check_inputs(frequencies, magnitudes, taps, fs)?;

    fill_grid(frequencies, fs);
    let omega_delta = if n > 1 { PI / (n - 1) as f64 } else { 0.0 };
    for (i, mag) in magnitudes.iter_mut().enumerate() {
        let omega = i as f64 * omega_delta;
        let sum: Complex64 = taps
            .iter()
            .enumerate()
            .map(|(j, &t)| t * Complex64::new(0.0, omega * j as f64).exp())
            .sum();
        *mag = sum.norm();
    }
    Ok(())
}

/// Direct DTFT evaluation of the magnitude response at `n` points.
///
/// # Arguments
/// * `n` - Number of output points (>= 1)
/// * `taps` - Filter coefficients (non-empty)
/// * `fs` - Sample rate in Hz (> 0)
pub fn freqz_naive(n: usize, taps: &[f64], fs: f64) -> Result<FrequencyResponse, FreqzError> {
    let mut frequencies = vec![0.0; n];
    let mut magnitudes = vec![0.0; n];
    freqz_naive_into(&mut frequencies, &mut magnitudes, taps, fs)?;
    Ok(FrequencyResponse {
        frequencies,
        magnitudes,
    })
}

/// FFT-based evaluation into caller-provided buffers.
///
/// Uses a real-input transform of length `L = 2 (n - 1)`, which yields
/// exactly `n` bins from DC to Nyquist. The taps must fit: `num_taps < L`.
/// Transform lengths with small prime factors (e.g. `n = 2049` or `2001`)
/// are the fastest.
pub fn freqz_into(
    frequencies: &mut [f64],
    magnitudes: &mut [f64],
    taps: &[f64],
    fs: f64,
) -> Result<(), FreqzError> {
    let n = check_inputs(frequencies, magnitudes, taps, fs)?;

    let fft_len = 2 * (n - 1);
    if taps.len() >= fft_len {
        return Err(FreqzError::TransformTooShort {
            num_taps: taps.len(),
            fft_len,
        });
    }
    log::trace!("freqz: {} taps, real FFT of length {}", taps.len(), fft_len);

    let mut planner = RealFftPlanner::<f64>::new();
    let r2c = planner.plan_fft_forward(fft_len);

    // Impulse response followed by zeros
    let mut input = r2c.make_input_vec();
    input[..taps.len()].copy_from_slice(taps);
    let mut spectrum = r2c.make_output_vec();
    r2c.process(&mut input, &mut spectrum)?;

    fill_grid(frequencies, fs);
    for (mag, bin) in magnitudes.iter_mut().zip(&spectrum) {
        *mag = bin.norm();
    }
    Ok(())
}

/// FFT-based evaluation of the magnitude response at `n` points.
///
/// This is the default evaluator; it agrees with [`freqz_naive`] within
/// rounding error.
///
/// # Arguments
/// * `n` - Number of output points; `2 (n - 1)` must exceed the number of taps
/// * `taps` - Filter coefficients (non-empty)
/// * `fs` - Sample rate in Hz (> 0)
///
/// # Example
///
/// ```rust
/// use math_audio_firls::freqz;
///
/// let response = freqz(5, &[0.25, 0.5, 0.25], 2.0).unwrap();
/// assert_eq!(response.frequencies, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert!((response.magnitudes[0] - 1.0).abs() < 1e-12);
/// assert!(response.magnitudes[4].abs() < 1e-12);
/// ```
pub fn freqz(n: usize, taps: &[f64], fs: f64) -> Result<FrequencyResponse, FreqzError> {
    let mut frequencies = vec![0.0; n];
    let mut magnitudes = vec![0.0; n];
    freqz_into(&mut frequencies, &mut magnitudes, taps, fs)?;
    Ok(FrequencyResponse {
        frequencies,
        magnitudes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TAPS: [f64; 5] = [0.1, -0.2, 0.8, -0.2, 0.1];

    #[test]
    fn test_grid_spacing() {
        let response = freqz_naive(11, &TAPS, 1000.0).unwrap();
        assert_eq!(response.len(), 11);
        assert_eq!(response.frequencies[0], 0.0);
        assert_abs_diff_eq!(response.frequencies[1], 50.0, epsilon = 1e-12);
        assert_abs_diff_eq!(response.frequencies[10], 500.0, epsilon = 1e-12);
    }

    #[test]
    fn test_naive_single_point_is_dc_gain() {
        let response = freqz_naive(1, &TAPS, 48000.0).unwrap();
        assert_eq!(response.frequencies, vec![0.0]);
        assert_abs_diff_eq!(response.magnitudes[0], 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_fft_matches_naive() {
        for n in [4, 7, 16, 33, 100] {
            let fast = freqz(n, &TAPS, 2.0).unwrap();
            let naive = freqz_naive(n, &TAPS, 2.0).unwrap();
            for i in 0..n {
                assert_abs_diff_eq!(fast.frequencies[i], naive.frequencies[i], epsilon = 1e-12);
                assert_abs_diff_eq!(fast.magnitudes[i], naive.magnitudes[i], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_fft_requires_room_for_taps() {
        // n = 3 gives a transform of length 4, too short for 5 taps
        let err = freqz(3, &TAPS, 2.0).unwrap_err();
        assert!(matches!(
            err,
            FreqzError::TransformTooShort {
                num_taps: 5,
                fft_len: 4
            }
        ));
        // n = 1 has no transform at all
        assert!(matches!(
            freqz(1, &[1.0], 2.0),
            Err(FreqzError::TransformTooShort { fft_len: 0, .. })
        ));
        // Naive evaluation has no such limit
        assert!(freqz_naive(3, &TAPS, 2.0).is_ok());
    }

    #[test]
    fn test_invalid_arguments() {
        for eval in [freqz, freqz_naive] {
            assert!(matches!(eval(0, &TAPS, 2.0), Err(FreqzError::InvalidPointCount)));
            assert!(matches!(eval(16, &[], 2.0), Err(FreqzError::EmptyTaps)));
            assert!(matches!(
                eval(16, &TAPS, 0.0),
                Err(FreqzError::InvalidSampleRate { .. })
            ));
            assert!(matches!(
                eval(16, &TAPS, -48000.0),
                Err(FreqzError::InvalidSampleRate { .. })
            ));
            for fs in [f64::NAN, f64::INFINITY] {
                assert!(matches!(
                    eval(16, &TAPS, fs),
                    Err(FreqzError::InvalidSampleRate { .. })
                ));
            }
        }
    }

    #[test]
    fn test_into_rejects_mismatched_buffers() {
        let mut frequencies = [0.0; 8];
        let mut magnitudes = [0.0; 7];
        let err = freqz_into(&mut frequencies, &mut magnitudes, &TAPS, 2.0).unwrap_err();
        assert!(matches!(
            err,
            FreqzError::OutputLengthMismatch {
                frequencies: 8,
                magnitudes: 7
            }
        ));
    }

    #[test]
    fn test_into_writes_caller_buffers() {
        let mut frequencies = [-1.0; 9];
        let mut magnitudes = [-1.0; 9];
        freqz_into(&mut frequencies, &mut magnitudes, &[1.0], 16.0).unwrap();
        for (i, (&f, &m)) in frequencies.iter().zip(&magnitudes).enumerate() {
            assert_abs_diff_eq!(f, i as f64, epsilon = 1e-12);
            assert_abs_diff_eq!(m, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_magnitudes_db_and_range() {
        let response = FrequencyResponse {
            frequencies: vec![0.0, 1.0, 2.0],
            magnitudes: vec![1.0, 0.1, 0.0],
        };
        let db = response.magnitudes_db();
        assert_abs_diff_eq!(db[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(db[1], -20.0, epsilon = 1e-12);
        assert_eq!(db[2], -200.0);

        assert_eq!(response.max_in_range(0.5, 2.0), Some(0.1));
        assert_eq!(response.max_in_range(3.0, 4.0), None);
    }
}
