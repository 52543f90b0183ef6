//! Error types for least-squares FIR design and frequency response evaluation.
//!
//! Design failures are tagged variants carrying the offending values. Each one
//! maps onto a small, fixed set of numeric codes ([`ErrorCode`]) with a static
//! message table ([`describe_error`]).

use thiserror::Error;

/// Errors that can occur while designing a least-squares FIR filter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FirlsError {
    /// Number of taps is zero.
    #[error("invalid number of taps: must be positive")]
    InvalidTapCount,

    /// Sample rate is invalid (Nyquist frequency must be > 0).
    #[error("invalid sample rate: {fs} Hz (Nyquist frequency must be positive)")]
    InvalidFrequency {
        /// The invalid sample rate
        fs: f64,
    },

    /// No bands, or band edges that do not come in pairs.
    #[error("invalid number of band edges: {edges} (need a positive, even count)")]
    InvalidBandCount {
        /// Number of band edges supplied
        edges: usize,
    },

    /// A per-band array does not have one entry per band.
    #[error("{what} has {got} entries, expected one per band ({expected})")]
    BandLengthMismatch {
        /// Which array is inconsistent
        what: &'static str,
        /// Number of bands
        expected: usize,
        /// Number of entries supplied
        got: usize,
    },

    /// A band is out of range, has zero or negative width, or overlaps the previous band.
    #[error("invalid band {band}: [{start}, {end}] Hz (Nyquist {nyquist} Hz)")]
    InvalidBands {
        /// Index of the offending band
        band: usize,
        /// Band start edge in Hz
        start: f64,
        /// Band end edge in Hz
        end: f64,
        /// Nyquist frequency in Hz
        nyquist: f64,
    },

    /// A band weight is negative.
    #[error("invalid weight for band {band}: {weight} (must be >= 0)")]
    InvalidWeight {
        /// Index of the offending band
        band: usize,
        /// The invalid weight
        weight: f64,
    },
}

/// A specialized `Result` type for FIR design operations.
pub type Result<T> = std::result::Result<T, FirlsError>;

impl FirlsError {
    /// Numeric code of this error in the fixed design taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            FirlsError::InvalidTapCount => ErrorCode::InvalidTapCount,
            FirlsError::InvalidFrequency { .. } => ErrorCode::InvalidFrequency,
            FirlsError::InvalidBandCount { .. } | FirlsError::BandLengthMismatch { .. } => {
                ErrorCode::InvalidBandCount
            }
            FirlsError::InvalidBands { .. } => ErrorCode::InvalidBands,
            FirlsError::InvalidWeight { .. } => ErrorCode::InvalidWeight,
        }
    }

    /// Returns `true` if this is a band-edge error.
    pub fn is_band_error(&self) -> bool {
        matches!(self, FirlsError::InvalidBands { .. })
    }

    /// Returns `true` if this is a band-count or per-band length error.
    pub fn is_band_count_error(&self) -> bool {
        self.code() == ErrorCode::InvalidBandCount
    }

    /// Returns `true` if this is a weight error.
    pub fn is_weight_error(&self) -> bool {
        matches!(self, FirlsError::InvalidWeight { .. })
    }
}

/// Numeric result codes of the design routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// Success
    Ok = 0,
    /// Number of taps not positive
    InvalidTapCount = 1,
    /// Sample rate not positive
    InvalidFrequency = 2,
    /// Number of bands not positive
    InvalidBandCount = 3,
    /// Band edges out of range, not increasing or overlapping
    InvalidBands = 4,
    /// Negative weight
    InvalidWeight = 5,
}

impl ErrorCode {
    /// Human-readable message for this code.
    pub fn message(self) -> &'static str {
        describe_error(self as i32)
    }
}

impl From<&FirlsError> for ErrorCode {
    fn from(err: &FirlsError) -> Self {
        err.code()
    }
}

static ERROR_MESSAGES: [&str; 7] = [
    "OK",
    "Number of taps must be positive!",
    "Frequency must be positive!",
    "Number of frequency bands must be positive!",
    "Frequency bands must be monotonic array with positive width!",
    "Weights must be positive!",
    "Invalid error code!",
];

/// Message for a numeric design result code.
///
/// Codes outside the table map to its last entry.
pub fn describe_error(code: i32) -> &'static str {
    usize::try_from(code)
        .ok()
        .and_then(|i| ERROR_MESSAGES.get(i))
        .copied()
        .unwrap_or(ERROR_MESSAGES[ERROR_MESSAGES.len() - 1])
}

/// Errors that can occur while evaluating a frequency response.
#[derive(Debug, Error)]
pub enum FreqzError {
    /// No output points requested.
    #[error("number of frequency points must be at least 1")]
    InvalidPointCount,

    /// Tap sequence is empty.
    #[error("tap sequence is empty")]
    EmptyTaps,

    /// Sample rate is invalid (must be finite and > 0).
    #[error("invalid sample rate: {fs} Hz (must be finite and > 0)")]
    InvalidSampleRate {
        /// The invalid sample rate
        fs: f64,
    },

    /// Frequency and magnitude output buffers differ in length.
    #[error("output length mismatch: {frequencies} frequencies vs {magnitudes} magnitudes")]
    OutputLengthMismatch {
        /// Length of the frequency buffer
        frequencies: usize,
        /// Length of the magnitude buffer
        magnitudes: usize,
    },

    /// Impulse response does not fit the zero-padded transform.
    #[error("{num_taps} taps do not fit in a transform of length {fft_len}; request more points")]
    TransformTooShort {
        /// Number of taps
        num_taps: usize,
        /// Transform length derived from the number of points
        fft_len: usize,
    },

    /// The real-input FFT rejected its buffers.
    #[error("FFT failed: {0}")]
    Transform(#[from] realfft::FftError),
}

/// Errors that can occur while loading or saving a [`crate::FilterSpec`].
#[derive(Debug, Error)]
pub enum SpecFileError {
    /// Reading or writing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON is malformed or does not describe a filter.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_error_ok() {
        assert!(describe_error(0).contains("OK"));
    }

    #[test]
    fn test_describe_error_out_of_range() {
        assert!(describe_error(-1).contains("Invalid"));
        assert!(describe_error(100).contains("Invalid"));
        assert_eq!(describe_error(i32::MIN), "Invalid error code!");
    }

    #[test]
    fn test_error_code_messages() {
        assert_eq!(
            ErrorCode::InvalidTapCount.message(),
            "Number of taps must be positive!"
        );
        assert_eq!(ErrorCode::InvalidWeight.message(), "Weights must be positive!");
        assert_eq!(ErrorCode::Ok.message(), "OK");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(FirlsError::InvalidTapCount.code() as i32, 1);
        assert_eq!(FirlsError::InvalidFrequency { fs: 0.0 }.code() as i32, 2);
        assert_eq!(FirlsError::InvalidBandCount { edges: 0 }.code() as i32, 3);
        let mismatch = FirlsError::BandLengthMismatch {
            what: "weight",
            expected: 2,
            got: 1,
        };
        assert_eq!(mismatch.code(), ErrorCode::InvalidBandCount);
        assert!(mismatch.is_band_count_error());
        let bands = FirlsError::InvalidBands {
            band: 1,
            start: 0.1,
            end: 0.05,
            nyquist: 0.5,
        };
        assert_eq!(bands.code() as i32, 4);
        assert!(bands.is_band_error());
        let weight = FirlsError::InvalidWeight {
            band: 0,
            weight: -1.0,
        };
        assert_eq!(ErrorCode::from(&weight) as i32, 5);
        assert!(weight.is_weight_error());
        assert!(!weight.is_band_error());
    }

    #[test]
    fn test_error_display() {
        let err = FirlsError::InvalidWeight {
            band: 2,
            weight: -0.5,
        };
        assert_eq!(
            err.to_string(),
            "invalid weight for band 2: -0.5 (must be >= 0)"
        );

        let err = FreqzError::TransformTooShort {
            num_taps: 11,
            fft_len: 8,
        };
        assert!(err.to_string().contains("11 taps"));
        assert!(err.to_string().contains("length 8"));
    }
}
