//! Least-squares linear-phase FIR filter design.
//!
//! This crate designs FIR filters whose amplitude response minimises the
//! weighted squared error against a piecewise-linear target, and evaluates
//! the magnitude response of any tap sequence.
//!
//! # Features
//!
//! - **Design**: [`firls`] for type I (odd length) and type II (even length) filters
//! - **Rank-deficient designs**: normal equations solved by complete orthogonal decomposition
//! - **Frequency response**: FFT-based [`freqz`] and direct [`freqz_naive`]
//! - **Configuration**: [`FilterSpec`] with JSON persistence
//!
//! # Example
//!
//! ```rust
//! use math_audio_firls::{firls, freqz};
//!
//! // Lowpass at fs = 48 kHz: pass 0..4.8 kHz, stop 7.2..24 kHz
//! let taps = firls(
//!     61,
//!     &[0.0, 4800.0, 7200.0, 24000.0],
//!     &[1.0, 0.0],
//!     &[1.0, 0.0],
//!     &[1.0, 10.0],
//!     48000.0,
//! )
//! .unwrap();
//!
//! let response = freqz(257, &taps, 48000.0).unwrap();
//! assert!((response.magnitudes[0] - 1.0).abs() < 0.05);
//! assert!(response.max_in_range(9000.0, 24000.0).unwrap() < 0.05);
//! ```
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

mod bands;
mod config;
mod error;
mod firls;
mod freqz;
mod normal_equations;
mod symmetry;

pub use error::{ErrorCode, FirlsError, FreqzError, Result, SpecFileError, describe_error};

pub use bands::{NormalizedBands, validate};
pub use config::{Band, FilterSpec};
pub use firls::{firls, firls_into};
pub use freqz::{FrequencyResponse, freqz, freqz_into, freqz_naive, freqz_naive_into};
pub use normal_equations::{
    FilterType, NormalEquations, autocorrelation, half_order, right_hand_side, sinc,
    toeplitz_plus_hankel,
};
pub use symmetry::{symmetrize, symmetrize_into};
