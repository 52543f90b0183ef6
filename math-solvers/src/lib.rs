//! Dense least-squares solvers for small and medium systems
//!
//! This crate provides rank-revealing factorizations for dense real matrices,
//! aimed at normal-equation systems that are symmetric positive semi-definite
//! in exact arithmetic but frequently rank-deficient in floating point.
//!
//! # Features
//!
//! - **Householder QR with column pivoting**: reveals the numerical rank
//! - **Complete orthogonal decomposition**: minimum-norm least-squares solutions
//!   for rank-deficient, under- and overdetermined systems
//!
//! # Example
//!
//! ```rust
//! use math_audio_solvers::lstsq_min_norm;
//! use ndarray::array;
//!
//! // Singular system: the second row is twice the first
//! let a = array![[1.0, 2.0], [2.0, 4.0]];
//! let b = array![1.0, 2.0];
//!
//! let x = lstsq_min_norm(&a, &b);
//! assert!((x[0] - 0.2).abs() < 1e-12);
//! assert!((x[1] - 0.4).abs() < 1e-12);
//! ```

pub mod direct;

// Re-export direct solvers
pub use direct::{CompleteOrthogonalDecomposition, HouseholderQr, lstsq_min_norm};
