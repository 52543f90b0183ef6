//! Direct solvers for dense linear systems
//!
//! This module provides direct (non-iterative) solvers:
//! - [`HouseholderQr`]: Householder QR, optionally with column pivoting
//! - [`CompleteOrthogonalDecomposition`]: rank-revealing minimum-norm least squares
//! - [`lstsq_min_norm`]: one-shot convenience wrapper

mod cod;
mod householder;

pub use cod::{CompleteOrthogonalDecomposition, lstsq_min_norm};
pub use householder::HouseholderQr;
