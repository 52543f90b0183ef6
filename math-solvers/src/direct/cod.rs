//! Complete orthogonal decomposition (COD) solver
//!
//! Provides minimum-norm least-squares solutions for dense systems that may be
//! rank-deficient, underdetermined or overdetermined.
//!
//! The matrix is factorized as `A P = Q [T 0; 0 0] Z^T`: a Householder QR with
//! column pivoting reveals the numerical rank `r`, then the leading `r` rows of
//! `R` are reduced to triangular form by a second QR of their transpose. The
//! trailing `n - r` components of `Z^T P^T x` are set to zero, which yields the
//! solution of smallest Euclidean norm among all least-squares minimizers.

use super::householder::HouseholderQr;
use ndarray::{Array1, Array2};

#[cfg(feature = "ndarray-linalg")]
use ndarray_linalg::LeastSquaresSvd;

/// Complete orthogonal decomposition of a dense `m x n` matrix.
#[derive(Debug, Clone)]
pub struct CompleteOrthogonalDecomposition {
    qr: HouseholderQr,
    rank: usize,
    /// QR of the transposed leading `rank` rows of `R`, present when `rank < n`
    z: Option<HouseholderQr>,
}

impl CompleteOrthogonalDecomposition {
    /// Factorize `a`.
    ///
    /// The numerical rank is the number of leading pivots with
    /// `|R(i,i)| > eps * min(m, n) * max|R(k,k)|`.
    pub fn new(a: &Array2<f64>) -> Self {
        let n = a.ncols();
        let qr = HouseholderQr::with_column_pivoting(a.clone());

        let diag = qr.r_diagonal();
        let max_pivot = diag.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let threshold = f64::EPSILON * diag.len() as f64 * max_pivot;
        let rank = diag.iter().take_while(|v| v.abs() > threshold).count();

        let z = (rank > 0 && rank < n).then(|| {
            let leading_rows_t = Array2::from_shape_fn((n, rank), |(j, i)| {
                if j >= i { qr.r_at(i, j) } else { 0.0 }
            });
            HouseholderQr::new(leading_rows_t)
        });

        if rank < n {
            log::debug!(
                "COD: {}x{} matrix is rank-deficient (rank {})",
                a.nrows(),
                n,
                rank
            );
        }

        CompleteOrthogonalDecomposition { qr, rank, z }
    }

    /// Numerical rank of the factorized matrix.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Returns `true` if the matrix has full column rank.
    pub fn is_full_rank(&self) -> bool {
        self.rank == self.qr.ncols()
    }

    /// Minimum-norm least-squares solution of `A x = b`.
    ///
    /// # Panics
    /// Panics if `b.len()` differs from the number of rows of `A`.
    pub fn solve(&self, b: &Array1<f64>) -> Array1<f64> {
        let n = self.qr.ncols();
        let r = self.rank;

        let mut c = b.clone();
        self.qr.apply_qt(&mut c);

        let mut y = Array1::zeros(n);
        if r == 0 {
            return y;
        }

        match &self.z {
            None => {
                // Full column rank: back substitution with R
                for i in (0..r).rev() {
                    let mut sum = c[i];
                    for j in (i + 1)..r {
                        sum -= self.qr.r_at(i, j) * y[j];
                    }
                    y[i] = sum / self.qr.r_at(i, i);
                }
            }
            Some(z) => {
                // Leading rows of R are T^T Z^T with T upper triangular:
                // forward substitution with T^T, then y = Z [w; 0]
                for i in 0..r {
                    let mut sum = c[i];
                    for j in 0..i {
                        sum -= z.r_at(j, i) * y[j];
                    }
                    y[i] = sum / z.r_at(i, i);
                }
                z.apply_q(&mut y);
            }
        }

        let mut x = Array1::zeros(n);
        for (j, &p) in self.qr.permutation().iter().enumerate() {
            x[p] = y[j];
        }
        x
    }
}

/// Solve `A x = b` in the least-squares sense, returning the minimum-norm solution.
///
/// This is a convenience function that combines factorization and solve.
/// With the `ndarray-linalg` feature the system goes to LAPACK's SVD-based
/// `gelsd`; the pure-Rust decomposition is used otherwise, and as a fallback
/// if LAPACK reports an error.
///
/// # Panics
/// Panics if `b.len()` differs from the number of rows of `a`.
pub fn lstsq_min_norm(a: &Array2<f64>, b: &Array1<f64>) -> Array1<f64> {
    #[cfg(feature = "ndarray-linalg")]
    {
        match a.least_squares(b) {
            Ok(result) => return result.solution,
            Err(e) => log::debug!("LAPACK least squares failed ({}), using COD", e),
        }
    }

    CompleteOrthogonalDecomposition::new(a).solve(b)
}
