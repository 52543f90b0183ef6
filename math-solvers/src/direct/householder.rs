//! Householder QR factorization
//!
//! Factorizes `A P = Q R` where `Q` is orthogonal (stored implicitly as a
//! sequence of elementary reflectors), `R` is upper trapezoidal and `P` is a
//! column permutation. Without pivoting `P` is the identity.

use ndarray::{Array1, Array2, Axis, ShapeBuilder, Zip, s};

/// Householder QR factorization of a dense `m x n` matrix.
///
/// The upper triangle of `factors` holds `R`; below the diagonal, column `k`
/// holds the tail of the reflector `v_k` (whose leading entry is an implicit 1).
/// The reflector is `H_k = I - tau_k v_k v_k^T` and `Q = H_0 H_1 ... H_{k-1}`.
#[derive(Debug, Clone)]
pub struct HouseholderQr {
    factors: Array2<f64>,
    tau: Vec<f64>,
    perm: Vec<usize>,
}

impl HouseholderQr {
    /// Factorize `a` without column pivoting.
    pub fn new(a: Array2<f64>) -> Self {
        Self::factorize(a, false)
    }

    /// Factorize `a` with column pivoting (largest remaining column norm first).
    ///
    /// The magnitudes of the diagonal of `R` are then non-increasing, which is
    /// what makes the factorization rank-revealing.
    pub fn with_column_pivoting(a: Array2<f64>) -> Self {
        Self::factorize(a, true)
    }

    fn factorize(a: Array2<f64>, pivoting: bool) -> Self {
        let (m, n) = a.dim();
        let k = m.min(n);

        // Column-major copy: reflectors and updates walk contiguous columns
        let mut a = {
            let mut f = Array2::zeros((m, n).f());
            f.assign(&a);
            f
        };
        let mut tau = vec![0.0; k];
        let mut perm: Vec<usize> = (0..n).collect();

        // Partial column norms, downdated after every step, and the values
        // they were last computed from scratch at
        let mut norms: Vec<f64> = if pivoting {
            (0..n).map(|p| column_norm(&a, 0, p)).collect()
        } else {
            Vec::new()
        };
        let mut norms_ref = norms.clone();
        let recompute_tol = f64::EPSILON.sqrt();

        for j in 0..k {
            if pivoting {
                let best = (j..n).fold(j, |best, p| if norms[p] > norms[best] { p } else { best });
                if best != j {
                    let (cj, cb) = a.multi_slice_mut((s![.., j], s![.., best]));
                    Zip::from(cj).and(cb).for_each(std::mem::swap);
                    perm.swap(j, best);
                    norms.swap(j, best);
                    norms_ref.swap(j, best);
                }
            }

            // Reflector annihilating a[j+1.., j]
            let alpha = a[[j, j]];
            let tail_norm = column_norm(&a, j + 1, j);
            if tail_norm != 0.0 {
                let beta = -alpha.signum() * alpha.hypot(tail_norm);
                let tau_j = (beta - alpha) / beta;
                tau[j] = tau_j;
                let scale = 1.0 / (alpha - beta);
                a.slice_mut(s![j + 1.., j]).mapv_inplace(|v| v * scale);
                a[[j, j]] = beta;

                // Apply H_j to the trailing columns
                let (left, mut right) = a.view_mut().split_at(Axis(1), j + 1);
                let v = left.slice(s![j + 1.., j]);
                for mut col in right.columns_mut() {
                    let dot = tau_j * (col[j] + v.dot(&col.slice(s![j + 1..])));
                    col[j] -= dot;
                    col.slice_mut(s![j + 1..]).scaled_add(-dot, &v);
                }
            }

            if pivoting {
                for p in (j + 1)..n {
                    if norms[p] == 0.0 {
                        continue;
                    }
                    let ratio = a[[j, p]].abs() / norms[p];
                    let t = (1.0 - ratio * ratio).max(0.0);
                    let drift = t * (norms[p] / norms_ref[p]).powi(2);
                    if drift <= recompute_tol {
                        // Too much cancellation: recompute from the remaining rows
                        norms[p] = column_norm(&a, j + 1, p);
                        norms_ref[p] = norms[p];
                    } else {
                        norms[p] *= t.sqrt();
                    }
                }
            }
        }

        HouseholderQr {
            factors: a,
            tau,
            perm,
        }
    }

    /// Number of rows of the factorized matrix.
    pub fn nrows(&self) -> usize {
        self.factors.nrows()
    }

    /// Number of columns of the factorized matrix.
    pub fn ncols(&self) -> usize {
        self.factors.ncols()
    }

    /// Column permutation: column `j` of `A P` is column `permutation()[j]` of `A`.
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Entry `(i, j)` of `R`, for `j >= i`.
    #[inline]
    pub(crate) fn r_at(&self, i: usize, j: usize) -> f64 {
        debug_assert!(j >= i);
        self.factors[[i, j]]
    }

    /// Diagonal of `R`.
    pub fn r_diagonal(&self) -> Array1<f64> {
        let k = self.nrows().min(self.ncols());
        Array1::from_shape_fn(k, |i| self.factors[[i, i]])
    }

    /// The upper-trapezoidal factor `R` (`m x n`).
    pub fn r(&self) -> Array2<f64> {
        let (m, n) = self.factors.dim();
        Array2::from_shape_fn((m, n), |(i, j)| if j >= i { self.factors[[i, j]] } else { 0.0 })
    }

    /// Overwrite `b` with `Q^T b`.
    ///
    /// # Panics
    /// Panics if `b.len()` differs from the number of rows.
    pub fn apply_qt(&self, b: &mut Array1<f64>) {
        assert_eq!(b.len(), self.nrows(), "vector length must match matrix rows");
        for j in 0..self.tau.len() {
            self.reflect(j, b);
        }
    }

    /// Overwrite `b` with `Q b`.
    ///
    /// # Panics
    /// Panics if `b.len()` differs from the number of rows.
    pub fn apply_q(&self, b: &mut Array1<f64>) {
        assert_eq!(b.len(), self.nrows(), "vector length must match matrix rows");
        for j in (0..self.tau.len()).rev() {
            self.reflect(j, b);
        }
    }

    fn reflect(&self, j: usize, b: &mut Array1<f64>) {
        let tau = self.tau[j];
        if tau == 0.0 {
            return;
        }
        let m = self.nrows();
        let mut dot = b[j];
        for r in (j + 1)..m {
            dot += self.factors[[r, j]] * b[r];
        }
        dot *= tau;
        b[j] -= dot;
        for r in (j + 1)..m {
            b[r] -= dot * self.factors[[r, j]];
        }
    }
}

/// Euclidean norm of `a[start.., col]`.
fn column_norm(a: &Array2<f64>, start: usize, col: usize) -> f64 {
    let tail = a.slice(s![start.., col]);
    tail.dot(&tail).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn explicit_q(qr: &HouseholderQr) -> Array2<f64> {
        let m = qr.nrows();
        let mut q = Array2::zeros((m, m));
        for c in 0..m {
            let mut e = Array1::zeros(m);
            e[c] = 1.0;
            qr.apply_q(&mut e);
            q.column_mut(c).assign(&e);
        }
        q
    }

    fn permuted(a: &Array2<f64>, perm: &[usize]) -> Array2<f64> {
        Array2::from_shape_fn(a.dim(), |(i, j)| a[[i, perm[j]]])
    }

    #[test]
    fn test_qr_reconstructs_matrix() {
        let a = array![[4.0_f64, 1.0, 2.0], [1.0, 3.0, 0.5], [2.0, 0.5, 5.0], [1.0, 1.0, 1.0]];
        let qr = HouseholderQr::new(a.clone());

        let q = explicit_q(&qr);
        let qr_product = q.dot(&qr.r());
        for ((i, j), v) in qr_product.indexed_iter() {
            assert_relative_eq!(*v, a[[i, j]], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_q_is_orthogonal() {
        let a = array![[2.0_f64, -1.0], [0.5, 3.0], [1.0, 1.0]];
        let qr = HouseholderQr::with_column_pivoting(a);
        let q = explicit_q(&qr);
        let qtq = q.t().dot(&q);
        for ((i, j), v) in qtq.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_relative_eq!(*v, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pivoted_qr_reconstructs_permuted_matrix() {
        let a = array![[1.0_f64, 10.0, 3.0], [2.0, 20.0, 1.0], [0.0, 5.0, 4.0]];
        let qr = HouseholderQr::with_column_pivoting(a.clone());

        // Largest column goes first
        assert_eq!(qr.permutation()[0], 1);

        let ap = permuted(&a, qr.permutation());
        let qr_product = explicit_q(&qr).dot(&qr.r());
        for ((i, j), v) in qr_product.indexed_iter() {
            assert_relative_eq!(*v, ap[[i, j]], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pivoted_diagonal_is_non_increasing() {
        let a = Array2::from_shape_fn((6, 6), |(i, j)| 1.0 / (i + j + 1) as f64);
        let qr = HouseholderQr::with_column_pivoting(a);
        let diag = qr.r_diagonal();
        for i in 1..diag.len() {
            assert!(
                diag[i].abs() <= diag[i - 1].abs() * (1.0 + 1e-6),
                "|R({i},{i})| = {} exceeds |R({},{})| = {}",
                diag[i].abs(),
                i - 1,
                i - 1,
                diag[i - 1].abs()
            );
        }
    }

    #[test]
    fn test_pivoted_qr_on_larger_matrix() {
        // Enough steps that partial column norms get downdated many times
        let a = Array2::from_shape_fn((40, 30), |(i, j)| {
            ((i * 7 + j * 13) % 17) as f64 / 17.0 + 1.0 / (i + j + 1) as f64
        });
        let qr = HouseholderQr::with_column_pivoting(a.clone());

        let ap = permuted(&a, qr.permutation());
        let qr_product = explicit_q(&qr).dot(&qr.r());
        for ((i, j), v) in qr_product.indexed_iter() {
            assert_relative_eq!(*v, ap[[i, j]], epsilon = 1e-10);
        }

        let mut seen = qr.permutation().to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (0..30).collect::<Vec<_>>());

        // Every pivot dominates the remaining diagonal up to round-off
        let diag = qr.r_diagonal();
        let largest = diag[0].abs();
        assert!(diag.iter().all(|d| d.abs() <= largest * (1.0 + 1e-10)));
    }

    #[test]
    fn test_zero_column_is_left_alone() {
        let a = array![[0.0_f64, 1.0], [0.0, 2.0]];
        let qr = HouseholderQr::new(a);
        assert_eq!(qr.r_diagonal()[0], 0.0);
    }
}
