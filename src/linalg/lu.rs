use alloc::vec;
use alloc::vec::Vec;

use crate::dynmatrix::DynMatrix;
use crate::linalg::{ensure_square, LinalgError};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Value substituted for an exactly-zero pivot.
const TINY_PIVOT: f64 = 1e-20;

/// Outcome of an in-place LU decomposition.
///
/// Degenerate input does not abort the factorization: zero pivots are
/// replaced by a tiny value so a numeric answer is still produced. The
/// counts below make that substitution observable to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LuStatus {
    /// `true` if an even number of row interchanges was performed.
    pub even: bool,
    /// Number of exactly-zero pivots replaced by a tiny value.
    pub pivot_substitutions: usize,
    /// Number of rows that were entirely zero on input.
    pub zero_rows: usize,
}

impl LuStatus {
    /// Whether the input was (numerically) singular.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.pivot_substitutions > 0 || self.zero_rows > 0
    }
}

/// Crout LU decomposition with implicit partial pivoting, in place.
///
/// Each row is scaled by its largest absolute element when choosing the
/// pivot. On return `a` holds the row-permuted factors packed together:
/// - upper triangle (including diagonal): U
/// - strict lower triangle: L (unit diagonal implied)
///
/// `perm[j]` records the row that was interchanged with row `j` at step
/// `j`; it is consumed by [`lu_back_substitute`].
///
/// Panics if `a` is not square or `perm.len() != n`.
pub fn lu_decompose<T: FloatScalar>(a: &mut impl MatrixMut<T>, perm: &mut [usize]) -> LuStatus {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "LU decomposition requires a square matrix");
    assert_eq!(n, perm.len(), "permutation slice length must match matrix size");

    let tiny = T::lit(TINY_PIVOT);
    let mut status = LuStatus {
        even: true,
        pivot_substitutions: 0,
        zero_rows: 0,
    };

    // Implicit scaling: 1 / (largest |a_ij| in row i)
    let mut scale = vec![T::one(); n];
    for (i, s) in scale.iter_mut().enumerate() {
        let mut big = T::zero();
        for j in 0..n {
            big = big.max(a.get(i, j).abs());
        }
        if big == T::zero() {
            status.zero_rows += 1;
        } else {
            *s = T::one() / big;
        }
    }

    for j in 0..n {
        // Upper part of column j
        for i in 0..j {
            let mut sum = *a.get(i, j);
            for k in 0..i {
                sum = sum - *a.get(i, k) * *a.get(k, j);
            }
            *a.get_mut(i, j) = sum;
        }

        // Lower part of column j, tracking the best scaled pivot
        let mut big = T::zero();
        let mut imax = j;
        for i in j..n {
            let mut sum = *a.get(i, j);
            for k in 0..j {
                sum = sum - *a.get(i, k) * *a.get(k, j);
            }
            *a.get_mut(i, j) = sum;
            let dum = scale[i] * sum.abs();
            if dum >= big {
                big = dum;
                imax = i;
            }
        }

        if imax != j {
            a.swap_rows(imax, j);
            status.even = !status.even;
            scale[imax] = scale[j];
        }
        perm[j] = imax;

        if *a.get(j, j) == T::zero() {
            *a.get_mut(j, j) = tiny;
            status.pivot_substitutions += 1;
        }

        if j + 1 < n {
            let inv_pivot = T::one() / *a.get(j, j);
            for i in (j + 1)..n {
                *a.get_mut(i, j) = *a.get(i, j) * inv_pivot;
            }
        }
    }

    status
}

/// Solve `A·x = b` in place, given the packed factors from [`lu_decompose`].
///
/// `b` is overwritten with `x`. Forward substitution starts at the first
/// non-zero entry of the permuted right-hand side, which makes solving
/// against identity columns (inversion) cheaper.
///
/// # Panics
///
/// Panics if `b.len()` differs from the matrix dimension.
pub fn lu_back_substitute<T: FloatScalar>(lu: &impl MatrixRef<T>, perm: &[usize], b: &mut [T]) {
    let n = lu.nrows();
    assert_eq!(n, b.len(), "right-hand side length must match matrix size");

    // Forward substitution: L·y = P·b
    let mut first_nonzero: Option<usize> = None;
    for i in 0..n {
        let ip = perm[i];
        let mut sum = b[ip];
        b[ip] = b[i];
        if let Some(start) = first_nonzero {
            for j in start..i {
                sum = sum - *lu.get(i, j) * b[j];
            }
        } else if sum != T::zero() {
            first_nonzero = Some(i);
        }
        b[i] = sum;
    }

    // Back substitution: U·x = y
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum = sum - *lu.get(i, j) * b[j];
        }
        b[i] = sum / *lu.get(i, i);
    }
}

/// LU decomposition of a square matrix.
///
/// Takes ownership of the matrix: the factorization overwrites it. Clone
/// first if the original is still needed.
///
/// # Example
///
/// ```
/// use commstat::DynMatrix;
/// use commstat::linalg::LuDecomposition;
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
/// let lu = LuDecomposition::new(a).unwrap();
///
/// let x = lu.solve(&[4.0, 11.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// assert!((lu.det() - 1.0).abs() < 1e-12);
/// assert!(!lu.is_singular());
/// ```
#[derive(Debug, Clone)]
pub struct LuDecomposition<T> {
    lu: DynMatrix<T>,
    perm: Vec<usize>,
    status: LuStatus,
}

impl<T: FloatScalar> LuDecomposition<T> {
    /// Decompose a square matrix.
    ///
    /// A singular matrix is not an error: its zero pivots are replaced by a
    /// tiny value, [`is_singular`](Self::is_singular) reports it, and a
    /// warning is logged.
    pub fn new(mut a: DynMatrix<T>) -> Result<Self, LinalgError> {
        ensure_square(a.nrows(), a.ncols())?;
        let mut perm = vec![0usize; a.nrows()];
        let status = lu_decompose(&mut a, &mut perm);
        if status.is_singular() {
            log::warn!(
                "singular matrix in LU decomposition ({}x{}): {} zero row(s), {} pivot(s) replaced",
                a.nrows(),
                a.ncols(),
                status.zero_rows,
                status.pivot_substitutions
            );
        }
        Ok(Self { lu: a, perm, status })
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.lu.nrows()
    }

    /// Solve `A·x = b` in place; `b` is overwritten with `x`.
    pub fn solve_in_place(&self, b: &mut [T]) -> Result<(), LinalgError> {
        let n = self.dim();
        if b.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: (n, 1),
                got: (b.len(), 1),
            });
        }
        lu_back_substitute(&self.lu, &self.perm, b);
        Ok(())
    }

    /// Solve `A·x = b` for `x`.
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        let mut x = b.to_vec();
        self.solve_in_place(&mut x)?;
        Ok(x)
    }

    /// Compute the matrix inverse, one identity column at a time.
    pub fn inverse(&self) -> DynMatrix<T> {
        let n = self.dim();
        let mut inv = DynMatrix::zeros(n, n);
        let mut col = vec![T::zero(); n];
        for j in 0..n {
            col.iter_mut().for_each(|c| *c = T::zero());
            col[j] = T::one();
            lu_back_substitute(&self.lu, &self.perm, &mut col);
            for (i, &v) in col.iter().enumerate() {
                inv[(i, j)] = v;
            }
        }
        inv
    }

    /// Determinant.
    pub fn det(&self) -> T {
        let start = if self.status.even { T::one() } else { -T::one() };
        (0..self.dim()).fold(start, |d, i| d * self.lu[(i, i)])
    }

    /// Sign of the determinant: `1` or `-1`, and `0` only if a diagonal
    /// entry of U is exactly zero.
    pub fn det_sign(&self) -> T {
        let mut sign = if self.status.even { T::one() } else { -T::one() };
        for i in 0..self.dim() {
            let u = self.lu[(i, i)];
            if u < T::zero() {
                sign = -sign;
            } else if u == T::zero() {
                return T::zero();
            }
        }
        sign
    }

    /// `ln |det(A)|`, summed from the diagonal of U without forming the
    /// product. Combine with [`det_sign`](Self::det_sign) for the signed
    /// log-determinant used in model-selection scores.
    pub fn ln_abs_det(&self) -> T {
        (0..self.dim()).fold(T::zero(), |acc, i| acc + self.lu[(i, i)].abs().ln())
    }

    /// Number of zero pivots that were replaced by a tiny value.
    #[inline]
    pub fn pivot_substitutions(&self) -> usize {
        self.status.pivot_substitutions
    }

    /// Number of all-zero input rows.
    #[inline]
    pub fn zero_rows(&self) -> usize {
        self.status.zero_rows
    }

    /// Whether the input matrix was detected as singular.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.status.is_singular()
    }

    /// Full decomposition status.
    #[inline]
    pub fn status(&self) -> LuStatus {
        self.status
    }

    /// The packed L/U factors (row-permuted).
    #[inline]
    pub fn factors(&self) -> &DynMatrix<T> {
        &self.lu
    }

    /// The row interchange record.
    #[inline]
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }
}

/// Solve `A·x = b` with a fresh LU decomposition of `a`.
///
/// ```
/// use commstat::DynMatrix;
/// use commstat::linalg::solve;
///
/// let a = DynMatrix::from_rows(3, 3, &[
///     2.0_f64, 1.0, -1.0,
///     -3.0, -1.0, 2.0,
///     -2.0, 1.0, 2.0,
/// ]);
/// let x = solve(a, &[8.0, -11.0, -3.0]).unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-12);
/// assert!((x[1] - 3.0).abs() < 1e-12);
/// assert!((x[2] + 1.0).abs() < 1e-12);
/// ```
pub fn solve<T: FloatScalar>(a: DynMatrix<T>, b: &[T]) -> Result<Vec<T>, LinalgError> {
    LuDecomposition::new(a)?.solve(b)
}

/// Invert `a`: decompose once, then solve against each identity column.
pub fn invert<T: FloatScalar>(a: DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
    Ok(LuDecomposition::new(a)?.inverse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::matmul;

    fn diagonally_dominant(n: usize) -> DynMatrix<f64> {
        DynMatrix::from_fn(n, n, |i, j| {
            if i == j {
                10.0 + i as f64
            } else {
                1.0 / (1.0 + (i as f64 - j as f64).abs())
            }
        })
    }

    #[test]
    fn lu_solve_2x2() {
        // 3x + 2y = 7
        // x + 4y = 9
        let a = DynMatrix::from_rows(2, 2, &[3.0_f64, 2.0, 1.0, 4.0]);
        let x = solve(a, &[7.0, 9.0]).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn solve_verify_residual() {
        let a = DynMatrix::from_rows(
            4,
            4,
            &[
                1.0_f64, 2.0, 3.0, 4.0, //
                5.0, 6.0, 7.0, 8.0, //
                2.0, 6.0, 4.0, 1.0, //
                3.0, 1.0, 9.0, 2.0,
            ],
        );
        let b = [10.0, 26.0, 13.0, 15.0];
        let x = solve(a.clone(), &b).unwrap();

        for i in 0..4 {
            let row_sum: f64 = (0..4).map(|j| a[(i, j)] * x[j]).sum();
            assert!(
                (row_sum - b[i]).abs() < 1e-10,
                "residual[{}] = {}",
                i,
                row_sum - b[i]
            );
        }
    }

    #[test]
    fn solve_in_place_overwrites_rhs() {
        let a = DynMatrix::from_rows(2, 2, &[0.0_f64, 1.0, 1.0, 0.0]);
        let lu = LuDecomposition::new(a).unwrap();
        let mut b = [3.0, 5.0];
        lu.solve_in_place(&mut b).unwrap();
        assert_eq!(b, [5.0, 3.0]);
    }

    #[test]
    fn solve_wrong_rhs_length() {
        let lu = LuDecomposition::new(DynMatrix::<f64>::eye(3)).unwrap();
        assert_eq!(
            lu.solve(&[1.0, 2.0]),
            Err(LinalgError::DimensionMismatch {
                expected: (3, 1),
                got: (2, 1)
            })
        );
    }

    #[test]
    fn not_square_is_error() {
        let a = DynMatrix::<f64>::zeros(2, 3);
        assert_eq!(
            LuDecomposition::new(a).unwrap_err(),
            LinalgError::NotSquare { nrows: 2, ncols: 3 }
        );
    }

    #[test]
    fn inverse_diagonally_dominant() {
        let a = diagonally_dominant(6);
        let inv = invert(a.clone()).unwrap();
        let id = matmul(&a, &inv).unwrap();
        assert!(id.max_abs_diff(&DynMatrix::eye(6)) < 1e-8);
    }

    #[test]
    fn inverse_3x3_known() {
        let a = DynMatrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0]);
        let inv = invert(a).unwrap();
        let expected = DynMatrix::from_rows(
            3,
            3,
            &[-24.0, 18.0, 5.0, 20.0, -15.0, -4.0, -5.0, 4.0, 1.0],
        );
        assert!(inv.max_abs_diff(&expected) < 1e-10);
    }

    #[test]
    fn determinant_and_log_determinant() {
        let a = DynMatrix::from_rows(3, 3, &[6.0_f64, 1.0, 1.0, 4.0, -2.0, 5.0, 2.0, 8.0, 7.0]);
        let lu = LuDecomposition::new(a).unwrap();
        assert!((lu.det() - (-306.0)).abs() < 1e-10);
        assert_eq!(lu.det_sign(), -1.0);
        assert!((lu.ln_abs_det() - 306.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn row_swap_parity() {
        let a = DynMatrix::from_rows(2, 2, &[3.0_f64, 8.0, 4.0, 6.0]);
        let lu = LuDecomposition::new(a).unwrap();
        assert!((lu.det() - (-14.0)).abs() < 1e-12);
    }

    #[test]
    fn singular_matrix_substitutes_pivot() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
        let lu = LuDecomposition::new(a).unwrap();
        assert!(lu.is_singular());
        assert_eq!(lu.pivot_substitutions(), 1);
        assert_eq!(lu.zero_rows(), 0);
        // The factorization still produces finite numbers.
        let x = lu.solve(&[1.0, 2.0]).unwrap();
        assert!(x.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn zero_row_is_reported() {
        let a = DynMatrix::from_rows(2, 2, &[0.0_f64, 0.0, 1.0, 2.0]);
        let lu = LuDecomposition::new(a).unwrap();
        assert_eq!(lu.zero_rows(), 1);
        assert!(lu.is_singular());
    }

    #[test]
    fn free_function_on_matrix_mut() {
        let mut a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 4.0, 3.0]);
        let mut perm = [0usize; 2];
        let status = lu_decompose(&mut a, &mut perm);
        assert!(!status.is_singular());
        // Row 1 has the larger scaled pivot (4/4 vs 2/2 ties; the later row wins).
        assert_eq!(perm, [1, 1]);
        assert!(!status.even);
        let mut b = [3.0, 7.0];
        lu_back_substitute(&a, &perm, &mut b);
        assert!((b[0] - 1.0).abs() < 1e-12);
        assert!((b[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "right-hand side length must match matrix size")]
    fn back_substitute_short_rhs_panics() {
        let mut a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 4.0, 3.0]);
        let mut perm = [0usize; 2];
        lu_decompose(&mut a, &mut perm);
        let mut b = [3.0_f64];
        lu_back_substitute(&a, &perm, &mut b);
    }

    #[test]
    #[should_panic(expected = "right-hand side length must match matrix size")]
    fn back_substitute_long_rhs_panics() {
        let mut a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 4.0, 3.0]);
        let mut perm = [0usize; 2];
        lu_decompose(&mut a, &mut perm);
        let mut b = [3.0_f64, 7.0, 1.0];
        lu_back_substitute(&a, &perm, &mut b);
    }

    #[test]
    fn empty_matrix() {
        let lu = LuDecomposition::new(DynMatrix::<f64>::zeros(0, 0)).unwrap();
        assert_eq!(lu.det(), 1.0);
        assert_eq!(lu.inverse().shape(), (0, 0));
        assert!(lu.solve(&[]).unwrap().is_empty());
    }
}
