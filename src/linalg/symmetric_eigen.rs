use alloc::vec;
use alloc::vec::Vec;

use crate::dynmatrix::DynMatrix;
use crate::linalg::{ensure_square, LinalgError};
use crate::traits::{FloatScalar, MatrixMut};

/// Settings for [`SymmetricEigen::with_settings`].
///
/// # Example
///
/// ```
/// use commstat::DynMatrix;
/// use commstat::linalg::{EigenSettings, SymmetricEigen};
///
/// let settings = EigenSettings {
///     symmetry_tol: Some(1e-12),
///     ..EigenSettings::default()
/// };
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
/// let eig = SymmetricEigen::with_settings(a, &settings).unwrap();
/// assert!(eig.converged());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenSettings<T> {
    /// QL sweeps allowed per eigenvalue before giving up on it.
    pub max_iterations: usize,
    /// If set, reject input whose transpose differs by more than this.
    pub symmetry_tol: Option<T>,
}

impl<T: FloatScalar> Default for EigenSettings<T> {
    fn default() -> Self {
        Self {
            max_iterations: 3000,
            symmetry_tol: None,
        }
    }
}

/// Overflow-safe `sqrt(a² + b²)`.
///
/// The larger magnitude is factored out before squaring, so the result is
/// finite whenever it is representable. A NaN in either argument gives NaN.
///
/// ```
/// use commstat::linalg::symmetric_eigen::pythag;
/// assert_eq!(pythag(3.0_f64, 4.0), 5.0);
/// assert!((pythag(3e200_f64, 4e200) - 5e200).abs() < 1e188);
/// ```
#[inline]
pub fn pythag<T: FloatScalar>(a: T, b: T) -> T {
    if a.is_nan() || b.is_nan() {
        return T::nan();
    }
    let abs_a = a.abs();
    let abs_b = b.abs();
    if abs_a > abs_b {
        let ratio = abs_b / abs_a;
        abs_a * (T::one() + ratio * ratio).sqrt()
    } else if abs_b == T::zero() {
        T::zero()
    } else {
        let ratio = abs_a / abs_b;
        abs_b * (T::one() + ratio * ratio).sqrt()
    }
}

/// Householder reduction of a symmetric matrix to tridiagonal form, in place.
///
/// Rows are processed from the last to the first. On return:
/// - `d[0..n]` holds the diagonal of the tridiagonal matrix
/// - `e[1..n]` holds the sub-diagonal (`e[i] = T[i][i-1]`), `e[0] = 0`
/// - `a` holds the orthogonal matrix Q with `Qᵀ·A·Q = T`
///
/// Only the lower triangle of `a` is read. Rows whose leading part is
/// already zero skip the reflection.
///
/// Panics if `a` is not square or `d`, `e` are shorter than `n`.
pub fn tridiagonalize<T: FloatScalar>(a: &mut impl MatrixMut<T>, d: &mut [T], e: &mut [T]) {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "tridiagonalize requires a square matrix");
    assert!(d.len() >= n && e.len() >= n);
    if n == 0 {
        return;
    }

    for i in (1..n).rev() {
        let l = i - 1;
        let mut h = T::zero();
        if l > 0 {
            let mut scale = T::zero();
            for k in 0..=l {
                scale = scale + a.get(i, k).abs();
            }
            if scale == T::zero() {
                e[i] = *a.get(i, l);
            } else {
                for k in 0..=l {
                    let v = *a.get(i, k) / scale;
                    *a.get_mut(i, k) = v;
                    h = h + v * v;
                }
                let mut f = *a.get(i, l);
                let mut g = if f >= T::zero() { -h.sqrt() } else { h.sqrt() };
                e[i] = scale * g;
                h = h - f * g;
                *a.get_mut(i, l) = f - g;

                // p = A·u / H, stored temporarily in e[0..=l]
                f = T::zero();
                for j in 0..=l {
                    *a.get_mut(j, i) = *a.get(i, j) / h;
                    g = T::zero();
                    for k in 0..=j {
                        g = g + *a.get(j, k) * *a.get(i, k);
                    }
                    for k in (j + 1)..=l {
                        g = g + *a.get(k, j) * *a.get(i, k);
                    }
                    e[j] = g / h;
                    f = f + e[j] * *a.get(i, j);
                }

                // A ← A - q·uᵀ - u·qᵀ, lower triangle only
                let hh = f / (h + h);
                for j in 0..=l {
                    let f = *a.get(i, j);
                    let g = e[j] - hh * f;
                    e[j] = g;
                    for k in 0..=j {
                        *a.get_mut(j, k) = *a.get(j, k) - (f * e[k] + g * *a.get(i, k));
                    }
                }
            }
        } else {
            e[i] = *a.get(i, l);
        }
        d[i] = h;
    }

    d[0] = T::zero();
    e[0] = T::zero();

    // Accumulate the transformations
    for i in 0..n {
        if d[i] != T::zero() {
            for j in 0..i {
                let mut g = T::zero();
                for k in 0..i {
                    g = g + *a.get(i, k) * *a.get(k, j);
                }
                for k in 0..i {
                    *a.get_mut(k, j) = *a.get(k, j) - g * *a.get(k, i);
                }
            }
        }
        d[i] = *a.get(i, i);
        *a.get_mut(i, i) = T::one();
        for j in 0..i {
            *a.get_mut(j, i) = T::zero();
            *a.get_mut(i, j) = T::zero();
        }
    }
}

/// Implicit-shift QL iteration on a symmetric tridiagonal matrix.
///
/// Takes `d` and `e` as produced by [`tridiagonalize`] (`e[1..n]` is the
/// sub-diagonal). Each rotation is also applied to the columns of `z`, so
/// passing the Q from [`tridiagonalize`] yields the eigenvectors of the
/// original matrix; pass the identity for the tridiagonal matrix itself.
///
/// On return `d` holds the eigenvalues sorted in descending order, the
/// columns of `z` are permuted to match, and `e` is destroyed.
///
/// Returns `false` if some eigenvalue needed more than `max_iterations`
/// sweeps. The remaining work is still carried out and the result is a
/// best-effort approximation.
pub fn tridiagonal_ql<T: FloatScalar>(
    d: &mut [T],
    e: &mut [T],
    z: &mut impl MatrixMut<T>,
    max_iterations: usize,
) -> bool {
    let n = d.len();
    assert!(e.len() >= n);
    if n == 0 {
        return true;
    }

    // Renumber so that e[i] couples d[i] and d[i + 1]
    for i in 1..n {
        e[i - 1] = e[i];
    }
    e[n - 1] = T::zero();

    let two = T::lit(2.0);
    let rows = z.nrows();
    let mut converged = true;

    for l in 0..n {
        let mut iter = 0usize;
        loop {
            // Look for a single small sub-diagonal element to split the matrix
            let mut m = l;
            while m + 1 < n {
                let dd = d[m].abs() + d[m + 1].abs();
                if e[m].abs() + dd == dd {
                    break;
                }
                m += 1;
            }
            if m == l {
                break;
            }
            if iter == max_iterations {
                log::warn!(
                    "tridiagonal QL: eigenvalue {} not converged after {} iterations",
                    l,
                    max_iterations
                );
                converged = false;
                break;
            }
            iter += 1;

            // Wilkinson-style shift
            let mut g = (d[l + 1] - d[l]) / (two * e[l]);
            let mut r = pythag(g, T::one());
            let signed_r = if g >= T::zero() { r.abs() } else { -r.abs() };
            g = d[m] - d[l] + e[l] / (g + signed_r);

            let mut s = T::one();
            let mut c = T::one();
            let mut p = T::zero();
            let mut underflow = false;

            let mut i = m;
            while i > l {
                i -= 1;
                let f = s * e[i];
                let b = c * e[i];
                r = pythag(f, g);
                e[i + 1] = r;
                if r == T::zero() {
                    d[i + 1] = d[i + 1] - p;
                    e[m] = T::zero();
                    underflow = true;
                    break;
                }
                s = f / r;
                c = g / r;
                g = d[i + 1] - p;
                r = (d[i] - g) * s + two * c * b;
                p = s * r;
                d[i + 1] = g + p;
                g = c * r - b;

                for k in 0..rows {
                    let zk1 = *z.get(k, i + 1);
                    let zk = *z.get(k, i);
                    *z.get_mut(k, i + 1) = s * zk + c * zk1;
                    *z.get_mut(k, i) = c * zk - s * zk1;
                }
            }
            if underflow {
                continue;
            }
            d[l] = d[l] - p;
            e[l] = g;
            e[m] = T::zero();
        }
    }

    sort_descending(d, z);
    converged
}

/// Selection sort of eigenvalues into descending order, carrying the
/// eigenvector columns along.
fn sort_descending<T: FloatScalar>(d: &mut [T], z: &mut impl MatrixMut<T>) {
    let n = d.len();
    for i in 0..n {
        let mut k = i;
        for j in (i + 1)..n {
            if d[j] >= d[k] {
                k = j;
            }
        }
        if k != i {
            d.swap(i, k);
            z.swap_cols(i, k);
        }
    }
}

/// Eigen-decomposition of a real symmetric matrix.
///
/// Householder tridiagonalization followed by implicit-shift QL iteration.
/// Eigenvalues are sorted in **descending** order, so the first `k`
/// eigenvector columns span the `k` highest-variance axes of a Gram matrix.
///
/// The input matrix is consumed: its storage becomes the eigenvector matrix.
/// Symmetry is assumed, not checked, unless
/// [`EigenSettings::symmetry_tol`] is set.
///
/// # Example
///
/// ```
/// use commstat::DynMatrix;
/// use commstat::linalg::SymmetricEigen;
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
/// let eig = SymmetricEigen::new(a.clone()).unwrap();
/// assert!((eig.eigenvalues()[0] - 3.0).abs() < 1e-12);
/// assert!((eig.eigenvalues()[1] - 1.0).abs() < 1e-12);
///
/// // A·v = λ·v for the leading pair
/// let v = eig.eigenvectors().col(0);
/// for i in 0..2 {
///     let av = a[(i, 0)] * v[0] + a[(i, 1)] * v[1];
///     assert!((av - 3.0 * v[i]).abs() < 1e-12);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricEigen<T> {
    eigenvalues: Vec<T>,
    eigenvectors: DynMatrix<T>,
    converged: bool,
}

impl<T: FloatScalar> SymmetricEigen<T> {
    /// Decompose with default settings.
    pub fn new(a: DynMatrix<T>) -> Result<Self, LinalgError> {
        Self::with_settings(a, &EigenSettings::default())
    }

    /// Decompose with explicit settings.
    ///
    /// Fails only for a non-square matrix, or a non-symmetric one when
    /// `settings.symmetry_tol` is set. Non-convergence is reported through
    /// [`converged`](Self::converged).
    pub fn with_settings(mut a: DynMatrix<T>, settings: &EigenSettings<T>) -> Result<Self, LinalgError> {
        ensure_square(a.nrows(), a.ncols())?;
        if let Some(tol) = settings.symmetry_tol {
            if let Some((row, col)) = a.asymmetry(tol) {
                return Err(LinalgError::NotSymmetric { row, col });
            }
        }

        let n = a.nrows();
        let mut d = vec![T::zero(); n];
        let mut e = vec![T::zero(); n];
        tridiagonalize(&mut a, &mut d, &mut e);
        let converged = tridiagonal_ql(&mut d, &mut e, &mut a, settings.max_iterations);

        Ok(Self {
            eigenvalues: d,
            eigenvectors: a,
            converged,
        })
    }

    /// Eigenvalues, largest first.
    #[inline]
    pub fn eigenvalues(&self) -> &[T] {
        &self.eigenvalues
    }

    /// Eigenvector matrix; column `j` pairs with `eigenvalues()[j]`.
    #[inline]
    pub fn eigenvectors(&self) -> &DynMatrix<T> {
        &self.eigenvectors
    }

    /// Whether every eigenvalue converged within the iteration cap.
    #[inline]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Split into `(eigenvalues, eigenvectors)`.
    pub fn into_parts(self) -> (Vec<T>, DynMatrix<T>) {
        (self.eigenvalues, self.eigenvectors)
    }

    /// Ordination coordinates: the first `k` eigenvector columns, each
    /// scaled by `sqrt(max(λ, 0))`.
    ///
    /// Applied to a recentered distance matrix this gives the classical
    /// multidimensional scaling embedding; row `i` is sample `i`. `k` is
    /// clamped to the matrix dimension.
    pub fn principal_coordinates(&self, k: usize) -> DynMatrix<T> {
        let n = self.eigenvalues.len();
        let k = k.min(n);
        let scales: Vec<T> = self.eigenvalues[..k]
            .iter()
            .map(|&l| l.max(T::zero()).sqrt())
            .collect();
        DynMatrix::from_fn(n, k, |i, j| self.eigenvectors[(i, j)] * scales[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::{matmul, recenter};

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn sym4() -> DynMatrix<f64> {
        DynMatrix::from_rows(
            4,
            4,
            &[
                4.0, 1.0, -2.0, 2.0, //
                1.0, 2.0, 0.0, 1.0, //
                -2.0, 0.0, 3.0, -2.0, //
                2.0, 1.0, -2.0, -1.0,
            ],
        )
    }

    #[test]
    fn pythag_stable() {
        assert_eq!(pythag(0.0_f64, 0.0), 0.0);
        assert_near(pythag(-3.0, 4.0), 5.0, 1e-15, "3-4-5");
        assert!(pythag(1e300_f64, 1e300).is_finite());
        assert!(pythag(1e-300_f64, 1e-300) > 0.0);
    }

    #[test]
    fn pythag_propagates_nan() {
        assert!(pythag(f64::NAN, 0.0).is_nan());
        assert!(pythag(0.0, f64::NAN).is_nan());
        assert!(pythag(f64::NAN, 2.0).is_nan());
        assert!(pythag(3.0_f32, f32::NAN).is_nan());
    }

    #[test]
    fn known_2x2() {
        let a = DynMatrix::from_rows(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let eig = SymmetricEigen::new(a).unwrap();
        assert!(eig.converged());
        assert_near(eig.eigenvalues()[0], 3.0, TOL, "λ[0]");
        assert_near(eig.eigenvalues()[1], 1.0, TOL, "λ[1]");
    }

    #[test]
    fn known_3x3() {
        // Block diagonal: 2 and [[3, 4], [4, 9]] with eigenvalues 11, 1.
        let a = DynMatrix::from_rows(3, 3, &[2.0, 0.0, 0.0, 0.0, 3.0, 4.0, 0.0, 4.0, 9.0]);
        let eig = SymmetricEigen::new(a).unwrap();
        assert_near(eig.eigenvalues()[0], 11.0, TOL, "λ[0]");
        assert_near(eig.eigenvalues()[1], 2.0, TOL, "λ[1]");
        assert_near(eig.eigenvalues()[2], 1.0, TOL, "λ[2]");

        let v = eig.eigenvectors();
        // Leading eigenvector is ±(0, 1, 2)/√5
        let s = 5.0_f64.sqrt();
        let sign = v[(1, 0)].signum();
        assert_near(v[(0, 0)], 0.0, TOL, "v0[0]");
        assert_near(v[(1, 0)] * sign, 1.0 / s, TOL, "v0[1]");
        assert_near(v[(2, 0)] * sign, 2.0 / s, TOL, "v0[2]");
    }

    #[test]
    fn reconstruction() {
        let a = sym4();
        let eig = SymmetricEigen::new(a.clone()).unwrap();
        let (vals, v) = eig.into_parts();
        let lambda = DynMatrix::from_fn(4, 4, |i, j| if i == j { vals[i] } else { 0.0 });
        let recon = matmul(&matmul(&v, &lambda).unwrap(), &v.transpose()).unwrap();
        assert!(recon.max_abs_diff(&a) < TOL);
    }

    #[test]
    fn orthogonality() {
        let eig = SymmetricEigen::new(sym4()).unwrap();
        let v = eig.eigenvectors();
        let vtv = matmul(&v.transpose(), v).unwrap();
        assert!(vtv.max_abs_diff(&DynMatrix::eye(4)) < TOL);
    }

    #[test]
    fn sorted_descending() {
        let eig = SymmetricEigen::new(sym4()).unwrap();
        let vals = eig.eigenvalues();
        for w in vals.windows(2) {
            assert!(w[0] >= w[1], "not descending: {:?}", vals);
        }
        // Trace is preserved
        let sum: f64 = vals.iter().sum();
        assert_near(sum, 8.0, TOL, "trace");
    }

    #[test]
    fn negative_and_repeated_eigenvalues() {
        let a = DynMatrix::from_rows(2, 2, &[1.0, 3.0, 3.0, 1.0]);
        let eig = SymmetricEigen::new(a).unwrap();
        assert_near(eig.eigenvalues()[0], 4.0, TOL, "λ[0]");
        assert_near(eig.eigenvalues()[1], -2.0, TOL, "λ[1]");

        let eig = SymmetricEigen::new(DynMatrix::eye(3) * 2.0).unwrap();
        for &l in eig.eigenvalues() {
            assert_near(l, 2.0, TOL, "repeated");
        }
    }

    #[test]
    fn tridiagonal_only() {
        // Tridiagonal [[2, -1, 0], [-1, 2, -1], [0, -1, 2]]: 2 ± √2, 2.
        let mut d = [2.0_f64, 2.0, 2.0];
        let mut e = [0.0_f64, -1.0, -1.0];
        let mut z = DynMatrix::eye(3);
        assert!(tridiagonal_ql(&mut d, &mut e, &mut z, 3000));
        let r2 = 2.0_f64.sqrt();
        assert_near(d[0], 2.0 + r2, TOL, "d[0]");
        assert_near(d[1], 2.0, TOL, "d[1]");
        assert_near(d[2], 2.0 - r2, TOL, "d[2]");
    }

    #[test]
    fn tridiagonalize_preserves_spectrum_invariants() {
        let a = sym4();
        let mut q = a.clone();
        let mut d = [0.0; 4];
        let mut e = [0.0; 4];
        tridiagonalize(&mut q, &mut d, &mut e);
        assert_eq!(e[0], 0.0);

        // Q is orthogonal and Qᵀ·A·Q is the tridiagonal (d, e).
        let qtq = matmul(&q.transpose(), &q).unwrap();
        assert!(qtq.max_abs_diff(&DynMatrix::eye(4)) < TOL);
        let t = matmul(&matmul(&q.transpose(), &a).unwrap(), &q).unwrap();
        for i in 0..4 {
            assert_near(t[(i, i)], d[i], TOL, "diag");
            if i > 0 {
                assert_near(t[(i, i - 1)], e[i], TOL, "sub-diagonal");
            }
            for j in 0..i.saturating_sub(1) {
                assert_near(t[(i, j)], 0.0, TOL, "zeroed");
            }
        }
    }

    #[test]
    fn iteration_cap_reports_non_convergence() {
        let settings = EigenSettings {
            max_iterations: 0,
            ..EigenSettings::default()
        };
        let eig = SymmetricEigen::with_settings(sym4(), &settings).unwrap();
        assert!(!eig.converged());
        assert!(eig.eigenvalues().iter().all(|l| l.is_finite()));
    }

    #[test]
    fn symmetry_check() {
        let a = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 1.0]);
        let settings = EigenSettings {
            symmetry_tol: Some(1e-12),
            ..EigenSettings::default()
        };
        assert_eq!(
            SymmetricEigen::with_settings(a.clone(), &settings).unwrap_err(),
            LinalgError::NotSymmetric { row: 1, col: 0 }
        );
        // Without the check the lower triangle is used.
        assert!(SymmetricEigen::new(a).is_ok());
    }

    #[test]
    fn not_square() {
        assert_eq!(
            SymmetricEigen::new(DynMatrix::<f64>::zeros(2, 3)).unwrap_err(),
            LinalgError::NotSquare { nrows: 2, ncols: 3 }
        );
    }

    #[test]
    fn tiny_sizes() {
        let eig = SymmetricEigen::new(DynMatrix::<f64>::zeros(0, 0)).unwrap();
        assert!(eig.eigenvalues().is_empty());

        let eig = SymmetricEigen::new(DynMatrix::from_rows(1, 1, &[7.0])).unwrap();
        assert_eq!(eig.eigenvalues(), &[7.0]);
        assert_eq!(eig.eigenvectors()[(0, 0)], 1.0);
    }

    #[test]
    fn f32_support() {
        let a = DynMatrix::from_rows(2, 2, &[2.0_f32, 1.0, 1.0, 2.0]);
        let eig = SymmetricEigen::new(a).unwrap();
        assert!((eig.eigenvalues()[0] - 3.0).abs() < 1e-5);
        assert!((eig.eigenvalues()[1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn principal_coordinates_of_collinear_points() {
        let x = [0.0_f64, 1.0, 3.0];
        let d = DynMatrix::from_fn(3, 3, |i, j| (x[i] - x[j]).abs());
        let g = recenter(0.0, &d).unwrap();
        let eig = SymmetricEigen::new(g).unwrap();
        assert_near(eig.eigenvalues()[1], 0.0, 1e-10, "second axis empty");

        let pc = eig.principal_coordinates(1);
        assert_eq!(pc.shape(), (3, 1));
        let mean = 4.0 / 3.0;
        let sign = (pc[(2, 0)] / (x[2] - mean)).signum();
        for i in 0..3 {
            assert_near(pc[(i, 0)] * sign, x[i] - mean, 1e-10, "coordinate");
        }

        // k larger than n is clamped
        assert_eq!(eig.principal_coordinates(10).shape(), (3, 3));
    }
}
