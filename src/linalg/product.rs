use alloc::vec;

use crate::dynmatrix::DynMatrix;
use crate::linalg::{ensure_square, LinalgError};
use crate::traits::{FloatScalar, Scalar};

/// Matrix product `C = A·B`.
///
/// Requires `a.ncols() == b.nrows()`; the result is `a.nrows() × b.ncols()`.
/// Rectangular operands are fine.
///
/// ```
/// use commstat::DynMatrix;
/// use commstat::linalg::matmul;
///
/// let a = DynMatrix::from_rows(1, 3, &[1.0, 2.0, 3.0]);
/// let b = DynMatrix::from_rows(3, 1, &[4.0, 5.0, 6.0]);
/// let c = matmul(&a, &b).unwrap();
/// assert_eq!(c.shape(), (1, 1));
/// assert_eq!(c[(0, 0)], 32.0);
/// ```
pub fn matmul<T: Scalar>(a: &DynMatrix<T>, b: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
    if a.ncols != b.nrows {
        return Err(LinalgError::DimensionMismatch {
            expected: (a.ncols, b.ncols),
            got: (b.nrows, b.ncols),
        });
    }
    let m = a.nrows;
    let n = a.ncols;
    let p = b.ncols;
    let mut data = vec![T::zero(); m * p];
    // i-k-j order keeps both inner accesses contiguous in row-major storage.
    for i in 0..m {
        let out = &mut data[i * p..(i + 1) * p];
        for k in 0..n {
            let a_ik = a.data[i * n + k];
            let b_row = &b.data[k * p..(k + 1) * p];
            for (o, &b_kj) in out.iter_mut().zip(b_row) {
                *o = *o + a_ik * b_kj;
            }
        }
    }
    Ok(DynMatrix {
        data,
        nrows: m,
        ncols: p,
    })
}

/// Double-center a pairwise distance matrix into a Gram matrix.
///
/// Builds `A[i][j] = -0.5·D[i][j]² + offset` for `i != j` (zero diagonal)
/// and the centering matrix `C = I - J/n`, and returns `G = C·A·C`. The
/// result feeds [`SymmetricEigen`](crate::linalg::SymmetricEigen) for
/// classical multidimensional scaling; `offset` shifts every off-diagonal
/// entry before centering (e.g. to force non-negative definiteness).
///
/// Only the strictly upper triangle of `d` is read, so a symmetric input
/// is assumed.
///
/// ```
/// use commstat::DynMatrix;
/// use commstat::linalg::recenter;
///
/// // Two points at distance 2: G = [[1, -1], [-1, 1]]
/// let d = DynMatrix::from_rows(2, 2, &[0.0_f64, 2.0, 2.0, 0.0]);
/// let g = recenter(0.0, &d).unwrap();
/// assert!((g[(0, 0)] - 1.0).abs() < 1e-12);
/// assert!((g[(0, 1)] + 1.0).abs() < 1e-12);
/// ```
pub fn recenter<T: FloatScalar>(offset: T, d: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
    ensure_square(d.nrows, d.ncols)?;
    let n = d.nrows;
    if n == 0 {
        return Ok(DynMatrix::zeros(0, 0));
    }

    let half = T::lit(0.5);
    let scale = -T::one() / T::from_count(n);

    let mut a = DynMatrix::zeros(n, n);
    let mut c = DynMatrix::zeros(n, n);
    for i in 0..n {
        c[(i, i)] = T::one() + scale;
        for j in (i + 1)..n {
            let dij = d[(i, j)];
            let v = -half * dij * dij + offset;
            a[(i, j)] = v;
            a[(j, i)] = v;
            c[(i, j)] = scale;
            c[(j, i)] = scale;
        }
    }

    let ca = matmul(&c, &a)?;
    matmul(&ca, &c)
}
