use alloc::vec::Vec;

use crate::traits::{FloatScalar, Scalar};

use super::DynMatrix;

// ── Shape manipulation ──────────────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    /// Transpose: (M×N) → (N×M).
    ///
    /// ```
    /// use commstat::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.transpose();
    /// assert_eq!(t.nrows(), 3);
    /// assert_eq!(t.ncols(), 2);
    /// assert_eq!(t[(1, 0)], 2.0);
    /// ```
    pub fn transpose(&self) -> Self {
        DynMatrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    /// Copy column `j` out as a `Vec`.
    pub fn col(&self, j: usize) -> Vec<T> {
        (0..self.nrows).map(|i| self[(i, j)]).collect()
    }

    /// Sum of the diagonal elements.
    ///
    /// Panics if the matrix is not square.
    pub fn trace(&self) -> T {
        assert!(self.is_square(), "trace requires a square matrix");
        (0..self.nrows).fold(T::zero(), |acc, i| acc + self[(i, i)])
    }

    /// Diagonal elements of a (possibly rectangular) matrix.
    pub fn diag(&self) -> Vec<T> {
        (0..self.nrows.min(self.ncols)).map(|i| self[(i, i)]).collect()
    }

    /// Sum of all elements.
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc + x)
    }
}

// ── Float comparisons ───────────────────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// Check whether the matrix is symmetric to within `tol`.
    ///
    /// Returns the first `(row, col)` pair with `|A[i][j] - A[j][i]| > tol`,
    /// or `None` when the matrix is symmetric. Non-square matrices report
    /// `(0, 0)`.
    ///
    /// ```
    /// use commstat::DynMatrix;
    /// let sym = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 3.0]);
    /// assert!(sym.asymmetry(0.0).is_none());
    /// let asym = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 2.5, 3.0]);
    /// assert_eq!(asym.asymmetry(0.1), Some((1, 0)));
    /// ```
    pub fn asymmetry(&self, tol: T) -> Option<(usize, usize)> {
        if !self.is_square() {
            return Some((0, 0));
        }
        for i in 0..self.nrows {
            for j in 0..i {
                if (self[(i, j)] - self[(j, i)]).abs() > tol {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// Whether the matrix is symmetric to within `tol`.
    pub fn is_symmetric(&self, tol: T) -> bool {
        self.asymmetry(tol).is_none()
    }

    /// Largest absolute element-wise difference between two matrices.
    ///
    /// Returns infinity when the shapes differ.
    pub fn max_abs_diff(&self, other: &Self) -> T {
        if self.shape() != other.shape() {
            return T::infinity();
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |m, (&a, &b)| m.max((a - b).abs()))
    }
}
