use alloc::vec::Vec;

use crate::linalg::{self, LinalgError, LuDecomposition, SymmetricEigen};
use crate::traits::{FloatScalar, Scalar};

use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    /// Checked matrix product `self · rhs`.
    ///
    /// ```
    /// use commstat::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let b = DynMatrix::from_rows(2, 1, &[1.0, 1.0]);
    /// let c = a.matmul(&b).unwrap();
    /// assert_eq!(c.as_slice(), &[3.0, 7.0]);
    /// assert!(b.matmul(&a).is_err());
    /// ```
    pub fn matmul(&self, rhs: &Self) -> Result<Self, LinalgError> {
        linalg::matmul(self, rhs)
    }
}

impl<T: FloatScalar> DynMatrix<T> {
    /// LU decomposition. Consumes the matrix.
    pub fn lu(self) -> Result<LuDecomposition<T>, LinalgError> {
        LuDecomposition::new(self)
    }

    /// Solve `self · x = b`. Consumes the matrix.
    ///
    /// ```
    /// use commstat::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[3.0_f64, 2.0, 1.0, 4.0]);
    /// let x = a.solve(&[7.0, 9.0]).unwrap();
    /// assert!((x[0] - 1.0).abs() < 1e-12);
    /// assert!((x[1] - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve(self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        linalg::solve(self, b)
    }

    /// Matrix inverse. Consumes the matrix.
    ///
    /// ```
    /// use commstat::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
    /// let inv = a.clone().inverse().unwrap();
    /// let id = &a * &inv;
    /// assert!(id.max_abs_diff(&DynMatrix::eye(2)) < 1e-12);
    /// ```
    pub fn inverse(self) -> Result<Self, LinalgError> {
        linalg::invert(self)
    }

    /// Symmetric eigen-decomposition, eigenvalues descending. Consumes the
    /// matrix.
    ///
    /// ```
    /// use commstat::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[5.0_f64, 2.0, 2.0, 2.0]);
    /// let eig = a.eig_symmetric().unwrap();
    /// assert!((eig.eigenvalues()[0] - 6.0).abs() < 1e-10);
    /// assert!((eig.eigenvalues()[1] - 1.0).abs() < 1e-10);
    /// ```
    pub fn eig_symmetric(self) -> Result<SymmetricEigen<T>, LinalgError> {
        SymmetricEigen::new(self)
    }
}
