//! Dense linear algebra on [`DynMatrix`](crate::DynMatrix).
//!
//! - [`product`]: checked matrix multiply and the double-centering
//!   transform used by classical multidimensional scaling.
//! - [`lu`]: Crout LU decomposition with implicit (scaled) partial
//!   pivoting, linear solves and inversion.
//! - [`symmetric_eigen`]: Householder tridiagonal reduction followed by
//!   implicit-shift QL iteration; eigenvalues sorted descending.
//!
//! The in-place free functions operate on `&mut impl MatrixMut<T>`. The
//! wrapper structs ([`LuDecomposition`], [`SymmetricEigen`]) take their input
//! matrix by value: both algorithms destroy it, so a caller that still needs
//! the original must clone it first.

pub mod lu;
pub mod product;
pub mod symmetric_eigen;

pub use lu::{invert, solve, LuDecomposition, LuStatus};
pub use product::{matmul, recenter};
pub use symmetric_eigen::{EigenSettings, SymmetricEigen};

/// Errors from linear algebra operations.
///
/// Only shape contract violations are errors. Numerically degenerate input
/// (zero pivots, non-convergence) still yields a result; see
/// [`LuDecomposition::is_singular`] and [`SymmetricEigen::converged`].
///
/// ```
/// use commstat::DynMatrix;
/// use commstat::linalg::{matmul, LinalgError};
///
/// let a = DynMatrix::<f64>::zeros(2, 3);
/// let b = DynMatrix::<f64>::zeros(2, 2);
/// assert_eq!(
///     matmul(&a, &b).unwrap_err(),
///     LinalgError::DimensionMismatch { expected: (3, 2), got: (2, 2) },
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Operand shapes are incompatible with the requested operation.
    DimensionMismatch {
        /// Expected `(rows, cols)` of the offending operand.
        expected: (usize, usize),
        /// Actual `(rows, cols)`.
        got: (usize, usize),
    },
    /// The operation requires a square matrix.
    NotSquare { nrows: usize, ncols: usize },
    /// Nested input rows have unequal lengths.
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
    /// Symmetry was requested to be validated and `A[row][col] != A[col][row]`.
    NotSymmetric { row: usize, col: usize },
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::DimensionMismatch { expected, got } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, got.0, got.1
            ),
            LinalgError::NotSquare { nrows, ncols } => {
                write!(f, "matrix is not square: {}x{}", nrows, ncols)
            }
            LinalgError::RaggedRows { row, expected, got } => write!(
                f,
                "row {} has {} columns, expected {}",
                row, got, expected
            ),
            LinalgError::NotSymmetric { row, col } => {
                write!(f, "matrix is not symmetric at ({}, {})", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// Return `NotSquare` unless the matrix is square.
pub(crate) fn ensure_square(nrows: usize, ncols: usize) -> Result<(), LinalgError> {
    if nrows != ncols {
        return Err(LinalgError::NotSquare { nrows, ncols });
    }
    Ok(())
}
