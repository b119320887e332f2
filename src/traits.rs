use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by everything that needs `sqrt`, `ln`, `abs`, etc.
/// (decompositions, special functions, correlation statistics).
pub trait FloatScalar: Scalar + Float {
    /// Convert an `f64` literal into `Self`.
    ///
    /// Every `Float` type can represent (or round) an `f64` literal, so the
    /// conversion cannot fail for the constants used in this crate. NaN is
    /// returned if a foreign `Float` impl refuses the cast.
    #[inline]
    fn lit(x: f64) -> Self {
        Self::from(x).unwrap_or_else(Self::nan)
    }

    /// Convert a count (sample size, iteration index) into `Self`.
    #[inline]
    fn from_count(n: usize) -> Self {
        Self::from(n).unwrap_or_else(Self::nan)
    }
}

impl<T: Scalar + Float> FloatScalar for T {}

/// Read-only access to a matrix-like type.
///
/// Lets the in-place algorithms (tridiagonal reduction, LU) operate on
/// [`DynMatrix`](crate::DynMatrix) or on a caller's own storage.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling
/// in-place algorithms to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Swap two whole rows.
    fn swap_rows(&mut self, a: usize, b: usize)
    where
        T: Copy,
    {
        if a == b {
            return;
        }
        for j in 0..self.ncols() {
            let tmp = *self.get(a, j);
            *self.get_mut(a, j) = *self.get(b, j);
            *self.get_mut(b, j) = tmp;
        }
    }

    /// Swap two whole columns.
    fn swap_cols(&mut self, a: usize, b: usize)
    where
        T: Copy,
    {
        if a == b {
            return;
        }
        for i in 0..self.nrows() {
            let tmp = *self.get(i, a);
            *self.get_mut(i, a) = *self.get(i, b);
            *self.get_mut(i, b) = tmp;
        }
    }
}
