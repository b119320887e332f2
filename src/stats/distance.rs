use crate::dynmatrix::DynMatrix;
use crate::traits::FloatScalar;

use super::StatsError;

/// Pairwise Euclidean distances between the rows of `points`.
///
/// Row `i` of `points` is sample `i`; only its first `dimensions` columns
/// are used. With `dimensions == 1` the distance is the absolute
/// difference of the first coordinate. With `dimensions == 0` every
/// distance is zero.
///
/// The result is `n × n`, symmetric, with a zero diagonal.
///
/// Returns `DimensionMismatch` if `dimensions > points.ncols()`.
///
/// ```
/// use commstat::DynMatrix;
/// use commstat::stats::euclidean_distance;
///
/// let points = DynMatrix::from_rows(3, 2, &[0.0_f64, 0.0, 3.0, 4.0, 6.0, 8.0]);
/// let d = euclidean_distance(&points, 2).unwrap();
/// assert_eq!(d[(0, 1)], 5.0);
/// assert_eq!(d[(2, 0)], 10.0);
///
/// // Only the first coordinate
/// let d1 = euclidean_distance(&points, 1).unwrap();
/// assert_eq!(d1[(0, 2)], 6.0);
/// ```
pub fn euclidean_distance<T: FloatScalar>(
    points: &DynMatrix<T>,
    dimensions: usize,
) -> Result<DynMatrix<T>, StatsError> {
    if dimensions > points.ncols() {
        return Err(StatsError::DimensionMismatch {
            expected: (points.nrows(), dimensions),
            got: points.shape(),
        });
    }
    let n = points.nrows();
    let mut dists = DynMatrix::zeros(n, n);
    if dimensions == 0 {
        return Ok(dists);
    }

    for i in 0..n {
        let pi = &points.row(i)[..dimensions];
        for j in 0..i {
            let pj = &points.row(j)[..dimensions];
            let d = if dimensions == 1 {
                (pi[0] - pj[0]).abs()
            } else {
                squared_distance(pi, pj).sqrt()
            };
            dists[(i, j)] = d;
            dists[(j, i)] = d;
        }
    }
    Ok(dists)
}

/// Pairwise Euclidean distances between the columns of `axes`.
///
/// Row `k` of `axes` is coordinate axis `k` and column `i` is sample `i`,
/// the layout ordination output is usually kept in. Every axis is used.
/// Equivalent to `euclidean_distance(&axes.transpose(), axes.nrows())`.
///
/// ```
/// use commstat::DynMatrix;
/// use commstat::stats::euclidean_distance_transposed;
///
/// // Two axes, two samples at (0, 0) and (3, 4)
/// let axes = DynMatrix::from_rows(2, 2, &[0.0_f64, 3.0, 0.0, 4.0]);
/// let d = euclidean_distance_transposed(&axes);
/// assert_eq!(d[(1, 0)], 5.0);
/// ```
pub fn euclidean_distance_transposed<T: FloatScalar>(axes: &DynMatrix<T>) -> DynMatrix<T> {
    let n = axes.ncols();
    let mut dists = DynMatrix::zeros(n, n);
    let dims = axes.nrows();
    if dims == 0 {
        return dists;
    }

    for i in 0..n {
        for j in 0..i {
            let d = if dims == 1 {
                (axes[(0, i)] - axes[(0, j)]).abs()
            } else {
                (0..dims)
                    .fold(T::zero(), |sum, k| {
                        let diff = axes[(k, i)] - axes[(k, j)];
                        sum + diff * diff
                    })
                    .sqrt()
            };
            dists[(i, j)] = d;
            dists[(j, i)] = d;
        }
    }
    dists
}

/// Euclidean distances between the rows of a samples × OTUs table, over
/// every column.
///
/// Intended for relative-abundance profiles: the result compares the
/// observed community composition of each pair of samples.
///
/// ```
/// use commstat::DynMatrix;
/// use commstat::stats::observed_euclidean_distance;
///
/// let rel_abund = DynMatrix::from_rows(2, 3, &[0.5_f64, 0.5, 0.0, 0.5, 0.0, 0.5]);
/// let d = observed_euclidean_distance(&rel_abund);
/// assert!((d[(0, 1)] - 0.5_f64.sqrt()).abs() < 1e-15);
/// assert_eq!(d[(0, 0)], 0.0);
/// ```
pub fn observed_euclidean_distance<T: FloatScalar>(rel_abund: &DynMatrix<T>) -> DynMatrix<T> {
    let n = rel_abund.nrows();
    let mut dists = DynMatrix::zeros(n, n);
    for i in 0..n {
        for j in 0..i {
            let d = squared_distance(rel_abund.row(i), rel_abund.row(j)).sqrt();
            dists[(i, j)] = d;
            dists[(j, i)] = d;
        }
    }
    dists
}

#[inline]
fn squared_distance<T: FloatScalar>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::zero(), |sum, (&x, &y)| {
        let diff = x - y;
        sum + diff * diff
    })
}
