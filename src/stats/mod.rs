//! Distance matrices, rank statistics and correlation significance.
//!
//! Builds Euclidean distance matrices from coordinate or abundance tables,
//! and compares two samples with Pearson, Spearman or Kendall correlation.
//! The vector forms also return a two-sided significance value computed with
//! the [`special`](crate::special) functions.
//!
//! # Distances
//!
//! | Function | Input layout |
//! |---|---|
//! | [`euclidean_distance`] | samples × coordinates, first `dimensions` columns |
//! | [`euclidean_distance_transposed`] | dimensions × samples |
//! | [`observed_euclidean_distance`] | samples × OTUs, all columns |
//!
//! # Correlation
//!
//! | Statistic | Vector form | Distance-matrix form | Significance |
//! |---|---|---|---|
//! | Pearson | [`pearson`] | [`pearson_distances`] | [`pearson_significance`] (Fisher z) |
//! | Spearman | [`spearman`] | [`spearman_distances`] | [`spearman_significance`] |
//! | Kendall | [`kendall`] | [`kendall_distances`] | [`kendall_significance`] |
//!
//! The distance-matrix forms pair `D1[i][j]` with `D2[i][j]` over the
//! strictly lower triangle only, so each unordered pair of samples counts
//! once and the zero diagonal is ignored.
//!
//! Zero-variance input makes a coefficient 0/0. Such non-finite results are
//! replaced by `0.0`, flagged on [`Correlation::degenerate`], and logged at
//! debug level.
//!
//! # Example
//!
//! ```
//! use commstat::DynMatrix;
//! use commstat::stats::{euclidean_distance, pearson};
//!
//! let points = DynMatrix::from_rows(2, 2, &[0.0_f64, 0.0, 3.0, 4.0]);
//! let d = euclidean_distance(&points, 2).unwrap();
//! assert_eq!(d[(0, 1)], 5.0);
//!
//! let c = pearson(&[1.0_f64, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
//! assert!((c.coefficient - 1.0).abs() < 1e-12);
//! assert!(c.significance < 1e-12);
//! ```

mod correlation;
mod distance;
mod rank;


pub use correlation::{
    kendall, kendall_distances, kendall_significance, pearson, pearson_distances,
    pearson_significance, spearman, spearman_distances, spearman_significance, Correlation,
    CorrelationMethod,
};
pub use distance::{euclidean_distance, euclidean_distance_transposed, observed_euclidean_distance};
pub use rank::{average_ranks, Ranking};

/// Errors from distance and correlation routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    /// Two paired samples have different lengths.
    LengthMismatch { left: usize, right: usize },
    /// A matrix does not have the required shape.
    DimensionMismatch {
        /// Required `(rows, cols)`.
        expected: (usize, usize),
        /// Actual `(rows, cols)`.
        got: (usize, usize),
    },
    /// Too few paired observations for the statistic.
    TooFewObservations { needed: usize, got: usize },
}

impl core::fmt::Display for StatsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StatsError::LengthMismatch { left, right } => {
                write!(f, "sample length mismatch: {} vs {}", left, right)
            }
            StatsError::DimensionMismatch { expected, got } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, got.0, got.1
            ),
            StatsError::TooFewObservations { needed, got } => write!(
                f,
                "too few observations: need at least {}, got {}",
                needed, got
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StatsError {}
