//! # commstat
//!
//! Numerical core for microbial-community analysis: dense matrix algebra,
//! symmetric eigen-decomposition, LU solves, the special functions behind
//! significance tests, distance matrices, rank correlation, and seeded
//! uniform generators. Pure Rust, no-std compatible (requires `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use commstat::DynMatrix;
//! use commstat::linalg::recenter;
//! use commstat::stats::euclidean_distance;
//!
//! // Four samples in the plane
//! let points = DynMatrix::from_rows(4, 2, &[
//!     0.0_f64, 0.0,
//!     3.0, 0.0,
//!     0.0, 4.0,
//!     3.0, 4.0,
//! ]);
//! let d = euclidean_distance(&points, 2).unwrap();
//! assert_eq!(d[(0, 3)], 5.0);
//!
//! // Classical scaling: double-centre −½ d² and take its eigenvectors
//! let b = recenter(0.0, &d).unwrap();
//! let eig = b.eig_symmetric().unwrap();
//! assert!(eig.converged());
//! // Two non-trivial axes for planar points
//! assert!(eig.eigenvalues()[1] > 1.0);
//! assert!(eig.eigenvalues()[2].abs() < 1e-10);
//! ```
//!
//! ## Modules
//!
//! - [`dynmatrix`]: Heap-allocated `DynMatrix<T>` with runtime dimensions
//!   and `Vec<T>` row-major storage. Arithmetic operators, transpose, and
//!   convenience methods `a.solve(&b)`, `a.inverse()`, `a.eig_symmetric()`.
//!
//! - [`linalg`]: LU decomposition with implicit partial pivoting
//!   ([`linalg::LuDecomposition`]), symmetric eigen-decomposition by
//!   Householder tridiagonalisation and implicit QL
//!   ([`linalg::SymmetricEigen`]), and the products [`linalg::matmul`] and
//!   [`linalg::recenter`].
//!
//! - [`special`]: `lgamma`, regularized incomplete gamma and beta
//!   functions, `erf` / `erfc`.
//!
//! - [`stats`]: Euclidean distance matrices, Pearson / Spearman / Kendall
//!   correlation of samples or of distance matrices, and their two-sided
//!   significance.
//!
//! - [`random`]: Seeded uniform generators with owned state.
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats (`Scalar + Float`), used by every numerical routine
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for algorithms
//!
//! ## Degenerate input
//!
//! Nothing panics on singular, zero-variance or slowly converging input.
//! Such cases produce a best-effort value, are reported on the result
//! (`LuStatus`, `SymmetricEigen::converged`, `Correlation::degenerate`) and
//! are logged through the [`log`](https://docs.rs/log) facade. Install any
//! `log` backend to see them.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Hardware FPU via system libm, `std::error::Error` impls |
//! | `libm`  | no      | Pure-Rust software float fallback for `no_std` |
//! | `rand`  | no      | `rand_core::RngCore` for every generator in [`random`] |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dynmatrix;
pub mod linalg;
pub mod random;
pub mod special;
pub mod stats;
pub mod traits;

pub use dynmatrix::DynMatrix;
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
