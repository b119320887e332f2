//! Special functions behind the correlation significance values.
//!
//! All functions are generic over [`FloatScalar`] (f32/f64) and no-std
//! compatible. Iterative routines (series, continued fractions) stop after
//! a fixed number of terms; if that cap is hit they log a warning and return
//! the best current approximation instead of failing.
//!
//! # Functions
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`lgamma`] | Log-gamma ln Γ(x) |
//! | [`gamma_inc`] | Regularized lower incomplete gamma P(a,x) |
//! | [`gamma_inc_upper`] | Regularized upper incomplete gamma Q(a,x) = 1−P(a,x) |
//! | [`betainc`] | Regularized incomplete beta I_x(a,b) |
//! | [`erfc`] | Complementary error function, rational Chebyshev fit |
//! | [`erf`] | Error function 1−erfc(x) |
//!
//! # Example
//!
//! ```
//! use commstat::special::{erfc, gamma_inc, gamma_inc_upper, lgamma};
//!
//! // ln Γ(1) = ln Γ(2) = 0
//! assert!(lgamma(1.0_f64).abs() < 1e-14);
//! assert!(lgamma(2.0_f64).abs() < 1e-14);
//!
//! // P + Q = 1
//! let p = gamma_inc(2.5_f64, 1.7).unwrap();
//! let q = gamma_inc_upper(2.5_f64, 1.7).unwrap();
//! assert!((p + q - 1.0).abs() < 1e-14);
//!
//! // erfc(0) = 1 to within the fit error
//! assert!((erfc(0.0_f64) - 1.0).abs() < 1.2e-7);
//! ```

use core::fmt;

use crate::FloatScalar;

mod betainc;
mod erf_fn;
mod gamma_fn;
mod incgamma;


pub use betainc::betainc;
pub use erf_fn::{erf, erfc};
pub use gamma_fn::lgamma;
pub use incgamma::{gamma_inc, gamma_inc_upper};

/// Errors from special function evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialError {
    /// Input outside the function's domain (e.g. a ≤ 0 or x < 0 for incomplete gamma).
    DomainError,
}

impl fmt::Display for SpecialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomainError => write!(f, "input outside function domain"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SpecialError {}

/// Term cap for series and continued fractions.
pub(crate) const MAX_ITER: usize = 100;

/// Smallest magnitude allowed in a continued-fraction denominator:
/// `MIN_POSITIVE / EPSILON` of the working type.
#[inline]
pub(crate) fn fpmin<T: FloatScalar>() -> T {
    T::min_positive_value() / T::epsilon()
}

// ---------------------------------------------------------------------------
// Lanczos approximation constants (g = 7, n = 9)
// ---------------------------------------------------------------------------

/// Lanczos parameter g.
pub(crate) const LANCZOS_G: f64 = 7.0;

/// ln √(2π), the constant term of the Lanczos log-gamma.
pub(crate) const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

/// Lanczos series coefficients (n = 9).
pub(crate) const LANCZOS_COEFFS: [f64; 9] = [
    0.99999999999980993,
    676.5203681218851,
    -1259.1392167224028,
    771.32342877765313,
    -176.61502916214059,
    12.507343278686905,
    -0.13857109526572012,
    9.9843695780195716e-6,
    1.5056327351493116e-7,
];

/// Evaluate the Lanczos series Ag(z) = c0 + c1/(z+1) + c2/(z+2) + ...
#[inline]
pub(crate) fn lanczos_sum<T: FloatScalar>(z: T) -> T {
    LANCZOS_COEFFS[1..]
        .iter()
        .enumerate()
        .fold(T::lit(LANCZOS_COEFFS[0]), |sum, (i, &c)| {
            sum + T::lit(c) / (z + T::from_count(i + 1))
        })
}
