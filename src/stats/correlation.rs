use alloc::vec::Vec;

use crate::dynmatrix::DynMatrix;
use crate::special::{betainc, erfc};
use crate::traits::FloatScalar;

use super::rank::average_ranks;
use super::StatsError;

/// Added to both sides of the Fisher z ratio so |r| = 1 stays finite.
const FISHER_TINY: f64 = 1e-20;

/// A correlation coefficient with its two-sided significance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation<T> {
    /// Coefficient in `[-1, 1]`.
    pub coefficient: T,
    /// Two-sided significance (p-value) in `[0, 1]`.
    pub significance: T,
    /// `true` if a non-finite coefficient or significance was replaced by
    /// `0.0` (typically zero-variance input).
    pub degenerate: bool,
}

/// Correlation statistic, selectable at run time.
///
/// ```
/// use commstat::stats::CorrelationMethod;
///
/// let x = [1.0_f64, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0_f64, 1.0, 4.0, 3.0, 5.0];
/// for method in [CorrelationMethod::Pearson, CorrelationMethod::Spearman, CorrelationMethod::Kendall] {
///     let c = method.correlate(&x, &y).unwrap();
///     assert!(c.coefficient > 0.0 && c.coefficient < 1.0);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorrelationMethod {
    Pearson,
    Spearman,
    Kendall,
}

impl CorrelationMethod {
    /// Correlate two paired samples.
    pub fn correlate<T: FloatScalar>(&self, x: &[T], y: &[T]) -> Result<Correlation<T>, StatsError> {
        match self {
            CorrelationMethod::Pearson => pearson(x, y),
            CorrelationMethod::Spearman => spearman(x, y),
            CorrelationMethod::Kendall => kendall(x, y),
        }
    }

    /// Correlate the lower triangles of two distance matrices.
    pub fn correlate_distances<T: FloatScalar>(
        &self,
        d1: &DynMatrix<T>,
        d2: &DynMatrix<T>,
    ) -> Result<T, StatsError> {
        match self {
            CorrelationMethod::Pearson => pearson_distances(d1, d2),
            CorrelationMethod::Spearman => spearman_distances(d1, d2),
            CorrelationMethod::Kendall => kendall_distances(d1, d2),
        }
    }
}

// ── Vector forms ────────────────────────────────────────────────────

/// Pearson product-moment correlation with Fisher-z significance.
///
/// ```
/// use commstat::stats::pearson;
///
/// let c = pearson(&[1.0_f64, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
/// assert!((c.coefficient - 1.0).abs() < 1e-12);
/// assert!(c.significance < 1e-12);
///
/// // Zero variance: 0, not NaN
/// let c = pearson(&[1.0_f64, 1.0, 1.0], &[5.0, 5.0, 5.0]).unwrap();
/// assert_eq!(c.coefficient, 0.0);
/// assert!(c.degenerate);
/// ```
pub fn pearson<T: FloatScalar>(x: &[T], y: &[T]) -> Result<Correlation<T>, StatsError> {
    check_paired(x, y)?;
    let (r, r_bad) = finite_or_zero(pearson_coefficient(x, y), "Pearson coefficient");
    // Rounding can push a perfect correlation just past ±1.
    let r = r.max(-T::one()).min(T::one());
    let (sig, sig_bad) = probability_or_zero(fisher_significance(x.len(), r), "Pearson significance");
    Ok(Correlation {
        coefficient: r,
        significance: sig,
        degenerate: r_bad || sig_bad,
    })
}

/// Spearman rank correlation with tie correction.
///
/// Significance is the smaller of a Student-t and a normal approximation,
/// see [`spearman_significance`].
///
/// ```
/// use commstat::stats::spearman;
///
/// // Monotone but non-linear: rank correlation is exactly 1
/// let c = spearman(&[1.0_f64, 2.0, 3.0, 4.0, 5.0], &[1.0, 4.0, 9.0, 16.0, 100.0]).unwrap();
/// assert!((c.coefficient - 1.0).abs() < 1e-12);
/// ```
pub fn spearman<T: FloatScalar>(x: &[T], y: &[T]) -> Result<Correlation<T>, StatsError> {
    check_paired(x, y)?;
    let (rs, sf, sg, d) = spearman_parts(x, y);
    let (rs, rs_bad) = finite_or_zero(rs, "Spearman coefficient");
    let rs = rs.max(-T::one()).min(T::one());
    let (sig, sig_bad) = probability_or_zero(spearman_significance(x.len(), sf, sg, d), "Spearman significance");
    Ok(Correlation {
        coefficient: rs,
        significance: sig,
        degenerate: rs_bad || sig_bad,
    })
}

/// Kendall's tau: concordant minus discordant pairs over `n(n−1)/2`.
///
/// A pair tied in either sample is neither concordant nor discordant.
/// Significance comes from the normal approximation to the null
/// distribution of tau.
///
/// ```
/// use commstat::stats::kendall;
///
/// let c = kendall(&[1.0_f64, 2.0, 3.0, 4.0], &[4.0, 3.0, 2.0, 1.0]).unwrap();
/// assert_eq!(c.coefficient, -1.0);
/// ```
pub fn kendall<T: FloatScalar>(x: &[T], y: &[T]) -> Result<Correlation<T>, StatsError> {
    check_paired(x, y)?;
    let (tau, tau_bad) = finite_or_zero(kendall_tau(x, y), "Kendall tau");
    let (sig, sig_bad) = probability_or_zero(kendall_significance(x.len(), tau), "Kendall significance");
    Ok(Correlation {
        coefficient: tau,
        significance: sig,
        degenerate: tau_bad || sig_bad,
    })
}

// ── Distance-matrix forms ───────────────────────────────────────────

/// Pearson correlation between the strictly-lower triangles of two
/// equally-sized square matrices.
///
/// ```
/// use commstat::DynMatrix;
/// use commstat::stats::pearson_distances;
///
/// let d1 = DynMatrix::from_rows(3, 3, &[0.0_f64, 1.0, 2.0, 1.0, 0.0, 3.0, 2.0, 3.0, 0.0]);
/// let d2 = &d1 * 2.0;
/// assert!((pearson_distances(&d1, &d2).unwrap() - 1.0).abs() < 1e-12);
/// ```
pub fn pearson_distances<T: FloatScalar>(d1: &DynMatrix<T>, d2: &DynMatrix<T>) -> Result<T, StatsError> {
    let (x, y) = lower_triangles(d1, d2)?;
    let r = finite_or_zero(pearson_coefficient(&x, &y), "Pearson coefficient").0;
    Ok(r.max(-T::one()).min(T::one()))
}

/// Spearman correlation between the strictly-lower triangles of two
/// equally-sized square matrices.
pub fn spearman_distances<T: FloatScalar>(d1: &DynMatrix<T>, d2: &DynMatrix<T>) -> Result<T, StatsError> {
    let (x, y) = lower_triangles(d1, d2)?;
    let (rs, _, _, _) = spearman_parts(&x, &y);
    let rs = finite_or_zero(rs, "Spearman coefficient").0;
    Ok(rs.max(-T::one()).min(T::one()))
}

/// Kendall correlation between the strictly-lower triangles of two
/// equally-sized square matrices.
pub fn kendall_distances<T: FloatScalar>(d1: &DynMatrix<T>, d2: &DynMatrix<T>) -> Result<T, StatsError> {
    let (x, y) = lower_triangles(d1, d2)?;
    Ok(finite_or_zero(kendall_tau(&x, &y), "Kendall tau").0)
}

// ── Significance ────────────────────────────────────────────────────

/// Two-sided significance of a Pearson `r` from `n` pairs.
///
/// Fisher's z = ½·ln((1+r)/(1−r)) is approximately normal with variance
/// 1/(n−1); the tail probability is `erfc(|z|·√(n−1) / √2)`, capped at 1.
/// A non-finite result is returned as `0.0`.
///
/// ```
/// use commstat::stats::pearson_significance;
///
/// assert!((pearson_significance(10, 0.0_f64) - 1.0).abs() < 1e-6);
/// assert!(pearson_significance(10, 0.95_f64) < 1e-4);
/// ```
pub fn pearson_significance<T: FloatScalar>(n: usize, r: T) -> T {
    probability_or_zero(fisher_significance(n, r), "Pearson significance").0
}

/// Two-sided significance of Spearman's statistic.
///
/// - `n`: number of pairs
/// - `sf`, `sg`: tie corrections `Σ (t³ − t)` of the two samples
/// - `d`: sum of squared rank differences
///
/// Takes the smaller of the normal approximation on `d` and the Student-t
/// approximation on the tie-corrected `rs` with `n − 2` degrees of freedom.
/// The result is capped at 1; a non-finite result is returned as `0.0`.
pub fn spearman_significance<T: FloatScalar>(n: usize, sf: T, sg: T, d: T) -> T {
    let one = T::one();
    let two = T::lit(2.0);
    let six = T::lit(6.0);
    let twelve = T::lit(12.0);

    let en = T::from_count(n);
    let en3n = en * en * en - en;
    let aved = en3n / six - (sf + sg) / twelve;
    let fac = (one - sf / en3n) * (one - sg / en3n);
    let vard = (en - one) * en * en * (en + one) * (en + one) / T::lit(36.0) * fac;
    let zd = (d - aved) / vard.sqrt();
    let probd = erfc(zd.abs() / T::lit(core::f64::consts::SQRT_2));

    let rs = (one - (six / en3n) * (d + (sf + sg) / twelve)) / fac.sqrt();
    let fac = (rs + one) * (one - rs);
    let probrs = if fac > T::zero() {
        let df = en - two;
        let t = rs * (df / fac).sqrt();
        betainc(T::lit(0.5) * df, T::lit(0.5), df / (df + t * t)).unwrap_or_else(|_| T::nan())
    } else {
        T::zero()
    };

    let sig = if probd < probrs { probd } else { probrs };
    probability_or_zero(sig, "Spearman significance").0
}

/// Two-sided significance of Kendall's tau from `n` pairs.
///
/// Under independence tau is approximately normal with variance
/// `(4n + 10) / (9n(n − 1))`. The result is capped at 1; a non-finite
/// result is returned as `0.0`.
///
/// ```
/// use commstat::stats::kendall_significance;
///
/// assert!((kendall_significance(20, 0.0_f64) - 1.0).abs() < 1e-6);
/// assert!(kendall_significance(20, 0.8_f64) < 1e-5);
/// ```
pub fn kendall_significance<T: FloatScalar>(n: usize, tau: T) -> T {
    let en = T::from_count(n);
    let svar = (T::lit(4.0) * en + T::lit(10.0)) / (T::lit(9.0) * en * (en - T::one()));
    let z = tau / svar.sqrt();
    let sig = erfc(z.abs() / T::lit(core::f64::consts::SQRT_2));
    probability_or_zero(sig, "Kendall significance").0
}

// ── Internals ───────────────────────────────────────────────────────

fn check_paired<T>(x: &[T], y: &[T]) -> Result<(), StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(StatsError::TooFewObservations {
            needed: 2,
            got: x.len(),
        });
    }
    Ok(())
}

/// Collect `(D1[i][j], D2[i][j])` for `j < i`.
fn lower_triangles<T: FloatScalar>(
    d1: &DynMatrix<T>,
    d2: &DynMatrix<T>,
) -> Result<(Vec<T>, Vec<T>), StatsError> {
    if !d1.is_square() {
        return Err(StatsError::DimensionMismatch {
            expected: (d1.nrows(), d1.nrows()),
            got: d1.shape(),
        });
    }
    if d2.shape() != d1.shape() {
        return Err(StatsError::DimensionMismatch {
            expected: d1.shape(),
            got: d2.shape(),
        });
    }
    let n = d1.nrows();
    let pairs = n * n.saturating_sub(1) / 2;
    let mut x = Vec::with_capacity(pairs);
    let mut y = Vec::with_capacity(pairs);
    for i in 0..n {
        for j in 0..i {
            x.push(d1[(i, j)]);
            y.push(d2[(i, j)]);
        }
    }
    Ok((x, y))
}

/// Largest magnitude in `v`, or 1 if every entry is zero.
fn max_abs<T: FloatScalar>(v: &[T]) -> T {
    let m = v.iter().fold(T::zero(), |m, &x| m.max(x.abs()));
    if m > T::zero() {
        m
    } else {
        T::one()
    }
}

/// Raw Pearson r; NaN for zero variance or empty input.
///
/// Each sample is divided by its largest magnitude first, so the sums of
/// squares neither overflow nor underflow. r is scale-invariant.
fn pearson_coefficient<T: FloatScalar>(x: &[T], y: &[T]) -> T {
    let (sx, sy) = (max_abs(x), max_abs(y));
    let count = T::from_count(x.len());
    let mx = x.iter().fold(T::zero(), |s, &v| s + v / sx) / count;
    let my = y.iter().fold(T::zero(), |s, &v| s + v / sy) / count;
    let (mut sxy, mut sxx, mut syy) = (T::zero(), T::zero(), T::zero());
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi / sx - mx;
        let dy = yi / sy - my;
        sxy = sxy + dx * dy;
        sxx = sxx + dx * dx;
        syy = syy + dy * dy;
    }
    sxy / (sxx.sqrt() * syy.sqrt())
}

fn fisher_significance<T: FloatScalar>(n: usize, r: T) -> T {
    let one = T::one();
    let tiny = T::lit(FISHER_TINY);
    let z = T::lit(0.5) * ((one + r + tiny) / (one - r + tiny)).ln();
    let scaled = (z * (T::from_count(n) - one).sqrt()).abs();
    erfc(scaled / T::lit(core::f64::consts::SQRT_2))
}

/// Tie-corrected Spearman `rs` and its ingredients `(rs, sf, sg, d)`.
fn spearman_parts<T: FloatScalar>(x: &[T], y: &[T]) -> (T, T, T, T) {
    let rx = average_ranks(x);
    let ry = average_ranks(y);
    let d = rx
        .ranks
        .iter()
        .zip(&ry.ranks)
        .fold(T::zero(), |s, (&a, &b)| s + (a - b) * (a - b));

    let twelve = T::lit(12.0);
    let en = T::from_count(x.len());
    let base = (en * en * en - en) / twelve;
    let sx2 = base - rx.tie_correction / twelve;
    let sy2 = base - ry.tie_correction / twelve;
    let rs = (sx2 + sy2 - d) / (T::lit(2.0) * (sx2 * sy2).sqrt());
    (rs, rx.tie_correction, ry.tie_correction, d)
}

/// Raw Kendall tau over all `n(n−1)/2` pairs; NaN for fewer than two.
fn kendall_tau<T: FloatScalar>(x: &[T], y: &[T]) -> T {
    let n = x.len();
    let mut concordant = 0usize;
    let mut discordant = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[i] - x[j];
            let dy = y[i] - y[j];
            if dx == T::zero() || dy == T::zero() {
                continue;
            }
            if (dx > T::zero()) == (dy > T::zero()) {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }
    let pairs = T::from_count(n * n.saturating_sub(1) / 2);
    (T::from_count(concordant) - T::from_count(discordant)) / pairs
}

/// [`finite_or_zero`] for a probability. The `erfc` fit overshoots 1 by
/// about 3e-8 near zero, so the result is capped at 1.
fn probability_or_zero<T: FloatScalar>(value: T, what: &str) -> (T, bool) {
    let (p, bad) = finite_or_zero(value, what);
    (p.min(T::one()), bad)
}

/// Replace a non-finite value with zero, reporting whether it did.
fn finite_or_zero<T: FloatScalar>(value: T, what: &str) -> (T, bool) {
    if value.is_finite() {
        (value, false)
    } else {
        log::debug!("{} is {:?}; using 0", what, value);
        (T::zero(), true)
    }
}
