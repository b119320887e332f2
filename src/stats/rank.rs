use alloc::vec;
use alloc::vec::Vec;

use crate::traits::FloatScalar;

/// Mid-ranks of a sample together with its tie statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<T> {
    /// 1-based rank of each value, in input order. Tied values share the
    /// mean of the ranks they span.
    pub ranks: Vec<T>,
    /// `Σ (t³ − t)` over every group of `t` tied values.
    pub tie_correction: T,
}

/// Rank a sample, averaging the ranks of ties.
///
/// Values are ordered with `total_cmp`, so NaN sorts after every number and
/// never panics the sort.
///
/// ```
/// use commstat::stats::average_ranks;
///
/// let r = average_ranks(&[10.0_f64, 20.0, 10.0, 30.0]);
/// assert_eq!(r.ranks, vec![1.5, 3.0, 1.5, 4.0]);
/// // one tie group of size 2: 2³ − 2
/// assert_eq!(r.tie_correction, 6.0);
/// ```
pub fn average_ranks<T: FloatScalar>(values: &[T]) -> Ranking<T> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| total_cmp(values[a], values[b]));

    let mut ranks = vec![T::zero(); n];
    let mut tie_correction = T::zero();

    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end hold ranks start+1 ..= end
        let t = end - start;
        let mid = T::from_count(start + end + 1) / T::lit(2.0);
        for &idx in &order[start..end] {
            ranks[idx] = mid;
        }
        if t > 1 {
            let tf = T::from_count(t);
            tie_correction = tie_correction + tf * tf * tf - tf;
        }
        start = end;
    }

    Ranking {
        ranks,
        tie_correction,
    }
}

/// Total order on floats: NaN after everything else.
fn total_cmp<T: FloatScalar>(a: T, b: T) -> core::cmp::Ordering {
    match a.partial_cmp(&b) {
        Some(ord) => ord,
        None => a.is_nan().cmp(&b.is_nan()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_values() {
        let r = average_ranks(&[3.0_f64, 1.0, 2.0]);
        assert_eq!(r.ranks, vec![3.0, 1.0, 2.0]);
        assert_eq!(r.tie_correction, 0.0);
    }

    #[test]
    fn trailing_tie_group_is_counted() {
        let r = average_ranks(&[1.0_f64, 5.0, 5.0, 5.0]);
        assert_eq!(r.ranks, vec![1.0, 3.0, 3.0, 3.0]);
        assert_eq!(r.tie_correction, 24.0);
    }

    #[test]
    fn several_tie_groups() {
        let r = average_ranks(&[2.0_f64, 1.0, 2.0, 1.0, 3.0]);
        assert_eq!(r.ranks, vec![3.5, 1.5, 3.5, 1.5, 5.0]);
        assert_eq!(r.tie_correction, 12.0);
    }

    #[test]
    fn all_tied() {
        let r = average_ranks(&[4.0_f64; 5]);
        assert!(r.ranks.iter().all(|&x| x == 3.0));
        assert_eq!(r.tie_correction, 120.0);
    }

    #[test]
    fn rank_sum_is_triangular() {
        let values = [0.3_f64, -1.0, 0.3, 7.5, 2.0, 2.0, 2.0, -4.0];
        let r = average_ranks(&values);
        let sum: f64 = r.ranks.iter().sum();
        assert_eq!(sum, 36.0);
    }

    #[test]
    fn nan_sorts_last() {
        let r = average_ranks(&[f64::NAN, 1.0, 2.0]);
        assert_eq!(r.ranks, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn empty() {
        let r = average_ranks::<f64>(&[]);
        assert!(r.ranks.is_empty());
        assert_eq!(r.tie_correction, 0.0);
    }
}
