use super::UniformGenerator;

// Park–Miller minimal standard: x ← 16807·x mod (2³¹ − 1)
const IA: i64 = 16807;
const IM: i64 = 2_147_483_647;
const IQ: i64 = 127_773;
const IR: i64 = 2836;
const AM: f64 = 1.0 / IM as f64;

const MASK: i32 = 123_459_876;

const NTAB: usize = 32;
// Largest deviate returned by the shuffled generators, strictly below 1.
const RNMX: f64 = 1.0 - 3.0e-16;

/// One step of `x ← a·x mod m` by Schrage's factorisation `m = a·q + r`,
/// which keeps every intermediate inside 32 bits.
#[inline]
fn schrage(x: i64, a: i64, m: i64, q: i64, r: i64) -> i64 {
    let k = x / q;
    let next = a * (x - k * q) - r * k;
    if next < 0 {
        next + m
    } else {
        next
    }
}

/// Reduce a caller seed to a valid LCG state in `1..m`.
#[inline]
fn lcg_seed(seed: i32, m: i64) -> i64 {
    let s = i64::from(seed).abs() % m;
    if s == 0 {
        1
    } else {
        s
    }
}

// ── Minimal standard ────────────────────────────────────────────────

/// Park–Miller minimal standard generator.
///
/// The stored state is the LCG value XORed with a fixed mask, so any
/// `i32`, including zero, is a usable seed. The one exception is a seed
/// equal to the mask itself (`123459876`), which unmasks to the fixed
/// point 0 and yields a constant stream of zeros.
///
/// Period is 2³¹ − 2. Fast, but consecutive values show serial correlation
/// at low order; prefer [`ShuffledMinimalStandard`] for simulation work.
///
/// ```
/// use commstat::random::{MinimalStandard, UniformGenerator};
///
/// let mut rng = MinimalStandard::new(7);
/// let first = rng.next_f64();
/// rng.reseed(7);
/// assert_eq!(rng.next_f64(), first);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimalStandard {
    state: i32,
}

impl MinimalStandard {
    pub fn new(seed: i32) -> Self {
        Self { state: seed }
    }
}

impl UniformGenerator for MinimalStandard {
    fn next_f64(&mut self) -> f64 {
        let x = i64::from(self.state ^ MASK);
        let x = schrage(x, IA, IM, IQ, IR);
        // x ∈ [0, IM) so it fits back into an i32.
        let x = x as i32;
        self.state = x ^ MASK;
        AM * f64::from(x)
    }

    fn reseed(&mut self, seed: i32) {
        self.state = seed;
    }
}

// ── Minimal standard with shuffle ───────────────────────────────────

const NDIV: i64 = 1 + (IM - 1) / NTAB as i64;

/// Park–Miller generator behind a 32-slot Bays–Durham shuffle table.
///
/// The shuffle breaks up the low-order serial correlation of
/// [`MinimalStandard`]. Seeds are taken by magnitude; `0` is treated as `1`.
///
/// ```
/// use commstat::random::{ShuffledMinimalStandard, UniformGenerator};
///
/// let mut rng = ShuffledMinimalStandard::new(-5);
/// let mean = (0..10_000).map(|_| rng.next_f64()).sum::<f64>() / 10_000.0;
/// assert!((mean - 0.5).abs() < 0.02);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledMinimalStandard {
    idum: i64,
    iy: i64,
    table: [i64; NTAB],
}

impl ShuffledMinimalStandard {
    pub fn new(seed: i32) -> Self {
        let mut rng = Self {
            idum: 1,
            iy: 0,
            table: [0; NTAB],
        };
        rng.reseed(seed);
        rng
    }
}

impl UniformGenerator for ShuffledMinimalStandard {
    fn next_f64(&mut self) -> f64 {
        self.idum = schrage(self.idum, IA, IM, IQ, IR);
        let j = (self.iy / NDIV) as usize;
        self.iy = self.table[j];
        self.table[j] = self.idum;
        (AM * self.iy as f64).min(RNMX)
    }

    fn reseed(&mut self, seed: i32) {
        let mut idum = lcg_seed(seed, IM);
        // Warm up eight steps, then load the table back to front.
        for j in (0..NTAB + 8).rev() {
            idum = schrage(idum, IA, IM, IQ, IR);
            if j < NTAB {
                self.table[j] = idum;
            }
        }
        self.idum = idum;
        self.iy = self.table[0];
    }
}

// ── L'Ecuyer combined ───────────────────────────────────────────────

const IM1: i64 = 2_147_483_563;
const IM2: i64 = 2_147_483_399;
const IA1: i64 = 40014;
const IA2: i64 = 40692;
const IQ1: i64 = 53668;
const IQ2: i64 = 52774;
const IR1: i64 = 12211;
const IR2: i64 = 3791;
const IMM1: i64 = IM1 - 1;
const NDIV_COMBINED: i64 = 1 + IMM1 / NTAB as i64;
const AM1: f64 = 1.0 / IM1 as f64;

/// L'Ecuyer's combination of two LCGs with different moduli, behind a
/// Bays–Durham shuffle.
///
/// Period is about 2.3·10¹⁸, long enough that it is never exhausted in
/// practice. Seeds are taken by magnitude; `0` is treated as `1`.
///
/// ```
/// use commstat::random::{CombinedLcg, UniformGenerator};
///
/// let mut a = CombinedLcg::new(2024);
/// let mut b = CombinedLcg::new(2025);
/// assert_ne!(a.next_f64(), b.next_f64());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedLcg {
    idum: i64,
    idum2: i64,
    iy: i64,
    table: [i64; NTAB],
}

impl CombinedLcg {
    pub fn new(seed: i32) -> Self {
        let mut rng = Self {
            idum: 1,
            idum2: 123_456_789,
            iy: 0,
            table: [0; NTAB],
        };
        rng.reseed(seed);
        rng
    }
}

impl UniformGenerator for CombinedLcg {
    fn next_f64(&mut self) -> f64 {
        self.idum = schrage(self.idum, IA1, IM1, IQ1, IR1);
        self.idum2 = schrage(self.idum2, IA2, IM2, IQ2, IR2);
        let j = (self.iy / NDIV_COMBINED) as usize;
        self.iy = self.table[j] - self.idum2;
        self.table[j] = self.idum;
        if self.iy < 1 {
            self.iy += IMM1;
        }
        (AM1 * self.iy as f64).min(RNMX)
    }

    fn reseed(&mut self, seed: i32) {
        let mut idum = lcg_seed(seed, IM1);
        self.idum2 = idum;
        for j in (0..NTAB + 8).rev() {
            idum = schrage(idum, IA1, IM1, IQ1, IR1);
            if j < NTAB {
                self.table[j] = idum;
            }
        }
        self.idum = idum;
        self.iy = self.table[0];
    }
}
