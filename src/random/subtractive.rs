use super::UniformGenerator;

const MBIG: i64 = 1_000_000_000;
const MSEED: i64 = 161_803_398;
const FAC: f64 = 1.0 / MBIG as f64;
// Slot 0 of the lag table is never used.
const TABLE_LEN: usize = 56;
const LAG: usize = 31;

/// Knuth's subtractive generator: `x[n] = x[n−55] − x[n−24] mod 10⁹`.
///
/// Uses integer arithmetic only, so a stream is bit-identical across
/// platforms. Seeds are taken by magnitude.
///
/// ```
/// use commstat::random::{Subtractive, UniformGenerator};
///
/// let mut rng = Subtractive::new(1);
/// let mut buf = [0.0; 8];
/// rng.fill(&mut buf);
/// assert!(buf.iter().all(|x| (0.0..1.0).contains(x)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtractive {
    table: [i64; TABLE_LEN],
    inext: usize,
    inextp: usize,
}

impl Subtractive {
    pub fn new(seed: i32) -> Self {
        let mut rng = Self {
            table: [0; TABLE_LEN],
            inext: 0,
            inextp: LAG,
        };
        rng.reseed(seed);
        rng
    }
}

#[inline]
fn wrap(x: i64) -> i64 {
    if x < 0 {
        x + MBIG
    } else {
        x
    }
}

impl UniformGenerator for Subtractive {
    fn next_f64(&mut self) -> f64 {
        self.inext = if self.inext + 1 == TABLE_LEN { 1 } else { self.inext + 1 };
        self.inextp = if self.inextp + 1 == TABLE_LEN { 1 } else { self.inextp + 1 };
        let mj = wrap(self.table[self.inext] - self.table[self.inextp]);
        self.table[self.inext] = mj;
        mj as f64 * FAC
    }

    fn reseed(&mut self, seed: i32) {
        let ma = &mut self.table;
        let mut mj = (MSEED - i64::from(seed).abs()).abs() % MBIG;
        ma[55] = mj;
        let mut mk = 1;
        // Spread the seed through the table in a scrambled order.
        for i in 1..55 {
            let ii = (21 * i) % 55;
            ma[ii] = mk;
            mk = wrap(mj - mk);
            mj = ma[ii];
        }
        // Warm up.
        for _ in 0..4 {
            for i in 1..TABLE_LEN {
                ma[i] = wrap(ma[i] - ma[1 + (i + 30) % 55]);
            }
        }
        self.inext = 0;
        self.inextp = LAG;
    }
}
