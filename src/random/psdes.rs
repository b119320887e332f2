use super::UniformGenerator;

const ROUNDS: usize = 4;
const C1: [u32; ROUNDS] = [0xbaa9_6887, 0x1e17_d32c, 0x03bc_dc3c, 0x0f33_d1b2];
const C2: [u32; ROUNDS] = [0x4b0f_3b58, 0xe874_f0c3, 0x6955_c5a6, 0x55a7_ca46];

/// Exponent bits of 1.0f32; OR-ed with 23 random mantissa bits gives a
/// float in `[1, 2)`.
const ONE_BITS: u32 = 0x3f80_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Pseudo-DES hash of a 64-bit word held as two halves.
///
/// Four Feistel rounds with a non-linear mixing function. Returns the
/// hashed `(lword, irword)`.
///
/// ```
/// use commstat::random::psdes;
///
/// assert_eq!(psdes(1, 1), (0x604d_1dce, 0x509c_0c23));
/// assert_eq!(psdes(99, 99), (0xd7f3_76f0, 0x59ba_89eb));
/// ```
pub fn psdes(mut lword: u32, mut irword: u32) -> (u32, u32) {
    for (&c1, &c2) in C1.iter().zip(C2.iter()) {
        let iswap = irword;
        let ia = irword ^ c1;
        let lo = ia & 0xffff;
        let hi = ia >> 16;
        let ib = lo.wrapping_mul(lo).wrapping_add(!hi.wrapping_mul(hi));
        let ia = ib.rotate_left(16);
        irword = lword ^ (ia ^ c2).wrapping_add(lo.wrapping_mul(hi));
        lword = iswap;
    }
    (lword, irword)
}

/// Counter-mode generator: deviate `i` is the hash of `(seed, i)`.
///
/// Any deviate can be computed without generating the ones before it, see
/// [`PsdesHash::at`]. Deviates carry 23 random bits. Seeds are taken by
/// magnitude.
///
/// ```
/// use commstat::random::{PsdesHash, UniformGenerator};
///
/// let mut rng = PsdesHash::new(-1);
/// assert!((rng.next_f64() - 0.219120).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsdesHash {
    seed: u32,
    counter: u32,
}

impl PsdesHash {
    pub fn new(seed: i32) -> Self {
        Self {
            seed: seed.unsigned_abs(),
            counter: 1,
        }
    }

    /// The deviate at position `counter` of this stream, without advancing.
    /// The first deviate after seeding is at position 1.
    pub fn at(&self, counter: u32) -> f64 {
        let (_, irword) = psdes(self.seed, counter);
        let x = f32::from_bits(ONE_BITS | (irword & MANTISSA_MASK)) - 1.0;
        f64::from(x)
    }

    /// Hash the next counter value, advancing the stream.
    #[cfg(feature = "rand")]
    fn next_word(&mut self) -> u32 {
        let (_, irword) = psdes(self.seed, self.counter);
        self.counter = self.counter.wrapping_add(1);
        irword
    }
}

impl UniformGenerator for PsdesHash {
    fn next_f64(&mut self) -> f64 {
        let x = self.at(self.counter);
        self.counter = self.counter.wrapping_add(1);
        x
    }

    fn reseed(&mut self, seed: i32) {
        self.seed = seed.unsigned_abs();
        self.counter = 1;
    }
}

#[cfg(feature = "rand")]
impl rand_core::RngCore for PsdesHash {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dst)
    }
}
