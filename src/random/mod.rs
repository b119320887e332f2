//! Seeded uniform pseudo-random generators.
//!
//! Each generator owns its state, so independent streams can coexist and a
//! given seed always replays the same sequence. All of them produce `f64`
//! values in `[0, 1)` through the [`UniformGenerator`] trait.
//!
//! | Generator | Method | State |
//! |---|---|---|
//! | [`MinimalStandard`] | Park–Miller LCG, XOR-masked state | 1 word |
//! | [`ShuffledMinimalStandard`] | Park–Miller with Bays–Durham shuffle | 34 words |
//! | [`CombinedLcg`] | L'Ecuyer two-modulus LCG with shuffle | 35 words |
//! | [`Subtractive`] | Knuth lagged subtractive | 58 words |
//! | [`PsdesHash`] | pseudo-DES hash of a counter | 2 words |
//!
//! Every draw takes `&mut self`. Give each thread its own generator, or
//! guard a shared one behind a lock.
//!
//! With the `rand` feature, every generator also implements
//! `rand_core::RngCore`.
//!
//! # Example
//!
//! ```
//! use commstat::random::{ShuffledMinimalStandard, UniformGenerator};
//!
//! let mut a = ShuffledMinimalStandard::new(42);
//! let mut b = ShuffledMinimalStandard::new(42);
//! for _ in 0..100 {
//!     let x = a.next_f64();
//!     assert!((0.0..1.0).contains(&x));
//!     assert_eq!(x, b.next_f64());
//! }
//! ```

mod lcg;
mod psdes;
mod subtractive;

#[cfg(test)]
mod tests;

pub use lcg::{CombinedLcg, MinimalStandard, ShuffledMinimalStandard};
pub use psdes::{psdes, PsdesHash};
pub use subtractive::Subtractive;

/// A seeded source of uniform deviates in `[0, 1)`.
pub trait UniformGenerator {
    /// Next deviate in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Reinitialise the stream from `seed`. Reseeding with the same value
    /// replays the same sequence.
    fn reseed(&mut self, seed: i32);

    /// Fill `out` with consecutive deviates.
    fn fill(&mut self, out: &mut [f64]) {
        for x in out.iter_mut() {
            *x = self.next_f64();
        }
    }
}

/// Map a deviate in `[0, 1)` onto the full `u32` range.
#[cfg(feature = "rand")]
#[inline]
fn deviate_to_u32(x: f64) -> u32 {
    (x * 4_294_967_296.0) as u32
}

#[cfg(feature = "rand")]
macro_rules! impl_rng_core {
    ($($gen:ty),*) => {
        $(
            impl rand_core::RngCore for $gen {
                fn next_u32(&mut self) -> u32 {
                    deviate_to_u32(UniformGenerator::next_f64(self))
                }

                fn next_u64(&mut self) -> u64 {
                    rand_core::impls::next_u64_via_u32(self)
                }

                fn fill_bytes(&mut self, dst: &mut [u8]) {
                    rand_core::impls::fill_bytes_via_next(self, dst)
                }
            }
        )*
    };
}

#[cfg(feature = "rand")]
impl_rng_core!(MinimalStandard, ShuffledMinimalStandard, CombinedLcg, Subtractive);
