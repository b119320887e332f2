#[cfg(test)]
mod tests {
    use super::super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() < tol,
            "approx_eq failed: {a} vs {b}, diff = {}, tol = {tol}",
            (a - b).abs()
        );
    }

    fn generators(seed: i32) -> [Box<dyn UniformGenerator>; 5] {
        [
            Box::new(MinimalStandard::new(seed)),
            Box::new(ShuffledMinimalStandard::new(seed)),
            Box::new(CombinedLcg::new(seed)),
            Box::new(Subtractive::new(seed)),
            Box::new(PsdesHash::new(seed)),
        ]
    }

    // =====================================================================
    // Shared behaviour
    // =====================================================================

    #[test]
    fn deviates_in_unit_interval() {
        for mut rng in generators(-17) {
            for _ in 0..20_000 {
                let x = rng.next_f64();
                assert!((0.0..1.0).contains(&x), "deviate {x} out of range");
            }
        }
    }

    #[test]
    fn mean_and_variance_are_uniform() {
        let n = 50_000;
        for mut rng in generators(31337) {
            let draws: Vec<f64> = (0..n).map(|_| rng.next_f64()).collect();
            let mean = draws.iter().sum::<f64>() / n as f64;
            let var = draws.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;
            approx_eq(mean, 0.5, 0.01);
            approx_eq(var, 1.0 / 12.0, 0.005);
        }
    }

    #[test]
    fn reseed_replays_stream() {
        for mut rng in generators(99) {
            let mut first = [0.0; 64];
            rng.fill(&mut first);
            rng.reseed(99);
            let mut second = [0.0; 64];
            rng.fill(&mut second);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn new_matches_reseed_of_used_generator() {
        let mut fresh = generators(4242);
        let mut used = generators(1);
        for (a, b) in fresh.iter_mut().zip(used.iter_mut()) {
            for _ in 0..10 {
                b.next_f64();
            }
            b.reseed(4242);
            for _ in 0..50 {
                assert_eq!(a.next_f64(), b.next_f64());
            }
        }
    }

    #[test]
    fn different_seeds_differ() {
        for (mut a, mut b) in generators(10).into_iter().zip(generators(11)) {
            let same = (0..32).filter(|_| a.next_f64() == b.next_f64()).count();
            assert!(same < 4);
        }
    }

    #[test]
    fn extreme_seeds() {
        for seed in [0, 1, -1, i32::MAX, i32::MIN] {
            for mut rng in generators(seed) {
                let x = rng.next_f64();
                assert!((0.0..1.0).contains(&x), "seed {seed} gave {x}");
            }
        }
    }

    #[test]
    fn clone_continues_independently() {
        let mut a = CombinedLcg::new(5);
        a.next_f64();
        let mut b = a.clone();
        for _ in 0..20 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    // =====================================================================
    // Reference values
    // =====================================================================

    #[test]
    fn minimal_standard_park_miller_check() {
        // Unmasked state 1 is the classic Park–Miller check: x₁ = 16807 and
        // x₁₀₀₀₀ = 1043618065.
        let mut rng = MinimalStandard::new(1 ^ 123_459_876);
        let first = rng.next_f64() * 2_147_483_647.0;
        assert_eq!(first.round(), 16807.0);
        let mut last = 0.0;
        for _ in 1..10_000 {
            last = rng.next_f64();
        }
        assert_eq!((last * 2_147_483_647.0).round(), 1_043_618_065.0);
    }

    #[test]
    fn shuffled_reference_sequence() {
        let mut rng = ShuffledMinimalStandard::new(1);
        approx_eq(rng.next_f64(), 0.41599935685098144, 1e-12);
        approx_eq(rng.next_f64(), 0.09196489075755929, 1e-12);
        approx_eq(rng.next_f64(), 0.7564104859514211, 1e-12);
    }

    #[test]
    fn shuffled_seed_magnitude() {
        let mut pos = ShuffledMinimalStandard::new(1);
        let mut neg = ShuffledMinimalStandard::new(-1);
        let mut zero = ShuffledMinimalStandard::new(0);
        for _ in 0..10 {
            let x = pos.next_f64();
            assert_eq!(x, neg.next_f64());
            assert_eq!(x, zero.next_f64());
        }
    }

    #[test]
    fn subtractive_reference_sequence() {
        let mut rng = Subtractive::new(1);
        approx_eq(rng.next_f64(), 0.298227348, 1e-12);
        approx_eq(rng.next_f64(), 0.715119168, 1e-12);
        approx_eq(rng.next_f64(), 0.033021107, 1e-12);
    }

    #[test]
    fn subtractive_wraps_table_index() {
        // More draws than table slots exercises both index wrap-arounds.
        let mut a = Subtractive::new(8);
        let mut b = Subtractive::new(8);
        for _ in 0..200 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn psdes_reference_pairs() {
        assert_eq!(psdes(1, 1), (0x604d_1dce, 0x509c_0c23));
        assert_eq!(psdes(1, 99), (0xd97f_8571, 0xa66c_b41a));
        assert_eq!(psdes(99, 1), (0x7822_309d, 0x6430_0984));
        assert_eq!(psdes(99, 99), (0xd7f3_76f0, 0x59ba_89eb));
    }

    #[test]
    fn psdes_hash_reference_deviates() {
        approx_eq(PsdesHash::new(-1).next_f64(), 0.219120, 1e-6);
        approx_eq(PsdesHash::new(1).at(99), 0.849246, 1e-6);
        approx_eq(PsdesHash::new(-99).at(1), 0.375290, 1e-6);
        approx_eq(PsdesHash::new(99).at(99), 0.457334, 1e-6);
    }

    #[test]
    fn psdes_hash_random_access() {
        let mut rng = PsdesHash::new(77);
        let peek = rng.at(5);
        for _ in 0..4 {
            rng.next_f64();
        }
        assert_eq!(rng.next_f64(), peek);
    }

    #[cfg(feature = "rand")]
    #[test]
    fn rng_core_adapters() {
        use rand_core::RngCore;

        let mut a = ShuffledMinimalStandard::new(3);
        let mut b = ShuffledMinimalStandard::new(3);
        let expected = (b.next_f64() * 4_294_967_296.0) as u32;
        assert_eq!(a.next_u32(), expected);

        let mut bytes = [0u8; 13];
        a.fill_bytes(&mut bytes);
        assert!(bytes.iter().any(|&x| x != 0));

        let mut h = PsdesHash::new(1);
        assert_eq!(h.next_u32(), 0x509c_0c23);
    }
}
