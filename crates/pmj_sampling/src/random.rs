//! Uniform random source consumed by every generator.
//!
//! The generators only ever ask for two things: a uniform real in a half-open range
//! and a uniform integer below a bound. [`RandomSource`] captures exactly that, and a
//! blanket implementation lets any [`rand::RngCore`] (including `dyn RngCore`) be
//! passed directly. Each call consumes a fixed number of 32-bit draws from the
//! underlying generator, so a seeded generator reproduces identical sequences.
use rand::RngCore;

/// Source of uniform reals and integers.
pub trait RandomSource {
    /// Uniform real in `[lo, hi)`.
    fn uniform_real(&mut self, lo: f64, hi: f64) -> f64;

    /// Uniform integer in `[0, n)`. `n` must be non-zero.
    fn uniform_int(&mut self, n: u32) -> u32;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    #[inline]
    fn uniform_real(&mut self, lo: f64, hi: f64) -> f64 {
        let u = unit_from_bits(self.next_u32());
        let value = lo + u * (hi - lo);
        // Rounding may land exactly on `hi` for very fine strata.
        value.min(hi.next_down()).max(lo)
    }

    #[inline]
    fn uniform_int(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0, "uniform_int bound must be non-zero");
        let threshold = n.wrapping_neg() % n;
        loop {
            let r = self.next_u32();
            if r >= threshold {
                return r % n;
            }
        }
    }
}

/// Map 32 random bits to `[0, 1)`.
#[inline]
pub(crate) fn unit_from_bits(bits: u32) -> f64 {
    f64::from(bits) * (1.0 / 4_294_967_296.0)
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    pub(crate) struct FixedRng {
        pub(crate) value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    /// Wraps a seeded generator and counts every [`RandomSource`] call.
    pub(crate) struct CountingSource {
        inner: StdRng,
        pub(crate) reals: usize,
        pub(crate) ints: usize,
    }

    impl CountingSource {
        pub(crate) fn new(seed: u64) -> Self {
            Self {
                inner: StdRng::seed_from_u64(seed),
                reals: 0,
                ints: 0,
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.reals + self.ints
        }
    }

    impl RandomSource for CountingSource {
        fn uniform_real(&mut self, lo: f64, hi: f64) -> f64 {
            self.reals += 1;
            self.inner.uniform_real(lo, hi)
        }

        fn uniform_int(&mut self, n: u32) -> u32 {
            self.ints += 1;
            self.inner.uniform_int(n)
        }
    }

    /// One [`RandomSource`] call as seen by [`RecordingSource`].
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub(crate) enum Draw {
        Real(f64, f64),
        Int(u32),
    }

    /// Wraps a seeded generator and logs every call, in order.
    pub(crate) struct RecordingSource {
        inner: StdRng,
        pub(crate) log: Vec<Draw>,
    }

    impl RecordingSource {
        pub(crate) fn new(seed: u64) -> Self {
            Self {
                inner: StdRng::seed_from_u64(seed),
                log: Vec::new(),
            }
        }
    }

    impl RandomSource for RecordingSource {
        fn uniform_real(&mut self, lo: f64, hi: f64) -> f64 {
            self.log.push(Draw::Real(lo, hi));
            self.inner.uniform_real(lo, hi)
        }

        fn uniform_int(&mut self, n: u32) -> u32 {
            self.log.push(Draw::Int(n));
            self.inner.uniform_int(n)
        }
    }

    /// Replays a fixed list of unit reals. Integer draws are not expected.
    pub(crate) struct ScriptedSource {
        reals: std::vec::IntoIter<f64>,
    }

    impl ScriptedSource {
        pub(crate) fn new(reals: &[f64]) -> Self {
            Self {
                reals: reals.to_vec().into_iter(),
            }
        }

        pub(crate) fn remaining(&self) -> usize {
            self.reals.len()
        }
    }

    impl RandomSource for ScriptedSource {
        fn uniform_real(&mut self, lo: f64, hi: f64) -> f64 {
            let u = self.reals.next().expect("scripted reals exhausted");
            lo + u * (hi - lo)
        }

        fn uniform_int(&mut self, _n: u32) -> u32 {
            panic!("unexpected integer draw from a scripted source");
        }
    }

    /// Marsaglia's xorshift32, for reference values that do not depend on `rand`'s
    /// generators.
    pub(crate) struct XorShift32 {
        state: u32,
    }

    impl XorShift32 {
        pub(crate) fn new(seed: u32) -> Self {
            assert_ne!(seed, 0, "xorshift state must be non-zero");
            Self { state: seed }
        }
    }

    impl RngCore for XorShift32 {
        fn next_u32(&mut self) -> u32 {
            let mut x = self.state;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.state = x;
            x
        }

        fn next_u64(&mut self) -> u64 {
            let lo = u64::from(self.next_u32());
            let hi = u64::from(self.next_u32());
            (hi << 32) | lo
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    #[test]
    fn xorshift_matches_reference_stream() {
        // Marsaglia (2003), seed 1.
        let mut rng = XorShift32::new(1);
        assert_eq!(rng.next_u32(), 270_369);
        assert_eq!(rng.next_u32(), 67_634_689);
    }

    #[test]
    fn recording_source_logs_calls_in_order() {
        let mut src = RecordingSource::new(5);
        src.uniform_int(3);
        src.uniform_real(0.25, 0.5);
        assert_eq!(src.log, vec![Draw::Int(3), Draw::Real(0.25, 0.5)]);
    }

    #[test]
    fn uniform_real_maps_zero_to_lower_bound() {
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rng.uniform_real(0.25, 0.5), 0.25);
    }

    #[test]
    fn uniform_real_stays_below_upper_bound() {
        let mut rng = FixedRng { value: u32::MAX };
        let v = rng.uniform_real(0.0, 1.0);
        assert!(v < 1.0);
        assert!(v > 0.999_999);

        // A range one ulp wide can only yield its lower bound.
        let lo = 0.5;
        let hi = 0.5 + f64::EPSILON / 2.0;
        assert_eq!(rng.uniform_real(lo, hi), lo);
    }

    #[test]
    fn uniform_int_respects_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in [1_u32, 2, 3, 7, 1000] {
            for _ in 0..200 {
                assert!(rng.uniform_int(n) < n);
            }
        }
    }

    #[test]
    fn uniform_int_rejects_biased_low_draws() {
        // For n = 3 the threshold is 2^32 mod 3 = 1, so a draw of 0 is rejected forever;
        // any non-zero value is accepted on the first try.
        let mut rng = FixedRng { value: 5 };
        assert_eq!(rng.uniform_int(3), 2);
    }

    #[test]
    fn works_through_dyn_rng_core() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let dyn_rng: &mut dyn RngCore = &mut b;
        assert_eq!(a.uniform_real(0.0, 1.0), dyn_rng.uniform_real(0.0, 1.0));
        assert_eq!(a.uniform_int(17), dyn_rng.uniform_int(17));
    }

    #[test]
    fn counting_source_tracks_calls() {
        let mut src = CountingSource::new(1);
        src.uniform_real(0.0, 1.0);
        src.uniform_int(4);
        assert_eq!((src.reals, src.ints, src.calls()), (1, 1, 2));
    }
}
