//! Progressive multi-jittered generation loop shared by PMJ and PMJ(0,2).
//!
//! The loop follows Christensen et al., "Progressive Multi-Jittered Sample
//! Sequences" (2018). Starting from `q` samples (a power of four), one round
//! quadruples the set:
//! 1. Subdivide, then place the diagonal opposite of every sample (`2q` samples).
//! 2. Subdivide again, ask the [`SubquadrantStrategy`] for one subquadrant per
//!    original sample and fill it (`3q` samples).
//! 3. Fill the diagonal opposite of each of those subquadrants (`4q` samples).
//!
//! Generation may stop anywhere inside a round; every sample is drawn against the
//! current strata, so each prefix keeps its stratification.
use tracing::debug;

use crate::candidate::SampleSet;
use crate::error::{Error, Result};
use crate::random::RandomSource;
use crate::strata::{AxisStrata, ElementaryStrata, StrataTracker};
use crate::subquadrant::SubquadrantStrategy;
use crate::Point;

/// Number of candidates drawn per sample by the blue-noise variants.
pub const BEST_CANDIDATE_SAMPLES: usize = 10;

/// Largest sample count accepted by the generators.
pub const MAX_SAMPLES: usize = 1 << 30;

/// Progress of a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GenerationState {
    /// No sample placed yet.
    Empty,
    /// The first, unconstrained sample is placed.
    Seeded,
    /// Inside a quadrupling round that started from `quadrants` samples.
    Refining { quadrants: usize },
    /// The requested count is reached.
    Done,
}

/// Validate a requested sample count.
pub fn check_sample_count(num_samples: usize) -> Result<usize> {
    if num_samples > MAX_SAMPLES {
        return Err(Error::SampleCountTooLarge {
            requested: num_samples,
            max: MAX_SAMPLES,
        });
    }
    Ok(num_samples)
}

/// Validate a sample count coming from a signed source.
///
/// Negative counts are rejected with [`Error::InvalidSampleCount`].
pub fn sample_count_from_signed(num_samples: i64) -> Result<usize> {
    let count = usize::try_from(num_samples)
        .map_err(|_| Error::InvalidSampleCount(format!("{num_samples} is negative")))?;
    check_sample_count(count)
}

/// Drives one [`SampleSet`] through the refinement rounds.
struct ProgressiveGenerator<'r, S, R: ?Sized> {
    set: SampleSet<S>,
    num_samples: usize,
    strategy: SubquadrantStrategy,
    rng: &'r mut R,
    state: GenerationState,
}

impl<'r, S, R> ProgressiveGenerator<'r, S, R>
where
    S: StrataTracker,
    R: RandomSource + ?Sized,
{
    fn new(
        num_samples: usize,
        num_candidates: usize,
        strategy: SubquadrantStrategy,
        rng: &'r mut R,
    ) -> Self {
        Self {
            set: SampleSet::new(num_samples, num_candidates),
            num_samples,
            strategy,
            rng,
            state: GenerationState::Empty,
        }
    }

    fn run(mut self) -> Vec<Point> {
        while self.state != GenerationState::Done {
            self.state = self.step();
        }
        self.set.into_samples()
    }

    fn step(&mut self) -> GenerationState {
        match self.state {
            GenerationState::Empty if self.num_samples == 0 => GenerationState::Done,
            GenerationState::Empty => {
                self.set.seed(self.rng);
                GenerationState::Seeded
            }
            GenerationState::Seeded => self.next_round(1),
            GenerationState::Refining { quadrants } => {
                self.refine(quadrants);
                self.next_round(quadrants * 4)
            }
            GenerationState::Done => GenerationState::Done,
        }
    }

    fn next_round(&self, quadrants: usize) -> GenerationState {
        if quadrants < self.num_samples {
            GenerationState::Refining { quadrants }
        } else {
            GenerationState::Done
        }
    }

    fn refine(&mut self, q: usize) {
        let total = self.num_samples;
        debug!(quadrants = q, total, "refinement round");

        self.set.subdivide();
        for i in 0..q.min(total - q) {
            let (x, y) = self.set.cell_of(i);
            self.set.generate_sample(q + i, x ^ 1, y ^ 1, self.rng);
        }

        if 2 * q >= total {
            return;
        }

        self.set.subdivide();
        let choices = self
            .strategy
            .select(self.set.samples(), self.set.dim(), self.rng);

        for (i, &(x, y)) in choices.iter().enumerate().take(total - 2 * q) {
            self.set.generate_sample(2 * q + i, x, y, self.rng);
        }

        if 3 * q >= total {
            return;
        }
        for (i, &(x, y)) in choices.iter().enumerate().take(total - 3 * q) {
            self.set.generate_sample(3 * q + i, x ^ 1, y ^ 1, self.rng);
        }
    }
}

fn generate<S, R>(
    num_samples: usize,
    num_candidates: usize,
    strategy: SubquadrantStrategy,
    rng: &mut R,
) -> Result<Vec<Point>>
where
    S: StrataTracker,
    R: RandomSource + ?Sized,
{
    let num_samples = check_sample_count(num_samples)?;
    Ok(ProgressiveGenerator::<S, R>::new(num_samples, num_candidates, strategy, rng).run())
}

/// Progressive multi-jittered samples.
///
/// `num_candidates > 1` enables best-candidate selection. Christensen et al. use
/// [`SubquadrantStrategy::OxPlowing`] here.
pub fn progressive_multi_jittered<R: RandomSource + ?Sized>(
    num_samples: usize,
    rng: &mut R,
    num_candidates: usize,
    strategy: SubquadrantStrategy,
) -> Result<Vec<Point>> {
    generate::<AxisStrata, R>(num_samples, num_candidates, strategy, rng)
}

/// Progressive multi-jittered samples with blue-noise (best-candidate) selection.
pub fn progressive_multi_jittered_bn<R: RandomSource + ?Sized>(
    num_samples: usize,
    rng: &mut R,
) -> Result<Vec<Point>> {
    progressive_multi_jittered(
        num_samples,
        rng,
        BEST_CANDIDATE_SAMPLES,
        SubquadrantStrategy::OxPlowing,
    )
}

/// Progressive multi-jittered (0,2) samples.
///
/// Every power-of-two prefix is a (0,2) set when `strategy` is
/// [`SubquadrantStrategy::SwapXOrY`]; the other strategies can break that.
pub fn progressive_multi_jittered_02<R: RandomSource + ?Sized>(
    num_samples: usize,
    rng: &mut R,
    num_candidates: usize,
    strategy: SubquadrantStrategy,
) -> Result<Vec<Point>> {
    generate::<ElementaryStrata, R>(num_samples, num_candidates, strategy, rng)
}

/// Progressive multi-jittered (0,2) samples with blue-noise selection.
pub fn progressive_multi_jittered_02_bn<R: RandomSource + ?Sized>(
    num_samples: usize,
    rng: &mut R,
) -> Result<Vec<Point>> {
    progressive_multi_jittered_02(
        num_samples,
        rng,
        BEST_CANDIDATE_SAMPLES,
        SubquadrantStrategy::SwapXOrY,
    )
}
