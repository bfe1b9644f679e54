//! Sequence selection and configuration.
use crate::error::{Error, Result};
use crate::generate::{
    progressive_multi_jittered, progressive_multi_jittered_02, BEST_CANDIDATE_SAMPLES,
};
use crate::jittered::progressive_jittered;
use crate::random::RandomSource;
use crate::subquadrant::SubquadrantStrategy;
use crate::Point;

/// Family of progressive sequence to generate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// Progressive jittered (PJ).
    Jittered,
    /// Progressive multi-jittered (PMJ).
    MultiJittered,
    /// Progressive multi-jittered (0,2) (PMJ02).
    MultiJittered02,
}

impl SequenceKind {
    /// Subquadrant strategy used unless configured otherwise.
    pub fn default_strategy(self) -> SubquadrantStrategy {
        match self {
            SequenceKind::Jittered => SubquadrantStrategy::Random,
            SequenceKind::MultiJittered => SubquadrantStrategy::OxPlowing,
            SequenceKind::MultiJittered02 => SubquadrantStrategy::SwapXOrY,
        }
    }
}

/// Configuration for generating a progressive sequence.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceConfig {
    /// Sequence family.
    pub kind: SequenceKind,
    /// Candidates per sample; values above 1 enable best-candidate selection.
    pub num_candidates: usize,
    /// Strategy choosing the subquadrant order in each round.
    pub subquadrant_strategy: SubquadrantStrategy,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self::new(SequenceKind::MultiJittered02)
    }
}

impl SequenceConfig {
    /// Creates a new [`SequenceConfig`] with one candidate and the kind's default strategy.
    pub fn new(kind: SequenceKind) -> Self {
        Self {
            kind,
            num_candidates: 1,
            subquadrant_strategy: kind.default_strategy(),
        }
    }

    pub fn jittered() -> Self {
        Self::new(SequenceKind::Jittered)
    }

    pub fn multi_jittered() -> Self {
        Self::new(SequenceKind::MultiJittered)
    }

    pub fn multi_jittered_02() -> Self {
        Self::new(SequenceKind::MultiJittered02)
    }

    /// Sets the number of best-candidate trials per sample.
    pub fn with_candidates(mut self, num_candidates: usize) -> Self {
        self.num_candidates = num_candidates;
        self
    }

    /// Enables blue-noise selection with [`BEST_CANDIDATE_SAMPLES`] candidates.
    pub fn with_blue_noise(self) -> Self {
        self.with_candidates(BEST_CANDIDATE_SAMPLES)
    }

    /// Sets the subquadrant strategy.
    pub fn with_subquadrant_strategy(mut self, strategy: SubquadrantStrategy) -> Self {
        self.subquadrant_strategy = strategy;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.kind == SequenceKind::Jittered {
            if self.num_candidates > 1 {
                return Err(Error::InvalidConfig(
                    "progressive jittered sequences do not support best-candidate sampling"
                        .into(),
                ));
            }
            if self.subquadrant_strategy != self.kind.default_strategy() {
                return Err(Error::InvalidConfig(
                    "progressive jittered sequences always pick subquadrants at random".into(),
                ));
            }
        }
        Ok(())
    }

    /// Generates `num_samples` points in `[0, 1)^2`.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        num_samples: usize,
        rng: &mut R,
    ) -> Result<Vec<Point>> {
        self.validate()?;
        match self.kind {
            SequenceKind::Jittered => progressive_jittered(num_samples, rng),
            SequenceKind::MultiJittered => progressive_multi_jittered(
                num_samples,
                rng,
                self.num_candidates,
                self.subquadrant_strategy,
            ),
            SequenceKind::MultiJittered02 => progressive_multi_jittered_02(
                num_samples,
                rng,
                self.num_candidates,
                self.subquadrant_strategy,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::generate::progressive_multi_jittered_02_bn;

    #[test]
    fn defaults_follow_kind() {
        assert_eq!(
            SequenceConfig::multi_jittered().subquadrant_strategy,
            SubquadrantStrategy::OxPlowing
        );
        assert_eq!(
            SequenceConfig::default().subquadrant_strategy,
            SubquadrantStrategy::SwapXOrY
        );
        assert_eq!(SequenceConfig::default().num_candidates, 1);
    }

    #[test]
    fn jittered_rejects_best_candidate() {
        let err = SequenceConfig::jittered()
            .with_blue_noise()
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = SequenceConfig::jittered()
            .with_subquadrant_strategy(SubquadrantStrategy::SwapXOrY)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn blue_noise_config_matches_wrapper() {
        let config = SequenceConfig::multi_jittered_02().with_blue_noise();
        let mut a = StdRng::seed_from_u64(4);
        let mut b = StdRng::seed_from_u64(4);
        assert_eq!(
            config.generate(64, &mut a).unwrap(),
            progressive_multi_jittered_02_bn(64, &mut b).unwrap()
        );
    }

    #[test]
    fn every_kind_generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(10);
        for kind in [
            SequenceKind::Jittered,
            SequenceKind::MultiJittered,
            SequenceKind::MultiJittered02,
        ] {
            let pts = SequenceConfig::new(kind).generate(37, &mut rng).unwrap();
            assert_eq!(pts.len(), 37);
        }
    }
}
