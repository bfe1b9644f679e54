#![forbid(unsafe_code)]
//! pmj_sampling: progressive stratified 2D sample sequences.
//!
//! Generates progressive jittered (PJ), progressive multi-jittered (PMJ) and progressive
//! multi-jittered (0,2) (PMJ02) sequences, optionally with best-candidate selection for
//! blue-noise properties. Every prefix of a generated sequence is itself well
//! stratified, so a renderer can take as many samples as it needs.
//!
//! Modules:
//! - generate / jittered: entry points and the refinement loop
//! - strata, grid, candidate, subquadrant: the building blocks of the loop
//! - sequence: configuration of which sequence to generate
//! - sampling: mapping sequences onto rectangular domains
//! - analysis: stratification and spacing checks
//!
//! ```
//! use pmj_sampling::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let points = progressive_multi_jittered_02(64, &mut rng, 1, SubquadrantStrategy::SwapXOrY)?;
//! assert!(is_elementary(&points));
//! # Ok::<(), pmj_sampling::error::Error>(())
//! ```
pub mod analysis;
pub mod candidate;
pub mod error;
pub mod generate;
pub mod grid;
pub mod jittered;
pub mod random;
pub mod sampling;
pub mod sequence;
pub mod strata;
pub mod subquadrant;

pub use error::{Error, Result};

/// A sample position in `[0, 1)^2`.
pub type Point = glam::DVec2;

/// Convenient re-exports for common types. Import with `use pmj_sampling::prelude::*;`.
pub mod prelude {
    pub use crate::analysis::{
        elementary_violations, is_elementary, is_jittered, is_latin,
        mean_nearest_neighbor_distance, nearest_neighbor_distances,
    };
    pub use crate::error::{Error, Result};
    pub use crate::generate::{
        progressive_multi_jittered, progressive_multi_jittered_02,
        progressive_multi_jittered_02_bn, progressive_multi_jittered_bn, sample_count_from_signed,
        BEST_CANDIDATE_SAMPLES, MAX_SAMPLES,
    };
    pub use crate::jittered::progressive_jittered;
    pub use crate::random::RandomSource;
    pub use crate::sampling::{PositionSampling, ProgressiveSampling};
    pub use crate::sequence::{SequenceConfig, SequenceKind};
    pub use crate::subquadrant::SubquadrantStrategy;
    pub use crate::Point;
}
