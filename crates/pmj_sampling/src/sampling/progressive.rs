//! Progressive sequence position sampling.
use mint::Vector2;
use rand::RngCore;
use tracing::warn;

use crate::random::RandomSource;
use crate::sampling::{to_domain, PositionSampling};
use crate::sequence::SequenceConfig;

/// Samples positions from a progressive (PJ, PMJ or PMJ02) sequence.
///
/// The first `count` points of the configured sequence are scaled onto the domain.
/// Any prefix of the output is itself well stratified, so trimming the result keeps
/// its quality.
#[derive(Debug, Clone)]
pub struct ProgressiveSampling {
    /// Number of positions to generate.
    pub count: usize,
    /// Sequence family and its generation parameters.
    pub config: SequenceConfig,
    /// Apply Cranley–Patterson rotation with random offsets from the RNG.
    pub rotate: bool,
}

impl ProgressiveSampling {
    /// Construct a sampler for `count` points of `config`, without rotation.
    pub fn new(count: usize, config: SequenceConfig) -> Self {
        Self {
            count,
            config,
            rotate: false,
        }
    }

    /// Construct with optional CP rotation (global random offset in `[0,1)^2`).
    pub fn with_rotation(count: usize, config: SequenceConfig, rotate: bool) -> Self {
        Self {
            count,
            config,
            rotate,
        }
    }
}

impl PositionSampling for ProgressiveSampling {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        let w = domain_extent.x;
        let h = domain_extent.y;

        if self.count == 0 || w <= 0.0 || h <= 0.0 {
            return Vec::new();
        }

        let (dx, dy) = if self.rotate {
            (rng.uniform_real(0.0, 1.0), rng.uniform_real(0.0, 1.0))
        } else {
            (0.0, 0.0)
        };

        let points = match self.config.generate(self.count, rng) {
            Ok(points) => points,
            Err(e) => {
                warn!("Progressive sampling of {} points failed: {}.", self.count, e);
                return Vec::new();
            }
        };

        points
            .into_iter()
            .map(|p| to_domain(frac(p.x + dx), frac(p.y + dy), w, h))
            .collect()
    }
}

#[inline]
fn frac(x: f64) -> f64 {
    x - x.floor()
}
