//! Position sampling over rectangular domains.
//!
//! Progressive sequences live in the unit square. [`PositionSampling`] maps them onto an
//! origin-centred domain of arbitrary extent, which is how downstream placement code
//! consumes sample positions.
use mint::Vector2;
use rand::RngCore;

pub mod progressive;

pub use progressive::ProgressiveSampling;

/// Trait for position sampling.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Map a unit-square point onto an origin-centred `w x h` domain, strictly inside the
/// right and top edges.
#[inline]
pub(crate) fn to_domain(u: f64, v: f64, w: f32, h: f32) -> Vector2<f32> {
    let half_w = w * 0.5;
    let half_h = h * 0.5;
    let x = (u as f32 * w - half_w).clamp(-half_w, half_w.next_down());
    let y = (v as f32 * h - half_h).clamp(-half_h, half_h.next_down());
    Vector2 { x, y }
}
