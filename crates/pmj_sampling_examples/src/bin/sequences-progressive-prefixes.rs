use glam::Vec2;
use pmj_sampling::prelude::*;
use pmj_sampling_examples::{render_unit_points_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(2024);
    let points = progressive_jittered(256, &mut rng)?;

    // Every power-of-four prefix is jittered over its own grid.
    for (prefix, grid) in [(4usize, 2u32), (16, 4), (64, 8), (256, 16)] {
        let pts = &points[..prefix];
        println!("prefix {prefix:>3}: jittered={}", is_jittered(pts, grid));

        let rc = RenderConfig::new((600, 600), Vec2::ONE)
            .with_grid(grid)
            .with_radius(4);
        render_unit_points_to_png(pts, &rc, &format!("sequences-pj-prefix-{prefix}.png"))?;
    }

    Ok(())
}
