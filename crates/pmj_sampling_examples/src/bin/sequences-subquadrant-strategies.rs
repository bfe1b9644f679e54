use glam::Vec2;
use pmj_sampling::prelude::*;
use pmj_sampling_examples::{count_from_args, render_unit_points_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    let count = count_from_args(256)?;

    for strategy in [
        SubquadrantStrategy::Random,
        SubquadrantStrategy::SwapXOrY,
        SubquadrantStrategy::OxPlowing,
    ] {
        let mut rng = StdRng::seed_from_u64(7);
        let points = progressive_multi_jittered(count, &mut rng, 1, strategy)?;
        if points.is_empty() {
            continue;
        }

        // The largest power-of-four prefix is rendered over its own jitter grid.
        let mut grid = 1u32;
        while ((2 * grid) as usize).pow(2) <= points.len() {
            grid *= 2;
        }
        let prefix = &points[..(grid * grid) as usize];
        println!(
            "{strategy:?}: jittered={} latin={} (first {} points)",
            is_jittered(prefix, grid),
            is_latin(prefix),
            prefix.len(),
        );

        let rc = RenderConfig::new((800, 800), Vec2::ONE).with_grid(grid);
        let out = format!("sequences-pmj-{strategy:?}.png").to_lowercase();
        render_unit_points_to_png(prefix, &rc, &out)?;
    }

    Ok(())
}
