use glam::Vec2;
use pmj_sampling::prelude::*;
use pmj_sampling_examples::{count_from_args, render_unit_points_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    let count = count_from_args(1024)?;
    let domain_extent = Vec2::new(1.0, 1.0);

    let variants = [
        ("pmj", SequenceKind::MultiJittered, false),
        ("pmjbn", SequenceKind::MultiJittered, true),
        ("pmj02", SequenceKind::MultiJittered02, false),
        ("pmj02bn", SequenceKind::MultiJittered02, true),
    ];
    let palette = [
        [240, 235, 200],
        [200, 235, 240],
        [240, 200, 200],
        [200, 240, 200],
    ];

    for ((name, kind, blue_noise), color) in variants.into_iter().zip(palette) {
        let mut config = SequenceConfig::new(kind);
        if blue_noise {
            config = config.with_blue_noise();
        }

        // Same seed for every variant so only the selection rule differs.
        let mut rng = StdRng::seed_from_u64(42);
        let points = config.generate(count, &mut rng)?;

        println!(
            "{name:>8}: mean nearest-neighbour distance {:.5}, elementary violations {}",
            mean_nearest_neighbor_distance(&points),
            elementary_violations(&points).len(),
        );

        let rc = RenderConfig::new((800, 800), domain_extent)
            .with_background([26, 28, 35])
            .with_color(color)
            .with_radius(3);
        render_unit_points_to_png(&points, &rc, &format!("sequences-{name}.png"))?;
    }

    Ok(())
}
