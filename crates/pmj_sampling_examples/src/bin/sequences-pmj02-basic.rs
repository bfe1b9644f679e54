use glam::Vec2;
use pmj_sampling::prelude::*;
use pmj_sampling_examples::{count_from_args, render_points_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    // Sample count from the command line; must be a non-negative integer.
    let count = count_from_args(1024)?;

    let domain_extent = Vec2::new(100.0, 100.0);
    let image_size = (1000, 1000);
    let mut rng = StdRng::seed_from_u64(4242);

    // PMJ02 points mapped onto the domain, with a random global offset.
    let sampler =
        ProgressiveSampling::with_rotation(count, SequenceConfig::multi_jittered_02(), true);
    let points = sampler.generate(domain_extent.into(), &mut rng);

    let rc = RenderConfig::new(image_size, domain_extent);
    render_points_to_png(&points, &rc, "sequences-pmj02-basic.png")?;

    Ok(())
}
