//! PNG rendering of sample sets for the example binaries.
use anyhow::{bail, Context};
use glam::{DVec2, Vec2};
use image::{Rgb, RgbImage};
use pmj_sampling::prelude::*;

/// Image layout and colours for a rendered point set.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub domain_extent: Vec2,
    pub background: [u8; 3],
    pub color: [u8; 3],
    pub radius: i32,
    /// Draw a `grid x grid` stratum overlay; `0` disables it.
    pub grid: u32,
    pub grid_color: [u8; 3],
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain_extent: Vec2) -> Self {
        Self {
            image_size,
            domain_extent,
            background: [26, 26, 26],
            color: [238, 238, 238],
            radius: 2,
            grid: 0,
            grid_color: [60, 60, 60],
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_grid(mut self, grid: u32) -> Self {
        self.grid = grid;
        self
    }
}

/// Render origin-centred domain positions (as produced by [`PositionSampling`]) to a PNG.
pub fn render_points_to_png(
    points: &[mint::Vector2<f32>],
    config: &RenderConfig,
    out_path: &str,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    if w == 0 || h == 0 {
        bail!("image size must be non-zero, got {w}x{h}");
    }
    let extent = config.domain_extent;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));

    if config.grid > 0 {
        draw_grid(&mut img, config.grid, Rgb(config.grid_color));
    }

    for p in points {
        let u = (p.x / extent.x) + 0.5;
        let v = (p.y / extent.y) + 0.5;
        let px = (u * w as f32) as i32;
        // Image rows grow downwards.
        let py = ((1.0 - v) * h as f32) as i32;
        draw_disk(&mut img, px, py, config.radius, Rgb(config.color));
    }

    img.save(out_path).with_context(|| format!("failed to write {out_path}"))?;
    Ok(())
}

/// Render unit-square points directly, mapping `[0,1)^2` onto the whole image.
pub fn render_unit_points_to_png(
    points: &[DVec2],
    config: &RenderConfig,
    out_path: &str,
) -> anyhow::Result<()> {
    let extent = config.domain_extent;
    let mapped: Vec<mint::Vector2<f32>> = points
        .iter()
        .map(|p| {
            let q = Vec2::new(
                (p.x as f32 - 0.5) * extent.x,
                (p.y as f32 - 0.5) * extent.y,
            );
            q.into()
        })
        .collect();
    render_points_to_png(&mapped, config, out_path)
}

/// Parse the first CLI argument as a sample count, falling back to `default`.
pub fn count_from_args(default: usize) -> anyhow::Result<usize> {
    match std::env::args().nth(1) {
        None => Ok(default),
        Some(arg) => {
            let raw: i64 = arg
                .parse()
                .with_context(|| format!("sample count must be an integer, got {arg:?}"))?;
            Ok(sample_count_from_signed(raw)?)
        }
    }
}

fn draw_grid(img: &mut RgbImage, cells: u32, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    for i in 1..cells {
        let x = (u64::from(i) * u64::from(w) / u64::from(cells)) as u32;
        let y = (u64::from(i) * u64::from(h) / u64::from(cells)) as u32;
        for yy in 0..h {
            img.put_pixel(x.min(w - 1), yy, color);
        }
        for xx in 0..w {
            img.put_pixel(xx, y.min(h - 1), color);
        }
    }
}

fn draw_disk(img: &mut RgbImage, cx: i32, cy: i32, r: i32, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    let r2 = r * r;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let x = cx + dx;
            let y = cy + dy;
            if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
