#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    count_from_args, render_points_to_png, render_unit_points_to_png, RenderConfig,
};
