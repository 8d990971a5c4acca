pub mod color;
pub mod geometry;
pub mod wrap;

pub use color::{Color, hsv_to_rgb};
pub use geometry::{Viewport, from_pixel, map_range, percent_of, polar, polar_degrees, to_pixel};
pub use wrap::{WordPlacement, WrapConfig, WrapMode, wrap_words};
