//! The rasterizer seam.
//!
//! A `Surface` receives pixel-space drawing operations (origin top-left,
//! y down). Backends own fonts and images through the associated handle
//! types, so text measurement and glyph drawing always agree.

use kurbo::{Affine, BezPath, Circle, Line, Point, Rect};
use pc_core::Color;
use peniko::Fill;

/// A line of text positioned in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    /// Top-left of the em box before rotation.
    pub origin: Point,
    /// Font size in pixels.
    pub size: f64,
    /// Clockwise rotation about `origin`, in radians.
    pub rotation: f64,
}

pub trait Surface {
    /// Font handle used for measuring and drawing text.
    type Font;
    /// Decoded bitmap handle.
    type Image;

    /// Cover the whole surface.
    fn fill(&mut self, color: Color);

    fn fill_path(&mut self, path: &BezPath, rule: Fill, color: Color);

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color);

    fn fill_circle(&mut self, circle: Circle, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_line(&mut self, line: Line, width: f64, color: Color);

    fn draw_text(&mut self, font: &Self::Font, run: &TextRun<'_>, color: Color);

    /// Horizontal advance of `text` at `size` pixels.
    fn advance(&self, font: &Self::Font, text: &str, size: f64) -> f64;

    /// Pixel dimensions of `image`.
    fn image_size(&self, image: &Self::Image) -> (f64, f64);

    /// Draw `image` with its top-left at the origin of `transform`.
    fn draw_image(&mut self, image: &Self::Image, transform: Affine);
}
