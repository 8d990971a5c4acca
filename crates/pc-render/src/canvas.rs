//! Percentage-space drawing API.
//!
//! Coordinates run 0–100 on both axes with the origin at the bottom left.
//! Sizes (radii, stroke widths, text sizes, widths) are percentages of the
//! canvas width; rectangle heights are percentages of the canvas height.
//! Every primitive maps its arguments to pixels through the viewport and
//! hands the result to the [`Surface`]. Nothing is retained between calls.
//!
//! Bad input degrades rather than fails: a polygon with fewer than three
//! points draws nothing, an unknown color string paints black.

use crate::surface::{Surface, TextRun};
use kurbo::{Affine, BezPath, Circle, Line, Point, Rect, Shape, Vec2};
use pc_core::geometry::{arc_radians, sweep_degrees};
use pc_core::wrap::{WrapConfig, WrapMode, wrap_words};
use pc_core::{Color, Viewport};
use peniko::Fill;

/// Flattening tolerance for arcs, in pixels.
const ARC_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextAlign {
    Start,
    Center,
    End,
}

/// A drawing pass over one surface.
pub struct Canvas<'s, S: Surface> {
    surface: &'s mut S,
    viewport: Viewport,
    wrap: WrapConfig,
}

impl<'s, S: Surface> Canvas<'s, S> {
    /// Bind a canvas of `width`×`height` pixels to `surface`.
    pub fn new(surface: &'s mut S, width: f64, height: f64) -> Self {
        Self {
            surface,
            viewport: Viewport::new(width, height),
            wrap: WrapConfig::default(),
        }
    }

    /// Override the word-wrap tuning used by `text_wrap*`.
    pub fn with_wrap_config(mut self, config: WrapConfig) -> Self {
        self.wrap = config;
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn width(&self) -> f64 {
        self.viewport.width
    }

    pub fn height(&self) -> f64 {
        self.viewport.height
    }

    fn pixel(&self, x: f64, y: f64) -> Point {
        self.viewport.to_pixel(x, y).into()
    }

    // ─── Utility ─────────────────────────────────────────────────────────

    /// Fill the whole canvas.
    pub fn background(&mut self, color: impl Into<Color>) {
        self.surface.fill(color.into());
    }

    /// Rule lines every `interval` across the region with lower-left
    /// `(x, y)` and extent `(w, h)`.
    #[allow(clippy::too_many_arguments)]
    pub fn grid(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        size: f64,
        interval: f64,
        color: impl Into<Color>,
    ) {
        if interval.is_nan() || interval <= 0.0 {
            log::debug!("grid interval {interval} is not positive; skipped");
            return;
        }
        let color = color.into();
        let mut xp = x;
        while xp <= x + w {
            self.line(xp, y, xp, y + h, size, color);
            xp += interval;
        }
        let mut yp = y;
        while yp <= y + h {
            self.line(x, yp, x + w, yp, size, color);
            yp += interval;
        }
    }

    /// Polar → Cartesian around `(cx, cy)`, `theta` in radians, with the
    /// canvas aspect compensated.
    pub fn polar(&self, cx: f64, cy: f64, r: f64, theta: f64) -> (f64, f64) {
        self.viewport.polar(cx, cy, r, theta)
    }

    /// [`Canvas::polar`] with `degrees` counter-clockwise from +x.
    pub fn polar_degrees(&self, cx: f64, cy: f64, r: f64, degrees: f64) -> (f64, f64) {
        self.viewport.polar_degrees(cx, cy, r, degrees)
    }

    /// Mark `(x, y)` with a dot, its coordinates above and `label` below.
    pub fn coord(
        &mut self,
        font: &S::Font,
        x: f64,
        y: f64,
        size: f64,
        label: &str,
        color: impl Into<Color>,
    ) {
        let color = color.into();
        self.circle(x, y, size / 4.0, color);
        let label_xy = format!("({},{})", x as f32, y as f32);
        self.ctext(font, x, y + size, size, &label_xy, color);
        if !label.is_empty() {
            self.ctext(font, x, y - size * 1.33, size * 0.66, label, color);
        }
    }

    // ─── Shapes ──────────────────────────────────────────────────────────

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, color: impl Into<Color>) {
        let circle = Circle::new(self.pixel(cx, cy), self.viewport.scale_x(r));
        self.surface.fill_circle(circle, color.into());
    }

    /// Filled arc (the region between the chord and the curve) from `a1`
    /// to `a2` degrees, counter-clockwise.
    pub fn arc(&mut self, cx: f64, cy: f64, r: f64, a1: f64, a2: f64, color: impl Into<Color>) {
        let mut path = self.arc_path(cx, cy, r, a1, a2);
        path.close_path();
        self.surface.fill_path(&path, Fill::EvenOdd, color.into());
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stroked_arc(
        &mut self,
        cx: f64,
        cy: f64,
        r: f64,
        a1: f64,
        a2: f64,
        size: f64,
        color: impl Into<Color>,
    ) {
        let path = self.arc_path(cx, cy, r, a1, a2);
        let width = self.viewport.scale_x(size);
        self.surface.stroke_path(&path, width, color.into());
    }

    /// Pie slice: the triangle (center, a1, a2) plus the arc cap between
    /// them, both in the same color.
    pub fn wedge(&mut self, cx: f64, cy: f64, r: f64, a1: f64, a2: f64, color: impl Into<Color>) {
        let color = color.into();
        let (x1, y1) = self.polar_degrees(cx, cy, r, a1);
        let (x2, y2) = self.polar_degrees(cx, cy, r, a2);
        self.polygon(&[cx, x1, x2], &[cy, y1, y2], color);
        self.arc(cx, cy, r, a1, a2, color);
    }

    fn arc_path(&self, cx: f64, cy: f64, r: f64, a1: f64, a2: f64) -> BezPath {
        let radius = self.viewport.scale_x(r);
        let arc = kurbo::Arc {
            center: self.pixel(cx, cy),
            radii: Vec2::new(radius, radius),
            start_angle: arc_radians(a1),
            // y is down, so a counter-clockwise sweep is negative
            sweep_angle: -sweep_degrees(a1, a2).to_radians(),
            x_rotation: 0.0,
        };
        arc.to_path(ARC_TOLERANCE)
    }

    /// Rectangle centered at `(x, y)`.
    pub fn center_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: impl Into<Color>) {
        let size = (self.viewport.scale_x(w), self.viewport.scale_y(h));
        let rect = Rect::from_center_size(self.pixel(x, y), size);
        self.surface.fill_rect(rect, color.into());
    }

    /// Rectangle with its upper-left corner at `(x, y)`.
    pub fn corner_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: impl Into<Color>) {
        let size = (self.viewport.scale_x(w), self.viewport.scale_y(h));
        let rect = Rect::from_origin_size(self.pixel(x, y), size);
        self.surface.fill_rect(rect, color.into());
    }

    /// Shorthand for [`Canvas::center_rect`].
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: impl Into<Color>) {
        self.center_rect(x, y, w, h, color);
    }

    /// Square centered at `(x, y)` with sides of `w` percent of the width,
    /// square in pixels whatever the canvas aspect.
    pub fn square(&mut self, x: f64, y: f64, w: f64, color: impl Into<Color>) {
        let h = w * self.viewport.aspect();
        self.center_rect(x, y, w, h, color);
    }

    // ─── Lines ───────────────────────────────────────────────────────────

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, size: f64, color: impl Into<Color>) {
        let line = Line::new(self.pixel(x1, y1), self.pixel(x2, y2));
        let width = self.viewport.scale_x(size);
        self.surface.stroke_line(line, width, color.into());
    }

    /// Horizontal line from `(x, y)` extending `size` to the right.
    pub fn hline(&mut self, x: f64, y: f64, size: f64, sw: f64, color: impl Into<Color>) {
        self.line(x, y, x + size, y, sw, color);
    }

    /// Vertical line from `(x, y)` extending `size` upward.
    pub fn vline(&mut self, x: f64, y: f64, size: f64, sw: f64, color: impl Into<Color>) {
        self.line(x, y, x, y + size, sw, color);
    }

    // ─── Polygons ────────────────────────────────────────────────────────

    /// Filled polygon through the points `(xs[i], ys[i])`, closed
    /// implicitly.
    pub fn polygon(&mut self, xs: &[f64], ys: &[f64], color: impl Into<Color>) {
        if !polygon_points_ok(xs, ys) {
            return;
        }
        let mut path = BezPath::new();
        for (i, (&x, &y)) in xs.iter().zip(ys).enumerate() {
            let p = self.pixel(x, y);
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path.close_path();
        self.surface.fill_path(&path, Fill::NonZero, color.into());
    }

    /// Polygon outline, including the segment from the last point back
    /// to the first.
    pub fn stroked_polygon(&mut self, xs: &[f64], ys: &[f64], size: f64, color: impl Into<Color>) {
        if !polygon_points_ok(xs, ys) {
            return;
        }
        let color = color.into();
        let n = xs.len();
        for i in 0..n {
            let j = (i + 1) % n;
            self.line(xs[i], ys[i], xs[j], ys[j], size, color);
        }
    }

    // ─── Curves ──────────────────────────────────────────────────────────

    /// Filled quadratic Bézier from `(x1, y1)` via `(x2, y2)` to `(x3, y3)`.
    #[allow(clippy::too_many_arguments)]
    pub fn quad_curve(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        color: impl Into<Color>,
    ) {
        let mut path = self.quad_path(x1, y1, x2, y2, x3, y3);
        path.close_path();
        self.surface.fill_path(&path, Fill::EvenOdd, color.into());
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stroked_quad_curve(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        size: f64,
        color: impl Into<Color>,
    ) {
        let path = self.quad_path(x1, y1, x2, y2, x3, y3);
        let width = self.viewport.scale_x(size);
        self.surface.stroke_path(&path, width, color.into());
    }

    /// Shorthand for [`Canvas::quad_curve`].
    #[allow(clippy::too_many_arguments)]
    pub fn curve(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        color: impl Into<Color>,
    ) {
        self.quad_curve(x1, y1, x2, y2, x3, y3, color);
    }

    /// Shorthand for [`Canvas::stroked_quad_curve`].
    #[allow(clippy::too_many_arguments)]
    pub fn stroked_curve(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        size: f64,
        color: impl Into<Color>,
    ) {
        self.stroked_quad_curve(x1, y1, x2, y2, x3, y3, size, color);
    }

    /// Filled cubic Bézier from `(x1, y1)` via `(x2, y2)` and `(x3, y3)`
    /// to `(x4, y4)`.
    #[allow(clippy::too_many_arguments)]
    pub fn cube_curve(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        x4: f64,
        y4: f64,
        color: impl Into<Color>,
    ) {
        let mut path = self.cubic_path([(x1, y1), (x2, y2), (x3, y3), (x4, y4)]);
        path.close_path();
        self.surface.fill_path(&path, Fill::EvenOdd, color.into());
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stroked_cube_curve(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        x4: f64,
        y4: f64,
        size: f64,
        color: impl Into<Color>,
    ) {
        let path = self.cubic_path([(x1, y1), (x2, y2), (x3, y3), (x4, y4)]);
        let width = self.viewport.scale_x(size);
        self.surface.stroke_path(&path, width, color.into());
    }

    fn quad_path(&self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.pixel(x1, y1));
        path.quad_to(self.pixel(x2, y2), self.pixel(x3, y3));
        path
    }

    fn cubic_path(&self, points: [(f64, f64); 4]) -> BezPath {
        let [p0, p1, p2, p3] = points.map(|(x, y)| self.pixel(x, y));
        let mut path = BezPath::new();
        path.move_to(p0);
        path.curve_to(p1, p2, p3);
        path
    }

    // ─── Text ────────────────────────────────────────────────────────────

    /// Text beginning at `(x, y)`.
    pub fn text(
        &mut self,
        font: &S::Font,
        x: f64,
        y: f64,
        size: f64,
        s: &str,
        color: impl Into<Color>,
    ) {
        self.place_text(font, x, y, size, s, TextAlign::Start, 0.0, color.into());
    }

    /// Text centered on `(x, y)`.
    pub fn ctext(
        &mut self,
        font: &S::Font,
        x: f64,
        y: f64,
        size: f64,
        s: &str,
        color: impl Into<Color>,
    ) {
        self.place_text(font, x, y, size, s, TextAlign::Center, 0.0, color.into());
    }

    /// Shorthand for [`Canvas::ctext`].
    pub fn text_mid(
        &mut self,
        font: &S::Font,
        x: f64,
        y: f64,
        size: f64,
        s: &str,
        color: impl Into<Color>,
    ) {
        self.ctext(font, x, y, size, s, color);
    }

    /// Text ending at `(x, y)`.
    pub fn etext(
        &mut self,
        font: &S::Font,
        x: f64,
        y: f64,
        size: f64,
        s: &str,
        color: impl Into<Color>,
    ) {
        self.place_text(font, x, y, size, s, TextAlign::End, 0.0, color.into());
    }

    /// Shorthand for [`Canvas::etext`].
    pub fn text_end(
        &mut self,
        font: &S::Font,
        x: f64,
        y: f64,
        size: f64,
        s: &str,
        color: impl Into<Color>,
    ) {
        self.etext(font, x, y, size, s, color);
    }

    /// Text beginning at `(x, y)`, rotated by `angle` degrees about it.
    #[allow(clippy::too_many_arguments)]
    pub fn rtext(
        &mut self,
        font: &S::Font,
        x: f64,
        y: f64,
        angle: f64,
        size: f64,
        s: &str,
        color: impl Into<Color>,
    ) {
        let rotation = angle.to_radians();
        self.place_text(font, x, y, size, s, TextAlign::Start, rotation, color.into());
    }

    /// Text starting at `(x, y)`, wrapped at `w`. A word that crosses the
    /// edge stays on its line.
    #[allow(clippy::too_many_arguments)]
    pub fn text_wrap(
        &mut self,
        font: &S::Font,
        x: f64,
        y: f64,
        w: f64,
        size: f64,
        s: &str,
        color: impl Into<Color>,
    ) {
        self.wrapped_text(font, x, y, w, size, s, WrapMode::Loose, color.into());
    }

    /// Like [`Canvas::text_wrap`], but a word that would cross the edge
    /// moves to the next line.
    #[allow(clippy::too_many_arguments)]
    pub fn text_wrap_strict(
        &mut self,
        font: &S::Font,
        x: f64,
        y: f64,
        w: f64,
        size: f64,
        s: &str,
        color: impl Into<Color>,
    ) {
        self.wrapped_text(font, x, y, w, size, s, WrapMode::Strict, color.into());
    }

    #[allow(clippy::too_many_arguments)]
    fn place_text(
        &mut self,
        font: &S::Font,
        x: f64,
        y: f64,
        size: f64,
        text: &str,
        align: TextAlign,
        rotation: f64,
        color: Color,
    ) {
        let anchor = self.pixel(x, y);
        let size = self.viewport.scale_x(size);
        let shift = match align {
            TextAlign::Start => 0.0,
            TextAlign::Center => self.surface.advance(font, text, size) / 2.0,
            TextAlign::End => self.surface.advance(font, text, size),
        };
        log::trace!("text {text:?} at ({}, {}) size {size}", anchor.x, anchor.y);
        let mut origin = Point::new(anchor.x - shift, anchor.y - size);
        if rotation != 0.0 {
            // the surface turns the run about its origin; pivot on the anchor
            origin = Affine::rotate_about(rotation, anchor) * origin;
        }
        let run = TextRun {
            text,
            origin,
            size,
            rotation,
        };
        self.surface.draw_text(font, &run, color);
    }

    #[allow(clippy::too_many_arguments)]
    fn wrapped_text(
        &mut self,
        font: &S::Font,
        x: f64,
        y: f64,
        w: f64,
        size: f64,
        text: &str,
        mode: WrapMode,
        color: Color,
    ) {
        let anchor = self.pixel(x, y);
        let size = self.viewport.scale_x(size);
        let width = self.viewport.scale_x(w);
        let surface = &*self.surface;
        let placements = wrap_words(text, anchor.x, anchor.y, width, size, mode, &self.wrap, |s| {
            surface.advance(font, s, size)
        });
        for p in placements {
            let run = TextRun {
                text: p.word,
                origin: Point::new(p.x, p.y - size),
                size,
                rotation: 0.0,
            };
            self.surface.draw_text(font, &run, color);
        }
    }

    // ─── Images ──────────────────────────────────────────────────────────

    /// Image centered at `(x, y)`, scaled to `scale` percent.
    pub fn center_image(&mut self, x: f64, y: f64, scale: f64, image: &S::Image) {
        let anchor = self.pixel(x, y);
        let factor = scale / 100.0;
        let (w, h) = self.surface.image_size(image);
        let origin = Vec2::new(anchor.x - w * factor / 2.0, anchor.y - h * factor / 2.0);
        let transform = Affine::translate(origin) * Affine::scale(factor);
        self.surface.draw_image(image, transform);
    }

    /// Image with its upper-left corner at `(x, y)`, scaled to `scale`
    /// percent.
    pub fn corner_image(&mut self, x: f64, y: f64, scale: f64, image: &S::Image) {
        let anchor = self.pixel(x, y);
        let transform = Affine::translate(anchor.to_vec2()) * Affine::scale(scale / 100.0);
        self.surface.draw_image(image, transform);
    }

    /// Shorthand for [`Canvas::center_image`].
    pub fn image(&mut self, x: f64, y: f64, scale: f64, image: &S::Image) {
        self.center_image(x, y, scale, image);
    }
}

/// Polygons need matching coordinate lists and at least three points.
fn polygon_points_ok(xs: &[f64], ys: &[f64]) -> bool {
    if xs.len() != ys.len() {
        log::debug!("polygon skipped: {} x values, {} y values", xs.len(), ys.len());
        return false;
    }
    if xs.len() < 3 {
        log::debug!("polygon skipped: {} points", xs.len());
        return false;
    }
    true
}
