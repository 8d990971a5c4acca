//! Canvas2D surface.
//!
//! Draws pixel-space operations onto an HTML `<canvas>` via
//! `CanvasRenderingContext2d`. Fonts are CSS families measured by the
//! browser; images are loaded `<img>` elements.

use kurbo::{Affine, BezPath, Circle, Line, PathEl, Rect};
use pc_core::Color;
use pc_render::{Surface, TextRun};
use peniko::Fill;
use web_sys::{CanvasRenderingContext2d, CanvasWindingRule, HtmlImageElement};

/// A CSS font family, e.g. `"Inter, sans-serif"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssFont {
    pub family: String,
}

impl Default for CssFont {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
        }
    }
}

/// Paints into a borrowed 2D context of `width`×`height` pixels.
pub struct WebSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl<'a> WebSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }
}

impl Surface for WebSurface<'_> {
    type Font = CssFont;
    type Image = HtmlImageElement;

    fn fill(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_path(&mut self, path: &BezPath, rule: Fill, color: Color) {
        trace_path(self.ctx, path);
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_with_canvas_winding_rule(winding_rule(rule));
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color) {
        trace_path(self.ctx, path);
        stroke_current(self.ctx, width, color);
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            circle.center.x,
            circle.center.y,
            circle.radius,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn stroke_line(&mut self, line: Line, width: f64, color: Color) {
        self.ctx.begin_path();
        self.ctx.move_to(line.p0.x, line.p0.y);
        self.ctx.line_to(line.p1.x, line.p1.y);
        stroke_current(self.ctx, width, color);
    }

    fn draw_text(&mut self, font: &CssFont, run: &TextRun<'_>, color: Color) {
        self.ctx.save();
        self.ctx.set_font(&css_font(font, run.size));
        self.ctx.set_text_baseline("top");
        self.ctx.set_fill_style_str(&color.to_hex());
        let _ = self.ctx.translate(run.origin.x, run.origin.y);
        if run.rotation != 0.0 {
            let _ = self.ctx.rotate(run.rotation);
        }
        if let Err(e) = self.ctx.fill_text(run.text, 0.0, 0.0) {
            log::warn!("fill_text failed: {e:?}");
        }
        self.ctx.restore();
    }

    fn advance(&self, font: &CssFont, text: &str, size: f64) -> f64 {
        self.ctx.set_font(&css_font(font, size));
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(e) => {
                log::warn!("measure_text failed: {e:?}");
                0.0
            }
        }
    }

    fn image_size(&self, image: &HtmlImageElement) -> (f64, f64) {
        (image.natural_width() as f64, image.natural_height() as f64)
    }

    fn draw_image(&mut self, image: &HtmlImageElement, transform: Affine) {
        let [a, b, c, d, e, f] = transform.as_coeffs();
        self.ctx.save();
        let _ = self.ctx.transform(a, b, c, d, e, f);
        if let Err(e) = self.ctx.draw_image_with_html_image_element(image, 0.0, 0.0) {
            log::warn!("draw_image failed: {e:?}");
        }
        self.ctx.restore();
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// CSS `font` shorthand for `family` at `size` pixels.
pub(crate) fn css_font(font: &CssFont, size: f64) -> String {
    format!("{size}px {}", font.family)
}

fn winding_rule(rule: Fill) -> CanvasWindingRule {
    match rule {
        Fill::NonZero => CanvasWindingRule::Nonzero,
        Fill::EvenOdd => CanvasWindingRule::Evenodd,
    }
}

/// Replay `path` as the context's current path.
fn trace_path(ctx: &CanvasRenderingContext2d, path: &BezPath) {
    ctx.begin_path();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
            PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
            PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathEl::ClosePath => ctx.close_path(),
        }
    }
}

fn stroke_current(ctx: &CanvasRenderingContext2d, width: f64, color: Color) {
    ctx.set_stroke_style_str(&color.to_hex());
    ctx.set_line_width(width);
    ctx.stroke();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_shorthand() {
        let font = CssFont {
            family: "Inter, sans-serif".to_string(),
        };
        assert_eq!(css_font(&font, 16.0), "16px Inter, sans-serif");
        assert_eq!(css_font(&CssFont::default(), 12.5), "12.5px sans-serif");
    }

    #[test]
    fn fill_rules_map_to_canvas_rules() {
        assert_eq!(winding_rule(Fill::NonZero), CanvasWindingRule::Nonzero);
        assert_eq!(winding_rule(Fill::EvenOdd), CanvasWindingRule::Evenodd);
    }
}
