//! Surface operations → Vello drawing commands.
//!
//! `VelloSurface` appends fills, strokes, glyph runs and images to a
//! `vello::Scene`. The caller owns the scene and presents it via wgpu.

use crate::surface::{Surface, TextRun};
use kurbo::{Affine, BezPath, Circle, Line, Rect, Stroke as KurboStroke};
use pc_core::Color;
use peniko::{Fill, Font, Image};
use vello::Glyph;
use vello::Scene;
use skrifa::instance::{LocationRef, Size};
use skrifa::{FontRef, MetadataProvider};

/// Paints into a borrowed `Scene` of `width`×`height` pixels.
///
/// Call once per frame with a freshly-cleared `Scene`.
pub struct VelloSurface<'a> {
    scene: &'a mut Scene,
    width: f64,
    height: f64,
}

impl<'a> VelloSurface<'a> {
    pub fn new(scene: &'a mut Scene, width: f64, height: f64) -> Self {
        Self {
            scene,
            width,
            height,
        }
    }
}

impl Surface for VelloSurface<'_> {
    type Font = Font;
    type Image = Image;

    fn fill(&mut self, color: Color) {
        let bounds = Rect::new(0.0, 0.0, self.width, self.height);
        fill_shape(self.scene, &bounds, Fill::NonZero, color);
    }

    fn fill_path(&mut self, path: &BezPath, rule: Fill, color: Color) {
        fill_shape(self.scene, path, rule, color);
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color) {
        stroke_shape(self.scene, path, width, color);
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        fill_shape(self.scene, &circle, Fill::NonZero, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        fill_shape(self.scene, &rect, Fill::NonZero, color);
    }

    fn stroke_line(&mut self, line: Line, width: f64, color: Color) {
        stroke_shape(self.scene, &line, width, color);
    }

    fn draw_text(&mut self, font: &Font, run: &TextRun<'_>, color: Color) {
        let Some(font_ref) = font_ref(font) else {
            return;
        };
        let size = Size::new(run.size as f32);
        // Glyph y is the baseline; the run origin is the top of the em box.
        let ascent = font_ref.metrics(size, LocationRef::default()).ascent;
        let (glyphs, _) = layout_glyphs(&font_ref, run.text, size, ascent);
        log::trace!("{} glyphs for {:?}", glyphs.len(), run.text);

        let transform = Affine::translate(run.origin.to_vec2()) * Affine::rotate(run.rotation);
        self.scene
            .draw_glyphs(font)
            .font_size(run.size as f32)
            .transform(transform)
            .brush(to_peniko(color))
            .draw(Fill::NonZero, glyphs.into_iter());
    }

    fn advance(&self, font: &Font, text: &str, size: f64) -> f64 {
        font_ref(font).map_or(0.0, |font_ref| {
            let (_, width) = layout_glyphs(&font_ref, text, Size::new(size as f32), 0.0);
            width as f64
        })
    }

    fn image_size(&self, image: &Image) -> (f64, f64) {
        (image.width as f64, image.height as f64)
    }

    fn draw_image(&mut self, image: &Image, transform: Affine) {
        self.scene.draw_image(image, transform);
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

fn font_ref(font: &Font) -> Option<FontRef<'_>> {
    FontRef::from_index(font.data.as_ref(), font.index)
        .map_err(|e| log::warn!("unreadable font data: {e}"))
        .ok()
}

/// Map chars to glyphs left to right along `baseline`, returning the
/// glyphs and the total advance. Unmapped chars use `.notdef`.
fn layout_glyphs(font_ref: &FontRef<'_>, text: &str, size: Size, baseline: f32) -> (Vec<Glyph>, f32) {
    let charmap = font_ref.charmap();
    let metrics = font_ref.glyph_metrics(size, LocationRef::default());
    let mut pen_x = 0.0f32;
    let glyphs = text
        .chars()
        .map(|ch| {
            let gid = charmap.map(ch).unwrap_or_default();
            let x = pen_x;
            pen_x += metrics.advance_width(gid).unwrap_or_default();
            Glyph {
                id: gid.to_u32(),
                x,
                y: baseline,
            }
        })
        .collect();
    (glyphs, pen_x)
}

// ─── Fill and stroke ─────────────────────────────────────────────────────

fn fill_shape<S: kurbo::Shape>(scene: &mut Scene, shape: &S, rule: Fill, color: Color) {
    scene.fill(rule, Affine::IDENTITY, to_peniko(color), None, shape);
}

fn stroke_shape<S: kurbo::Shape>(scene: &mut Scene, shape: &S, width: f64, color: Color) {
    let stroke = KurboStroke::new(width);
    scene.stroke(&stroke, Affine::IDENTITY, to_peniko(color), None, shape);
}

// ─── Helpers ─────────────────────────────────────────────────────────────

fn to_peniko(c: Color) -> peniko::Color {
    peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use peniko::{Blob, ImageFormat};
    use std::sync::Arc;

    #[test]
    fn garbage_font_degrades_to_nothing() {
        let mut scene = Scene::new();
        let mut surface = VelloSurface::new(&mut scene, 100.0, 100.0);
        let font = Font::new(Blob::new(Arc::new(vec![0u8; 8])), 0);
        assert_eq!(surface.advance(&font, "hello", 12.0), 0.0);

        let mut canvas = Canvas::new(&mut surface, 100.0, 100.0);
        canvas.ctext(&font, 50.0, 50.0, 5.0, "hello", "black");
        canvas.text_wrap(&font, 10.0, 90.0, 50.0, 5.0, "a b c", "black");
    }

    #[test]
    fn image_size_reads_dimensions() {
        let mut scene = Scene::new();
        let surface = VelloSurface::new(&mut scene, 100.0, 100.0);
        let pixels = Blob::new(Arc::new(vec![255u8; 4 * 3 * 2]));
        let image = Image::new(pixels, ImageFormat::Rgba8, 3, 2);
        assert_eq!(surface.image_size(&image), (3.0, 2.0));
    }

    #[test]
    fn paints_every_primitive_into_a_scene() {
        let mut scene = Scene::new();
        let mut surface = VelloSurface::new(&mut scene, 640.0, 480.0);
        let mut canvas = Canvas::new(&mut surface, 640.0, 480.0);
        canvas.background("white");
        canvas.square(50.0, 50.0, 20.0, "red");
        canvas.circle(50.0, 50.0, 5.0, "hsv(200,80,90)");
        canvas.wedge(30.0, 30.0, 10.0, 10.0, 80.0, "#336699");
        canvas.stroked_arc(70.0, 70.0, 10.0, 0.0, 270.0, 0.5, "black");
        canvas.grid(0.0, 0.0, 100.0, 100.0, 0.1, 10.0, "rgb(0,0,0,40)");
        canvas.stroked_cube_curve(0.0, 0.0, 30.0, 100.0, 70.0, 0.0, 100.0, 100.0, 0.3, "navy");
        canvas.polygon(&[10.0, 20.0, 15.0], &[10.0, 10.0, 20.0], "green");
    }
}
