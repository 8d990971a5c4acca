//! Display-list surface.
//!
//! Records every operation instead of rasterizing it. Text is measured
//! with a fixed per-character advance, so layouts are reproducible without
//! a font file.

use crate::surface::{Surface, TextRun};
use kurbo::{Affine, BezPath, Circle, Line, Point, Rect, Size};
use pc_core::Color;
use peniko::Fill;

/// One recorded surface call, in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill(Color),
    FillPath {
        path: BezPath,
        rule: Fill,
        color: Color,
    },
    StrokePath {
        path: BezPath,
        width: f64,
        color: Color,
    },
    FillCircle {
        circle: Circle,
        color: Color,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeLine {
        line: Line,
        width: f64,
        color: Color,
    },
    Text {
        text: String,
        origin: Point,
        size: f64,
        rotation: f64,
        color: Color,
    },
    Image {
        size: Size,
        transform: Affine,
    },
}

/// Monospace stand-in font: every character advances `em × size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub em: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { em: 0.6 }
    }
}

/// Surface that keeps a list of [`DrawOp`]s. Images are just their size.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded operations.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Surface for RecordingSurface {
    type Font = FixedAdvance;
    type Image = Size;

    fn fill(&mut self, color: Color) {
        self.ops.push(DrawOp::Fill(color));
    }

    fn fill_path(&mut self, path: &BezPath, rule: Fill, color: Color) {
        self.ops.push(DrawOp::FillPath {
            path: path.clone(),
            rule,
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color) {
        self.ops.push(DrawOp::StrokePath {
            path: path.clone(),
            width,
            color,
        });
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.ops.push(DrawOp::FillCircle { circle, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_line(&mut self, line: Line, width: f64, color: Color) {
        self.ops.push(DrawOp::StrokeLine { line, width, color });
    }

    fn draw_text(&mut self, _font: &FixedAdvance, run: &TextRun<'_>, color: Color) {
        self.ops.push(DrawOp::Text {
            text: run.text.to_string(),
            origin: run.origin,
            size: run.size,
            rotation: run.rotation,
            color,
        });
    }

    fn advance(&self, font: &FixedAdvance, text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * font.em * size
    }

    fn image_size(&self, image: &Size) -> (f64, f64) {
        (image.width, image.height)
    }

    fn draw_image(&mut self, image: &Size, transform: Affine) {
        self.ops.push(DrawOp::Image {
            size: *image,
            transform,
        });
    }
}
