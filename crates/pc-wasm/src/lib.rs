//! WASM bridge for Percent Canvas: exposes the drawing API to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. Colors cross the boundary
//! as strings (`"red"`, `"#336699"`, `"hsv(200,80,90)"`), coordinates as
//! percentages, polygon points as two `Float64Array`s.

mod render2d;

pub use render2d::{CssFont, WebSurface};

use pc_core::Color;
use pc_render::Canvas;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// A percentage-coordinate canvas bound to a 2D context.
///
/// Every call draws immediately; nothing is retained between calls.
#[wasm_bindgen]
pub struct PcCanvas {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    font: CssFont,
}

#[wasm_bindgen]
impl PcCanvas {
    /// Wrap a 2D context of `width`×`height` pixels.
    #[wasm_bindgen(constructor)]
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();
        Self {
            ctx,
            width,
            height,
            font: CssFont::default(),
        }
    }

    /// Take the 2D context of a `<canvas>`, sized to its pixel dimensions.
    pub fn from_element(canvas: &HtmlCanvasElement) -> Result<PcCanvas, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self::new(ctx, canvas.width() as f64, canvas.height() as f64))
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// CSS font family used by the text calls.
    pub fn set_font(&mut self, family: &str) {
        self.font = CssFont {
            family: family.to_string(),
        };
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.height
    }

    // ─── Utility ─────────────────────────────────────────────────────────

    pub fn background(&self, color: &str) {
        self.draw(|c, _| c.background(color));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn grid(&self, x: f64, y: f64, w: f64, h: f64, size: f64, interval: f64, color: &str) {
        self.draw(|c, _| c.grid(x, y, w, h, size, interval, color));
    }

    /// `[x, y]` at `degrees` counter-clockwise and distance `r` from
    /// `(cx, cy)`.
    pub fn polar(&self, cx: f64, cy: f64, r: f64, degrees: f64) -> Vec<f64> {
        let viewport = pc_core::Viewport::new(self.width, self.height);
        let (x, y) = viewport.polar_degrees(cx, cy, r, degrees);
        vec![x, y]
    }

    pub fn coord(&self, x: f64, y: f64, size: f64, label: &str, color: &str) {
        self.draw(|c, font| c.coord(font, x, y, size, label, color));
    }

    // ─── Shapes ──────────────────────────────────────────────────────────

    pub fn circle(&self, cx: f64, cy: f64, r: f64, color: &str) {
        self.draw(|c, _| c.circle(cx, cy, r, color));
    }

    pub fn arc(&self, cx: f64, cy: f64, r: f64, a1: f64, a2: f64, color: &str) {
        self.draw(|c, _| c.arc(cx, cy, r, a1, a2, color));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stroked_arc(&self, cx: f64, cy: f64, r: f64, a1: f64, a2: f64, size: f64, color: &str) {
        self.draw(|c, _| c.stroked_arc(cx, cy, r, a1, a2, size, color));
    }

    pub fn wedge(&self, cx: f64, cy: f64, r: f64, a1: f64, a2: f64, color: &str) {
        self.draw(|c, _| c.wedge(cx, cy, r, a1, a2, color));
    }

    pub fn center_rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.draw(|c, _| c.center_rect(x, y, w, h, color));
    }

    pub fn corner_rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.draw(|c, _| c.corner_rect(x, y, w, h, color));
    }

    pub fn rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.draw(|c, _| c.rect(x, y, w, h, color));
    }

    pub fn square(&self, x: f64, y: f64, w: f64, color: &str) {
        self.draw(|c, _| c.square(x, y, w, color));
    }

    // ─── Lines and polygons ──────────────────────────────────────────────

    pub fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64, size: f64, color: &str) {
        self.draw(|c, _| c.line(x1, y1, x2, y2, size, color));
    }

    pub fn hline(&self, x: f64, y: f64, size: f64, sw: f64, color: &str) {
        self.draw(|c, _| c.hline(x, y, size, sw, color));
    }

    pub fn vline(&self, x: f64, y: f64, size: f64, sw: f64, color: &str) {
        self.draw(|c, _| c.vline(x, y, size, sw, color));
    }

    pub fn polygon(&self, xs: &[f64], ys: &[f64], color: &str) {
        self.draw(|c, _| c.polygon(xs, ys, color));
    }

    pub fn stroked_polygon(&self, xs: &[f64], ys: &[f64], size: f64, color: &str) {
        self.draw(|c, _| c.stroked_polygon(xs, ys, size, color));
    }

    // ─── Curves ──────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn quad_curve(&self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64, color: &str) {
        self.draw(|c, _| c.quad_curve(x1, y1, x2, y2, x3, y3, color));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stroked_quad_curve(
        &self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        size: f64,
        color: &str,
    ) {
        self.draw(|c, _| c.stroked_quad_curve(x1, y1, x2, y2, x3, y3, size, color));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn cube_curve(
        &self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        x4: f64,
        y4: f64,
        color: &str,
    ) {
        self.draw(|c, _| c.cube_curve(x1, y1, x2, y2, x3, y3, x4, y4, color));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stroked_cube_curve(
        &self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        x4: f64,
        y4: f64,
        size: f64,
        color: &str,
    ) {
        self.draw(|c, _| c.stroked_cube_curve(x1, y1, x2, y2, x3, y3, x4, y4, size, color));
    }

    // ─── Text ────────────────────────────────────────────────────────────

    pub fn text(&self, x: f64, y: f64, size: f64, s: &str, color: &str) {
        self.draw(|c, font| c.text(font, x, y, size, s, color));
    }

    pub fn ctext(&self, x: f64, y: f64, size: f64, s: &str, color: &str) {
        self.draw(|c, font| c.ctext(font, x, y, size, s, color));
    }

    pub fn etext(&self, x: f64, y: f64, size: f64, s: &str, color: &str) {
        self.draw(|c, font| c.etext(font, x, y, size, s, color));
    }

    pub fn rtext(&self, x: f64, y: f64, angle: f64, size: f64, s: &str, color: &str) {
        self.draw(|c, font| c.rtext(font, x, y, angle, size, s, color));
    }

    pub fn text_wrap(&self, x: f64, y: f64, w: f64, size: f64, s: &str, color: &str) {
        self.draw(|c, font| c.text_wrap(font, x, y, w, size, s, color));
    }

    pub fn text_wrap_strict(&self, x: f64, y: f64, w: f64, size: f64, s: &str, color: &str) {
        self.draw(|c, font| c.text_wrap_strict(font, x, y, w, size, s, color));
    }

    // ─── Images ──────────────────────────────────────────────────────────

    pub fn center_image(&self, x: f64, y: f64, scale: f64, image: &HtmlImageElement) {
        self.draw(|c, _| c.center_image(x, y, scale, image));
    }

    pub fn corner_image(&self, x: f64, y: f64, scale: f64, image: &HtmlImageElement) {
        self.draw(|c, _| c.corner_image(x, y, scale, image));
    }
}

impl PcCanvas {
    fn draw(&self, f: impl FnOnce(&mut Canvas<'_, WebSurface<'_>>, &CssFont)) {
        let mut surface = WebSurface::new(&self.ctx, self.width, self.height);
        let mut canvas = Canvas::new(&mut surface, self.width, self.height);
        f(&mut canvas, &self.font);
    }
}

/// Set up a panic hook that logs to the browser console.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("pc-wasm panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone color functions (no canvas needed) ───────────────────────

/// Parse a color string into `[r, g, b, a]`. Unrecognized input is black.
#[wasm_bindgen]
pub fn parse_color(spec: &str) -> Vec<u8> {
    let c = Color::parse(spec);
    vec![c.r, c.g, c.b, c.a]
}

/// Normalize a color string to CSS hex (`#RRGGBB` or `#RRGGBBAA`).
#[wasm_bindgen]
pub fn css_color(spec: &str) -> String {
    Color::parse(spec).to_hex()
}
