//! Percentage ↔ pixel geometry.
//!
//! The drawing plane is 0–100 on each axis with the origin at the bottom
//! left; pixel surfaces put the origin at the top left. Every conversion
//! from one to the other goes through [`to_pixel`].

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Map `value` from `[low_in, high_in]` onto `[low_out, high_out]`.
///
/// No clamping. `low_in == high_in` divides by zero.
pub fn map_range(value: f64, low_in: f64, high_in: f64, low_out: f64, high_out: f64) -> f64 {
    low_out + (high_out - low_out) * (value - low_in) / (high_in - low_in)
}

/// `p` percent of `extent`.
pub fn percent_of(p: f64, extent: f64) -> f64 {
    p / 100.0 * extent
}

/// Percentage point → pixel point (y flipped).
pub fn to_pixel(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    (percent_of(x, width), percent_of(100.0 - y, height))
}

/// Pixel point → percentage point. Inverse of [`to_pixel`].
pub fn from_pixel(px: f64, py: f64, width: f64, height: f64) -> (f64, f64) {
    (px / width * 100.0, 100.0 - py / height * 100.0)
}

/// Polar → Cartesian in percentage space, `theta` in radians.
///
/// The y displacement is scaled by `width / height` so that a locus of
/// constant `r` renders as a circle on a non-square surface.
pub fn polar(cx: f64, cy: f64, r: f64, theta: f64, width: f64, height: f64) -> (f64, f64) {
    let aspect = width / height;
    (cx + r * theta.cos(), cy + r * aspect * theta.sin())
}

/// [`polar`] with `degrees` measured counter-clockwise from the +x axis.
pub fn polar_degrees(cx: f64, cy: f64, r: f64, degrees: f64, width: f64, height: f64) -> (f64, f64) {
    polar(cx, cy, r, degrees.to_radians(), width, height)
}

/// Counter-clockwise degrees → the pixel-space (y-down) arc angle.
///
/// `0` stays at +x and `90` lands straight up on screen.
pub fn arc_radians(degrees: f64) -> f64 {
    (360.0 - degrees) * (PI / 180.0)
}

/// Counter-clockwise sweep from `a1` to `a2`, in degrees within `[0, 360]`.
///
/// `0 → 360` and anything longer is a full turn; `300 → 60` crosses zero
/// and sweeps 120.
pub fn sweep_degrees(a1: f64, a2: f64) -> f64 {
    let sweep = a2 - a1;
    if sweep >= 360.0 {
        360.0
    } else if sweep >= 0.0 {
        sweep
    } else {
        sweep.rem_euclid(360.0)
    }
}

// ─── Viewport ────────────────────────────────────────────────────────────

/// Pixel extent of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("viewport {width}x{height} is not positive; output will be degenerate");
        }
        Self { width, height }
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        to_pixel(x, y, self.width, self.height)
    }

    pub fn from_pixel(&self, px: f64, py: f64) -> (f64, f64) {
        from_pixel(px, py, self.width, self.height)
    }

    /// Horizontal measure: `p` percent of the width.
    pub fn scale_x(&self, p: f64) -> f64 {
        percent_of(p, self.width)
    }

    /// Vertical measure: `p` percent of the height.
    pub fn scale_y(&self, p: f64) -> f64 {
        percent_of(p, self.height)
    }

    pub fn polar(&self, cx: f64, cy: f64, r: f64, theta: f64) -> (f64, f64) {
        polar(cx, cy, r, theta, self.width, self.height)
    }

    pub fn polar_degrees(&self, cx: f64, cy: f64, r: f64, degrees: f64) -> (f64, f64) {
        polar_degrees(cx, cy, r, degrees, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < EPS && (a.1 - b.1).abs() < EPS
    }

    #[test]
    fn map_range_interpolates() {
        assert_eq!(map_range(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
        assert_eq!(map_range(0.0, 0.0, 10.0, 100.0, 200.0), 100.0);
        assert_eq!(map_range(20.0, 0.0, 10.0, 0.0, 1.0), 2.0);
        assert_eq!(map_range(2.5, 0.0, 10.0, 100.0, 0.0), 75.0);
    }

    #[test]
    fn percent_of_extent() {
        assert_eq!(percent_of(50.0, 800.0), 400.0);
        assert_eq!(percent_of(0.0, 800.0), 0.0);
        assert_eq!(percent_of(150.0, 10.0), 15.0);
    }

    #[test]
    fn to_pixel_flips_y() {
        assert_eq!(to_pixel(0.0, 0.0, 800.0, 600.0), (0.0, 600.0));
        assert_eq!(to_pixel(100.0, 100.0, 800.0, 600.0), (800.0, 0.0));
        assert_eq!(to_pixel(50.0, 50.0, 800.0, 600.0), (400.0, 300.0));
    }

    #[test]
    fn pixel_roundtrip_recovers_percentages() {
        let vp = Viewport::new(1280.0, 720.0);
        for x in (0..=100).step_by(5) {
            for y in (0..=100).step_by(5) {
                let (x, y) = (x as f64, y as f64);
                let (px, py) = vp.to_pixel(x, y);
                assert!(close(vp.from_pixel(px, py), (x, y)), "({x},{y})");
            }
        }
    }

    #[test]
    fn polar_zero_is_right_of_center() {
        let (x, y) = polar_degrees(50.0, 50.0, 10.0, 0.0, 1600.0, 800.0);
        assert!(close((x, y), (60.0, 50.0)));
    }

    #[test]
    fn polar_ninety_is_up_and_aspect_scaled() {
        let (x, y) = polar_degrees(50.0, 50.0, 10.0, 90.0, 1600.0, 800.0);
        assert!(close((x, y), (50.0, 70.0)), "got ({x},{y})");
    }

    #[test]
    fn polar_locus_is_circular_in_pixels() {
        let vp = Viewport::new(1600.0, 800.0);
        let center = vp.to_pixel(50.0, 50.0);
        for deg in (0..360).step_by(15) {
            let (x, y) = vp.polar_degrees(50.0, 50.0, 10.0, deg as f64);
            let (px, py) = vp.to_pixel(x, y);
            let dist = ((px - center.0).powi(2) + (py - center.1).powi(2)).sqrt();
            assert!((dist - vp.scale_x(10.0)).abs() < 1e-6, "{deg}: {dist}");
        }
    }

    #[test]
    fn arc_angles_are_mirrored() {
        assert!((arc_radians(0.0) - 2.0 * PI).abs() < EPS);
        assert!((arc_radians(90.0) - 1.5 * PI).abs() < EPS);
        assert!((arc_radians(360.0)).abs() < EPS);
        // y-down: sin(1.5π) = -1, i.e. up on screen
        assert!((arc_radians(90.0).sin() + 1.0).abs() < EPS);
    }

    #[test]
    fn sweep_wraps_through_zero() {
        assert_eq!(sweep_degrees(0.0, 90.0), 90.0);
        assert_eq!(sweep_degrees(0.0, 360.0), 360.0);
        assert_eq!(sweep_degrees(300.0, 60.0), 120.0);
        assert_eq!(sweep_degrees(45.0, 45.0), 0.0);
    }

    #[test]
    fn sweep_of_a_turn_or_more_is_capped() {
        assert_eq!(sweep_degrees(0.0, 720.0), 360.0);
        assert_eq!(sweep_degrees(0.0, 360.0000001), 360.0);
        assert_eq!(sweep_degrees(90.0, 90.0 + 360.0 * 3.0), 360.0);
    }

    #[test]
    fn viewport_measures() {
        let vp = Viewport::default();
        assert_eq!(vp.aspect(), 1.0);
        assert_eq!(vp.scale_x(20.0), 200.0);
        assert_eq!(Viewport::new(400.0, 200.0).scale_y(50.0), 100.0);
    }
}
