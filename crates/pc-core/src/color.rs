//! Color specification grammar.
//!
//! Resolves a color written as a web color name, `rgb(r,g,b,a)`,
//! `hsv(h,s,v,a)` or `#rrggbbaa` into an 8-bit RGBA value. Resolution is
//! fail-soft: anything unrecognized becomes opaque black.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use winnow::combinator::{alt, delimited};
use winnow::prelude::*;
use winnow::token::take_till;

// ─── Color ───────────────────────────────────────────────────────────────

/// Non-premultiplied RGBA color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Resolve a color specification.
    ///
    /// Tried in order: exact (case-sensitive) color name, `rgb(...)`,
    /// `hsv(...)`, `#...`. Never fails; unrecognized input is opaque black.
    pub fn parse(spec: &str) -> Self {
        if let Some(color) = Self::named(spec) {
            return color;
        }
        let parsed = if spec.starts_with('#') {
            parse_hex(spec)
        } else {
            parse_functional(spec)
        };
        parsed.unwrap_or_else(|| {
            log::debug!("unrecognized color {spec:?}, using black");
            Self::BLACK
        })
    }

    /// Look up a web color name (`"steelblue"`, `"grey"`, ...).
    pub fn named(name: &str) -> Option<Self> {
        NAMED_COLORS
            .binary_search_by(|(n, _)| (*n).cmp(name))
            .ok()
            .map(|i| NAMED_COLORS[i].1)
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";
        let channels: &[u8] = if self.a == 255 {
            &[self.r, self.g, self.b]
        } else {
            &[self.r, self.g, self.b, self.a]
        };
        let mut out = String::with_capacity(1 + channels.len() * 2);
        out.push('#');
        for &c in channels {
            out.push(HEX_CHARS[(c >> 4) as usize] as char);
            out.push(HEX_CHARS[(c & 0xF) as usize] as char);
        }
        out
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<&str> for Color {
    fn from(spec: &str) -> Self {
        Self::parse(spec)
    }
}

impl From<&String> for Color {
    fn from(spec: &String) -> Self {
        Self::parse(spec)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

// ─── HSV ─────────────────────────────────────────────────────────────────

/// Convert hue (degrees), saturation and value (both percentages) to RGB.
///
/// Hue wraps modulo 360. Saturation or value above 100 is out of gamut and
/// yields black.
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> (u8, u8, u8) {
    let s = saturation / 100.0;
    let v = value / 100.0;
    if s > 1.0 || v > 1.0 {
        return (0, 0, 0);
    }

    let h = hue.rem_euclid(360.0);
    let c = v * s;
    let sector = h / 60.0;
    let x = c * (1.0 - (sector % 2.0 - 1.0).abs());

    let (r, g, b) = match sector {
        t if (0.0..=1.0).contains(&t) => (c, x, 0.0),
        t if t <= 2.0 => (x, c, 0.0),
        t if t <= 3.0 => (0.0, c, x),
        t if t <= 4.0 => (0.0, x, c),
        t if t <= 5.0 => (x, 0.0, c),
        t if t <= 6.0 => (c, 0.0, x),
        _ => return (0, 0, 0),
    };

    let m = v - c;
    (
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}

// ─── Parsers ─────────────────────────────────────────────────────────────

/// Parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// `#rr`, `#rrgg`, `#rrggbb`, `#rrggbbaa`.
fn parse_hex(spec: &str) -> Option<Color> {
    let digits = spec.strip_prefix('#')?.as_bytes();
    if !matches!(digits.len(), 2 | 4 | 6 | 8) {
        return None;
    }
    let mut rgba = [0, 0, 0, 255];
    for (slot, pair) in rgba.iter_mut().zip(digits.chunks_exact(2)) {
        *slot = match (hex_val(pair[0]), hex_val(pair[1])) {
            (Some(hi), Some(lo)) => hi << 4 | lo,
            _ => 0,
        };
    }
    Some(rgba.into())
}

/// `rgb(...)` / `hsv(...)` → (function name, raw argument list).
fn parse_function_call<'a>(input: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    (
        alt(("rgb", "hsv")),
        delimited('(', take_till(1.., ')'), ')'),
    )
        .parse_next(input)
}

fn parse_functional(spec: &str) -> Option<Color> {
    let (name, args) = parse_function_call.parse(spec).ok()?;
    let parts: SmallVec<[&str; 4]> = args.split(',').collect();
    match name {
        "rgb" => rgb_components(&parts),
        _ => hsv_components(&parts),
    }
}

/// 1–4 components; missing color channels are 0, missing alpha is 255.
fn rgb_components(parts: &[&str]) -> Option<Color> {
    if parts.len() > 4 {
        return None;
    }
    let mut rgba = [0, 0, 0, 255];
    for (slot, part) in rgba.iter_mut().zip(parts) {
        *slot = byte_channel(part);
    }
    Some(rgba.into())
}

/// Hue, saturation, value and an optional alpha percentage.
fn hsv_components(parts: &[&str]) -> Option<Color> {
    let [h, s, v, rest @ ..] = parts else {
        return None;
    };
    if rest.len() > 1 {
        return None;
    }
    let (r, g, b) = hsv_to_rgb(number(h), number(s), number(v));
    let a = rest.first().map_or(255, |p| {
        let pct = number(p).clamp(0.0, 100.0);
        (pct / 100.0 * 255.0) as u8
    });
    Some(Color::rgba(r, g, b, a))
}

/// Integer channel clamped into 0..=255; unparseable input is 0.
fn byte_channel(part: &str) -> u8 {
    part.parse::<i64>().map_or(0, |v| v.clamp(0, 255) as u8)
}

fn number(part: &str) -> f64 {
    part.parse::<f64>().unwrap_or(0.0)
}

// ─── Named colors ────────────────────────────────────────────────────────

/// SVG/CSS color keywords, sorted by name for binary search.
static NAMED_COLORS: &[(&str, Color)] = &[
    ("aliceblue", Color::rgb(240, 248, 255)),
    ("antiquewhite", Color::rgb(250, 235, 215)),
    ("aqua", Color::rgb(0, 255, 255)),
    ("aquamarine", Color::rgb(127, 255, 212)),
    ("azure", Color::rgb(240, 255, 255)),
    ("beige", Color::rgb(245, 245, 220)),
    ("bisque", Color::rgb(255, 228, 196)),
    ("black", Color::rgb(0, 0, 0)),
    ("blanchedalmond", Color::rgb(255, 235, 205)),
    ("blue", Color::rgb(0, 0, 255)),
    ("blueviolet", Color::rgb(138, 43, 226)),
    ("brown", Color::rgb(165, 42, 42)),
    ("burlywood", Color::rgb(222, 184, 135)),
    ("cadetblue", Color::rgb(95, 158, 160)),
    ("chartreuse", Color::rgb(127, 255, 0)),
    ("chocolate", Color::rgb(210, 105, 30)),
    ("coral", Color::rgb(255, 127, 80)),
    ("cornflowerblue", Color::rgb(100, 149, 237)),
    ("cornsilk", Color::rgb(255, 248, 220)),
    ("crimson", Color::rgb(220, 20, 60)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("darkblue", Color::rgb(0, 0, 139)),
    ("darkcyan", Color::rgb(0, 139, 139)),
    ("darkgoldenrod", Color::rgb(184, 134, 11)),
    ("darkgray", Color::rgb(169, 169, 169)),
    ("darkgreen", Color::rgb(0, 100, 0)),
    ("darkgrey", Color::rgb(169, 169, 169)),
    ("darkkhaki", Color::rgb(189, 183, 107)),
    ("darkmagenta", Color::rgb(139, 0, 139)),
    ("darkolivegreen", Color::rgb(85, 107, 47)),
    ("darkorange", Color::rgb(255, 140, 0)),
    ("darkorchid", Color::rgb(153, 50, 204)),
    ("darkred", Color::rgb(139, 0, 0)),
    ("darksalmon", Color::rgb(233, 150, 122)),
    ("darkseagreen", Color::rgb(143, 188, 143)),
    ("darkslateblue", Color::rgb(72, 61, 139)),
    ("darkslategray", Color::rgb(47, 79, 79)),
    ("darkslategrey", Color::rgb(47, 79, 79)),
    ("darkturquoise", Color::rgb(0, 206, 209)),
    ("darkviolet", Color::rgb(148, 0, 211)),
    ("deeppink", Color::rgb(255, 20, 147)),
    ("deepskyblue", Color::rgb(0, 191, 255)),
    ("dimgray", Color::rgb(105, 105, 105)),
    ("dimgrey", Color::rgb(105, 105, 105)),
    ("dodgerblue", Color::rgb(30, 144, 255)),
    ("firebrick", Color::rgb(178, 34, 34)),
    ("floralwhite", Color::rgb(255, 250, 240)),
    ("forestgreen", Color::rgb(34, 139, 34)),
    ("fuchsia", Color::rgb(255, 0, 255)),
    ("gainsboro", Color::rgb(220, 220, 220)),
    ("ghostwhite", Color::rgb(248, 248, 255)),
    ("gold", Color::rgb(255, 215, 0)),
    ("goldenrod", Color::rgb(218, 165, 32)),
    ("gray", Color::rgb(128, 128, 128)),
    ("green", Color::rgb(0, 128, 0)),
    ("greenyellow", Color::rgb(173, 255, 47)),
    ("grey", Color::rgb(128, 128, 128)),
    ("honeydew", Color::rgb(240, 255, 240)),
    ("hotpink", Color::rgb(255, 105, 180)),
    ("indianred", Color::rgb(205, 92, 92)),
    ("indigo", Color::rgb(75, 0, 130)),
    ("ivory", Color::rgb(255, 255, 240)),
    ("khaki", Color::rgb(240, 230, 140)),
    ("lavender", Color::rgb(230, 230, 250)),
    ("lavenderblush", Color::rgb(255, 240, 245)),
    ("lawngreen", Color::rgb(124, 252, 0)),
    ("lemonchiffon", Color::rgb(255, 250, 205)),
    ("lightblue", Color::rgb(173, 216, 230)),
    ("lightcoral", Color::rgb(240, 128, 128)),
    ("lightcyan", Color::rgb(224, 255, 255)),
    ("lightgoldenrodyellow", Color::rgb(250, 250, 210)),
    ("lightgray", Color::rgb(211, 211, 211)),
    ("lightgreen", Color::rgb(144, 238, 144)),
    ("lightgrey", Color::rgb(211, 211, 211)),
    ("lightpink", Color::rgb(255, 182, 193)),
    ("lightsalmon", Color::rgb(255, 160, 122)),
    ("lightseagreen", Color::rgb(32, 178, 170)),
    ("lightskyblue", Color::rgb(135, 206, 250)),
    ("lightslategray", Color::rgb(119, 136, 153)),
    ("lightslategrey", Color::rgb(119, 136, 153)),
    ("lightsteelblue", Color::rgb(176, 196, 222)),
    ("lightyellow", Color::rgb(255, 255, 224)),
    ("lime", Color::rgb(0, 255, 0)),
    ("limegreen", Color::rgb(50, 205, 50)),
    ("linen", Color::rgb(250, 240, 230)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("mediumaquamarine", Color::rgb(102, 205, 170)),
    ("mediumblue", Color::rgb(0, 0, 205)),
    ("mediumorchid", Color::rgb(186, 85, 211)),
    ("mediumpurple", Color::rgb(147, 112, 219)),
    ("mediumseagreen", Color::rgb(60, 179, 113)),
    ("mediumslateblue", Color::rgb(123, 104, 238)),
    ("mediumspringgreen", Color::rgb(0, 250, 154)),
    ("mediumturquoise", Color::rgb(72, 209, 204)),
    ("mediumvioletred", Color::rgb(199, 21, 133)),
    ("midnightblue", Color::rgb(25, 25, 112)),
    ("mintcream", Color::rgb(245, 255, 250)),
    ("mistyrose", Color::rgb(255, 228, 225)),
    ("moccasin", Color::rgb(255, 228, 181)),
    ("navajowhite", Color::rgb(255, 222, 173)),
    ("navy", Color::rgb(0, 0, 128)),
    ("oldlace", Color::rgb(253, 245, 230)),
    ("olive", Color::rgb(128, 128, 0)),
    ("olivedrab", Color::rgb(107, 142, 35)),
    ("orange", Color::rgb(255, 165, 0)),
    ("orangered", Color::rgb(255, 69, 0)),
    ("orchid", Color::rgb(218, 112, 214)),
    ("palegoldenrod", Color::rgb(238, 232, 170)),
    ("palegreen", Color::rgb(152, 251, 152)),
    ("paleturquoise", Color::rgb(175, 238, 238)),
    ("palevioletred", Color::rgb(219, 112, 147)),
    ("papayawhip", Color::rgb(255, 239, 213)),
    ("peachpuff", Color::rgb(255, 218, 185)),
    ("peru", Color::rgb(205, 133, 63)),
    ("pink", Color::rgb(255, 192, 203)),
    ("plum", Color::rgb(221, 160, 221)),
    ("powderblue", Color::rgb(176, 224, 230)),
    ("purple", Color::rgb(128, 0, 128)),
    ("red", Color::rgb(255, 0, 0)),
    ("rosybrown", Color::rgb(188, 143, 143)),
    ("royalblue", Color::rgb(65, 105, 225)),
    ("saddlebrown", Color::rgb(139, 69, 19)),
    ("salmon", Color::rgb(250, 128, 114)),
    ("sandybrown", Color::rgb(244, 164, 96)),
    ("seagreen", Color::rgb(46, 139, 87)),
    ("seashell", Color::rgb(255, 245, 238)),
    ("sienna", Color::rgb(160, 82, 45)),
    ("silver", Color::rgb(192, 192, 192)),
    ("skyblue", Color::rgb(135, 206, 235)),
    ("slateblue", Color::rgb(106, 90, 205)),
    ("slategray", Color::rgb(112, 128, 144)),
    ("slategrey", Color::rgb(112, 128, 144)),
    ("snow", Color::rgb(255, 250, 250)),
    ("springgreen", Color::rgb(0, 255, 127)),
    ("steelblue", Color::rgb(70, 130, 180)),
    ("tan", Color::rgb(210, 180, 140)),
    ("teal", Color::rgb(0, 128, 128)),
    ("thistle", Color::rgb(216, 191, 216)),
    ("tomato", Color::rgb(255, 99, 71)),
    ("turquoise", Color::rgb(64, 224, 208)),
    ("violet", Color::rgb(238, 130, 238)),
    ("wheat", Color::rgb(245, 222, 179)),
    ("white", Color::rgb(255, 255, 255)),
    ("whitesmoke", Color::rgb(245, 245, 245)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("yellowgreen", Color::rgb(154, 205, 50)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn named_colors_resolve() {
        assert_eq!(Color::parse("red"), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("steelblue"), Color::rgb(70, 130, 180));
        assert_eq!(Color::parse("grey"), Color::parse("gray"));
    }

    #[test]
    fn named_lookup_is_case_sensitive() {
        assert_eq!(Color::named("Red"), None);
        assert_eq!(Color::parse("RED"), Color::BLACK);
    }

    #[test]
    fn named_table_is_sorted_and_unique() {
        for pair in NAMED_COLORS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} !< {}", pair[0].0, pair[1].0);
        }
        assert_eq!(NAMED_COLORS.len(), 147);
        for (name, color) in NAMED_COLORS {
            assert_eq!(Color::named(name), Some(*color));
        }
    }

    #[test]
    fn rgb_forms() {
        assert_eq!(Color::parse("rgb(10,20,30)"), Color::rgba(10, 20, 30, 255));
        assert_eq!(Color::parse("rgb(10,20,30,128)").a, 128);
        assert_eq!(Color::parse("rgb(10)"), Color::rgba(10, 0, 0, 255));
        assert_eq!(Color::parse("rgb(10,20)"), Color::rgba(10, 20, 0, 255));
    }

    #[test]
    fn padded_components_do_not_parse() {
        assert_eq!(Color::parse("rgb(10, 20, 30)"), Color::rgb(10, 0, 0));
        assert_eq!(Color::parse("rgb( 10,20,30)"), Color::rgb(0, 20, 30));
        assert_eq!(Color::parse("hsv(0, 100, 100)"), Color::BLACK);
    }

    #[test]
    fn rgb_rejects_too_many_components() {
        assert_eq!(Color::parse("rgb(1,2,3,4,5)"), Color::BLACK);
        assert_eq!(Color::parse("rgb()"), Color::BLACK);
        assert_eq!(Color::parse("rgb(1,2,3"), Color::BLACK);
        assert_eq!(Color::parse("rgb(1,2,3)x"), Color::BLACK);
    }

    #[test]
    fn rgb_out_of_range_clamps() {
        assert_eq!(Color::parse("rgb(300,-5,255)"), Color::rgb(255, 0, 255));
    }

    #[test]
    fn rgb_bad_component_is_zero() {
        assert_eq!(Color::parse("rgb(abc,20,30)"), Color::rgb(0, 20, 30));
    }

    #[test]
    fn hex_forms() {
        assert_eq!(Color::parse("#ff0000"), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("#ff"), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("#ff80"), Color::rgb(255, 128, 0));
        assert_eq!(Color::parse("#11223344"), Color::rgba(0x11, 0x22, 0x33, 0x44));
        assert_eq!(Color::parse("#AbCdEf"), Color::rgb(0xAB, 0xCD, 0xEF));
    }

    #[test]
    fn hex_invalid_lengths_are_black() {
        assert_eq!(Color::parse("#f"), Color::BLACK);
        assert_eq!(Color::parse("#fff"), Color::BLACK);
        assert_eq!(Color::parse("#"), Color::BLACK);
        assert_eq!(Color::parse("#1234567890"), Color::BLACK);
    }

    #[test]
    fn hex_bad_digits_zero_the_channel() {
        assert_eq!(Color::parse("#zz8000"), Color::rgb(0, 128, 0));
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(Color::parse("hsv(0,100,100)"), Color::rgb(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 100.0, 100.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 100.0, 100.0), (0, 0, 255));
        assert_eq!(hsv_to_rgb(360.0, 100.0, 100.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(480.0, 100.0, 100.0), (0, 255, 0));
    }

    #[test]
    fn hsv_greys_and_secondaries() {
        assert_eq!(hsv_to_rgb(0.0, 0.0, 100.0), (255, 255, 255));
        assert_eq!(hsv_to_rgb(0.0, 0.0, 0.0), (0, 0, 0));
        assert_eq!(hsv_to_rgb(60.0, 100.0, 100.0), (255, 255, 0));
        assert_eq!(hsv_to_rgb(180.0, 100.0, 100.0), (0, 255, 255));
        assert_eq!(hsv_to_rgb(300.0, 100.0, 100.0), (255, 0, 255));
    }

    #[test]
    fn hsv_out_of_gamut_is_black() {
        assert_eq!(hsv_to_rgb(0.0, 101.0, 100.0), (0, 0, 0));
        assert_eq!(Color::parse("hsv(0,100,150)"), Color::BLACK);
    }

    #[test]
    fn hsv_alpha_percentage() {
        assert_eq!(Color::parse("hsv(0,100,100,50)"), Color::rgba(255, 0, 0, 127));
        assert_eq!(Color::parse("hsv(0,100,100,250)").a, 255);
        assert_eq!(Color::parse("hsv(0,100)"), Color::BLACK);
        assert_eq!(Color::parse("hsv(0,100,100,50,1)"), Color::BLACK);
    }

    #[test]
    fn garbage_is_black() {
        assert_eq!(Color::parse("not-a-color"), Color::rgba(0, 0, 0, 255));
        assert_eq!(Color::parse(""), Color::BLACK);
        assert_eq!(Color::parse("#ÿÿ"), Color::rgb(0, 0, 0));
    }

    #[test]
    fn hex_output() {
        assert_eq!(Color::rgb(0x6C, 0x5C, 0xE7).to_hex(), "#6C5CE7");
        assert_eq!(Color::rgba(255, 0, 0, 0x80).to_hex(), "#FF000080");
        assert_eq!(Color::parse("#6C5CE7").to_string(), "#6C5CE7");
    }

    #[test]
    fn conversions() {
        assert_eq!(Color::from("white"), Color::WHITE);
        assert_eq!(Color::from([1, 2, 3, 4]), Color::rgba(1, 2, 3, 4));
        assert_eq!(Color::from((1, 2, 3)), Color::rgb(1, 2, 3));
        assert_eq!(Color::WHITE.with_alpha(0), Color::rgba(255, 255, 255, 0));
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_string(&Color::rgba(1, 2, 3, 4)).unwrap();
        assert_eq!(json, r#"{"r":1,"g":2,"b":3,"a":4}"#);
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgba(1, 2, 3, 4));
    }
}
