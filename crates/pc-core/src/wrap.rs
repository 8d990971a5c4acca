//! Greedy word wrap.
//!
//! Splits text on whitespace and places words left to right, dropping to
//! a new line when the cursor runs past the wrap edge. One pass, no
//! backtracking, no hyphenation: a word is never split.
//!
//! Units are whatever the measurement function returns (pixels, in
//! practice); `y` grows downward.

/// Tuning knobs for [`wrap_words`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrapConfig {
    /// Line advance as a multiple of the font size. Default: **1.2**.
    pub leading: f64,

    /// Gap between words as a fraction of the spacing glyph's advance.
    /// Default: **0.3**.
    pub word_spacing: f64,

    /// Glyph whose advance sets the word gap. Default: **`"M"`**.
    pub spacing_glyph: &'static str,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            leading: 1.2,
            word_spacing: 0.3,
            spacing_glyph: "M",
        }
    }
}

/// When a line break is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Place the word, then break once the cursor reaches the edge.
    /// The word that crosses the edge stays on its line.
    #[default]
    Loose,
    /// Break before a word that would cross the edge, unless it is the
    /// first word on the line.
    Strict,
}

/// One word and the top-left of where it goes.
#[derive(Debug, Clone, PartialEq)]
pub struct WordPlacement<'a> {
    pub word: &'a str,
    pub x: f64,
    pub y: f64,
    /// Zero-based line index.
    pub line: usize,
}

/// Space, tab and newline separate words; nothing else does.
pub fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// Non-empty words of `text`.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|w| !w.is_empty())
}

/// Lay out `text` starting at `(left, top)` within `width`.
///
/// `size` is the font size in the same units as `measure`, which returns
/// the advance of a string at that size.
#[allow(clippy::too_many_arguments)]
pub fn wrap_words<'a>(
    text: &'a str,
    left: f64,
    top: f64,
    width: f64,
    size: f64,
    mode: WrapMode,
    config: &WrapConfig,
    measure: impl Fn(&str) -> f64,
) -> Vec<WordPlacement<'a>> {
    let leading = size * config.leading;
    let gap = measure(config.spacing_glyph) * config.word_spacing;
    let edge = left + width;

    let mut placements = Vec::new();
    let mut x = left;
    let mut y = top;
    let mut line = 0;

    for word in words(text) {
        let advance = measure(word);

        if mode == WrapMode::Strict && x > left && x + advance > edge {
            x = left;
            y += leading;
            line += 1;
        }

        placements.push(WordPlacement { word, x, y, line });
        x += advance + gap;

        if mode == WrapMode::Loose && x >= edge {
            x = left;
            y += leading;
            line += 1;
        }
    }

    placements
}

/// Number of lines a layout occupies.
pub fn line_count(placements: &[WordPlacement<'_>]) -> usize {
    placements.last().map_or(0, |p| p.line + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Every char advances 10 units.
    fn mono(s: &str) -> f64 {
        s.chars().count() as f64 * 10.0
    }

    fn layout<'a>(text: &'a str, width: f64, mode: WrapMode) -> Vec<WordPlacement<'a>> {
        wrap_words(text, 0.0, 0.0, width, 10.0, mode, &WrapConfig::default(), mono)
    }

    #[test]
    fn tokenizes_on_space_tab_newline() {
        let got: Vec<&str> = words("  one\ttwo\n\nthree  ").collect();
        assert_eq!(got, vec!["one", "two", "three"]);
    }

    #[test]
    fn empty_and_blank_text_place_nothing() {
        assert!(layout("", 100.0, WrapMode::Loose).is_empty());
        assert!(layout(" \t\n ", 100.0, WrapMode::Strict).is_empty());
        assert_eq!(line_count(&[]), 0);
    }

    #[test]
    fn fitting_words_stay_on_one_line() {
        for mode in [WrapMode::Loose, WrapMode::Strict] {
            let placed = layout("aa bb cc", 1000.0, mode);
            assert_eq!(line_count(&placed), 1);
            // gap = 10 * 0.3 = 3
            let xs: Vec<f64> = placed.iter().map(|p| p.x).collect();
            assert_eq!(xs, vec![0.0, 23.0, 46.0]);
        }
    }

    #[test]
    fn loose_breaks_after_crossing_the_edge() {
        // "aaaa" reaches 43 >= 40, so "bb" starts line 1
        let placed = layout("aaaa bb cc", 40.0, WrapMode::Loose);
        assert_eq!(placed[0].line, 0);
        assert_eq!((placed[1].x, placed[1].line), (0.0, 1));
        assert_eq!(placed[1].y, 12.0);
    }

    #[test]
    fn loose_lets_a_word_overflow() {
        // "bbbb" starts at 23 and ends at 63, past the 30 edge
        let placed = layout("aa bbbb cc", 30.0, WrapMode::Loose);
        assert_eq!((placed[1].x, placed[1].line), (23.0, 0));
        assert_eq!((placed[2].x, placed[2].line), (0.0, 1));
    }

    #[test]
    fn strict_breaks_before_an_overflowing_word() {
        let placed = layout("aa bbbb cc", 30.0, WrapMode::Strict);
        assert_eq!((placed[1].x, placed[1].line), (0.0, 1));
        assert_eq!(placed[1].y, 12.0);
        assert!(placed.iter().all(|p| p.x + mono(p.word) <= 40.0 + 1e-9));
    }

    #[test]
    fn strict_places_a_word_wider_than_the_wrap() {
        let placed = layout("extraordinary", 20.0, WrapMode::Strict);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].word, "extraordinary");
        assert_eq!((placed[0].x, placed[0].y), (0.0, 0.0));
    }

    #[test]
    fn strict_overlong_words_each_get_a_line() {
        let placed = layout("abcdef ghijkl", 20.0, WrapMode::Strict);
        let lines: Vec<usize> = placed.iter().map(|p| p.line).collect();
        assert_eq!(lines, vec![0, 1]);
    }

    #[test]
    fn honours_anchor_and_config() {
        let config = WrapConfig {
            leading: 2.0,
            word_spacing: 1.0,
            spacing_glyph: " ",
        };
        let placed = wrap_words("a b", 5.0, 7.0, 12.0, 10.0, WrapMode::Loose, &config, mono);
        // "a" ends at 5 + 10 + 10 = 25 >= 17
        assert_eq!((placed[0].x, placed[0].y), (5.0, 7.0));
        assert_eq!((placed[1].x, placed[1].y), (5.0, 27.0));
    }
}
