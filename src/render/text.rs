//! Text layout measurement
//!
//! Labels are positioned from measured text boxes. [`layout_text`] splits a
//! label into lines and returns one [`TextBox`] per line with its left edge
//! and baseline relative to the anchor point, honoring `text-anchor`,
//! `-toyplot-anchor-shift`, `baseline-shift` and `alignment-baseline`.

use crate::style::Style;

/// Font size used when a style sets none
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Line advance as a multiple of the font size
pub const LINE_HEIGHT: f64 = 1.2;

/// Glyph metrics for one font, in fractions of the font size
pub trait FontMetrics {
    /// Advance width of a character
    fn advance(&self, ch: char) -> f64;

    fn ascent(&self) -> f64;

    fn descent(&self) -> f64;

    fn x_height(&self) -> f64;

    /// Width of a run of text in pixels
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(|c| self.advance(c)).sum::<f64>() * font_size
    }
}

/// Standard Helvetica widths from its font metrics file
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl FontMetrics for HelveticaMetrics {
    fn advance(&self, ch: char) -> f64 {
        let units = match ch {
            ' ' | '!' | ',' | '.' | '/' | ':' | ';' | '[' | '\\' | ']' | 'I' | 'f' | 't' => 278,
            '"' => 355,
            '\'' => 191,
            '(' | ')' | '-' | '`' | 'r' => 333,
            '*' => 389,
            '+' | '<' | '=' | '>' | '~' => 584,
            '%' => 889,
            '&' | 'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
            '@' => 1015,
            'C' | 'D' | 'H' | 'N' | 'R' | 'U' | 'w' => 722,
            'F' | 'T' | 'Z' => 611,
            'G' | 'O' | 'Q' => 778,
            'J' | 'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 500,
            'L' => 556,
            'M' | 'm' => 833,
            'W' => 944,
            '^' => 469,
            'i' | 'j' | 'l' => 222,
            '{' | '}' => 334,
            '|' => 260,
            _ => 556,
        };
        f64::from(units) / 1000.0
    }

    fn ascent(&self) -> f64 {
        0.718
    }

    fn descent(&self) -> f64 {
        0.207
    }

    fn x_height(&self) -> f64 {
        0.523
    }
}

/// One measured line of text relative to its anchor point
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub text: String,
    /// Offset of the left edge from the anchor
    pub left: f64,
    pub width: f64,
    /// Offset of the baseline from the anchor (y grows downward)
    pub baseline: f64,
}

/// Measure `text` under `style`, one box per line
pub fn layout_text(text: &str, style: &Style, metrics: &dyn FontMetrics) -> Vec<TextBox> {
    let font_size = style.px("font-size").unwrap_or(DEFAULT_FONT_SIZE);
    let anchor_shift = style.px("-toyplot-anchor-shift").unwrap_or(0.0);
    let baseline_shift = style.px("baseline-shift").unwrap_or(0.0);

    let alignment = match style.get("alignment-baseline").unwrap_or("middle") {
        "alphabetic" | "baseline" => 0.0,
        "hanging" | "top" => metrics.ascent(),
        "central" => (metrics.ascent() - metrics.descent()) / 2.0,
        "bottom" => -metrics.descent(),
        _ => metrics.x_height() / 2.0,
    } * font_size;

    let lines: Vec<&str> = text.split('\n').collect();
    let center = (lines.len() as f64 - 1.0) / 2.0;

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let width = metrics.text_width(line, font_size);
            let left = match style.get("text-anchor").unwrap_or("middle") {
                "start" => 0.0,
                "end" => -width,
                _ => -width / 2.0,
            } + anchor_shift;
            let baseline = (i as f64 - center) * LINE_HEIGHT * font_size + alignment
                - baseline_shift;
            TextBox {
                text: line.to_string(),
                left,
                width,
                baseline,
            }
        })
        .collect()
}
