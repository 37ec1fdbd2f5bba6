//! Chart Rendering
//!
//! The dashboard charts are computed as plain lists of [`DrawCommand`]s for a
//! surface of a given size. Painting is left to thin adapters: the WASM
//! dashboard replays the commands on a canvas, the CLI turns them into SVG.
//!
//! ## Charts
//!
//! - [`comparison_chart`]: target vs. actual registrations
//! - [`ranking_chart`]: most common locations

mod comparison;
mod ranking;
#[cfg(feature = "native")]
mod svg;

pub use comparison::comparison_chart;
pub use ranking::ranking_chart;
#[cfg(feature = "native")]
pub use svg::render_svg;

use serde::Serialize;
use thiserror::Error;

/// Width and height of the drawing surface, in pixels
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal anchor of a text run relative to its point
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Value for the canvas `textAlign` property
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
}

impl Font {
    pub const FAMILY: &'static str = "Arial";

    pub fn regular(size: f64) -> Self {
        Self { size, bold: false }
    }

    pub fn bold(size: f64) -> Self {
        Self { size, bold: true }
    }

    /// CSS font shorthand, e.g. `bold 16px Arial`
    pub fn css(&self) -> String {
        if self.bold {
            format!("bold {}px {}", self.size, Self::FAMILY)
        } else {
            format!("{}px {}", self.size, Self::FAMILY)
        }
    }
}

/// One painting instruction
///
/// Coordinates follow the canvas convention: origin at the top-left corner,
/// y growing downward. Colors are CSS hex strings.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Erase the whole surface
    Clear,
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: &'static str,
    },
    Line {
        from: Point,
        to: Point,
        color: &'static str,
        width: f64,
        /// Dash pattern (on, off); solid when `None`
        dash: Option<[f64; 2]>,
    },
    /// Text drawn on the alphabetic baseline at `at`
    Text {
        text: String,
        at: Point,
        font: Font,
        align: TextAlign,
        color: &'static str,
    },
}

/// Measures rendered text width
///
/// The ranking chart truncates long location names based on how wide they
/// render, so the painting backend supplies its own metrics.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font: &Font) -> f64;
}

/// Width estimate for surfaces without font metrics
#[derive(Debug, Clone, Copy)]
pub struct GlyphEstimate {
    /// Average glyph advance as a fraction of the font size
    pub advance: f64,
}

impl Default for GlyphEstimate {
    fn default() -> Self {
        Self { advance: 0.55 }
    }
}

impl TextMeasure for GlyphEstimate {
    fn text_width(&self, text: &str, font: &Font) -> f64 {
        let advance = if font.bold { self.advance * 1.1 } else { self.advance };
        text.chars().count() as f64 * font.size * advance
    }
}

/// Errors raised while painting commands onto a backend
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Abbreviate a count for chart labels: `1.5M`, `2.3K`, `999`
///
/// One decimal, with halves rounded up (`1250` is `1.3K`).
pub fn abbreviate(value: u64) -> String {
    if value >= 1_000_000 {
        one_decimal(value, 1_000_000, 'M')
    } else if value >= 1_000 {
        one_decimal(value, 1_000, 'K')
    } else {
        value.to_string()
    }
}

fn one_decimal(value: u64, unit: u64, suffix: char) -> String {
    let step = unit / 10;
    let tenths = (value + step / 2) / step;
    format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
}

/// Scale note appended to chart titles for large values
///
/// Display only: bar lengths are always drawn unscaled.
pub fn scale_annotation(max_value: u64) -> &'static str {
    if max_value > 10_000 {
        " (x1000)"
    } else if max_value > 1_000 {
        " (x100)"
    } else {
        ""
    }
}
