//! Immediate-mode 2D drawing seam.
//!
//! The core never talks to a canvas directly; it paints through [`Surface`],
//! which mirrors the subset of `CanvasRenderingContext2D` the effect needs.

use std::fmt;

/// Fill color in one of the two CSS notations the effect emits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// `hsla(h, s%, l%, a)`; saturation and lightness are percentages.
    Hsla { h: f32, s: f32, l: f32, a: f32 },
    /// `rgba(r, g, b, a)` with channels in 0..=255.
    Rgba { r: f32, g: f32, b: f32, a: f32 },
}

impl Color {
    pub const fn black(alpha: f32) -> Self {
        Color::Rgba {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: alpha,
        }
    }

    pub const fn white() -> Self {
        Color::Rgba {
            r: 255.0,
            g: 255.0,
            b: 255.0,
            a: 1.0,
        }
    }

    pub fn alpha(&self) -> f32 {
        match *self {
            Color::Hsla { a, .. } | Color::Rgba { a, .. } => a,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Hsla { h, s, l, a } => write!(f, "hsla({}, {}%, {}%, {})", h, s, l, a),
            Color::Rgba { r, g, b, a } => write!(f, "rgba({}, {}, {}, {})", r, g, b, a),
        }
    }
}

/// Drawing operations consumed by the particle renderer and the frame step.
///
/// Paths follow canvas semantics: `begin_path` starts an empty path, `fill`
/// fills the current path with the current fill color.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn set_fill(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32);
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn close_path(&mut self);
    fn fill(&mut self);

    /// Draw `text` centered on `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str);

    /// Paint `color` over the whole surface.
    fn cover(&mut self, color: Color) {
        let (w, h) = (self.width(), self.height());
        self.set_fill(color);
        self.fill_rect(0.0, 0.0, w, h);
    }
}
