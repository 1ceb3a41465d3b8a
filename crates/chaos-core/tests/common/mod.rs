// Recording surface shared by the host-side scene and particle tests.

#![allow(dead_code)]

use chaos_core::{Color, Surface};

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    SetFill(Color),
    FillRect(f32, f32, f32, f32),
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Arc(f32, f32, f32, f32, f32),
    Rect(f32, f32, f32, f32),
    ClosePath,
    Fill,
    Text(String, f32, f32),
}

pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    pub fn fills(&self) -> usize {
        self.count(|op| matches!(op, Op::Fill))
    }

    /// Full-surface rectangles painted with the given alpha.
    pub fn covers_with_alpha(&self, alpha: f32) -> usize {
        let mut n = 0;
        let mut current: Option<Color> = None;
        for op in &self.ops {
            match op {
                Op::SetFill(c) => current = Some(*c),
                Op::FillRect(x, y, w, h)
                    if *x == 0.0 && *y == 0.0 && *w == self.width && *h == self.height =>
                {
                    if current.map(|c| c.alpha() == alpha).unwrap_or(false) {
                        n += 1;
                    }
                }
                _ => {}
            }
        }
        n
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }
    fn height(&self) -> f32 {
        self.height
    }
    fn set_fill(&mut self, color: Color) {
        self.ops.push(Op::SetFill(color));
    }
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Op::FillRect(x, y, w, h));
    }
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }
    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }
    fn translate(&mut self, x: f32, y: f32) {
        self.ops.push(Op::Translate(x, y));
    }
    fn rotate(&mut self, radians: f32) {
        self.ops.push(Op::Rotate(radians));
    }
    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }
    fn move_to(&mut self, x: f32, y: f32) {
        self.ops.push(Op::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f32, y: f32) {
        self.ops.push(Op::LineTo(x, y));
    }
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        self.ops.push(Op::Arc(x, y, radius, start, end));
    }
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Op::Rect(x, y, w, h));
    }
    fn close_path(&mut self) {
        self.ops.push(Op::ClosePath);
    }
    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }
    fn fill_text(&mut self, text: &str, x: f32, y: f32, _font: &str) {
        self.ops.push(Op::Text(text.to_string(), x, y));
    }
}
