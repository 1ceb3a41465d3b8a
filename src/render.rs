use crate::constants::{PROMPT_ALIGN, PROMPT_BASELINE};
use chaos_core::{Color, Surface};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Canvas 2D context adapted to the core [`Surface`] seam.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext(2d) failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn set_fill(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_string());
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        _ = self.ctx.translate(x as f64, y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        _ = self.ctx.rotate(radians as f64);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.ctx.move_to(x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.ctx.line_to(x as f64, y as f64);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        _ = self
            .ctx
            .arc(x as f64, y as f64, radius as f64, start as f64, end as f64);
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str) {
        self.ctx.set_font(font);
        self.ctx.set_text_align(PROMPT_ALIGN);
        self.ctx.set_text_baseline(PROMPT_BASELINE);
        _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}
