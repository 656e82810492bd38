//! Canvas 2D implementation of `DrawSurface`

use std::f64::consts::TAU;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::core::DrawSurface;
use crate::theme::Color;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the viewport
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.ctx.begin_path();
        // arc() only fails on a negative radius
        if self.ctx.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width);
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }
}
