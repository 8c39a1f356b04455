//! Canvas-2D rasterizer for the render sink.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::sink::RenderSink;
use crate::math::{Rgb, Vec2};

/// Render sink that rasterizes onto an HTML `2d` canvas context.
///
/// Scene coordinates are y-up with the origin at the bottom-left; the canvas
/// is y-down, so every y coordinate passes through a flip against the scene
/// height.
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasRenderer {
    /// Wrap the 2D context of `canvas`, sizing the element to the scene bounds.
    pub fn new(canvas: &HtmlCanvasElement, width: f32, height: f32) -> Result<Self, String> {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to request 2d context")?
            .ok_or("Canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Context is not a CanvasRenderingContext2d")?;

        Ok(Self { ctx, width, height })
    }

    fn flip_y(&self, y: f32) -> f64 {
        f64::from(self.height - y)
    }

    fn trace_path(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        if let Some(first) = points.first() {
            self.ctx.move_to(f64::from(first.x), self.flip_y(first.y));
            for p in &points[1..] {
                self.ctx.line_to(f64::from(p.x), self.flip_y(p.y));
            }
        }
    }

    fn set_font(&self, size: f32) {
        self.ctx.set_font(&format!("bold {}px sans-serif", size));
    }
}

impl RenderSink for CanvasRenderer {
    fn clear(&mut self, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_css(1.0));
        self.ctx
            .fill_rect(0.0, 0.0, f64::from(self.width), f64::from(self.height));
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgb, alpha: f32) {
        if points.len() < 3 {
            return;
        }
        self.trace_path(points);
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&color.to_css(alpha));
        self.ctx.fill();
    }

    fn line_strip(&mut self, points: &[Vec2], color: Rgb, alpha: f32, width: f32) {
        if points.len() < 2 {
            return;
        }
        self.trace_path(points);
        self.ctx.set_stroke_style_str(&color.to_css(alpha));
        self.ctx.set_line_width(f64::from(width));
        self.ctx.stroke();
    }

    fn draw_points(&mut self, points: &[Vec2], size: f32, color: Rgb, alpha: f32) {
        self.ctx.set_fill_style_str(&color.to_css(alpha));
        let side = f64::from(size);
        let half = side / 2.0;
        for p in points {
            self.ctx
                .fill_rect(f64::from(p.x) - half, self.flip_y(p.y) - half, side, side);
        }
    }

    fn text(&mut self, content: &str, position: Vec2, size: f32, color: Rgb, alpha: f32) {
        self.set_font(size);
        self.ctx.set_fill_style_str(&color.to_css(alpha));
        // fill_text only fails on a detached context; nothing useful to do here
        let _ = self
            .ctx
            .fill_text(content, f64::from(position.x), self.flip_y(position.y));
    }

    fn text_centered(
        &mut self,
        content: &str,
        center_x: f32,
        baseline_y: f32,
        size: f32,
        color: Rgb,
        alpha: f32,
    ) {
        self.set_font(size);
        self.ctx.set_fill_style_str(&color.to_css(alpha));
        let text_width = self
            .ctx
            .measure_text(content)
            .map(|metrics| metrics.width())
            .unwrap_or(0.0);
        let x = f64::from(center_x) - text_width / 2.0;
        let _ = self.ctx.fill_text(content, x, self.flip_y(baseline_y));
    }
}
