//! Canvas 2D renderer for motion fields
//!
//! Immediate-mode drawing: clear, glow circles, distance-faded links. A
//! missing canvas or context simply leaves the field unrendered.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::motion::MotionField;

pub struct Painter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Painter {
    /// Attach to a canvas by element id
    pub fn attach(id: &str) -> Option<Self> {
        let canvas = web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the backing store to the viewport; returns the new size for the
    /// field bounds.
    pub fn resize_to_viewport(&self) -> (f32, f32) {
        let window = web_sys::window();
        let dim = |v: Option<Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>>| {
            v.and_then(|r| r.ok()).and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        let w = dim(window.as_ref().map(|w| w.inner_width()));
        let h = dim(window.as_ref().map(|w| w.inner_height()));
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);
        (w as f32, h as f32)
    }

    /// Draw one frame of the field: soft-glow circles plus proximity links
    /// whose alpha fades linearly with distance.
    pub fn draw(&self, field: &MotionField) {
        let ctx = &self.ctx;
        ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );

        for p in &field.points {
            let rgba = format!("rgba({}, {:.3})", p.tint.rgb(), p.opacity);
            ctx.begin_path();
            let _ = ctx.arc(
                p.pos.x as f64,
                p.pos.y as f64,
                p.radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.set_fill_style_str(&rgba);
            ctx.set_shadow_blur(field.config.glow as f64);
            ctx.set_shadow_color(&rgba);
            ctx.fill();
        }

        ctx.set_line_width(field.config.line_width as f64);
        for link in field.links() {
            let a = &field.points[link.a];
            let b = &field.points[link.b];
            let rgba_a = format!("rgba({}, {:.3})", a.tint.rgb(), link.alpha);
            ctx.begin_path();
            ctx.move_to(a.pos.x as f64, a.pos.y as f64);
            ctx.line_to(b.pos.x as f64, b.pos.y as f64);
            if field.config.gradient_links {
                let gradient = ctx.create_linear_gradient(
                    a.pos.x as f64,
                    a.pos.y as f64,
                    b.pos.x as f64,
                    b.pos.y as f64,
                );
                let rgba_b = format!("rgba({}, {:.3})", b.tint.rgb(), link.alpha);
                let _ = gradient.add_color_stop(0.0, &rgba_a);
                let _ = gradient.add_color_stop(1.0, &rgba_b);
                ctx.set_stroke_style_canvas_gradient(&gradient);
                ctx.set_shadow_blur(5.0);
                ctx.set_shadow_color(&rgba_a);
            } else {
                ctx.set_stroke_style_str(&rgba_a);
                ctx.set_shadow_blur(0.0);
            }
            ctx.stroke();
        }
    }
}
