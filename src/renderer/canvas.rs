//! Canvas 2D painter (wasm32)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{BACKGROUND, DrawRect, fill_color};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    pub size: (f64, f64),
    high_contrast: bool,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, high_contrast: bool) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            size: (canvas.width() as f64, canvas.height() as f64),
            high_contrast,
        })
    }

    /// Clear to background and paint every box
    pub fn render(&self, rects: &[DrawRect]) {
        let (w, h) = self.size;
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        for rect in rects {
            self.ctx
                .set_fill_style_str(fill_color(rect.kind, self.high_contrast));
            self.ctx.fill_rect(
                rect.top_left.x as f64,
                rect.top_left.y as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            );
        }
    }
}
