//! Drawing surfaces.
//!
//! [`Surface`] is the subset of the Canvas2D API the renderers use. The
//! browser implementation forwards to a [`CanvasRenderingContext2d`]; the
//! recording implementation captures [`DrawOp`]s so rendering can be checked
//! without a browser.

use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::asset::AssetId;

/// Canvas2D-style immediate-mode drawing target.
///
/// Methods take `&self` like the DOM API they mirror. Calls that can fail in
/// the browser return `Result`.
pub trait Surface {
    type Error;

    fn save(&self);
    fn restore(&self);
    fn set_transform(&self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), Self::Error>;
    fn translate(&self, x: f64, y: f64) -> Result<(), Self::Error>;
    fn rotate(&self, angle: f64) -> Result<(), Self::Error>;
    fn scale(&self, x: f64, y: f64) -> Result<(), Self::Error>;
    fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64);

    fn set_global_alpha(&self, alpha: f64);
    fn set_fill_style(&self, color: &str);
    fn set_stroke_style(&self, color: &str);
    fn set_line_width(&self, width: f64);
    /// An empty slice restores solid lines.
    fn set_line_dash(&self, segments: &[f64]) -> Result<(), Self::Error>;

    fn begin_path(&self);
    fn move_to(&self, x: f64, y: f64);
    fn line_to(&self, x: f64, y: f64);
    fn quadratic_curve_to(&self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), Self::Error>;
    fn fill(&self);
    fn stroke(&self);
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64);

    fn set_font(&self, font: &str);
    fn set_text_align(&self, align: &str);
    fn set_text_baseline(&self, baseline: &str);
    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), Self::Error>;
    /// Width of `text` in the current font; infinite when it cannot be measured.
    fn measure_text(&self, text: &str) -> f64;

    /// Draw the image registered for `asset` into the given rectangle.
    /// Surfaces skip assets whose image is not available yet.
    fn draw_image(&self, asset: AssetId, x: f64, y: f64, w: f64, h: f64) -> Result<(), Self::Error>;
}

// =============================================================
// Browser
// =============================================================

/// Surface backed by a browser 2D context and the engine's image cache.
pub struct WebSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    images: &'a HashMap<AssetId, HtmlImageElement>,
}

impl<'a> WebSurface<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d, images: &'a HashMap<AssetId, HtmlImageElement>) -> Self {
        Self { ctx, images }
    }
}

impl Surface for WebSurface<'_> {
    type Error = JsValue;

    fn save(&self) {
        self.ctx.save();
    }

    fn restore(&self) {
        self.ctx.restore();
    }

    fn set_transform(&self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), JsValue> {
        self.ctx.set_transform(a, b, c, d, e, f)
    }

    fn translate(&self, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.translate(x, y)
    }

    fn rotate(&self, angle: f64) -> Result<(), JsValue> {
        self.ctx.rotate(angle)
    }

    fn scale(&self, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.scale(x, y)
    }

    fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn set_global_alpha(&self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_fill_style(&self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_stroke_style(&self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_dash(&self, segments: &[f64]) -> Result<(), JsValue> {
        let dash = js_sys::Array::new();
        for &s in segments {
            dash.push(&s.into());
        }
        self.ctx.set_line_dash(&dash)
    }

    fn begin_path(&self) {
        self.ctx.begin_path();
    }

    fn move_to(&self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn quadratic_curve_to(&self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ctx.quadratic_curve_to(cpx, cpy, x, y);
    }

    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue> {
        self.ctx.arc(x, y, radius, start, end)
    }

    fn fill(&self) {
        self.ctx.fill();
    }

    fn stroke(&self) {
        self.ctx.stroke();
    }

    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.stroke_rect(x, y, w, h);
    }

    fn set_font(&self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&self, align: &str) {
        self.ctx.set_text_align(align);
    }

    fn set_text_baseline(&self, baseline: &str) {
        self.ctx.set_text_baseline(baseline);
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.fill_text(text, x, y)
    }

    fn measure_text(&self, text: &str) -> f64 {
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(_) => f64::INFINITY,
        }
    }

    fn draw_image(&self, asset: AssetId, x: f64, y: f64, w: f64, h: f64) -> Result<(), JsValue> {
        match self.images.get(&asset) {
            Some(img) if img.complete() => self.ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h),
            _ => Ok(()),
        }
    }
}

// =============================================================
// Recording
// =============================================================

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    SetTransform([f64; 6]),
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    ClearRect(f64, f64, f64, f64),
    GlobalAlpha(f64),
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    LineDash(Vec<f64>),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadraticCurveTo(f64, f64, f64, f64),
    Arc { x: f64, y: f64, radius: f64 },
    Fill,
    Stroke,
    FillRect(f64, f64, f64, f64),
    StrokeRect(f64, f64, f64, f64),
    Font(String),
    TextAlign(String),
    TextBaseline(String),
    FillText { text: String, x: f64, y: f64 },
    DrawImage { asset: AssetId, x: f64, y: f64, w: f64, h: f64 },
}

/// Surface that records every call. Text is measured at a fixed advance
/// per character.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: RefCell<Vec<DrawOp>>,
}

/// Advance per character used by [`RecordingSurface::measure_text`].
const RECORDED_CHAR_WIDTH: f64 = 8.0;

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded calls.
    #[must_use]
    pub fn ops(&self) -> Vec<DrawOp> {
        self.ops.borrow().clone()
    }

    /// Drain the recorded calls.
    pub fn take(&self) -> Vec<DrawOp> {
        self.ops.take()
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.borrow().iter().filter(|op| pred(op)).count()
    }

    fn push(&self, op: DrawOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn save(&self) {
        self.push(DrawOp::Save);
    }

    fn restore(&self) {
        self.push(DrawOp::Restore);
    }

    fn set_transform(&self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), Infallible> {
        self.push(DrawOp::SetTransform([a, b, c, d, e, f]));
        Ok(())
    }

    fn translate(&self, x: f64, y: f64) -> Result<(), Infallible> {
        self.push(DrawOp::Translate(x, y));
        Ok(())
    }

    fn rotate(&self, angle: f64) -> Result<(), Infallible> {
        self.push(DrawOp::Rotate(angle));
        Ok(())
    }

    fn scale(&self, x: f64, y: f64) -> Result<(), Infallible> {
        self.push(DrawOp::Scale(x, y));
        Ok(())
    }

    fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.push(DrawOp::ClearRect(x, y, w, h));
    }

    fn set_global_alpha(&self, alpha: f64) {
        self.push(DrawOp::GlobalAlpha(alpha));
    }

    fn set_fill_style(&self, color: &str) {
        self.push(DrawOp::FillStyle(color.to_owned()));
    }

    fn set_stroke_style(&self, color: &str) {
        self.push(DrawOp::StrokeStyle(color.to_owned()));
    }

    fn set_line_width(&self, width: f64) {
        self.push(DrawOp::LineWidth(width));
    }

    fn set_line_dash(&self, segments: &[f64]) -> Result<(), Infallible> {
        self.push(DrawOp::LineDash(segments.to_vec()));
        Ok(())
    }

    fn begin_path(&self) {
        self.push(DrawOp::BeginPath);
    }

    fn move_to(&self, x: f64, y: f64) {
        self.push(DrawOp::MoveTo(x, y));
    }

    fn line_to(&self, x: f64, y: f64) {
        self.push(DrawOp::LineTo(x, y));
    }

    fn quadratic_curve_to(&self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.push(DrawOp::QuadraticCurveTo(cpx, cpy, x, y));
    }

    fn arc(&self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) -> Result<(), Infallible> {
        self.push(DrawOp::Arc { x, y, radius });
        Ok(())
    }

    fn fill(&self) {
        self.push(DrawOp::Fill);
    }

    fn stroke(&self) {
        self.push(DrawOp::Stroke);
    }

    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.push(DrawOp::FillRect(x, y, w, h));
    }

    fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.push(DrawOp::StrokeRect(x, y, w, h));
    }

    fn set_font(&self, font: &str) {
        self.push(DrawOp::Font(font.to_owned()));
    }

    fn set_text_align(&self, align: &str) {
        self.push(DrawOp::TextAlign(align.to_owned()));
    }

    fn set_text_baseline(&self, baseline: &str) {
        self.push(DrawOp::TextBaseline(baseline.to_owned()));
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), Infallible> {
        self.push(DrawOp::FillText { text: text.to_owned(), x, y });
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * RECORDED_CHAR_WIDTH
    }

    fn draw_image(&self, asset: AssetId, x: f64, y: f64, w: f64, h: f64) -> Result<(), Infallible> {
        self.push(DrawOp::DrawImage { asset, x, y, w, h });
        Ok(())
    }
}
