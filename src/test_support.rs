//! Fakes shared by unit tests.

use image::{ImageFormat, Rgba, RgbaImage};
use pagecast_render_core::{PdfContext, RenderError};
use pagecast_types::{Color, Rect};
use std::io::Cursor;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Translate(f32, f32),
    Scale(f32, f32),
    Clip(Rect),
    Fill(Rect, Color),
    Image { width: u32, height: u32, rect: Rect },
}

/// A context that records what was drawn instead of producing PDF bytes.
#[derive(Debug)]
pub struct RecordingContext {
    pub pages: Vec<Rect>,
    pub ops: Vec<DrawOp>,
    open: bool,
    fail_fills: bool,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            open: true,
            fail_fills: false,
        }
    }
}

impl RecordingContext {
    pub fn closed() -> Self {
        Self {
            open: false,
            ..Default::default()
        }
    }

    pub fn failing_on_fill() -> Self {
        Self {
            fail_fills: true,
            ..Default::default()
        }
    }

    fn record(&mut self, op: DrawOp) -> Result<(), RenderError> {
        if self.pages.is_empty() {
            return Err(RenderError::NoPage);
        }
        self.ops.push(op);
        Ok(())
    }
}

impl PdfContext for RecordingContext {
    fn is_open(&self) -> bool {
        self.open
    }

    fn begin_page(&mut self, bounds: Rect) -> Result<(), RenderError> {
        if !self.open {
            return Err(RenderError::Closed);
        }
        self.pages.push(bounds);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn save_state(&mut self) -> Result<(), RenderError> {
        self.record(DrawOp::Save)
    }

    fn restore_state(&mut self) -> Result<(), RenderError> {
        self.record(DrawOp::Restore)
    }

    fn translate(&mut self, dx: f32, dy: f32) -> Result<(), RenderError> {
        self.record(DrawOp::Translate(dx, dy))
    }

    fn scale(&mut self, sx: f32, sy: f32) -> Result<(), RenderError> {
        self.record(DrawOp::Scale(sx, sy))
    }

    fn clip_rect(&mut self, rect: Rect) -> Result<(), RenderError> {
        self.record(DrawOp::Clip(rect))
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        if self.fail_fills {
            return Err(RenderError::Pdf("fill rejected".into()));
        }
        self.record(DrawOp::Fill(rect, color))
    }

    fn draw_image(&mut self, image: &RgbaImage, rect: Rect) -> Result<(), RenderError> {
        self.record(DrawOp::Image {
            width: image.width(),
            height: image.height(),
            rect,
        })
    }
}

/// Encodes a solid-colour PNG.
pub fn png_bytes(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbaImage::from_pixel(width, height, color)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}
