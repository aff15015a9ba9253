use crate::error::RenderError;
use image::RgbaImage;
use pagecast_types::{Color, Rect};

/// A drawing surface that accumulates pages into a PDF document.
///
/// The context is passed explicitly to every page renderer instead of being
/// looked up from ambient state, so a renderer can be driven by any backend,
/// including recording fakes in tests.
///
/// Coordinates are in points with the origin at the top-left corner of the
/// current page and y growing downwards. Backends convert to PDF user space
/// themselves.
pub trait PdfContext {
    /// Whether the context can currently accept a new page.
    ///
    /// A finished context, or one whose output has been torn down, reports
    /// `false`.
    fn is_open(&self) -> bool;

    /// Closes the current page, if any, and starts a new one with the given
    /// media box. Only the size of `bounds` is significant.
    fn begin_page(&mut self, bounds: Rect) -> Result<(), RenderError>;

    /// Number of pages begun so far.
    fn page_count(&self) -> usize;

    fn save_state(&mut self) -> Result<(), RenderError>;

    fn restore_state(&mut self) -> Result<(), RenderError>;

    /// Moves the origin of subsequent drawing operations.
    fn translate(&mut self, dx: f32, dy: f32) -> Result<(), RenderError>;

    fn scale(&mut self, sx: f32, sy: f32) -> Result<(), RenderError>;

    /// Intersects the clip region with `rect`.
    fn clip_rect(&mut self, rect: Rect) -> Result<(), RenderError>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError>;

    /// Draws `image` stretched to fill `rect`.
    fn draw_image(&mut self, image: &RgbaImage, rect: Rect) -> Result<(), RenderError>;
}
