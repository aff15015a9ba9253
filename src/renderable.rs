//! One item, one page.
//!
//! Each renderable item opens a page sized to its content on the given
//! context and draws itself into it.

use crate::error::GenerateError;
use crate::image_source::Image;
use crate::view::{ScrollView, View};
use pagecast_render_core::PdfContext;
use pagecast_types::{Point, Rect, Size};
use std::ops::Deref;

/// Visual content that renders as exactly one PDF page.
#[derive(Debug, Clone)]
pub enum Renderable {
    View(View),
    Scroll(ScrollView),
    Image(Image),
}

impl Renderable {
    /// The size of the page this item produces, in points.
    ///
    /// Views use their frame size, scroll views their full content size and
    /// images their pixel size.
    pub fn page_size(&self) -> Size {
        match self {
            Renderable::View(view) => view.page_size(),
            Renderable::Scroll(scroll) => scroll.page_size(),
            Renderable::Image(image) => image.page_size(),
        }
    }

    /// Begins a new page on `ctx` and draws this item into it.
    pub fn render_page(&mut self, ctx: &mut dyn PdfContext) -> Result<(), GenerateError> {
        self.render_page_scaled(ctx, 1.0)
    }

    pub(crate) fn render_page_scaled(
        &mut self,
        ctx: &mut dyn PdfContext,
        scale: f32,
    ) -> Result<(), GenerateError> {
        match self {
            Renderable::View(view) => view.render_page_scaled(ctx, scale),
            Renderable::Scroll(scroll) => scroll.render_page_scaled(ctx, scale),
            Renderable::Image(image) => image.render_page_scaled(ctx, scale),
        }
    }
}

impl From<View> for Renderable {
    fn from(view: View) -> Self {
        Renderable::View(view)
    }
}

impl From<ScrollView> for Renderable {
    fn from(scroll: ScrollView) -> Self {
        Renderable::Scroll(scroll)
    }
}

impl From<Image> for Renderable {
    fn from(image: Image) -> Self {
        Renderable::Image(image)
    }
}

/// Checks the page size and context, then opens a page of `size * scale`.
///
/// Drawing that follows is in unscaled item coordinates.
pub(crate) fn begin_page(
    ctx: &mut dyn PdfContext,
    size: Size,
    scale: f32,
) -> Result<(), GenerateError> {
    if !size.is_drawable() {
        return Err(GenerateError::ZeroSizeView { size });
    }
    if !ctx.is_open() {
        return Err(GenerateError::InvalidContext);
    }
    ctx.begin_page(Rect::with_size(size.scaled(scale)))?;
    if scale != 1.0 {
        ctx.scale(scale, scale)?;
    }
    log::debug!(
        "Began page {} at {}x{} pt",
        ctx.page_count(),
        size.width * scale,
        size.height * scale
    );
    Ok(())
}

impl View {
    pub fn page_size(&self) -> Size {
        self.frame.size()
    }

    /// Renders the view's layer as one page the size of its frame.
    pub fn render_page(&self, ctx: &mut dyn PdfContext) -> Result<(), GenerateError> {
        self.render_page_scaled(ctx, 1.0)
    }

    pub(crate) fn render_page_scaled(
        &self,
        ctx: &mut dyn PdfContext,
        scale: f32,
    ) -> Result<(), GenerateError> {
        begin_page(ctx, self.page_size(), scale)?;
        self.draw_layer(ctx)?;
        Ok(())
    }
}

impl ScrollView {
    pub fn page_size(&self) -> Size {
        self.content_size
    }

    /// Renders the whole content area as one page.
    ///
    /// The layer only draws what is inside its frame, so the frame is
    /// expanded to the content size and the offset reset while the page is
    /// drawn. Both are restored before returning, on success or failure.
    pub fn render_page(&mut self, ctx: &mut dyn PdfContext) -> Result<(), GenerateError> {
        self.render_page_scaled(ctx, 1.0)
    }

    pub(crate) fn render_page_scaled(
        &mut self,
        ctx: &mut dyn PdfContext,
        scale: f32,
    ) -> Result<(), GenerateError> {
        let size = self.page_size();
        if !size.is_drawable() {
            return Err(GenerateError::ZeroSizeView { size });
        }
        let expanded = ExpandedViewport::new(self);
        begin_page(ctx, expanded.frame.size(), scale)?;
        expanded.draw_layer(ctx)?;
        Ok(())
    }
}

impl Image {
    pub fn page_size(&self) -> Size {
        self.size()
    }

    /// Renders the image filling a page of its pixel size.
    pub fn render_page(&self, ctx: &mut dyn PdfContext) -> Result<(), GenerateError> {
        self.render_page_scaled(ctx, 1.0)
    }

    pub(crate) fn render_page_scaled(
        &self,
        ctx: &mut dyn PdfContext,
        scale: f32,
    ) -> Result<(), GenerateError> {
        let size = self.page_size();
        begin_page(ctx, size, scale)?;
        ctx.draw_image(self.pixels(), Rect::with_size(size))?;
        Ok(())
    }
}

/// Holds a scroll view with its frame set to the full content size and its
/// offset at the origin. Dropping the guard puts both back.
struct ExpandedViewport<'a> {
    view: &'a mut ScrollView,
    saved_frame: Rect,
    saved_offset: Point,
}

impl<'a> ExpandedViewport<'a> {
    fn new(view: &'a mut ScrollView) -> Self {
        let saved_frame = view.frame;
        let saved_offset = view.content_offset;
        view.content_offset = Point::zero();
        view.frame = Rect::with_size(view.content_size);
        Self {
            view,
            saved_frame,
            saved_offset,
        }
    }
}

impl Deref for ExpandedViewport<'_> {
    type Target = ScrollView;

    fn deref(&self) -> &ScrollView {
        self.view
    }
}

impl Drop for ExpandedViewport<'_> {
    fn drop(&mut self) {
        self.view.frame = self.saved_frame;
        self.view.content_offset = self.saved_offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DrawOp, RecordingContext};
    use image::RgbaImage;
    use pagecast_types::Color;

    fn tall_scroll_view() -> ScrollView {
        ScrollView::new(Rect::new(20.0, 30.0, 100.0, 50.0), Size::new(100.0, 400.0))
            .with_offset(Point::new(0.0, 120.0))
            .with_background(Color::WHITE)
            .with_subview(
                View::new(Rect::new(0.0, 300.0, 100.0, 20.0)).with_background(Color::BLACK),
            )
    }

    #[test]
    fn zero_sized_views_are_rejected() {
        let mut ctx = RecordingContext::default();
        for frame in [Rect::new(0.0, 0.0, 0.0, 10.0), Rect::new(0.0, 0.0, 10.0, 0.0)] {
            let err = View::new(frame).render_page(&mut ctx).unwrap_err();
            assert!(matches!(err, GenerateError::ZeroSizeView { .. }));
        }
        let mut scroll = ScrollView::new(Rect::new(0.0, 0.0, 10.0, 10.0), Size::zero());
        assert!(matches!(
            scroll.render_page(&mut ctx),
            Err(GenerateError::ZeroSizeView { .. })
        ));
        assert_eq!(ctx.page_count(), 0);
    }

    #[test]
    fn view_page_uses_frame_size() {
        let mut ctx = RecordingContext::default();
        View::new(Rect::new(40.0, 40.0, 320.0, 480.0))
            .render_page(&mut ctx)
            .unwrap();
        assert_eq!(ctx.pages, vec![Rect::new(0.0, 0.0, 320.0, 480.0)]);
    }

    #[test]
    fn scroll_view_page_uses_content_size() {
        let mut ctx = RecordingContext::default();
        let mut scroll = tall_scroll_view();
        scroll.render_page(&mut ctx).unwrap();
        assert_eq!(ctx.pages, vec![Rect::new(0.0, 0.0, 100.0, 400.0)]);
        // Clip covers the whole content and no offset is applied.
        assert!(ctx.ops.contains(&DrawOp::Clip(Rect::new(0.0, 0.0, 100.0, 400.0))));
        assert!(ctx.ops.contains(&DrawOp::Translate(-0.0, -0.0)));
    }

    #[test]
    fn scroll_view_state_is_restored_after_rendering() {
        let mut ctx = RecordingContext::default();
        let mut scroll = tall_scroll_view();
        let (frame, offset) = (scroll.frame, scroll.content_offset);
        scroll.render_page(&mut ctx).unwrap();
        assert_eq!(scroll.frame, frame);
        assert_eq!(scroll.content_offset, offset);
    }

    #[test]
    fn scroll_view_state_is_restored_when_drawing_fails() {
        let mut ctx = RecordingContext::failing_on_fill();
        let mut scroll = tall_scroll_view();
        let (frame, offset) = (scroll.frame, scroll.content_offset);
        let err = scroll.render_page(&mut ctx).unwrap_err();
        assert!(matches!(err, GenerateError::Render(_)));
        assert_eq!(scroll.frame, frame);
        assert_eq!(scroll.content_offset, offset);
    }

    #[test]
    fn scroll_view_state_is_restored_when_context_is_closed() {
        let mut ctx = RecordingContext::closed();
        let mut scroll = tall_scroll_view();
        let (frame, offset) = (scroll.frame, scroll.content_offset);
        let err = scroll.render_page(&mut ctx).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidContext));
        assert_eq!(scroll.frame, frame);
        assert_eq!(scroll.content_offset, offset);
    }

    #[test]
    fn closed_context_is_reported() {
        let mut ctx = RecordingContext::closed();
        let view = View::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(matches!(
            view.render_page(&mut ctx),
            Err(GenerateError::InvalidContext)
        ));
        assert!(ctx.pages.is_empty());
    }

    #[test]
    fn image_fills_a_page_of_its_pixel_size() {
        let mut ctx = RecordingContext::default();
        let mut item = Renderable::from(Image::from_rgba(RgbaImage::new(64, 48)));
        assert_eq!(item.page_size(), Size::new(64.0, 48.0));
        item.render_page(&mut ctx).unwrap();
        assert_eq!(ctx.pages, vec![Rect::new(0.0, 0.0, 64.0, 48.0)]);
        assert_eq!(
            ctx.ops,
            vec![DrawOp::Image {
                width: 64,
                height: 48,
                rect: Rect::new(0.0, 0.0, 64.0, 48.0),
            }]
        );
    }

    #[test]
    fn scaled_pages_shrink_the_media_box_and_scale_drawing() {
        let mut ctx = RecordingContext::default();
        let mut item = Renderable::from(View::new(Rect::new(0.0, 0.0, 200.0, 100.0)));
        item.render_page_scaled(&mut ctx, 0.5).unwrap();
        assert_eq!(ctx.pages, vec![Rect::new(0.0, 0.0, 100.0, 50.0)]);
        assert_eq!(ctx.ops[0], DrawOp::Scale(0.5, 0.5));
    }
}
