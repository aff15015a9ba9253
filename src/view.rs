//! Retained view trees.
//!
//! A view is a rectangle with an optional background fill, optional raster
//! contents and child views. Frames are expressed in the parent's
//! coordinate space; each view draws its layer in its own bounds, with the
//! origin at its top-left corner.

use crate::image_source::Image;
use pagecast_render_core::{PdfContext, RenderError};
use pagecast_types::{Color, Point, Rect, Size};

/// A plain view.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub frame: Rect,
    pub background: Option<Color>,
    /// Drawn stretched over the view's bounds, above the background.
    pub contents: Option<Image>,
    pub subviews: Vec<ViewNode>,
    pub clips_to_bounds: bool,
    pub hidden: bool,
}

impl View {
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            ..Default::default()
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_contents(mut self, image: Image) -> Self {
        self.contents = Some(image);
        self
    }

    pub fn with_subview(mut self, subview: impl Into<ViewNode>) -> Self {
        self.subviews.push(subview.into());
        self
    }

    pub fn clipping(mut self, clips_to_bounds: bool) -> Self {
        self.clips_to_bounds = clips_to_bounds;
        self
    }

    pub fn bounds(&self) -> Rect {
        self.frame.bounds()
    }

    /// Draws this view's layer at its own bounds.
    pub(crate) fn draw_layer(&self, ctx: &mut dyn PdfContext) -> Result<(), RenderError> {
        if self.hidden {
            return Ok(());
        }
        let bounds = self.bounds();
        ctx.save_state()?;
        if self.clips_to_bounds {
            ctx.clip_rect(bounds)?;
        }
        if let Some(background) = self.background {
            ctx.fill_rect(bounds, background)?;
        }
        if let Some(contents) = &self.contents {
            ctx.draw_image(contents.pixels(), bounds)?;
        }
        draw_subviews(ctx, &self.subviews)?;
        ctx.restore_state()
    }
}

/// A view whose children live in a content area that may be larger than
/// its frame. Only the part at `content_offset` is visible on screen.
#[derive(Debug, Clone, Default)]
pub struct ScrollView {
    pub frame: Rect,
    pub background: Option<Color>,
    /// Full scrollable extent.
    pub content_size: Size,
    /// Top-left corner of the visible part of the content.
    pub content_offset: Point,
    /// Children positioned in content coordinates.
    pub subviews: Vec<ViewNode>,
    pub hidden: bool,
}

impl ScrollView {
    pub fn new(frame: Rect, content_size: Size) -> Self {
        Self {
            frame,
            content_size,
            ..Default::default()
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_offset(mut self, offset: Point) -> Self {
        self.content_offset = offset;
        self
    }

    pub fn with_subview(mut self, subview: impl Into<ViewNode>) -> Self {
        self.subviews.push(subview.into());
        self
    }

    pub fn bounds(&self) -> Rect {
        self.frame.bounds()
    }

    /// Draws the visible viewport: content is clipped to the frame and
    /// shifted by the current offset.
    pub(crate) fn draw_layer(&self, ctx: &mut dyn PdfContext) -> Result<(), RenderError> {
        if self.hidden {
            return Ok(());
        }
        let bounds = self.bounds();
        ctx.save_state()?;
        ctx.clip_rect(bounds)?;
        if let Some(background) = self.background {
            ctx.fill_rect(bounds, background)?;
        }
        ctx.translate(-self.content_offset.x, -self.content_offset.y)?;
        draw_subviews(ctx, &self.subviews)?;
        ctx.restore_state()
    }
}

/// A child in a view tree.
#[derive(Debug, Clone)]
pub enum ViewNode {
    Plain(View),
    Scroll(ScrollView),
}

impl ViewNode {
    pub fn frame(&self) -> Rect {
        match self {
            ViewNode::Plain(view) => view.frame,
            ViewNode::Scroll(scroll) => scroll.frame,
        }
    }

    fn draw_layer(&self, ctx: &mut dyn PdfContext) -> Result<(), RenderError> {
        match self {
            ViewNode::Plain(view) => view.draw_layer(ctx),
            ViewNode::Scroll(scroll) => scroll.draw_layer(ctx),
        }
    }
}

impl From<View> for ViewNode {
    fn from(view: View) -> Self {
        ViewNode::Plain(view)
    }
}

impl From<ScrollView> for ViewNode {
    fn from(scroll: ScrollView) -> Self {
        ViewNode::Scroll(scroll)
    }
}

fn draw_subviews(ctx: &mut dyn PdfContext, subviews: &[ViewNode]) -> Result<(), RenderError> {
    for subview in subviews {
        let origin = subview.frame().origin();
        ctx.save_state()?;
        ctx.translate(origin.x, origin.y)?;
        subview.draw_layer(ctx)?;
        ctx.restore_state()?;
    }
    Ok(())
}
