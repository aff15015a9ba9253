// src/generator.rs
use crate::config::{Dpi, GenerateOptions};
use crate::error::GenerateError;
use crate::image_source::{Image, ImageSource};
use crate::renderable::{begin_page, Renderable};
use crate::view::{ScrollView, View};
use chrono::Utc;
use pagecast_render_core::PdfContext;
use pagecast_render_lopdf::{DocumentInfo, LopdfContext};
use pagecast_types::Size;
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

/// One entry in a document, in page order.
#[derive(Debug, Clone)]
pub enum Page {
    /// A view, scroll view or decoded image.
    Item(Renderable),
    /// An image that is decoded when its page is reached.
    Source(ImageSource),
    /// An empty page of the given size.
    Blank(Size),
}

impl Page {
    fn render(self, ctx: &mut dyn PdfContext, scale: f32) -> Result<(), GenerateError> {
        match self {
            Page::Item(mut item) => item.render_page_scaled(ctx, scale),
            Page::Source(source) => source.into_image()?.render_page_scaled(ctx, scale),
            Page::Blank(size) => begin_page(ctx, size, scale),
        }
    }
}

impl From<Renderable> for Page {
    fn from(item: Renderable) -> Self {
        Page::Item(item)
    }
}

impl From<View> for Page {
    fn from(view: View) -> Self {
        Page::Item(Renderable::View(view))
    }
}

impl From<ScrollView> for Page {
    fn from(scroll: ScrollView) -> Self {
        Page::Item(Renderable::Scroll(scroll))
    }
}

impl From<Image> for Page {
    fn from(image: Image) -> Self {
        Page::Item(Renderable::Image(image))
    }
}

impl From<ImageSource> for Page {
    fn from(source: ImageSource) -> Self {
        Page::Source(source)
    }
}

/// Turns a sequence of pages into a PDF document.
#[derive(Debug, Clone, Default)]
pub struct PdfGenerator {
    options: GenerateOptions,
}

impl PdfGenerator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn builder() -> PdfGeneratorBuilder {
        PdfGeneratorBuilder::new()
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Writes one page per entry to the file at `output_path`.
    ///
    /// The path and page list are checked before the file is created. If a
    /// page fails to render, the partially written file is removed.
    pub fn generate<I, P>(
        &self,
        pages: I,
        output_path: impl AsRef<Path>,
    ) -> Result<(), GenerateError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Page>,
    {
        let output_path = output_path.as_ref();
        if output_path.as_os_str().is_empty() {
            return Err(GenerateError::EmptyOutputPath);
        }
        let mut pages = pages.into_iter().peekable();
        if pages.peek().is_none() {
            return Err(GenerateError::EmptyPage);
        }

        let file = File::create(output_path)?;
        let result = LopdfContext::new(BufWriter::new(file))
            .map_err(GenerateError::from)
            .and_then(|ctx| self.render_into(ctx, pages));
        match result {
            Ok(_) => {
                log::info!("Wrote {}", output_path.display());
                Ok(())
            }
            Err(err) => {
                if let Err(cleanup) = fs::remove_file(output_path) {
                    log::warn!(
                        "Failed to remove incomplete PDF '{}': {}",
                        output_path.display(),
                        cleanup
                    );
                }
                Err(err)
            }
        }
    }

    /// Renders the pages into an in-memory PDF.
    pub fn generate_to_vec<I, P>(&self, pages: I) -> Result<Vec<u8>, GenerateError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Page>,
    {
        Ok(self
            .generate_to_writer(pages, Cursor::new(Vec::new()))?
            .into_inner())
    }

    /// Renders the pages into `writer` and hands it back once the document
    /// trailer has been written.
    pub fn generate_to_writer<I, P, W>(&self, pages: I, writer: W) -> Result<W, GenerateError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Page>,
        W: Write + Seek,
    {
        let mut pages = pages.into_iter().peekable();
        if pages.peek().is_none() {
            return Err(GenerateError::EmptyPage);
        }
        self.render_into(LopdfContext::new(writer)?, pages)
    }

    fn render_into<I, P, W>(&self, mut ctx: LopdfContext<W>, pages: I) -> Result<W, GenerateError>
    where
        I: Iterator<Item = P>,
        P: Into<Page>,
        W: Write + Seek,
    {
        let scale = self.options.dpi.scale_factor();
        for (index, page) in pages.enumerate() {
            log::debug!("Rendering page {}", index + 1);
            let page: Page = page.into();
            page.render(&mut ctx, scale)?;
        }
        Ok(ctx.finish(&self.document_info())?)
    }

    fn document_info(&self) -> DocumentInfo {
        DocumentInfo {
            title: self.options.title.clone(),
            author: self.options.author.clone(),
            creator: self.options.creator.clone(),
            producer: Some(format!("pagecast {}", env!("CARGO_PKG_VERSION"))),
            creation_date: Some(Utc::now()),
        }
    }
}

/// A builder for creating a `PdfGenerator`.
#[derive(Debug, Clone, Default)]
pub struct PdfGeneratorBuilder {
    options: GenerateOptions,
}

impl PdfGeneratorBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.options.author = Some(author.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.options.creator = Some(creator.into());
        self
    }

    pub fn with_dpi(mut self, dpi: Dpi) -> Self {
        self.options.dpi = dpi;
        self
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the options. Fails with `InvalidDpi` for a DPI that is not
    /// a positive finite number.
    pub fn build(self) -> Result<PdfGenerator, GenerateError> {
        self.options.dpi.validate()?;
        Ok(PdfGenerator {
            options: self.options,
        })
    }
}
