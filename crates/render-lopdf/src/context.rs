use crate::writer::StreamingPdfWriter;
use crate::xobject::EncodedImage;
use chrono::{DateTime, Utc};
use image::RgbaImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, StringFormat};
use pagecast_render_core::{PdfContext, RenderError};
use pagecast_types::{Color, Rect, Size};
use std::io::{Cursor, Seek, Write};

const PDF_VERSION: &str = "1.7";

/// Metadata written to the document's `/Info` dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
}

impl DocumentInfo {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.creator.is_none()
            && self.producer.is_none()
            && self.creation_date.is_none()
    }

    fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        let fields = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                dict.set(key, text_string(value));
            }
        }
        if let Some(date) = self.creation_date {
            let stamp = format!("D:{}Z", date.format("%Y%m%d%H%M%S"));
            dict.set("CreationDate", Object::String(stamp.into_bytes(), StringFormat::Literal));
        }
        dict
    }
}

/// Encodes a PDF text string: plain ASCII stays literal, anything else
/// becomes UTF-16BE with a byte order mark.
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::String(value.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn reals(values: &[f32]) -> Vec<Object> {
    values.iter().map(|v| Object::Real(*v)).collect()
}

/// Drawing state for the page currently being built.
///
/// Dropped as soon as the page is flushed, which releases its operation
/// buffer before the next page starts.
struct PageScope {
    size: Size,
    operations: Vec<Operation>,
    xobjects: Dictionary,
    state_depth: usize,
}

impl PageScope {
    fn new(size: Size) -> Self {
        Self {
            size,
            operations: Vec::new(),
            xobjects: Dictionary::new(),
            state_depth: 0,
        }
    }

    fn push(&mut self, op: &str, operands: Vec<Object>) {
        log::trace!("op {} {:?}", op, operands);
        self.operations.push(Operation::new(op, operands));
    }

    /// Wraps the buffered operations so the page draws with a top-left origin
    /// and every saved state is balanced.
    fn into_content(self) -> (Content, Dictionary) {
        let mut operations = Vec::with_capacity(self.operations.len() + self.state_depth + 3);
        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new(
            "cm",
            reals(&[1.0, 0.0, 0.0, -1.0, 0.0, self.size.height]),
        ));
        operations.extend(self.operations);
        for _ in 0..self.state_depth {
            operations.push(Operation::new("Q", vec![]));
        }
        operations.push(Operation::new("Q", vec![]));
        (Content { operations }, self.xobjects)
    }
}

/// A `PdfContext` that streams pages to `W` through lopdf objects.
pub struct LopdfContext<W: Write + Seek> {
    writer: Option<StreamingPdfWriter<W>>,
    page: Option<PageScope>,
    page_count: usize,
}

impl<W: Write + Seek> LopdfContext<W> {
    /// Writes the PDF header and returns an open context with no pages.
    pub fn new(writer: W) -> Result<Self, RenderError> {
        Ok(Self {
            writer: Some(StreamingPdfWriter::new(writer, PDF_VERSION)?),
            page: None,
            page_count: 0,
        })
    }

    /// Drops the output after a failed write. The context reports itself as
    /// closed from then on, since the byte stream is no longer coherent.
    fn poison(&mut self) {
        log::debug!("Closing PDF context after a failed write");
        self.writer = None;
        self.page = None;
    }

    fn writer_mut(&mut self) -> Result<&mut StreamingPdfWriter<W>, RenderError> {
        self.writer.as_mut().ok_or(RenderError::Closed)
    }

    fn page_mut(&mut self) -> Result<&mut PageScope, RenderError> {
        if self.writer.is_none() {
            return Err(RenderError::Closed);
        }
        self.page.as_mut().ok_or(RenderError::NoPage)
    }

    /// Writes the current page's content stream and page object.
    fn flush_page(&mut self) -> Result<(), RenderError> {
        let Some(page) = self.page.take() else {
            return Ok(());
        };
        let size = page.size;
        let (content, xobjects) = page.into_content();
        let writer = self.writer_mut()?;
        let content_id = writer.write_content_stream(content)?;

        let mut resources = Dictionary::new();
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => writer.pages_id,
            "MediaBox" => reals(&[0.0, 0.0, size.width, size.height]),
            "Contents" => content_id,
            "Resources" => resources,
        };
        let page_id = writer.write_object(page_dict.into())?;
        writer.push_page_id(page_id);
        log::debug!(
            "Wrote page {} ({}x{} pt) as object {:?}",
            writer.page_count(),
            size.width,
            size.height,
            page_id
        );
        Ok(())
    }

    fn write_image(&mut self, image: &RgbaImage) -> Result<ObjectId, RenderError> {
        let mut encoded = EncodedImage::from_rgba(image)?;
        let writer = self.writer_mut()?;
        let smask_id = match encoded.soft_mask_stream() {
            Some(mask) => Some(writer.write_object(Object::Stream(mask))?),
            None => None,
        };
        Ok(writer.write_object(Object::Stream(encoded.into_xobject_stream(smask_id)))?)
    }

    /// Flushes the last page and writes the document trailer.
    ///
    /// An `info` with no fields set omits the `/Info` dictionary entirely.
    pub fn finish(mut self, info: &DocumentInfo) -> Result<W, RenderError> {
        self.flush_page()?;
        let writer = self.writer.take().ok_or(RenderError::Closed)?;
        let info = (!info.is_empty()).then(|| info.to_dictionary());
        Ok(writer.finish(info)?)
    }
}

impl LopdfContext<Cursor<Vec<u8>>> {
    /// An in-memory context.
    pub fn in_memory() -> Result<Self, RenderError> {
        Self::new(Cursor::new(Vec::new()))
    }

    pub fn finish_into_buffer(self, info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
        Ok(self.finish(info)?.into_inner())
    }
}

impl<W: Write + Seek> PdfContext for LopdfContext<W> {
    fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    fn begin_page(&mut self, bounds: Rect) -> Result<(), RenderError> {
        if self.writer.is_none() {
            return Err(RenderError::Closed);
        }
        if let Err(err) = self.flush_page() {
            self.poison();
            return Err(err);
        }
        self.page = Some(PageScope::new(bounds.size()));
        self.page_count += 1;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn save_state(&mut self) -> Result<(), RenderError> {
        let page = self.page_mut()?;
        page.push("q", vec![]);
        page.state_depth += 1;
        Ok(())
    }

    fn restore_state(&mut self) -> Result<(), RenderError> {
        let page = self.page_mut()?;
        if page.state_depth == 0 {
            return Err(RenderError::Pdf("restore_state without matching save_state".into()));
        }
        page.push("Q", vec![]);
        page.state_depth -= 1;
        Ok(())
    }

    fn translate(&mut self, dx: f32, dy: f32) -> Result<(), RenderError> {
        self.page_mut()?
            .push("cm", reals(&[1.0, 0.0, 0.0, 1.0, dx, dy]));
        Ok(())
    }

    fn scale(&mut self, sx: f32, sy: f32) -> Result<(), RenderError> {
        self.page_mut()?
            .push("cm", reals(&[sx, 0.0, 0.0, sy, 0.0, 0.0]));
        Ok(())
    }

    fn clip_rect(&mut self, rect: Rect) -> Result<(), RenderError> {
        let page = self.page_mut()?;
        page.push("re", reals(&[rect.x, rect.y, rect.width, rect.height]));
        page.push("W", vec![]);
        page.push("n", vec![]);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        let page = self.page_mut()?;
        if color.is_transparent() {
            return Ok(());
        }
        page.push("rg", reals(&color.unit_rgb()));
        page.push("re", reals(&[rect.x, rect.y, rect.width, rect.height]));
        page.push("f", vec![]);
        Ok(())
    }

    fn draw_image(&mut self, image: &RgbaImage, rect: Rect) -> Result<(), RenderError> {
        self.page_mut()?;
        if image.width() == 0 || image.height() == 0 {
            return Ok(());
        }
        let image_id = match self.write_image(image) {
            Ok(id) => id,
            Err(err) => {
                self.poison();
                return Err(err);
            }
        };
        let page = self.page_mut()?;
        let name = format!("Im{}", page.xobjects.len() + 1);
        page.xobjects.set(name.as_bytes().to_vec(), image_id);

        // Image space has row 0 at the top of the unit square; map it onto
        // `rect` in the flipped page space.
        page.push("q", vec![]);
        page.push(
            "cm",
            reals(&[rect.width, 0.0, 0.0, -rect.height, rect.x, rect.y + rect.height]),
        );
        page.push("Do", vec![Object::Name(name.into_bytes())]);
        page.push("Q", vec![]);
        Ok(())
    }
}
