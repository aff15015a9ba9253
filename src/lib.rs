//! Render view hierarchies, scroll containers and images into paged PDF
//! documents.
//!
//! Every renderable item produces exactly one page sized to its content:
//! a view's frame, a scroll view's full content area or an image's pixel
//! dimensions. Pages are drawn into an explicit [`PdfContext`]; the
//! [`PdfGenerator`] wires that up to a lopdf-backed file or buffer.
//!
//! ```no_run
//! use pagecast::{ImageSource, PdfGenerator, Page};
//!
//! let pages = vec![
//!     Page::from(ImageSource::Path("scan-1.png".into())),
//!     Page::from(ImageSource::Path("scan-2.png".into())),
//! ];
//! PdfGenerator::new().generate(pages, "scans.pdf")?;
//! # Ok::<(), pagecast::GenerateError>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod image_source;
pub mod manifest;
pub mod renderable;
pub mod view;

#[cfg(test)]
mod test_support;

pub use config::{Dpi, GenerateOptions};
pub use error::GenerateError;
pub use generator::{Page, PdfGenerator, PdfGeneratorBuilder};
pub use image_source::{Image, ImageSource};
pub use manifest::Manifest;
pub use renderable::Renderable;
pub use view::{ScrollView, View, ViewNode};

pub use pagecast_render_core::{PdfContext, RenderError};
pub use pagecast_render_lopdf::{DocumentInfo, LopdfContext};
pub use pagecast_types::{Color, Point, Rect, Size};
