//! Core rendering abstractions for PDF generation.
//!
//! This crate provides the seam between page renderers and PDF backends:
//! - `PdfContext`, the explicit drawing surface a page is rendered into
//! - `RenderError`, the failures a backend can report

mod error;
mod traits;

pub use error::RenderError;
pub use traits::PdfContext;
