// src/error.rs
use crate::image_source::ImageSource;
use pagecast_render_core::RenderError;
use pagecast_types::Size;
use thiserror::Error;

/// Everything that can stop a page or a document from being produced.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The view (or page) has no area to draw into.
    #[error("View has zero size ({}x{})", size.width, size.height)]
    ZeroSizeView { size: Size },

    /// The image could not be read or decoded. Carries the path or buffer
    /// it was loaded from.
    #[error("Image could not be loaded from {0}")]
    ImageLoadFailed(ImageSource),

    #[error("Output path is empty")]
    EmptyOutputPath,

    #[error("Cannot create a PDF with no pages")]
    EmptyPage,

    /// The drawing context is closed and cannot accept a page.
    #[error("No PDF drawing context is available")]
    InvalidContext,

    #[error("Invalid DPI value: {0}")]
    InvalidDpi(f32),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid page manifest: {0}")]
    Manifest(String),
}

impl From<serde_json::Error> for GenerateError {
    fn from(e: serde_json::Error) -> Self {
        GenerateError::Manifest(e.to_string())
    }
}
