//! Image sources and their normalized in-memory form.
//!
//! Every source, whatever its origin, is converted into an [`Image`]: an
//! RGBA8 raster whose size in points equals its pixel size.

use crate::error::GenerateError;
use image::{DynamicImage, RgbaImage};
use pagecast_types::Size;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A decoded RGBA8 raster. Cloning shares the pixel buffer.
#[derive(Clone)]
pub struct Image {
    pixels: Arc<RgbaImage>,
}

impl Image {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Pixel dimensions expressed as a size in points.
    pub fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl From<RgbaImage> for Image {
    fn from(pixels: RgbaImage) -> Self {
        Self::from_rgba(pixels)
    }
}

impl From<DynamicImage> for Image {
    fn from(image: DynamicImage) -> Self {
        Self::from_rgba(image.into_rgba8())
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Where an image comes from.
#[derive(Clone)]
pub enum ImageSource {
    /// An encoded image file on disk.
    Path(PathBuf),
    /// Encoded image bytes (PNG, JPEG or GIF).
    Data(Vec<u8>),
    /// An already decoded image.
    Handle(Image),
}

impl ImageSource {
    /// Decodes the source into a normalized image.
    ///
    /// Path and buffer sources fail with [`GenerateError::ImageLoadFailed`],
    /// which hands the path or buffer back to the caller. A handle never
    /// fails.
    pub fn into_image(self) -> Result<Image, GenerateError> {
        match self {
            ImageSource::Path(path) => match image::open(&path) {
                Ok(decoded) => Ok(decoded.into()),
                Err(_) => Err(GenerateError::ImageLoadFailed(ImageSource::Path(path))),
            },
            ImageSource::Data(data) => match image::load_from_memory(&data) {
                Ok(decoded) => Ok(decoded.into()),
                Err(_) => Err(GenerateError::ImageLoadFailed(ImageSource::Data(data))),
            },
            ImageSource::Handle(image) => Ok(image),
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            ImageSource::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            ImageSource::Data(data) => Some(data),
            _ => None,
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => write!(f, "path '{}'", path.display()),
            ImageSource::Data(data) => write!(f, "in-memory buffer of {} bytes", data.len()),
            ImageSource::Handle(image) => {
                write!(f, "image handle ({}x{})", image.width(), image.height())
            }
        }
    }
}

// Buffers can be megabytes; print their length instead of their bytes.
impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            ImageSource::Data(data) => write!(f, "Data({} bytes)", data.len()),
            ImageSource::Handle(image) => f.debug_tuple("Handle").field(image).finish(),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(data: Vec<u8>) -> Self {
        ImageSource::Data(data)
    }
}

impl From<Image> for ImageSource {
    fn from(image: Image) -> Self {
        ImageSource::Handle(image)
    }
}
