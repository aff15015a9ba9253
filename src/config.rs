use crate::error::GenerateError;

/// Points per inch in PDF user space.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Resolution at which pixel-sized content is placed on the page.
///
/// At the default 72 DPI one pixel is one point, so a page is exactly as
/// large as the item it renders. Higher values shrink the page and its
/// content by `72 / dpi`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Dpi {
    /// 72 DPI. Pixels map one-to-one onto points.
    #[default]
    Default,
    /// 300 DPI, for print-resolution images.
    Dpi300,
    Custom(f32),
}

impl Dpi {
    pub fn value(&self) -> f32 {
        match self {
            Dpi::Default => POINTS_PER_INCH,
            Dpi::Dpi300 => 300.0,
            Dpi::Custom(value) => *value,
        }
    }

    /// Factor applied to page sizes and drawing.
    pub fn scale_factor(&self) -> f32 {
        POINTS_PER_INCH / self.value()
    }

    pub(crate) fn validate(self) -> Result<Self, GenerateError> {
        let value = self.value();
        if value.is_finite() && value > 0.0 {
            Ok(self)
        } else {
            Err(GenerateError::InvalidDpi(value))
        }
    }
}

impl From<f32> for Dpi {
    fn from(value: f32) -> Self {
        if value == POINTS_PER_INCH {
            Dpi::Default
        } else {
            Dpi::Custom(value)
        }
    }
}

/// Document-level settings for a generator.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub dpi: Dpi,
}
