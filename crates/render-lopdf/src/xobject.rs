//! Image XObject encoding.
//!
//! Rasters are split into a DeviceRGB colour stream and, when any pixel is
//! not fully opaque, a DeviceGray soft mask. Both are Flate compressed.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::RgbaImage;
use lopdf::{dictionary, Dictionary, Stream};
use pagecast_render_core::RenderError;
use std::io::Write;

pub(crate) struct EncodedImage {
    pub width: u32,
    pub height: u32,
    pub color: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl EncodedImage {
    pub fn from_rgba(image: &RgbaImage) -> Result<Self, RenderError> {
        let (width, height) = image.dimensions();
        let pixel_count = (width as usize) * (height as usize);
        let mut rgb = Vec::with_capacity(pixel_count * 3);
        let mut alpha = Vec::with_capacity(pixel_count);
        for pixel in image.pixels() {
            rgb.extend_from_slice(&pixel.0[..3]);
            alpha.push(pixel.0[3]);
        }
        let alpha = if alpha.iter().any(|&a| a < u8::MAX) {
            Some(compress(&alpha)?)
        } else {
            None
        };

        Ok(Self {
            width,
            height,
            color: compress(&rgb)?,
            alpha,
        })
    }

    fn base_dict(&self, color_space: &str) -> Dictionary {
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8_i64,
            "Filter" => "FlateDecode",
        }
    }

    /// The soft mask stream, if the image carries transparency.
    pub fn soft_mask_stream(&mut self) -> Option<Stream> {
        let alpha = self.alpha.take()?;
        Some(Stream::new(self.base_dict("DeviceGray"), alpha))
    }

    /// The colour stream. `smask` references a previously written soft mask.
    pub fn into_xobject_stream(self, smask: Option<lopdf::ObjectId>) -> Stream {
        let mut dict = self.base_dict("DeviceRGB");
        if let Some(smask) = smask {
            dict.set("SMask", smask);
        }
        Stream::new(dict, self.color)
    }
}

fn compress(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| RenderError::Image(e.to_string()))?;
    encoder.finish().map_err(|e| RenderError::Image(e.to_string()))
}
