#![allow(dead_code)]

use image::{ImageFormat, Rgba, RgbaImage};
use pagecast::{Color, Image, Point, Rect, ScrollView, Size, View};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Encode a solid-colour image in the given format
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
    let result = match format {
        // JPEG has no alpha channel
        ImageFormat::Jpeg => {
            image::DynamicImage::ImageRgba8(img).to_rgb8().write_to(&mut out, format)
        }
        _ => img.write_to(&mut out, format),
    };
    result.expect("encode fixture image");
    out.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encoded_image(width, height, ImageFormat::Png)
}

/// Write a PNG into `dir` and return its path
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(width, height)).expect("write fixture image");
    path
}

pub fn solid_image(width: u32, height: u32) -> Image {
    Image::from_rgba(RgbaImage::from_pixel(width, height, Rgba([0, 0, 255, 255])))
}

/// A card-like view with a header image and a coloured body
pub fn card_view() -> View {
    View::new(Rect::new(16.0, 64.0, 320.0, 480.0))
        .with_background(Color::WHITE)
        .with_subview(
            View::new(Rect::new(0.0, 0.0, 320.0, 120.0)).with_contents(solid_image(32, 12)),
        )
        .with_subview(
            View::new(Rect::new(0.0, 120.0, 320.0, 360.0)).with_background(Color::gray(230)),
        )
}

/// A scroll view showing 200pt of a 1200pt tall content area, scrolled to 500pt
pub fn long_scroll_view() -> ScrollView {
    let mut scroll = ScrollView::new(Rect::new(0.0, 44.0, 375.0, 200.0), Size::new(375.0, 1200.0))
        .with_offset(Point::new(0.0, 500.0))
        .with_background(Color::WHITE);
    for row in 0..12 {
        scroll = scroll.with_subview(
            View::new(Rect::new(0.0, row as f32 * 100.0, 375.0, 100.0))
                .with_background(Color::gray((row * 20) as u8)),
        );
    }
    scroll
}
