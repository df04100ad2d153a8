//! Off-screen sink backed by an RGBA image, for writing frames to disk.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::sink::PixelSink;
use crate::colors;

pub struct ImageSink {
    image: RgbaImage,
}

impl ImageSink {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode the image; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        log::debug!(
            "saving {}x{} frame to {}",
            self.image.width(),
            self.image.height(),
            path.as_ref().display()
        );
        self.image.save(path)
    }
}

impl PixelSink for ImageSink {
    type Color = Rgba<u8>;

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        let (width, height) = self.image.dimensions();
        if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    fn clear(&mut self, color: Rgba<u8>) {
        self.image.pixels_mut().for_each(|p| *p = color);
    }
}

/// Converts a packed ARGB8888 color into an image pixel.
pub fn argb_to_rgba(color: u32) -> Rgba<u8> {
    let (a, r, g, b) = colors::unpack_argb(color);
    Rgba([r, g, b, a])
}
