//! `image` crate interop at the export boundary
//!
//! Spritesheet/GIF exporters consume [`image::RgbaImage`]; these conversions
//! are the only place the engine touches that type.

use image::RgbaImage;

use super::PixelCanvas;
use crate::types::{FilterMode, PixelFormat};

impl PixelCanvas {
    /// Copy the canvas into an [`RgbaImage`] for export consumers.
    pub fn to_image(&mut self) -> RgbaImage {
        let (width, height) = (self.width, self.height);
        let bytes = self.as_bytes().to_vec();
        RgbaImage::from_raw(width, height, bytes)
            .unwrap_or_else(|| RgbaImage::new(width, height))
    }

    /// Build a live canvas from an [`RgbaImage`]. Degenerate image
    /// dimensions degrade the same way as [`PixelCanvas::new`].
    pub fn from_image(image: &RgbaImage) -> PixelCanvas {
        let mut canvas = PixelCanvas::new(
            image.width() as i32,
            image.height() as i32,
            PixelFormat::Rgba8,
            FilterMode::Point,
        );
        if canvas.is_valid() {
            canvas
                .pixels_mut()
                .copy_from_slice(bytemuck::cast_slice(image.as_raw()));
            canvas.materialize();
        }
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_roundtrip() {
        let mut canvas = PixelCanvas::new(5, 3, PixelFormat::Rgba8, FilterMode::Point);
        canvas.set_pixel(4, 2, [1, 2, 3, 4]);
        canvas.set_pixel(0, 0, [250, 240, 230, 220]);

        let image = canvas.to_image();
        assert_eq!((image.width(), image.height()), (5, 3));
        assert_eq!(image.get_pixel(4, 2).0, [1, 2, 3, 4]);

        let mut back = PixelCanvas::from_image(&image);
        assert_eq!(back.pixels(), canvas.pixels());
    }

    #[test]
    fn test_from_empty_image_degrades() {
        let image = RgbaImage::new(0, 0);
        let canvas = PixelCanvas::from_image(&image);
        assert!(!canvas.is_valid());
        assert_eq!((canvas.width(), canvas.height()), (1, 1));
    }
}
