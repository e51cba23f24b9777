//! Thumbnail generation

use super::PixelCanvas;

/// Resize filter for thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThumbnailFilter {
    /// Nearest-neighbor sampling: fast, crisp, the default for pixel art.
    #[default]
    Nearest,
    /// Box average over each source cell: slower, smoother for photos.
    AreaAverage,
}

impl PixelCanvas {
    /// Produce a downscaled copy no larger than `max_size` on either axis,
    /// preserving aspect ratio. Canvases already under the cap are copied
    /// as-is; thumbnails never upscale.
    ///
    /// `max_size` is clamped to [`crate::constants::THUMBNAIL_MAX_SIZE`].
    pub fn thumbnail(&mut self, max_size: u32, filter: ThumbnailFilter) -> PixelCanvas {
        let cap = max_size.clamp(1, crate::constants::THUMBNAIL_MAX_SIZE);
        let (width, height) = (self.width, self.height);
        if width <= cap && height <= cap {
            self.ensure_decompressed();
            return PixelCanvas::from_canvas(self);
        }

        let (thumb_w, thumb_h) = if width >= height {
            let h = (height as u64 * cap as u64 / width as u64).max(1) as u32;
            (cap, h)
        } else {
            let w = (width as u64 * cap as u64 / height as u64).max(1) as u32;
            (w, cap)
        };

        let mut thumb = PixelCanvas::new(
            thumb_w as i32,
            thumb_h as i32,
            self.format,
            self.filter,
        );
        self.ensure_decompressed();

        for ty in 0..thumb_h {
            for tx in 0..thumb_w {
                let color = match filter {
                    ThumbnailFilter::Nearest => {
                        let sx = (tx as u64 * width as u64 / thumb_w as u64) as u32;
                        let sy = (ty as u64 * height as u64 / thumb_h as u64) as u32;
                        self.pixel_unchecked(sx, sy)
                    }
                    ThumbnailFilter::AreaAverage => self.cell_average(tx, ty, thumb_w, thumb_h),
                };
                thumb.set_pixel_unchecked(tx, ty, color);
            }
        }
        thumb.materialize();
        thumb
    }

    /// Average of the source cell that maps onto thumbnail pixel `(tx, ty)`.
    fn cell_average(&self, tx: u32, ty: u32, thumb_w: u32, thumb_h: u32) -> crate::color::Rgba8 {
        let x0 = (tx as u64 * self.width as u64 / thumb_w as u64) as u32;
        let y0 = (ty as u64 * self.height as u64 / thumb_h as u64) as u32;
        let x1 = (((tx + 1) as u64 * self.width as u64 / thumb_w as u64) as u32)
            .max(x0 + 1)
            .min(self.width);
        let y1 = (((ty + 1) as u64 * self.height as u64 / thumb_h as u64) as u32)
            .max(y0 + 1)
            .min(self.height);

        let mut sums = [0u64; 4];
        for sy in y0..y1 {
            for sx in x0..x1 {
                let pixel = self.pixel_unchecked(sx, sy);
                for (sum, channel) in sums.iter_mut().zip(pixel) {
                    *sum += channel as u64;
                }
            }
        }
        let count = ((x1 - x0) as u64 * (y1 - y0) as u64).max(1);
        [
            (sums[0] / count) as u8,
            (sums[1] / count) as u8,
            (sums[2] / count) as u8,
            (sums[3] / count) as u8,
        ]
    }
}
