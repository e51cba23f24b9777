//! Fixed-size RGBA8 pixel canvas with lazy compressed storage
//!
//! A [`PixelCanvas`] owns one animation frame's pixels. Writes mutate the
//! logical pixel array and accumulate a pending dirty rectangle; a separate,
//! explicit [`PixelCanvas::materialize`] step consumes that rectangle and
//! bumps the revision counter the host watches for texture re-upload. A fill
//! batch touching thousands of pixels therefore materializes once, not once
//! per write.
//!
//! After [`PixelCanvas::load`], pixels stay in their compressed form until
//! first touched; see [`PixelCanvas::ensure_decompressed`].

mod convert;
mod persistence;
mod thumbnail;

pub use persistence::PersistError;
pub use thumbnail::ThumbnailFilter;

use glam::Vec2;
use tracing::{debug, warn};

use crate::addressing::{SymmetryMode, wrap_point};
use crate::color::{Rgba8, TRANSPARENT};
use crate::types::{FilterMode, PixelFormat, WrapAxes};

/// Rectangular region of pending writes awaiting materialization.
/// Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl DirtyRect {
    fn point(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

/// Backing storage: exactly one form is authoritative at a time.
#[derive(Debug, Clone)]
pub(crate) enum PixelStore {
    /// Row-major live pixels, length == width * height.
    Live(Vec<Rgba8>),
    /// Compressed payload from a persistence record, not yet touched.
    Compressed(Vec<u8>),
}

/// One animation frame's pixel buffer.
#[derive(Debug)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    format: PixelFormat,
    filter: FilterMode,
    wrap: WrapAxes,
    pub(crate) store: PixelStore,
    valid: bool,
    dirty: Option<DirtyRect>,
    revision: u64,
}

impl PixelCanvas {
    /// Create a transparent canvas.
    ///
    /// Invalid dimensions degrade to a 1x1 transparent placeholder with the
    /// validity flag cleared; creation never fails.
    pub fn new(width: i32, height: i32, format: PixelFormat, filter: FilterMode) -> Self {
        if width <= 0 || height <= 0 {
            warn!(
                "invalid canvas dimensions {}x{}, degrading to 1x1 placeholder",
                width, height
            );
            return Self {
                width: 1,
                height: 1,
                format,
                filter,
                wrap: WrapAxes::NONE,
                store: PixelStore::Live(vec![TRANSPARENT]),
                valid: false,
                dirty: None,
                revision: 0,
            };
        }
        let area = width as usize * height as usize;
        Self {
            width: width as u32,
            height: height as u32,
            format,
            filter,
            wrap: WrapAxes::NONE,
            store: PixelStore::Live(vec![TRANSPARENT; area]),
            valid: true,
            dirty: None,
            revision: 0,
        }
    }

    /// Deep copy of `source`, preserving its stored form: a still-compressed
    /// source yields a still-compressed copy (no decompression).
    pub fn from_canvas(source: &PixelCanvas) -> Self {
        Self {
            width: source.width,
            height: source.height,
            format: source.format,
            filter: source.filter,
            wrap: source.wrap,
            store: source.store.clone(),
            valid: source.valid,
            dirty: None,
            revision: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    #[inline]
    pub fn wrap(&self) -> WrapAxes {
        self.wrap
    }

    pub fn set_wrap(&mut self, wrap: WrapAxes) {
        self.wrap = wrap;
    }

    /// False for degraded placeholders (bad dimensions or corrupt payload).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Pivot at the canvas center, in pixel coordinates.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.width.saturating_sub(1)) as f32 / 2.0,
            (self.height.saturating_sub(1)) as f32 / 2.0,
        )
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub(crate) fn degrade(&mut self) {
        self.store = PixelStore::Live(vec![TRANSPARENT; self.area()]);
        self.valid = false;
    }

    /// Checked read. Out-of-bounds, invalid, or still-compressed canvases
    /// return the transparent default rather than failing.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba8 {
        if !self.valid || x >= self.width || y >= self.height {
            return TRANSPARENT;
        }
        match &self.store {
            PixelStore::Live(pixels) => pixels[self.index(x, y)],
            PixelStore::Compressed(_) => {
                debug!("get_pixel on a compressed canvas; call ensure_decompressed first");
                TRANSPARENT
            }
        }
    }

    /// Checked write; does nothing out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.ensure_decompressed();
        self.set_pixel_unchecked(x, y, color);
    }

    /// Hot-path read used by fill/paint. The caller guarantees bounds and a
    /// live store.
    #[inline]
    pub fn pixel_unchecked(&self, x: u32, y: u32) -> Rgba8 {
        debug_assert!(x < self.width && y < self.height);
        match &self.store {
            PixelStore::Live(pixels) => pixels[y as usize * self.width as usize + x as usize],
            PixelStore::Compressed(_) => {
                debug_assert!(false, "pixel_unchecked on a compressed canvas");
                TRANSPARENT
            }
        }
    }

    /// Hot-path write used by fill/paint. The caller guarantees bounds and a
    /// live store. Extends the pending dirty rect; does not materialize.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, color: Rgba8) {
        debug_assert!(x < self.width && y < self.height);
        let index = y as usize * self.width as usize + x as usize;
        if let PixelStore::Live(pixels) = &mut self.store {
            pixels[index] = color;
        } else {
            debug_assert!(false, "set_pixel_unchecked on a compressed canvas");
            return;
        }
        self.mark_dirty(x, y);
    }

    /// Write `color` at `(x, y)` and at every symmetry companion. Each point
    /// independently passes the canvas wrap/bounds check first. This is the
    /// single write path shared by interactive painting and flood fill.
    pub fn write_symmetric(
        &mut self,
        x: i32,
        y: i32,
        color: Rgba8,
        symmetry: SymmetryMode,
        pivot: Vec2,
    ) {
        self.ensure_decompressed();
        for (px, py) in symmetry.companion_points(x, y, pivot).iter() {
            if let Some((wx, wy)) = wrap_point(px, py, self.width, self.height, self.wrap) {
                self.set_pixel_unchecked(wx, wy, color);
            }
        }
    }

    /// Fill the whole canvas with one color.
    pub fn clear(&mut self, color: Rgba8) {
        self.store = PixelStore::Live(vec![color; self.area()]);
        self.dirty = Some(DirtyRect {
            min_x: 0,
            min_y: 0,
            max_x: self.width - 1,
            max_y: self.height - 1,
        });
    }

    /// Live pixels, decompressing on first touch.
    pub fn pixels(&mut self) -> &[Rgba8] {
        self.ensure_decompressed();
        match &self.store {
            PixelStore::Live(pixels) => pixels,
            // ensure_decompressed always leaves a live store behind
            PixelStore::Compressed(_) => unreachable!(),
        }
    }

    /// Mutable live pixels. Marks the whole canvas dirty since the extent of
    /// external edits is unknown.
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        self.ensure_decompressed();
        self.dirty = Some(DirtyRect {
            min_x: 0,
            min_y: 0,
            max_x: self.width - 1,
            max_y: self.height - 1,
        });
        match &mut self.store {
            PixelStore::Live(pixels) => pixels,
            PixelStore::Compressed(_) => unreachable!(),
        }
    }

    /// Raw RGBA8 bytes of the live buffer (row-major).
    pub fn as_bytes(&mut self) -> &[u8] {
        bytemuck::cast_slice(self.pixels())
    }

    #[inline]
    fn mark_dirty(&mut self, x: u32, y: u32) {
        match &mut self.dirty {
            Some(rect) => rect.include(x, y),
            None => self.dirty = Some(DirtyRect::point(x, y)),
        }
    }

    /// True when writes are pending materialization.
    #[inline]
    pub fn has_pending_writes(&self) -> bool {
        self.dirty.is_some()
    }

    /// Consume pending writes, making the buffer presentable. Returns the
    /// affected region, if any, and bumps the revision the host polls.
    pub fn materialize(&mut self) -> Option<DirtyRect> {
        let region = self.dirty.take();
        if let Some(rect) = &region {
            self.revision += 1;
            debug!(
                "materialize: ({}, {}) {}x{} -> revision {}",
                rect.min_x,
                rect.min_y,
                rect.width(),
                rect.height(),
                self.revision
            );
        }
        region
    }

    /// Monotonic counter bumped by each non-empty [`Self::materialize`].
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = PixelCanvas::new(8, 8, PixelFormat::Rgba8, FilterMode::Point);
        assert!(canvas.is_valid());
        assert_eq!(canvas.area(), 64);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(canvas.get_pixel(x, y), TRANSPARENT);
            }
        }
    }

    #[test]
    fn test_invalid_dimensions_degrade() {
        let canvas = PixelCanvas::new(0, 10, PixelFormat::Rgba8, FilterMode::Point);
        assert!(!canvas.is_valid());
        assert_eq!((canvas.width(), canvas.height()), (1, 1));
        assert_eq!(canvas.get_pixel(0, 0), TRANSPARENT);

        let canvas = PixelCanvas::new(-3, 10, PixelFormat::Rgba8, FilterMode::Point);
        assert!(!canvas.is_valid());
    }

    #[test]
    fn test_get_set_pixel() {
        let mut canvas = PixelCanvas::new(10, 10, PixelFormat::Rgba8, FilterMode::Point);
        let red = [255, 0, 0, 255];
        canvas.set_pixel(5, 5, red);
        assert_eq!(canvas.get_pixel(5, 5), red);
        // Out of bounds reads are transparent, writes ignored
        assert_eq!(canvas.get_pixel(100, 100), TRANSPARENT);
        canvas.set_pixel(100, 100, red);
    }

    #[test]
    fn test_writes_batch_into_one_materialize() {
        let mut canvas = PixelCanvas::new(16, 16, PixelFormat::Rgba8, FilterMode::Point);
        assert!(!canvas.has_pending_writes());

        canvas.set_pixel(2, 3, [1, 2, 3, 255]);
        canvas.set_pixel(10, 12, [4, 5, 6, 255]);
        assert!(canvas.has_pending_writes());
        assert_eq!(canvas.revision(), 0);

        let rect = canvas.materialize().unwrap();
        assert_eq!((rect.min_x, rect.min_y, rect.max_x, rect.max_y), (2, 3, 10, 12));
        assert_eq!(canvas.revision(), 1);
        assert!(!canvas.has_pending_writes());
        assert_eq!(canvas.materialize(), None);
        assert_eq!(canvas.revision(), 1);
    }

    #[test]
    fn test_clear() {
        let mut canvas = PixelCanvas::new(4, 4, PixelFormat::Rgba8, FilterMode::Point);
        let white = [255, 255, 255, 255];
        canvas.clear(white);
        assert_eq!(canvas.get_pixel(3, 3), white);
        let rect = canvas.materialize().unwrap();
        assert_eq!((rect.width(), rect.height()), (4, 4));
    }

    #[test]
    fn test_from_canvas_copies_pixels() {
        let mut source = PixelCanvas::new(4, 4, PixelFormat::Rgba8, FilterMode::Bilinear);
        source.set_pixel(1, 2, [9, 8, 7, 255]);
        let copy = PixelCanvas::from_canvas(&source);
        assert_eq!(copy.get_pixel(1, 2), [9, 8, 7, 255]);
        assert_eq!(copy.filter(), FilterMode::Bilinear);
        assert_eq!(copy.revision(), 0);
    }

    #[test]
    fn test_write_symmetric_mirrors_and_wraps() {
        let mut canvas = PixelCanvas::new(8, 8, PixelFormat::Rgba8, FilterMode::Point);
        let red = [255, 0, 0, 255];
        let pivot = canvas.center();
        canvas.write_symmetric(1, 2, red, SymmetryMode::Horizontal, pivot);
        assert_eq!(canvas.get_pixel(1, 2), red);
        assert_eq!(canvas.get_pixel(6, 2), red);

        // A companion landing out of bounds is dropped without wrap...
        let mut canvas = PixelCanvas::new(8, 8, PixelFormat::Rgba8, FilterMode::Point);
        canvas.write_symmetric(0, 0, red, SymmetryMode::Horizontal, Vec2::new(5.0, 5.0));
        assert_eq!(canvas.get_pixel(0, 0), red);
        // ...and wraps onto the canvas with wrap enabled: companion x = 10 -> 2
        let mut canvas = PixelCanvas::new(8, 8, PixelFormat::Rgba8, FilterMode::Point);
        canvas.set_wrap(WrapAxes {
            horizontal: true,
            vertical: false,
        });
        canvas.write_symmetric(0, 0, red, SymmetryMode::Horizontal, Vec2::new(5.0, 5.0));
        assert_eq!(canvas.get_pixel(2, 0), red);
    }

    #[test]
    fn test_as_bytes_length() {
        let mut canvas = PixelCanvas::new(3, 2, PixelFormat::Rgba8, FilterMode::Point);
        assert_eq!(canvas.as_bytes().len(), 3 * 2 * 4);
    }
}
