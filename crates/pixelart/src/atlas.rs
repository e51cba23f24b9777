//! Frame-atlas packing for export and batched playback
//!
//! Packs an ordered sequence of same-sized frames into one grid atlas plus
//! per-frame rectangles. The atlas is derived data: it is rebuilt on demand
//! and never persisted.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::canvas::PixelCanvas;
use crate::frame::Frame;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("cannot pack an empty frame sequence")]
    Empty,
    #[error("frame {index} is {found_w}x{found_h}, expected {expected_w}x{expected_h}")]
    MixedFrameSizes {
        index: usize,
        found_w: u32,
        found_h: u32,
        expected_w: u32,
        expected_h: u32,
    },
}

/// Placement of one frame inside a packed atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A packed atlas plus the layout downstream consumers need.
///
/// `frames_x`/`frames_y` are the columns and rows actually occupied, which
/// UV-tiling consumers need instead of the raw grid capacity: the last row
/// may be partially filled.
#[derive(Debug)]
pub struct AtlasInfo {
    pub canvas: PixelCanvas,
    /// Grid capacity, in cells.
    pub grid_width: u32,
    pub grid_height: u32,
    /// Columns/rows actually occupied by frames.
    pub frames_x: u32,
    pub frames_y: u32,
    pub frame_count: u32,
    /// One rectangle per input frame, in input order.
    pub rects: Vec<FrameRect>,
}

/// Pack `frames` into a square-ish grid atlas.
///
/// The grid is `ceil(sqrt(N))` cells wide and `ceil(N / gridWidth)` tall;
/// frames fill cells row-major, and trailing unused cells stay fully
/// transparent.
pub fn pack(frames: &mut [Frame]) -> Result<AtlasInfo, AtlasError> {
    let count = frames.len();
    if count == 0 {
        return Err(AtlasError::Empty);
    }

    let frame_w = frames[0].canvas.width();
    let frame_h = frames[0].canvas.height();
    for (index, frame) in frames.iter().enumerate() {
        if frame.canvas.width() != frame_w || frame.canvas.height() != frame_h {
            return Err(AtlasError::MixedFrameSizes {
                index,
                found_w: frame.canvas.width(),
                found_h: frame.canvas.height(),
                expected_w: frame_w,
                expected_h: frame_h,
            });
        }
    }

    let mut grid_width = 1u32;
    while (grid_width as usize) * (grid_width as usize) < count {
        grid_width += 1;
    }
    let grid_height = (count as u32).div_ceil(grid_width);

    let mut atlas = PixelCanvas::new(
        (grid_width * frame_w) as i32,
        (grid_height * frame_h) as i32,
        frames[0].canvas.format(),
        frames[0].canvas.filter(),
    );
    let atlas_width = atlas.width() as usize;

    let mut rects = Vec::with_capacity(count);
    for (index, frame) in frames.iter_mut().enumerate() {
        let cell_x = (index as u32 % grid_width) * frame_w;
        let cell_y = (index as u32 / grid_width) * frame_h;

        let src = frame.canvas.pixels();
        let dst = atlas.pixels_mut();
        for row in 0..frame_h as usize {
            let src_start = row * frame_w as usize;
            let dst_start = (cell_y as usize + row) * atlas_width + cell_x as usize;
            dst[dst_start..dst_start + frame_w as usize]
                .copy_from_slice(&src[src_start..src_start + frame_w as usize]);
        }

        rects.push(FrameRect {
            x: cell_x,
            y: cell_y,
            width: frame_w,
            height: frame_h,
        });
    }
    atlas.materialize();

    debug!(
        "packed {} frames of {}x{} into a {}x{} grid",
        count, frame_w, frame_h, grid_width, grid_height
    );

    Ok(AtlasInfo {
        canvas: atlas,
        grid_width,
        grid_height,
        frames_x: (count as u32).min(grid_width),
        frames_y: grid_height,
        frame_count: count as u32,
        rects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgba8, TRANSPARENT};
    use crate::frame::Timeline;
    use crate::types::{FilterMode, PixelFormat};

    /// Timeline of `count` 4x3 frames, each cleared to a unique color.
    fn timeline(count: usize) -> Timeline {
        let mut timeline = Timeline::new();
        for i in 0..count {
            let mut canvas = PixelCanvas::new(4, 3, PixelFormat::Rgba8, FilterMode::Point);
            canvas.clear(frame_color(i));
            timeline.add_frame(canvas, 1);
        }
        timeline
    }

    fn frame_color(i: usize) -> Rgba8 {
        [i as u8 + 1, (i * 2) as u8, (i * 3) as u8, 255]
    }

    #[test]
    fn test_empty_input_errors() {
        let mut timeline = Timeline::new();
        assert!(matches!(
            pack(timeline.frames_mut()),
            Err(AtlasError::Empty)
        ));
    }

    #[test]
    fn test_single_frame() {
        let mut timeline = timeline(1);
        let atlas = pack(timeline.frames_mut()).unwrap();
        assert_eq!((atlas.grid_width, atlas.grid_height), (1, 1));
        assert_eq!((atlas.frames_x, atlas.frames_y), (1, 1));
        assert_eq!(atlas.canvas.width(), 4);
        assert_eq!(atlas.canvas.height(), 3);
        assert_eq!(atlas.rects.len(), 1);
    }

    #[test]
    fn test_grid_dimensions() {
        // 5 frames: grid is ceil(sqrt(5)) = 3 wide, ceil(5/3) = 2 tall
        let mut timeline = timeline(5);
        let atlas = pack(timeline.frames_mut()).unwrap();
        assert_eq!((atlas.grid_width, atlas.grid_height), (3, 2));
        assert_eq!((atlas.frames_x, atlas.frames_y), (3, 2));
        assert_eq!(atlas.frame_count, 5);
        assert_eq!(atlas.canvas.width(), 3 * 4);
        assert_eq!(atlas.canvas.height(), 2 * 3);
    }

    #[test]
    fn test_two_frames_use_partial_grid() {
        // 2 frames: capacity 2x1, both cells used
        let mut timeline = timeline(2);
        let atlas = pack(timeline.frames_mut()).unwrap();
        assert_eq!((atlas.grid_width, atlas.grid_height), (2, 1));
        assert_eq!((atlas.frames_x, atlas.frames_y), (2, 1));
    }

    #[test]
    fn test_frames_recoverable_from_rects() {
        let mut timeline = timeline(7);
        let atlas = pack(timeline.frames_mut()).unwrap();
        assert_eq!(atlas.rects.len(), 7);

        for (i, rect) in atlas.rects.iter().enumerate() {
            assert_eq!((rect.width, rect.height), (4, 3));
            for y in 0..rect.height {
                for x in 0..rect.width {
                    assert_eq!(
                        atlas.canvas.get_pixel(rect.x + x, rect.y + y),
                        frame_color(i),
                        "frame {i} pixel ({x}, {y})"
                    );
                }
            }
        }
        // Packing does not disturb the source frames
        assert_eq!(
            timeline.frames_mut()[3].canvas.pixels()[0],
            frame_color(3)
        );
    }

    #[test]
    fn test_trailing_cells_are_transparent() {
        // 3 frames in a 2x2 grid: the fourth cell stays transparent
        let mut timeline = timeline(3);
        let atlas = pack(timeline.frames_mut()).unwrap();
        assert_eq!((atlas.grid_width, atlas.grid_height), (2, 2));
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(atlas.canvas.get_pixel(4 + x, 3 + y), TRANSPARENT);
            }
        }
    }

    #[test]
    fn test_mixed_sizes_error() {
        let mut timeline = timeline(2);
        timeline.add_frame(
            PixelCanvas::new(8, 8, PixelFormat::Rgba8, FilterMode::Point),
            1,
        );
        let err = pack(timeline.frames_mut()).unwrap_err();
        assert!(matches!(err, AtlasError::MixedFrameSizes { index: 2, .. }));
    }

    #[test]
    fn test_rects_are_row_major_in_input_order() {
        let mut timeline = timeline(4);
        let atlas = pack(timeline.frames_mut()).unwrap();
        let positions: Vec<(u32, u32)> = atlas.rects.iter().map(|r| (r.x, r.y)).collect();
        assert_eq!(positions, vec![(0, 0), (4, 0), (0, 3), (4, 3)]);
    }
}
