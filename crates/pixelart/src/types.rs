//! Shared tag types for canvases and timelines

use serde::{Deserialize, Serialize};

/// Pixel storage format of a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum PixelFormat {
    #[default]
    Rgba8 = 0,
}

impl PixelFormat {
    /// Bytes per pixel in the live buffer.
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(PixelFormat::Rgba8),
            _ => None,
        }
    }
}

/// Sampling filter tag carried alongside the pixel data.
///
/// The engine never samples with it; it is round-tripped through the
/// persistence record for the host's texture setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum FilterMode {
    #[default]
    Point = 0,
    Bilinear = 1,
}

impl FilterMode {
    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(FilterMode::Point),
            1 => Some(FilterMode::Bilinear),
            _ => None,
        }
    }
}

/// Playback behavior of an animation timeline.
///
/// Stored for surrounding tooling; the engine does not interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum PlaybackMode {
    Once = 0,
    #[default]
    Loop = 1,
    PingPong = 2,
    SingleFrame = 3,
}

/// Per-axis wrap-around addressing flags.
///
/// When an axis wraps, out-of-bounds coordinates on that axis are remapped
/// by modulo instead of rejected, so edits and fills treat the canvas as
/// seamlessly tiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WrapAxes {
    pub horizontal: bool,
    pub vertical: bool,
}

impl WrapAxes {
    /// No wrapping on either axis.
    pub const NONE: WrapAxes = WrapAxes {
        horizontal: false,
        vertical: false,
    };

    /// Wrapping on both axes.
    pub const BOTH: WrapAxes = WrapAxes {
        horizontal: true,
        vertical: true,
    };
}
