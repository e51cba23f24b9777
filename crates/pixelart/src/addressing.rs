//! Wrap-around and symmetry coordinate addressing
//!
//! Pure functions over value types, shared by interactive painting and the
//! flood fill's pixel-write step. A primary point expands to a set of
//! companion points under the active [`SymmetryMode`]; every point then
//! passes through the same wrap/bounds resolution before any write.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RADIAL_POINTS, MIN_RADIAL_POINTS};
use crate::types::WrapAxes;

/// Resolve a possibly out-of-bounds coordinate against canvas dimensions.
///
/// Wrapping axes remap by modulo (`rem_euclid`, so negative coordinates wrap
/// backwards correctly); non-wrapping axes reject out-of-bounds points.
#[inline]
pub fn wrap_point(x: i32, y: i32, width: u32, height: u32, wrap: WrapAxes) -> Option<(u32, u32)> {
    let w = width as i32;
    let h = height as i32;
    if w <= 0 || h <= 0 {
        return None;
    }
    let x = if wrap.horizontal {
        x.rem_euclid(w)
    } else {
        if x < 0 || x >= w {
            return None;
        }
        x
    };
    let y = if wrap.vertical {
        y.rem_euclid(h)
    } else {
        if y < 0 || y >= h {
            return None;
        }
        y
    };
    Some((x as u32, y as u32))
}

/// Symmetry rule generating companion coordinates for a primary point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SymmetryMode {
    #[default]
    None,
    /// Mirror across the vertical axis through the pivot.
    Horizontal,
    /// Mirror across the horizontal axis through the pivot.
    Vertical,
    /// Both mirrors plus their combination (3 companions).
    Fourways,
    /// Both components inverted around the pivot (180 degree rotation).
    PlayingCard,
    /// `points - 1` companions evenly rotated around the pivot.
    Radial { points: u8 },
}

impl SymmetryMode {
    /// Number of points produced per primary point, primary included.
    pub fn point_count(self) -> usize {
        match self {
            SymmetryMode::None => 1,
            SymmetryMode::Horizontal | SymmetryMode::Vertical | SymmetryMode::PlayingCard => 2,
            SymmetryMode::Fourways => 4,
            SymmetryMode::Radial { points } => clamp_radial(points) as usize,
        }
    }

    pub fn is_active(self) -> bool {
        self != SymmetryMode::None
    }

    /// Produce the primary point and its companions under this mode.
    ///
    /// The primary point always comes first. The pivot is in pixel
    /// coordinates; half-pixel pivots express axes between pixel columns,
    /// e.g. the center of an even-width canvas.
    pub fn companion_points(self, x: i32, y: i32, pivot: Vec2) -> SymmetryPoints {
        let mut points = SymmetryPoints::new();
        points.push((x, y));
        match self {
            SymmetryMode::None => {}
            SymmetryMode::Horizontal => {
                points.push((mirror(pivot.x, x), y));
            }
            SymmetryMode::Vertical => {
                points.push((x, mirror(pivot.y, y)));
            }
            SymmetryMode::Fourways => {
                let mx = mirror(pivot.x, x);
                let my = mirror(pivot.y, y);
                points.push((mx, y));
                points.push((x, my));
                points.push((mx, my));
            }
            SymmetryMode::PlayingCard => {
                points.push((mirror(pivot.x, x), mirror(pivot.y, y)));
            }
            SymmetryMode::Radial { points: n } => {
                let n = clamp_radial(n);
                let offset = Vec2::new(x as f32, y as f32) - pivot;
                for k in 1..n {
                    let angle = std::f32::consts::TAU * k as f32 / n as f32;
                    let rotated = Vec2::from_angle(angle).rotate(offset) + pivot;
                    points.push((rotated.x.round() as i32, rotated.y.round() as i32));
                }
            }
        }
        points
    }
}

/// Reflect `v` across the axis at `pivot`.
#[inline]
fn mirror(pivot: f32, v: i32) -> i32 {
    (2.0 * pivot - v as f32).round() as i32
}

#[inline]
fn clamp_radial(points: u8) -> u8 {
    points.clamp(MIN_RADIAL_POINTS, MAX_RADIAL_POINTS)
}

/// Inline array of companion positions (primary first, no heap allocation).
pub struct SymmetryPoints {
    data: [(i32, i32); MAX_RADIAL_POINTS as usize],
    len: usize,
}

impl SymmetryPoints {
    fn new() -> Self {
        Self {
            data: [(0, 0); MAX_RADIAL_POINTS as usize],
            len: 0,
        }
    }

    fn push(&mut self, point: (i32, i32)) {
        self.data[self.len] = point;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.data[..self.len].iter().copied()
    }
}
