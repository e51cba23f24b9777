//! Incremental, mode-selectable flood fill
//!
//! A [`FloodFill`] mutates one [`PixelCanvas`] over many bounded batches. An
//! external per-tick scheduler calls [`FloodFill::advance`] until it reports
//! no remaining work, letting fill progress interleave with input handling
//! and rendering. Cancelling an operation is just dropping it: pixels
//! already written stay written.
//!
//! Pixels are stamped with the fill color when they are scheduled, so an
//! already-scheduled pixel stops matching the boundary test and is never
//! scheduled twice. When the fill color itself still passes the test (for
//! example filling transparent with transparent), the traversal can
//! re-schedule pixels forever; the step cap turns that into a partial,
//! silently finished fill.

mod boundary;

pub use boundary::matches_boundary;

use glam::Vec2;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::addressing::{SymmetryMode, wrap_point};
use crate::canvas::PixelCanvas;
use crate::color::{RainbowGradient, Rgba8};
use crate::constants::{
    FILL_STEP_CAP_FACTOR, GROWING_STEPS_PER_TICK, RAINBOW_CYCLE_STEPS, RANDOM_STEPS_PER_TICK,
    SLOW_STEPS_PER_TICK, SOLID_ALPHA_THRESHOLD,
};
use crate::types::WrapAxes;

/// Neighbor deltas in the default traversal order. The last entry is popped
/// first, so the fill leans leftward before anything else.
const NEIGHBOR_ORDER: [(i32, i32); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

/// Traversal flavor of a fill operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum FillMode {
    /// Default neighbor order, no batching: runs to completion within the
    /// caller's budget in a single `advance` call.
    #[default]
    Normal = 0,
    /// Neighbor order shuffled each step for an organic fill-in.
    Random = 1,
    /// Default neighbor order spread over small batches so the fill is
    /// visibly animated.
    RightToLeftSlow = 2,
    /// Neighbors ordered by distance from the seed so the fill expands as a
    /// radial wave.
    Growing = 3,
}

impl FillMode {
    /// Fixed per-tick step budget, or `None` when the caller's budget
    /// applies.
    pub fn step_budget(self) -> Option<u32> {
        match self {
            FillMode::Normal => None,
            FillMode::Random => Some(RANDOM_STEPS_PER_TICK),
            FillMode::RightToLeftSlow => Some(SLOW_STEPS_PER_TICK),
            FillMode::Growing => Some(GROWING_STEPS_PER_TICK),
        }
    }
}

/// Lifecycle of a fill operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillState {
    /// Stack non-empty and under the step cap.
    Pending,
    /// Final batch done; the closing materialize is in progress.
    Draining,
    /// Drained or capped. The operation can be discarded.
    Done,
}

/// Configuration of a fill operation.
///
/// The alpha threshold is the named tolerance of the boundary test; keeping
/// it a parameter keeps the policy testable and tunable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillConfig {
    pub mode: FillMode,
    pub symmetry: SymmetryMode,
    /// Pivot for symmetry companions, in pixel coordinates.
    pub pivot: (f32, f32),
    /// Alpha cutoff separating solid from transparent pixels.
    pub alpha_threshold: u8,
    /// Recolor written pixels from the rainbow gradient.
    pub rainbow: bool,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            mode: FillMode::default(),
            symmetry: SymmetryMode::None,
            pivot: (0.0, 0.0),
            alpha_threshold: SOLID_ALPHA_THRESHOLD,
            rainbow: false,
        }
    }
}

/// An in-flight incremental flood fill targeting a single canvas.
///
/// The operation does not hold the canvas; the owning session pairs each
/// operation with its target frame and passes the canvas into
/// [`FloodFill::advance`].
pub struct FloodFill {
    config: FillConfig,
    /// Wrap flags snapshotted from the target canvas at creation.
    wrap: WrapAxes,
    seed: (u32, u32),
    /// Color under the seed when the operation started.
    seed_color: Rgba8,
    fill_color: Rgba8,
    stack: Vec<(u32, u32)>,
    steps: u64,
    step_cap: u64,
    state: FillState,
    gradient: RainbowGradient,
}

impl FloodFill {
    /// Start a fill at `seed` (clamped into bounds). Reads the seed's
    /// previous color and schedules the seed; nothing is written until the
    /// first [`FloodFill::advance`].
    pub fn new(
        canvas: &mut PixelCanvas,
        seed: (u32, u32),
        fill_color: Rgba8,
        config: FillConfig,
    ) -> Self {
        canvas.ensure_decompressed();
        let seed = (
            seed.0.min(canvas.width().saturating_sub(1)),
            seed.1.min(canvas.height().saturating_sub(1)),
        );
        let seed_color = canvas.pixel_unchecked(seed.0, seed.1);
        debug!(
            "fill seeded at {:?}: {:?} -> {:?}, mode {:?}",
            seed, seed_color, fill_color, config.mode
        );
        Self {
            config,
            wrap: canvas.wrap(),
            seed,
            seed_color,
            fill_color,
            stack: vec![seed],
            steps: 0,
            step_cap: FILL_STEP_CAP_FACTOR * canvas.area() as u64,
            state: FillState::Pending,
            gradient: RainbowGradient::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> FillState {
        self.state
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state == FillState::Done
    }

    /// Coordinates visited so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[inline]
    pub fn seed(&self) -> (u32, u32) {
        self.seed
    }

    #[inline]
    pub fn mode(&self) -> FillMode {
        self.config.mode
    }

    /// Process up to one batch of steps and materialize the canvas once.
    ///
    /// Non-Normal modes override `max_steps` with their fixed batch size;
    /// `Normal` honors the caller's budget and is conventionally given
    /// `u32::MAX` to run to completion in one call. Returns `true` while
    /// unvisited work remains.
    pub fn advance(&mut self, canvas: &mut PixelCanvas, max_steps: u32) -> bool {
        if self.state == FillState::Done {
            return false;
        }
        canvas.ensure_decompressed();

        let budget = self.config.mode.step_budget().unwrap_or(max_steps);
        let mut processed = 0u32;
        while processed < budget && self.steps < self.step_cap {
            let Some((x, y)) = self.stack.pop() else {
                break;
            };
            self.steps += 1;
            self.write(canvas, x, y);
            self.expand(canvas, x, y);
            processed += 1;
        }

        if self.stack.is_empty() || self.steps >= self.step_cap {
            if !self.stack.is_empty() {
                debug!(
                    "fill hit the {}-step cap, abandoning {} pending coordinates",
                    self.step_cap,
                    self.stack.len()
                );
                self.stack.clear();
            }
            self.state = FillState::Draining;
            canvas.materialize();
            self.state = FillState::Done;
            return false;
        }

        canvas.materialize();
        true
    }

    /// Schedule the fillable neighbors of `(x, y)` in mode order.
    fn expand(&mut self, canvas: &mut PixelCanvas, x: u32, y: u32) {
        let (width, height) = (canvas.width(), canvas.height());
        let mut neighbors = [(0u32, 0u32); 4];
        let mut count = 0;
        for (dx, dy) in NEIGHBOR_ORDER {
            if let Some(point) = wrap_point(x as i32 + dx, y as i32 + dy, width, height, self.wrap)
            {
                neighbors[count] = point;
                count += 1;
            }
        }

        match self.config.mode {
            FillMode::Normal | FillMode::RightToLeftSlow => {}
            FillMode::Random => neighbors[..count].shuffle(&mut rand::thread_rng()),
            FillMode::Growing => {
                // Farthest pushed first: the nearest neighbor ends on top of
                // the stack and is visited next, expanding a radial wave.
                let seed = self.seed;
                neighbors[..count].sort_by_key(|&(nx, ny)| {
                    let dx = nx as i64 - seed.0 as i64;
                    let dy = ny as i64 - seed.1 as i64;
                    std::cmp::Reverse(dx * dx + dy * dy)
                });
            }
        }

        for i in 0..count {
            let (nx, ny) = neighbors[i];
            let candidate = canvas.pixel_unchecked(nx, ny);
            if matches_boundary(self.seed_color, candidate, self.config.alpha_threshold) {
                // Stamping at schedule time marks the pixel visited; the pop
                // re-stamps the final color.
                self.write(canvas, nx, ny);
                self.stack.push((nx, ny));
            }
        }
    }

    fn write(&self, canvas: &mut PixelCanvas, x: u32, y: u32) {
        let color = self.output_color(canvas, x, y);
        let pivot = Vec2::new(self.config.pivot.0, self.config.pivot.1);
        canvas.write_symmetric(x as i32, y as i32, color, self.config.symmetry, pivot);
    }

    /// The color to write at `(x, y)`: the fill color, or a rainbow sample
    /// keyed by elapsed steps (batched modes) or canvas position (`Normal`).
    fn output_color(&self, canvas: &PixelCanvas, x: u32, y: u32) -> Rgba8 {
        if !self.config.rainbow {
            return self.fill_color;
        }
        let t = match self.config.mode {
            FillMode::Normal => (x + y) as f32 / (canvas.width() + canvas.height()) as f32,
            _ => (self.steps % RAINBOW_CYCLE_STEPS) as f32 / RAINBOW_CYCLE_STEPS as f32,
        };
        self.gradient.sample(t)
    }
}
