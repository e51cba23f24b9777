//! Editing session: owns the timeline and the live fill operations
//!
//! An [`EditSession`] mediates all interactive edits over one [`Timeline`]:
//! symmetric painting, fill scheduling, and atlas rebuilds. Live fill
//! operations are owned here, keyed by target frame, instead of living in
//! any global state. The host calls [`EditSession::tick`] once per frame;
//! each live fill advances one batch and control returns immediately, so
//! fill progress interleaves with input handling and rendering on a single
//! thread.

use glam::Vec2;
use tracing::debug;

use crate::addressing::SymmetryMode;
use crate::atlas::{self, AtlasError, AtlasInfo};
use crate::canvas::DirtyRect;
use crate::color::Rgba8;
use crate::fill::{FillConfig, FillMode, FloodFill};
use crate::frame::{FrameId, Timeline};

/// Session-level editing state for one animation.
pub struct EditSession {
    timeline: Timeline,
    /// Live fills keyed by target frame; at most one per canvas.
    fills: Vec<(FrameId, FloodFill)>,
    /// Symmetry applied to interactive paint writes.
    symmetry: SymmetryMode,
    /// Pivot for symmetry companions; `None` means the canvas center.
    pivot: Option<(f32, f32)>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::with_timeline(Timeline::new())
    }

    pub fn with_timeline(timeline: Timeline) -> Self {
        Self {
            timeline,
            fills: Vec::new(),
            symmetry: SymmetryMode::None,
            pivot: None,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub fn symmetry(&self) -> SymmetryMode {
        self.symmetry
    }

    /// Set the symmetry for subsequent paint and fill writes. A `None`
    /// pivot tracks each target canvas's center.
    pub fn set_symmetry(&mut self, symmetry: SymmetryMode, pivot: Option<(f32, f32)>) {
        self.symmetry = symmetry;
        self.pivot = pivot;
    }

    /// Paint one pixel (plus symmetry companions) on a frame. Writes stay
    /// pending until the frame is materialized. Returns whether the frame
    /// exists.
    pub fn paint(&mut self, frame_id: FrameId, x: i32, y: i32, color: Rgba8) -> bool {
        let symmetry = self.symmetry;
        let pivot = self.pivot;
        let Some(frame) = self.timeline.frame_mut(frame_id) else {
            return false;
        };
        let pivot = pivot
            .map(|(px, py)| Vec2::new(px, py))
            .unwrap_or_else(|| frame.canvas.center());
        frame.canvas.write_symmetric(x, y, color, symmetry, pivot);
        true
    }

    /// Materialize a frame's pending writes, returning the affected region.
    pub fn materialize_frame(&mut self, frame_id: FrameId) -> Option<DirtyRect> {
        self.timeline
            .frame_mut(frame_id)?
            .canvas
            .materialize()
    }

    /// Start a fill with the session's symmetry settings and the default
    /// threshold. See [`EditSession::begin_fill_with`].
    pub fn begin_fill(
        &mut self,
        frame_id: FrameId,
        seed: (u32, u32),
        color: Rgba8,
        mode: FillMode,
    ) -> bool {
        let symmetry = self.symmetry;
        let pivot = self.pivot;
        let Some(frame) = self.timeline.frame(frame_id) else {
            return false;
        };
        let pivot = pivot.unwrap_or_else(|| {
            let center = frame.canvas.center();
            (center.x, center.y)
        });
        self.begin_fill_with(
            frame_id,
            seed,
            color,
            FillConfig {
                mode,
                symmetry,
                pivot,
                ..FillConfig::default()
            },
        )
    }

    /// Start a fill on a frame. An existing fill targeting the same frame
    /// is replaced: operations are keyed by canvas, and two would fight
    /// over one seed-color snapshot. Returns whether the frame exists.
    pub fn begin_fill_with(
        &mut self,
        frame_id: FrameId,
        seed: (u32, u32),
        color: Rgba8,
        config: FillConfig,
    ) -> bool {
        let Some(frame) = self.timeline.frame_mut(frame_id) else {
            debug!("begin_fill on missing frame {:?}", frame_id);
            return false;
        };
        let op = FloodFill::new(&mut frame.canvas, seed, color, config);
        self.fills.retain(|(id, _)| *id != frame_id);
        self.fills.push((frame_id, op));
        true
    }

    /// Advance every live fill one batch. Drained or capped operations are
    /// removed; operations whose target frame no longer exists are silently
    /// dropped. One frame's failure never touches another's operation.
    pub fn tick(&mut self) {
        let timeline = &mut self.timeline;
        self.fills.retain_mut(|(frame_id, op)| {
            match timeline.frame_mut(*frame_id) {
                Some(frame) => op.advance(&mut frame.canvas, u32::MAX),
                None => {
                    debug!("fill target {:?} removed, dropping operation", frame_id);
                    false
                }
            }
        });
    }

    /// Discard the fill targeting `frame_id`, if any. Pixels already
    /// written stay written.
    pub fn cancel_fill(&mut self, frame_id: FrameId) -> bool {
        let before = self.fills.len();
        self.fills.retain(|(id, _)| *id != frame_id);
        self.fills.len() != before
    }

    /// Discard every live fill.
    pub fn cancel_all_fills(&mut self) {
        self.fills.clear();
    }

    pub fn active_fill_count(&self) -> usize {
        self.fills.len()
    }

    pub fn has_active_fills(&self) -> bool {
        !self.fills.is_empty()
    }

    /// Rebuild the frame atlas on demand.
    pub fn pack_atlas(&mut self) -> Result<AtlasInfo, AtlasError> {
        atlas::pack(self.timeline.frames_mut())
    }
}
