//! Animation frames and the timeline collaborator contract
//!
//! A [`Timeline`] owns an ordered sequence of frames plus playback metadata
//! (fps, playback mode, sprite border) that surrounding tooling reads and
//! writes. The engine stores that metadata untouched; it only operates on
//! the per-frame pixel data.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canvas::PixelCanvas;
use crate::types::PlaybackMode;

/// Stable identifier for a frame, independent of timeline position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameId(pub u64);

/// One animation frame: a canvas held for `duration` ticks.
pub struct Frame {
    id: FrameId,
    pub canvas: PixelCanvas,
    pub duration: u32,
}

impl Frame {
    #[inline]
    pub fn id(&self) -> FrameId {
        self.id
    }
}

/// Ordered frame sequence plus stored playback metadata.
pub struct Timeline {
    frames: Vec<Frame>,
    next_id: u64,
    pub fps: u32,
    pub playback: PlaybackMode,
    /// Sprite border (left, bottom, right, top), for the host's slicing.
    pub sprite_border: [f32; 4],
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            next_id: 0,
            fps: 12,
            playback: PlaybackMode::default(),
            sprite_border: [0.0; 4],
        }
    }

    fn allocate_id(&mut self) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a frame and return its id.
    pub fn add_frame(&mut self, canvas: PixelCanvas, duration: u32) -> FrameId {
        let id = self.allocate_id();
        self.frames.push(Frame {
            id,
            canvas,
            duration,
        });
        id
    }

    /// Insert a copy of `id` right after it. Returns the copy's id.
    pub fn duplicate_frame(&mut self, id: FrameId) -> Option<FrameId> {
        let index = self.index_of(id)?;
        let copy = Frame {
            id: self.allocate_id(),
            canvas: PixelCanvas::from_canvas(&self.frames[index].canvas),
            duration: self.frames[index].duration,
        };
        let copy_id = copy.id;
        self.frames.insert(index + 1, copy);
        Some(copy_id)
    }

    /// Remove a frame, destroying its canvas. Returns whether it existed.
    pub fn remove_frame(&mut self, id: FrameId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.frames.remove(index);
                debug!("removed frame {:?} ({} remain)", id, self.frames.len());
                true
            }
            None => false,
        }
    }

    pub fn index_of(&self, id: FrameId) -> Option<usize> {
        self.frames.iter().position(|frame| frame.id == id)
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.iter().find(|frame| frame.id == id)
    }

    pub fn frame_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|frame| frame.id == id)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total animation length: the sum of frame durations.
    pub fn total_ticks(&self) -> u64 {
        self.frames.iter().map(|frame| frame.duration as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FilterMode, PixelFormat};

    fn canvas() -> PixelCanvas {
        PixelCanvas::new(4, 4, PixelFormat::Rgba8, FilterMode::Point)
    }

    #[test]
    fn test_add_and_lookup() {
        let mut timeline = Timeline::new();
        let a = timeline.add_frame(canvas(), 3);
        let b = timeline.add_frame(canvas(), 5);
        assert_ne!(a, b);
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.frame(a).unwrap().duration, 3);
        assert_eq!(timeline.index_of(b), Some(1));
        assert_eq!(timeline.total_ticks(), 8);
    }

    #[test]
    fn test_duplicate_inserts_after_original() {
        let mut timeline = Timeline::new();
        let a = timeline.add_frame(canvas(), 2);
        let b = timeline.add_frame(canvas(), 4);

        let mut original = canvas();
        original.set_pixel(1, 1, [9, 9, 9, 255]);
        timeline.frame_mut(a).unwrap().canvas = original;

        let copy = timeline.duplicate_frame(a).unwrap();
        assert_eq!(timeline.index_of(a), Some(0));
        assert_eq!(timeline.index_of(copy), Some(1));
        assert_eq!(timeline.index_of(b), Some(2));
        assert_eq!(timeline.frame(copy).unwrap().duration, 2);
        assert_eq!(
            timeline.frame(copy).unwrap().canvas.get_pixel(1, 1),
            [9, 9, 9, 255]
        );
    }

    #[test]
    fn test_remove_frame() {
        let mut timeline = Timeline::new();
        let a = timeline.add_frame(canvas(), 1);
        let b = timeline.add_frame(canvas(), 1);
        assert!(timeline.remove_frame(a));
        assert!(!timeline.remove_frame(a));
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.index_of(b), Some(0));
    }

    #[test]
    fn test_metadata_is_stored_untouched() {
        let mut timeline = Timeline::new();
        timeline.fps = 24;
        timeline.playback = PlaybackMode::PingPong;
        timeline.sprite_border = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(timeline.fps, 24);
        assert_eq!(timeline.playback, PlaybackMode::PingPong);
        assert_eq!(timeline.sprite_border, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_ids_stay_unique_after_removal() {
        let mut timeline = Timeline::new();
        let a = timeline.add_frame(canvas(), 1);
        timeline.remove_frame(a);
        let b = timeline.add_frame(canvas(), 1);
        assert_ne!(a, b);
    }
}
