//! Pixel-animation engine for the Stipple paint tool
//!
//! This crate provides the core data types and algorithms for pixel
//! animation editing:
//! - [`canvas::PixelCanvas`] - RGBA8 pixel buffer with lazy compressed storage
//! - [`fill::FloodFill`] - incremental, mode-selectable flood fill
//! - [`addressing`] - wrap-around and symmetry coordinate math
//! - [`codec`] - byte-buffer compression for canvas persistence
//! - [`frame`] - animation frames and the timeline collaborator contract
//! - [`atlas`] - grid packing of frame sequences for export/playback
//! - [`session`] - live-edit mediation: painting, fill scheduling, atlas rebuilds

pub mod addressing;
pub mod atlas;
pub mod canvas;
pub mod codec;
pub mod color;
pub mod constants;
pub mod fill;
pub mod frame;
pub mod session;
pub mod types;

pub use addressing::*;
pub use atlas::*;
pub use canvas::*;
pub use codec::*;
pub use color::*;
pub use constants::*;
pub use fill::*;
pub use frame::*;
pub use session::*;
pub use types::*;
