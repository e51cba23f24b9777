//! Engine-wide tunables

/// Alpha value at or above which a pixel counts as solid for the fill
/// boundary test. Below it, pixels are treated as transparent regardless
/// of their RGB channels, which lets fills bridge soft edges.
pub const SOLID_ALPHA_THRESHOLD: u8 = 128;

/// A fill operation terminates once it has visited this multiple of the
/// canvas area. Guards against the tolerance-based boundary rule
/// re-scheduling pixels forever when the fill color itself matches it.
pub const FILL_STEP_CAP_FACTOR: u64 = 4;

/// Steps per `advance` call for [`crate::fill::FillMode::Random`].
pub const RANDOM_STEPS_PER_TICK: u32 = 40;

/// Steps per `advance` call for [`crate::fill::FillMode::RightToLeftSlow`].
pub const SLOW_STEPS_PER_TICK: u32 = 40;

/// Steps per `advance` call for [`crate::fill::FillMode::Growing`].
pub const GROWING_STEPS_PER_TICK: u32 = 20;

/// Minimum point count for radial symmetry.
pub const MIN_RADIAL_POINTS: u8 = 2;

/// Maximum point count for radial symmetry.
pub const MAX_RADIAL_POINTS: u8 = 50;

/// Thumbnails are never larger than this on either axis.
pub const THUMBNAIL_MAX_SIZE: u32 = 128;

/// Elapsed-step period of one full rainbow cycle for step-keyed fill modes.
pub const RAINBOW_CYCLE_STEPS: u64 = 240;

/// Upper bound on a decompressed canvas payload (64 MB), protecting the
/// loader against corrupt or hostile compressed records.
pub const MAX_DECOMPRESSED_BYTES: usize = 64 * 1024 * 1024;
