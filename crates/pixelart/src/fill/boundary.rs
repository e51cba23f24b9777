//! Threshold-based boundary test for flood fills

use crate::color::Rgba8;

/// Decide whether `candidate` belongs to the region seeded with `seed`.
///
/// The cutoff is on alpha, not an RGB distance:
/// - solid seed (alpha >= `threshold`): the candidate must match the seed's
///   RGB exactly and itself be solid;
/// - transparent seed: the candidate matches while its alpha stays below the
///   threshold, regardless of RGB.
///
/// The tolerance lets a fill bridge soft, semi-transparent edges without
/// leaking through fully opaque strokes.
#[inline]
pub fn matches_boundary(seed: Rgba8, candidate: Rgba8, threshold: u8) -> bool {
    if seed[3] >= threshold {
        candidate[3] >= threshold && candidate[..3] == seed[..3]
    } else {
        candidate[3] < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SOLID_ALPHA_THRESHOLD;

    const T: u8 = SOLID_ALPHA_THRESHOLD;

    #[test]
    fn test_solid_seed_requires_exact_rgb() {
        let seed = [100, 150, 200, 255];
        assert!(matches_boundary(seed, [100, 150, 200, 255], T));
        assert!(matches_boundary(seed, [100, 150, 200, T], T));
        assert!(!matches_boundary(seed, [101, 150, 200, 255], T));
        assert!(!matches_boundary(seed, [100, 150, 200, T - 1], T));
    }

    #[test]
    fn test_transparent_seed_ignores_rgb() {
        let seed = [0, 0, 0, 0];
        assert!(matches_boundary(seed, [255, 0, 0, 0], T));
        assert!(matches_boundary(seed, [1, 2, 3, T - 1], T));
        assert!(!matches_boundary(seed, [0, 0, 0, T], T));
        assert!(!matches_boundary(seed, [0, 0, 0, 255], T));
    }

    #[test]
    fn test_soft_edge_bridged_but_not_opaque_stroke() {
        // A faint antialiased fringe stays fillable from a transparent seed,
        // while the opaque stroke next to it is a hard boundary.
        let seed = [0, 0, 0, 10];
        let fringe = [30, 30, 30, 90];
        let stroke = [30, 30, 30, 255];
        assert!(matches_boundary(seed, fringe, T));
        assert!(!matches_boundary(seed, stroke, T));
    }
}
