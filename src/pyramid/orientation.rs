//! Rotation of the total pixel matrix relative to the slide coordinate system.
//!
//! `ImageOrientationSlide` carries six direction cosines: the first three
//! describe how the slide coordinates change when the column index increases
//! (the row direction, left to right), the second three how they change when
//! the row index increases (the column direction, top to bottom). Since the
//! total pixel matrix is parallel to the slide surface and its rows and
//! columns are assumed parallel to the slide's own axes, only four planar
//! rotations can occur. Any other orientation vector is rejected.
//!
//! Matching is tolerance-based rather than exact so that floating-point noise
//! in the stored metadata does not reject a canonical orientation.

// =============================================================================
// Canonical orientation patterns
// =============================================================================

/// Per-component tolerance when matching an orientation vector against the
/// canonical patterns.
pub const ORIENTATION_TOLERANCE: f64 = 1e-6;

/// Row direction +Y, column direction +X: the matrix is aligned with the
/// slide coordinate system.
const ALIGNED: [f64; 6] = [0.0, 1.0, 0.0, 1.0, 0.0, 0.0];

/// Row direction +X, column direction -Y: rotated by 90 degrees.
const ROTATED_90: [f64; 6] = [1.0, 0.0, 0.0, 0.0, -1.0, 0.0];

/// Row direction -Y, column direction -X: rotated by 180 degrees.
const ROTATED_180: [f64; 6] = [0.0, -1.0, 0.0, -1.0, 0.0, 0.0];

/// Row direction -X, column direction +Y: rotated by 270 degrees.
const ROTATED_270: [f64; 6] = [-1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

/// Check a stored orientation vector against a canonical pattern.
pub(crate) fn matches_orientation(orientation: &[f64; 6], pattern: &[f64; 6]) -> bool {
    orientation
        .iter()
        .zip(pattern.iter())
        .all(|(value, expected)| (value - expected).abs() <= ORIENTATION_TOLERANCE)
}

// =============================================================================
// Rotation
// =============================================================================

/// Planar rotation of the total pixel matrix with respect to the slide
/// coordinate system.
///
/// Derived from the base level's orientation vector; the closed set of four
/// values is what lets the viewer present every supported slide with the X
/// axis of the slide coordinate system vertical in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Matrix aligned with the slide coordinate system
    Degrees0,

    /// Rotated by 90 degrees
    Degrees90,

    /// Rotated by 180 degrees
    Degrees180,

    /// Rotated by 270 degrees
    Degrees270,
}

impl Rotation {
    /// Derive the rotation from an orientation vector.
    ///
    /// Returns `None` when the vector matches none of the four canonical
    /// patterns within [`ORIENTATION_TOLERANCE`].
    pub fn from_orientation(orientation: &[f64; 6]) -> Option<Self> {
        if matches_orientation(orientation, &ROTATED_180) {
            Some(Rotation::Degrees180)
        } else if matches_orientation(orientation, &ROTATED_90) {
            Some(Rotation::Degrees90)
        } else if matches_orientation(orientation, &ROTATED_270) {
            Some(Rotation::Degrees270)
        } else if matches_orientation(orientation, &ALIGNED) {
            Some(Rotation::Degrees0)
        } else {
            None
        }
    }

    /// Whether an orientation vector matches one of the supported patterns.
    pub fn is_supported(orientation: &[f64; 6]) -> bool {
        Self::from_orientation(orientation).is_some()
    }

    /// The rotation in whole degrees.
    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Degrees0 => 0,
            Rotation::Degrees90 => 90,
            Rotation::Degrees180 => 180,
            Rotation::Degrees270 => 270,
        }
    }

    /// The rotation in radians, as applied to a viewport.
    pub fn radians(&self) -> f64 {
        f64::from(self.degrees()).to_radians()
    }
}

// =============================================================================
// Tests
// =============================================================================
