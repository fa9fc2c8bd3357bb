//! Pixel ↔ slide coordinate transforms.
//!
//! The total pixel matrix and the slide coordinate system are related by a
//! planar affine map: scale by the pixel spacing, rotate by the direction
//! cosines, translate by the matrix origin offset. [`SlideTransform`] captures
//! that map for one pyramid level and exposes it in both directions.
//!
//! # Vertical axis convention
//!
//! Pixel coordinates use the flipped-Y tile addressing convention shared with
//! the pyramid's tile grid: x grows to the right, y is negative and grows
//! upward, with the first pixel row at y = -1. `pixel_to_slide` first maps
//! `y → -(y + 1)` to recover the matrix row and `slide_to_pixel` undoes it
//! last. The flip is an axis convention, not an artifact; every consumer must
//! apply it consistently.
//!
//! Slide coordinates are millimeters. The z component is always 0: the total
//! pixel matrix is assumed planar and parallel to the slide surface.

use crate::error::TransformError;
use crate::metadata::PixelSpacing;
use crate::pyramid::{PyramidLevel, Rotation};

// =============================================================================
// SlideTransform
// =============================================================================

/// The affine map between one level's pixel matrix and the slide coordinate
/// system.
///
/// Construction validates the orientation against the four supported
/// axis-aligned patterns; once built, both directions are total for any
/// finite input. Conversions are pure and allocate fresh outputs, so a
/// transform can be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTransform {
    orientation: [f64; 6],
    spacing: PixelSpacing,
    offset: (f64, f64),
}

impl SlideTransform {
    /// Build a transform from raw orientation, spacing, and origin offset.
    ///
    /// Fails when the orientation matches none of the four supported
    /// direction-cosine patterns.
    pub fn new(
        orientation: [f64; 6],
        spacing: PixelSpacing,
        offset: (f64, f64),
    ) -> Result<Self, TransformError> {
        if !Rotation::is_supported(&orientation) {
            return Err(TransformError::InvalidOrientation(orientation));
        }
        Ok(SlideTransform {
            orientation,
            spacing,
            offset,
        })
    }

    /// Build the transform for a pyramid level.
    pub fn for_level(level: &PyramidLevel) -> Result<Self, TransformError> {
        Self::new(
            level.metadata.image_orientation_slide,
            level.metadata.pixel_spacing,
            level.metadata.total_pixel_matrix_origin,
        )
    }

    /// Map one pixel coordinate to a 3-component slide coordinate in mm.
    ///
    /// The input y may be fractional; sub-pixel positions are preserved.
    pub fn pixel_to_slide(&self, point: [f64; 2]) -> [f64; 3] {
        let x = point[0];
        let y = -(point[1] + 1.0);

        // Column index moves along orientation[0..3] scaled by the column
        // spacing, row index along orientation[3..6] scaled by the row spacing.
        let slide_x = self.orientation[0] * self.spacing.column * x
            + self.orientation[3] * self.spacing.row * y
            + self.offset.0;
        let slide_y = self.orientation[1] * self.spacing.column * x
            + self.orientation[4] * self.spacing.row * y
            + self.offset.1;

        [slide_x, slide_y, 0.0]
    }

    /// Map one slide coordinate back to a pixel coordinate.
    ///
    /// Exact inverse of [`pixel_to_slide`](Self::pixel_to_slide); the z
    /// component of the input is ignored.
    pub fn slide_to_pixel(&self, point: [f64; 3]) -> [f64; 2] {
        let dx = point[0] - self.offset.0;
        let dy = point[1] - self.offset.1;

        let m00 = self.orientation[0] * self.spacing.column;
        let m01 = self.orientation[3] * self.spacing.row;
        let m10 = self.orientation[1] * self.spacing.column;
        let m11 = self.orientation[4] * self.spacing.row;

        // The determinant is ±(row spacing * column spacing) for every
        // supported orientation, and spacing is validated positive.
        let det = m00 * m11 - m01 * m10;
        let x = (m11 * dx - m01 * dy) / det;
        let y = (-m10 * dx + m00 * dy) / det;

        [x, -(y + 1.0)]
    }

    /// Map an ordered sequence of pixel coordinates, preserving order.
    pub fn pixels_to_slide(&self, points: &[[f64; 2]]) -> Vec<[f64; 3]> {
        points.iter().map(|p| self.pixel_to_slide(*p)).collect()
    }

    /// Map an ordered sequence of slide coordinates, preserving order.
    pub fn slide_to_pixels(&self, points: &[[f64; 3]]) -> Vec<[f64; 2]> {
        points.iter().map(|p| self.slide_to_pixel(*p)).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
