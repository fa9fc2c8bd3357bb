//! Conversion between pixel-space shapes and slide-space regions of interest.
//!
//! Both directions transform every vertex through the base level's
//! [`SlideTransform`](crate::transform::SlideTransform) and stamp or read the
//! base level's Frame of Reference UID. Conversions are pure: they construct
//! fresh shapes and regions and retain nothing.
//!
//! # Ellipse / circle approximation
//!
//! Circles are stored as ELLIPSE regions whose two axes have equal length.
//! On the way back only the major axis is evaluated: its midpoint becomes the
//! center, the pixel-space distance to its second endpoint the radius. The
//! minor axis is carried in the format but not independently validated, so a
//! genuinely elliptical region silently decodes to its circle approximation.

use crate::error::CodecError;
use crate::pyramid::Pyramid;
use crate::transform::SlideTransform;

use super::roi::{GraphicType, Roi};
use super::shape::Shape;

// =============================================================================
// Shape → ROI
// =============================================================================

/// Convert a pixel-space shape into a slide-space region of interest.
///
/// The region gets a freshly generated UID; use [`Roi::with_uid`] and
/// [`Roi::with_properties`] to attach caller identity and properties.
///
/// Fails for polygons with interior rings (the annotation format carries a
/// single ring) and propagates transform construction failures.
pub fn shape_to_roi(shape: &Shape, pyramid: &Pyramid) -> Result<Roi, CodecError> {
    let base = pyramid.base_level();
    let transform = SlideTransform::for_level(base)?;
    let frame_of_reference_uid = base.metadata.frame_of_reference_uid.clone();

    let (graphic_type, graphic_data) = match shape {
        Shape::Point { coordinates } => (
            GraphicType::Point,
            vec![transform.pixel_to_slide(*coordinates)],
        ),
        Shape::LineString { coordinates } => (
            GraphicType::Polyline,
            transform.pixels_to_slide(coordinates),
        ),
        Shape::Polygon { rings } => {
            let outer_ring = match rings.as_slice() {
                [ring] => ring,
                [] => {
                    return Err(CodecError::UnsupportedGeometry(
                        "polygon without an outer ring".to_string(),
                    ))
                }
                _ => {
                    return Err(CodecError::UnsupportedGeometry(
                        "polygon with interior rings (holes)".to_string(),
                    ))
                }
            };
            (GraphicType::Polygon, transform.pixels_to_slide(outer_ring))
        }
        Shape::Circle { center, radius } => {
            // Endpoints of the major and minor axes, in canonical order:
            // west, east, north, south.
            let axis_endpoints = [
                [center[0] - radius, center[1]],
                [center[0] + radius, center[1]],
                [center[0], center[1] - radius],
                [center[0], center[1] + radius],
            ];
            (
                GraphicType::Ellipse,
                transform.pixels_to_slide(&axis_endpoints),
            )
        }
    };

    Ok(Roi::new(graphic_type, graphic_data, frame_of_reference_uid))
}

// =============================================================================
// ROI → Shape
// =============================================================================

/// Convert a slide-space region of interest back into a pixel-space shape.
///
/// POLYGON rings are returned as stored: a closed source ring stays closed,
/// and an open one is not repaired here — keeping the hidden closing vertex
/// identical to the first is the shape editor's contract.
pub fn roi_to_shape(roi: &Roi, pyramid: &Pyramid) -> Result<Shape, CodecError> {
    let base = pyramid.base_level();
    let transform = SlideTransform::for_level(base)?;

    match roi.graphic_type {
        GraphicType::Point => {
            let coordinate = require_coordinates(roi, "exactly 1", |n| n == 1)?[0];
            Ok(Shape::point(transform.slide_to_pixel(coordinate)))
        }
        GraphicType::Polyline => {
            let coordinates = require_coordinates(roi, "at least 1", |n| n >= 1)?;
            Ok(Shape::line_string(transform.slide_to_pixels(coordinates)))
        }
        GraphicType::Polygon => {
            let coordinates = require_coordinates(roi, "at least 1", |n| n >= 1)?;
            Ok(Shape::polygon(transform.slide_to_pixels(coordinates)))
        }
        GraphicType::Ellipse => {
            let coordinates = require_coordinates(roi, "exactly 4", |n| n == 4)?;

            // Major axis endpoints define the circle: midpoint is the center,
            // the distance to the second endpoint the radius. The minor axis
            // (coordinates[2..4]) is assumed, not verified, to match.
            let major_start = coordinates[0];
            let major_end = coordinates[1];
            let center_slide = [
                (major_start[0] + major_end[0]) / 2.0,
                (major_start[1] + major_end[1]) / 2.0,
                0.0,
            ];

            let center = transform.slide_to_pixel(center_slide);
            let edge = transform.slide_to_pixel(major_end);
            let radius = ((edge[0] - center[0]).powi(2) + (edge[1] - center[1]).powi(2)).sqrt();

            Ok(Shape::circle(center, radius))
        }
        GraphicType::Multipoint => Err(CodecError::UnsupportedAnnotation(roi.graphic_type)),
    }
}

/// Validate the graphic data length against the graphic type's contract.
fn require_coordinates<'a>(
    roi: &'a Roi,
    expected: &'static str,
    valid: impl Fn(usize) -> bool,
) -> Result<&'a [[f64; 3]], CodecError> {
    if valid(roi.graphic_data.len()) {
        Ok(&roi.graphic_data)
    } else {
        Err(CodecError::MalformedGraphicData {
            graphic_type: roi.graphic_type,
            expected,
            actual: roi.graphic_data.len(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
