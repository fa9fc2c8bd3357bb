//! Pixel ↔ slide transform tests against assembled pyramid levels.

use wsi_pyramid::{Pyramid, SlideTransform, TransformError};

use super::test_utils::{
    three_level_series, ALIGNED, ROTATED_180, ROTATED_270, ROTATED_90,
};

const TOLERANCE: f64 = 1e-9;

fn base_transform(orientation: [f64; 6]) -> SlideTransform {
    let pyramid = Pyramid::assemble(&three_level_series(orientation)).unwrap();
    SlideTransform::for_level(pyramid.base_level()).unwrap()
}

// =============================================================================
// Known-value conversions
// =============================================================================

#[test]
fn test_matrix_corner_maps_to_origin_offset() {
    // Pixel (0, -1) is the first pixel of the matrix for every orientation,
    // so it lands exactly on the configured origin offset.
    for orientation in [ALIGNED, ROTATED_90, ROTATED_180, ROTATED_270] {
        let transform = base_transform(orientation);
        let slide = transform.pixel_to_slide([0.0, -1.0]);
        assert!((slide[0] - 18.5).abs() < TOLERANCE);
        assert!((slide[1] - 42.25).abs() < TOLERANCE);
        assert_eq!(slide[2], 0.0);
    }
}

#[test]
fn test_aligned_axes_swap_pixel_axes() {
    // With the aligned orientation the slide X axis follows the pixel rows
    // and the slide Y axis the pixel columns.
    let transform = base_transform(ALIGNED);

    // 1000 rows down at 0.25 µm spacing = 0.25 mm along slide X
    let slide = transform.pixel_to_slide([0.0, -1001.0]);
    assert!((slide[0] - 18.75).abs() < TOLERANCE);
    assert!((slide[1] - 42.25).abs() < TOLERANCE);

    // 1000 columns right = 0.25 mm along slide Y
    let slide = transform.pixel_to_slide([1000.0, -1.0]);
    assert!((slide[0] - 18.5).abs() < TOLERANCE);
    assert!((slide[1] - 42.5).abs() < TOLERANCE);
}

#[test]
fn test_rotated_180_inverts_both_axes() {
    let transform = base_transform(ROTATED_180);

    let slide = transform.pixel_to_slide([1000.0, -1001.0]);
    assert!((slide[0] - 18.25).abs() < TOLERANCE);
    assert!((slide[1] - 42.0).abs() < TOLERANCE);
}

// =============================================================================
// Inversion
// =============================================================================

#[test]
fn test_slide_to_pixel_inverts_pixel_to_slide() {
    let points = [
        [0.0, -1.0],
        [17.5, -3.25],
        [2047.0, -1024.0],
        [511.75, -900.5],
    ];

    for orientation in [ALIGNED, ROTATED_90, ROTATED_180, ROTATED_270] {
        let transform = base_transform(orientation);
        for point in points {
            let recovered = transform.slide_to_pixel(transform.pixel_to_slide(point));
            assert!(
                (recovered[0] - point[0]).abs() < TOLERANCE
                    && (recovered[1] - point[1]).abs() < TOLERANCE,
                "inverse failed for {:?} under {:?}",
                point,
                orientation
            );
        }
    }
}

#[test]
fn test_coarse_level_transform_uses_its_own_spacing() {
    let pyramid = Pyramid::assemble(&three_level_series(ALIGNED)).unwrap();

    // Level 0 has 4x the base spacing; one row step covers 1 mm instead of 0.25 mm
    let coarse = SlideTransform::for_level(&pyramid.levels()[0]).unwrap();
    let slide = coarse.pixel_to_slide([0.0, -1001.0]);
    assert!((slide[0] - 19.5).abs() < TOLERANCE);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_transform_rejects_unsupported_level_orientation() {
    use wsi_pyramid::metadata::PixelSpacing;

    let s = std::f64::consts::FRAC_1_SQRT_2;
    let result = SlideTransform::new(
        [s, s, 0.0, s, -s, 0.0],
        PixelSpacing {
            row: 0.00025,
            column: 0.00025,
        },
        (0.0, 0.0),
    );

    assert!(matches!(result, Err(TransformError::InvalidOrientation(_))));
}
