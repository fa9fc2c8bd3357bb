//! End-to-end pyramid assembly tests.

use url::Url;
use wsi_pyramid::{Pyramid, PyramidError, RawImageMetadata, Rotation};

use super::test_utils::{
    as_concatenation_part, level_instance, three_level_series, with_plane_positions, ALIGNED,
    ROTATED_180, ROTATED_270, ROTATED_90,
};

// =============================================================================
// Multi-level assembly
// =============================================================================

#[test]
fn test_three_level_series_assembles_coarse_to_fine() {
    let pyramid = Pyramid::assemble(&three_level_series(ALIGNED)).unwrap();

    assert_eq!(pyramid.level_count(), 3);

    let widths: Vec<u32> = pyramid
        .levels()
        .iter()
        .map(|level| level.metadata.total_pixel_matrix_columns)
        .collect();
    assert_eq!(widths, vec![512, 1024, 2048]);

    let resolutions = pyramid.resolutions();
    assert!((resolutions[0] - 4.0).abs() < 1e-9);
    assert!((resolutions[1] - 2.0).abs() < 1e-9);
    assert!((resolutions[2] - 1.0).abs() < 1e-9);

    // Geometry of the base level drives extent and rotation
    assert_eq!(pyramid.extent(), [0.0, -1025.0, 2048.0, -1.0]);
    assert_eq!(pyramid.rotation(), Rotation::Degrees0);
    assert_eq!(pyramid.base_level().metadata.sop_instance_uid, "1.2.840.99.1.1.10");
}

#[test]
fn test_input_order_does_not_matter() {
    let mut records = three_level_series(ALIGNED);
    records.reverse();

    let pyramid = Pyramid::assemble(&records).unwrap();

    assert_eq!(pyramid.base_level().metadata.total_pixel_matrix_columns, 2048);
    assert_eq!(pyramid.levels()[0].metadata.total_pixel_matrix_columns, 512);
}

#[test]
fn test_rotation_for_each_supported_orientation() {
    let cases = [
        (ALIGNED, Rotation::Degrees0),
        (ROTATED_90, Rotation::Degrees90),
        (ROTATED_180, Rotation::Degrees180),
        (ROTATED_270, Rotation::Degrees270),
    ];

    for (orientation, expected) in cases {
        let pyramid = Pyramid::assemble(&three_level_series(orientation)).unwrap();
        assert_eq!(pyramid.rotation(), expected);
    }
}

#[test]
fn test_unsupported_orientation_fails_assembly() {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    let diagonal = [s, s, 0.0, s, -s, 0.0];

    let err = Pyramid::assemble(&three_level_series(diagonal)).unwrap_err();
    assert!(matches!(err, PyramidError::UnsupportedOrientation(_)));
}

#[test]
fn test_empty_series_fails_assembly() {
    let err = Pyramid::assemble(&[]).unwrap_err();
    assert!(matches!(err, PyramidError::EmptyPyramid));
}

// =============================================================================
// Concatenation
// =============================================================================

#[test]
fn test_base_level_split_into_concatenation_parts() {
    // Base level: 2048 x 1024 → 8 x 4 tiles = 32 frames, split 20 + 12
    let base = level_instance("ignored", 2048, 1024, 0.00025, ALIGNED);
    let records = vec![
        level_instance("1.2.840.99.1.1.11", 1024, 512, 0.0005, ALIGNED),
        as_concatenation_part(base.clone(), "1.2.840.99.1.1.10", 1, 0, 20),
        as_concatenation_part(base, "1.2.840.99.1.1.10", 2, 20, 12),
    ];

    let pyramid = Pyramid::assemble(&records).unwrap();

    assert_eq!(pyramid.level_count(), 2);
    let merged = pyramid.base_level();
    assert_eq!(merged.metadata.sop_instance_uid, "1.2.840.99.1.1.10");
    assert_eq!(merged.metadata.number_of_frames, 32);
    assert_eq!(merged.metadata.frame_mapping.len(), 32);

    // Frames resolve to the part that stores them, numbered globally
    assert_eq!(
        pyramid.frame_location(1, 1, 1),
        Some("1.2.840.99.1.1.10.1/frames/1")
    );
    assert_eq!(
        pyramid.frame_location(1, 5, 3),
        Some("1.2.840.99.1.1.10.2/frames/21")
    );
    assert_eq!(
        pyramid.frame_location(1, 8, 4),
        Some("1.2.840.99.1.1.10.2/frames/32")
    );
}

// =============================================================================
// Frame mapping and lookup
// =============================================================================

#[test]
fn test_plane_positions_override_tiled_full_ordering() {
    // A sparse level: only two tiles stored, addressed by explicit positions
    let record = with_plane_positions(
        level_instance("1.2.840.99.1.1.10", 1024, 512, 0.00025, ALIGNED),
        &[(257, 257), (769, 1)],
    );

    let pyramid = Pyramid::assemble(&[record]).unwrap();
    let level = pyramid.base_level();

    assert_eq!(level.metadata.frame_mapping.len(), 2);
    assert_eq!(level.frame_location(2, 2), Some("1.2.840.99.1.1.10/frames/1"));
    assert_eq!(level.frame_location(4, 1), Some("1.2.840.99.1.1.10/frames/2"));

    // Unstored tiles miss instead of resolving to a neighbor
    assert_eq!(level.frame_location(1, 1), None);
}

#[test]
fn test_frame_url_composition() {
    let pyramid = Pyramid::assemble(&three_level_series(ALIGNED)).unwrap();
    let base_url = Url::parse("https://pacs.example.org/dicomweb").unwrap();

    let url = pyramid.frame_url(&base_url, 2, 1, 1).unwrap();
    assert_eq!(
        url.as_str(),
        "https://pacs.example.org/dicomweb/studies/1.2.840.99.1/series/1.2.840.99.1.1/instances/1.2.840.99.1.1.10/frames/1"
    );

    // Missing tiles and out-of-range levels yield no URL
    assert!(pyramid.frame_url(&base_url, 0, 99, 1).is_none());
    assert!(pyramid.frame_url(&base_url, 7, 1, 1).is_none());
}

// =============================================================================
// JSON input
// =============================================================================

#[test]
fn test_assembly_from_serialized_records() {
    // The CLI path: records arrive as a JSON array in natural-name form
    let records = three_level_series(ALIGNED);
    let json = serde_json::to_string(&records).unwrap();

    let parsed: Vec<RawImageMetadata> = serde_json::from_str(&json).unwrap();
    let pyramid = Pyramid::assemble(&parsed).unwrap();

    assert_eq!(pyramid.level_count(), 3);
    assert_eq!(pyramid.base_level().metadata.total_pixel_matrix_columns, 2048);
}
