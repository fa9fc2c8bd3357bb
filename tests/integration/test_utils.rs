//! Test utilities for integration tests.
//!
//! Builders for per-instance metadata records resembling a real scanner
//! export: a base level plus progressively coarser levels, optionally split
//! into concatenation parts.

use wsi_pyramid::metadata::{
    FunctionalGroup, PerFrameFunctionalGroup, PixelMeasures, PlanePositionSlide,
    RawImageMetadata, TotalPixelMatrixOrigin,
};

/// Orientation aligned with the slide coordinate system (0 degrees).
pub const ALIGNED: [f64; 6] = [0.0, 1.0, 0.0, 1.0, 0.0, 0.0];

/// Orientation rotated by 90 degrees.
pub const ROTATED_90: [f64; 6] = [1.0, 0.0, 0.0, 0.0, -1.0, 0.0];

/// Orientation rotated by 180 degrees.
pub const ROTATED_180: [f64; 6] = [0.0, -1.0, 0.0, -1.0, 0.0, 0.0];

/// Orientation rotated by 270 degrees.
pub const ROTATED_270: [f64; 6] = [-1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

/// Build one TILED_FULL instance record with 256 x 256 tiles.
pub fn level_instance(
    sop_instance_uid: &str,
    total_columns: u32,
    total_rows: u32,
    spacing: f64,
    orientation: [f64; 6],
) -> RawImageMetadata {
    let grid_columns = (total_columns + 255) / 256;
    let grid_rows = (total_rows + 255) / 256;

    RawImageMetadata {
        study_instance_uid: "1.2.840.99.1".to_string(),
        series_instance_uid: "1.2.840.99.1.1".to_string(),
        sop_instance_uid: sop_instance_uid.to_string(),
        frame_of_reference_uid: "1.2.840.99.1.2".to_string(),
        columns: 256,
        rows: 256,
        total_pixel_matrix_columns: total_columns,
        total_pixel_matrix_rows: total_rows,
        number_of_frames: grid_columns * grid_rows,
        image_orientation_slide: orientation,
        shared_functional_groups: Some(vec![FunctionalGroup {
            pixel_measures: Some(vec![PixelMeasures {
                pixel_spacing: Some(vec![spacing, spacing]),
                slice_thickness: None,
            }]),
        }]),
        total_pixel_matrix_origin: Some(vec![TotalPixelMatrixOrigin {
            x_offset_in_slide_coordinate_system: 18.5,
            y_offset_in_slide_coordinate_system: 42.25,
        }]),
        per_frame_functional_groups: None,
        dimension_organization_type: Some("TILED_FULL".to_string()),
        concatenation_source_uid: None,
        concatenation_uid: None,
        in_concatenation_number: None,
        concatenation_frame_offset_number: None,
    }
}

/// Turn an instance into a concatenation part holding `number_of_frames`
/// frames starting at `frame_offset`.
pub fn as_concatenation_part(
    mut record: RawImageMetadata,
    source_uid: &str,
    part_number: u32,
    frame_offset: u32,
    number_of_frames: u32,
) -> RawImageMetadata {
    record.sop_instance_uid = format!("{}.{}", source_uid, part_number);
    record.number_of_frames = number_of_frames;
    record.concatenation_source_uid = Some(source_uid.to_string());
    record.concatenation_uid = Some(format!("{}.7", source_uid));
    record.in_concatenation_number = Some(part_number);
    record.concatenation_frame_offset_number = Some(frame_offset);
    record
}

/// Attach explicit per-frame plane positions, replacing TILED_FULL ordering.
pub fn with_plane_positions(
    mut record: RawImageMetadata,
    positions: &[(u32, u32)],
) -> RawImageMetadata {
    record.dimension_organization_type = None;
    record.number_of_frames = positions.len() as u32;
    record.per_frame_functional_groups = Some(
        positions
            .iter()
            .map(|(column, row)| PerFrameFunctionalGroup {
                plane_position_slide: Some(vec![PlanePositionSlide {
                    row_position_in_total_image_pixel_matrix: *row,
                    column_position_in_total_image_pixel_matrix: *column,
                }]),
            })
            .collect(),
    );
    record
}

/// A three-level series: 2048 → 1024 → 512 pixels wide, spacing doubling at
/// each coarser level.
pub fn three_level_series(orientation: [f64; 6]) -> Vec<RawImageMetadata> {
    vec![
        level_instance("1.2.840.99.1.1.10", 2048, 1024, 0.00025, orientation),
        level_instance("1.2.840.99.1.1.11", 1024, 512, 0.0005, orientation),
        level_instance("1.2.840.99.1.1.12", 512, 256, 0.001, orientation),
    ]
}
