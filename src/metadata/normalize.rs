//! Metadata normalization and frame mapping.
//!
//! A raw instance record stores its geometry in nested DICOM sequences. This
//! module flattens one record into a [`NormalizedMetadata`] with explicit
//! numeric fields and builds the frame mapping: the lookup from a 1-based
//! `"column-row"` tile-grid address to the storage location of the frame that
//! covers that tile.
//!
//! # Frame positions
//!
//! Frames are located in the total pixel matrix in one of two ways:
//!
//! - **Per-frame functional groups**: each frame carries an explicit
//!   `PlanePositionSlideSequence` with its 1-based pixel position.
//! - **`TILED_FULL` organization**: the sequence is omitted and frames are
//!   ordered row-major across the matrix, left to right, top to bottom. For a
//!   concatenation part the frame offset locates the part's first frame
//!   within that global order.

use std::collections::HashMap;

use crate::error::MetadataError;

use super::raw::{PlanePositionSlide, RawImageMetadata};

// =============================================================================
// PixelSpacing
// =============================================================================

/// Physical spacing between pixel centers, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSpacing {
    /// Spacing between adjacent rows (vertical distance)
    pub row: f64,

    /// Spacing between adjacent columns (horizontal distance)
    pub column: f64,
}

// =============================================================================
// NormalizedMetadata
// =============================================================================

/// One per-instance metadata record with explicit numeric fields and a
/// resolved frame mapping.
///
/// Immediately after normalization there is one record per stored instance;
/// after the assembler's merge pass there is exactly one per distinct
/// (TotalPixelMatrixColumns, TotalPixelMatrixRows) pair, with concatenation
/// parts folded in.
#[derive(Debug, Clone)]
pub struct NormalizedMetadata {
    /// Study Instance UID
    pub study_instance_uid: String,

    /// Series Instance UID
    pub series_instance_uid: String,

    /// SOP Instance UID; replaced by the concatenation source's UID when
    /// parts are merged
    pub sop_instance_uid: String,

    /// Frame of Reference UID
    pub frame_of_reference_uid: String,

    /// Tile width in pixels
    pub columns: u32,

    /// Tile height in pixels
    pub rows: u32,

    /// Width of the total pixel matrix in pixels
    pub total_pixel_matrix_columns: u32,

    /// Height of the total pixel matrix in pixels
    pub total_pixel_matrix_rows: u32,

    /// Number of frames; summed across parts when merged
    pub number_of_frames: u32,

    /// Pixel spacing in mm
    pub pixel_spacing: PixelSpacing,

    /// Direction cosines of pixel matrix rows and columns
    pub image_orientation_slide: [f64; 6],

    /// Slide-space (x, y) offset of pixel (0, 0) in mm
    pub total_pixel_matrix_origin: (f64, f64),

    /// Explicit per-frame positions, in frame order; empty for `TILED_FULL`
    /// instances. Concatenated across parts when merged.
    pub frame_positions: Vec<PlanePositionSlide>,

    /// Lookup from 1-based `"column-row"` tile address to the frame's
    /// storage location. Unioned across parts when merged.
    pub frame_mapping: HashMap<String, String>,

    /// SOP Instance UID of the concatenation source, when this record is an
    /// unmerged part
    pub concatenation_source_uid: Option<String>,

    /// Concatenation UID, when this record is an unmerged part
    pub concatenation_uid: Option<String>,

    /// 1-based part index, when this record is an unmerged part
    pub in_concatenation_number: Option<u32>,

    /// Frame offset of this part within the logical instance
    pub concatenation_frame_offset_number: Option<u32>,
}

impl NormalizedMetadata {
    /// Normalize one raw instance record.
    ///
    /// Fails if the pixel spacing or total pixel matrix origin cannot be
    /// extracted from their nested sequences, or if a pixel extent is zero.
    pub fn from_raw(raw: &RawImageMetadata) -> Result<Self, MetadataError> {
        let pixel_spacing = extract_pixel_spacing(raw)?;
        let total_pixel_matrix_origin = extract_origin(raw)?;

        if raw.columns == 0 || raw.rows == 0 {
            return Err(MetadataError::InvalidAttribute {
                attribute: "Columns/Rows",
                message: "tile dimensions must be greater than zero".to_string(),
            });
        }
        if raw.total_pixel_matrix_columns == 0 || raw.total_pixel_matrix_rows == 0 {
            return Err(MetadataError::InvalidAttribute {
                attribute: "TotalPixelMatrixColumns/Rows",
                message: "total pixel matrix dimensions must be greater than zero".to_string(),
            });
        }

        let frame_positions = extract_frame_positions(raw)?;
        let frame_mapping = build_frame_mapping(raw, &frame_positions);

        Ok(NormalizedMetadata {
            study_instance_uid: raw.study_instance_uid.clone(),
            series_instance_uid: raw.series_instance_uid.clone(),
            sop_instance_uid: raw.sop_instance_uid.clone(),
            frame_of_reference_uid: raw.frame_of_reference_uid.clone(),
            columns: raw.columns,
            rows: raw.rows,
            total_pixel_matrix_columns: raw.total_pixel_matrix_columns,
            total_pixel_matrix_rows: raw.total_pixel_matrix_rows,
            number_of_frames: raw.number_of_frames,
            pixel_spacing,
            image_orientation_slide: raw.image_orientation_slide,
            total_pixel_matrix_origin,
            frame_positions,
            frame_mapping,
            concatenation_source_uid: raw.concatenation_source_uid.clone(),
            concatenation_uid: raw.concatenation_uid.clone(),
            in_concatenation_number: raw.in_concatenation_number,
            concatenation_frame_offset_number: raw.concatenation_frame_offset_number,
        })
    }

    /// Number of tile columns in this level's grid.
    pub fn grid_columns(&self) -> u32 {
        ceil_div(self.total_pixel_matrix_columns, self.columns)
    }

    /// Number of tile rows in this level's grid.
    pub fn grid_rows(&self) -> u32 {
        ceil_div(self.total_pixel_matrix_rows, self.rows)
    }

    /// Whether this record is an unmerged concatenation part.
    pub fn is_concatenation_part(&self) -> bool {
        self.concatenation_uid.is_some() || self.concatenation_source_uid.is_some()
    }
}

/// Ceiling division for pixel extents.
pub(crate) fn ceil_div(total: u32, size: u32) -> u32 {
    (total + size - 1) / size
}

// =============================================================================
// Extraction helpers
// =============================================================================

/// Extract the pixel spacing from the shared functional groups structure.
fn extract_pixel_spacing(raw: &RawImageMetadata) -> Result<PixelSpacing, MetadataError> {
    let group = raw
        .shared_functional_groups
        .as_deref()
        .and_then(|groups| groups.first())
        .ok_or(MetadataError::MissingSequence(
            "SharedFunctionalGroupsSequence",
        ))?;
    let measures = group
        .pixel_measures
        .as_deref()
        .and_then(|measures| measures.first())
        .ok_or(MetadataError::MissingSequence("PixelMeasuresSequence"))?;
    let spacing = measures
        .pixel_spacing
        .as_deref()
        .ok_or(MetadataError::MissingAttribute("PixelSpacing"))?;

    match spacing {
        [row, column] if *row > 0.0 && *column > 0.0 => Ok(PixelSpacing {
            row: *row,
            column: *column,
        }),
        _ => Err(MetadataError::InvalidPixelSpacing(spacing.to_vec())),
    }
}

/// Extract the slide-space offset of pixel (0, 0).
fn extract_origin(raw: &RawImageMetadata) -> Result<(f64, f64), MetadataError> {
    let origin = raw
        .total_pixel_matrix_origin
        .as_deref()
        .and_then(|items| items.first())
        .ok_or(MetadataError::MissingSequence(
            "TotalPixelMatrixOriginSequence",
        ))?;
    Ok((
        origin.x_offset_in_slide_coordinate_system,
        origin.y_offset_in_slide_coordinate_system,
    ))
}

/// Collect per-frame plane positions, if the record carries them.
fn extract_frame_positions(
    raw: &RawImageMetadata,
) -> Result<Vec<PlanePositionSlide>, MetadataError> {
    let Some(groups) = raw.per_frame_functional_groups.as_deref() else {
        return Ok(Vec::new());
    };

    groups
        .iter()
        .map(|group| {
            group
                .plane_position_slide
                .as_deref()
                .and_then(|positions| positions.first())
                .copied()
                .ok_or(MetadataError::MissingSequence("PlanePositionSlideSequence"))
        })
        .collect()
}

// =============================================================================
// Frame mapping
// =============================================================================

/// Build the tile-address → storage-location mapping for one record.
///
/// The storage location is `"{SOPInstanceUID}/frames/{frame number}"`, with
/// the concatenation frame offset applied so that part records address their
/// frames by the logical instance's numbering.
fn build_frame_mapping(
    raw: &RawImageMetadata,
    frame_positions: &[PlanePositionSlide],
) -> HashMap<String, String> {
    let offset = raw.concatenation_frame_offset_number.unwrap_or(0);
    let grid_columns = ceil_div(raw.total_pixel_matrix_columns, raw.columns);
    let mut mapping = HashMap::new();

    if frame_positions.is_empty() {
        // TILED_FULL: frames are ordered row-major across the matrix. The
        // offset locates this part's first frame within the global order.
        for local_index in 0..raw.number_of_frames {
            let global_index = offset + local_index;
            let column = global_index % grid_columns + 1;
            let row = global_index / grid_columns + 1;
            mapping.insert(
                frame_key(column, row),
                frame_location(&raw.sop_instance_uid, local_index + 1 + offset),
            );
        }
    } else {
        for (local_index, position) in frame_positions.iter().enumerate() {
            let column =
                position.column_position_in_total_image_pixel_matrix.saturating_sub(1)
                    / raw.columns
                    + 1;
            let row = position.row_position_in_total_image_pixel_matrix.saturating_sub(1)
                / raw.rows
                + 1;
            mapping.insert(
                frame_key(column, row),
                frame_location(&raw.sop_instance_uid, local_index as u32 + 1 + offset),
            );
        }
    }

    mapping
}

/// 1-based `"column-row"` tile address used as the frame mapping key.
fn frame_key(column: u32, row: u32) -> String {
    format!("{}-{}", column, row)
}

/// Storage location of a frame, resolvable against a DICOMweb instance path.
fn frame_location(sop_instance_uid: &str, frame_number: u32) -> String {
    format!("{}/frames/{}", sop_instance_uid, frame_number)
}

// =============================================================================
// Tests
// =============================================================================
