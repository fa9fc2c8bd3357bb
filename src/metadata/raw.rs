//! Raw per-instance metadata model.
//!
//! These types mirror the attribute names and nesting of the DICOM Visible
//! Light Whole Slide Microscopy Image IOD in its natural-name JSON form, as
//! returned by a DICOMweb metadata query after keyword translation. They are
//! deserialized as-is and carry no derived information; all interpretation
//! happens in [`super::normalize`].

use serde::{Deserialize, Serialize};

// =============================================================================
// Nested Sequences
// =============================================================================

/// One item of `SharedFunctionalGroupsSequence`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionalGroup {
    /// `PixelMeasuresSequence` holding the pixel spacing for all frames
    #[serde(
        rename = "PixelMeasuresSequence",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pixel_measures: Option<Vec<PixelMeasures>>,
}

/// One item of `PixelMeasuresSequence`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PixelMeasures {
    /// Physical distance between pixel centers as (row, column) spacing in mm
    #[serde(
        rename = "PixelSpacing",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pixel_spacing: Option<Vec<f64>>,

    /// Nominal slice thickness in mm
    #[serde(
        rename = "SliceThickness",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub slice_thickness: Option<f64>,
}

/// One item of `TotalPixelMatrixOriginSequence`: the slide-space position of
/// pixel (0, 0) of the total pixel matrix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TotalPixelMatrixOrigin {
    /// X offset of the first pixel in the slide coordinate system (mm)
    #[serde(rename = "XOffsetInSlideCoordinateSystem")]
    pub x_offset_in_slide_coordinate_system: f64,

    /// Y offset of the first pixel in the slide coordinate system (mm)
    #[serde(rename = "YOffsetInSlideCoordinateSystem")]
    pub y_offset_in_slide_coordinate_system: f64,
}

/// One item of `PerFrameFunctionalGroupsSequence`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerFrameFunctionalGroup {
    /// `PlanePositionSlideSequence` locating this frame in the pixel matrix
    #[serde(
        rename = "PlanePositionSlideSequence",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub plane_position_slide: Option<Vec<PlanePositionSlide>>,
}

/// One item of `PlanePositionSlideSequence`.
///
/// Positions are 1-based pixel indices of the frame's top-left corner within
/// the total pixel matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanePositionSlide {
    /// Row of the frame's first pixel in the total pixel matrix (1-based)
    #[serde(rename = "RowPositionInTotalImagePixelMatrix")]
    pub row_position_in_total_image_pixel_matrix: u32,

    /// Column of the frame's first pixel in the total pixel matrix (1-based)
    #[serde(rename = "ColumnPositionInTotalImagePixelMatrix")]
    pub column_position_in_total_image_pixel_matrix: u32,
}

// =============================================================================
// RawImageMetadata
// =============================================================================

/// Raw metadata for one VL Whole Slide Microscopy Image instance.
///
/// An instance is either a complete pyramid level or one concatenation part
/// of a level that was split across multiple stored objects. Parts carry the
/// four concatenation attributes and are reassembled by the pyramid builder
/// based on shared total pixel matrix dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawImageMetadata {
    /// Study Instance UID
    #[serde(rename = "StudyInstanceUID")]
    pub study_instance_uid: String,

    /// Series Instance UID
    #[serde(rename = "SeriesInstanceUID")]
    pub series_instance_uid: String,

    /// SOP Instance UID of this stored object
    #[serde(rename = "SOPInstanceUID")]
    pub sop_instance_uid: String,

    /// Frame of Reference UID shared by all levels of one pyramid
    #[serde(rename = "FrameOfReferenceUID")]
    pub frame_of_reference_uid: String,

    /// Tile width in pixels
    #[serde(rename = "Columns")]
    pub columns: u32,

    /// Tile height in pixels
    #[serde(rename = "Rows")]
    pub rows: u32,

    /// Width of the total pixel matrix in pixels
    #[serde(rename = "TotalPixelMatrixColumns")]
    pub total_pixel_matrix_columns: u32,

    /// Height of the total pixel matrix in pixels
    #[serde(rename = "TotalPixelMatrixRows")]
    pub total_pixel_matrix_rows: u32,

    /// Number of frames stored in this instance (1 if absent)
    #[serde(rename = "NumberOfFrames", default = "default_number_of_frames")]
    pub number_of_frames: u32,

    /// Direction cosines of the pixel matrix rows and columns with respect to
    /// the slide coordinate system
    #[serde(rename = "ImageOrientationSlide")]
    pub image_orientation_slide: [f64; 6],

    /// `SharedFunctionalGroupsSequence`, expected to carry the pixel spacing
    #[serde(
        rename = "SharedFunctionalGroupsSequence",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub shared_functional_groups: Option<Vec<FunctionalGroup>>,

    /// `TotalPixelMatrixOriginSequence`, the slide-space offset of pixel (0,0)
    #[serde(
        rename = "TotalPixelMatrixOriginSequence",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_pixel_matrix_origin: Option<Vec<TotalPixelMatrixOrigin>>,

    /// `PerFrameFunctionalGroupsSequence` locating each frame individually.
    ///
    /// Absent for `TILED_FULL` instances, where frame positions follow
    /// implicitly from the frame order.
    #[serde(
        rename = "PerFrameFunctionalGroupsSequence",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub per_frame_functional_groups: Option<Vec<PerFrameFunctionalGroup>>,

    /// `DimensionOrganizationType`, e.g. `"TILED_FULL"`
    #[serde(
        rename = "DimensionOrganizationType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dimension_organization_type: Option<String>,

    /// SOP Instance UID of the logical instance this part belongs to
    #[serde(
        rename = "SOPInstanceUIDOfConcatenationSource",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub concatenation_source_uid: Option<String>,

    /// UID shared by all parts of one concatenation
    #[serde(
        rename = "ConcatenationUID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub concatenation_uid: Option<String>,

    /// 1-based index of this part within the concatenation
    #[serde(
        rename = "InConcatenationNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub in_concatenation_number: Option<u32>,

    /// Offset of this part's first frame within the logical instance
    #[serde(
        rename = "ConcatenationFrameOffsetNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub concatenation_frame_offset_number: Option<u32>,
}

fn default_number_of_frames() -> u32 {
    1
}

// =============================================================================
// Tests
// =============================================================================
