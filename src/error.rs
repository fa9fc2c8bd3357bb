//! Error types for metadata normalization, pyramid assembly, and geometry
//! conversion.
//!
//! Every operation in this crate is synchronous and deterministic, so errors
//! are surfaced directly to the caller as part of the call's result. Nothing
//! is retried or silently swallowed: a partially merged pyramid level or a
//! silently skipped annotation vertex would corrupt downstream geometry.

use thiserror::Error;

use crate::annotation::GraphicType;

/// Errors that can occur while normalizing a raw per-instance metadata record.
#[derive(Debug, Clone, Error)]
pub enum MetadataError {
    /// A required nested sequence is absent from the record
    #[error("Missing required sequence: {0}")]
    MissingSequence(&'static str),

    /// A required attribute is absent from the record
    #[error("Missing required attribute: {0}")]
    MissingAttribute(&'static str),

    /// PixelSpacing must hold exactly two positive values (row, column) in mm
    #[error("Invalid PixelSpacing: expected two positive values, got {0:?}")]
    InvalidPixelSpacing(Vec<f64>),

    /// An attribute holds a value outside its valid range
    #[error("Invalid value for {attribute}: {message}")]
    InvalidAttribute {
        attribute: &'static str,
        message: String,
    },
}

/// Errors that can occur while assembling the image pyramid.
#[derive(Debug, Clone, Error)]
pub enum PyramidError {
    /// A record could not be normalized
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// No levels could be derived from the input metadata.
    ///
    /// An empty input list is a configuration error on the caller's side and
    /// is reported as such rather than yielding an empty pyramid.
    #[error("No pyramid levels could be derived from the provided metadata")]
    EmptyPyramid,

    /// A concatenation part is missing the identifier of its source instance.
    ///
    /// Accepting such a part would corrupt the merged level's frame mapping,
    /// so the merge fails instead of continuing best-effort.
    #[error(
        "Attribute \"SOPInstanceUIDOfConcatenationSource\" is required for \
         concatenation parts (offending SOP Instance UID: {sop_instance_uid})"
    )]
    MissingConcatenationSource { sop_instance_uid: String },

    /// The base level's orientation is not one of the four supported patterns.
    ///
    /// Rotation is restricted to the axis-aligned cases because rows and
    /// columns of the total pixel matrix are assumed parallel to the axes of
    /// the slide coordinate system.
    #[error("Unsupported image orientation {0:?}")]
    UnsupportedOrientation([f64; 6]),
}

/// Errors that can occur when building a coordinate transform.
#[derive(Debug, Clone, Error)]
pub enum TransformError {
    /// The level's orientation does not match any supported pattern, so the
    /// direction-cosine matrix cannot be inverted reliably
    #[error("Invalid image orientation {0:?}: not one of the four axis-aligned patterns")]
    InvalidOrientation([f64; 6]),
}

/// Errors that can occur while converting between shapes and annotations.
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    /// The transform for the base level could not be constructed
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// The shape cannot be represented as an annotation
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// The annotation's graphic type cannot be represented as a shape
    #[error("Unsupported graphic type \"{0}\"")]
    UnsupportedAnnotation(GraphicType),

    /// The annotation's graphic data does not fit its graphic type
    #[error("Malformed graphic data for {graphic_type}: expected {expected}, got {actual} coordinates")]
    MalformedGraphicData {
        graphic_type: GraphicType,
        expected: &'static str,
        actual: usize,
    },
}
