//! Per-instance metadata model and normalization.
//!
//! The viewer receives one raw metadata record per stored DICOM instance. A
//! record describes either a whole pyramid level or one concatenation part of
//! a level. This module deserializes those records ([`RawImageMetadata`]) and
//! flattens each into a [`NormalizedMetadata`] with explicit numeric geometry
//! and a resolved frame mapping, ready for the pyramid assembler.
//!
//! # Components
//!
//! - [`RawImageMetadata`]: serde model of the DICOM natural-name JSON form
//! - [`NormalizedMetadata`]: flattened record with explicit fields
//! - [`PixelSpacing`]: physical (row, column) spacing in millimeters

mod normalize;
mod raw;

pub use normalize::{NormalizedMetadata, PixelSpacing};
pub use raw::{
    FunctionalGroup, PerFrameFunctionalGroup, PixelMeasures, PlanePositionSlide,
    RawImageMetadata, TotalPixelMatrixOrigin,
};
