//! # wsi-pyramid
//!
//! Pyramid assembly and slide-coordinate geometry for DICOM Whole Slide
//! Microscopy images.
//!
//! A whole-slide viewer receives a flat list of per-instance metadata
//! records - possibly split across concatenation parts and spanning several
//! magnification levels - and needs three things from it: a coherent
//! multi-resolution pyramid, a mapping between the base level's pixel matrix
//! and the physical slide coordinate system, and a codec that turns drawn
//! shapes into slide-space annotations and back. This crate provides exactly
//! that core; rendering, interaction, and tile fetching stay with the host
//! application.
//!
//! ## Features
//!
//! - **Pyramid assembly**: merges concatenation parts, sorts levels by
//!   resolution, derives tile sizes, grid sizes, resolution factors, extent,
//!   and rotation
//! - **Frame lookup**: resolves a level index and tile-grid address to the
//!   frame's storage location (and optionally a WADO-RS retrieval URL)
//! - **Coordinate transforms**: orientation-aware, mutually inverse pixel ↔
//!   slide conversions in millimeters
//! - **Annotation codec**: point, polyline, polygon, and circle/ellipse
//!   conversion between pixel space and slide-space regions of interest
//!
//! ## Architecture
//!
//! - [`metadata`] - raw DICOM JSON model and normalization
//! - [`pyramid`] - pyramid assembly and per-level geometry
//! - [`transform`] - pixel ↔ slide coordinate transforms
//! - [`annotation`] - shapes, regions of interest, and their codec
//! - [`config`] - CLI types for the inspection binary
//!
//! ## Example
//!
//! ```rust,no_run
//! use wsi_pyramid::{Pyramid, RawImageMetadata, Shape, shape_to_roi};
//!
//! fn run(records: Vec<RawImageMetadata>) -> Result<(), Box<dyn std::error::Error>> {
//!     // Assemble the pyramid once per viewer session
//!     let pyramid = Pyramid::assemble(&records)?;
//!
//!     // Resolve a tile to its frame storage location
//!     if let Some(location) = pyramid.frame_location(0, 1, 1) {
//!         println!("fetch {location}");
//!     }
//!
//!     // Convert a drawn shape into a slide-space region of interest
//!     let roi = shape_to_roi(&Shape::circle([10.0, -10.0], 5.0), &pyramid)?;
//!     println!("stored as {}", roi.graphic_type);
//!     Ok(())
//! }
//! ```

pub mod annotation;
pub mod config;
pub mod error;
pub mod metadata;
pub mod pyramid;
pub mod transform;

// Re-export commonly used types
pub use annotation::{generate_uid, roi_to_shape, shape_to_roi, GraphicType, Roi, Shape};
pub use config::{CheckConfig, Cli, Command, LookupConfig};
pub use error::{CodecError, MetadataError, PyramidError, TransformError};
pub use metadata::{NormalizedMetadata, PixelSpacing, RawImageMetadata};
pub use pyramid::{Pyramid, PyramidLevel, Rotation, ORIENTATION_TOLERANCE, TILE_ORIGIN};
pub use transform::SlideTransform;
