//! Pyramid assembly and per-level geometry.
//!
//! A whole-slide image is stored as a set of DICOM instances, one or more per
//! resolution level. This module reassembles that flat instance list into a
//! coherent multi-resolution pyramid:
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │      raw instance metadata records        │
//! └─────────────────────┬─────────────────────┘
//!                       │ normalize + sort
//!                       ▼
//! ┌───────────────────────────────────────────┐
//! │  merge concatenation parts per (cols,rows)│
//! └─────────────────────┬─────────────────────┘
//!                       │ derive geometry
//!                       ▼
//! ┌───────────────────────────────────────────┐
//! │  Pyramid: levels (coarse → fine), extent, │
//! │  rotation, frame lookup                   │
//! └───────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`Pyramid`]: the assembled, immutable level list with extent/rotation
//! - [`PyramidLevel`]: one level with tile size, grid size and resolution
//! - [`Rotation`]: the four supported planar rotations of the pixel matrix

mod assemble;
mod orientation;

pub use assemble::{Pyramid, PyramidLevel, TILE_ORIGIN};
pub use orientation::{Rotation, ORIENTATION_TOLERANCE};
