//! Shapes, regions of interest, and the conversion between them.
//!
//! The drawing layer works in pixel-matrix coordinates; persisted annotations
//! live in the slide coordinate system. This module holds both
//! representations and the codec that maps between them:
//!
//! - [`Shape`]: transient pixel-space geometry (point, line string, polygon,
//!   circle)
//! - [`Roi`]: slide-space region of interest with a standardized
//!   [`GraphicType`] and the serde wire format of the exchange protocol
//! - [`shape_to_roi`] / [`roi_to_shape`]: the lossless (except ELLIPSE)
//!   bidirectional conversion, vertex-transformed against the pyramid's base
//!   level

mod codec;
mod roi;
mod shape;

pub use codec::{roi_to_shape, shape_to_roi};
pub use roi::{generate_uid, GraphicType, Roi};
pub use shape::Shape;
