//! Regions of interest in slide coordinates.
//!
//! A [`Roi`] is the persisted/wire form of an annotation: a standardized
//! graphic type, an ordered list of 3-component slide coordinates in mm, an
//! opaque property map and a unique identifier. The struct serializes to the
//! exchange format used by the host application
//! (`graphicType`/`graphicData`/`properties`/`uid`/`frameOfReferenceUID`).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// GraphicType
// =============================================================================

/// Standardized graphic types for slide-space annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GraphicType {
    /// A single point
    Point,

    /// Multiple unconnected points
    Multipoint,

    /// An open sequence of connected line segments
    Polyline,

    /// A closed ring of line segments
    Polygon,

    /// An ellipse given by the endpoints of its major and minor axes
    Ellipse,
}

impl fmt::Display for GraphicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphicType::Point => "POINT",
            GraphicType::Multipoint => "MULTIPOINT",
            GraphicType::Polyline => "POLYLINE",
            GraphicType::Polygon => "POLYGON",
            GraphicType::Ellipse => "ELLIPSE",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Roi
// =============================================================================

/// A region of interest in slide coordinates.
///
/// Owned by the caller; the codec constructs and reads ROIs but never retains
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roi {
    /// Unique identifier of this region
    pub uid: String,

    /// The standardized graphic type
    #[serde(rename = "graphicType")]
    pub graphic_type: GraphicType,

    /// Ordered (x, y, z) slide coordinates in mm; z is always 0
    #[serde(rename = "graphicData")]
    pub graphic_data: Vec<[f64; 3]>,

    /// Frame of Reference UID of the pyramid the region was drawn against
    #[serde(rename = "frameOfReferenceUID")]
    pub frame_of_reference_uid: String,

    /// Opaque application properties, carried through unchanged
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
}

impl Roi {
    /// Create a region with a freshly generated UID and empty properties.
    pub fn new(
        graphic_type: GraphicType,
        graphic_data: Vec<[f64; 3]>,
        frame_of_reference_uid: impl Into<String>,
    ) -> Self {
        Roi {
            uid: generate_uid(),
            graphic_type,
            graphic_data,
            frame_of_reference_uid: frame_of_reference_uid.into(),
            properties: Map::new(),
        }
    }

    /// Replace the generated UID with a caller-supplied one.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    /// Attach application properties.
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }
}

// =============================================================================
// UID generation
// =============================================================================

/// Generate a DICOM-style unique identifier under the `2.25` UUID root.
///
/// Uniqueness comes from the wall-clock nanosecond timestamp plus a
/// process-local counter, which keeps identifiers distinct even when many
/// regions are created within one clock tick.
pub fn generate_uid() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or(0);
    let count = COUNTER.fetch_add(1, Ordering::Relaxed) % 100_000;

    format!("2.25.{}{:05}", nanos, count)
}

// =============================================================================
// Tests
// =============================================================================
