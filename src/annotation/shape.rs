//! Planar shapes in pixel-matrix coordinates.
//!
//! Shapes are what the drawing layer hands to the codec: transient,
//! pixel-space geometry with no identity of its own. Conversion to and from
//! slide-space regions of interest happens in [`super::codec`].

// =============================================================================
// Shape
// =============================================================================

/// A planar shape in pixel-matrix coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A single point
    Point {
        /// Pixel coordinate
        coordinates: [f64; 2],
    },

    /// An open sequence of connected line segments
    LineString {
        /// Vertices in drawing order
        coordinates: Vec<[f64; 2]>,
    },

    /// A polygon as a list of linear rings.
    ///
    /// The first ring is the outer boundary and must be closed (first and
    /// last vertex identical). Each further ring would describe a hole in the
    /// surface; the annotation format cannot carry holes, so the codec
    /// rejects them.
    Polygon {
        /// Linear rings; ring 0 is the outer boundary
        rings: Vec<Vec<[f64; 2]>>,
    },

    /// A circle described by its center and radius in pixel units
    Circle {
        /// Center pixel coordinate
        center: [f64; 2],

        /// Radius in pixel units
        radius: f64,
    },
}

impl Shape {
    /// A point shape.
    pub fn point(coordinates: [f64; 2]) -> Self {
        Shape::Point { coordinates }
    }

    /// A line string through the given vertices.
    pub fn line_string(coordinates: Vec<[f64; 2]>) -> Self {
        Shape::LineString { coordinates }
    }

    /// A polygon with a single outer ring and no holes.
    pub fn polygon(outer_ring: Vec<[f64; 2]>) -> Self {
        Shape::Polygon {
            rings: vec![outer_ring],
        }
    }

    /// A circle around `center`.
    pub fn circle(center: [f64; 2], radius: f64) -> Self {
        Shape::Circle { center, radius }
    }

    /// The shape's variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Point { .. } => "Point",
            Shape::LineString { .. } => "LineString",
            Shape::Polygon { .. } => "Polygon",
            Shape::Circle { .. } => "Circle",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
