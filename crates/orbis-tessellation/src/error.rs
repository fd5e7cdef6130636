//! Error types for shape definitions and planet construction.

use crate::macro_edge::MacroEdge;
use crate::shape_def::LodLevel;

/// Errors that can occur when defining a shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    /// A subdivision order was zero.
    #[error("subdivision order for the {level:?} level must be at least 1")]
    ZeroOrder {
        /// Level with the invalid order.
        level: LodLevel,
    },

    /// A corner vector was zero, infinite or NaN.
    #[error("shape corner {index} is not a finite, non-zero vector")]
    InvalidCorner {
        /// Corner index (0 = A, 1 = B, 2 = C).
        index: usize,
    },

    /// The corners are (nearly) collinear.
    #[error("shape corners are degenerate (doubled area {area:e})")]
    DegenerateCorners {
        /// Twice the triangle area after normalization.
        area: f64,
    },

    /// The corners run clockwise when viewed from outside the sphere.
    #[error("shape corners wind clockwise when viewed from outside the sphere")]
    ClockwiseCorners,
}

/// Errors that can occur when assembling a planet.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanetError {
    /// No shapes were supplied.
    #[error("planet topology is empty")]
    EmptyTopology,

    /// The shape, neighbour and border tables differ in length.
    #[error(
        "topology tables differ in length: {shapes} shapes, {neighbours} neighbour rows, {borders} border rows"
    )]
    MismatchedLengths {
        /// Number of shapes.
        shapes: usize,
        /// Number of neighbour rows.
        neighbours: usize,
        /// Number of border-type rows.
        borders: usize,
    },

    /// The radius was not a positive finite number.
    #[error("planet radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// A shape definition was rejected.
    #[error("shape {index} is invalid: {source}")]
    InvalidShape {
        /// Index of the offending shape.
        index: usize,
        /// Why it was rejected.
        #[source]
        source: ShapeError,
    },

    /// A neighbour index points past the end of the shape list.
    #[error("shape {shape} edge {edge:?} names neighbour {neighbour}, but only {count} shapes exist")]
    NeighbourOutOfRange {
        /// Shape holding the bad entry.
        shape: usize,
        /// Edge of that shape.
        edge: MacroEdge,
        /// The out-of-range index.
        neighbour: usize,
        /// Number of shapes.
        count: usize,
    },

    /// The neighbour does not point back across the matching edge.
    #[error("shape {shape} edge {edge:?} is not reciprocated by shape {neighbour}")]
    AsymmetricBorder {
        /// Shape holding the entry.
        shape: usize,
        /// Edge of that shape.
        edge: MacroEdge,
        /// The neighbour that does not point back.
        neighbour: usize,
    },

    /// The declared shared edge does not coincide geometrically.
    #[error("shape {shape} edge {edge:?} does not coincide with the shared edge of shape {neighbour}")]
    BorderGeometryMismatch {
        /// Shape holding the entry.
        shape: usize,
        /// Edge of that shape.
        edge: MacroEdge,
        /// The declared neighbour.
        neighbour: usize,
    },

    /// Walking around a shape corner never returned to the starting shape,
    /// or closed after fewer than three shapes.
    #[error("corner {corner} of shape {shape} is not surrounded by a closed ring of shapes")]
    BrokenVertexRing {
        /// Shape the walk started from.
        shape: usize,
        /// Corner of that shape.
        corner: usize,
    },

    /// A polyhedron edge is used by one face only, or by more than two.
    #[error("polyhedron edge {from} -> {to} is not shared by exactly two faces")]
    NonManifoldEdge {
        /// Start vertex of the directed edge.
        from: usize,
        /// End vertex of the directed edge.
        to: usize,
    },
}
