//! Icosahedral planet tessellation: subdivided shape triangles, per-face frames, and a
//! lazily refined global/continental/local region graph.

mod border;
mod error;
mod face;
mod frame;
mod grid;
mod lazy;
mod linking;
mod macro_edge;
mod overflow;
mod planet;
mod polyhedron;
mod region;
mod registry;
mod shape;
mod shape_def;
mod tessellation;
mod topology;
mod winding;

pub use border::BorderType;
pub use error::{PlanetError, ShapeError};
pub use face::Face;
pub use frame::{Frame, scale_rigid};
pub use grid::{
    Orientation, TriCoord, face_count, generate_lattice, lattice_point, vertex_count, vertex_index,
};
pub use lazy::LazySlot;
pub use macro_edge::MacroEdge;
pub use overflow::{OverflowFace, reflect};
pub use planet::{MaterializationStats, Planet, ShapeAdjacency};
pub use polyhedron::{Adjacency, Polyhedron};
pub use region::{
    ContinentalId, ContinentalRegion, CornerLink, GlobalId, GlobalRegion, LocalId, LocalRegion,
    NeighbourLink, Region, RegionHandle, RegionLinks, VertexLink,
};
pub use registry::{RegistryStats, ShapeRegistry};
pub use shape::Shape;
pub use shape_def::{
    CellTargets, KEY_QUANTUM, LodLevel, ShapeDefinition, ShapeKey, SubdivisionOrders,
};
pub use tessellation::Tessellation;
pub use topology::{
    BorderPosition, CornerRef, NeighbourRef, StripAnchor, boundary_face, corner_face,
    face_corners, face_neighbours,
};
pub use winding::{doubled_area, edge_plane_normal, triangle_winds_outward};
