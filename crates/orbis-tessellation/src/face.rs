//! A generated face with its frame, local geometry and neighbour references.

use glam::{DAffine3, DVec3};

use crate::frame::Frame;
use crate::grid::TriCoord;
use crate::topology::{CornerRef, NeighbourRef};

/// One triangle of a subdivided shape.
///
/// Vertices, vertex normals and edge normals are stored in the face's local
/// [`Frame`]; their unit-sphere counterparts are kept alongside. Slot `i` of
/// every per-vertex array refers to the same vertex, and edge `i` runs from
/// vertex `i` to vertex `(i + 1) % 3`.
#[derive(Clone, Debug)]
pub struct Face {
    pub(crate) index: u32,
    pub(crate) coord: TriCoord,
    pub(crate) lattice: [usize; 3],
    pub(crate) sphere_vertices: [DVec3; 3],
    pub(crate) sphere_edge_normals: [DVec3; 3],
    pub(crate) frame: Frame,
    pub(crate) vertices: [DVec3; 3],
    pub(crate) vertex_normals: [DVec3; 3],
    pub(crate) edge_normals: [DVec3; 3],
    pub(crate) neighbours: [NeighbourRef; 3],
    pub(crate) corners: [CornerRef; 3],
    pub(crate) to_neighbour: [DAffine3; 3],
    pub(crate) to_corner: [Option<DAffine3>; 3],
    pub(crate) to_upper: DAffine3,
    pub(crate) from_upper: DAffine3,
}

impl Face {
    /// Flat index within its tessellation.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Grid coordinate.
    #[must_use]
    pub fn coord(&self) -> TriCoord {
        self.coord
    }

    /// Lattice vertex indices of the three vertices.
    #[must_use]
    pub fn lattice_indices(&self) -> [usize; 3] {
        self.lattice
    }

    /// Frame of the face.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Vertex `i` in the face's local frame.
    #[must_use]
    pub fn vertex(&self, i: usize) -> DVec3 {
        self.vertices[i]
    }

    /// Sphere normal at vertex `i`, in the face's local frame.
    #[must_use]
    pub fn vertex_normal(&self, i: usize) -> DVec3 {
        self.vertex_normals[i]
    }

    /// Outward normal of the plane through edge `i`, in the face's local frame.
    #[must_use]
    pub fn edge_normal(&self, i: usize) -> DVec3 {
        self.edge_normals[i]
    }

    /// Vertex `i` on the unit sphere.
    #[must_use]
    pub fn sphere_vertex(&self, i: usize) -> DVec3 {
        self.sphere_vertices[i]
    }

    /// Edge normal `i` in unit-sphere coordinates.
    #[must_use]
    pub fn sphere_edge_normal(&self, i: usize) -> DVec3 {
        self.sphere_edge_normals[i]
    }

    /// Neighbour across edge `i`.
    #[must_use]
    pub fn neighbour(&self, i: usize) -> NeighbourRef {
        self.neighbours[i]
    }

    /// Face opposite vertex `i`.
    #[must_use]
    pub fn corner(&self, i: usize) -> CornerRef {
        self.corners[i]
    }

    /// Transform from this face's frame into the neighbour's across edge `i`.
    ///
    /// For a border neighbour this targets the overflow face standing in for it.
    #[must_use]
    pub fn to_neighbour(&self, i: usize) -> DAffine3 {
        self.to_neighbour[i]
    }

    /// Transform into the frame of the face opposite vertex `i`.
    ///
    /// `None` at a grid corner, where no overflow face stands in.
    #[must_use]
    pub fn to_corner(&self, i: usize) -> Option<DAffine3> {
        self.to_corner[i]
    }

    /// Transform into the frame of the parent face (or of the shape triangle
    /// for the coarsest level).
    #[must_use]
    pub fn to_upper(&self) -> DAffine3 {
        self.to_upper
    }

    /// Transform from the parent frame into this face's frame.
    #[must_use]
    pub fn from_upper(&self) -> DAffine3 {
        self.from_upper
    }
}
