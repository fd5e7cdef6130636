//! One level of detail of a subdivided triangle, with lazily generated finer levels.
//!
//! A [`Tessellation`] owns the lattice, faces and overflow faces of one
//! triangle at one order. Finer levels subdivide individual faces: the child
//! of face `f` is itself a tessellation whose corners are `f`'s vertices.
//! Children are generated on first access and cached.

use std::sync::{Arc, OnceLock};

use glam::{DAffine3, DVec3};

use crate::face::Face;
use crate::frame::Frame;
use crate::grid::{TriCoord, face_count, generate_lattice, vertex_index};
use crate::macro_edge::MacroEdge;
use crate::overflow::{OverflowFace, generate_overflow};
use crate::topology::{
    BorderPosition, CornerRef, NeighbourRef, boundary_face, face_corners, face_neighbours,
};
use crate::winding::edge_plane_normal;

/// Faces, lattice and overflow of one triangle at one order.
#[derive(Debug)]
pub struct Tessellation {
    corners: [DVec3; 3],
    order: u32,
    lattice: Vec<DVec3>,
    faces: Vec<Face>,
    overflow: Vec<OverflowFace>,
    child_orders: Vec<u32>,
    children: Vec<OnceLock<Arc<Tessellation>>>,
}

impl Tessellation {
    /// Generate the tessellation of `corners` (unit length, counter-clockwise).
    ///
    /// `order` is the order of this level and `finer` the orders of
    /// successively finer child levels, all validated to be at least 1.
    /// `parent` is the frame the faces' upper transforms refer to.
    pub(crate) fn generate(
        corners: [DVec3; 3],
        order: u32,
        finer: &[u32],
        parent: &Frame,
    ) -> Self {
        debug_assert!(
            order >= 1 && finer.iter().all(|&o| o >= 1),
            "unvalidated subdivision orders {order} {finer:?}"
        );
        let child_orders = finer.to_vec();
        let count = face_count(order);

        let lattice = generate_lattice(&corners, order);
        let coords: Vec<TriCoord> = (0..count as u32).map(TriCoord::from_index).collect();
        let lattice_indices: Vec<[usize; 3]> = coords
            .iter()
            .map(|coord| coord.lattice_vertices().map(|(r, c)| vertex_index(r, c)))
            .collect();
        let sphere_vertices: Vec<[DVec3; 3]> = lattice_indices
            .iter()
            .map(|indices| indices.map(|i| lattice[i]))
            .collect();
        let frames: Vec<Frame> = sphere_vertices
            .iter()
            .map(|&v| Frame::from_triangle(v))
            .collect();
        let neighbours: Vec<[NeighbourRef; 3]> =
            coords.iter().map(|&coord| face_neighbours(order, coord)).collect();
        let corner_refs: Vec<[CornerRef; 3]> =
            coords.iter().map(|&coord| face_corners(order, coord)).collect();

        // Shared edges are computed once and negated for the face on the other side.
        let mut edge_normals: Vec<[DVec3; 3]> = Vec::with_capacity(count);
        for index in 0..count {
            let vertices = sphere_vertices[index];
            let normals: [DVec3; 3] = std::array::from_fn(|e| match neighbours[index][e] {
                NeighbourRef::Direct(other) if (other as usize) < index => {
                    -edge_normals[other as usize][e]
                }
                _ => edge_plane_normal(vertices[e], vertices[(e + 1) % 3]),
            });
            edge_normals.push(normals);
        }

        let overflow = generate_overflow(order, &sphere_vertices, &edge_normals);

        let faces = (0..count)
            .map(|index| {
                let frame = frames[index];
                let to_neighbour = neighbours[index].map(|neighbour| match neighbour {
                    NeighbourRef::Direct(other) => frame.relative_to(&frames[other as usize]),
                    NeighbourRef::Border(position) => {
                        frame.relative_to(&overflow[position.index(order)].frame)
                    }
                });
                let to_corner = corner_refs[index].map(|corner| match corner {
                    CornerRef::Direct(other) => Some(frame.relative_to(&frames[other as usize])),
                    CornerRef::Border { position, .. } => {
                        Some(frame.relative_to(&overflow[position.index(order)].frame))
                    }
                    CornerRef::Apex(_) => None,
                });
                Face {
                    index: index as u32,
                    coord: coords[index],
                    lattice: lattice_indices[index],
                    sphere_vertices: sphere_vertices[index],
                    sphere_edge_normals: edge_normals[index],
                    frame,
                    vertices: sphere_vertices[index].map(|v| frame.to_local_point(v)),
                    vertex_normals: sphere_vertices[index].map(|v| frame.to_local_vector(v)),
                    edge_normals: edge_normals[index].map(|n| frame.to_local_vector(n)),
                    neighbours: neighbours[index],
                    corners: corner_refs[index],
                    to_neighbour,
                    to_corner,
                    to_upper: frame.relative_to(parent),
                    from_upper: parent.relative_to(&frame),
                }
            })
            .collect();

        let children = if child_orders.is_empty() {
            Vec::new()
        } else {
            (0..count).map(|_| OnceLock::new()).collect()
        };

        tracing::trace!("Generated tessellation of order {} ({} faces)", order, count);

        Self {
            corners,
            order,
            lattice,
            faces,
            overflow,
            child_orders,
            children,
        }
    }

    /// Subdivision order of this level.
    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Unit-length corners of the subdivided triangle.
    #[must_use]
    pub fn corners(&self) -> &[DVec3; 3] {
        &self.corners
    }

    /// Lattice vertices on the unit sphere.
    #[must_use]
    pub fn lattice(&self) -> &[DVec3] {
        &self.lattice
    }

    /// All faces, indexed by flat face index.
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Face by flat index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn face(&self, index: u32) -> &Face {
        &self.faces[index as usize]
    }

    /// Number of faces (`order²`).
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// All overflow faces, indexed by [`BorderPosition::index`].
    #[must_use]
    pub fn overflow_faces(&self) -> &[OverflowFace] {
        &self.overflow
    }

    /// Overflow face at a strip position.
    #[must_use]
    pub fn overflow(&self, position: BorderPosition) -> Option<&OverflowFace> {
        self.overflow.get(position.index(self.order))
    }

    /// Whether this level has finer levels below it.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether the child level of `face` has been generated.
    #[must_use]
    pub fn is_child_generated(&self, face: u32) -> bool {
        self.children
            .get(face as usize)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// The finer level subdividing `face`, generated on first access.
    ///
    /// Returns `None` if `face` is out of range or this is the finest level.
    #[must_use]
    pub fn get_child(&self, face: u32) -> Option<Arc<Tessellation>> {
        let slot = self.children.get(face as usize)?;
        let parent = &self.faces[face as usize];
        let child = slot.get_or_init(|| {
            tracing::debug!(
                "Generating child tessellation of face {} (order {})",
                face,
                self.child_orders[0]
            );
            Arc::new(Tessellation::generate(
                parent.sphere_vertices,
                self.child_orders[0],
                &self.child_orders[1..],
                &parent.frame,
            ))
        });
        Some(Arc::clone(child))
    }

    /// The finer level subdividing `face`.
    ///
    /// # Panics
    ///
    /// Panics if `face` is out of range or this is the finest level.
    #[must_use]
    pub(crate) fn child(&self, face: u32) -> Arc<Tessellation> {
        match self.get_child(face) {
            Some(child) => child,
            None => panic!(
                "face {face} has no child level (order {}, {} child levels)",
                self.order,
                self.child_orders.len()
            ),
        }
    }

    /// Transform from the frame of `face` into the frame of child face `child`.
    ///
    /// Generates the child level if needed. Returns `None` if either index is
    /// out of range or this is the finest level.
    #[must_use]
    pub fn to_lower(&self, face: u32, child: u32) -> Option<DAffine3> {
        let level = self.get_child(face)?;
        level.faces.get(child as usize).map(|c| c.from_upper)
    }

    /// Area-weighted normal at a lattice vertex, averaged over every face
    /// around it including the overflow faces beyond the boundary.
    ///
    /// Returns `None` for an invalid lattice point.
    #[must_use]
    pub fn smoothed_normal(&self, row: u32, col: u32) -> Option<DVec3> {
        if row > self.order || col > row {
            return None;
        }
        let (i, j) = (row, col);
        let mut candidates = vec![TriCoord::up(i, j)];
        if j > 0 {
            candidates.push(TriCoord::down(i, j - 1));
        }
        if i > 0 {
            candidates.push(TriCoord::up(i - 1, j));
            if j > 0 {
                candidates.push(TriCoord::down(i - 1, j - 1));
                candidates.push(TriCoord::up(i - 1, j - 1));
            }
        }
        candidates.push(TriCoord::down(i, j));

        let mut sum = DVec3::ZERO;
        for coord in candidates.into_iter().filter(|c| c.is_valid(self.order)) {
            let [a, b, c] = self.faces[coord.index() as usize].sphere_vertices;
            sum += (b - a).cross(c - a);
        }
        for ghost in self.ghosts_at(row, col) {
            sum += ghost.weighted_normal();
        }
        Some(sum.normalize())
    }

    // Overflow faces touching lattice vertex (row, col).
    fn ghosts_at(&self, row: u32, col: u32) -> Vec<&OverflowFace> {
        let n = self.order;
        let last = BorderPosition::strip_len(n) - 1;
        let around_step = |edge: MacroEdge, step: u32| -> Vec<BorderPosition> {
            (2 * step - 2..=2 * step)
                .map(|pos| BorderPosition::new(edge, pos))
                .collect()
        };
        let positions = match (row, col) {
            (0, 0) => vec![
                BorderPosition::new(MacroEdge::Ab, 0),
                BorderPosition::new(MacroEdge::Ca, last),
            ],
            (r, 0) if r == n => vec![
                BorderPosition::new(MacroEdge::Bc, 0),
                BorderPosition::new(MacroEdge::Ab, last),
            ],
            (r, c) if r == n && c == n => vec![
                BorderPosition::new(MacroEdge::Ca, 0),
                BorderPosition::new(MacroEdge::Bc, last),
            ],
            (r, 0) => around_step(MacroEdge::Ab, r),
            (r, c) if r == n => around_step(MacroEdge::Bc, c),
            (r, c) if r == c => around_step(MacroEdge::Ca, n - r),
            _ => Vec::new(),
        };
        positions
            .into_iter()
            .filter_map(|position| self.overflow(position))
            .collect()
    }

    /// Face adjacent to a strip position on this side of the boundary.
    #[must_use]
    pub fn boundary_face(&self, position: BorderPosition) -> &Face {
        self.face(boundary_face(self.order, position))
    }
}
