//! Overflow ("ghost") faces just beyond each boundary of a tessellation.
//!
//! Ghost faces mirror the boundary faces across the shared edge plane and are
//! laid out on the same strip positions as border references. They are an
//! interpolation aid for code that looks one ring past the boundary without
//! resolving the real neighbour; they are never authoritative.

use glam::DVec3;

use crate::frame::Frame;
use crate::macro_edge::MacroEdge;
use crate::topology::{BorderPosition, boundary_face};

/// A ghost triangle outside the tessellation.
#[derive(Clone, Debug)]
pub struct OverflowFace {
    pub(crate) position: BorderPosition,
    pub(crate) vertices: [DVec3; 3],
    pub(crate) frame: Frame,
}

impl OverflowFace {
    /// Strip position the ghost occupies.
    #[must_use]
    pub fn position(&self) -> BorderPosition {
        self.position
    }

    /// Vertices in unit-sphere space, counter-clockwise from outside.
    #[must_use]
    pub fn vertices(&self) -> [DVec3; 3] {
        self.vertices
    }

    /// Frame of the ghost face.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Area-weighted face normal (twice the area in length).
    #[must_use]
    pub fn weighted_normal(&self) -> DVec3 {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a)
    }
}

/// Reflect `v` across the plane with unit normal `normal`.
#[must_use]
pub fn reflect(v: DVec3, normal: DVec3) -> DVec3 {
    v - normal * (2.0 * v.dot(normal))
}

/// Build the overflow faces of a tessellation, indexed by
/// [`BorderPosition::index`].
///
/// `sphere_vertices` and `edge_normals` are per face, in unit-sphere space.
pub(crate) fn generate_overflow(
    order: u32,
    sphere_vertices: &[[DVec3; 3]],
    edge_normals: &[[DVec3; 3]],
) -> Vec<OverflowFace> {
    let mut faces = Vec::with_capacity(3 * BorderPosition::strip_len(order) as usize);

    for edge in MacroEdge::ALL {
        let (start, end, far) = (edge.start_corner(), edge.end_corner(), edge.opposite_corner());

        // w[t] is the t-th vertex along the edge, g[t] the ghost apex across segment t.
        let mut w = Vec::with_capacity(order as usize + 1);
        let mut g = Vec::with_capacity(order as usize);
        for t in 0..order {
            let face = boundary_face(order, BorderPosition::new(edge, 2 * t)) as usize;
            let [p0, p1, p2] = [start, end, far].map(|slot| sphere_vertices[face][slot]);
            let normal = edge_normals[face][edge.index()];
            w.push(p0);
            if t + 1 == order {
                w.push(p1);
            }
            g.push(reflect(p2 - p0, normal) + p0);
        }

        for pos in 0..BorderPosition::strip_len(order) {
            let vertices = if pos % 2 == 0 {
                let t = (pos / 2) as usize;
                [w[t + 1], w[t], g[t]]
            } else {
                let s = pos.div_ceil(2) as usize;
                [w[s], g[s - 1], g[s]]
            };
            faces.push(OverflowFace {
                position: BorderPosition::new(edge, pos),
                vertices,
                frame: Frame::from_triangle(vertices),
            });
        }
    }

    faces
}
