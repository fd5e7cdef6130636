//! Neighbour and corner resolution inside a single subdivided triangle.
//!
//! Faces that share an edge or a vertex with another face of the same grid
//! refer to it directly by index. References that leave the grid are recorded
//! as a [`BorderPosition`] on one of the three macro edges and resolved later
//! against whatever lies on the other side.
//!
//! Each macro edge carries a strip of `2n − 1` positions. Even position `2t`
//! is the face across boundary segment `t`; odd position `2s − 1` is the face
//! touching the edge only at its interior vertex `w_s`. Segment `t` runs from
//! `w_t` to `w_{t+1}`, with `w_0` at the edge's start corner.

use crate::grid::{Orientation, TriCoord};
use crate::macro_edge::MacroEdge;

/// A position in the boundary strip of one macro edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BorderPosition {
    /// The macro edge the strip belongs to.
    pub edge: MacroEdge,
    /// Position along the strip, in `0..2n − 1`.
    pub pos: u32,
}

impl BorderPosition {
    /// Create a border position.
    #[must_use]
    pub fn new(edge: MacroEdge, pos: u32) -> Self {
        Self { edge, pos }
    }

    /// Number of positions in the strip of each edge.
    #[must_use]
    pub fn strip_len(order: u32) -> u32 {
        2 * order - 1
    }

    /// Flat index across all three strips. Ranges for different edges are disjoint.
    #[must_use]
    pub fn index(self, order: u32) -> usize {
        self.edge.index() * Self::strip_len(order) as usize + self.pos as usize
    }

    /// Inverse of [`index`](Self::index). Returns `None` past the last strip.
    #[must_use]
    pub fn from_index(order: u32, index: usize) -> Option<Self> {
        let len = Self::strip_len(order) as usize;
        if index >= 3 * len {
            return None;
        }
        Some(Self::new(
            MacroEdge::from_index(index / len),
            (index % len) as u32,
        ))
    }

    /// Whether the position is across a full boundary segment.
    #[must_use]
    pub fn is_segment(self) -> bool {
        self.pos % 2 == 0
    }
}

/// Neighbour across one edge of a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NeighbourRef {
    /// Another face of the same grid. It shares this edge under the same edge index.
    Direct(u32),
    /// A face across the grid boundary, still to be resolved.
    Border(BorderPosition),
}

/// Which vertex of the face at a strip position is the shared one.
///
/// Resolved against the macro edge the strip lands on: the face across a
/// segment starts or ends there, the odd-position face has it opposite its
/// own edge-less side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StripAnchor {
    /// Start of the segment.
    Start,
    /// End of the segment.
    End,
    /// The odd-position face between two segments.
    Between,
}

impl StripAnchor {
    /// Vertex slot of the anchored vertex on a face sitting on `edge`.
    #[must_use]
    pub fn vertex_on(self, edge: MacroEdge) -> usize {
        match self {
            StripAnchor::Start => edge.start_corner(),
            StripAnchor::End => edge.end_corner(),
            StripAnchor::Between => edge.opposite_corner(),
        }
    }
}

/// The face diametrically opposite a face at one of its vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CornerRef {
    /// Another face of the same grid, sharing the vertex under the same slot.
    Direct(u32),
    /// A face across the grid boundary.
    Border {
        /// Strip position of the opposite face.
        position: BorderPosition,
        /// Which of its vertices is the shared one.
        anchor: StripAnchor,
    },
    /// The vertex is a corner of the grid itself. Whether an opposite face
    /// exists depends on how many triangles meet there.
    Apex(usize),
}

enum LatticeVertex {
    Corner(usize),
    Edge { edge: MacroEdge, step: u32 },
    Interior,
}

fn classify_vertex(order: u32, row: u32, col: u32) -> LatticeVertex {
    match (row, col) {
        (0, 0) => LatticeVertex::Corner(0),
        (r, 0) if r == order => LatticeVertex::Corner(1),
        (r, c) if r == order && c == order => LatticeVertex::Corner(2),
        (_, 0) => LatticeVertex::Edge {
            edge: MacroEdge::Ab,
            step: row,
        },
        (r, c) if r == order => LatticeVertex::Edge {
            edge: MacroEdge::Bc,
            step: c,
        },
        (r, c) if r == c => LatticeVertex::Edge {
            edge: MacroEdge::Ca,
            step: order - r,
        },
        _ => LatticeVertex::Interior,
    }
}

/// Face of the grid adjacent to a strip position on its own side of the edge.
#[must_use]
pub fn boundary_face(order: u32, position: BorderPosition) -> u32 {
    let n = order;
    let q = position.pos;
    match position.edge {
        MacroEdge::Ab => {
            if q % 2 == 0 {
                let t = q / 2;
                t * t
            } else {
                let s = (q + 1) / 2;
                s * s + 1
            }
        }
        MacroEdge::Bc => (n - 1) * (n - 1) + q,
        MacroEdge::Ca => {
            if q % 2 == 0 {
                let r = n - 1 - q / 2;
                r * r + 2 * r
            } else {
                let m = n - (q + 1) / 2;
                m * m + 2 * m - 1
            }
        }
    }
}

/// The single face touching grid corner `corner`.
#[must_use]
pub fn corner_face(order: u32, corner: usize) -> u32 {
    match corner {
        0 => 0,
        1 => (order - 1) * (order - 1),
        _ => order * order - 1,
    }
}

/// Neighbours of a face across its three edges.
#[must_use]
pub fn face_neighbours(order: u32, coord: TriCoord) -> [NeighbourRef; 3] {
    let (i, j) = (coord.row, coord.col);
    match coord.orientation {
        Orientation::Up => [
            if j > 0 {
                NeighbourRef::Direct(TriCoord::down(i, j - 1).index())
            } else {
                NeighbourRef::Border(BorderPosition::new(MacroEdge::Ab, 2 * i))
            },
            if i + 1 < order {
                NeighbourRef::Direct(TriCoord::down(i + 1, j).index())
            } else {
                NeighbourRef::Border(BorderPosition::new(MacroEdge::Bc, 2 * j))
            },
            if j < i {
                NeighbourRef::Direct(TriCoord::down(i, j).index())
            } else {
                NeighbourRef::Border(BorderPosition::new(MacroEdge::Ca, 2 * (order - 1 - i)))
            },
        ],
        Orientation::Down => [
            NeighbourRef::Direct(TriCoord::up(i, j + 1).index()),
            NeighbourRef::Direct(TriCoord::up(i - 1, j).index()),
            NeighbourRef::Direct(TriCoord::up(i, j).index()),
        ],
    }
}

/// Faces diametrically opposite a face at each of its three vertices.
#[must_use]
pub fn face_corners(order: u32, coord: TriCoord) -> [CornerRef; 3] {
    let lattice = coord.lattice_vertices();
    std::array::from_fn(|slot| {
        let (row, col) = lattice[slot];
        match classify_vertex(order, row, col) {
            LatticeVertex::Corner(corner) => CornerRef::Apex(corner),
            LatticeVertex::Edge { edge, step } => {
                let own = own_strip_position(order, coord, edge, step);
                let pos = 4 * step - 2 - own;
                let anchor = if pos == 2 * step {
                    StripAnchor::End
                } else if pos + 2 == 2 * step {
                    StripAnchor::Start
                } else {
                    StripAnchor::Between
                };
                CornerRef::Border {
                    position: BorderPosition::new(edge, pos),
                    anchor,
                }
            }
            LatticeVertex::Interior => CornerRef::Direct(interior_opposite(coord, slot).index()),
        }
    })
}

// Strip position of `coord` among the three faces touching edge vertex w_step:
// the segment ending there, the odd-position face, or the segment starting there.
fn own_strip_position(order: u32, coord: TriCoord, edge: MacroEdge, step: u32) -> u32 {
    if coord.orientation == Orientation::Down {
        return 2 * step - 1;
    }
    let starts_here = match edge {
        MacroEdge::Ab => coord.row == step,
        MacroEdge::Bc => coord.col == step,
        MacroEdge::Ca => coord.row + 1 + step == order,
    };
    if starts_here { 2 * step } else { 2 * step - 2 }
}

fn interior_opposite(coord: TriCoord, slot: usize) -> TriCoord {
    let (i, j) = (coord.row, coord.col);
    match (coord.orientation, slot) {
        (Orientation::Up, 0) => TriCoord::down(i - 1, j - 1),
        (Orientation::Up, 1) => TriCoord::down(i + 1, j - 1),
        (Orientation::Up, _) => TriCoord::down(i + 1, j + 1),
        (Orientation::Down, 0) => TriCoord::up(i + 1, j + 1),
        (Orientation::Down, 1) => TriCoord::up(i - 1, j + 1),
        (Orientation::Down, _) => TriCoord::up(i - 1, j - 1),
    }
}
