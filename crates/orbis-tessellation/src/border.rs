//! Remapping of boundary positions between two adjoining shapes.
//!
//! Two shapes sharing an edge number the positions of their boundary strips
//! from opposite ends, and the shared edge may be a different macro edge on
//! each side. A [`BorderType`] names the neighbour's macro edge, which fixes
//! both the per-edge offset and the reversal.

use crate::macro_edge::MacroEdge;
use crate::topology::BorderPosition;

/// Relative orientation of a shared shape edge.
///
/// Each variant names the neighbour's macro edge as traversed from this side,
/// which always runs against the neighbour's own counter-clockwise order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BorderType {
    /// The neighbour's `AB` edge, walked from B to A.
    Ba,
    /// The neighbour's `BC` edge, walked from C to B.
    Cb,
    /// The neighbour's `CA` edge, walked from A to C.
    Ac,
}

impl BorderType {
    /// All three border types.
    pub const ALL: [BorderType; 3] = [BorderType::Ba, BorderType::Cb, BorderType::Ac];

    /// The border type facing the neighbour's `edge`.
    ///
    /// Seen from the neighbour, the border type back toward this shape is
    /// `BorderType::across(local_edge)`.
    #[must_use]
    pub fn across(neighbour_edge: MacroEdge) -> BorderType {
        match neighbour_edge {
            MacroEdge::Ab => BorderType::Ba,
            MacroEdge::Bc => BorderType::Cb,
            MacroEdge::Ca => BorderType::Ac,
        }
    }

    /// The neighbour's macro edge.
    #[must_use]
    pub fn neighbour_edge(self) -> MacroEdge {
        match self {
            BorderType::Ba => MacroEdge::Ab,
            BorderType::Cb => MacroEdge::Bc,
            BorderType::Ac => MacroEdge::Ca,
        }
    }

    /// Map a position on the local strip to the same physical slot on the
    /// neighbour's strip.
    ///
    /// `local_pos` must be in `0..2·order − 1`.
    #[must_use]
    pub fn map(self, order: u32, local_pos: u32) -> BorderPosition {
        debug_assert!(local_pos < BorderPosition::strip_len(order));
        BorderPosition::new(self.neighbour_edge(), 2 * order - 2 - local_pos)
    }

    /// [`map`](Self::map) followed by the neighbour's flat edge index.
    #[must_use]
    pub fn neighbour_index(self, order: u32, local_pos: u32) -> usize {
        self.map(order, local_pos).index(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_across_and_neighbour_edge_are_inverse() {
        for edge in MacroEdge::ALL {
            assert_eq!(BorderType::across(edge).neighbour_edge(), edge);
        }
        for border in BorderType::ALL {
            assert_eq!(BorderType::across(border.neighbour_edge()), border);
        }
    }

    #[test]
    fn test_map_reverses_strip() {
        let order = 4;
        assert_eq!(BorderType::Ba.map(order, 0), BorderPosition::new(MacroEdge::Ab, 6));
        assert_eq!(BorderType::Cb.map(order, 6), BorderPosition::new(MacroEdge::Bc, 0));
        assert_eq!(BorderType::Ac.map(order, 3), BorderPosition::new(MacroEdge::Ca, 3));
    }

    #[test]
    fn test_map_preserves_parity() {
        for order in 1..=6 {
            for border in BorderType::ALL {
                for pos in 0..BorderPosition::strip_len(order) {
                    let mapped = border.map(order, pos);
                    assert_eq!(
                        mapped.is_segment(),
                        pos % 2 == 0,
                        "Segments must land on segments ({border:?}, order {order}, pos {pos})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_roundtrip_through_both_sides_is_identity() {
        for order in 1..=8 {
            for local_edge in MacroEdge::ALL {
                for border in BorderType::ALL {
                    let back_type = BorderType::across(local_edge);
                    for pos in 0..BorderPosition::strip_len(order) {
                        let there = border.map(order, pos);
                        let back = back_type.map(order, there.pos);
                        assert_eq!(
                            back,
                            BorderPosition::new(local_edge, pos),
                            "Roundtrip failed for {local_edge:?}/{border:?} order {order} pos {pos}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_neighbour_index_lands_in_neighbour_edge_range() {
        let order = 3;
        let len = BorderPosition::strip_len(order) as usize;
        for border in BorderType::ALL {
            let start = border.neighbour_edge().index() * len;
            for pos in 0..len as u32 {
                let index = border.neighbour_index(order, pos);
                assert!((start..start + len).contains(&index));
            }
        }
    }
}
