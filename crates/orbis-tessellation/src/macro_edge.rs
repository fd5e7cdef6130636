//! The three edges of a shape triangle and the corners they connect.

/// One of the three edges of a shape triangle `ABC`, named by its endpoints in
/// counter-clockwise order.
///
/// Edge `k` runs from corner `k` to corner `(k + 1) % 3`. The same convention
/// applies to the edges of every generated face, so a face's edge `e` and a
/// macro edge with the same index point the same way around the triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum MacroEdge {
    /// A → B
    Ab = 0,
    /// B → C
    Bc = 1,
    /// C → A
    Ca = 2,
}

impl MacroEdge {
    /// All three edges in canonical order.
    pub const ALL: [MacroEdge; 3] = [MacroEdge::Ab, MacroEdge::Bc, MacroEdge::Ca];

    /// Index of the edge (0, 1 or 2).
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The edge with the given index, taken modulo 3.
    #[must_use]
    pub fn from_index(index: usize) -> MacroEdge {
        match index % 3 {
            0 => MacroEdge::Ab,
            1 => MacroEdge::Bc,
            _ => MacroEdge::Ca,
        }
    }

    /// Corner the edge starts at.
    #[must_use]
    pub fn start_corner(self) -> usize {
        self.index()
    }

    /// Corner the edge ends at.
    #[must_use]
    pub fn end_corner(self) -> usize {
        (self.index() + 1) % 3
    }

    /// Corner that does not lie on the edge.
    #[must_use]
    pub fn opposite_corner(self) -> usize {
        (self.index() + 2) % 3
    }

    /// The edge that ends where this one starts.
    #[must_use]
    pub fn previous(self) -> MacroEdge {
        MacroEdge::from_index(self.index() + 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for edge in MacroEdge::ALL {
            assert_eq!(MacroEdge::from_index(edge.index()), edge);
        }
        assert_eq!(MacroEdge::from_index(4), MacroEdge::Bc);
    }

    #[test]
    fn test_corners_are_distinct() {
        for edge in MacroEdge::ALL {
            let corners = [edge.start_corner(), edge.end_corner(), edge.opposite_corner()];
            let mut sorted = corners;
            sorted.sort_unstable();
            assert_eq!(sorted, [0, 1, 2], "Edge {edge:?} corners {corners:?}");
        }
    }

    #[test]
    fn test_edges_chain_around_triangle() {
        for edge in MacroEdge::ALL {
            let next = MacroEdge::from_index(edge.index() + 1);
            assert_eq!(
                edge.end_corner(),
                next.start_corner(),
                "Edge {edge:?} should end where {next:?} starts"
            );
            assert_eq!(next.previous(), edge);
        }
    }
}
