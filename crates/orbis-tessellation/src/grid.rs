//! Triangular grid coordinates and the vertex lattice of a subdivided triangle.
//!
//! A triangle `ABC` subdivided with order `n` has `n + 1` lattice rows. Row `i`
//! holds `i + 1` vertices, so lattice point `(i, j)` satisfies `0 <= j <= i <= n`.
//! Faces come in two orientations: an up face `U(i, j)` spans rows `i` and
//! `i + 1` with its apex on row `i`, a down face `D(i, j)` fills the gap
//! between `U(i, j)` and `U(i, j + 1)`.

use glam::DVec3;

/// Orientation of a face within its lattice row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Apex on the upper row, base on the row below.
    Up,
    /// Base on the upper row, apex on the row below.
    Down,
}

/// Position of a face in the triangular grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TriCoord {
    /// Lattice row of the face's upper edge or apex.
    pub row: u32,
    /// Column within the row.
    pub col: u32,
    /// Up or down face.
    pub orientation: Orientation,
}

impl TriCoord {
    /// Up face `U(row, col)`.
    #[must_use]
    pub fn up(row: u32, col: u32) -> Self {
        Self {
            row,
            col,
            orientation: Orientation::Up,
        }
    }

    /// Down face `D(row, col)`.
    #[must_use]
    pub fn down(row: u32, col: u32) -> Self {
        Self {
            row,
            col,
            orientation: Orientation::Down,
        }
    }

    /// Flat face index: `row² + 2·col`, plus one for down faces.
    #[must_use]
    pub fn index(self) -> u32 {
        let base = self.row * self.row + 2 * self.col;
        match self.orientation {
            Orientation::Up => base,
            Orientation::Down => base + 1,
        }
    }

    /// Inverse of [`index`](Self::index).
    #[must_use]
    pub fn from_index(index: u32) -> Self {
        let row = index.isqrt();
        let rem = index - row * row;
        if rem % 2 == 0 {
            Self::up(row, rem / 2)
        } else {
            Self::down(row, rem / 2)
        }
    }

    /// Whether the face exists in a grid of the given order.
    #[must_use]
    pub fn is_valid(self, order: u32) -> bool {
        match self.orientation {
            Orientation::Up => self.row < order && self.col <= self.row,
            Orientation::Down => self.row < order && self.col < self.row,
        }
    }

    /// Lattice points of the three vertices in counter-clockwise order.
    ///
    /// Up faces list `[v(i,j), v(i+1,j), v(i+1,j+1)]`, down faces
    /// `[v(i+1,j+1), v(i,j+1), v(i,j)]`.
    #[must_use]
    pub fn lattice_vertices(self) -> [(u32, u32); 3] {
        let (i, j) = (self.row, self.col);
        match self.orientation {
            Orientation::Up => [(i, j), (i + 1, j), (i + 1, j + 1)],
            Orientation::Down => [(i + 1, j + 1), (i, j + 1), (i, j)],
        }
    }
}

/// Number of faces in a grid of the given order.
#[must_use]
pub fn face_count(order: u32) -> usize {
    let n = order as usize;
    n * n
}

/// Number of lattice vertices in a grid of the given order.
#[must_use]
pub fn vertex_count(order: u32) -> usize {
    let n = order as usize;
    (n + 1) * (n + 2) / 2
}

/// Flat index of lattice point `(row, col)`.
#[must_use]
pub fn vertex_index(row: u32, col: u32) -> usize {
    let (row, col) = (row as usize, col as usize);
    row * (row + 1) / 2 + col
}

/// Project lattice point `(row, col)` of the subdivided triangle onto the unit sphere.
///
/// `v(i, j) = normalize(A + i·(B−A)/n + j·(C−B)/n)`, so `v(0,0) = A`,
/// `v(n,0) = B` and `v(n,n) = C`.
#[must_use]
pub fn lattice_point(corners: &[DVec3; 3], order: u32, row: u32, col: u32) -> DVec3 {
    let [a, b, c] = *corners;
    let n = f64::from(order);
    let p = a + (b - a) * (f64::from(row) / n) + (c - b) * (f64::from(col) / n);
    p.normalize()
}

/// All lattice points of the subdivided triangle, indexed by [`vertex_index`].
#[must_use]
pub fn generate_lattice(corners: &[DVec3; 3], order: u32) -> Vec<DVec3> {
    let mut points = Vec::with_capacity(vertex_count(order));
    for row in 0..=order {
        for col in 0..=row {
            points.push(lattice_point(corners, order, row, col));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octant() -> [DVec3; 3] {
        [DVec3::X, DVec3::Y, DVec3::Z]
    }

    #[test]
    fn test_index_roundtrip_covers_every_face() {
        for order in 1..=6 {
            for index in 0..face_count(order) as u32 {
                let coord = TriCoord::from_index(index);
                assert!(coord.is_valid(order), "{coord:?} invalid for order {order}");
                assert_eq!(coord.index(), index);
            }
        }
    }

    #[test]
    fn test_rows_hold_odd_face_counts() {
        let order = 5;
        for row in 0..order {
            let first = TriCoord::up(row, 0).index();
            let last = TriCoord::up(row, row).index();
            assert_eq!(first, row * row);
            assert_eq!(last - first + 1, 2 * row + 1, "Row {row} face count");
        }
    }

    #[test]
    fn test_counts() {
        assert_eq!(face_count(1), 1);
        assert_eq!(face_count(4), 16);
        assert_eq!(vertex_count(1), 3);
        assert_eq!(vertex_count(4), 15);
        assert_eq!(vertex_index(4, 4), vertex_count(4) - 1);
    }

    #[test]
    fn test_lattice_corners_match_triangle_corners() {
        let corners = octant();
        for order in [1, 3, 8] {
            let lattice = generate_lattice(&corners, order);
            assert_eq!(lattice.len(), vertex_count(order));
            assert!(lattice[vertex_index(0, 0)].abs_diff_eq(corners[0], 1e-12));
            assert!(lattice[vertex_index(order, 0)].abs_diff_eq(corners[1], 1e-12));
            assert!(lattice[vertex_index(order, order)].abs_diff_eq(corners[2], 1e-12));
        }
    }

    #[test]
    fn test_lattice_corners_match_skewed_triangle() {
        let corners = [
            DVec3::new(0.31, -0.74, 0.6).normalize(),
            DVec3::new(0.93, -0.05, 0.36).normalize(),
            DVec3::new(0.12, 0.27, 0.95).normalize(),
        ];
        for order in [1, 2, 5] {
            let lattice = generate_lattice(&corners, order);
            assert!(lattice[vertex_index(0, 0)].abs_diff_eq(corners[0], 1e-12));
            assert!(lattice[vertex_index(order, 0)].abs_diff_eq(corners[1], 1e-12));
            assert!(lattice[vertex_index(order, order)].abs_diff_eq(corners[2], 1e-12));
        }
    }

    #[test]
    fn test_lattice_points_are_unit_length() {
        for point in generate_lattice(&octant(), 7) {
            assert!(
                (point.length() - 1.0).abs() < 1e-12,
                "Lattice point {point:?} is off the unit sphere"
            );
        }
    }

    #[test]
    fn test_face_zero_touches_first_corner() {
        let coord = TriCoord::from_index(0);
        assert_eq!(coord, TriCoord::up(0, 0));
        assert!(coord.lattice_vertices().contains(&(0, 0)));
    }

    #[test]
    fn test_down_face_fills_gap_between_up_faces() {
        let down = TriCoord::down(2, 0).lattice_vertices();
        let left = TriCoord::up(2, 0).lattice_vertices();
        let right = TriCoord::up(2, 1).lattice_vertices();
        let shared_left = down.iter().filter(|v| left.contains(v)).count();
        let shared_right = down.iter().filter(|v| right.contains(v)).count();
        assert_eq!(shared_left, 2);
        assert_eq!(shared_right, 2);
    }
}
