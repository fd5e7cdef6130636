//! Base polyhedra whose faces seed the shapes of a planet.

use glam::DVec3;
use rustc_hash::FxHashMap;

use crate::border::BorderType;
use crate::error::PlanetError;
use crate::macro_edge::MacroEdge;

/// A closed triangle mesh on the unit sphere.
///
/// Faces wind counter-clockwise when viewed from outside.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyhedron {
    vertices: Vec<DVec3>,
    faces: Vec<[usize; 3]>,
}

/// Neighbour and border tables derived from a polyhedron's shared edges.
pub type Adjacency = (Vec<[usize; 3]>, Vec<[BorderType; 3]>);

impl Polyhedron {
    /// Build a polyhedron from raw vertices and faces. Vertices are normalized.
    #[must_use]
    pub fn new(vertices: Vec<DVec3>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices: vertices.into_iter().map(DVec3::normalize).collect(),
            faces,
        }
    }

    /// The regular icosahedron: 12 vertices, 20 faces.
    #[must_use]
    pub fn icosahedron() -> Self {
        let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
        let (a, b) = (1.0, phi);
        let vertices = vec![
            DVec3::new(-a, b, 0.0),
            DVec3::new(a, b, 0.0),
            DVec3::new(-a, -b, 0.0),
            DVec3::new(a, -b, 0.0),
            DVec3::new(0.0, -a, b),
            DVec3::new(0.0, a, b),
            DVec3::new(0.0, -a, -b),
            DVec3::new(0.0, a, -b),
            DVec3::new(b, 0.0, -a),
            DVec3::new(b, 0.0, a),
            DVec3::new(-b, 0.0, -a),
            DVec3::new(-b, 0.0, a),
        ];
        let faces = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];
        Self::new(vertices, faces)
    }

    /// Unit-length vertices.
    #[must_use]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Vertex indices of every face.
    #[must_use]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Corner vectors of every face, ready to become shape definitions.
    #[must_use]
    pub fn shape_corners(&self) -> Vec<[DVec3; 3]> {
        self.faces
            .iter()
            .map(|face| face.map(|v| self.vertices[v]))
            .collect()
    }

    /// Arc angle (radians) of the first edge of the first face.
    ///
    /// Every edge of a regular polyhedron has the same length.
    #[must_use]
    pub fn edge_angle(&self) -> f64 {
        match self.faces.first() {
            Some(&[a, b, _]) => self.vertices[a].angle_between(self.vertices[b]),
            None => 0.0,
        }
    }

    /// Derive the neighbour and [`BorderType`] tables from shared edges.
    ///
    /// Edge `k` of face `f` runs from `faces[f][k]` to `faces[f][(k + 1) % 3]`;
    /// its neighbour is the face holding the reversed edge.
    ///
    /// # Errors
    ///
    /// Returns [`PlanetError::NonManifoldEdge`] if a directed edge appears
    /// twice or has no reversed twin.
    pub fn adjacency(&self) -> Result<Adjacency, PlanetError> {
        let mut directed: FxHashMap<(usize, usize), (usize, MacroEdge)> = FxHashMap::default();
        for (f, face) in self.faces.iter().enumerate() {
            for edge in MacroEdge::ALL {
                let from = face[edge.start_corner()];
                let to = face[edge.end_corner()];
                if directed.insert((from, to), (f, edge)).is_some() {
                    return Err(PlanetError::NonManifoldEdge { from, to });
                }
            }
        }

        let mut neighbours = Vec::with_capacity(self.faces.len());
        let mut borders = Vec::with_capacity(self.faces.len());
        for face in &self.faces {
            let mut row = [0; 3];
            let mut types = [BorderType::Ba; 3];
            for edge in MacroEdge::ALL {
                let from = face[edge.start_corner()];
                let to = face[edge.end_corner()];
                let &(other, other_edge) = directed
                    .get(&(to, from))
                    .ok_or(PlanetError::NonManifoldEdge { from, to })?;
                row[edge.index()] = other;
                types[edge.index()] = BorderType::across(other_edge);
            }
            neighbours.push(row);
            borders.push(types);
        }
        Ok((neighbours, borders))
    }
}
