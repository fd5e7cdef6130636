//! A planet: shapes stitched into a closed region graph.
//!
//! The global level is built eagerly. Continental and local regions are
//! materialized per parent on first request and then shared by every caller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{DMat3, DVec3};

use crate::border::BorderType;
use crate::error::PlanetError;
use crate::lazy::LazySlot;
use crate::linking::{PatchBoundary, PatchSource, link_patch};
use crate::macro_edge::MacroEdge;
use crate::polyhedron::Polyhedron;
use crate::region::{
    ContinentalId, ContinentalRegion, CornerLink, GlobalId, GlobalRegion, LocalId, LocalRegion,
    NeighbourLink, RegionHandle, VertexLink,
};
use crate::registry::ShapeRegistry;
use crate::shape::Shape;
use crate::shape_def::{CellTargets, LodLevel, ShapeDefinition, SubdivisionOrders};
use crate::tessellation::Tessellation;

/// Tolerance for shared shape corners to count as the same point.
const EDGE_MATCH_TOLERANCE: f64 = 1e-9;

/// Longest ring of shapes accepted around one vertex.
const MAX_VERTEX_VALENCE: usize = 64;

/// The shapes across the edges of one shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeAdjacency {
    /// Neighbouring shape across each macro edge.
    pub neighbours: [usize; 3],
    /// How each shared edge appears from the neighbour's side.
    pub borders: [BorderType; 3],
}

/// Number of materialization passes run so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaterializationStats {
    /// Continental sibling arrays generated.
    pub continental: u64,
    /// Local sibling arrays generated.
    pub local: u64,
}

/// A closed set of shapes on a sphere of a given radius and its region graph.
#[derive(Debug)]
pub struct Planet {
    radius: f64,
    orders: SubdivisionOrders,
    shapes: Vec<Arc<Shape>>,
    placements: Vec<DMat3>,
    adjacency: Vec<ShapeAdjacency>,
    offsets: Vec<u32>,
    regions: Vec<GlobalRegion>,
    continental_passes: AtomicU64,
    local_passes: AtomicU64,
}

impl Planet {
    /// Build a planet from shape corners and their adjacency tables, using
    /// the process-wide [`ShapeRegistry`].
    ///
    /// `neighbours[s][m]` is the shape across macro edge `m` of shape `s`, and
    /// `borders[s][m]` names the macro edge of that neighbour it shares.
    ///
    /// Congruent shapes with the same orders share one generated [`Shape`].
    /// The shared registry keeps every shape it has generated, together with
    /// each continental and local tessellation reached through it, for the
    /// rest of the process, including after this planet is dropped. Use
    /// [`create_in`](Self::create_in) with a registry of limited lifetime to
    /// release them.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanetError`] if the tables are inconsistent, a shape is
    /// invalid, or the shapes do not close up around every vertex.
    pub fn create(
        corners: &[[DVec3; 3]],
        neighbours: &[[usize; 3]],
        borders: &[[BorderType; 3]],
        radius: f64,
        orders: SubdivisionOrders,
    ) -> Result<Self, PlanetError> {
        Self::create_in(ShapeRegistry::shared(), corners, neighbours, borders, radius, orders)
    }

    /// [`create`](Self::create) with an explicit registry.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_in(
        registry: &ShapeRegistry,
        corners: &[[DVec3; 3]],
        neighbours: &[[usize; 3]],
        borders: &[[BorderType; 3]],
        radius: f64,
        orders: SubdivisionOrders,
    ) -> Result<Self, PlanetError> {
        if corners.is_empty() {
            return Err(PlanetError::EmptyTopology);
        }
        if neighbours.len() != corners.len() || borders.len() != corners.len() {
            return Err(PlanetError::MismatchedLengths {
                shapes: corners.len(),
                neighbours: neighbours.len(),
                borders: borders.len(),
            });
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PlanetError::InvalidRadius(radius));
        }

        let definitions = corners
            .iter()
            .enumerate()
            .map(|(index, &c)| {
                ShapeDefinition::new(c, orders)
                    .map_err(|source| PlanetError::InvalidShape { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let adjacency: Vec<ShapeAdjacency> = neighbours
            .iter()
            .zip(borders)
            .map(|(&neighbours, &borders)| ShapeAdjacency {
                neighbours,
                borders,
            })
            .collect();
        validate_edges(&definitions, &adjacency)?;
        let rings = vertex_boundaries(&adjacency)?;

        let (shapes, placements): (Vec<Arc<Shape>>, Vec<DMat3>) = definitions
            .iter()
            .map(|def| {
                let (canonical, placement) = def.canonical();
                (registry.get_or_generate(&canonical), placement)
            })
            .unzip();

        let mut offsets = Vec::with_capacity(shapes.len());
        let mut total = 0u32;
        for shape in &shapes {
            offsets.push(total);
            total += shape.global().face_count() as u32;
        }

        let source = GlobalSource {
            shapes: &shapes,
            placements: &placements,
            offsets: &offsets,
        };
        let mut regions = Vec::with_capacity(total as usize);
        for (s, vertices) in rings.into_iter().enumerate() {
            let boundary = PatchBoundary {
                edges: std::array::from_fn(|m| NeighbourLink {
                    region: adjacency[s].neighbours[m],
                    edge: adjacency[s].borders[m].neighbour_edge().index(),
                }),
                vertices,
            };
            let tessellation = Arc::clone(shapes[s].global());
            for (face, links) in link_patch(&source, s, &boundary).into_iter().enumerate() {
                regions.push(GlobalRegion {
                    id: GlobalId(offsets[s] + face as u32),
                    shape: s,
                    tessellation: Arc::clone(&tessellation),
                    face: face as u32,
                    radius,
                    placement: placements[s],
                    links,
                    children: LazySlot::new(),
                });
            }
        }

        tracing::info!(
            "Created planet: radius {} m, {} shapes, {} global regions, orders {:?}",
            radius,
            shapes.len(),
            regions.len(),
            orders.as_array()
        );

        Ok(Self {
            radius,
            orders,
            shapes,
            placements,
            adjacency,
            offsets,
            regions,
            continental_passes: AtomicU64::new(0),
            local_passes: AtomicU64::new(0),
        })
    }

    /// Build a planet whose shapes are the faces of `polyhedron`.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanetError`] if the polyhedron is not a closed manifold
    /// or the planet cannot be assembled.
    pub fn from_polyhedron(
        polyhedron: &Polyhedron,
        radius: f64,
        orders: SubdivisionOrders,
    ) -> Result<Self, PlanetError> {
        let (neighbours, borders) = polyhedron.adjacency()?;
        Self::create(&polyhedron.shape_corners(), &neighbours, &borders, radius, orders)
    }

    /// An icosahedral planet with orders derived from the default cell sizes.
    ///
    /// # Errors
    ///
    /// Returns [`PlanetError::InvalidRadius`] for a non-positive or
    /// non-finite radius.
    pub fn create_spherical(radius: f64) -> Result<Self, PlanetError> {
        Self::create_spherical_with(radius, &CellTargets::default())
    }

    /// An icosahedral planet with orders derived from `targets`.
    ///
    /// # Errors
    ///
    /// See [`create_spherical`](Self::create_spherical).
    pub fn create_spherical_with(radius: f64, targets: &CellTargets) -> Result<Self, PlanetError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PlanetError::InvalidRadius(radius));
        }
        let icosahedron = Polyhedron::icosahedron();
        let orders = SubdivisionOrders::for_edge_length(radius * icosahedron.edge_angle(), targets);
        tracing::debug!("Derived orders {:?} for radius {} m", orders.as_array(), radius);
        Self::from_polyhedron(&icosahedron, radius, orders)
    }

    /// An icosahedral planet with explicit orders.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_spherical_with_orders(
        radius: f64,
        orders: SubdivisionOrders,
    ) -> Result<Self, PlanetError> {
        Self::from_polyhedron(&Polyhedron::icosahedron(), radius, orders)
    }

    /// Planet radius in metres.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Subdivision orders shared by every shape.
    #[must_use]
    pub fn orders(&self) -> SubdivisionOrders {
        self.orders
    }

    /// Number of shapes.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Shape `index`, in its canonical orientation.
    #[must_use]
    pub fn shape(&self, index: usize) -> Option<&Arc<Shape>> {
        self.shapes.get(index)
    }

    /// Rotation placing shape `index` from its canonical orientation onto
    /// the planet.
    #[must_use]
    pub fn placement(&self, index: usize) -> Option<DMat3> {
        self.placements.get(index).copied()
    }

    /// Adjacency of shape `index`.
    #[must_use]
    pub fn adjacency(&self, index: usize) -> Option<&ShapeAdjacency> {
        self.adjacency.get(index)
    }

    /// Total number of regions at `level` once fully materialized.
    #[must_use]
    pub fn region_count(&self, level: LodLevel) -> u64 {
        self.shapes.iter().map(|shape| shape.region_count(level)).sum()
    }

    /// Every global region, ordered by id.
    #[must_use]
    pub fn global_regions(&self) -> &[GlobalRegion] {
        &self.regions
    }

    /// Global region by id.
    #[must_use]
    pub fn global(&self, id: GlobalId) -> Option<&GlobalRegion> {
        self.regions.get(id.0 as usize)
    }

    /// Id of face `face` of shape `shape`.
    #[must_use]
    pub fn global_id(&self, shape: usize, face: u32) -> Option<GlobalId> {
        let shape_ref = self.shapes.get(shape)?;
        let count = shape_ref.global().face_count() as u32;
        (face < count).then(|| GlobalId(self.offsets[shape] + face))
    }

    /// Continental regions under `id`, materialized on first request.
    #[must_use]
    pub fn continental_regions(&self, id: GlobalId) -> Option<Arc<[ContinentalRegion]>> {
        let region = self.global(id)?;
        Some(region.children.get_or_init(|| self.generate_continental(region)))
    }

    /// Continental child `index` of `id`.
    #[must_use]
    pub fn continental_region(
        &self,
        id: GlobalId,
        index: u32,
    ) -> Option<RegionHandle<ContinentalRegion>> {
        RegionHandle::new(self.continental_regions(id)?, index as usize)
    }

    /// Continental region by id.
    #[must_use]
    pub fn continental(&self, id: ContinentalId) -> Option<RegionHandle<ContinentalRegion>> {
        self.continental_region(id.global, id.index)
    }

    /// Local regions under `id`, materialized on first request.
    #[must_use]
    pub fn local_regions(&self, id: ContinentalId) -> Option<Arc<[LocalRegion]>> {
        let parent = self.continental(id)?;
        Some(parent.children.get_or_init(|| self.generate_local(&parent)))
    }

    /// Local child `index` of `id`.
    #[must_use]
    pub fn local_region(&self, id: ContinentalId, index: u32) -> Option<RegionHandle<LocalRegion>> {
        RegionHandle::new(self.local_regions(id)?, index as usize)
    }

    /// Local region by id.
    #[must_use]
    pub fn local(&self, id: LocalId) -> Option<RegionHandle<LocalRegion>> {
        self.local_region(id.continental, id.index)
    }

    /// The global region containing a continental region.
    #[must_use]
    pub fn parent_region(&self, id: ContinentalId) -> Option<&GlobalRegion> {
        self.global(id.global)
    }

    /// The continental region containing a local region.
    #[must_use]
    pub fn continental_parent(&self, id: LocalId) -> Option<RegionHandle<ContinentalRegion>> {
        self.continental(id.continental)
    }

    /// Materialization passes run so far.
    #[must_use]
    pub fn materialization_stats(&self) -> MaterializationStats {
        MaterializationStats {
            continental: self.continental_passes.load(Ordering::Relaxed),
            local: self.local_passes.load(Ordering::Relaxed),
        }
    }

    fn generate_continental(&self, parent: &GlobalRegion) -> Arc<[ContinentalRegion]> {
        self.continental_passes.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Materializing continental regions of {:?}", parent.id);

        let tessellation = parent.child_tessellation();
        let boundary = PatchBoundary::from_links(&parent.links);
        let source = ContinentalSource { planet: self };
        link_patch(&source, parent.id, &boundary)
            .into_iter()
            .enumerate()
            .map(|(index, links)| ContinentalRegion {
                id: ContinentalId {
                    global: parent.id,
                    index: index as u32,
                },
                tessellation: Arc::clone(&tessellation),
                radius: self.radius,
                placement: parent.placement,
                links,
                children: LazySlot::new(),
            })
            .collect()
    }

    fn generate_local(&self, parent: &ContinentalRegion) -> Arc<[LocalRegion]> {
        self.local_passes.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Materializing local regions of {:?}", parent.id);

        let tessellation = parent.child_tessellation();
        let boundary = PatchBoundary::from_links(&parent.links);
        let source = LocalSource { planet: self };
        link_patch(&source, parent.id, &boundary)
            .into_iter()
            .enumerate()
            .map(|(index, links)| LocalRegion {
                id: LocalId {
                    continental: parent.id,
                    index: index as u32,
                },
                tessellation: Arc::clone(&tessellation),
                radius: self.radius,
                placement: parent.placement,
                links,
            })
            .collect()
    }

    fn global_tessellation(&self, id: GlobalId) -> Arc<Tessellation> {
        self.regions[id.0 as usize].child_tessellation()
    }

    fn global_placement(&self, id: GlobalId) -> DMat3 {
        self.regions[id.0 as usize].placement
    }
}

struct GlobalSource<'a> {
    shapes: &'a [Arc<Shape>],
    placements: &'a [DMat3],
    offsets: &'a [u32],
}

impl PatchSource for GlobalSource<'_> {
    type Patch = usize;
    type Id = GlobalId;

    fn tessellation(&self, patch: usize) -> Arc<Tessellation> {
        Arc::clone(self.shapes[patch].global())
    }

    fn region_id(&self, patch: usize, face: u32) -> GlobalId {
        GlobalId(self.offsets[patch] + face)
    }

    fn placement(&self, patch: usize) -> DMat3 {
        self.placements[patch]
    }
}

struct ContinentalSource<'a> {
    planet: &'a Planet,
}

impl PatchSource for ContinentalSource<'_> {
    type Patch = GlobalId;
    type Id = ContinentalId;

    fn tessellation(&self, patch: GlobalId) -> Arc<Tessellation> {
        self.planet.global_tessellation(patch)
    }

    fn region_id(&self, patch: GlobalId, face: u32) -> ContinentalId {
        ContinentalId {
            global: patch,
            index: face,
        }
    }

    fn placement(&self, patch: GlobalId) -> DMat3 {
        self.planet.global_placement(patch)
    }
}

struct LocalSource<'a> {
    planet: &'a Planet,
}

impl PatchSource for LocalSource<'_> {
    type Patch = ContinentalId;
    type Id = LocalId;

    fn tessellation(&self, patch: ContinentalId) -> Arc<Tessellation> {
        self.planet
            .global_tessellation(patch.global)
            .child(patch.index)
    }

    fn region_id(&self, patch: ContinentalId, face: u32) -> LocalId {
        LocalId {
            continental: patch,
            index: face,
        }
    }

    fn placement(&self, patch: ContinentalId) -> DMat3 {
        self.planet.global_placement(patch.global)
    }
}

// Range, reciprocity and geometric agreement of every shared shape edge.
fn validate_edges(
    definitions: &[ShapeDefinition],
    adjacency: &[ShapeAdjacency],
) -> Result<(), PlanetError> {
    let count = definitions.len();
    for (s, entry) in adjacency.iter().enumerate() {
        for edge in MacroEdge::ALL {
            let t = entry.neighbours[edge.index()];
            if t >= count {
                return Err(PlanetError::NeighbourOutOfRange {
                    shape: s,
                    edge,
                    neighbour: t,
                    count,
                });
            }
        }
    }

    for (s, entry) in adjacency.iter().enumerate() {
        for edge in MacroEdge::ALL {
            let t = entry.neighbours[edge.index()];
            let back = entry.borders[edge.index()].neighbour_edge();
            let other = &adjacency[t];
            if other.neighbours[back.index()] != s
                || other.borders[back.index()] != BorderType::across(edge)
            {
                return Err(PlanetError::AsymmetricBorder {
                    shape: s,
                    edge,
                    neighbour: t,
                });
            }

            let ours = definitions[s].corners();
            let theirs = definitions[t].corners();
            let start_matches = ours[edge.start_corner()]
                .abs_diff_eq(theirs[back.end_corner()], EDGE_MATCH_TOLERANCE);
            let end_matches = ours[edge.end_corner()]
                .abs_diff_eq(theirs[back.start_corner()], EDGE_MATCH_TOLERANCE);
            if !start_matches || !end_matches {
                return Err(PlanetError::BorderGeometryMismatch {
                    shape: s,
                    edge,
                    neighbour: t,
                });
            }
        }
    }
    Ok(())
}

// What lies opposite each corner of each shape, from the ring of shapes
// around that corner.
fn vertex_boundaries(
    adjacency: &[ShapeAdjacency],
) -> Result<Vec<[CornerLink<usize>; 3]>, PlanetError> {
    let mut boundaries = Vec::with_capacity(adjacency.len());
    for shape in 0..adjacency.len() {
        let mut corners: [CornerLink<usize>; 3] =
            std::array::from_fn(|_| CornerLink::Absent { fan: Vec::new() });
        for (corner, slot) in corners.iter_mut().enumerate() {
            let ring = vertex_ring(adjacency, shape, corner)?;
            let valence = ring.len();
            *slot = if valence % 2 == 0 {
                CornerLink::Opposite(ring[valence / 2])
            } else {
                CornerLink::Absent {
                    fan: ring[2..valence - 1].to_vec(),
                }
            };
        }
        boundaries.push(corners);
    }
    Ok(boundaries)
}

// Shapes around corner `corner` of `shape`, starting with it and crossing the
// edge that starts at the corner first.
fn vertex_ring(
    adjacency: &[ShapeAdjacency],
    shape: usize,
    corner: usize,
) -> Result<Vec<VertexLink<usize>>, PlanetError> {
    let start = VertexLink {
        region: shape,
        vertex: corner,
    };
    let mut ring = vec![start];
    let mut current = start;
    loop {
        let entry = &adjacency[current.region];
        let next = VertexLink {
            region: entry.neighbours[current.vertex],
            vertex: entry.borders[current.vertex].neighbour_edge().end_corner(),
        };
        if next == start {
            break;
        }
        if ring.len() == MAX_VERTEX_VALENCE {
            return Err(PlanetError::BrokenVertexRing { shape, corner });
        }
        ring.push(next);
        current = next;
    }
    if ring.len() < 3 {
        return Err(PlanetError::BrokenVertexRing { shape, corner });
    }
    Ok(ring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    fn octahedron() -> Polyhedron {
        let vertices = vec![
            DVec3::X,
            DVec3::Y,
            DVec3::Z,
            DVec3::NEG_X,
            DVec3::NEG_Y,
            DVec3::NEG_Z,
        ];
        let faces = vec![
            [0, 1, 2],
            [1, 3, 2],
            [3, 4, 2],
            [4, 0, 2],
            [1, 0, 5],
            [3, 1, 5],
            [4, 3, 5],
            [0, 4, 5],
        ];
        Polyhedron::new(vertices, faces)
    }

    fn orders(global: u32) -> SubdivisionOrders {
        SubdivisionOrders::new(global, 2, 2).unwrap()
    }

    #[test]
    fn test_icosahedron_rings_have_valence_five() {
        let ico = Polyhedron::icosahedron();
        let (neighbours, borders) = ico.adjacency().unwrap();
        let adjacency: Vec<ShapeAdjacency> = neighbours
            .into_iter()
            .zip(borders)
            .map(|(neighbours, borders)| ShapeAdjacency {
                neighbours,
                borders,
            })
            .collect();
        for s in 0..20 {
            for corner in 0..3 {
                let ring = vertex_ring(&adjacency, s, corner).unwrap();
                assert_eq!(ring.len(), 5, "Shape {s} corner {corner}");
                let vertex = ico.faces()[s][corner];
                for link in &ring {
                    assert_eq!(ico.faces()[link.region][link.vertex], vertex);
                }
            }
        }
    }

    #[test]
    fn test_self_glued_shape_has_broken_ring() {
        let adjacency = [ShapeAdjacency {
            neighbours: [0, 0, 0],
            borders: [BorderType::Ac, BorderType::Cb, BorderType::Ba],
        }];
        assert_eq!(
            vertex_ring(&adjacency, 0, 0),
            Err(PlanetError::BrokenVertexRing {
                shape: 0,
                corner: 0
            })
        );
        assert!(vertex_boundaries(&adjacency).is_err());
    }

    #[test]
    fn test_octahedron_corners_are_opposite() {
        let registry = ShapeRegistry::new();
        let octa = octahedron();
        let (neighbours, borders) = octa.adjacency().unwrap();
        let planet = Planet::create_in(
            &registry,
            &octa.shape_corners(),
            &neighbours,
            &borders,
            10.0,
            orders(1),
        )
        .unwrap();
        assert_eq!(planet.global_regions().len(), 8);
        for region in planet.global_regions() {
            for k in 0..3 {
                let opposite = region.corner(k).opposite().expect("valence four");
                let other = planet.global(opposite.region).unwrap();
                assert!(
                    region
                        .planet_vertex(k)
                        .abs_diff_eq(other.planet_vertex(opposite.vertex), 1e-9)
                );
            }
        }
    }

    #[test]
    fn test_global_ids_are_offset_per_shape() {
        let planet = Planet::create_spherical_with_orders(1.0, orders(2)).unwrap();
        assert_eq!(planet.global_id(0, 0), Some(GlobalId(0)));
        assert_eq!(planet.global_id(3, 1), Some(GlobalId(13)));
        assert_eq!(planet.global_id(3, 4), None);
        assert_eq!(planet.global_id(20, 0), None);
        for region in planet.global_regions() {
            assert_eq!(
                planet.global_id(region.shape(), region.face_index()),
                Some(region.id())
            );
        }
    }

    #[test]
    fn test_children_materialize_once() {
        let planet = Planet::create_spherical_with_orders(1.0, orders(1)).unwrap();
        assert!(!planet.global_regions()[0].has_children());
        let first = planet.continental_regions(GlobalId(0)).unwrap();
        let second = planet.continental_regions(GlobalId(0)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(planet.global_regions()[0].has_children());
        assert_eq!(first.len(), 4);
        assert_eq!(planet.materialization_stats().continental, 1);
        assert!(planet.continental_regions(GlobalId(20)).is_none());
    }

    #[test]
    fn test_congruent_shapes_are_generated_once() {
        let registry = ShapeRegistry::new();
        let ico = Polyhedron::icosahedron();
        let (neighbours, borders) = ico.adjacency().unwrap();
        let planet = Planet::create_in(
            &registry,
            &ico.shape_corners(),
            &neighbours,
            &borders,
            1.0,
            orders(2),
        )
        .unwrap();
        let stats = registry.stats();
        assert_eq!(stats.generated, 1);
        assert_eq!(stats.hits, 19);
        assert_eq!(stats.cached, 1);
        for s in 1..20 {
            assert!(Arc::ptr_eq(planet.shape(0).unwrap(), planet.shape(s).unwrap()));
        }

        for (s, face) in ico.faces().iter().enumerate() {
            let placement = planet.placement(s).unwrap();
            let canonical = planet.shape(s).unwrap().definition().corners();
            for (corner, &vertex) in canonical.iter().zip(face) {
                let expected = ico.vertices()[vertex].normalize();
                assert!((placement * *corner).abs_diff_eq(expected, 1e-12), "Shape {s}");
            }
        }
    }

    #[test]
    fn test_scoped_registry_releases_shapes() {
        let registry = ShapeRegistry::new();
        let octa = octahedron();
        let (neighbours, borders) = octa.adjacency().unwrap();
        let planet = Planet::create_in(
            &registry,
            &octa.shape_corners(),
            &neighbours,
            &borders,
            10.0,
            orders(1),
        )
        .unwrap();
        let _ = planet.continental_regions(GlobalId(0)).unwrap();
        let shape = Arc::downgrade(planet.shape(0).unwrap());
        drop(planet);
        assert!(shape.upgrade().is_some(), "The registry still holds the shape");
        drop(registry);
        assert!(shape.upgrade().is_none());
    }

    #[test]
    fn test_region_counts() {
        let orders = SubdivisionOrders::new(2, 3, 2).unwrap();
        let planet = Planet::create_spherical_with_orders(1.0, orders).unwrap();
        assert_eq!(planet.region_count(LodLevel::Global), 80);
        assert_eq!(planet.region_count(LodLevel::Continental), 720);
        assert_eq!(planet.region_count(LodLevel::Local), 2880);
    }
}
