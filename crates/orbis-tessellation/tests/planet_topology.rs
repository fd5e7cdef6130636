use std::sync::Arc;
use std::thread;

use glam::{DAffine3, DVec3};
use orbis_tessellation::{
    BorderPosition, BorderType, CornerLink, GlobalId, LodLevel, MacroEdge, Planet, PlanetError,
    Polyhedron, Region, ShapeError, SubdivisionOrders, Tessellation, VertexLink,
};

const RADIUS: f64 = 1000.0;
const TOLERANCE: f64 = 1e-6;

fn planet(global: u32, continental: u32, local: u32) -> Planet {
    let orders = SubdivisionOrders::new(global, continental, local).unwrap();
    Planet::create_spherical_with_orders(RADIUS, orders).unwrap()
}

fn icosahedron_tables() -> (Vec<[DVec3; 3]>, Vec<[usize; 3]>, Vec<[BorderType; 3]>) {
    let ico = Polyhedron::icosahedron();
    let (neighbours, borders) = ico.adjacency().unwrap();
    (ico.shape_corners(), neighbours, borders)
}

fn create(
    corners: &[[DVec3; 3]],
    neighbours: &[[usize; 3]],
    borders: &[[BorderType; 3]],
    radius: f64,
) -> Result<Planet, PlanetError> {
    Planet::create(corners, neighbours, borders, radius, SubdivisionOrders::new(2, 1, 1).unwrap())
}

// Checks every neighbour and corner link of one region against the regions
// it points to, looked up through `lookup`.
fn check_links<R, F, H>(region: &R, lookup: F)
where
    R: Region,
    R::Id: PartialEq + std::fmt::Debug,
    F: Fn(R::Id) -> H,
    H: std::ops::Deref<Target = R>,
{
    for e in 0..3 {
        let link = region.neighbour(e);
        let other = lookup(link.region);
        let back = other.neighbour(link.edge);
        assert_eq!(back.region, region.id(), "{:?} edge {e} is not reciprocated", region.id());
        assert_eq!(back.edge, e);

        let (a, b) = (region.planet_vertex(e), region.planet_vertex((e + 1) % 3));
        assert!(a.abs_diff_eq(other.planet_vertex((link.edge + 1) % 3), TOLERANCE));
        assert!(b.abs_diff_eq(other.planet_vertex(link.edge), TOLERANCE));

        let ours = region.frame().transform_vector3(region.edge_normal(e));
        let theirs = other.frame().transform_vector3(other.edge_normal(link.edge));
        assert!(ours.abs_diff_eq(-theirs, TOLERANCE), "{:?} edge {e} normals", region.id());

        let to_neighbour = region.transform_to_neighbour(e);
        assert!(
            to_neighbour
                .transform_point3(region.vertex(e))
                .abs_diff_eq(other.vertex((link.edge + 1) % 3), TOLERANCE)
        );
        let back_transform = other.transform_to_neighbour(link.edge);
        assert!((back_transform * to_neighbour).abs_diff_eq(DAffine3::IDENTITY, TOLERANCE));
    }

    for k in 0..3 {
        let corner = region.corner(k);
        let transforms = region.transforms_to_corner(k);
        assert_eq!(transforms.len(), corner.touching().len());
        for (link, transform) in corner.touching().iter().zip(&transforms) {
            let other = lookup(link.region);
            assert!(
                region
                    .planet_vertex(k)
                    .abs_diff_eq(other.planet_vertex(link.vertex), TOLERANCE),
                "{:?} corner {k} does not share its vertex",
                region.id()
            );
            assert!(
                transform
                    .transform_point3(region.vertex(k))
                    .abs_diff_eq(other.vertex(link.vertex), TOLERANCE)
            );
        }
        if let Some(link) = corner.opposite() {
            let other = lookup(link.region);
            let back = other.corner(link.vertex).opposite();
            assert_eq!(
                back,
                Some(VertexLink {
                    region: region.id(),
                    vertex: k
                }),
                "{:?} corner {k} is not mutual",
                region.id()
            );
            let there = transforms[0];
            let back_again = other.transforms_to_corner(link.vertex)[0];
            assert!(
                (back_again * there).abs_diff_eq(DAffine3::IDENTITY, TOLERANCE),
                "{:?} corner {k} transforms are not inverse",
                region.id()
            );
        }
    }
}

#[test]
fn test_order_one_has_absent_corners_everywhere() {
    let planet = planet(1, 1, 1);
    assert_eq!(planet.global_regions().len(), 20);
    for region in planet.global_regions() {
        for k in 0..3 {
            match region.corner(k) {
                CornerLink::Absent { fan } => assert_eq!(fan.len(), 2),
                CornerLink::Opposite(_) => panic!("Valence-five vertices have no opposite"),
            }
        }
        check_links(region, |id| planet.global(id).unwrap());
    }
}

#[test]
fn test_global_links_are_consistent() {
    let planet = planet(3, 1, 1);
    assert_eq!(planet.global_regions().len(), 180);
    for region in planet.global_regions() {
        check_links(region, |id| planet.global(id).unwrap());
    }
}

#[test]
fn test_corner_faces_have_one_absent_corner() {
    let planet = planet(2, 1, 1);
    assert_eq!(planet.global_regions().len(), 80);
    for region in planet.global_regions() {
        let absent = (0..3).filter(|&k| region.corner(k).is_absent()).count();
        let expected = match region.face_index() {
            0 | 1 | 3 => 1,
            _ => 0,
        };
        assert_eq!(absent, expected, "Face {} of shape {}", region.face_index(), region.shape());
    }
}

#[test]
fn test_continental_links_cross_global_borders() {
    let planet = planet(1, 3, 1);
    for g in 0..20 {
        let regions = planet.continental_regions(GlobalId(g)).unwrap();
        for region in regions.iter() {
            assert_eq!(region.parent(), GlobalId(g));
            check_links(region, |id| planet.continental(id).unwrap());
        }
    }
    assert_eq!(planet.materialization_stats().continental, 20);
}

#[test]
fn test_local_links_cross_continental_borders() {
    let planet = planet(2, 2, 2);
    let parent = planet.continental_region(GlobalId(0), 0).unwrap();
    let locals = planet.local_regions(parent.id()).unwrap();
    assert_eq!(locals.len(), 4);
    for region in locals.iter() {
        assert_eq!(region.level(), LodLevel::Local);
        check_links(region, |id| planet.local(id).unwrap());
    }
}

#[test]
fn test_parent_transforms_map_child_vertices() {
    let planet = planet(2, 2, 2);
    let global = planet.global(GlobalId(5)).unwrap();
    let continental = planet.continental_region(GlobalId(5), 3).unwrap();
    assert_eq!(planet.parent_region(continental.id()).unwrap().id(), global.id());

    let to_parent = continental.transform_to_parent();
    let from_parent = continental.transform_from_parent();
    assert!((from_parent * to_parent).abs_diff_eq(DAffine3::IDENTITY, TOLERANCE));
    for i in 0..3 {
        let in_planet = continental.frame().transform_point3(continental.vertex(i));
        let expected = global.frame().inverse().transform_point3(in_planet);
        assert!(to_parent.transform_point3(continental.vertex(i)).abs_diff_eq(expected, TOLERANCE));
    }

    let local = planet.local_region(continental.id(), 1).unwrap();
    assert_eq!(local.parent(), continental.id());
    assert_eq!(planet.continental_parent(local.id()).unwrap().id(), continental.id());
}

#[test]
fn test_concurrent_materialization_runs_once() {
    let planet = planet(2, 4, 1);
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| planet.continental_regions(GlobalId(7)).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for result in &results {
        assert!(Arc::ptr_eq(result, &results[0]), "All callers share one array");
    }
    assert_eq!(results[0].len(), 16);
    assert_eq!(planet.materialization_stats().continental, 1);
    assert_eq!(planet.materialization_stats().local, 0);
}

#[test]
fn test_unknown_ids_return_none() {
    let planet = planet(1, 2, 2);
    assert!(planet.global(GlobalId(20)).is_none());
    assert!(planet.continental_region(GlobalId(0), 4).is_none());
    let id = planet.continental_region(GlobalId(0), 0).unwrap().id();
    assert!(planet.local_region(id, 4).is_none());
}

fn matches_as_set(a: [DVec3; 3], b: [DVec3; 3]) -> bool {
    a.iter().all(|p| b.iter().any(|q| p.abs_diff_eq(*q, 1e-9)))
}

#[test]
fn test_ghost_faces_match_real_neighbours_on_icosahedron() {
    let planet = planet(3, 1, 1);
    for s in 0..planet.shape_count() {
        let tess: &Tessellation = planet.shape(s).unwrap().global();
        let placement = planet.placement(s).unwrap();
        let adjacency = planet.adjacency(s).unwrap();
        for edge in MacroEdge::ALL {
            let t = adjacency.neighbours[edge.index()];
            let neighbour = planet.shape(t).unwrap().global();
            let neighbour_placement = planet.placement(t).unwrap();
            let border = adjacency.borders[edge.index()];
            for pos in 0..BorderPosition::strip_len(tess.order()) {
                let ghost = tess.overflow(BorderPosition::new(edge, pos)).unwrap();
                let ghost_vertices = ghost.vertices().map(|v| placement * v);
                let real = neighbour.boundary_face(border.map(tess.order(), pos));
                let real_vertices = [0, 1, 2].map(|i| neighbour_placement * real.sphere_vertex(i));
                assert!(
                    matches_as_set(ghost_vertices, real_vertices),
                    "Shape {s} edge {edge:?} position {pos}"
                );
            }
        }
    }
}

#[test]
fn test_smoothed_normals_agree_across_shape_edges() {
    let planet = planet(4, 1, 1);
    let n = 4;
    let tess = planet.shape(0).unwrap().global();
    let placement = planet.placement(0).unwrap();
    let t = planet.adjacency(0).unwrap().neighbours[0];
    let neighbour = planet.shape(t).unwrap().global();
    let neighbour_placement = planet.placement(t).unwrap();
    for row in 1..n {
        let point = placement * tess.lattice()[orbis_tessellation::vertex_index(row, 0)];
        let (r, c) = (0..=n)
            .flat_map(|r| (0..=r).map(move |c| (r, c)))
            .find(|&(r, c)| {
                let theirs = neighbour.lattice()[orbis_tessellation::vertex_index(r, c)];
                (neighbour_placement * theirs).abs_diff_eq(point, 1e-12)
            })
            .expect("shared edge vertex exists on both sides");
        let ours = placement * tess.smoothed_normal(row, 0).unwrap();
        let theirs = neighbour_placement * neighbour.smoothed_normal(r, c).unwrap();
        assert!(ours.abs_diff_eq(theirs, 1e-9), "Edge vertex {row}");
    }
}

#[test]
fn test_spherical_planet_derives_orders() {
    let planet = Planet::create_spherical(200_000.0).unwrap();
    let edge = 200_000.0 * 2.0_f64.atan();
    assert_eq!(planet.orders().global, 2);
    let continental_cell = edge / f64::from(planet.orders().global * planet.orders().continental);
    assert!(continental_cell <= 1_800.0);
    assert_eq!(planet.region_count(LodLevel::Global), 80);
}

#[test]
fn test_empty_topology_rejected() {
    assert_eq!(create(&[], &[], &[], RADIUS).unwrap_err(), PlanetError::EmptyTopology);
}

#[test]
fn test_mismatched_lengths_rejected() {
    let (corners, neighbours, borders) = icosahedron_tables();
    let result = create(&corners, &neighbours[..19], &borders, RADIUS);
    assert_eq!(
        result.unwrap_err(),
        PlanetError::MismatchedLengths {
            shapes: 20,
            neighbours: 19,
            borders: 20
        }
    );
}

#[test]
fn test_invalid_radius_rejected() {
    let (corners, neighbours, borders) = icosahedron_tables();
    for radius in [0.0, -5.0, f64::INFINITY] {
        assert_eq!(
            create(&corners, &neighbours, &borders, radius).unwrap_err(),
            PlanetError::InvalidRadius(radius)
        );
    }
    assert!(matches!(
        create(&corners, &neighbours, &borders, f64::NAN),
        Err(PlanetError::InvalidRadius(_))
    ));
    assert!(matches!(Planet::create_spherical(-1.0), Err(PlanetError::InvalidRadius(_))));
}

#[test]
fn test_invalid_shape_rejected() {
    let (mut corners, neighbours, borders) = icosahedron_tables();
    corners[4].swap(1, 2);
    assert_eq!(
        create(&corners, &neighbours, &borders, RADIUS).unwrap_err(),
        PlanetError::InvalidShape {
            index: 4,
            source: ShapeError::ClockwiseCorners
        }
    );
}

#[test]
fn test_neighbour_out_of_range_rejected() {
    let (corners, mut neighbours, borders) = icosahedron_tables();
    neighbours[2][1] = 20;
    assert_eq!(
        create(&corners, &neighbours, &borders, RADIUS).unwrap_err(),
        PlanetError::NeighbourOutOfRange {
            shape: 2,
            edge: MacroEdge::Bc,
            neighbour: 20,
            count: 20
        }
    );
}

#[test]
fn test_asymmetric_border_rejected() {
    let (corners, mut neighbours, borders) = icosahedron_tables();
    neighbours[0].swap(0, 1);
    assert!(matches!(
        create(&corners, &neighbours, &borders, RADIUS),
        Err(PlanetError::AsymmetricBorder { shape: 0, .. })
    ));
}

#[test]
fn test_border_geometry_mismatch_rejected() {
    let (mut corners, neighbours, borders) = icosahedron_tables();
    let rotation = glam::DQuat::from_axis_angle(DVec3::Z, 1e-6);
    corners[0] = corners[0].map(|c| rotation * c);
    assert!(matches!(
        create(&corners, &neighbours, &borders, RADIUS),
        Err(PlanetError::BorderGeometryMismatch { shape: 0, .. })
    ));
}
