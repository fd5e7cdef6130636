//! Topology reports logged by the demo.

use orbis_tessellation::{GlobalId, LodLevel, Planet, Region, ShapeRegistry};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{info, warn};

const SEAM_TOLERANCE_M: f64 = 1e-6;

/// Logs shape count, orders and region totals per level.
pub(crate) fn report_summary(planet: &Planet) {
    let orders = planet.orders();
    info!(
        "Planet radius {} m, {} shapes, orders global={} continental={} local={}",
        planet.radius(),
        planet.shape_count(),
        orders.global,
        orders.continental,
        orders.local
    );
    for level in LodLevel::ALL {
        info!("{:?} regions: {}", level, planet.region_count(level));
    }
}

/// Logs the shared shape registry counters.
pub(crate) fn report_registry() {
    let stats = ShapeRegistry::shared().stats();
    info!(
        "Shape registry: {} cached, {} generated, {} hits",
        stats.cached, stats.generated, stats.hits
    );
}

/// Checks neighbour reciprocity and seam agreement over every global region.
pub(crate) fn report_global_topology(planet: &Planet) {
    let mut reciprocal = 0usize;
    let mut broken = 0usize;
    let mut absent_corners = 0usize;
    let mut max_seam_gap: f64 = 0.0;
    let mut max_roundtrip_error: f64 = 0.0;

    for region in planet.global_regions() {
        for e in 0..3 {
            let link = region.neighbour(e);
            let Some(other) = planet.global(link.region) else {
                broken += 1;
                continue;
            };
            if other.neighbour(link.edge).region == region.id() {
                reciprocal += 1;
            } else {
                broken += 1;
            }
            let gap = region
                .planet_vertex(e)
                .distance(other.planet_vertex((link.edge + 1) % 3));
            max_seam_gap = max_seam_gap.max(gap);

            let roundtrip =
                other.transform_to_neighbour(link.edge) * region.transform_to_neighbour(e);
            max_roundtrip_error = max_roundtrip_error.max(roundtrip.translation.length());
        }
        absent_corners += (0..3).filter(|&k| region.corner(k).is_absent()).count();
    }

    info!(
        "Global links: {} reciprocal, {} broken, {} absent corners",
        reciprocal, broken, absent_corners
    );
    info!(
        "Max seam gap {:.3e} m, max neighbour round-trip error {:.3e} m",
        max_seam_gap, max_roundtrip_error
    );
    if broken > 0 || max_seam_gap > SEAM_TOLERANCE_M * planet.radius().max(1.0) {
        warn!("Global topology check failed");
    }
}

/// Materializes continental and local regions under a few random global
/// regions and logs what was generated.
pub(crate) fn report_samples(planet: &Planet, samples: u32) {
    let count = planet.global_regions().len() as u32;
    if samples == 0 || count == 0 {
        return;
    }
    let mut rng = Xoshiro256StarStar::seed_from_u64(42);

    for _ in 0..samples {
        let global = GlobalId(rng.gen_range(0..count));
        let Some(continental) = planet.continental_regions(global) else {
            continue;
        };
        let index = rng.gen_range(0..continental.len() as u32);
        let Some(parent) = planet.continental_region(global, index) else {
            continue;
        };
        let Some(locals) = planet.local_regions(parent.id()) else {
            continue;
        };

        let mut cross_parent = 0usize;
        for local in locals.iter() {
            for e in 0..3 {
                if local.neighbour(e).region.continental != parent.id() {
                    cross_parent += 1;
                }
            }
        }
        info!(
            "Global {:?}: {} continental regions; continental {} has {} local regions ({} links leave the parent)",
            global,
            continental.len(),
            index,
            locals.len(),
            cross_parent
        );
    }

    let stats = planet.materialization_stats();
    info!(
        "Materialized {} continental and {} local sibling arrays",
        stats.continental, stats.local
    );
}
