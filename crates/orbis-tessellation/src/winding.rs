//! Winding order checks for sphere triangles.
//!
//! All shapes, faces and overflow faces are counter-clockwise when viewed
//! from outside the sphere. Frames, edge normals and the border remapping all
//! rely on that convention.

use glam::DVec3;

/// Check if a triangle has outward-facing winding order.
///
/// Returns `true` if the triangle's normal (via cross product) points away
/// from the sphere centre, i.e. has a positive dot product with the centroid.
/// Vertices are relative to the sphere centre.
#[must_use]
pub fn triangle_winds_outward(v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
    let face_normal = (v1 - v0).cross(v2 - v0);
    let centroid = (v0 + v1 + v2) / 3.0;
    face_normal.dot(centroid) > 0.0
}

/// Twice the area of the triangle.
#[must_use]
pub fn doubled_area(v0: DVec3, v1: DVec3, v2: DVec3) -> f64 {
    (v1 - v0).cross(v2 - v0).length()
}

/// Outward normal of the great-circle plane through an edge running from
/// `start` to `end` on a counter-clockwise triangle.
///
/// The normal points away from the triangle's interior.
#[must_use]
pub fn edge_plane_normal(start: DVec3, end: DVec3) -> DVec3 {
    end.cross(start).normalize()
}
