//! Per-face orthonormal frames and the rigid transforms between them.
//!
//! Every face gets its own local coordinate system with the origin at the
//! face's centroid. Positions stored in a frame stay small no matter how far
//! the face is from the planet centre, and moving between adjacent faces
//! composes a relative transform from the centroid difference rather than
//! from two large absolute positions.

use glam::{DAffine3, DMat3, DVec3};

/// A right-handed orthonormal frame anchored at a face centroid.
///
/// `x` points along the face's first edge, `z` along the outward face normal,
/// `y = z × x`. Coordinates are in unit-sphere space; callers scale
/// translations by the planet radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    basis: DMat3,
    origin: DVec3,
}

impl Frame {
    /// Frame of the triangle `p0, p1, p2` (counter-clockwise from outside).
    #[must_use]
    pub fn from_triangle(points: [DVec3; 3]) -> Self {
        let [p0, p1, p2] = points;
        let origin = (p0 + p1 + p2) / 3.0;
        let x = (p1 - p0).normalize();
        let z = (p1 - p0).cross(p2 - p0).normalize();
        let y = z.cross(x);
        Self {
            basis: DMat3::from_cols(x, y, z),
            origin,
        }
    }

    /// Frame origin in unit-sphere space.
    #[must_use]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Columns are the frame axes in unit-sphere space.
    #[must_use]
    pub fn basis(&self) -> DMat3 {
        self.basis
    }

    /// Outward face normal (the frame's `z` axis).
    #[must_use]
    pub fn normal(&self) -> DVec3 {
        self.basis.z_axis
    }

    /// Local-to-sphere transform.
    #[must_use]
    pub fn to_affine(&self) -> DAffine3 {
        DAffine3::from_mat3_translation(self.basis, self.origin)
    }

    /// Express a unit-sphere point in this frame.
    #[must_use]
    pub fn to_local_point(&self, point: DVec3) -> DVec3 {
        self.basis.transpose() * (point - self.origin)
    }

    /// Express a unit-sphere direction in this frame.
    #[must_use]
    pub fn to_local_vector(&self, vector: DVec3) -> DVec3 {
        self.basis.transpose() * vector
    }

    /// The same frame after rotating unit-sphere space about the centre.
    #[must_use]
    pub fn rotated(&self, rotation: DMat3) -> Self {
        Self {
            basis: rotation * self.basis,
            origin: rotation * self.origin,
        }
    }

    /// Transform from this frame's local coordinates to `target`'s.
    #[must_use]
    pub fn relative_to(&self, target: &Frame) -> DAffine3 {
        let inverse = target.basis.transpose();
        DAffine3::from_mat3_translation(
            inverse * self.basis,
            inverse * (self.origin - target.origin),
        )
    }
}

/// Rescale a rigid unit-sphere transform to a sphere of the given radius.
///
/// Rotations are scale invariant, so only the translation changes.
#[must_use]
pub fn scale_rigid(transform: DAffine3, radius: f64) -> DAffine3 {
    DAffine3::from_mat3_translation(transform.matrix3, transform.translation * radius)
}
