//! Shape definitions: a base triangle plus the subdivision order of each level.

use glam::{DMat3, DVec3};

use crate::error::ShapeError;
use crate::winding::{doubled_area, triangle_winds_outward};

/// Smallest doubled area a normalized shape triangle may have.
const MIN_DOUBLED_AREA: f64 = 1e-12;

/// Shortest corner vector that can be normalized.
const MIN_CORNER_LENGTH: f64 = 1e-12;

/// Grid used to quantize corners when hashing shape definitions.
pub const KEY_QUANTUM: f64 = 1e-9;

/// Largest power-of-two exponent chosen for derived continental/local orders.
const MAX_ORDER_EXPONENT: u32 = 12;

/// The three levels of detail of the region hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LodLevel {
    /// Coarsest level, created eagerly with the planet.
    Global,
    /// Subdivision of one global region.
    Continental,
    /// Subdivision of one continental region.
    Local,
}

impl LodLevel {
    /// All levels from coarse to fine.
    pub const ALL: [LodLevel; 3] = [LodLevel::Global, LodLevel::Continental, LodLevel::Local];

    /// Depth below the global level.
    #[must_use]
    pub fn depth(self) -> usize {
        self as usize
    }

    /// The next finer level, if any.
    #[must_use]
    pub fn finer(self) -> Option<LodLevel> {
        match self {
            LodLevel::Global => Some(LodLevel::Continental),
            LodLevel::Continental => Some(LodLevel::Local),
            LodLevel::Local => None,
        }
    }
}

/// Subdivision order of each level.
///
/// A level with order `n` splits its parent triangle into `n²` faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubdivisionOrders {
    /// Order of the global level (subdividing the shape triangle).
    pub global: u32,
    /// Order of the continental level (subdividing one global face).
    pub continental: u32,
    /// Order of the local level (subdividing one continental face).
    pub local: u32,
}

impl SubdivisionOrders {
    /// Create validated orders.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ZeroOrder`] if any order is zero.
    pub fn new(global: u32, continental: u32, local: u32) -> Result<Self, ShapeError> {
        let orders = Self {
            global,
            continental,
            local,
        };
        orders.validate()?;
        Ok(orders)
    }

    /// Check that every order is at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ZeroOrder`] naming the first offending level.
    pub fn validate(&self) -> Result<(), ShapeError> {
        for level in LodLevel::ALL {
            if self.for_level(level) == 0 {
                return Err(ShapeError::ZeroOrder { level });
            }
        }
        Ok(())
    }

    /// Order of the given level.
    #[must_use]
    pub fn for_level(&self, level: LodLevel) -> u32 {
        match level {
            LodLevel::Global => self.global,
            LodLevel::Continental => self.continental,
            LodLevel::Local => self.local,
        }
    }

    /// Orders from coarse to fine.
    #[must_use]
    pub fn as_array(&self) -> [u32; 3] {
        [self.global, self.continental, self.local]
    }

    /// Derive orders for a shape edge of the given arc length (metres) so that
    /// cells come close to the target sizes.
    ///
    /// The global order rounds to the nearest count (at least 1). Continental
    /// and local orders are the smallest powers of two that bring the cell
    /// size at or below the target.
    #[must_use]
    pub fn for_edge_length(edge_length_m: f64, targets: &CellTargets) -> Self {
        let global = if targets.global_m > 0.0 && edge_length_m.is_finite() {
            (edge_length_m / targets.global_m).round().max(1.0) as u32
        } else {
            1
        };
        let global_cell = edge_length_m / f64::from(global);
        let continental = power_of_two_covering(global_cell / targets.continental_m);
        let continental_cell = global_cell / f64::from(continental);
        let local = power_of_two_covering(continental_cell / targets.local_m);
        Self {
            global,
            continental,
            local,
        }
    }
}

fn power_of_two_covering(ratio: f64) -> u32 {
    if ratio.is_nan() || ratio <= 1.0 {
        return 1;
    }
    let exponent = ratio.log2().ceil().min(f64::from(MAX_ORDER_EXPONENT)) as u32;
    1 << exponent
}

/// Target cell edge lengths (metres) used to derive subdivision orders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellTargets {
    /// Global cell edge length.
    pub global_m: f64,
    /// Continental cell edge length.
    pub continental_m: f64,
    /// Local cell edge length.
    pub local_m: f64,
}

impl Default for CellTargets {
    fn default() -> Self {
        Self {
            global_m: 100_000.0,
            continental_m: 1_800.0,
            local_m: 150.0,
        }
    }
}

/// An immutable base triangle on the unit sphere and its subdivision orders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeDefinition {
    corners: [DVec3; 3],
    orders: SubdivisionOrders,
}

impl ShapeDefinition {
    /// Create a shape from three corner directions.
    ///
    /// Corners are normalized onto the unit sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if an order is zero, a corner is zero or non-finite,
    /// the corners are collinear, or they wind clockwise when viewed from
    /// outside the sphere.
    pub fn new(corners: [DVec3; 3], orders: SubdivisionOrders) -> Result<Self, ShapeError> {
        orders.validate()?;

        let mut normalized = [DVec3::ZERO; 3];
        for (index, corner) in corners.into_iter().enumerate() {
            let length = corner.length();
            if !corner.is_finite() || length < MIN_CORNER_LENGTH {
                return Err(ShapeError::InvalidCorner { index });
            }
            normalized[index] = corner / length;
        }

        let [a, b, c] = normalized;
        let area = doubled_area(a, b, c);
        if area < MIN_DOUBLED_AREA {
            return Err(ShapeError::DegenerateCorners { area });
        }
        if !triangle_winds_outward(a, b, c) {
            return Err(ShapeError::ClockwiseCorners);
        }

        Ok(Self {
            corners: normalized,
            orders,
        })
    }

    /// Unit-length corners `A, B, C`.
    #[must_use]
    pub fn corners(&self) -> &[DVec3; 3] {
        &self.corners
    }

    /// Subdivision orders.
    #[must_use]
    pub fn orders(&self) -> SubdivisionOrders {
        self.orders
    }

    /// The same triangle rotated into canonical orientation, and the rotation
    /// placing it back.
    ///
    /// The canonical triangle has `A` on `+Z` and `B` in the `XZ` half-plane
    /// with `x > 0`, so congruent triangles with the same orders produce the
    /// same [`ShapeKey`] wherever they sit on the sphere. Applying the
    /// returned rotation to the canonical corners gives back these corners.
    #[must_use]
    pub fn canonical(&self) -> (Self, DMat3) {
        let [a, b, c] = self.corners;
        let x = (b - a * a.dot(b)).normalize();
        let y = a.cross(x);
        let placement = DMat3::from_cols(x, y, a);
        let corners = [
            DVec3::Z,
            DVec3::new(b.dot(x), 0.0, b.dot(a)).normalize(),
            (placement.transpose() * c).normalize(),
        ];
        let canonical = Self {
            corners,
            orders: self.orders,
        };
        (canonical, placement)
    }

    /// Content key used to intern generated shapes.
    #[must_use]
    pub fn key(&self) -> ShapeKey {
        let quantize = |v: DVec3| {
            [
                (v.x / KEY_QUANTUM).round() as i64,
                (v.y / KEY_QUANTUM).round() as i64,
                (v.z / KEY_QUANTUM).round() as i64,
            ]
        };
        ShapeKey {
            corners: self.corners.map(quantize),
            orders: self.orders.as_array(),
        }
    }
}

/// Hashable identity of a shape definition: corners quantized to
/// [`KEY_QUANTUM`] plus the three orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeKey {
    corners: [[i64; 3]; 3],
    orders: [u32; 3],
}
