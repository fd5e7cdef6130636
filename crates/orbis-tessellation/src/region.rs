//! Runtime regions: generated faces placed on a planet and linked to their
//! neighbours across shape and parent boundaries.
//!
//! Every region wraps one face of a shared [`Tessellation`]. Tessellations are
//! generated once per congruent shape in a canonical orientation, and each
//! region carries the rotation placing its shape on the planet. Geometry is
//! returned in metres in the region's local frame; transforms between regions
//! are rigid, with translations scaled by the planet radius.

use std::ops::Deref;
use std::sync::Arc;

use glam::{DAffine3, DMat3, DVec3};

use crate::face::Face;
use crate::frame::scale_rigid;
use crate::lazy::LazySlot;
use crate::shape_def::LodLevel;
use crate::tessellation::Tessellation;

/// Index of a global region in its planet's flat array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlobalId(pub u32);

/// A continental region: face `index` of the tessellation under `global`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContinentalId {
    /// Parent region.
    pub global: GlobalId,
    /// Face index inside the parent's continental tessellation.
    pub index: u32,
}

/// A local region: face `index` of the tessellation under `continental`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalId {
    /// Parent region.
    pub continental: ContinentalId,
    /// Face index inside the parent's local tessellation.
    pub index: u32,
}

/// The region across one edge and the index of the shared edge on its side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeighbourLink<Id> {
    /// Neighbouring region.
    pub region: Id,
    /// Its edge index for the shared edge.
    pub edge: usize,
}

/// A region touching a vertex and the slot of that vertex on its side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexLink<Id> {
    /// Region touching the vertex.
    pub region: Id,
    /// Its vertex slot for the shared vertex.
    pub vertex: usize,
}

/// What lies diametrically opposite a region at one of its vertices.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CornerLink<Id> {
    /// An even number of regions meet at the vertex; this one is opposite.
    Opposite(VertexLink<Id>),
    /// An odd number meet, so no region is opposite. `fan` lists the regions
    /// touching the vertex that share no edge with this one, in ring order.
    Absent {
        /// Regions touching the vertex only.
        fan: Vec<VertexLink<Id>>,
    },
}

impl<Id: Copy> CornerLink<Id> {
    /// The opposite region, if there is one.
    #[must_use]
    pub fn opposite(&self) -> Option<VertexLink<Id>> {
        match self {
            CornerLink::Opposite(link) => Some(*link),
            CornerLink::Absent { .. } => None,
        }
    }

    /// Whether no region is opposite.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, CornerLink::Absent { .. })
    }

    /// Every region listed at this corner.
    #[must_use]
    pub fn touching(&self) -> &[VertexLink<Id>] {
        match self {
            CornerLink::Opposite(link) => std::slice::from_ref(link),
            CornerLink::Absent { fan } => fan,
        }
    }
}

/// Resolved links of one region, with unit-sphere transforms.
#[derive(Clone, Debug)]
pub struct RegionLinks<Id> {
    pub(crate) neighbours: [NeighbourLink<Id>; 3],
    pub(crate) corners: [CornerLink<Id>; 3],
    pub(crate) to_neighbour: [DAffine3; 3],
    pub(crate) to_corner: [Vec<DAffine3>; 3],
}

/// Common interface of regions at every level of detail.
pub trait Region {
    /// Identifier type of this level.
    type Id: Copy;

    /// Level of detail.
    const LEVEL: LodLevel;

    /// This region's id.
    fn id(&self) -> Self::Id;

    /// The generated face this region wraps.
    fn face(&self) -> &Face;

    /// Resolved links.
    fn links(&self) -> &RegionLinks<Self::Id>;

    /// Planet radius in metres.
    fn radius(&self) -> f64;

    /// Rotation from the shape's canonical orientation onto the planet.
    fn placement(&self) -> DMat3;

    /// Level of detail.
    fn level(&self) -> LodLevel {
        Self::LEVEL
    }

    /// Vertex `i` in metres, in the region's local frame.
    fn vertex(&self, i: usize) -> DVec3 {
        self.face().vertex(i) * self.radius()
    }

    /// Unit sphere normal at vertex `i`, in the local frame.
    fn vertex_normal(&self, i: usize) -> DVec3 {
        self.face().vertex_normal(i)
    }

    /// Unit normal of the plane through edge `i`, in the local frame.
    fn edge_normal(&self, i: usize) -> DVec3 {
        self.face().edge_normal(i)
    }

    /// Region across edge `i`.
    fn neighbour(&self, i: usize) -> NeighbourLink<Self::Id> {
        self.links().neighbours[i]
    }

    /// What lies opposite vertex `i`.
    fn corner(&self, i: usize) -> &CornerLink<Self::Id> {
        &self.links().corners[i]
    }

    /// Transform from this region's frame into the neighbour's across edge `i`.
    fn transform_to_neighbour(&self, i: usize) -> DAffine3 {
        scale_rigid(self.links().to_neighbour[i], self.radius())
    }

    /// Transforms into the frames of the regions listed at corner `i`, in the
    /// order of [`CornerLink::touching`].
    fn transforms_to_corner(&self, i: usize) -> Vec<DAffine3> {
        self.links().to_corner[i]
            .iter()
            .map(|&t| scale_rigid(t, self.radius()))
            .collect()
    }

    /// Local-to-planet transform, in metres.
    fn frame(&self) -> DAffine3 {
        let placed = self.face().frame().rotated(self.placement());
        scale_rigid(placed.to_affine(), self.radius())
    }

    /// Vertex `i` in planet-centred coordinates, in metres.
    fn planet_vertex(&self, i: usize) -> DVec3 {
        self.placement() * self.face().sphere_vertex(i) * self.radius()
    }

    /// Transform into the parent's frame. Global regions map into the frame
    /// of their shape triangle.
    fn transform_to_parent(&self) -> DAffine3 {
        scale_rigid(self.face().to_upper(), self.radius())
    }

    /// Transform from the parent's frame into this region's.
    fn transform_from_parent(&self) -> DAffine3 {
        scale_rigid(self.face().from_upper(), self.radius())
    }
}

/// A region of the coarsest level. Created with its planet.
#[derive(Debug)]
pub struct GlobalRegion {
    pub(crate) id: GlobalId,
    pub(crate) shape: usize,
    pub(crate) tessellation: Arc<Tessellation>,
    pub(crate) face: u32,
    pub(crate) radius: f64,
    pub(crate) placement: DMat3,
    pub(crate) links: RegionLinks<GlobalId>,
    pub(crate) children: LazySlot<[ContinentalRegion]>,
}

impl GlobalRegion {
    /// Index of the shape this region belongs to.
    #[must_use]
    pub fn shape(&self) -> usize {
        self.shape
    }

    /// Face index inside the shape's global tessellation.
    #[must_use]
    pub fn face_index(&self) -> u32 {
        self.face
    }

    /// Whether the continental children have been materialized.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.children.is_ready()
    }

    /// The tessellation subdividing this region.
    pub(crate) fn child_tessellation(&self) -> Arc<Tessellation> {
        self.tessellation.child(self.face)
    }
}

impl Region for GlobalRegion {
    type Id = GlobalId;
    const LEVEL: LodLevel = LodLevel::Global;

    fn id(&self) -> GlobalId {
        self.id
    }

    fn face(&self) -> &Face {
        self.tessellation.face(self.face)
    }

    fn links(&self) -> &RegionLinks<GlobalId> {
        &self.links
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn placement(&self) -> DMat3 {
        self.placement
    }
}

/// A region subdividing one global region.
#[derive(Debug)]
pub struct ContinentalRegion {
    pub(crate) id: ContinentalId,
    pub(crate) tessellation: Arc<Tessellation>,
    pub(crate) radius: f64,
    pub(crate) placement: DMat3,
    pub(crate) links: RegionLinks<ContinentalId>,
    pub(crate) children: LazySlot<[LocalRegion]>,
}

impl ContinentalRegion {
    /// The global region this one subdivides.
    #[must_use]
    pub fn parent(&self) -> GlobalId {
        self.id.global
    }

    /// Whether the local children have been materialized.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.children.is_ready()
    }

    pub(crate) fn child_tessellation(&self) -> Arc<Tessellation> {
        self.tessellation.child(self.id.index)
    }
}

impl Region for ContinentalRegion {
    type Id = ContinentalId;
    const LEVEL: LodLevel = LodLevel::Continental;

    fn id(&self) -> ContinentalId {
        self.id
    }

    fn face(&self) -> &Face {
        self.tessellation.face(self.id.index)
    }

    fn links(&self) -> &RegionLinks<ContinentalId> {
        &self.links
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn placement(&self) -> DMat3 {
        self.placement
    }
}

/// A region of the finest level.
#[derive(Debug)]
pub struct LocalRegion {
    pub(crate) id: LocalId,
    pub(crate) tessellation: Arc<Tessellation>,
    pub(crate) radius: f64,
    pub(crate) placement: DMat3,
    pub(crate) links: RegionLinks<LocalId>,
}

impl LocalRegion {
    /// The continental region this one subdivides.
    #[must_use]
    pub fn parent(&self) -> ContinentalId {
        self.id.continental
    }
}

impl Region for LocalRegion {
    type Id = LocalId;
    const LEVEL: LodLevel = LodLevel::Local;

    fn id(&self) -> LocalId {
        self.id
    }

    fn face(&self) -> &Face {
        self.tessellation.face(self.id.index)
    }

    fn links(&self) -> &RegionLinks<LocalId> {
        &self.links
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn placement(&self) -> DMat3 {
        self.placement
    }
}

/// One region inside a shared, lazily materialized sibling array.
#[derive(Clone, Debug)]
pub struct RegionHandle<R> {
    siblings: Arc<[R]>,
    index: usize,
}

impl<R> RegionHandle<R> {
    pub(crate) fn new(siblings: Arc<[R]>, index: usize) -> Option<Self> {
        (index < siblings.len()).then_some(Self { siblings, index })
    }

    /// All siblings, including this region.
    #[must_use]
    pub fn siblings(&self) -> &Arc<[R]> {
        &self.siblings
    }
}

impl<R> Deref for RegionHandle<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.siblings[self.index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_link_accessors() {
        let opposite: CornerLink<u32> = CornerLink::Opposite(VertexLink {
            region: 4,
            vertex: 2,
        });
        assert!(!opposite.is_absent());
        assert_eq!(opposite.opposite().map(|l| l.region), Some(4));
        assert_eq!(opposite.touching().len(), 1);

        let absent: CornerLink<u32> = CornerLink::Absent {
            fan: vec![
                VertexLink {
                    region: 1,
                    vertex: 0,
                },
                VertexLink {
                    region: 2,
                    vertex: 1,
                },
            ],
        };
        assert!(absent.is_absent());
        assert!(absent.opposite().is_none());
        assert_eq!(absent.touching().len(), 2);
    }

    #[test]
    fn test_region_handle_bounds() {
        let siblings: Arc<[u8]> = Arc::from(vec![10, 20, 30]);
        let handle = RegionHandle::new(Arc::clone(&siblings), 2).expect("in range");
        assert_eq!(*handle, 30);
        assert_eq!(handle.siblings().len(), 3);
        assert!(RegionHandle::new(siblings, 3).is_none());
    }

    #[test]
    fn test_ids_order_by_parent_first() {
        let a = ContinentalId {
            global: GlobalId(1),
            index: 9,
        };
        let b = ContinentalId {
            global: GlobalId(2),
            index: 0,
        };
        assert!(a < b);
    }
}
