//! Resolution of border and apex references against neighbouring patches.
//!
//! A patch is one tessellation placed on the planet: a whole shape at the
//! global level, or the subdivision of one parent region below it. Faces
//! inside a patch already know their in-patch neighbours; this module turns
//! the remaining [`NeighbourRef::Border`] and [`CornerRef`] entries into
//! region links by looking across the patch's three edges and three corners.
//! Patches keep their geometry in the canonical orientation of their shape,
//! so frames are placed on the planet before relating two patches.

use std::sync::Arc;

use glam::{DAffine3, DMat3};

use crate::border::BorderType;
use crate::face::Face;
use crate::macro_edge::MacroEdge;
use crate::region::{CornerLink, NeighbourLink, RegionLinks, VertexLink};
use crate::tessellation::Tessellation;
use crate::topology::{BorderPosition, CornerRef, NeighbourRef, corner_face};

/// Supplies tessellations and region ids for the patches of one level.
pub(crate) trait PatchSource {
    /// Identifies a patch.
    type Patch: Copy;
    /// Identifies a region of the level being linked.
    type Id: Copy;

    /// Tessellation covering `patch`.
    fn tessellation(&self, patch: Self::Patch) -> Arc<Tessellation>;

    /// Region standing for `face` of `patch`.
    fn region_id(&self, patch: Self::Patch, face: u32) -> Self::Id;

    /// Rotation placing `patch`'s tessellation on the planet.
    fn placement(&self, patch: Self::Patch) -> DMat3;
}

/// What surrounds a patch: the patch across each of its edges and what lies
/// at each of its corners, with the edge and vertex slots on their side.
#[derive(Clone, Debug)]
pub(crate) struct PatchBoundary<P> {
    pub(crate) edges: [NeighbourLink<P>; 3],
    pub(crate) vertices: [CornerLink<P>; 3],
}

impl<P: Copy> PatchBoundary<P> {
    /// Boundary of the patch subdividing a region with these links.
    pub(crate) fn from_links(links: &RegionLinks<P>) -> Self {
        Self {
            edges: links.neighbours,
            vertices: links.corners.clone(),
        }
    }
}

/// Resolve the links of every face of `patch`, in face order.
pub(crate) fn link_patch<S: PatchSource>(
    source: &S,
    patch: S::Patch,
    boundary: &PatchBoundary<S::Patch>,
) -> Vec<RegionLinks<S::Id>> {
    let tess = source.tessellation(patch);
    let across: [Arc<Tessellation>; 3] =
        boundary.edges.map(|link| source.tessellation(link.region));
    let linker = Linker {
        source,
        patch,
        placement: source.placement(patch),
        tess: &tess,
        boundary,
        across: &across,
    };
    tess.faces().iter().map(|face| linker.link(face)).collect()
}

struct Linker<'a, S: PatchSource> {
    source: &'a S,
    patch: S::Patch,
    placement: DMat3,
    tess: &'a Tessellation,
    boundary: &'a PatchBoundary<S::Patch>,
    across: &'a [Arc<Tessellation>; 3],
}

impl<S: PatchSource> Linker<'_, S> {
    fn link(&self, face: &Face) -> RegionLinks<S::Id> {
        let edges: [(NeighbourLink<S::Id>, DAffine3); 3] =
            std::array::from_fn(|e| self.neighbour(face, e));
        let corners: [(CornerLink<S::Id>, Vec<DAffine3>); 3] =
            std::array::from_fn(|k| self.corner(face, k));
        let [(n0, t0), (n1, t1), (n2, t2)] = edges;
        let [(c0, u0), (c1, u1), (c2, u2)] = corners;
        RegionLinks {
            neighbours: [n0, n1, n2],
            corners: [c0, c1, c2],
            to_neighbour: [t0, t1, t2],
            to_corner: [u0, u1, u2],
        }
    }

    // Transform from `face` of this patch into `target` of `patch`.
    fn relate(&self, face: &Face, patch: S::Patch, target: &Face) -> DAffine3 {
        let ours = face.frame().rotated(self.placement);
        let theirs = target.frame().rotated(self.source.placement(patch));
        ours.relative_to(&theirs)
    }

    // The face across `position` in the neighbouring patch, with that patch's
    // edge index for the shared macro edge.
    fn across_border(&self, position: BorderPosition) -> (S::Patch, &Face, MacroEdge) {
        let link = self.boundary.edges[position.edge.index()];
        let edge = MacroEdge::from_index(link.edge);
        let mapped = BorderType::across(edge).map(self.tess.order(), position.pos);
        let target = self.across[position.edge.index()].boundary_face(mapped);
        (link.region, target, edge)
    }

    fn neighbour(&self, face: &Face, e: usize) -> (NeighbourLink<S::Id>, DAffine3) {
        match face.neighbour(e) {
            NeighbourRef::Direct(other) => (
                NeighbourLink {
                    region: self.source.region_id(self.patch, other),
                    edge: e,
                },
                face.to_neighbour(e),
            ),
            NeighbourRef::Border(position) => {
                let (patch, target, edge) = self.across_border(position);
                (
                    NeighbourLink {
                        region: self.source.region_id(patch, target.index()),
                        edge: edge.index(),
                    },
                    self.relate(face, patch, target),
                )
            }
        }
    }

    fn corner(&self, face: &Face, k: usize) -> (CornerLink<S::Id>, Vec<DAffine3>) {
        match face.corner(k) {
            CornerRef::Direct(other) => {
                let target = self.tess.face(other);
                (
                    CornerLink::Opposite(VertexLink {
                        region: self.source.region_id(self.patch, other),
                        vertex: k,
                    }),
                    vec![face.frame().relative_to(target.frame())],
                )
            }
            CornerRef::Border { position, anchor } => {
                let (patch, target, edge) = self.across_border(position);
                (
                    CornerLink::Opposite(VertexLink {
                        region: self.source.region_id(patch, target.index()),
                        vertex: anchor.vertex_on(edge),
                    }),
                    vec![self.relate(face, patch, target)],
                )
            }
            CornerRef::Apex(c) => match &self.boundary.vertices[c] {
                CornerLink::Opposite(link) => {
                    let (link, transform) = self.apex_face(face, *link);
                    (CornerLink::Opposite(link), vec![transform])
                }
                CornerLink::Absent { fan } => {
                    let (fan, transforms) = fan
                        .iter()
                        .map(|&link| self.apex_face(face, link))
                        .unzip();
                    (CornerLink::Absent { fan }, transforms)
                }
            },
        }
    }

    // The corner face of another patch meeting this one at a patch corner.
    fn apex_face(
        &self,
        face: &Face,
        link: VertexLink<S::Patch>,
    ) -> (VertexLink<S::Id>, DAffine3) {
        let tess = self.source.tessellation(link.region);
        let target = tess.face(corner_face(tess.order(), link.vertex));
        (
            VertexLink {
                region: self.source.region_id(link.region, target.index()),
                vertex: link.vertex,
            },
            self.relate(face, link.region, target),
        )
    }
}
