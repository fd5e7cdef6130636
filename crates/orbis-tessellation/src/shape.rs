//! A generated shape: the global tessellation of one base triangle with its
//! finer levels hanging off each face.

use std::sync::Arc;

use crate::frame::Frame;
use crate::shape_def::{LodLevel, ShapeDefinition, SubdivisionOrders};
use crate::tessellation::Tessellation;

/// Immutable, shareable result of generating a [`ShapeDefinition`].
#[derive(Debug)]
pub struct Shape {
    definition: ShapeDefinition,
    global: Arc<Tessellation>,
}

impl Shape {
    /// Generate the global level of `definition`. Finer levels are produced
    /// on first access.
    #[must_use]
    pub fn generate(definition: ShapeDefinition) -> Self {
        let corners = *definition.corners();
        let [global, continental, local] = definition.orders().as_array();
        tracing::debug!("Generating shape with orders {:?}", [global, continental, local]);
        let global = Tessellation::generate(
            corners,
            global,
            &[continental, local],
            &Frame::from_triangle(corners),
        );
        Self {
            definition,
            global: Arc::new(global),
        }
    }

    /// The definition this shape was generated from.
    #[must_use]
    pub fn definition(&self) -> &ShapeDefinition {
        &self.definition
    }

    /// Subdivision orders of every level.
    #[must_use]
    pub fn orders(&self) -> SubdivisionOrders {
        self.definition.orders()
    }

    /// The global tessellation.
    #[must_use]
    pub fn global(&self) -> &Arc<Tessellation> {
        &self.global
    }

    /// Continental tessellation under one global face.
    #[must_use]
    pub fn continental(&self, global_face: u32) -> Option<Arc<Tessellation>> {
        self.global.get_child(global_face)
    }

    /// Local tessellation under one continental face.
    #[must_use]
    pub fn local(&self, global_face: u32, continental_face: u32) -> Option<Arc<Tessellation>> {
        self.continental(global_face)?.get_child(continental_face)
    }

    /// Number of regions one shape contributes at `level`.
    #[must_use]
    pub fn region_count(&self, level: LodLevel) -> u64 {
        let orders = self.orders();
        LodLevel::ALL
            .iter()
            .take(level.depth() + 1)
            .map(|&l| u64::from(orders.for_level(l)).pow(2))
            .product()
    }
}
