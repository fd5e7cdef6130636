//! Shape registry: content-addressed interning of generated shapes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use crate::shape::Shape;
use crate::shape_def::{ShapeDefinition, ShapeKey};

/// Process-wide cache of generated shapes.
///
/// Definitions that quantize to the same [`ShapeKey`] share one [`Shape`].
/// Generation happens at most once per key, even under concurrent requests.
pub struct ShapeRegistry {
    shapes: DashMap<ShapeKey, Arc<Shape>, FxBuildHasher>,
    requests: AtomicU64,
    generated: AtomicU64,
}

/// Snapshot of registry counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Shapes currently cached.
    pub cached: usize,
    /// Requests answered from the cache.
    pub hits: u64,
    /// Shapes generated.
    pub generated: u64,
}

impl ShapeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            shapes: DashMap::with_hasher(FxBuildHasher),
            requests: AtomicU64::new(0),
            generated: AtomicU64::new(0),
        }
    }

    /// The registry shared by the whole process.
    pub fn shared() -> &'static ShapeRegistry {
        static SHARED: OnceLock<ShapeRegistry> = OnceLock::new();
        SHARED.get_or_init(ShapeRegistry::new)
    }

    /// Return the shape for `definition`, generating it if no equal
    /// definition has been seen.
    pub fn get_or_generate(&self, definition: &ShapeDefinition) -> Arc<Shape> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let key = definition.key();
        if let Some(shape) = self.shapes.get(&key) {
            tracing::trace!("Shape registry hit for {:?}", key);
            return Arc::clone(shape.value());
        }

        let entry = self.shapes.entry(key).or_insert_with(|| {
            self.generated.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                "Shape registry miss, generating orders {:?}",
                definition.orders().as_array()
            );
            Arc::new(Shape::generate(*definition))
        });
        Arc::clone(entry.value())
    }

    /// Look up a cached shape without generating it.
    pub fn get(&self, key: &ShapeKey) -> Option<Arc<Shape>> {
        self.shapes.get(key).map(|shape| Arc::clone(shape.value()))
    }

    /// Number of cached shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if no shape is cached.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Drop every cached shape. Shapes still held elsewhere stay alive.
    pub fn clear(&self) {
        self.shapes.clear();
    }

    /// Current counters.
    pub fn stats(&self) -> RegistryStats {
        let requests = self.requests.load(Ordering::Relaxed);
        let generated = self.generated.load(Ordering::Relaxed);
        RegistryStats {
            cached: self.shapes.len(),
            hits: requests.saturating_sub(generated),
            generated,
        }
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShapeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeRegistry")
            .field("stats", &self.stats())
            .finish()
    }
}
