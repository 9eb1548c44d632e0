use crate::models::EnrichmentTarget;
use parking_lot::RwLock;
use std::sync::Arc;

/// Version tag for a collection instance. Superseding a collection bumps the
/// stage's current generation, which logically cancels completions still in
/// flight for the old instance.
pub type Generation = u64;

/// Exclusive handle to one target record. Only the enrichment unit bound to
/// this slot writes to it, and only once.
pub type Slot<T> = Arc<RwLock<T>>;

/// An ordered, generation-tagged set of enrichment targets.
///
/// The slot sequence is fixed at construction; the pipeline replaces whole
/// collections rather than mutating one in place, so readers always iterate
/// a stable snapshot while individual records are enriched under their own
/// locks.
#[derive(Debug)]
pub struct Collection<T> {
    generation: Generation,
    slots: Vec<Slot<T>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            generation: self.generation,
            slots: self.slots.clone(),
        }
    }
}

impl<T: EnrichmentTarget> Collection<T> {
    /// Build a collection from seed targets.
    pub fn new(generation: Generation, targets: Vec<T>) -> Self {
        Self {
            generation,
            slots: targets
                .into_iter()
                .map(|t| Arc::new(RwLock::new(t)))
                .collect(),
        }
    }

    /// An empty collection (readiness over it is always false).
    pub fn empty(generation: Generation) -> Self {
        Self {
            generation,
            slots: Vec::new(),
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    /// Clone the current state of every record.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.slots.iter().map(|slot| slot.read().clone()).collect()
    }

    /// Clone one record by position.
    pub fn get(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.slots.get(index).map(|slot| slot.read().clone())
    }
}
