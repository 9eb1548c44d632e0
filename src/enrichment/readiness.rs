use crate::enrichment::collection::Collection;
use crate::models::EnrichmentTarget;

/// Aggregate readiness queries over a collection.
///
/// Both queries are pure reads over the per-slot states: safe to call while
/// enrichment is in flight, idempotent, and `false` for an empty collection
/// (no data is never "ready").

/// True iff every target's detail fetch succeeded.
pub fn all_loaded<T: EnrichmentTarget>(collection: &Collection<T>) -> bool {
    !collection.is_empty()
        && collection
            .slots()
            .iter()
            .all(|slot| slot.read().status().is_loaded())
}

/// True iff every target reached a terminal state (`Loaded` or `Failed`).
///
/// This is the convergence signal: it still resolves when some fetches
/// failed, so callers can stop waiting and render what they have.
pub fn all_resolved<T: EnrichmentTarget>(collection: &Collection<T>) -> bool {
    !collection.is_empty()
        && collection
            .slots()
            .iter()
            .all(|slot| slot.read().status().is_terminal())
}
