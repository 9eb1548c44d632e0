use crate::config::EnrichmentConfig;
use crate::enrichment::collection::{Collection, Generation, Slot};
use crate::enrichment::fetchers::DetailFetcher;
use crate::models::{EnrichmentFailure, EnrichmentTarget, FailureKind};
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Launches one independent enrichment unit per target in a collection.
///
/// Units run concurrently (bounded by `max_concurrent`), complete in any
/// order, and apply their result to exactly their own slot. The caller is
/// never blocked and receives no completion future; aggregate progress is
/// observable only through the readiness queries.
pub struct FanOutEnricher<T: EnrichmentTarget> {
    /// Remote lookup bound to the target's key type
    fetcher: Arc<dyn DetailFetcher<Key = T::Key, Detail = T::Detail>>,

    /// Current generation of the stage this enricher serves; completions
    /// whose collection generation no longer matches are dropped
    current_generation: Arc<AtomicU64>,

    /// Concurrency bound and per-fetch deadline
    config: EnrichmentConfig,
}

impl<T: EnrichmentTarget> FanOutEnricher<T> {
    pub fn new(
        fetcher: Arc<dyn DetailFetcher<Key = T::Key, Detail = T::Detail>>,
        current_generation: Arc<AtomicU64>,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            fetcher,
            current_generation,
            config,
        }
    }

    /// Start enrichment for every target in the collection and return
    /// immediately.
    pub fn enrich(&self, collection: &Collection<T>) {
        if collection.is_empty() {
            debug!("fan-out skipped for empty collection");
            return;
        }

        let generation = collection.generation();
        let units: Vec<(T::Key, Slot<T>)> = collection
            .slots()
            .iter()
            .map(|slot| (slot.read().key(), Arc::clone(slot)))
            .collect();

        info!(
            targets = units.len(),
            generation, "starting enrichment fan-out"
        );

        let fetcher = Arc::clone(&self.fetcher);
        let current_generation = Arc::clone(&self.current_generation);
        let max_concurrent = self.config.max_concurrent.max(1);
        let deadline = Duration::from_secs(self.config.fetch_timeout_secs);

        tokio::spawn(async move {
            stream::iter(units)
                .for_each_concurrent(max_concurrent, |(key, slot)| {
                    let fetcher = Arc::clone(&fetcher);
                    let current_generation = Arc::clone(&current_generation);

                    async move {
                        enrich_one(
                            fetcher.as_ref(),
                            &key,
                            &slot,
                            generation,
                            &current_generation,
                            deadline,
                        )
                        .await;
                    }
                })
                .await;

            debug!(generation, "enrichment fan-out drained");
        });
    }
}

/// Run one fetch and apply its terminal outcome to the unit's own slot.
async fn enrich_one<T: EnrichmentTarget>(
    fetcher: &dyn DetailFetcher<Key = T::Key, Detail = T::Detail>,
    key: &T::Key,
    slot: &Slot<T>,
    generation: Generation,
    current_generation: &AtomicU64,
    deadline: Duration,
) {
    let outcome = match timeout(deadline, fetcher.fetch(key)).await {
        Ok(Ok(detail)) => Ok(detail),
        Ok(Err(err)) => Err(EnrichmentFailure::from_error(&err)),
        Err(_) => Err(EnrichmentFailure::new(
            FailureKind::Timeout,
            format!("fetch for {} exceeded {:?}", key, deadline),
        )),
    };

    // The stage moved on while this fetch was in flight; the slot belongs to
    // a superseded collection, so the completion is a no-op.
    if current_generation.load(Ordering::Acquire) != generation {
        debug!(key = %key, generation, "dropping completion for superseded collection");
        return;
    }

    // Detail fields and terminal status land in a single write under the
    // slot lock; a concurrent reader sees either the old state or the full
    // new one.
    let mut record = slot.write();
    match outcome {
        Ok(detail) => {
            record.apply(detail);
            debug!(key = %key, "detail applied");
        }
        Err(failure) => {
            warn!(key = %key, kind = ?failure.kind, "enrichment failed: {}", failure.message);
            record.fail(failure);
        }
    }
}
