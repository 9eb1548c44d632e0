/// Concurrent detail enrichment
///
/// This module provides the enrichment core:
/// - Generation-tagged target collections with per-slot write ownership
/// - Per-key detail fetchers over the remote service contracts
/// - A bounded fan-out that applies each completion independently
/// - Pure aggregate readiness queries for polling callers
pub mod collection;
pub mod fanout;
pub mod fetchers;
pub mod readiness;

pub use collection::{Collection, Generation, Slot};
pub use fanout::FanOutEnricher;
pub use fetchers::{CinemaDetailFetcher, DetailFetcher, MovieDetailFetcher};
pub use readiness::{all_loaded, all_resolved};
