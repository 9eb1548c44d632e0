/// Domain entities and enrichment state
///
/// Targets (`Cinema`, `Listing`) carry their immutable seed fields plus a
/// single `Enrichment` state field holding the detail payload once loaded.
pub mod cinema;
pub mod listing;
pub mod status;

pub use cinema::{Cinema, CinemaDetail, CinemaSummary};
pub use listing::{Listing, ListingSummary, MovieDetail};
pub use status::{Enrichment, EnrichmentFailure, EnrichmentTarget, FailureKind};
